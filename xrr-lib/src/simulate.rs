use tracing::{debug, instrument};
use xrr_data::{Model, SimulationRequest, SimulationResponse};

use crate::error::{Result, XrrError};
use crate::parratt::reflectivity;
use crate::qgrid::QGrid;
use crate::resolution::{self, smear};
use crate::stack::{Stack, validate_layers};
use crate::synthetic::decay_curve;

/// Run a simulation request on its own linear Q grid.
pub fn simulate(request: &SimulationRequest) -> Result<SimulationResponse> {
    let grid = QGrid::new(request.q_min, request.q_max, request.points)?;
    let q = grid.values();
    let intensity = simulate_at(request, &q)?;
    Ok(SimulationResponse { q, intensity })
}

/// Evaluate the requested model at caller-supplied Q values (Å⁻¹), e.g. the
/// points of a measured curve. The request's grid fields are ignored.
#[instrument(
    level = "debug",
    skip_all,
    fields(model = ?request.model, layers = request.layers.len(), points = q.len())
)]
pub fn simulate_at(request: &SimulationRequest, q: &[f64]) -> Result<Vec<f64>> {
    validate_layers(&request.layers)?;

    match request.model {
        Model::Synthetic => Ok(decay_curve(q, request.layers[0].roughness)),
        Model::Parratt => {
            check_instrument(request)?;
            let stack = Stack::from_request(&request.layers, request.ambient_sld)?;
            let roughness = request.roughness_model;

            let r = match &request.resolution {
                Some(res) => {
                    resolution::validate(res)?;
                    debug!(resolution = ?res, "smearing with instrument resolution");
                    smear(q, res, |nodes| reflectivity(&stack, nodes, roughness))
                }
                None => reflectivity(&stack, q, roughness),
            };

            Ok(r.into_iter()
                .map(|ri| request.scale * ri + request.background)
                .collect())
        }
    }
}

fn check_instrument(request: &SimulationRequest) -> Result<()> {
    if !request.scale.is_finite() || request.scale <= 0.0 {
        return Err(XrrError::InvalidParameter(format!(
            "scale must be finite and positive, got {}",
            request.scale
        )));
    }
    if !request.background.is_finite() || request.background < 0.0 {
        return Err(XrrError::InvalidParameter(format!(
            "background must be finite and non-negative, got {}",
            request.background
        )));
    }
    Ok(())
}
