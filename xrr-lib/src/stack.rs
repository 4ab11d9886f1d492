//! Layer stack: the sample as the recursion sees it.
//!
//! Layers run from the surface down. The ambient medium sits above layer 0
//! and is not part of the list; the last layer is the semi-infinite substrate.

use num_complex::Complex64;
use tracing::debug;

use crate::chemparser::validate_formula;
use crate::constants::SLD_UNIT;
use crate::error::{Result, XrrError};
use crate::materials::electron_sld;
use crate::materials_db::find_material;

/// A layer with its optical constant resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct StackLayer {
    pub name: String,
    /// Å, ignored for the substrate
    pub thickness: f64,
    /// RMS width of the top interface, Å
    pub roughness: f64,
    /// Scattering length density in Å⁻²; the imaginary part is absorption
    /// and is non-negative for physical media.
    pub sld: Complex64,
}

impl StackLayer {
    pub fn new(name: impl Into<String>, thickness: f64, roughness: f64, sld: Complex64) -> Self {
        StackLayer {
            name: name.into(),
            thickness,
            roughness,
            sld,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stack {
    ambient_sld: f64,
    layers: Vec<StackLayer>,
}

fn check_finite_non_negative(index: usize, what: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(XrrError::InvalidLayer {
            index,
            reason: format!("{what} must be finite and non-negative, got {value}"),
        });
    }
    Ok(())
}

impl Stack {
    /// Build a stack from already-resolved layers.
    ///
    /// `ambient_sld` is in Å⁻². Fails on an empty list or on a negative or
    /// non-finite thickness or roughness.
    pub fn new(ambient_sld: f64, layers: Vec<StackLayer>) -> Result<Self> {
        if layers.is_empty() {
            return Err(XrrError::EmptyStack);
        }
        if !ambient_sld.is_finite() {
            return Err(XrrError::InvalidParameter(format!(
                "ambient SLD must be finite, got {ambient_sld}"
            )));
        }
        for (i, layer) in layers.iter().enumerate() {
            check_finite_non_negative(i, "thickness", layer.thickness)?;
            check_finite_non_negative(i, "roughness", layer.roughness)?;
            if !layer.sld.re.is_finite() || !layer.sld.im.is_finite() {
                return Err(XrrError::InvalidLayer {
                    index: i,
                    reason: format!("SLD must be finite, got {}", layer.sld),
                });
            }
        }
        Ok(Stack {
            ambient_sld,
            layers,
        })
    }

    /// Resolve wire layers into a stack. `ambient_sld` is in 1e-6 Å⁻² as in
    /// the request.
    pub fn from_request(layers: &[xrr_data::Layer], ambient_sld: f64) -> Result<Self> {
        validate_layers(layers)?;
        let resolved = layers
            .iter()
            .enumerate()
            .map(|(i, layer)| {
                Ok(StackLayer::new(
                    layer.name.clone(),
                    layer.thickness,
                    layer.roughness,
                    resolve_sld(i, layer)?,
                ))
            })
            .collect::<Result<Vec<_>>>()?;
        Stack::new(ambient_sld * SLD_UNIT, resolved)
    }

    pub fn ambient_sld(&self) -> f64 {
        self.ambient_sld
    }

    pub fn layers(&self) -> &[StackLayer] {
        &self.layers
    }

    pub fn substrate(&self) -> &StackLayer {
        &self.layers[self.layers.len() - 1]
    }

    /// Every layer above the substrate.
    pub fn films(&self) -> &[StackLayer] {
        &self.layers[..self.layers.len() - 1]
    }

    /// Combined thickness of the films in Å.
    pub fn total_thickness(&self) -> f64 {
        self.films().iter().map(|l| l.thickness).sum()
    }
}

/// Geometry and density checks on wire layers, without resolving SLDs.
pub fn validate_layers(layers: &[xrr_data::Layer]) -> Result<()> {
    if layers.is_empty() {
        return Err(XrrError::EmptyStack);
    }
    for (i, layer) in layers.iter().enumerate() {
        check_finite_non_negative(i, "thickness", layer.thickness)?;
        check_finite_non_negative(i, "roughness", layer.roughness)?;
        check_finite_non_negative(i, "density", layer.density)?;
    }
    Ok(())
}

/// Optical constant of a wire layer, in Å⁻².
///
/// Bulk density alone does not determine an X-ray SLD, so the layer must
/// supply an SLD, a formula, or a name that is a known material or a
/// formula in its own right.
pub fn resolve_sld(index: usize, layer: &xrr_data::Layer) -> Result<Complex64> {
    if let Some(sld) = layer.sld {
        let isld = layer.isld.unwrap_or(0.0);
        debug!(index, name = %layer.name, sld, isld, "layer SLD given explicitly");
        return Ok(Complex64::new(sld * SLD_UNIT, isld * SLD_UNIT));
    }

    let formula = match &layer.formula {
        Some(formula) => Some(formula.as_str()),
        None => formula_from_name(&layer.name),
    };
    let Some(formula) = formula else {
        return Err(XrrError::MissingOpticalConstant {
            index,
            name: layer.name.clone(),
        });
    };

    let sld = electron_sld(formula, layer.density)?;
    let isld = layer.isld.unwrap_or(0.0) * SLD_UNIT;
    debug!(
        index,
        name = %layer.name,
        formula,
        density = layer.density,
        sld_e6 = sld / SLD_UNIT,
        "layer SLD from composition"
    );
    Ok(Complex64::new(sld, isld))
}

/// "Si Substrate" resolves through its first word, "HfO2" as a formula.
fn formula_from_name(name: &str) -> Option<&str> {
    let candidates = std::iter::once(name.trim()).chain(name.split_whitespace().next());
    for candidate in candidates {
        if let Some(m) = find_material(candidate) {
            return Some(m.formula);
        }
        if validate_formula(candidate) {
            return Some(candidate);
        }
    }
    None
}
