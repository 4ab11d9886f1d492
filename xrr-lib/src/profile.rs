//! Scattering-length-density depth profile of a stack.
//!
//! Depth z is measured downward from the nominal surface (z = 0). Each
//! interface is an error-function step whose width is the interface's RMS
//! roughness, the same roughness that damps the reflectivity.

use serde::Serialize;
use statrs::function::erf::erf;
use std::f64::consts::SQRT_2;

use crate::constants::SLD_UNIT;
use crate::error::{Result, XrrError};
use crate::qgrid::linspace;
use crate::stack::Stack;

/// Profile of a single layer, for plotting layers separately.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerProfile {
    pub name: String,
    /// Real SLD contribution in 1e-6 Å⁻²
    pub sld: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SldProfile {
    /// Depth in Å
    pub z: Vec<f64>,
    /// Real SLD in 1e-6 Å⁻²
    pub sld: Vec<f64>,
    /// Ambient contribution above the surface, 1e-6 Å⁻²
    pub ambient: Vec<f64>,
    /// `ambient` plus every layer's curve adds up to `sld`
    pub layers: Vec<LayerProfile>,
}

/// Fraction of the lower medium present at depth `z` for an interface at
/// `z0` with RMS width `sigma`.
fn step(z: f64, z0: f64, sigma: f64) -> f64 {
    if sigma > 0.0 {
        0.5 * (1.0 + erf((z - z0) / (SQRT_2 * sigma)))
    } else if z > z0 {
        1.0
    } else if z < z0 {
        0.0
    } else {
        0.5
    }
}

/// Depth of the top interface of every layer.
fn interface_depths(stack: &Stack) -> Vec<f64> {
    stack
        .layers()
        .iter()
        .scan(0.0, |depth, layer| {
            let top = *depth;
            *depth += layer.thickness;
            Some(top)
        })
        .collect()
}

/// Depth range that shows the ambient, every film and the substrate with
/// their interface tails.
pub fn default_depth_range(stack: &Stack) -> (f64, f64) {
    let layers = stack.layers();
    let top_sigma = layers[0].roughness;
    let bottom_sigma = stack.substrate().roughness;
    (
        -(4.0 * top_sigma + 10.0),
        stack.total_thickness() + 4.0 * bottom_sigma + 10.0,
    )
}

/// Profile on `points` depths spanning [`default_depth_range`].
pub fn sld_profile(stack: &Stack, points: usize) -> Result<SldProfile> {
    if points < 2 {
        return Err(XrrError::InvalidParameter(format!(
            "a depth profile needs at least 2 points, got {points}"
        )));
    }
    let (start, stop) = default_depth_range(stack);
    Ok(sld_profile_at(stack, &linspace(start, stop, points)))
}

/// Profile at the given depths (Å).
pub fn sld_profile_at(stack: &Stack, z: &[f64]) -> SldProfile {
    let layers = stack.layers();
    let tops = interface_depths(stack);
    let ambient = stack.ambient_sld();
    let last = layers.len() - 1;

    let total = z
        .iter()
        .map(|&zi| {
            let mut above = ambient;
            let mut value = ambient;
            for (layer, &z0) in layers.iter().zip(&tops) {
                value += (layer.sld.re - above) * step(zi, z0, layer.roughness);
                above = layer.sld.re;
            }
            value / SLD_UNIT
        })
        .collect();

    let ambient_part = z
        .iter()
        .map(|&zi| ambient * (1.0 - step(zi, tops[0], layers[0].roughness)) / SLD_UNIT)
        .collect();

    let per_layer = layers
        .iter()
        .enumerate()
        .map(|(i, layer)| {
            let sld = z
                .iter()
                .map(|&zi| {
                    let inside = if i == last {
                        step(zi, tops[i], layer.roughness)
                    } else {
                        step(zi, tops[i], layer.roughness)
                            - step(zi, tops[i + 1], layers[i + 1].roughness)
                    };
                    layer.sld.re * inside / SLD_UNIT
                })
                .collect();
            LayerProfile {
                name: layer.name.clone(),
                sld,
            }
        })
        .collect();

    SldProfile {
        z: z.to_vec(),
        sld: total,
        ambient: ambient_part,
        layers: per_layer,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stack::StackLayer;
    use num_complex::Complex64;

    fn film_on_substrate(sigma: f64) -> Stack {
        Stack::new(
            0.0,
            vec![
                StackLayer::new("film", 100.0, sigma, Complex64::new(40e-6, 0.0)),
                StackLayer::new("sub", 0.0, sigma, Complex64::new(20e-6, 0.0)),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_sharp_profile_plateaus() {
        let p = sld_profile_at(&film_on_substrate(0.0), &[-5.0, 50.0, 150.0]);
        for (got, want) in p.sld.iter().zip([0.0, 40.0, 20.0]) {
            assert!((got - want).abs() < 1e-9, "{got} != {want}");
        }
        assert_eq!(p.layers.len(), 2);
    }

    #[test]
    fn test_rough_interface_midpoint() {
        let p = sld_profile_at(&film_on_substrate(5.0), &[0.0, 100.0]);
        assert!((p.sld[0] - 20.0).abs() < 1e-9, "surface = {}", p.sld[0]);
        assert!((p.sld[1] - 30.0).abs() < 1e-9, "buried = {}", p.sld[1]);
    }

    #[test]
    fn test_layers_sum_to_total() {
        let stack = film_on_substrate(3.0);
        let p = sld_profile(&stack, 200).unwrap();
        for (k, total) in p.sld.iter().enumerate() {
            let sum: f64 = p.layers.iter().map(|l| l.sld[k]).sum();
            assert!((sum - total).abs() < 1e-9, "z = {}", p.z[k]);
            assert_eq!(p.ambient[k], 0.0);
        }
    }

    #[test]
    fn test_parts_sum_to_total_under_a_liquid() {
        let stack = Stack::new(
            9.4e-6,
            vec![
                StackLayer::new("film", 60.0, 4.0, Complex64::new(40e-6, 0.0)),
                StackLayer::new("sub", 0.0, 2.0, Complex64::new(20e-6, 0.0)),
            ],
        )
        .unwrap();
        let p = sld_profile(&stack, 150).unwrap();
        assert!((p.sld[0] - 9.4).abs() < 1e-6);
        assert!((p.ambient[0] - 9.4).abs() < 1e-6);
        for (k, total) in p.sld.iter().enumerate() {
            let sum: f64 = p.ambient[k] + p.layers.iter().map(|l| l.sld[k]).sum::<f64>();
            assert!((sum - total).abs() < 1e-9, "z = {}", p.z[k]);
        }
    }

    #[test]
    fn test_default_range() {
        let (start, stop) = default_depth_range(&film_on_substrate(2.0));
        assert_eq!(start, -18.0);
        assert_eq!(stop, 118.0);
        assert!(sld_profile(&film_on_substrate(2.0), 1).is_err());
    }
}
