//! Specular reflectivity of a layer stack by Parratt recursion.
//!
//! Works in momentum transfer: in medium j the normal wavevector component is
//! `kz_j = sqrt(kz0² − 4π(ρ_j − ρ_ambient))` with `kz0 = Q/2`. The recursion
//! starts at the substrate, where nothing is reflected from below, and climbs
//! to the surface one interface at a time.

use num_complex::Complex64;
use std::f64::consts::PI;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::roughness::{RoughnessModel, damping};
use crate::stack::Stack;

/// Convert f64 to Complex64 (real part only).
#[inline]
fn c(re: f64) -> Complex64 {
    Complex64::new(re, 0.0)
}

/// Normal wavevector component (Å⁻¹) in a medium with SLD `contrast`
/// (Å⁻², relative to the ambient) for a vacuum component `kz0`.
///
/// Absorption (positive imaginary SLD) gives `Im kz > 0`, so the transmitted
/// field decays with depth. The root with non-negative imaginary part is
/// always returned.
pub fn wavevector(kz0: f64, contrast: Complex64) -> Complex64 {
    let k = Complex64::new(kz0 * kz0 - 4.0 * PI * contrast.re, 4.0 * PI * contrast.im).sqrt();
    if k.im < 0.0 { -k } else { k }
}

/// Fresnel reflection coefficient of a sharp interface.
///
/// Returns zero when both media carry no wave (no contrast at Q = 0).
pub fn fresnel(kz_upper: Complex64, kz_lower: Complex64) -> Complex64 {
    let sum = kz_upper + kz_lower;
    if sum.norm() == 0.0 {
        return c(0.0);
    }
    (kz_upper - kz_lower) / sum
}

/// Complex reflection amplitude of the whole stack at one Q (Å⁻¹).
///
/// Q is taken by magnitude. Every interface gets its own roughness damping,
/// using the roughness of the layer below it.
pub fn reflection_amplitude(stack: &Stack, q: f64, roughness: RoughnessModel) -> Complex64 {
    let kz0 = 0.5 * q.abs();
    let ambient = stack.ambient_sld();
    let layers = stack.layers();

    // kz[0] is the ambient, kz[j + 1] belongs to layers[j]
    let kz: Vec<Complex64> = std::iter::once(c(kz0))
        .chain(layers.iter().map(|l| wavevector(kz0, l.sld - ambient)))
        .collect();

    let one = c(1.0);
    let two_i = Complex64::new(0.0, 2.0);
    let last = layers.len() - 1;

    let mut r_amp = c(0.0);
    for j in (0..=last).rev() {
        let r_j = fresnel(kz[j], kz[j + 1]) * damping(roughness, kz[j], kz[j + 1], layers[j].roughness);
        r_amp = if j == last {
            r_j
        } else {
            let p2 = (two_i * kz[j + 1] * c(layers[j].thickness)).exp();
            let below = r_amp * p2;
            (r_j + below) / (one + r_j * below)
        };
    }
    r_amp
}

/// |r|² at one Q.
pub fn reflectivity_at(stack: &Stack, q: f64, roughness: RoughnessModel) -> f64 {
    reflection_amplitude(stack, q, roughness).norm_sqr()
}

/// Reflectivity for each Q, returned in the order of `q`.
pub fn reflectivity(stack: &Stack, q: &[f64], roughness: RoughnessModel) -> Vec<f64> {
    map_q(q, |qi| reflectivity_at(stack, qi, roughness))
}

/// Evaluates `f` at every Q, in parallel when the `parallel` feature is on.
pub(crate) fn map_q<F>(q: &[f64], f: F) -> Vec<f64>
where
    F: Fn(f64) -> f64 + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        q.par_iter().map(|&qi| f(qi)).collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        q.iter().map(|&qi| f(qi)).collect()
    }
}
