use std::f64::consts::PI;

use crate::chemparser::{Composition, chemparse};
use crate::constants::{AVOGADRO, CM3_PER_ANG3, R_ELECTRON_ANG};
use crate::elements::element;
use crate::error::{Result, XrrError};

/// Molar mass and electron count of one formula unit.
fn formula_totals(composition: &Composition) -> Result<(f64, f64)> {
    let mut weight = 0.0;
    let mut electrons = 0.0;
    for (symbol, &count) in composition {
        let e = element(symbol)?;
        weight += count * e.molar_mass;
        electrons += count * f64::from(e.atomic_number);
    }
    Ok((weight, electrons))
}

/// Molar mass of a formula unit in g/mol.
pub fn formula_weight(formula: &str) -> Result<f64> {
    let (weight, _) = formula_totals(&chemparse(formula)?)?;
    Ok(weight)
}

/// Electron number density in electrons/Å³.
///
/// # Arguments
/// * `formula` - Chemical formula (e.g., "SiO2")
/// * `density` - Mass density in g/cm³
pub fn electron_density(formula: &str, density: f64) -> Result<f64> {
    if !density.is_finite() || density < 0.0 {
        return Err(XrrError::InvalidParameter(format!(
            "density must be finite and non-negative, got {density}"
        )));
    }
    let (weight, electrons) = formula_totals(&chemparse(formula)?)?;
    if weight <= 0.0 {
        return Err(XrrError::InvalidFormula(format!(
            "zero weight formula: {formula}"
        )));
    }
    Ok(density * AVOGADRO * CM3_PER_ANG3 * electrons / weight)
}

/// X-ray scattering length density in Å⁻².
///
/// Uses f ≈ Z for every atom, which holds away from absorption edges; the
/// absorptive part is not estimated and must be given explicitly if needed.
pub fn electron_sld(formula: &str, density: f64) -> Result<f64> {
    Ok(R_ELECTRON_ANG * electron_density(formula, density)?)
}

/// Critical momentum transfer (Å⁻¹) for an SLD contrast in Å⁻².
pub fn critical_q(sld_contrast: f64) -> f64 {
    if sld_contrast > 0.0 {
        4.0 * (PI * sld_contrast).sqrt()
    } else {
        0.0
    }
}

/// Critical grazing angle in radians for an SLD contrast at `wavelength` (Å).
pub fn critical_angle(sld_contrast: f64, wavelength: f64) -> f64 {
    let s = critical_q(sld_contrast) * wavelength / (4.0 * PI);
    s.min(1.0).asin()
}

/// Refractive index decrement δ for an SLD in Å⁻² at `wavelength` (Å).
pub fn delta_from_sld(sld: f64, wavelength: f64) -> f64 {
    wavelength * wavelength * sld / (2.0 * PI)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formula_weight_water() {
        let w = formula_weight("H2O").unwrap();
        assert!((w - 18.015).abs() < 1e-3, "w = {w}");
    }

    #[test]
    fn test_silicon_sld() {
        // Si at 2.33 g/cm³: about 0.70 e/Å³, SLD near 19.7e-6 Å⁻²
        let rho_e = electron_density("Si", 2.33).unwrap();
        assert!((rho_e - 0.6995).abs() < 1e-3, "rho_e = {rho_e}");
        let sld = electron_sld("Si", 2.33).unwrap();
        assert!((sld * 1e6 - 19.71).abs() < 0.05, "sld = {sld}");
    }

    #[test]
    fn test_silicon_critical_edge() {
        let sld = electron_sld("Si", 2.33).unwrap();
        let qc = critical_q(sld);
        assert!((qc - 0.0315).abs() < 5e-4, "qc = {qc}");
        // about 0.22 degrees at Cu Kα
        let theta_c = critical_angle(sld, 1.5406).to_degrees();
        assert!(theta_c > 0.2 && theta_c < 0.24, "theta_c = {theta_c}");
    }

    #[test]
    fn test_delta_matches_critical_angle() {
        let sld = electron_sld("Au", 19.32).unwrap();
        let delta = delta_from_sld(sld, 1.5406);
        let theta_c = critical_angle(sld, 1.5406);
        assert!(((2.0 * delta).sqrt() - theta_c).abs() / theta_c < 1e-3);
    }

    #[test]
    fn test_rejects_bad_density_and_formula() {
        assert!(matches!(
            electron_sld("Si", -1.0),
            Err(XrrError::InvalidParameter(_))
        ));
        assert!(matches!(
            electron_sld("Qq", 1.0),
            Err(XrrError::InvalidFormula(_))
        ));
        assert_eq!(critical_q(-1e-6), 0.0);
    }
}
