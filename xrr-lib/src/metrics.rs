//! Agreement figures between a measured and a calculated curve.

use serde::Serialize;

use crate::error::{Result, XrrError};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FitMetrics {
    /// Reduced χ² with Poisson-like weights `1 / max(y, 1)`
    pub chi2: f64,
    /// Relative log-space misfit in percent
    pub fom: f64,
    /// Mean absolute difference of log10 intensities
    pub mae: f64,
}

/// Compare two curves sampled at the same Q points.
///
/// Log-space figures only use points where both intensities are positive;
/// when there are none they are reported as 0.
pub fn compare(measured: &[f64], calculated: &[f64]) -> Result<FitMetrics> {
    if measured.len() != calculated.len() {
        return Err(XrrError::LengthMismatch {
            expected: measured.len(),
            found: calculated.len(),
        });
    }
    if measured.is_empty() {
        return Err(XrrError::InvalidData("cannot compare empty curves".to_string()));
    }

    let n = measured.len() as f64;
    let chi2 = measured
        .iter()
        .zip(calculated)
        .map(|(&ym, &yc)| (ym - yc).powi(2) / ym.max(1.0))
        .sum::<f64>()
        / n;

    let logs: Vec<(f64, f64)> = measured
        .iter()
        .zip(calculated)
        .filter(|&(&ym, &yc)| ym > 0.0 && yc > 0.0)
        .map(|(&ym, &yc)| (ym.log10(), yc.log10()))
        .collect();

    let (mae, fom) = if logs.is_empty() {
        (0.0, 0.0)
    } else {
        let abs_diff: f64 = logs.iter().map(|(lm, lc)| (lm - lc).abs()).sum();
        let abs_meas: f64 = logs.iter().map(|(lm, _)| lm.abs()).sum();
        let fom = if abs_meas > 0.0 {
            100.0 * abs_diff / abs_meas
        } else {
            0.0
        };
        (abs_diff / logs.len() as f64, fom)
    };

    Ok(FitMetrics { chi2, fom, mae })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_curves() {
        let y = [1e4, 1e2, 1.0, 1e-2];
        let m = compare(&y, &y).unwrap();
        assert_eq!(m.chi2, 0.0);
        assert_eq!(m.fom, 0.0);
        assert_eq!(m.mae, 0.0);
    }

    #[test]
    fn test_one_decade_off() {
        let measured = [1e4, 1e2];
        let calculated = [1e3, 1e1];
        let m = compare(&measured, &calculated).unwrap();
        assert!((m.mae - 1.0).abs() < 1e-12);
        // Σ|Δlog| = 2, Σ|log ym| = 4 + 2
        assert!((m.fom - 100.0 * 2.0 / 6.0).abs() < 1e-9);
        let chi2 = ((9e3f64).powi(2) / 1e4 + (90.0f64).powi(2) / 1e2) / 2.0;
        assert!((m.chi2 - chi2).abs() < 1e-6);
    }

    #[test]
    fn test_non_positive_points_skip_log_terms() {
        let m = compare(&[0.0, 10.0], &[5.0, 10.0]).unwrap();
        assert_eq!(m.mae, 0.0);
        assert!((m.chi2 - 12.5).abs() < 1e-12);
    }

    #[test]
    fn test_length_mismatch() {
        assert_eq!(
            compare(&[1.0, 2.0], &[1.0]),
            Err(XrrError::LengthMismatch {
                expected: 2,
                found: 1
            })
        );
        assert!(compare(&[], &[]).is_err());
    }
}
