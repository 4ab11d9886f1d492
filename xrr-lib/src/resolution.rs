pub use xrr_data::Resolution;

use crate::error::{Result, XrrError};

/// Quadrature nodes on each side of the centre.
const NODES_PER_SIDE: usize = 8;
/// The kernel is truncated at this many standard deviations.
const SPAN_SIGMAS: f64 = 3.5;

/// FWHM of a Gaussian divided by its standard deviation.
const FWHM_PER_SIGMA: f64 = 2.354_820_045_030_949_3;

pub fn validate(resolution: &Resolution) -> Result<()> {
    let (what, value) = match *resolution {
        Resolution::Constant { fwhm } => ("fwhm", fwhm),
        Resolution::Relative { fraction } => ("fraction", fraction),
    };
    if !value.is_finite() || value < 0.0 {
        return Err(XrrError::InvalidParameter(format!(
            "resolution {what} must be finite and non-negative, got {value}"
        )));
    }
    Ok(())
}

/// Standard deviation of the resolution kernel at `q`.
pub fn sigma_at(resolution: &Resolution, q: f64) -> f64 {
    let fwhm = match *resolution {
        Resolution::Constant { fwhm } => fwhm,
        Resolution::Relative { fraction } => fraction * q.abs(),
    };
    fwhm / FWHM_PER_SIGMA
}

/// Normalized Gaussian weights at offsets `k / NODES_PER_SIDE · SPAN_SIGMAS` σ.
fn kernel() -> Vec<(f64, f64)> {
    let n = NODES_PER_SIDE as i32;
    let nodes: Vec<(f64, f64)> = (-n..=n)
        .map(|k| {
            let x = f64::from(k) / f64::from(n) * SPAN_SIGMAS;
            (x, (-0.5 * x * x).exp())
        })
        .collect();
    let total: f64 = nodes.iter().map(|&(_, w)| w).sum();
    nodes.into_iter().map(|(x, w)| (x, w / total)).collect()
}

/// Smear a curve with the instrument resolution.
///
/// `evaluate` computes the unsmeared curve at arbitrary Q values; it is
/// called once with every quadrature node so it can run them in parallel.
pub fn smear<F>(q: &[f64], resolution: &Resolution, evaluate: F) -> Vec<f64>
where
    F: FnOnce(&[f64]) -> Vec<f64>,
{
    let kernel = kernel();
    let width = kernel.len();

    let nodes: Vec<f64> = q
        .iter()
        .flat_map(|&qi| {
            let sigma = sigma_at(resolution, qi);
            kernel.iter().map(move |&(x, _)| qi + x * sigma)
        })
        .collect();
    let values = evaluate(&nodes);

    values
        .chunks(width)
        .map(|chunk| chunk.iter().zip(&kernel).map(|(v, &(_, w))| v * w).sum())
        .collect()
}
