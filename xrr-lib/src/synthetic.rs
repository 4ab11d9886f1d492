/// Empirical decay curve `1e9 · (|q| + 0.01)⁻⁴ · exp(−|q|·σ)` with σ the
/// first layer's roughness.
///
/// Depends only on Q and σ; layer thicknesses and densities play no part.
pub fn decay_curve(q: &[f64], roughness: f64) -> Vec<f64> {
    q.iter()
        .map(|&qi| {
            let q = qi.abs();
            1e9 * (q + 0.01).powi(-4) * (-q * roughness).exp()
        })
        .collect()
}
