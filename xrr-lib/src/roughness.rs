use num_complex::Complex64;

pub use xrr_data::RoughnessModel;

/// Damping factor for the Fresnel coefficient of one rough interface.
///
/// `kz_upper` and `kz_lower` are the wavevector normal components in the
/// media above and below the interface, `sigma` its RMS width in Å.
pub fn damping(model: RoughnessModel, kz_upper: Complex64, kz_lower: Complex64, sigma: f64) -> Complex64 {
    if sigma <= 0.0 {
        return Complex64::new(1.0, 0.0);
    }
    let s2 = sigma * sigma;
    match model {
        RoughnessModel::NevotCroce => (-2.0 * s2 * kz_upper * kz_lower).exp(),
        RoughnessModel::DebyeWaller => (-2.0 * s2 * kz_upper * kz_upper).exp(),
        RoughnessModel::None => Complex64::new(1.0, 0.0),
    }
}
