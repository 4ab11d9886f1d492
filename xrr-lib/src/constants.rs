/// Avogadro's number (mol^-1)
pub const AVOGADRO: f64 = 6.02214076e23;

/// Planck's constant times speed of light (eV·Å)
pub const PLANCK_HC_ANGSTROM: f64 = 12398.4193;

/// Classical electron radius (Å)
pub const R_ELECTRON_ANG: f64 = 2.8179403262e-5;

/// Cubic centimetres per cubic ångström
pub const CM3_PER_ANG3: f64 = 1.0e-24;

/// Cu Kα1 wavelength (Å), the usual laboratory XRR source
pub const CU_K_ALPHA1: f64 = 1.5406;

/// Request SLD fields are given in units of 1e-6 Å⁻².
pub const SLD_UNIT: f64 = 1.0e-6;
