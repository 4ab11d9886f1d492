//! Optional `xrr.toml` with instrument and import defaults.
//!
//! ```toml
//! [instrument]
//! wavelength = 1.5406      # Å, or give `energy` in eV
//!
//! [import]
//! unit = "2theta"
//! x_column = 0
//! y_column = 1
//!
//! [logging]
//! verbose = false
//! json = false
//! filter = "xrr=debug"
//! ```

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::path::Path;

use xrr::constants::CU_K_ALPHA1;
use xrr::import::{ImportOptions, XAxisUnit, wavelength_from_energy};

/// Looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "xrr.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    pub instrument: InstrumentConfig,
    pub import: ImportConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InstrumentConfig {
    /// Å
    pub wavelength: Option<f64>,
    /// eV, used when no wavelength is set
    pub energy: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImportConfig {
    pub unit: Option<XAxisUnit>,
    pub x_column: Option<usize>,
    pub y_column: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub verbose: bool,
    pub json: bool,
    /// `EnvFilter` directives
    pub filter: Option<String>,
}

/// Import settings given on the command line; each one overrides the file.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ImportOverrides {
    pub unit: Option<XAxisUnit>,
    pub x_column: Option<usize>,
    pub y_column: Option<usize>,
    pub wavelength: Option<f64>,
    pub energy: Option<f64>,
}

impl CliConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("invalid config file {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: CliConfig = toml::from_str(content).context("TOML parsing error")?;
        config.validate()?;
        Ok(config)
    }

    /// An explicit path must exist; otherwise `xrr.toml` is used if present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => Self::from_file(DEFAULT_CONFIG_FILE),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(wavelength) = self.instrument.wavelength {
            check_positive("instrument.wavelength", wavelength)?;
        }
        if let Some(energy) = self.instrument.energy {
            check_positive("instrument.energy", energy)?;
        }
        Ok(())
    }

    /// Import options after applying command-line overrides.
    pub fn import_options(&self, overrides: &ImportOverrides) -> Result<ImportOptions> {
        let defaults = ImportOptions::default();
        let wavelength = resolve_wavelength(
            overrides.wavelength.or(self.instrument.wavelength),
            overrides.energy.or(self.instrument.energy),
        )?;
        Ok(ImportOptions {
            unit: overrides.unit.or(self.import.unit),
            x_column: overrides
                .x_column
                .or(self.import.x_column)
                .unwrap_or(defaults.x_column),
            y_column: overrides
                .y_column
                .or(self.import.y_column)
                .unwrap_or(defaults.y_column),
            wavelength,
        })
    }
}

fn check_positive(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        bail!("{field} must be a positive number, got {value}");
    }
    Ok(())
}

fn resolve_wavelength(wavelength: Option<f64>, energy: Option<f64>) -> Result<f64> {
    match (wavelength, energy) {
        (Some(wavelength), _) => {
            check_positive("wavelength", wavelength)?;
            if energy.is_some() {
                tracing::warn!(wavelength, "both wavelength and energy given, using wavelength");
            }
            Ok(wavelength)
        }
        (None, Some(energy)) => {
            check_positive("energy", energy)?;
            Ok(wavelength_from_energy(energy))
        }
        (None, None) => Ok(CU_K_ALPHA1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config = CliConfig::from_toml_str(
            r#"
[instrument]
wavelength = 1.54

[import]
unit = "q_nm"
y_column = 2

[logging]
json = true
filter = "xrr=trace"
"#,
        )
        .unwrap();
        assert_eq!(config.instrument.wavelength, Some(1.54));
        assert_eq!(config.import.unit, Some(XAxisUnit::QInverseNm));
        assert_eq!(config.import.y_column, Some(2));
        assert!(config.logging.json);
        assert_eq!(config.logging.filter.as_deref(), Some("xrr=trace"));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = CliConfig::from_toml_str("").unwrap();
        assert_eq!(config, CliConfig::default());
        let options = config.import_options(&ImportOverrides::default()).unwrap();
        assert_eq!(options, ImportOptions::default());
    }

    #[test]
    fn test_command_line_overrides_file() {
        let config = CliConfig::from_toml_str(
            "[instrument]\nwavelength = 1.54\n[import]\nunit = \"theta\"\nx_column = 3\n",
        )
        .unwrap();
        let overrides = ImportOverrides {
            unit: Some(XAxisUnit::TwoTheta),
            wavelength: Some(0.7093),
            ..ImportOverrides::default()
        };
        let options = config.import_options(&overrides).unwrap();
        assert_eq!(options.unit, Some(XAxisUnit::TwoTheta));
        assert_eq!(options.x_column, 3);
        assert_eq!(options.y_column, 1);
        assert_eq!(options.wavelength, 0.7093);
    }

    #[test]
    fn test_energy_sets_wavelength() {
        let config = CliConfig::from_toml_str("[instrument]\nenergy = 17479.0\n").unwrap();
        let options = config.import_options(&ImportOverrides::default()).unwrap();
        assert!((options.wavelength - 0.7093).abs() < 1e-3);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        assert!(CliConfig::from_toml_str("[instrument]\nwavelength = -1.0\n").is_err());
        assert!(CliConfig::from_toml_str("[instrument]\nwavelenght = 1.5\n").is_err());
        assert!(CliConfig::from_toml_str("[import]\nunit = \"degrees\"\n").is_err());
    }
}
