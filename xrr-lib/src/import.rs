//! Measured-curve import: column text files from diffractometers or
//! reduced Q-space data.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

use crate::constants::{CU_K_ALPHA1, PLANCK_HC_ANGSTROM};
use crate::error::{Result, XrrError};

/// Physical unit of the x column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum XAxisUnit {
    /// Detector angle 2θ in degrees
    #[serde(rename = "2theta")]
    TwoTheta,
    /// Grazing angle θ in degrees
    #[serde(rename = "theta")]
    Theta,
    /// Q in nm⁻¹
    #[serde(rename = "q_nm")]
    QInverseNm,
    /// Q in Å⁻¹
    #[serde(rename = "q_a")]
    QInverseAngstrom,
}

impl XAxisUnit {
    pub fn as_str(self) -> &'static str {
        match self {
            XAxisUnit::TwoTheta => "2theta",
            XAxisUnit::Theta => "theta",
            XAxisUnit::QInverseNm => "q_nm",
            XAxisUnit::QInverseAngstrom => "q_a",
        }
    }

    /// Convert one x value to Q in Å⁻¹. `wavelength` (Å) is only used for
    /// angular units.
    pub fn to_q(self, x: f64, wavelength: f64) -> f64 {
        match self {
            XAxisUnit::TwoTheta => q_from_theta(0.5 * x, wavelength),
            XAxisUnit::Theta => q_from_theta(x, wavelength),
            XAxisUnit::QInverseNm => x / 10.0,
            XAxisUnit::QInverseAngstrom => x,
        }
    }

    pub fn is_angular(self) -> bool {
        matches!(self, XAxisUnit::TwoTheta | XAxisUnit::Theta)
    }
}

impl fmt::Display for XAxisUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for XAxisUnit {
    type Err = XrrError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "2theta" | "two_theta" | "tth" => Ok(XAxisUnit::TwoTheta),
            "theta" | "omega" => Ok(XAxisUnit::Theta),
            "q_nm" => Ok(XAxisUnit::QInverseNm),
            "q_a" | "q" => Ok(XAxisUnit::QInverseAngstrom),
            _ => Err(XrrError::InvalidParameter(format!(
                "unknown x-axis unit '{s}', use 2theta, theta, q_nm or q_a"
            ))),
        }
    }
}

/// Q (Å⁻¹) for a grazing angle θ in degrees.
pub fn q_from_theta(theta_deg: f64, wavelength: f64) -> f64 {
    4.0 * PI * theta_deg.to_radians().sin() / wavelength
}

/// Wavelength (Å) of a photon of `energy` eV.
pub fn wavelength_from_energy(energy: f64) -> f64 {
    PLANCK_HC_ANGSTROM / energy
}

/// Numeric rows of a column file.
///
/// Blank lines, `#` comments, rows with fewer than two columns and rows
/// with any non-numeric field are skipped. Fields may be separated by
/// whitespace, commas or semicolons.
pub fn parse_rows(text: &str) -> Vec<Vec<f64>> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| {
            line.split(|c: char| c.is_whitespace() || c == ',' || c == ';')
                .filter(|field| !field.is_empty())
                .map(|field| field.parse::<f64>().ok().filter(|v| v.is_finite()))
                .collect::<Option<Vec<f64>>>()
        })
        .filter(|row| row.len() >= 2)
        .collect()
}

/// Q-space data stays below 2.5 Å⁻¹; anything larger is read as 2θ.
pub fn guess_unit(rows: &[Vec<f64>], x_column: usize) -> Option<XAxisUnit> {
    let max_x = rows
        .iter()
        .filter_map(|row| row.get(x_column).copied())
        .fold(f64::NEG_INFINITY, f64::max);
    if !max_x.is_finite() {
        return None;
    }
    Some(if max_x < 2.5 {
        XAxisUnit::QInverseAngstrom
    } else {
        XAxisUnit::TwoTheta
    })
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImportOptions {
    /// `None` guesses from the data range.
    pub unit: Option<XAxisUnit>,
    pub x_column: usize,
    pub y_column: usize,
    /// Å
    pub wavelength: f64,
}

impl Default for ImportOptions {
    fn default() -> Self {
        ImportOptions {
            unit: None,
            x_column: 0,
            y_column: 1,
            wavelength: CU_K_ALPHA1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeasuredData {
    pub unit: XAxisUnit,
    /// Å⁻¹
    pub q: Vec<f64>,
    pub intensity: Vec<f64>,
    /// x values as read, before conversion
    pub original_x: Vec<f64>,
}

/// Range and quality figures of a measured curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DataSummary {
    pub q_min: f64,
    pub q_max: f64,
    /// Decades between the largest and smallest positive intensity
    pub dynamic_range: f64,
    pub points: usize,
    /// Smallest intensity, a rough estimate of the background level
    pub noise_floor: f64,
}

impl MeasuredData {
    pub fn summary(&self) -> DataSummary {
        let min_of = |v: &[f64]| v.iter().copied().fold(f64::INFINITY, f64::min);
        let max_of = |v: &[f64]| v.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let positive: Vec<f64> = self.intensity.iter().copied().filter(|&y| y > 0.0).collect();
        let dynamic_range = if positive.is_empty() {
            0.0
        } else {
            max_of(&positive).log10() - min_of(&positive).log10()
        };

        DataSummary {
            q_min: min_of(&self.q),
            q_max: max_of(&self.q),
            dynamic_range,
            points: self.q.len(),
            noise_floor: min_of(&self.intensity),
        }
    }
}

/// Parse a column file and convert its x column to Q.
pub fn import(text: &str, options: &ImportOptions) -> Result<MeasuredData> {
    let rows = parse_rows(text);
    if rows.is_empty() {
        return Err(XrrError::InvalidData("no numeric rows found".to_string()));
    }

    let unit = match options.unit {
        Some(unit) => unit,
        None => {
            let guessed = guess_unit(&rows, options.x_column).ok_or_else(|| {
                XrrError::InvalidData(format!("column {} is empty", options.x_column))
            })?;
            debug!(unit = %guessed, "guessed x-axis unit from data range");
            guessed
        }
    };
    if unit.is_angular() && (!options.wavelength.is_finite() || options.wavelength <= 0.0) {
        return Err(XrrError::InvalidParameter(format!(
            "wavelength must be positive, got {}",
            options.wavelength
        )));
    }

    let mut original_x = Vec::with_capacity(rows.len());
    let mut intensity = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        let (Some(&x), Some(&y)) = (row.get(options.x_column), row.get(options.y_column)) else {
            return Err(XrrError::InvalidData(format!(
                "data row {} has {} columns, need columns {} and {}",
                i + 1,
                row.len(),
                options.x_column,
                options.y_column
            )));
        };
        original_x.push(x);
        intensity.push(y);
    }

    let q: Vec<f64> = original_x
        .iter()
        .map(|&x| unit.to_q(x, options.wavelength))
        .collect();
    if intensity.iter().any(|&y| y < 0.0) {
        warn!("imported curve contains negative intensities");
    }

    Ok(MeasuredData {
        unit,
        q,
        intensity,
        original_x,
    })
}
