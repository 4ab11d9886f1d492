#![no_std]

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

/// One material layer of the sample, as sent by the front end.
///
/// Layers are ordered from the surface down: index 0 sits directly under
/// the ambient and the last entry is the substrate, whose thickness is
/// ignored. `roughness` is the RMS width of the layer's top interface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub id: String,
    pub name: String,
    /// Thickness in Å
    pub thickness: f64,
    /// RMS roughness of the top interface in Å
    pub roughness: f64,
    /// Mass density in g/cm³
    pub density: f64,
    /// Chemical formula, e.g. "SiO2"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formula: Option<String>,
    /// Real scattering length density in 1e-6 Å⁻²
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sld: Option<f64>,
    /// Imaginary (absorptive) scattering length density in 1e-6 Å⁻²
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isld: Option<f64>,
}

impl Layer {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        thickness: f64,
        roughness: f64,
        density: f64,
    ) -> Self {
        Layer {
            id: id.into(),
            name: name.into(),
            thickness,
            roughness,
            density,
            formula: None,
            sld: None,
            isld: None,
        }
    }

    pub fn with_formula(mut self, formula: impl Into<String>) -> Self {
        self.formula = Some(formula.into());
        self
    }

    /// Set the SLD directly, in units of 1e-6 Å⁻².
    pub fn with_sld(mut self, sld: f64, isld: f64) -> Self {
        self.sld = Some(sld);
        self.isld = Some(isld);
        self
    }
}

/// Which curve the simulation produces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Model {
    /// `1e9 · (q + 0.01)⁻⁴ · exp(−q·σ₀)`, the decay curve served before the
    /// recursion existed.
    #[default]
    Synthetic,
    /// Parratt recursion over the full layer stack.
    Parratt,
}

/// Interfacial roughness damping applied to each Fresnel coefficient.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoughnessModel {
    #[default]
    NevotCroce,
    DebyeWaller,
    None,
}

/// Gaussian instrumental resolution, given as a FWHM in Q.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Resolution {
    /// Same FWHM (Å⁻¹) at every Q.
    Constant { fwhm: f64 },
    /// FWHM proportional to Q (dQ/Q).
    Relative { fraction: f64 },
}

fn default_q_max() -> f64 {
    0.5
}

fn default_points() -> usize {
    100
}

fn default_scale() -> f64 {
    1.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRequest {
    pub layers: Vec<Layer>,
    #[serde(default)]
    pub q_min: f64,
    #[serde(default = "default_q_max")]
    pub q_max: f64,
    #[serde(default = "default_points")]
    pub points: usize,
    #[serde(default)]
    pub model: Model,
    #[serde(default)]
    pub roughness_model: RoughnessModel,
    /// SLD of the ambient medium in 1e-6 Å⁻² (0 for vacuum or air)
    #[serde(default)]
    pub ambient_sld: f64,
    #[serde(default = "default_scale")]
    pub scale: f64,
    #[serde(default)]
    pub background: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution: Option<Resolution>,
}

impl SimulationRequest {
    pub fn new(layers: Vec<Layer>) -> Self {
        SimulationRequest {
            layers,
            q_min: 0.0,
            q_max: default_q_max(),
            points: default_points(),
            model: Model::default(),
            roughness_model: RoughnessModel::default(),
            ambient_sld: 0.0,
            scale: default_scale(),
            background: 0.0,
            resolution: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationResponse {
    pub q: Vec<f64>,
    pub intensity: Vec<f64>,
}
