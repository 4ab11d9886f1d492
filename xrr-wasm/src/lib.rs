//! WASM bindings for the reflectivity simulator.
//!
//! Build with:
//! ```sh
//! wasm-pack build -p xrr-wasm
//! ```
//!
//! Requests and results cross the boundary as JSON strings with the same
//! shape as the HTTP API.

use wasm_bindgen::prelude::*;

use xrr::constants::SLD_UNIT;
use xrr::import::{ImportOptions, XAxisUnit};
use xrr::materials_db::{editor_presets, find_material};
use xrr::{SimulationRequest, Stack, XrrError};

fn to_js(e: XrrError) -> JsError {
    JsError::new(&e.to_string())
}

fn parse_request(json: &str) -> Result<SimulationRequest, JsError> {
    serde_json::from_str(json).map_err(|e| JsError::new(&format!("invalid request: {e}")))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsError> {
    serde_json::to_string(value).map_err(|e| JsError::new(&e.to_string()))
}

fn parse_unit(unit: &str) -> Result<XAxisUnit, JsError> {
    unit.parse().map_err(to_js)
}

// ── Simulation ──

/// Runs a simulation request and returns `{"q": [...], "intensity": [...]}`.
#[wasm_bindgen]
pub fn simulate(request_json: &str) -> Result<String, JsError> {
    let request = parse_request(request_json)?;
    let response = xrr::simulate(&request).map_err(to_js)?;
    to_json(&response)
}

/// Evaluates a request at the given Q values (Å⁻¹) instead of its own grid.
#[wasm_bindgen]
pub fn simulate_at(request_json: &str, q: &[f64]) -> Result<Vec<f64>, JsError> {
    let request = parse_request(request_json)?;
    xrr::simulate_at(&request, q).map_err(to_js)
}

/// SLD depth profile of the request's stack, `{"z", "sld", "layers"}`.
#[wasm_bindgen]
pub fn sld_profile(request_json: &str, points: usize) -> Result<String, JsError> {
    let request = parse_request(request_json)?;
    let stack = Stack::from_request(&request.layers, request.ambient_sld).map_err(to_js)?;
    let profile = xrr::profile::sld_profile(&stack, points).map_err(to_js)?;
    to_json(&profile)
}

// ── Measured data ──

/// Converts x values to Q (Å⁻¹).
///
/// `unit` is one of: "2theta", "theta", "q_nm", "q_a".
#[wasm_bindgen]
pub fn q_from_x(values: &[f64], unit: &str, wavelength: f64) -> Result<Vec<f64>, JsError> {
    let unit = parse_unit(unit)?;
    Ok(values.iter().map(|&x| unit.to_q(x, wavelength)).collect())
}

/// Parses a column file. An empty `unit` guesses it from the data range.
#[wasm_bindgen]
pub fn import_data(text: &str, unit: &str, wavelength: f64) -> Result<String, JsError> {
    let options = ImportOptions {
        unit: if unit.is_empty() { None } else { Some(parse_unit(unit)?) },
        wavelength,
        ..ImportOptions::default()
    };
    let data = xrr::import::import(text, &options).map_err(to_js)?;
    to_json(&data)
}

/// Returns [chi2, fom, mae] for two curves on the same Q points.
#[wasm_bindgen]
pub fn compare(measured: &[f64], calculated: &[f64]) -> Result<Vec<f64>, JsError> {
    let m = xrr::metrics::compare(measured, calculated).map_err(to_js)?;
    Ok(vec![m.chi2, m.fom, m.mae])
}

// ── Materials ──

/// Electron SLD in 1e-6 Å⁻² for a formula at `density` g/cm³.
#[wasm_bindgen]
pub fn electron_sld(formula: &str, density: f64) -> Result<f64, JsError> {
    xrr::materials::electron_sld(formula, density)
        .map(|sld| sld / SLD_UNIT)
        .map_err(to_js)
}

/// Critical Q (Å⁻¹) for an SLD contrast in 1e-6 Å⁻².
#[wasm_bindgen]
pub fn critical_q(sld: f64) -> f64 {
    xrr::materials::critical_q(sld * SLD_UNIT)
}

/// Names of the layer-editor presets.
#[wasm_bindgen]
pub fn preset_names() -> js_sys::Array {
    editor_presets().map(|m| JsValue::from_str(m.name)).collect()
}

/// Returns [density, roughness] of a preset; roughness is NaN for bulk
/// materials.
#[wasm_bindgen]
pub fn preset(name: &str) -> Result<Vec<f64>, JsError> {
    let m = find_material(name).ok_or_else(|| JsError::new(&format!("unknown material: {name}")))?;
    Ok(vec![m.density, m.roughness.unwrap_or(f64::NAN)])
}

/// Chemical formula of a preset.
#[wasm_bindgen]
pub fn preset_formula(name: &str) -> Result<String, JsError> {
    find_material(name)
        .map(|m| m.formula.to_string())
        .ok_or_else(|| JsError::new(&format!("unknown material: {name}")))
}
