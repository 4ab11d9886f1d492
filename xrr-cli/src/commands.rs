use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use xrr::import::{ImportOptions, MeasuredData, import};
use xrr::materials::{critical_q, electron_sld};
use xrr::materials_db::MATERIALS;
use xrr::metrics::compare;
use xrr::profile::sld_profile;
use xrr::{SimulationRequest, Stack, simulate, simulate_at};

pub fn read_request(path: &Path) -> Result<SimulationRequest> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read request {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("invalid simulation request {}", path.display()))
}

fn read_data(path: &Path, options: &ImportOptions) -> Result<MeasuredData> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read data file {}", path.display()))?;
    let data = import(&content, options)
        .with_context(|| format!("failed to import {}", path.display()))?;
    info!(
        file = %path.display(),
        unit = %data.unit,
        points = data.q.len(),
        "imported measured curve"
    );
    Ok(data)
}

/// Pretty JSON to `output`, or to stdout.
fn write_json<T: Serialize>(value: &T, output: Option<&PathBuf>) -> Result<()> {
    let text = serde_json::to_string_pretty(value)?;
    match output {
        Some(path) => {
            fs::write(path, text + "\n")
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(file = %path.display(), "wrote output");
        }
        None => println!("{text}"),
    }
    Ok(())
}

pub fn run_simulate(request: &Path, output: Option<&PathBuf>) -> Result<()> {
    let request = read_request(request)?;
    let response = simulate(&request).context("simulation failed")?;
    info!(
        model = ?request.model,
        layers = request.layers.len(),
        points = response.q.len(),
        "simulated reflectivity"
    );
    write_json(&response, output)
}

pub fn run_profile(request: &Path, points: usize, output: Option<&PathBuf>) -> Result<()> {
    let request = read_request(request)?;
    let stack = Stack::from_request(&request.layers, request.ambient_sld)
        .context("cannot resolve layer stack")?;
    let profile = sld_profile(&stack, points)?;
    info!(
        layers = stack.layers().len(),
        thickness = stack.total_thickness(),
        "computed SLD profile"
    );
    write_json(&profile, output)
}

pub fn run_import(file: &Path, options: &ImportOptions, output: Option<&PathBuf>) -> Result<()> {
    let data = read_data(file, options)?;
    let summary = data.summary();
    write_json(&json!({ "data": data, "summary": summary }), output)
}

pub fn run_compare(
    request: &Path,
    file: &Path,
    options: &ImportOptions,
    output: Option<&PathBuf>,
) -> Result<()> {
    let request = read_request(request)?;
    let data = read_data(file, options)?;
    let calculated = simulate_at(&request, &data.q).context("simulation failed")?;
    let metrics = compare(&data.intensity, &calculated)?;
    info!(chi2 = metrics.chi2, fom = metrics.fom, "compared model with data");
    write_json(
        &json!({
            "metrics": metrics,
            "summary": data.summary(),
            "q": data.q,
            "measured": data.intensity,
            "calculated": calculated,
        }),
        output,
    )
}

#[derive(Debug, Serialize)]
struct MaterialRow {
    name: &'static str,
    formula: &'static str,
    density: f64,
    roughness: Option<f64>,
    /// 1e-6 Å⁻²
    sld: f64,
    /// Å⁻¹
    critical_q: f64,
}

fn material_rows() -> Result<Vec<MaterialRow>> {
    MATERIALS
        .iter()
        .map(|m| {
            let sld = electron_sld(m.formula, m.density)?;
            Ok(MaterialRow {
                name: m.name,
                formula: m.formula,
                density: m.density,
                roughness: m.roughness,
                sld: sld * 1e6,
                critical_q: critical_q(sld),
            })
        })
        .collect()
}

pub fn run_materials(as_json: bool) -> Result<()> {
    let rows = material_rows()?;
    if as_json {
        return write_json(&rows, None);
    }
    println!(
        "{:<20} {:<12} {:>8} {:>6} {:>10} {:>8}",
        "name", "formula", "g/cm3", "σ Å", "SLD 1e-6", "qc 1/Å"
    );
    for row in rows {
        let roughness = row
            .roughness
            .map_or_else(|| "-".to_string(), |s| format!("{s:.1}"));
        println!(
            "{:<20} {:<12} {:>8.3} {:>6} {:>10.2} {:>8.4}",
            row.name, row.formula, row.density, roughness, row.sld, row.critical_q
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_material_has_a_table_row() {
        let rows = material_rows().unwrap();
        assert_eq!(rows.len(), MATERIALS.len());
        let si = rows.iter().find(|r| r.name == "silicon").unwrap();
        assert!((si.sld - 19.7).abs() < 0.1);
        assert!((si.critical_q - 0.0315).abs() < 5e-4);
    }
}
