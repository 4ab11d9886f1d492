use crate::chemparser::validate_formula;

/// A named material with its formula, bulk density and, for the front-end
/// presets, a typical interface roughness.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialPreset {
    pub name: &'static str,
    pub formula: &'static str,
    /// g/cm³
    pub density: f64,
    /// Å
    pub roughness: Option<f64>,
}

const fn preset(name: &'static str, formula: &'static str, density: f64, roughness: f64) -> MaterialPreset {
    MaterialPreset {
        name,
        formula,
        density,
        roughness: Some(roughness),
    }
}

const fn bulk(name: &'static str, formula: &'static str, density: f64) -> MaterialPreset {
    MaterialPreset {
        name,
        formula,
        density,
        roughness: None,
    }
}

pub const MATERIALS: &[MaterialPreset] = &[
    // Layer-stack editor presets
    preset("silicon", "Si", 2.33, 3.0),
    preset("silica", "SiO2", 2.20, 4.0),
    preset("alumina", "Al2O3", 3.95, 3.5),
    preset("gold", "Au", 19.32, 5.0),
    preset("chromium", "Cr", 7.19, 4.5),
    preset("titanium", "Ti", 4.50, 3.8),
    preset("copper", "Cu", 8.96, 4.2),
    preset("nickel", "Ni", 8.90, 4.0),
    // Substrates
    bulk("sapphire", "Al2O3", 4.0),
    bulk("quartz", "SiO2", 2.65),
    bulk("germanium", "Ge", 5.323),
    bulk("gallium arsenide", "GaAs", 5.318),
    bulk("magnesium oxide", "MgO", 3.58),
    bulk("strontium titanate", "SrTiO3", 5.12),
    // Coatings and thin films
    bulk("silicon nitride", "Si3N4", 3.17),
    bulk("titanium dioxide", "TiO2", 4.23),
    bulk("hafnium oxide", "HfO2", 9.68),
    bulk("zinc oxide", "ZnO", 5.61),
    bulk("tantalum", "Ta", 16.69),
    bulk("tungsten", "W", 19.25),
    bulk("molybdenum", "Mo", 10.28),
    bulk("platinum", "Pt", 21.45),
    bulk("palladium", "Pd", 12.02),
    bulk("silver", "Ag", 10.49),
    bulk("iron", "Fe", 7.874),
    bulk("cobalt", "Co", 8.90),
    bulk("aluminum", "Al", 2.70),
    bulk("carbon", "C", 2.2),
    bulk("diamond carbon", "C", 3.52),
    // Polymers and liquids
    bulk("pmma", "C5H8O2", 1.18),
    bulk("polystyrene", "C8H8", 1.05),
    bulk("kapton", "C22H10N2O5", 1.42),
    bulk("water", "H2O", 1.0),
];

/// Find a material by name (case-insensitive) or by formula.
///
/// Formulas match case-insensitively only when `name` is not a valid
/// formula itself, so "CO" stays carbon monoxide rather than cobalt.
pub fn find_material(name: &str) -> Option<&'static MaterialPreset> {
    let name = name.trim();
    let lower = name.to_lowercase();
    MATERIALS
        .iter()
        .find(|m| m.name == lower)
        .or_else(|| MATERIALS.iter().find(|m| m.formula == name))
        .or_else(|| {
            if validate_formula(name) {
                return None;
            }
            MATERIALS
                .iter()
                .find(|m| m.formula.eq_ignore_ascii_case(name))
        })
}

/// Presets offered by the layer-stack editor.
pub fn editor_presets() -> impl Iterator<Item = &'static MaterialPreset> {
    MATERIALS.iter().filter(|m| m.roughness.is_some())
}
