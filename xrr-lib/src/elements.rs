use std::collections::HashMap;
use std::sync::OnceLock;

use crate::error::{Result, XrrError};

/// Atomic number, symbol, name and standard molar mass of an element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Element {
    pub atomic_number: u16,
    pub symbol: &'static str,
    pub name: &'static str,
    /// g/mol
    pub molar_mass: f64,
}

const fn el(atomic_number: u16, symbol: &'static str, name: &'static str, molar_mass: f64) -> Element {
    Element {
        atomic_number,
        symbol,
        name,
        molar_mass,
    }
}

/// Elements H through Lr. Unstable elements carry the mass number of their
/// longest-lived isotope.
pub const ELEMENTS: &[Element] = &[
    el(1, "H", "hydrogen", 1.008),
    el(2, "He", "helium", 4.002602),
    el(3, "Li", "lithium", 6.94),
    el(4, "Be", "beryllium", 9.0121831),
    el(5, "B", "boron", 10.81),
    el(6, "C", "carbon", 12.011),
    el(7, "N", "nitrogen", 14.007),
    el(8, "O", "oxygen", 15.999),
    el(9, "F", "fluorine", 18.998403163),
    el(10, "Ne", "neon", 20.1797),
    el(11, "Na", "sodium", 22.98976928),
    el(12, "Mg", "magnesium", 24.305),
    el(13, "Al", "aluminum", 26.9815385),
    el(14, "Si", "silicon", 28.085),
    el(15, "P", "phosphorus", 30.973761998),
    el(16, "S", "sulfur", 32.06),
    el(17, "Cl", "chlorine", 35.45),
    el(18, "Ar", "argon", 39.948),
    el(19, "K", "potassium", 39.0983),
    el(20, "Ca", "calcium", 40.078),
    el(21, "Sc", "scandium", 44.955908),
    el(22, "Ti", "titanium", 47.867),
    el(23, "V", "vanadium", 50.9415),
    el(24, "Cr", "chromium", 51.9961),
    el(25, "Mn", "manganese", 54.938044),
    el(26, "Fe", "iron", 55.845),
    el(27, "Co", "cobalt", 58.933194),
    el(28, "Ni", "nickel", 58.6934),
    el(29, "Cu", "copper", 63.546),
    el(30, "Zn", "zinc", 65.38),
    el(31, "Ga", "gallium", 69.723),
    el(32, "Ge", "germanium", 72.630),
    el(33, "As", "arsenic", 74.921595),
    el(34, "Se", "selenium", 78.971),
    el(35, "Br", "bromine", 79.904),
    el(36, "Kr", "krypton", 83.798),
    el(37, "Rb", "rubidium", 85.4678),
    el(38, "Sr", "strontium", 87.62),
    el(39, "Y", "yttrium", 88.90584),
    el(40, "Zr", "zirconium", 91.224),
    el(41, "Nb", "niobium", 92.90637),
    el(42, "Mo", "molybdenum", 95.95),
    el(43, "Tc", "technetium", 98.0),
    el(44, "Ru", "ruthenium", 101.07),
    el(45, "Rh", "rhodium", 102.90550),
    el(46, "Pd", "palladium", 106.42),
    el(47, "Ag", "silver", 107.8682),
    el(48, "Cd", "cadmium", 112.414),
    el(49, "In", "indium", 114.818),
    el(50, "Sn", "tin", 118.710),
    el(51, "Sb", "antimony", 121.760),
    el(52, "Te", "tellurium", 127.60),
    el(53, "I", "iodine", 126.90447),
    el(54, "Xe", "xenon", 131.293),
    el(55, "Cs", "cesium", 132.90545196),
    el(56, "Ba", "barium", 137.327),
    el(57, "La", "lanthanum", 138.90547),
    el(58, "Ce", "cerium", 140.116),
    el(59, "Pr", "praseodymium", 140.90766),
    el(60, "Nd", "neodymium", 144.242),
    el(61, "Pm", "promethium", 145.0),
    el(62, "Sm", "samarium", 150.36),
    el(63, "Eu", "europium", 151.964),
    el(64, "Gd", "gadolinium", 157.25),
    el(65, "Tb", "terbium", 158.92535),
    el(66, "Dy", "dysprosium", 162.500),
    el(67, "Ho", "holmium", 164.93033),
    el(68, "Er", "erbium", 167.259),
    el(69, "Tm", "thulium", 168.93422),
    el(70, "Yb", "ytterbium", 173.045),
    el(71, "Lu", "lutetium", 174.9668),
    el(72, "Hf", "hafnium", 178.49),
    el(73, "Ta", "tantalum", 180.94788),
    el(74, "W", "tungsten", 183.84),
    el(75, "Re", "rhenium", 186.207),
    el(76, "Os", "osmium", 190.23),
    el(77, "Ir", "iridium", 192.217),
    el(78, "Pt", "platinum", 195.084),
    el(79, "Au", "gold", 196.966569),
    el(80, "Hg", "mercury", 200.592),
    el(81, "Tl", "thallium", 204.38),
    el(82, "Pb", "lead", 207.2),
    el(83, "Bi", "bismuth", 208.98040),
    el(84, "Po", "polonium", 209.0),
    el(85, "At", "astatine", 210.0),
    el(86, "Rn", "radon", 222.0),
    el(87, "Fr", "francium", 223.0),
    el(88, "Ra", "radium", 226.0),
    el(89, "Ac", "actinium", 227.0),
    el(90, "Th", "thorium", 232.0377),
    el(91, "Pa", "protactinium", 231.03588),
    el(92, "U", "uranium", 238.02891),
    el(93, "Np", "neptunium", 237.0),
    el(94, "Pu", "plutonium", 244.0),
    el(95, "Am", "americium", 243.0),
    el(96, "Cm", "curium", 247.0),
    el(97, "Bk", "berkelium", 247.0),
    el(98, "Cf", "californium", 251.0),
    el(99, "Es", "einsteinium", 252.0),
    el(100, "Fm", "fermium", 257.0),
    el(101, "Md", "mendelevium", 258.0),
    el(102, "No", "nobelium", 259.0),
    el(103, "Lr", "lawrencium", 262.0),
];

struct Index {
    symbol_to_z: HashMap<String, u16>,
    name_to_z: HashMap<String, u16>,
}

static INDEX: OnceLock<Index> = OnceLock::new();

fn index() -> &'static Index {
    INDEX.get_or_init(|| {
        let mut symbol_to_z = HashMap::new();
        let mut name_to_z = HashMap::new();
        for e in ELEMENTS {
            symbol_to_z.insert(e.symbol.to_string(), e.atomic_number);
            symbol_to_z.insert(e.symbol.to_lowercase(), e.atomic_number);
            name_to_z.insert(e.name.to_string(), e.atomic_number);
        }
        Index {
            symbol_to_z,
            name_to_z,
        }
    })
}

/// Returns true if `symbol` is an exact, correctly capitalized element symbol.
pub fn is_symbol(symbol: &str) -> bool {
    ELEMENTS.iter().any(|e| e.symbol == symbol)
}

/// Resolve an element identifier (symbol, name, or atomic number) to its record.
pub fn element(id: &str) -> Result<&'static Element> {
    let z = if let Ok(z) = id.parse::<u16>() {
        Some(z)
    } else if let Some(&z) = index().symbol_to_z.get(id) {
        Some(z)
    } else {
        index().name_to_z.get(&id.to_lowercase()).copied()
    };

    z.and_then(|z| ELEMENTS.get(usize::from(z).checked_sub(1)?))
        .ok_or_else(|| XrrError::UnknownElement(id.to_string()))
}

pub fn atomic_number(id: &str) -> Result<u16> {
    Ok(element(id)?.atomic_number)
}

pub fn molar_mass(id: &str) -> Result<f64> {
    Ok(element(id)?.molar_mass)
}
