pub mod chemparser;
pub mod constants;
pub mod elements;
pub mod error;
pub mod import;
pub mod materials;
pub mod materials_db;
pub mod metrics;
pub mod parratt;
pub mod profile;
pub mod qgrid;
pub mod resolution;
pub mod roughness;
pub mod simulate;
pub mod stack;
pub mod synthetic;

pub use error::{Result, XrrError};
pub use import::{DataSummary, ImportOptions, MeasuredData, XAxisUnit};
pub use materials_db::MaterialPreset;
pub use metrics::FitMetrics;
pub use profile::SldProfile;
pub use qgrid::QGrid;
pub use simulate::{simulate, simulate_at};
pub use stack::{Stack, StackLayer};
pub use xrr_data;
pub use xrr_data::{
    Layer, Model, Resolution, RoughnessModel, SimulationRequest, SimulationResponse,
};
