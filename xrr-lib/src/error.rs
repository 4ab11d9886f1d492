use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum XrrError {
    #[error("layer stack is empty")]
    EmptyStack,
    #[error("invalid layer {index}: {reason}")]
    InvalidLayer { index: usize, reason: String },
    #[error("no optical constant for layer {index} ('{name}'): give sld, formula, or a known material name")]
    MissingOpticalConstant { index: usize, name: String },
    #[error("invalid q grid: {0}")]
    InvalidQGrid(String),
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("unknown element: {0}")]
    UnknownElement(String),
    #[error("invalid chemical formula: {0}")]
    InvalidFormula(String),
    #[error("invalid data: {0}")]
    InvalidData(String),
    #[error("length mismatch: expected {expected}, found {found}")]
    LengthMismatch { expected: usize, found: usize },
}

pub type Result<T> = std::result::Result<T, XrrError>;
