use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("value at index {index} must be >= 0, got {value}")]
    NegativeValue { index: usize, value: f64 },

    #[error("{what}: expected {expected} entries, got {actual}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("value at index {index} must be within [{min}, {max}], got {value}")]
    ValueOutOfRange {
        index: usize,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("render backend failure: {0}")]
    Backend(String),
}
