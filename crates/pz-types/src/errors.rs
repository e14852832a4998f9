use thiserror::Error;

/// Main error type for the PenZoom system
#[derive(Error, Debug)]
pub enum PzError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Selection error: {0}")]
    Selection(String),

    #[error("Log record error: {0}")]
    Record(String),

    #[error("Evaluator error: {0}")]
    Evaluator(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl PzError {
    /// Wrap an evaluator failure without masking its source.
    pub fn evaluator<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        PzError::Evaluator(err.into())
    }
}

/// Boundary-validation failures, raised before any evaluation starts
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{parameter} must be a positive count, got 0")]
    ZeroCount { parameter: String },

    #[error("{parameter} must be finite, got {value}")]
    NonFinite { parameter: String, value: f64 },

    #[error("{parameter} must be at least 2 to define a grid step, got {got}")]
    ResolutionTooLow { parameter: String, got: usize },

    #[error("{parameter} range is empty: start {start} must lie strictly below end {end}")]
    EmptyAxisRange {
        parameter: String,
        start: f64,
        end: f64,
    },

    #[error("sample size bounds are inverted: sample_size_min {min} exceeds sample_size_max {max}")]
    InvertedSampleBounds { min: usize, max: usize },

    #[error("log record must carry exactly {expected} slots, got {got}")]
    MalformedRecord { expected: usize, got: usize },

    #[error("log record slot names must be unique, '{name}' appears more than once")]
    DuplicateSlot { name: String },

    #[error("sample table is missing required column '{column}'")]
    MissingColumn { column: String },

    #[error("column '{column}' has {got} rows, expected {expected}")]
    ColumnLengthMismatch {
        column: String,
        got: usize,
        expected: usize,
    },
}

/// Result type alias for PenZoom operations
pub type PzResult<T> = Result<T, PzError>;
