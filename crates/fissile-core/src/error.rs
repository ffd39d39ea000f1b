//! Error types shared by every fissile crate
//!
//! Statistics, model construction, engine invocation and rendering all report
//! failures through the single [`Error`] enum defined here.

use thiserror::Error;

/// Core error type for the fissile workspace
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid parameter provided to a function
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Invalid input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The sample handed to a statistic had no elements
    #[error("Empty input: {operation} requires at least one sample")]
    EmptyInput { operation: String },

    /// Insufficient data for the requested operation
    #[error("Insufficient data: expected at least {expected} samples, got {actual}")]
    InsufficientData { expected: usize, actual: usize },

    /// Numerical computation error
    #[error("Computation error: {0}")]
    Computation(String),

    /// Inconsistent model definition (materials, geometry or settings)
    #[error("Model error: {0}")]
    Model(String),

    /// The external transport engine failed to launch or exited unsuccessfully
    #[error("Engine error: {0}")]
    Engine(String),

    /// Diagram or chart rendering failed
    #[error("Render error: {0}")]
    Render(String),

    /// IO error (for file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Other errors
    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

// Helper functions for common error patterns

impl Error {
    /// Create an error for empty input
    pub fn empty_input(operation: &str) -> Self {
        Self::EmptyInput {
            operation: operation.to_string(),
        }
    }

    /// Create an error for a probability outside [0, 1]
    pub fn invalid_quantile(p: f64) -> Self {
        Self::InvalidParameter(format!("Quantile {p} must be in [0, 1]"))
    }

    /// Create an error for NaN/Inf values
    pub fn non_finite(context: &str) -> Self {
        Self::Computation(format!("{context} contains NaN or infinite values"))
    }

    /// Create an error for a model element that refers to an undefined id
    pub fn unknown_reference(kind: &str, id: u32, referrer: &str) -> Self {
        Self::Model(format!("{referrer} refers to undefined {kind} {id}"))
    }

    /// Create an error for two model elements sharing one id
    pub fn duplicate_id(kind: &str, id: u32) -> Self {
        Self::Model(format!("duplicate {kind} id {id}"))
    }

    /// Create an error for a render backend failure
    pub fn render<E: std::fmt::Display>(err: E) -> Self {
        Self::Render(err.to_string())
    }
}
