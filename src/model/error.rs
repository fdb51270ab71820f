//! Error types for the predictive model.

use thiserror::Error;

/// Errors that can occur while building or running the model.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    /// A configured parameter is NaN or infinite.
    #[error("Invalid model parameter {name}: {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    /// Inference produced NaN or infinity.
    #[error("Model produced a non-finite output for input {input}")]
    NonFiniteOutput { input: f64 },

    /// The background task ended without reporting a result.
    #[error("Model task ended before reporting a result")]
    Cancelled,
}
