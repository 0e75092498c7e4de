//! Error types for the test framework

use thiserror::Error;

/// Errors that can occur while building test inputs
#[derive(Debug, Error)]
pub enum TestError {
    /// Bitmap construction failed
    #[error("bitmap error: {0}")]
    Bitmap(#[from] bitmorph_core::Error),

    /// Pattern parameters out of range
    #[error("invalid pattern parameter: {0}")]
    InvalidPattern(String),
}

/// Result type for test operations
pub type TestResult<T> = Result<T, TestError>;
