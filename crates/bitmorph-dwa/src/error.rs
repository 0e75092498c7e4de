//! Error types for bitmorph-dwa

use crate::window::Direction;
use thiserror::Error;

/// Errors that can occur while running DWA morphology
#[derive(Debug, Error)]
pub enum DwaError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] bitmorph_core::Error),

    /// Kernel index outside the generated table
    #[error("invalid kernel index {index}: table holds {count} kernels")]
    InvalidKernelIndex { index: u32, count: u32 },

    /// Run length outside the supported range
    #[error("invalid run length {length}: expected 1..={max}")]
    InvalidRunLength { length: u32, max: u32 },

    /// A window reaches further than the source view's margin
    #[error("{direction:?} window reaches {reach} pixels but the source margin is {margin}")]
    MarginViolation {
        direction: Direction,
        reach: u32,
        margin: u32,
    },

    /// Source and destination regions differ in size
    #[error("dimension mismatch: source {}x{}, destination {}x{}", .src.0, .src.1, .dst.0, .dst.1)]
    DimensionMismatch { src: (u32, u32), dst: (u32, u32) },

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for DWA operations
pub type DwaResult<T> = Result<T, DwaError>;
