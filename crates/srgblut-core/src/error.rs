//! Error types for srgblut

use thiserror::Error;

/// Result type for srgblut operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while generating a table
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Generator options cannot describe a valid fit
    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    /// A forced point does not sit on a break point
    #[error("Forced point x={x} is not a break point")]
    ForcedPointOffBreak { x: f64 },

    /// A sample lies outside the span of the break points
    #[error("Sample x={x} lies outside the break point range")]
    SampleOutOfRange { x: f64 },

    /// The normal equations have no unique solution
    #[error("Singular system: zero pivot at row {row}")]
    Singular { row: usize },

    /// A fitted value cannot be stored in the 16-bit table
    #[error("Fit value {value} at index {index} is outside the 16-bit range")]
    OutOfRange { index: usize, value: f64 },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
