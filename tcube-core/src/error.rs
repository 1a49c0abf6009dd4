//! Error types for the rendering core.

use thiserror::Error;

/// Errors raised while building a scene or configuration.
///
/// Everything here is a precondition violation caught before the render
/// loop starts. Degenerate geometry met while rendering is not an error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A 3x3 matrix needs exactly nine coefficients.
    #[error("not a 3x3 matrix: expected 9 coefficients, found {found}")]
    MatrixCoefficients { found: usize },

    /// Output image dimensions must be positive.
    #[error("invalid image dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// Camera position has a non-finite component.
    #[error("camera position must be finite")]
    InvalidCamera,

    /// Sphere parameters that would produce degenerate faces.
    #[error("invalid sphere: {0}")]
    InvalidSphere(String),

    /// A textual value could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, Error>;
