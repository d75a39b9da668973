//! # Kernel Errors
//!
//! Error types for kernel geometry evaluation.

use thiserror::Error;

/// Errors that can occur during kernel evaluation.
#[derive(Debug, Error)]
pub enum KernelError {
    /// Geometry with no usable extent (zero-length curve, zero-area face)
    #[error("Degenerate geometry: {message}")]
    DegenerateGeometry { message: String },

    /// Structurally invalid geometry (disconnected wire, non-positive size)
    #[error("Invalid geometry: {message}")]
    InvalidGeometry { message: String },

    /// Arc-length inversion failed to converge
    #[error(
        "Arc-length inversion did not converge: target {target}, residual {residual} after {iterations} iterations"
    )]
    NumericConvergence {
        target: f64,
        residual: f64,
        iterations: u32,
    },
}

impl KernelError {
    /// Creates a degenerate geometry error.
    pub fn degenerate(message: impl Into<String>) -> Self {
        Self::DegenerateGeometry {
            message: message.into(),
        }
    }

    /// Creates an invalid geometry error.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidGeometry {
            message: message.into(),
        }
    }
}
