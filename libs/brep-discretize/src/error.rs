//! # Engine Errors
//!
//! Error taxonomy for the discretization engine. Every component fails fast
//! on malformed input; the one permissive exception is mesh extraction,
//! which maps a null shape to empty buffers instead of surfacing
//! [`DiscretizeError::NullShape`].

use brep_kernel::KernelError;
use glam::DVec3;
use thiserror::Error;

/// Errors that can occur during discretization operations.
#[derive(Debug, Error)]
pub enum DiscretizeError {
    /// Malformed input: non-positive counts, empty patterns, mismatched
    /// list lengths
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// Zero-length curve, edge, or wire
    #[error("Degenerate geometry: {message}")]
    DegenerateGeometry { message: String },

    /// A split point could not be matched to any edge within tolerance
    #[error("Point {point} is not on the wire (closest distance {distance})")]
    PointNotOnWire { point: DVec3, distance: f64 },

    /// The arc-length integrator failed to resolve a length
    #[error("Numeric convergence failure: {source}")]
    NumericConvergence {
        #[source]
        source: KernelError,
    },

    /// Null input shape; mesh extraction handles this permissively instead
    /// of returning it
    #[error("Shape is null")]
    NullShape,
}

impl DiscretizeError {
    /// Creates an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Creates a degenerate geometry error.
    pub fn degenerate(message: impl Into<String>) -> Self {
        Self::DegenerateGeometry {
            message: message.into(),
        }
    }
}

impl From<KernelError> for DiscretizeError {
    fn from(err: KernelError) -> Self {
        match err {
            KernelError::NumericConvergence { .. } => Self::NumericConvergence { source: err },
            KernelError::DegenerateGeometry { message } => Self::DegenerateGeometry { message },
            KernelError::InvalidGeometry { message } => Self::InvalidArgument { message },
        }
    }
}
