//! # Mesh Errors
//!
//! Error types for surface-of-revolution generation and export.
//!
//! Degenerate geometry is not an error here: it is reported as a warning on
//! an otherwise valid mesh (see [`crate::diagnostics`]).

use thiserror::Error;

/// Errors that can occur during mesh generation and export.
#[derive(Debug, Error)]
pub enum MeshError {
    /// A build parameter is out of range (side count, profile length,
    /// non-finite coordinate, canvas size).
    #[error("Invalid parameter: {message}")]
    InvalidParameter { message: String },

    /// Too many vertices
    #[error("Too many vertices: {count} (max: {max})")]
    TooManyVertices { count: usize, max: usize },

    /// Writing an export failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl MeshError {
    /// Creates an invalid parameter error.
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            message: message.into(),
        }
    }

    /// Returns true for errors caused by caller input rather than the
    /// environment.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Self::InvalidParameter { .. } | Self::TooManyVertices { .. }
        )
    }
}

/// Result type alias for mesh operations.
pub type MeshResult<T> = Result<T, MeshError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MeshError::invalid_parameter("sides must be at least 3, got 2");
        assert!(err.to_string().contains("Invalid parameter"));
        assert!(err.to_string().contains("got 2"));

        let err = MeshError::TooManyVertices { count: 11, max: 10 };
        assert_eq!(err.to_string(), "Too many vertices: 11 (max: 10)");
    }

    #[test]
    fn test_invalid_input_classification() {
        assert!(MeshError::invalid_parameter("x").is_invalid_input());
        let io = MeshError::from(std::io::Error::new(std::io::ErrorKind::Other, "disk"));
        assert!(!io.is_invalid_input());
    }

    /// Errors cross thread boundaries in the CLI.
    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MeshError>();
    }
}
