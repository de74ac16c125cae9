//! Error types for the RK4 drivers
//!
//! The first two variants are the validation failures every driver reports
//! before touching the native library. The rest cover binding, calling and
//! presenting.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DriverError {
    #[error("Expecting a path to dynamically link library as a command line argument")]
    MissingArgument,

    #[error("Could not open the rk4 library: {}", .path.display())]
    LibraryNotFound { path: PathBuf },

    #[error("Failed to load library {}: {source}", .path.display())]
    LibraryLoad {
        path: PathBuf,
        #[source]
        source: libloading::Error,
    },

    #[error("Symbol '{symbol}' not found in {library}: {source}")]
    SymbolNotFound {
        symbol: String,
        library: String,
        #[source]
        source: libloading::Error,
    },

    #[error("Scenario '{scenario}' has no native call signature for its buffer layout")]
    UnsupportedLayout { scenario: String },

    #[error("Buffer size mismatch: expected {expected} samples, got {actual}")]
    BufferMismatch { expected: usize, actual: usize },

    #[error("Chart rendering failed: {0}")]
    Render(String),

    #[error("Chart window failed: {0}")]
    Viewer(String),
}

impl DriverError {
    /// True for the two argument/file validation failures.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            DriverError::MissingArgument | DriverError::LibraryNotFound { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_argument_message() {
        let msg = DriverError::MissingArgument.to_string();
        assert_eq!(
            msg,
            "Expecting a path to dynamically link library as a command line argument"
        );
    }

    #[test]
    fn test_library_not_found_names_path() {
        let err = DriverError::LibraryNotFound {
            path: PathBuf::from("/nowhere/librk4.so"),
        };
        assert!(err.to_string().contains("/nowhere/librk4.so"));
        assert!(err.is_validation());
    }

    #[test]
    fn test_buffer_mismatch_is_not_validation() {
        let err = DriverError::BufferMismatch { expected: 10, actual: 9 };
        assert!(!err.is_validation());
        assert!(err.to_string().contains("expected 10"));
    }
}
