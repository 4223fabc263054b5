//! Error types for autovenv-core operations.

use std::path::PathBuf;

/// All errors that can occur in autovenv-core operations.
///
/// A marker that cannot be found is not an error (the locator returns
/// `None` for that); these variants cover the external activation and
/// deactivation primitives and the filesystem around them.
#[derive(Debug, thiserror::Error)]
pub enum AutovenvError {
    #[error("Activation failed: {path}: {details}")]
    ActivationFailed { path: PathBuf, details: String },

    #[error("Deactivation failed: {details}")]
    DeactivationFailed { details: String },

    #[error("I/O error: {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience type alias for Results using AutovenvError.
pub type Result<T> = std::result::Result<T, AutovenvError>;

// Conversion for string error compatibility
impl From<AutovenvError> for String {
    fn from(err: AutovenvError) -> String {
        err.to_string()
    }
}
