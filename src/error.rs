//! Error types for script parsing and storyboard persistence.

use thiserror::Error;

/// Result type alias for parse and import operations.
pub type ScriptResult<T> = Result<T, ScriptError>;

/// Result type alias for store backends.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors surfaced to the user by a parse or import.
///
/// Every variant is terminal for the current operation; nothing is retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScriptError {
    /// Input was absent or the empty string.
    #[error("Invalid input: text must be a non-empty string")]
    InvalidInput,

    /// Input was well-formed but contained no non-blank scene blocks.
    #[error("No valid scene blocks found. Ensure blocks are separated by \"---\" on its own line.")]
    NoScenesFound,

    /// The parse succeeded but writing the collection back failed.
    #[error("Failed to save the storyboard: {0}")]
    Persistence(String),
}

impl ScriptError {
    /// Creates a Persistence error.
    pub fn persistence(msg: impl Into<String>) -> Self {
        Self::Persistence(msg.into())
    }
}

impl From<StoreError> for ScriptError {
    fn from(err: StoreError) -> Self {
        Self::Persistence(err.to_string())
    }
}

/// Errors raised by a storage backend.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Filesystem error while reading or writing the storage slot.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding/decoding error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Automerge error during document operations.
    #[error("Automerge error: {0}")]
    Automerge(#[from] automerge::AutomergeError),

    /// Autosurgeon hydration error.
    #[error("Hydration error: {0}")]
    Hydrate(#[from] autosurgeon::HydrateError),

    /// Autosurgeon reconcile error.
    #[error("Reconcile error: {0}")]
    Reconcile(#[from] autosurgeon::ReconcileError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_user_facing() {
        assert_eq!(
            ScriptError::InvalidInput.to_string(),
            "Invalid input: text must be a non-empty string"
        );
        assert!(ScriptError::NoScenesFound.to_string().contains("\"---\""));
        assert_eq!(
            ScriptError::persistence("disk full").to_string(),
            "Failed to save the storyboard: disk full"
        );
    }

    #[test]
    fn test_store_error_becomes_persistence() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err: ScriptError = StoreError::from(io).into();
        assert!(matches!(err, ScriptError::Persistence(ref m) if m.contains("read-only")));
    }
}
