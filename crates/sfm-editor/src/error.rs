//! Error types for the modal editors.

use sfm_domain::ModalType;
use thiserror::Error;

/// Editor operation errors
#[derive(Debug, Error)]
pub enum EditorError {
    /// The backend call failed; the store was left as it was
    #[error("Backend error: {0}")]
    Backend(String),

    /// User input was rejected before anything was sent
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The event needs an open modal
    #[error("No modal is open")]
    NoSession,

    /// The event belongs to a different editor than the one open
    #[error("Expected the {expected} modal, but the {open} modal is open")]
    WrongModal {
        /// Editor the event is meant for
        expected: ModalType,
        /// Editor currently open
        open: ModalType,
    },
}

impl EditorError {
    pub(crate) fn backend(e: impl std::fmt::Display) -> Self {
        EditorError::Backend(e.to_string())
    }
}

/// Result type for editor operations
pub type Result<T> = std::result::Result<T, EditorError>;
