//! Error types for document operations.
//!
//! Pointer handling never fails: invalid geometry is dropped and the last
//! valid shape is kept. These errors cover scene edits, JSON and config.

use thiserror::Error;

/// Result type for editor operations.
pub type EditorResult<T> = Result<T, EditorError>;

/// Errors that can occur in editor operations.
#[derive(Debug, Error)]
pub enum EditorError {
    /// Element not found in scene.
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// Invalid scene operation.
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// Scene or config serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration value out of range.
    #[error("Invalid configuration: {0}")]
    Config(String),
}
