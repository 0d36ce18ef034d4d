use std::io;
use thiserror::Error;

/// A patch key that could not be applied to a typed property record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatchError {
    #[error("Property '{key}' expects a {expected} value, got {found}")]
    TypeMismatch {
        key: String,
        expected: &'static str,
        found: &'static str,
    },
}

/// Failures of the durable blob medium or of the blob encoding.
#[derive(Error, Debug)]
pub enum PersistError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization/Deserialization error (JSON): {0}")]
    Json(#[from] serde_json::Error),
}
