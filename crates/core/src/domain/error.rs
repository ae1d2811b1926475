// Domain Error Types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Termination request name mismatch: expected {expected}, got {actual}")]
    NameMismatch { expected: String, actual: String },

    #[error("Handshake channel closed before termination of {0}")]
    HandshakeClosed(String),
}

pub type Result<T> = std::result::Result<T, DomainError>;
