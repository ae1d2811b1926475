// Central Error Type for the Application

use thiserror::Error;

/// Boxed construction failure reported by a worker factory
pub type ConstructionError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Domain error: {0}")]
    Domain(#[from] crate::domain::DomainError),

    #[error("Worker construction failed: {0}")]
    Construction(#[source] ConstructionError),

    #[error("Shutdown timed out with {pending} worker(s) still running")]
    Timeout { pending: usize },

    #[error("Shutdown cancelled with {pending} worker(s) still running")]
    Cancelled { pending: usize },

    #[error("Unreachable workers: {}", .0.join(", "))]
    Unreachable(Vec<String>),
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;
