// Port Layer - Interfaces for external collaborators

pub mod id_provider; // For deterministic testing
pub mod worker;

// Re-exports
pub use id_provider::{IdProvider, SequentialIdProvider, UuidProvider};
pub use worker::Worker;
