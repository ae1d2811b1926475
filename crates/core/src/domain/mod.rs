// Domain Layer - Handshake protocol and registry entries

pub mod contract;
pub mod error;
pub mod handshake;
pub mod termination;

// Re-exports
pub use contract::Contract;
pub use error::DomainError;
pub use handshake::{handshake_channel, HandshakeReceiver, HandshakeSender};
pub use termination::{CompletionSignal, TerminationRequest};
