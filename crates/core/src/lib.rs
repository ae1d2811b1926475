// Quiesce Core - Worker Registry & Termination Handshake
// NO subscriber or config setup here (daemon is the composition root)

pub mod application;
pub mod domain;
pub mod error;
pub mod port;

pub use application::{cancel_channel, CancelSender, CancelToken, Registry};
pub use domain::{handshake_channel, CompletionSignal, HandshakeReceiver, HandshakeSender};
pub use error::{AppError, Result};
pub use port::Worker;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
