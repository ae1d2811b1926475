// Application Layer - Registration and coordinated shutdown

pub mod cancel;
pub mod registry;

// Re-exports
pub use cancel::{cancel_channel, CancelSender, CancelToken};
pub use registry::Registry;
