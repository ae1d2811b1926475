// Registry constants (ADR: No magic values)
use std::time::Duration;

/// Default bound for `close_all_within` callers that have no better value (5s)
pub const DEFAULT_CLOSE_TIMEOUT: Duration = Duration::from_secs(5);

/// Prefix for names synthesized by the sequential provider in tests and demos
pub const ANONYMOUS_WORKER_PREFIX: &str = "worker";
