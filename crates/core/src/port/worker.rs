// Worker Port
// Contract every independently running worker implements to be registered

use crate::domain::HandshakeSender;

/// Worker trait
///
/// `start` spawns the worker's independent execution and hands back the
/// sending half of a fresh handshake channel. The spawned task must wait on
/// the receiving half, call `done()` on the termination request it gets,
/// and then exit.
///
/// Implementations:
/// - HeartbeatWorker (daemon): logs on an interval until terminated
/// - mocks::MockWorker: test double with configurable shutdown behavior
pub trait Worker: Send {
    /// Unique name for the registry. `None` lets the registry pick one.
    fn name(&self) -> Option<String> {
        None
    }

    /// Begin execution. Consumes the worker so it can only start once.
    fn start(self) -> HandshakeSender
    where
        Self: Sized;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use crate::domain::handshake_channel;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;
    use tracing::warn;

    /// Mock worker shutdown behavior
    #[derive(Debug, Clone)]
    pub enum MockBehavior {
        /// Acknowledge as soon as the request arrives
        Cooperative,
        /// Sleep before acknowledging
        Delayed(Duration),
        /// Never read the handshake channel
        Unresponsive,
        /// Drop the handshake receiver right after starting
        Vanishing,
    }

    /// What the mock observed, shared with the test after `start`
    #[derive(Debug, Default)]
    pub struct MockStats {
        pub received: usize,
        pub acknowledged: usize,
        pub orphaned: bool,
        pub received_names: Vec<String>,
    }

    /// Mock Worker for testing
    pub struct MockWorker {
        name: Option<String>,
        behavior: MockBehavior,
        stats: Arc<Mutex<MockStats>>,
    }

    impl MockWorker {
        pub fn new(name: Option<String>, behavior: MockBehavior) -> Self {
            Self {
                name,
                behavior,
                stats: Arc::new(Mutex::new(MockStats::default())),
            }
        }
        pub fn anonymous() -> Self {
            Self::new(None, MockBehavior::Cooperative)
        }
        pub fn named(name: impl Into<String>) -> Self {
            Self::new(Some(name.into()), MockBehavior::Cooperative)
        }
        pub fn with_behavior(mut self, behavior: MockBehavior) -> Self {
            self.behavior = behavior;
            self
        }
        pub fn stats(&self) -> Arc<Mutex<MockStats>> {
            Arc::clone(&self.stats)
        }
    }

    impl Worker for MockWorker {
        fn name(&self) -> Option<String> {
            self.name.clone()
        }

        fn start(self) -> HandshakeSender {
            let (tx, mut rx) = handshake_channel();
            let MockWorker {
                name,
                behavior,
                stats,
            } = self;

            match behavior {
                MockBehavior::Vanishing => drop(rx),
                MockBehavior::Unresponsive => {
                    tokio::spawn(async move {
                        let _held = rx;
                        std::future::pending::<()>().await;
                    });
                }
                MockBehavior::Cooperative | MockBehavior::Delayed(_) => {
                    tokio::spawn(async move {
                        let Some(request) = rx.recv().await else {
                            stats.lock().unwrap().orphaned = true;
                            return;
                        };
                        {
                            let mut s = stats.lock().unwrap();
                            s.received += 1;
                            s.received_names.push(request.name().to_string());
                        }
                        if let Some(expected) = &name {
                            if let Err(e) = request.verify(expected) {
                                warn!(error = %e, "Mock worker got a request for another name");
                            }
                        }
                        if let MockBehavior::Delayed(delay) = behavior {
                            tokio::time::sleep(delay).await;
                        }
                        stats.lock().unwrap().acknowledged += 1;
                        request.done();
                    });
                }
            }
            tx
        }
    }
}
