//! Shared fixtures for the end-to-end shutdown tests

use quiesce_core::port::worker::mocks::{MockStats, MockWorker};
use quiesce_core::Registry;
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Register `count` workers built by `make` and return their shared stats
pub fn register_many<F>(
    registry: &mut Registry,
    count: usize,
    mut make: F,
) -> Vec<Arc<Mutex<MockStats>>>
where
    F: FnMut(usize) -> MockWorker,
{
    (0..count)
        .map(|i| {
            let worker = make(i);
            let stats = worker.stats();
            let name = registry.register(worker);
            debug!(worker = %name, "Fixture worker registered");
            stats
        })
        .collect()
}

/// Total termination requests received across `stats`
pub fn total_received(stats: &[Arc<Mutex<MockStats>>]) -> usize {
    stats.iter().map(|s| s.lock().unwrap().received).sum()
}
