//! Shutdown Definition of Done (DoD) Integration Tests
//!
//! Register, close, and verify every worker was stopped exactly once.

use std::sync::Arc;
use std::time::Duration;

use quiesce_core::application::registry::constants::ANONYMOUS_WORKER_PREFIX;
use quiesce_core::port::id_provider::SequentialIdProvider;
use quiesce_core::port::worker::mocks::{MockBehavior, MockWorker};
use quiesce_core::{handshake_channel, AppError, Registry};
use quiesce_integration_tests::{register_many, total_received};

/// DoD 1: Four anonymous workers are registered, closed, and each stopped once
#[tokio::test]
async fn test_four_anonymous_workers() {
    let mut registry =
        Registry::with_id_provider(Arc::new(SequentialIdProvider::new(ANONYMOUS_WORKER_PREFIX)));
    let stats = register_many(&mut registry, 4, |_| MockWorker::anonymous());

    assert_eq!(registry.len(), 4);
    let mut names: Vec<_> = registry.names().map(str::to_string).collect();
    names.sort();
    assert_eq!(names, vec!["worker-1", "worker-2", "worker-3", "worker-4"]);

    registry.close_all().await.expect("close should succeed");

    for s in &stats {
        let s = s.lock().unwrap();
        assert_eq!(s.received, 1, "each worker gets exactly one request");
        assert_eq!(s.acknowledged, 1, "each worker acknowledges exactly once");
    }
}

/// DoD 2: Default registry names anonymous workers uniquely
#[tokio::test]
async fn test_uuid_names_are_unique() {
    let mut registry = Registry::new();
    let stats = register_many(&mut registry, 50, |_| MockWorker::anonymous());

    assert_eq!(registry.len(), 50);

    registry.close_all().await.unwrap();
    assert_eq!(total_received(&stats), 50);
}

/// DoD 3: Closing an empty registry does not block
#[tokio::test]
async fn test_empty_close() {
    let mut registry = Registry::new();
    tokio::time::timeout(Duration::from_millis(100), registry.close_all())
        .await
        .expect("should not block")
        .unwrap();
}

/// DoD 4: Fresh handshake channels hold nothing
#[tokio::test]
async fn test_fresh_handshake_is_empty() {
    let (tx, _rx) = handshake_channel();
    assert_eq!(tx.buffered(), 0);
}

/// DoD 5: Failed construction never produces an entry
#[tokio::test]
async fn test_failed_construction() {
    let mut registry = Registry::new();

    let err = registry
        .register_or_fail(Err::<MockWorker, _>("connection refused"))
        .unwrap_err();
    assert!(matches!(err, AppError::Construction(_)));

    let aborted = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        registry.register_or_abort(Err::<MockWorker, _>("connection refused"))
    }));
    assert!(aborted.is_err());

    assert!(registry.is_empty());
}

/// DoD 6: Same name twice keeps only the second worker
#[tokio::test]
async fn test_name_collision_last_wins() {
    let mut registry = Registry::new();
    let stats = register_many(&mut registry, 2, |_| MockWorker::named("shared"));

    assert_eq!(registry.len(), 1);
    registry.close_all().await.unwrap();

    assert_eq!(stats[0].lock().unwrap().received, 0);
    assert_eq!(stats[1].lock().unwrap().received, 1);
}

/// DoD 7: Mixed shutdown latencies all complete before close returns
#[tokio::test]
async fn test_close_waits_for_every_worker() {
    let mut registry = Registry::new();
    let stats = register_many(&mut registry, 6, |i| {
        MockWorker::named(format!("svc-{}", i))
            .with_behavior(MockBehavior::Delayed(Duration::from_millis(20 * i as u64)))
    });

    registry
        .close_all_within(Duration::from_secs(5))
        .await
        .unwrap();

    for s in &stats {
        assert_eq!(s.lock().unwrap().acknowledged, 1);
    }
}
