// ID Provider Port (for deterministic testing)

use std::sync::atomic::{AtomicU64, Ordering};

/// ID provider interface (allows deterministic names in tests)
pub trait IdProvider: Send + Sync {
    /// Generate a new unique worker name
    fn generate_id(&self) -> String;
}

/// UUID v4 provider (production)
pub struct UuidProvider;

impl IdProvider for UuidProvider {
    fn generate_id(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// Sequential provider: `{prefix}-1`, `{prefix}-2`, ...
pub struct SequentialIdProvider {
    prefix: String,
    next: AtomicU64,
}

impl SequentialIdProvider {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicU64::new(1),
        }
    }
}

impl IdProvider for SequentialIdProvider {
    fn generate_id(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{}-{}", self.prefix, n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[test]
    fn test_uuid_ids_are_unique() {
        let provider = UuidProvider;
        let ids: HashSet<_> = (0..100).map(|_| provider.generate_id()).collect();
        assert_eq!(ids.len(), 100);
    }

    #[test]
    fn test_sequential_ids() {
        let provider = SequentialIdProvider::new("worker");
        assert_eq!(provider.generate_id(), "worker-1");
        assert_eq!(provider.generate_id(), "worker-2");
    }

    #[test]
    fn test_sequential_ids_unique_across_threads() {
        let provider = Arc::new(SequentialIdProvider::new("t"));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let p = Arc::clone(&provider);
                std::thread::spawn(move || (0..50).map(|_| p.generate_id()).collect::<Vec<_>>())
            })
            .collect();

        let ids: HashSet<_> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        assert_eq!(ids.len(), 200);
    }
}
