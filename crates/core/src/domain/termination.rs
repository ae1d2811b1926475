// Termination Request & Completion Barrier

use super::error::{DomainError, Result};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::debug;

/// Join barrier shared by every worker terminated in one close.
///
/// Each worker reports completion once; a single closer waits until the
/// number of completions reaches the size the barrier was created with.
#[derive(Clone, Debug)]
pub struct CompletionSignal {
    inner: Arc<BarrierState>,
}

#[derive(Debug)]
struct BarrierState {
    total: usize,
    completed: watch::Sender<usize>,
}

impl CompletionSignal {
    /// Create a barrier expecting `total` completions
    pub fn new(total: usize) -> Self {
        let (completed, _) = watch::channel(0);
        Self {
            inner: Arc::new(BarrierState { total, completed }),
        }
    }

    /// Record one completion
    pub(crate) fn done(&self) {
        self.inner.completed.send_modify(|count| *count += 1);
        debug!(
            completed = self.completed(),
            total = self.inner.total,
            "Completion recorded"
        );
    }

    /// Number of completions expected
    pub fn total(&self) -> usize {
        self.inner.total
    }

    /// Number of completions recorded so far
    pub fn completed(&self) -> usize {
        *self.inner.completed.borrow()
    }

    /// Completions still outstanding
    pub fn remaining(&self) -> usize {
        self.inner.total.saturating_sub(self.completed())
    }

    pub fn is_complete(&self) -> bool {
        self.completed() >= self.inner.total
    }

    /// Wait until every expected completion has been recorded
    pub async fn wait(&self) {
        let total = self.inner.total;
        let mut rx = self.inner.completed.subscribe();
        // The sender lives in `self`, so the channel cannot close while waiting
        let _ = rx.wait_for(|count| *count >= total).await;
    }
}

/// Message asking a worker to stop.
///
/// Carries the registered name so the worker can check it was addressed
/// correctly, and the barrier it must report completion to.
#[derive(Debug)]
pub struct TerminationRequest {
    name: String,
    completion: CompletionSignal,
}

impl TerminationRequest {
    pub fn new(name: impl Into<String>, completion: CompletionSignal) -> Self {
        Self {
            name: name.into(),
            completion,
        }
    }

    /// Name the worker was registered under
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Check the request was addressed to `expected`
    pub fn verify(&self, expected: &str) -> Result<()> {
        if self.name != expected {
            return Err(DomainError::NameMismatch {
                expected: expected.to_string(),
                actual: self.name.clone(),
            });
        }
        Ok(())
    }

    /// Acknowledge termination. Consumes the request so it can only fire once.
    pub fn done(self) {
        self.completion.done();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_new_barrier_counts() {
        let signal = CompletionSignal::new(3);
        assert_eq!(signal.total(), 3);
        assert_eq!(signal.completed(), 0);
        assert_eq!(signal.remaining(), 3);
        assert!(!signal.is_complete());
    }

    #[test]
    fn test_request_done_counts_once() {
        let signal = CompletionSignal::new(2);
        TerminationRequest::new("a", signal.clone()).done();

        assert_eq!(signal.completed(), 1);
        assert_eq!(signal.remaining(), 1);
    }

    #[test]
    fn test_verify_name() {
        let request = TerminationRequest::new("worker-1", CompletionSignal::new(1));
        assert!(request.verify("worker-1").is_ok());

        let err = request.verify("worker-2").unwrap_err();
        assert_eq!(
            err,
            DomainError::NameMismatch {
                expected: "worker-2".to_string(),
                actual: "worker-1".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_wait_on_empty_barrier_returns_immediately() {
        let signal = CompletionSignal::new(0);
        assert!(signal.is_complete());
        tokio::time::timeout(Duration::from_millis(100), signal.wait())
            .await
            .expect("empty barrier should not block");
    }

    #[tokio::test]
    async fn test_wait_until_all_done() {
        let signal = CompletionSignal::new(4);

        for i in 0..4 {
            let request = TerminationRequest::new(format!("w{}", i), signal.clone());
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(5 * i)).await;
                request.done();
            });
        }

        tokio::time::timeout(Duration::from_secs(2), signal.wait())
            .await
            .expect("barrier should complete");
        assert_eq!(signal.completed(), 4);
        assert_eq!(signal.remaining(), 0);
    }

    #[tokio::test]
    async fn test_wait_blocks_while_outstanding() {
        let signal = CompletionSignal::new(2);
        TerminationRequest::new("only-one", signal.clone()).done();

        let result = tokio::time::timeout(Duration::from_millis(50), signal.wait()).await;
        assert!(result.is_err(), "barrier must not release with one outstanding");
    }
}
