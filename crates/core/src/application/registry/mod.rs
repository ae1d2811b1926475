//! Registry - Named workers and coordinated termination
//!
//! Registration starts a worker and records its handshake sender under a
//! unique name. Closing fans a termination request out to every worker, each
//! from its own task, and then waits on a shared completion barrier until all
//! of them have acknowledged.
//!
//! - `close_all`: waits indefinitely
//! - `close_all_within`: bounded by a deadline
//! - `close_all_until`: aborted by a cancellation token

pub mod constants;

use crate::application::cancel::CancelToken;
use crate::domain::{CompletionSignal, Contract};
use crate::error::{AppError, ConstructionError, Result};
use crate::port::{IdProvider, UuidProvider, Worker};
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

/// Why a close stopped waiting before every worker finished
enum Interrupt {
    Timeout,
    Cancelled,
}

/// Registry of running workers, keyed by unique name
pub struct Registry {
    contracts: HashMap<String, Contract>,
    id_provider: Arc<dyn IdProvider>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Create an empty registry naming anonymous workers with UUIDs
    pub fn new() -> Self {
        Self::with_id_provider(Arc::new(UuidProvider))
    }

    pub fn with_id_provider(id_provider: Arc<dyn IdProvider>) -> Self {
        Self {
            contracts: HashMap::new(),
            id_provider,
        }
    }

    /// Start `worker` and register it under its own name, or a generated
    /// one if it has none. Returns the name used.
    pub fn register<W: Worker>(&mut self, worker: W) -> String {
        let name = worker
            .name()
            .unwrap_or_else(|| self.id_provider.generate_id());
        self.register_named(name.clone(), worker);
        name
    }

    /// Start `worker` and register it under `name`, ignoring its own name.
    ///
    /// The worker is started before the entry is inserted. If `name` is
    /// already taken the previous contract is replaced and its handshake
    /// sender dropped, so that worker is never signaled by this registry.
    pub fn register_named<W: Worker>(&mut self, name: impl Into<String>, worker: W) {
        let name = name.into();
        let channel = worker.start();

        if self.contracts.contains_key(&name) {
            warn!(worker = %name, "Worker name already registered, replacing previous contract");
        }
        debug!(worker = %name, "Worker registered");
        self.contracts
            .insert(name.clone(), Contract::new(name, channel));
    }

    /// Register the output of a fallible constructor.
    ///
    /// On `Err` nothing is started or inserted and the construction error is
    /// returned to the caller.
    pub fn register_or_fail<W, E>(
        &mut self,
        constructed: std::result::Result<W, E>,
    ) -> Result<String>
    where
        W: Worker,
        E: Into<ConstructionError>,
    {
        match constructed {
            Ok(worker) => Ok(self.register(worker)),
            Err(e) => {
                let e = e.into();
                error!(error = %e, "Refusing to register worker that failed construction");
                Err(AppError::Construction(e))
            }
        }
    }

    /// Register the output of a fallible constructor, panicking on `Err`.
    ///
    /// # Panics
    /// If `constructed` is an error. Nothing is inserted in that case.
    pub fn register_or_abort<W, E>(&mut self, constructed: std::result::Result<W, E>) -> String
    where
        W: Worker,
        E: std::fmt::Display,
    {
        match constructed {
            Ok(worker) => self.register(worker),
            Err(e) => panic!("Worker construction failed: {}", e),
        }
    }

    pub fn len(&self) -> usize {
        self.contracts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.contracts.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Contract> {
        self.contracts.get(name)
    }

    /// Registered names, in no particular order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.contracts.keys().map(String::as_str)
    }

    /// Terminate every registered worker and wait for all of them.
    ///
    /// Blocks forever if a worker never reads its handshake channel. Returns
    /// `Unreachable` if some workers had already dropped their channel; every
    /// other worker has still been terminated by then.
    pub async fn close_all(&mut self) -> Result<()> {
        self.close_with(std::future::pending()).await
    }

    /// Like `close_all`, but gives up after `timeout` with `Timeout`
    pub async fn close_all_within(&mut self, timeout: Duration) -> Result<()> {
        self.close_with(async move {
            tokio::time::sleep(timeout).await;
            Interrupt::Timeout
        })
        .await
    }

    /// Like `close_all`, but gives up when `cancel` fires with `Cancelled`
    pub async fn close_all_until(&mut self, mut cancel: CancelToken) -> Result<()> {
        self.close_with(async move {
            cancel.cancelled().await;
            Interrupt::Cancelled
        })
        .await
    }

    async fn close_with<F>(&mut self, interrupt: F) -> Result<()>
    where
        F: Future<Output = Interrupt>,
    {
        let total = self.contracts.len();
        if total == 0 {
            debug!("Registry empty, nothing to close");
            return Ok(());
        }

        info!(workers = total, "Closing registry");
        let barrier = CompletionSignal::new(total);
        let mut senders = JoinSet::new();

        for (_, contract) in self.contracts.drain() {
            let barrier = barrier.clone();
            senders.spawn(async move {
                let name = contract.name.clone();
                info!(worker = %name, "Terminating worker");
                match contract.terminate(barrier.clone()).await {
                    Ok(()) => {
                        info!(worker = %name, "Termination request delivered");
                        None
                    }
                    Err(e) => {
                        // The request never reached the worker, so nobody else will count it
                        warn!(worker = %name, error = %e, "Worker unreachable");
                        barrier.done();
                        Some(name)
                    }
                }
            });
        }

        tokio::select! {
            _ = barrier.wait() => {}
            reason = interrupt => {
                let pending = barrier.remaining();
                senders.abort_all();
                return Err(match reason {
                    Interrupt::Timeout => {
                        warn!(pending, "Close timed out");
                        AppError::Timeout { pending }
                    }
                    Interrupt::Cancelled => {
                        warn!(pending, "Close cancelled");
                        AppError::Cancelled { pending }
                    }
                });
            }
        }

        let mut unreachable = Vec::new();
        while let Some(joined) = senders.join_next().await {
            match joined {
                Ok(Some(name)) => unreachable.push(name),
                Ok(None) => {}
                Err(e) => error!(error = %e, "Termination sender task failed"),
            }
        }

        if !unreachable.is_empty() {
            unreachable.sort();
            return Err(AppError::Unreachable(unreachable));
        }

        info!(workers = total, "All workers terminated");
        Ok(())
    }
}
