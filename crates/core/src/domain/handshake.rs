// Termination Handshake Channel
//
// Rendezvous between the registry and one worker: `send` completes only after
// the worker has taken the request off the channel, so nothing ever sits
// buffered waiting for a worker that is not ready.

use super::error::{DomainError, Result};
use super::termination::TerminationRequest;
use tokio::sync::{mpsc, oneshot};

struct Envelope {
    request: TerminationRequest,
    taken: oneshot::Sender<()>,
}

/// Registry-side half. Single use: sending consumes it.
#[derive(Debug)]
pub struct HandshakeSender {
    tx: mpsc::Sender<Envelope>,
}

/// Worker-side half, awaited by the worker's task.
#[derive(Debug)]
pub struct HandshakeReceiver {
    rx: mpsc::Receiver<Envelope>,
}

impl std::fmt::Debug for Envelope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Envelope")
            .field("request", &self.request)
            .finish()
    }
}

/// Create a fresh handshake channel for one worker instance
pub fn handshake_channel() -> (HandshakeSender, HandshakeReceiver) {
    let (tx, rx) = mpsc::channel(1);
    (HandshakeSender { tx }, HandshakeReceiver { rx })
}

impl HandshakeSender {
    /// Deliver the request and wait until the worker has received it.
    ///
    /// Fails with `HandshakeClosed` if the worker dropped its receiver
    /// before taking the request.
    pub async fn send(self, request: TerminationRequest) -> Result<()> {
        let name = request.name().to_string();
        let (taken, taken_rx) = oneshot::channel();

        self.tx
            .send(Envelope { request, taken })
            .await
            .map_err(|_| DomainError::HandshakeClosed(name.clone()))?;

        taken_rx
            .await
            .map_err(|_| DomainError::HandshakeClosed(name))
    }

    /// Number of requests sitting in the channel. Zero except for the
    /// instant between a send and the worker's receive.
    pub fn buffered(&self) -> usize {
        self.tx.max_capacity() - self.tx.capacity()
    }

    /// True once the worker's receiver has been dropped
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

impl HandshakeReceiver {
    /// Wait for the termination request.
    ///
    /// Returns `None` if the registry dropped the sending half without
    /// signaling (e.g. the entry was overwritten by a same-named worker).
    pub async fn recv(&mut self) -> Option<TerminationRequest> {
        let Envelope { request, taken } = self.rx.recv().await?;
        let _ = taken.send(());
        Some(request)
    }
}
