// Heartbeat worker: logs on an interval until asked to stop

use quiesce_core::{handshake_channel, HandshakeSender, Worker};
use std::time::Duration;
use tokio::time::interval;
use tracing::{info, warn};

/// Anonymous worker; the registry picks its name
pub struct HeartbeatWorker {
    period: Duration,
}

impl HeartbeatWorker {
    pub fn new(period: Duration) -> Self {
        Self { period }
    }
}

impl Worker for HeartbeatWorker {
    fn start(self) -> HandshakeSender {
        let (tx, mut rx) = handshake_channel();
        let period = self.period;

        tokio::spawn(async move {
            let mut ticker = interval(period);
            let mut beats: u64 = 0;
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        beats += 1;
                        info!(beats, "Heartbeat");
                    }
                    request = rx.recv() => {
                        let Some(request) = request else {
                            warn!(beats, "Handshake dropped without termination request");
                            return;
                        };
                        info!(worker = %request.name(), beats, "Heartbeat worker stopping");
                        request.done();
                        return;
                    }
                }
            }
        });

        tx
    }
}
