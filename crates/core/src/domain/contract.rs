// Contract - registry entry pairing a worker name with its handshake

use super::error::Result;
use super::handshake::HandshakeSender;
use super::termination::{CompletionSignal, TerminationRequest};

/// Registered worker: its name and the means to stop it
#[derive(Debug)]
pub struct Contract {
    pub name: String,
    pub channel: HandshakeSender,
}

impl Contract {
    pub fn new(name: impl Into<String>, channel: HandshakeSender) -> Self {
        Self {
            name: name.into(),
            channel,
        }
    }

    /// Send the termination request and wait for the worker to take it.
    /// The worker reports completion on `completion` afterwards.
    pub async fn terminate(self, completion: CompletionSignal) -> Result<()> {
        let request = TerminationRequest::new(self.name, completion);
        self.channel.send(request).await
    }
}
