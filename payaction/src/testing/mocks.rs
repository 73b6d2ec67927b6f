//! Transport doubles.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use tokio::time::Instant;

use crate::transport::{PreparedRequest, Transport, TransportFailure};

/// One request seen by a [`ScriptedTransport`].
#[derive(Debug, Clone)]
pub struct RecordedCall {
    /// The request as sent.
    pub request: PreparedRequest,
    /// When it was sent, on the tokio clock.
    pub at: Instant,
}

/// A transport that answers from a queue of scripted results.
///
/// Once the queue is empty every further call gets the fallback, which
/// defaults to `{}`.
#[derive(Debug)]
pub struct ScriptedTransport {
    script: Mutex<VecDeque<Result<serde_json::Value, TransportFailure>>>,
    fallback: Mutex<Result<serde_json::Value, TransportFailure>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl Default for ScriptedTransport {
    fn default() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            fallback: Mutex::new(Ok(serde_json::json!({}))),
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl ScriptedTransport {
    /// Creates an empty script.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful response.
    #[must_use]
    pub fn then_ok(self, body: serde_json::Value) -> Self {
        self.script.lock().push_back(Ok(body));
        self
    }

    /// Queues a non-success status.
    #[must_use]
    pub fn then_status(self, status: u16, body: serde_json::Value) -> Self {
        self.script
            .lock()
            .push_back(Err(TransportFailure::Status { status, body }));
        self
    }

    /// Queues a network failure.
    #[must_use]
    pub fn then_network_error(self, message: impl Into<String>) -> Self {
        self.script
            .lock()
            .push_back(Err(TransportFailure::Network(message.into())));
        self
    }

    /// Answers every call with the given status once the script runs out.
    #[must_use]
    pub fn always_status(self, status: u16, body: serde_json::Value) -> Self {
        *self.fallback.lock() = Err(TransportFailure::Status { status, body });
        self
    }

    /// Returns the number of calls made.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Returns the recorded calls.
    #[must_use]
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    /// Returns the gaps between consecutive calls.
    #[must_use]
    pub fn gaps(&self) -> Vec<std::time::Duration> {
        self.calls
            .lock()
            .windows(2)
            .map(|pair| pair[1].at.duration_since(pair[0].at))
            .collect()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: &PreparedRequest) -> Result<serde_json::Value, TransportFailure> {
        self.calls.lock().push(RecordedCall {
            request: request.clone(),
            at: Instant::now(),
        });

        let next = self.script.lock().pop_front();
        next.unwrap_or_else(|| self.fallback.lock().clone())
    }
}
