use std::sync::mpsc;

use tokio_util::sync::CancellationToken;

use crate::types::{Job, StartRequest, TransportError, TransportEvent};

/// Consumer side of a transport adapter's event sequence.
pub trait EventSink: Send + Sync {
    fn emit(&self, job: Job, event: TransportEvent);
}

/// Sink that forwards events into an mpsc channel for the update loop.
pub struct ChannelEventSink {
    tx: mpsc::Sender<(Job, TransportEvent)>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<(Job, TransportEvent)>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, job: Job, event: TransportEvent) {
        let _ = self.tx.send((job, event));
    }
}

/// Capability shared by the polling and streaming adapters.
///
/// `run` establishes delivery for one job run and emits events into `sink`
/// in arrival order. Unless cancelled, it emits exactly one terminal event
/// (`Rejected`, `Result`, or `Closed`) before returning; cancellation means
/// the session was torn down and no further events are wanted. The returned
/// error, if any, describes why delivery ended and is for logging only.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn run(
        &self,
        job: Job,
        params: StartRequest,
        sink: &dyn EventSink,
        cancel: &CancellationToken,
    ) -> Result<(), TransportError>;
}
