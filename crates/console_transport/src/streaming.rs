use console_logging::{console_debug, console_warn};
use futures_util::{SinkExt, StreamExt};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::protocol::Message;
use tokio_util::sync::CancellationToken;

use crate::client::BackendClient;
use crate::transport::{EventSink, Transport};
use crate::types::{Job, StartRequest, TransportError, TransportEvent, WireFrame};

/// What the push adapter reports when the channel drops without a terminal
/// result frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropBehavior {
    /// Emit `Closed`: the session quietly returns to idle. This matches the
    /// original surface, where a lost socket never invented an outcome.
    Detach,
    /// Emit an error `Result` so the drop lands as a terminal failure.
    Fail,
}

/// Failure-handling knobs for the push adapter. There is deliberately no
/// reconnect option: re-sending the start frame would launch a second run.
#[derive(Debug, Clone)]
pub struct StreamPolicy {
    pub on_drop: DropBehavior,
}

impl Default for StreamPolicy {
    fn default() -> Self {
        Self {
            on_drop: DropBehavior::Detach,
        }
    }
}

/// Push adapter: opens the job's WebSocket channel, sends the start
/// parameters as the first frame, and forwards tagged frames until the
/// terminal result.
pub struct StreamingTransport {
    client: BackendClient,
    policy: StreamPolicy,
}

impl StreamingTransport {
    pub fn new(client: BackendClient, policy: StreamPolicy) -> Self {
        Self { client, policy }
    }

    fn emit_drop(&self, job: Job, sink: &dyn EventSink, reason: &str) {
        match self.policy.on_drop {
            DropBehavior::Detach => sink.emit(job, TransportEvent::Closed),
            DropBehavior::Fail => sink.emit(
                job,
                TransportEvent::Result(crate::types::WireResult {
                    status: crate::types::WireOutcome::Error,
                    data: serde_json::Value::Null,
                    message: format!("connection lost: {reason}"),
                }),
            ),
        }
    }
}

#[async_trait::async_trait]
impl Transport for StreamingTransport {
    async fn run(
        &self,
        job: Job,
        params: StartRequest,
        sink: &dyn EventSink,
        cancel: &CancellationToken,
    ) -> Result<(), TransportError> {
        let url = self.client.ws_url(job);
        let (mut ws, _response) = match connect_async(&url).await {
            Ok(ok) => ok,
            Err(err) => {
                self.emit_drop(job, sink, "connect failed");
                return Err(TransportError::WebSocket(format!(
                    "failed to connect to {url}: {err}"
                )));
            }
        };

        let first_frame =
            serde_json::to_string(&params).map_err(|e| TransportError::Protocol(e.to_string()))?;
        if let Err(err) = ws.send(Message::Text(first_frame.into())).await {
            self.emit_drop(job, sink, "start frame rejected");
            return Err(TransportError::WebSocket(err.to_string()));
        }

        loop {
            let message = tokio::select! {
                _ = cancel.cancelled() => {
                    console_debug!("{job} streaming cancelled");
                    let _ = ws.close(None).await;
                    return Ok(());
                }
                message = ws.next() => message,
            };

            match message {
                Some(Ok(Message::Text(text))) => match serde_json::from_str(text.as_str()) {
                    Ok(WireFrame::Log(entry)) => sink.emit(job, TransportEvent::Log(entry)),
                    Ok(WireFrame::Status { message }) => {
                        sink.emit(job, TransportEvent::Status { message })
                    }
                    Ok(WireFrame::Result(result)) => {
                        sink.emit(job, TransportEvent::Result(result));
                        let _ = ws.close(None).await;
                        return Ok(());
                    }
                    Err(err) => {
                        // Tolerate stray frames; the channel itself is fine.
                        console_warn!("{job} unparseable frame ignored: {err}");
                    }
                },
                Some(Ok(Message::Close(_))) | None => {
                    self.emit_drop(job, sink, "channel closed");
                    return Err(TransportError::WebSocket(
                        "channel closed before result".to_string(),
                    ));
                }
                Some(Ok(_)) => {} // ping/pong/binary
                Some(Err(err)) => {
                    self.emit_drop(job, sink, "read error");
                    return Err(TransportError::WebSocket(err.to_string()));
                }
            }
        }
    }
}
