use std::time::Duration;

use console_logging::{console_debug, console_warn};
use tokio_util::sync::CancellationToken;

use crate::client::BackendClient;
use crate::transport::{EventSink, Transport};
use crate::types::{Job, StartRequest, TransportError, TransportEvent};

/// Scheduling knobs for the pull adapter, explicit so the retry behavior is
/// a construction-time choice rather than a hard-coded detail.
#[derive(Debug, Clone)]
pub struct PollPolicy {
    /// Delay between successful polls while the job is running.
    pub poll_interval: Duration,
    /// Delay before retrying after a failed or unparseable poll.
    pub retry_delay: Duration,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(1_500),
            retry_delay: Duration::from_millis(3_000),
        }
    }
}

/// Pull adapter: starts the job over REST, then repeatedly fetches log
/// entries past an integer cursor until the backend reports the job done.
pub struct PollingTransport {
    client: BackendClient,
    policy: PollPolicy,
}

impl PollingTransport {
    pub fn new(client: BackendClient, policy: PollPolicy) -> Self {
        Self { client, policy }
    }
}

#[async_trait::async_trait]
impl Transport for PollingTransport {
    async fn run(
        &self,
        job: Job,
        params: StartRequest,
        sink: &dyn EventSink,
        cancel: &CancellationToken,
    ) -> Result<(), TransportError> {
        let ack = match self.client.start_job(job, &params).await {
            Ok(ack) => ack,
            Err(err) => {
                sink.emit(
                    job,
                    TransportEvent::Rejected {
                        message: err.to_string(),
                    },
                );
                return Err(err);
            }
        };
        if !ack.started {
            let message = ack.error.unwrap_or_else(|| "job not started".to_string());
            sink.emit(job, TransportEvent::Rejected { message });
            return Ok(());
        }

        // The server never renumbers delivered entries, so a plain count is
        // enough to request only what is new.
        let mut cursor: u64 = 0;
        loop {
            let delay = match self.client.poll_logs(job, cursor).await {
                Ok(response) => {
                    for entry in response.logs {
                        sink.emit(job, TransportEvent::Log(entry));
                    }
                    cursor = response.total;
                    if !response.running {
                        match response.result {
                            Some(result) => sink.emit(job, TransportEvent::Result(result)),
                            None => sink.emit(job, TransportEvent::Closed),
                        }
                        return Ok(());
                    }
                    self.policy.poll_interval
                }
                Err(err) => {
                    // Cursor and delivered logs survive the failure; the
                    // next attempt picks up where this one left off.
                    console_warn!("{job} poll failed, retrying: {err}");
                    self.policy.retry_delay
                }
            };

            tokio::select! {
                _ = cancel.cancelled() => {
                    console_debug!("{job} polling cancelled at cursor {cursor}");
                    return Ok(());
                }
                _ = tokio::time::sleep(delay) => {}
            }
        }
    }
}
