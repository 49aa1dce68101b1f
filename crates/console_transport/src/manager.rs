use std::collections::HashMap;
use std::sync::{mpsc, Arc};
use std::thread;

use console_logging::console_warn;
use tokio_util::sync::CancellationToken;

use crate::client::BackendClient;
use crate::polling::{PollPolicy, PollingTransport};
use crate::streaming::{StreamPolicy, StreamingTransport};
use crate::transport::{ChannelEventSink, Transport};
use crate::types::{Job, StartRequest, TransportEvent};

/// Delivery mechanism for a run. An operational choice, not a behavioral
/// one, apart from the documented drop asymmetry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransportMode {
    #[default]
    Polling,
    Streaming,
}

enum Command {
    Start {
        job: Job,
        mode: TransportMode,
        params: StartRequest,
    },
    Stop {
        job: Job,
    },
}

struct ActiveRun {
    cancel: CancellationToken,
    task: tokio::task::JoinHandle<()>,
}

/// Command handle for the runtime thread that drives transport adapters.
///
/// Commands go in over a channel; `(Job, TransportEvent)` pairs come out in
/// delivery order on the receiver returned by [`new`](Self::new). At most
/// one adapter is live per job: a new start cancels and aborts the previous
/// one before spawning its replacement.
#[derive(Clone)]
pub struct TransportManager {
    cmd_tx: mpsc::Sender<Command>,
}

impl TransportManager {
    pub fn new(client: BackendClient) -> (Self, mpsc::Receiver<(Job, TransportEvent)>) {
        let (cmd_tx, cmd_rx) = mpsc::channel::<Command>();
        let (event_tx, event_rx) = mpsc::channel();
        let client = Arc::new(client);

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            let mut active: HashMap<Job, ActiveRun> = HashMap::new();

            while let Ok(command) = cmd_rx.recv() {
                match command {
                    Command::Start { job, mode, params } => {
                        if let Some(previous) = active.remove(&job) {
                            previous.cancel.cancel();
                            previous.task.abort();
                        }

                        let transport: Arc<dyn Transport> = match mode {
                            TransportMode::Polling => Arc::new(PollingTransport::new(
                                (*client).clone(),
                                PollPolicy::default(),
                            )),
                            TransportMode::Streaming => Arc::new(StreamingTransport::new(
                                (*client).clone(),
                                StreamPolicy::default(),
                            )),
                        };
                        let sink = ChannelEventSink::new(event_tx.clone());
                        let cancel = CancellationToken::new();
                        let token = cancel.clone();
                        let task = runtime.spawn(async move {
                            if let Err(err) = transport.run(job, params, &sink, &token).await {
                                console_warn!("{job} transport ended: {err}");
                            }
                        });
                        active.insert(job, ActiveRun { cancel, task });
                    }
                    Command::Stop { job } => {
                        // Cooperative: ask the backend to cancel and keep the
                        // adapter alive until it reports a terminal event.
                        let client = client.clone();
                        runtime.spawn(async move {
                            if let Err(err) = client.stop_job(job).await {
                                console_warn!("{job} stop request failed: {err}");
                            }
                        });
                    }
                }
            }
        });

        (Self { cmd_tx }, event_rx)
    }

    pub fn start(&self, job: Job, mode: TransportMode, params: StartRequest) {
        let _ = self.cmd_tx.send(Command::Start { job, mode, params });
    }

    pub fn stop(&self, job: Job) {
        let _ = self.cmd_tx.send(Command::Stop { job });
    }
}
