use std::sync::mpsc;
use std::thread;

use console_core::{CountryEntry, Effect, Msg, StartParams, ValidationConfig};
use console_logging::console_info;
use console_transport::{BackendClient, StartRequest, TransportManager, TransportMode};

use super::convert;

/// Executes core effects: transport commands, backend fetches, and timers.
///
/// Owns the transport manager plus a small runtime for one-shot REST calls;
/// everything reports back to the update loop as plain messages.
pub struct EffectRunner {
    manager: TransportManager,
    client: BackendClient,
    runtime: tokio::runtime::Runtime,
    msg_tx: mpsc::Sender<Msg>,
    mode: TransportMode,
}

impl EffectRunner {
    pub fn new(client: BackendClient, mode: TransportMode, msg_tx: mpsc::Sender<Msg>) -> Self {
        let (manager, event_rx) = TransportManager::new(client.clone());
        let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");

        // Pump transport events into the update loop in delivery order.
        let event_tx = msg_tx.clone();
        thread::spawn(move || {
            while let Ok((job, event)) = event_rx.recv() {
                if event_tx.send(convert::event_msg(job, event)).is_err() {
                    return;
                }
            }
        });

        Self {
            manager,
            client,
            runtime,
            msg_tx,
            mode,
        }
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::LoadConfig => self.load_config(),
                Effect::ListSheets => self.list_sheets(),
                Effect::RefreshStats => self.refresh_stats(),
                Effect::StartJob { kind, params } => {
                    console_info!("starting {} job via {:?}", kind.as_str(), self.mode);
                    self.manager
                        .start(convert::job_of(kind), self.mode, start_request(params));
                }
                Effect::StopJob { kind } => {
                    console_info!("stop requested for {} job", kind.as_str());
                    self.manager.stop(convert::job_of(kind));
                }
                Effect::Schedule { after, msg } => {
                    let tx = self.msg_tx.clone();
                    thread::spawn(move || {
                        thread::sleep(after);
                        let _ = tx.send(*msg);
                    });
                }
            }
        }
    }

    fn load_config(&self) {
        let client = self.client.clone();
        let tx = self.msg_tx.clone();
        self.runtime.spawn(async move {
            let msg = match client.fetch_config().await {
                Ok(wire) => {
                    let countries = wire
                        .country_entries()
                        .into_iter()
                        .map(|(name, cities)| CountryEntry { name, cities })
                        .collect();
                    Msg::ConfigLoaded(ValidationConfig::new(
                        countries,
                        wire.niches,
                        wire.niche_priority,
                    ))
                }
                Err(err) => Msg::ConfigLoadFailed(err.to_string()),
            };
            let _ = tx.send(msg);
        });
    }

    fn list_sheets(&self) {
        let client = self.client.clone();
        let tx = self.msg_tx.clone();
        self.runtime.spawn(async move {
            let msg = match client.list_sheets().await {
                Ok(listing) => match listing.error {
                    Some(err) => Msg::SheetsListFailed(err),
                    None => Msg::SheetsListed(listing.sheets),
                },
                Err(err) => Msg::SheetsListFailed(err.to_string()),
            };
            let _ = tx.send(msg);
        });
    }

    fn refresh_stats(&self) {
        let client = self.client.clone();
        let tx = self.msg_tx.clone();
        self.runtime.spawn(async move {
            let msg = match client.fetch_all_stats().await {
                Ok(response) => match response.error {
                    Some(err) => Msg::StatsRefreshFailed(err),
                    None => Msg::StatsRefreshed(
                        response.stats.into_iter().map(convert::stats_row).collect(),
                    ),
                },
                Err(err) => Msg::StatsRefreshFailed(err.to_string()),
            };
            let _ = tx.send(msg);
        });
    }
}

fn start_request(params: StartParams) -> StartRequest {
    match params {
        StartParams::Pipeline {
            country,
            city,
            niche,
            send_emails,
        } => StartRequest::Pipeline {
            country,
            city,
            niche,
            send_emails,
        },
        StartParams::Email { sheet_tab } => StartRequest::Email { sheet_tab },
    }
}
