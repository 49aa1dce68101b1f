use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The two backend jobs addressable over the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Job {
    Pipeline,
    Email,
}

impl Job {
    /// Path segment used by the start/stop/log endpoints.
    pub fn as_str(self) -> &'static str {
        match self {
            Job::Pipeline => "pipeline",
            Job::Email => "email",
        }
    }
}

impl fmt::Display for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Job start request body. Sent as JSON to the start endpoint, or as the
/// first frame on the streaming channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum StartRequest {
    Pipeline {
        #[serde(skip_serializing_if = "Option::is_none")]
        country: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        city: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        niche: Option<String>,
        send_emails: bool,
    },
    Email {
        #[serde(skip_serializing_if = "Option::is_none")]
        sheet_tab: Option<String>,
    },
}

fn default_level() -> String {
    "INFO".to_string()
}

/// One progress line as delivered by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WireLog {
    #[serde(default)]
    pub ts: String,
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WireOutcome {
    Completed,
    Error,
    Cancelled,
}

/// Terminal result payload. Backend payloads are not trusted to be
/// complete; everything except the outcome tag defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WireResult {
    pub status: WireOutcome,
    #[serde(default)]
    pub data: Value,
    #[serde(default)]
    pub message: String,
}

impl WireResult {
    /// Counts from the opaque `data` payload, zeroes when it is malformed.
    pub fn counts(&self) -> RunCounts {
        serde_json::from_value(self.data.clone()).unwrap_or_default()
    }
}

/// Counts reported by the orchestrator's stats dict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct RunCounts {
    #[serde(default)]
    pub scraped: u64,
    #[serde(default)]
    pub qualified: u64,
    #[serde(default)]
    pub duplicates_removed: u64,
    #[serde(default)]
    pub added_to_sheet: u64,
    #[serde(default)]
    pub emails_sent: u64,
}

/// One inbound frame on the streaming channel.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WireFrame {
    Log(WireLog),
    Status {
        #[serde(default)]
        message: String,
    },
    Result(WireResult),
}

/// What a transport adapter delivers to its consumer, in order. Exactly one
/// of `Rejected`, `Result`, or `Closed` ends the sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum TransportEvent {
    /// Backend refused the start request.
    Rejected { message: String },
    Log(WireLog),
    /// Synthetic informational line not from the job's own log stream.
    Status { message: String },
    Result(WireResult),
    /// Transport gone without a terminal result.
    Closed,
}

/// Response to a start request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StartAck {
    #[serde(default)]
    pub started: bool,
    #[serde(default)]
    pub error: Option<String>,
}

/// Response to a cursor poll.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PollResponse {
    #[serde(default)]
    pub logs: Vec<WireLog>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub running: bool,
    #[serde(default)]
    pub result: Option<WireResult>,
}

/// Configuration snapshot from `/api/config`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WireConfig {
    #[serde(default)]
    pub countries: serde_json::Map<String, Value>,
    #[serde(default)]
    pub niches: Vec<String>,
    #[serde(default)]
    pub niche_priority: Vec<String>,
}

impl WireConfig {
    /// Country names with their city lists, in server order. Countries with
    /// malformed city payloads come through with no cities.
    pub fn country_entries(&self) -> Vec<(String, Vec<String>)> {
        self.countries
            .iter()
            .map(|(name, value)| {
                let cities = value
                    .get("cities")
                    .and_then(Value::as_array)
                    .map(|list| {
                        list.iter()
                            .filter_map(Value::as_str)
                            .map(str::to_string)
                            .collect()
                    })
                    .unwrap_or_default();
                (name.clone(), cities)
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SheetsResponse {
    #[serde(default)]
    pub sheets: Vec<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WireTabStats {
    #[serde(default)]
    pub tab: String,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub emailed: u64,
    #[serde(default)]
    pub pending: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StatsResponse {
    #[serde(default)]
    pub stats: Vec<WireTabStats>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("websocket error: {0}")]
    WebSocket(String),
    #[error("protocol error: {0}")]
    Protocol(String),
    #[error("backend error: {0}")]
    Backend(String),
}
