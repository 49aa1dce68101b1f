use std::time::Duration;

use crate::types::{
    Job, PollResponse, SheetsResponse, StartAck, StartRequest, StatsResponse, TransportError,
    WireConfig,
};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Thin typed wrapper over the backend's REST surface.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Streaming channel URL for a job, with the http(s) scheme swapped to
    /// ws(s).
    pub fn ws_url(&self, job: Job) -> String {
        let base = if let Some(rest) = self.base_url.strip_prefix("https://") {
            format!("wss://{rest}")
        } else if let Some(rest) = self.base_url.strip_prefix("http://") {
            format!("ws://{rest}")
        } else {
            self.base_url.clone()
        };
        format!("{base}/ws/{job}")
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub async fn fetch_config(&self) -> Result<WireConfig, TransportError> {
        let response = self
            .http
            .get(self.url("/api/config"))
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }

    pub async fn list_sheets(&self) -> Result<SheetsResponse, TransportError> {
        let response = self
            .http
            .get(self.url("/api/sheets"))
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }

    pub async fn fetch_all_stats(&self) -> Result<StatsResponse, TransportError> {
        let response = self
            .http
            .get(self.url("/api/stats/all"))
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }

    /// Opaque per-tab stats object for the dashboard drill-down.
    pub async fn fetch_tab_status(&self, tab: &str) -> Result<serde_json::Value, TransportError> {
        let response = self
            .http
            .get(self.url(&format!("/api/status/{tab}")))
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }

    pub async fn start_job(
        &self,
        job: Job,
        params: &StartRequest,
    ) -> Result<StartAck, TransportError> {
        let response = self
            .http
            .post(self.url(&format!("/api/start/{job}")))
            .json(params)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }

    /// Fetch log entries past `cursor` for a running job.
    pub async fn poll_logs(&self, job: Job, cursor: u64) -> Result<PollResponse, TransportError> {
        let response = self
            .http
            .get(self.url(&format!("/api/logs/{job}")))
            .query(&[("since", cursor)])
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }

    /// Fire-and-forget cancellation request; the response body is ignored.
    pub async fn stop_job(&self, job: Job) -> Result<(), TransportError> {
        self.http
            .post(self.url(&format!("/api/stop/{job}")))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
