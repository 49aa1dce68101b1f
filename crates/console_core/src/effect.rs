use std::time::Duration;

use crate::{JobKind, Msg};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fetch the configuration snapshot.
    LoadConfig,
    /// Fetch the sheet tab listing.
    ListSheets,
    /// Fetch the dashboard stats.
    RefreshStats,
    /// Start a job through the active transport.
    StartJob { kind: JobKind, params: StartParams },
    /// Best-effort backend cancellation request.
    StopJob { kind: JobKind },
    /// Deliver `msg` back to the update loop after `after` has elapsed.
    Schedule { after: Duration, msg: Box<Msg> },
}

impl Effect {
    pub fn schedule(after: Duration, msg: Msg) -> Self {
        Effect::Schedule {
            after,
            msg: Box::new(msg),
        }
    }
}

/// Start parameters as entered in the relevant form, empty fields omitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartParams {
    Pipeline {
        country: Option<String>,
        city: Option<String>,
        niche: Option<String>,
        send_emails: bool,
    },
    Email {
        sheet_tab: Option<String>,
    },
}
