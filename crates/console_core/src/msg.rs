use crate::{JobKind, LogEntry, RunOutcome, TabStats, ValidationConfig};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Application started; triggers the startup fetches.
    Booted,
    /// Configuration snapshot arrived.
    ConfigLoaded(ValidationConfig),
    ConfigLoadFailed(String),
    /// Sheet tab listing arrived.
    SheetsListed(Vec<String>),
    SheetsListFailed(String),
    /// Dashboard stats arrived.
    StatsRefreshed(Vec<TabStats>),
    StatsRefreshFailed(String),
    /// User picked a country; clears any previously chosen city.
    CountrySelected(String),
    /// User edited the city input.
    CityEdited(String),
    NicheSelected(String),
    SendEmailsToggled(bool),
    SheetTabSelected(String),
    /// User clicked Start for a job kind.
    StartClicked(JobKind),
    /// User clicked Stop for a job kind.
    StopClicked(JobKind),
    /// Backend refused the start request.
    StartRejected { kind: JobKind, message: String },
    /// Transport delivered one progress line.
    LogReceived { kind: JobKind, entry: LogEntry },
    /// Synthetic informational line not originating from the job's own log
    /// stream.
    StatusNote {
        kind: JobKind,
        message: String,
        ts: String,
    },
    /// Transport delivered the terminal result.
    ResultReceived { kind: JobKind, outcome: RunOutcome },
    /// Transport went away without delivering a result.
    TransportClosed { kind: JobKind },
    /// Notification fade timer fired.
    NotificationFaded(u64),
    /// Notification removal timer fired.
    NotificationExpired(u64),
    /// Fallback for placeholder wiring.
    NoOp,
}
