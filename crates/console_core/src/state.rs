use crate::notify::{Notification, NotificationQueue};
use crate::validate::ValidationConfig;
use crate::view_model::AppViewModel;

/// The two independently launchable backend jobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobKind {
    Pipeline,
    Email,
}

impl JobKind {
    pub fn as_str(self) -> &'static str {
        match self {
            JobKind::Pipeline => "pipeline",
            JobKind::Email => "email",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JobStatus {
    #[default]
    Idle,
    Running,
    Completed,
    Error,
    Cancelled,
}

impl JobStatus {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            JobStatus::Completed | JobStatus::Error | JobStatus::Cancelled
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

/// One delivered progress line. Immutable once created; ordered by arrival.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub ts: String,
    pub level: LogLevel,
    pub message: String,
}

/// Counts reported by a terminal result payload.
///
/// Missing fields default to zero; the backend payload is not trusted to be
/// complete.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub scraped: u64,
    pub qualified: u64,
    pub duplicates_removed: u64,
    pub added_to_sheet: u64,
    pub emails_sent: u64,
}

/// The single terminal outcome of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    /// One of the terminal [`JobStatus`] values.
    pub status: JobStatus,
    pub summary: RunSummary,
    pub message: String,
}

/// Per-kind job state: status, accumulated logs, inferred step, and result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobSession {
    pub kind: JobKind,
    pub status: JobStatus,
    pub logs: Vec<LogEntry>,
    /// Inferred pipeline step, `-1` before the first run.
    pub current_step: i32,
    /// Whether the active run asked the pipeline to also send emails.
    pub send_emails_requested: bool,
    pub result: Option<RunOutcome>,
}

impl JobSession {
    fn new(kind: JobKind) -> Self {
        Self {
            kind,
            status: JobStatus::Idle,
            logs: Vec::new(),
            current_step: -1,
            send_emails_requested: false,
            result: None,
        }
    }

    /// Resets the session for a freshly accepted start.
    pub(crate) fn begin_run(&mut self, send_emails: bool) {
        self.logs.clear();
        self.result = None;
        self.current_step = 0;
        self.send_emails_requested = send_emails;
        self.status = JobStatus::Running;
    }
}

/// One dashboard row from the stats aggregator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabStats {
    pub tab: String,
    pub total: u64,
    pub emailed: u64,
    pub pending: u64,
}

/// Pipeline start form fields as currently entered.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PipelineForm {
    pub country: String,
    pub city: String,
    pub niche: String,
    pub send_emails: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EmailForm {
    pub sheet_tab: String,
}

/// Whole-application state: one session per job kind, the notification
/// queue, and the read-only configuration snapshot. Passed explicitly,
/// never ambient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pipeline: JobSession,
    email: JobSession,
    notifications: NotificationQueue,
    config: ValidationConfig,
    sheets: Vec<String>,
    stats: Vec<TabStats>,
    pipeline_form: PipelineForm,
    email_form: EmailForm,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            pipeline: JobSession::new(JobKind::Pipeline),
            email: JobSession::new(JobKind::Email),
            notifications: NotificationQueue::default(),
            config: ValidationConfig::default(),
            sheets: Vec::new(),
            stats: Vec::new(),
            pipeline_form: PipelineForm::default(),
            email_form: EmailForm::default(),
            dirty: false,
        }
    }

    pub fn session(&self, kind: JobKind) -> &JobSession {
        match kind {
            JobKind::Pipeline => &self.pipeline,
            JobKind::Email => &self.email,
        }
    }

    pub(crate) fn session_mut(&mut self, kind: JobKind) -> &mut JobSession {
        match kind {
            JobKind::Pipeline => &mut self.pipeline,
            JobKind::Email => &mut self.email,
        }
    }

    pub fn notifications(&self) -> &[Notification] {
        self.notifications.entries()
    }

    pub(crate) fn notifications_mut(&mut self) -> &mut NotificationQueue {
        &mut self.notifications
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    pub(crate) fn set_config(&mut self, config: ValidationConfig) {
        self.config = config;
    }

    pub fn sheets(&self) -> &[String] {
        &self.sheets
    }

    pub(crate) fn set_sheets(&mut self, sheets: Vec<String>) {
        self.sheets = sheets;
    }

    pub(crate) fn set_stats(&mut self, stats: Vec<TabStats>) {
        self.stats = stats;
    }

    pub fn pipeline_form(&self) -> &PipelineForm {
        &self.pipeline_form
    }

    pub(crate) fn pipeline_form_mut(&mut self) -> &mut PipelineForm {
        &mut self.pipeline_form
    }

    pub fn email_form(&self) -> &EmailForm {
        &self.email_form
    }

    pub(crate) fn email_form_mut(&mut self) -> &mut EmailForm {
        &mut self.email_form
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel::build(
            &self.pipeline,
            &self.email,
            self.notifications.entries(),
            &self.config,
            &self.sheets,
            &self.stats,
            &self.pipeline_form,
            &self.email_form,
            self.dirty,
        )
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Returns whether a render is due and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}
