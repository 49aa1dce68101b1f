//! Console core: pure job-monitor state machine and view-model helpers.
mod classify;
mod effect;
mod msg;
mod notify;
mod state;
mod update;
mod validate;
mod view_model;

pub use classify::{classify_step, step_state, StepState, STEP_COUNT};
pub use effect::{Effect, StartParams};
pub use msg::Msg;
pub use notify::{Notification, NotificationQueue, Severity, FADE_AFTER, EXPIRE_AFTER};
pub use state::{
    AppState, EmailForm, JobKind, JobSession, JobStatus, LogEntry, LogLevel, PipelineForm,
    RunOutcome, RunSummary, TabStats,
};
pub use update::update;
pub use validate::{resolve_start_fields, CountryEntry, ValidationConfig};
pub use view_model::{AppViewModel, JobPanelView};
