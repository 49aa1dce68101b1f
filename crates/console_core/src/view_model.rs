use crate::notify::Notification;
use crate::state::{EmailForm, JobKind, JobSession, JobStatus, LogEntry, PipelineForm, RunOutcome, TabStats};
use crate::validate::ValidationConfig;
use crate::{step_state, StepState, STEP_COUNT};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppViewModel {
    pub pipeline: JobPanelView,
    pub email: JobPanelView,
    pub notifications: Vec<Notification>,
    pub countries: Vec<String>,
    pub niches: Vec<String>,
    pub sheets: Vec<String>,
    pub stats: Vec<TabStats>,
    pub pipeline_form: PipelineForm,
    pub email_form: EmailForm,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobPanelView {
    pub status: JobStatus,
    pub logs: Vec<LogEntry>,
    /// Step indicator states; empty for the email panel.
    pub steps: Vec<StepState>,
    /// Cue for the display layer to keep the newest log line in view.
    pub follow_log: bool,
    pub result: Option<RunOutcome>,
}

impl JobPanelView {
    fn from_session(session: &JobSession) -> Self {
        let steps = if session.kind == JobKind::Pipeline {
            (0..STEP_COUNT)
                .map(|step| step_state(step, session.current_step))
                .collect()
        } else {
            Vec::new()
        };
        Self {
            status: session.status,
            logs: session.logs.clone(),
            steps,
            follow_log: session.kind == JobKind::Pipeline
                && session.status == JobStatus::Running
                && !session.logs.is_empty(),
            result: session.result.clone(),
        }
    }
}

impl AppViewModel {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn build(
        pipeline: &JobSession,
        email: &JobSession,
        notifications: &[Notification],
        config: &ValidationConfig,
        sheets: &[String],
        stats: &[TabStats],
        pipeline_form: &PipelineForm,
        email_form: &EmailForm,
        dirty: bool,
    ) -> Self {
        Self {
            pipeline: JobPanelView::from_session(pipeline),
            email: JobPanelView::from_session(email),
            notifications: notifications.to_vec(),
            countries: config
                .countries()
                .iter()
                .map(|c| c.name.clone())
                .collect(),
            niches: config.niches().to_vec(),
            sheets: sheets.to_vec(),
            stats: stats.to_vec(),
            pipeline_form: pipeline_form.clone(),
            email_form: email_form.clone(),
            dirty,
        }
    }
}
