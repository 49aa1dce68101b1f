use crate::validate::resolve_start_fields;
use crate::{
    classify_step, AppState, Effect, JobKind, JobStatus, LogEntry, LogLevel, Msg,
    RunOutcome, Severity, StartParams,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Booted => vec![Effect::LoadConfig, Effect::ListSheets, Effect::RefreshStats],
        Msg::ConfigLoaded(config) => {
            state.set_config(config);
            state.mark_dirty();
            Vec::new()
        }
        Msg::ConfigLoadFailed(err) => push_notice(
            &mut state,
            format!("Failed to load configuration: {err}"),
            Severity::Error,
        ),
        Msg::SheetsListed(sheets) => {
            state.set_sheets(sheets);
            state.mark_dirty();
            Vec::new()
        }
        Msg::SheetsListFailed(err) => push_notice(
            &mut state,
            format!("Failed to list sheet tabs: {err}"),
            Severity::Error,
        ),
        Msg::StatsRefreshed(stats) => {
            state.set_stats(stats);
            state.mark_dirty();
            Vec::new()
        }
        Msg::StatsRefreshFailed(err) => push_notice(
            &mut state,
            format!("Failed to refresh stats: {err}"),
            Severity::Error,
        ),
        Msg::CountrySelected(country) => {
            let form = state.pipeline_form_mut();
            form.country = country;
            // City suggestions are country-scoped; a stale city would pair
            // with the wrong country.
            form.city.clear();
            state.mark_dirty();
            Vec::new()
        }
        Msg::CityEdited(city) => {
            state.pipeline_form_mut().city = city;
            state.mark_dirty();
            Vec::new()
        }
        Msg::NicheSelected(niche) => {
            state.pipeline_form_mut().niche = niche;
            state.mark_dirty();
            Vec::new()
        }
        Msg::SendEmailsToggled(on) => {
            state.pipeline_form_mut().send_emails = on;
            state.mark_dirty();
            Vec::new()
        }
        Msg::SheetTabSelected(tab) => {
            state.email_form_mut().sheet_tab = tab;
            state.mark_dirty();
            Vec::new()
        }
        Msg::StartClicked(kind) => start_clicked(&mut state, kind),
        Msg::StopClicked(kind) => {
            if state.session(kind).status == JobStatus::Running {
                vec![Effect::StopJob { kind }]
            } else {
                Vec::new()
            }
        }
        Msg::StartRejected { kind, message } => {
            if state.session(kind).status == JobStatus::Running {
                state.session_mut(kind).status = JobStatus::Idle;
            }
            state.mark_dirty();
            push_notice(
                &mut state,
                format!("Could not start {} job: {message}", kind.as_str()),
                Severity::Error,
            )
        }
        Msg::LogReceived { kind, entry } => {
            apply_log(&mut state, kind, entry);
            Vec::new()
        }
        Msg::StatusNote { kind, message, ts } => {
            apply_log(
                &mut state,
                kind,
                LogEntry {
                    ts,
                    level: LogLevel::Info,
                    message,
                },
            );
            Vec::new()
        }
        Msg::ResultReceived { kind, outcome } => result_received(&mut state, kind, outcome),
        Msg::TransportClosed { kind } => {
            // Streaming disconnects carry no result; the session drops back
            // to idle rather than inventing a terminal error.
            if state.session(kind).status == JobStatus::Running {
                state.session_mut(kind).status = JobStatus::Idle;
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::NotificationFaded(seq) => {
            if state.notifications_mut().fade(seq) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::NotificationExpired(seq) => {
            if state.notifications_mut().expire(seq) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

/// Enqueues a notification plus its fade and removal timers.
fn push_notice(state: &mut AppState, message: String, severity: Severity) -> Vec<Effect> {
    let seq = state.notifications_mut().enqueue(message, severity);
    state.mark_dirty();
    vec![
        Effect::schedule(crate::FADE_AFTER, Msg::NotificationFaded(seq)),
        Effect::schedule(crate::EXPIRE_AFTER, Msg::NotificationExpired(seq)),
    ]
}

fn start_clicked(state: &mut AppState, kind: JobKind) -> Vec<Effect> {
    if state.session(kind).status == JobStatus::Running {
        return push_notice(
            state,
            format!("A {} run is already in progress.", kind.as_str()),
            Severity::Info,
        );
    }

    let (params, send_emails) = match kind {
        JobKind::Pipeline => {
            let form = state.pipeline_form().clone();
            let (country, city) =
                match resolve_start_fields(&form.country, &form.city, state.config()) {
                    Ok(fields) => fields,
                    Err(message) => return push_notice(state, message, Severity::Error),
                };
            // Surface a successful reverse lookup in the form itself.
            if let Some(found) = country.as_deref() {
                if form.country.trim().is_empty() {
                    state.pipeline_form_mut().country = found.to_string();
                }
            }
            let niche = form.niche.trim();
            (
                StartParams::Pipeline {
                    country,
                    city,
                    niche: (!niche.is_empty()).then(|| niche.to_string()),
                    send_emails: form.send_emails,
                },
                form.send_emails,
            )
        }
        JobKind::Email => {
            let tab = state.email_form().sheet_tab.trim().to_string();
            (
                StartParams::Email {
                    sheet_tab: (!tab.is_empty()).then_some(tab),
                },
                false,
            )
        }
    };

    state.session_mut(kind).begin_run(send_emails);
    state.mark_dirty();
    vec![Effect::StartJob { kind, params }]
}

fn apply_log(state: &mut AppState, kind: JobKind, entry: LogEntry) {
    let session = state.session_mut(kind);
    // A torn-down adapter must not grow a finished session's log.
    if session.status != JobStatus::Running {
        return;
    }
    if let Some(step) = classify_step(&entry.message) {
        session.current_step = session.current_step.max(step as i32);
    }
    session.logs.push(entry);
    state.mark_dirty();
}

fn result_received(state: &mut AppState, kind: JobKind, outcome: RunOutcome) -> Vec<Effect> {
    if state.session(kind).status != JobStatus::Running || !outcome.status.is_terminal() {
        return Vec::new();
    }

    let session = state.session_mut(kind);
    session.status = outcome.status;
    if kind == JobKind::Pipeline && outcome.status == JobStatus::Completed {
        session.current_step = if session.send_emails_requested { 5 } else { 4 };
    }
    session.result = Some(outcome.clone());
    state.mark_dirty();

    let mut effects = push_notice(
        state,
        outcome_notice(kind, &outcome),
        outcome_severity(outcome.status),
    );
    if kind == JobKind::Email && outcome.status == JobStatus::Completed {
        effects.push(Effect::RefreshStats);
    }
    effects
}

fn outcome_severity(status: JobStatus) -> Severity {
    match status {
        JobStatus::Completed => Severity::Success,
        JobStatus::Error => Severity::Error,
        _ => Severity::Info,
    }
}

fn outcome_notice(kind: JobKind, outcome: &RunOutcome) -> String {
    let s = &outcome.summary;
    match (kind, outcome.status) {
        (JobKind::Pipeline, JobStatus::Completed) => format!(
            "Pipeline complete: {} scraped, {} qualified, {} added to sheet, {} emails sent.",
            s.scraped, s.qualified, s.added_to_sheet, s.emails_sent
        ),
        (JobKind::Email, JobStatus::Completed) => {
            format!("Email run complete: {} emails sent.", s.emails_sent)
        }
        (_, JobStatus::Cancelled) => format!("{} job cancelled.", kind.as_str()),
        _ => format!("{} job failed: {}", kind.as_str(), outcome.message),
    }
}
