//! Mapping between the transport crate's wire types and the core's domain
//! types. The two crates deliberately do not know about each other.

use chrono::Local;
use console_core::{JobKind, JobStatus, LogEntry, LogLevel, Msg, RunOutcome, RunSummary, TabStats};
use console_transport::{Job, TransportEvent, WireLog, WireOutcome, WireResult, WireTabStats};

pub fn job_of(kind: JobKind) -> Job {
    match kind {
        JobKind::Pipeline => Job::Pipeline,
        JobKind::Email => Job::Email,
    }
}

pub fn kind_of(job: Job) -> JobKind {
    match job {
        Job::Pipeline => JobKind::Pipeline,
        Job::Email => JobKind::Email,
    }
}

/// Wall-clock fallback for entries the backend did not timestamp.
pub fn now_ts() -> String {
    Local::now().format("%H:%M:%S").to_string()
}

fn level_of(raw: &str) -> LogLevel {
    match raw.to_ascii_uppercase().as_str() {
        "DEBUG" => LogLevel::Debug,
        "WARNING" | "WARN" => LogLevel::Warning,
        "ERROR" | "CRITICAL" => LogLevel::Error,
        _ => LogLevel::Info,
    }
}

fn log_entry(wire: WireLog) -> LogEntry {
    LogEntry {
        ts: if wire.ts.is_empty() { now_ts() } else { wire.ts },
        level: level_of(&wire.level),
        message: wire.message,
    }
}

fn status_of(outcome: WireOutcome) -> JobStatus {
    match outcome {
        WireOutcome::Completed => JobStatus::Completed,
        WireOutcome::Error => JobStatus::Error,
        WireOutcome::Cancelled => JobStatus::Cancelled,
    }
}

fn outcome_of(result: WireResult) -> RunOutcome {
    let counts = result.counts();
    RunOutcome {
        status: status_of(result.status),
        summary: RunSummary {
            scraped: counts.scraped,
            qualified: counts.qualified,
            duplicates_removed: counts.duplicates_removed,
            added_to_sheet: counts.added_to_sheet,
            emails_sent: counts.emails_sent,
        },
        message: result.message,
    }
}

pub fn stats_row(wire: WireTabStats) -> TabStats {
    TabStats {
        tab: wire.tab,
        total: wire.total,
        emailed: wire.emailed,
        pending: wire.pending,
    }
}

/// One transport event becomes exactly one core message.
pub fn event_msg(job: Job, event: TransportEvent) -> Msg {
    let kind = kind_of(job);
    match event {
        TransportEvent::Rejected { message } => Msg::StartRejected { kind, message },
        TransportEvent::Log(entry) => Msg::LogReceived {
            kind,
            entry: log_entry(entry),
        },
        TransportEvent::Status { message } => Msg::StatusNote {
            kind,
            message,
            ts: now_ts(),
        },
        TransportEvent::Result(result) => Msg::ResultReceived {
            kind,
            outcome: outcome_of(result),
        },
        TransportEvent::Closed => Msg::TransportClosed { kind },
    }
}
