//! Heuristic progress-stage inference from free-text log lines.
//!
//! The backend emits no structured stage field, so the pipeline panel infers
//! its progress from the wording of log messages. The rule table is data, not
//! branching logic, so it can be tested and extended on its own.

/// Number of pipeline steps that can be inferred from log text.
///
/// A completed run with email sending lands one past this (step 5).
pub const STEP_COUNT: usize = 5;

struct StepRule {
    step: usize,
    triggers: &'static [&'static str],
}

// Evaluated top to bottom; the first matching rule wins. Triggers mirror the
// backend orchestrator's log wording and are matched case-insensitively.
const STEP_RULES: &[StepRule] = &[
    StepRule {
        step: 0,
        triggers: &["scraping:", "pipeline targets"],
    },
    StepRule {
        step: 1,
        triggers: &["qualifying businesses"],
    },
    StepRule {
        step: 2,
        triggers: &["deduplicating against"],
    },
    StepRule {
        step: 3,
        triggers: &["writing leads to google", "appended"],
    },
    StepRule {
        step: 4,
        triggers: &["sending outreach emails"],
    },
];

/// Maps a log message to a pipeline step, or `None` when no rule matches.
///
/// This is a heuristic: if the backend wording changes, a line simply stops
/// matching and the step display lags until a later marker appears.
pub fn classify_step(message: &str) -> Option<usize> {
    let haystack = message.to_lowercase();
    STEP_RULES
        .iter()
        .find(|rule| rule.triggers.iter().any(|t| haystack.contains(t)))
        .map(|rule| rule.step)
}

/// Display state of a single step indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepState {
    Completed,
    Active,
    Pending,
}

/// Pure mapping from (step, current step) to its display state.
///
/// `current_step < 0` means the run has not started; every step is pending.
pub fn step_state(step: usize, current_step: i32) -> StepState {
    if current_step < 0 {
        return StepState::Pending;
    }
    let current = current_step as usize;
    if step < current {
        StepState::Completed
    } else if step == current {
        StepState::Active
    } else {
        StepState::Pending
    }
}
