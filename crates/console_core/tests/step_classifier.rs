use console_core::{classify_step, step_state, StepState, STEP_COUNT};

#[test]
fn classifies_known_markers() {
    assert_eq!(classify_step("Scraping: Lagos restaurants"), Some(0));
    assert_eq!(classify_step("Pipeline targets: 9 city+niche combinations"), Some(0));
    assert_eq!(classify_step("Qualifying businesses..."), Some(1));
    assert_eq!(classify_step("Deduplicating against tracker"), Some(2));
    assert_eq!(classify_step("Writing leads to Google Sheets..."), Some(3));
    assert_eq!(classify_step("Appended 14 rows"), Some(3));
    assert_eq!(classify_step("Sending outreach emails..."), Some(4));
}

#[test]
fn classification_is_case_insensitive() {
    assert_eq!(classify_step("SCRAPING: dentists in Leeds"), Some(0));
    assert_eq!(classify_step("deduplicating AGAINST tracker"), Some(2));
}

#[test]
fn unrelated_lines_do_not_classify() {
    assert_eq!(classify_step("nothing relevant"), None);
    assert_eq!(classify_step(""), None);
    assert_eq!(classify_step("scraping without the colon"), None);
}

#[test]
fn step_state_table() {
    // current_step = 2: earlier completed, equal active, later pending.
    assert_eq!(step_state(1, 2), StepState::Completed);
    assert_eq!(step_state(2, 2), StepState::Active);
    assert_eq!(step_state(3, 2), StepState::Pending);
}

#[test]
fn step_state_all_pending_before_first_run() {
    for step in 0..STEP_COUNT {
        assert_eq!(step_state(step, -1), StepState::Pending);
    }
}

#[test]
fn step_state_past_last_step_marks_everything_completed() {
    for step in 0..STEP_COUNT {
        assert_eq!(step_state(step, 5), StepState::Completed);
    }
}
