use std::sync::Once;

use console_core::{
    update, AppState, CountryEntry, Effect, JobKind, JobStatus, Msg, Severity, StartParams,
    ValidationConfig,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(console_logging::initialize_for_tests);
}

fn nigeria_config() -> ValidationConfig {
    ValidationConfig::new(
        vec![
            CountryEntry {
                name: "Nigeria".to_string(),
                cities: vec!["Lagos".to_string(), "Abuja".to_string()],
            },
            CountryEntry {
                name: "UK".to_string(),
                cities: vec!["Leeds".to_string()],
            },
        ],
        vec!["restaurants".to_string(), "dentists".to_string()],
        vec!["restaurants".to_string()],
    )
}

fn with_config(state: AppState) -> AppState {
    update(state, Msg::ConfigLoaded(nigeria_config())).0
}

#[test]
fn lookups_are_case_insensitive() {
    let config = nigeria_config();
    assert!(config.is_known_country("nigeria"));
    assert!(config.is_known_city("NIGERIA", "lagos"));
    assert!(!config.is_known_city("UK", "Lagos"));
    assert!(config.is_known_niche("Dentists"));
    assert_eq!(config.find_country_for_city(" lagos "), Some("Nigeria"));
    assert_eq!(config.find_country_for_city("Paris"), None);
}

#[test]
fn city_without_country_is_reverse_looked_up_before_dispatch() {
    init_logging();
    let state = with_config(AppState::new());
    let (state, _) = update(state, Msg::CityEdited("Lagos".to_string()));

    let (state, effects) = update(state, Msg::StartClicked(JobKind::Pipeline));

    assert_eq!(
        effects,
        vec![Effect::StartJob {
            kind: JobKind::Pipeline,
            params: StartParams::Pipeline {
                country: Some("Nigeria".to_string()),
                city: Some("Lagos".to_string()),
                niche: None,
                send_emails: false,
            },
        }]
    );
    // The fill-in is reflected in the form as well.
    assert_eq!(state.pipeline_form().country, "Nigeria");
}

#[test]
fn unknown_city_without_country_is_rejected_not_dispatched() {
    init_logging();
    let state = with_config(AppState::new());
    let (state, _) = update(state, Msg::CityEdited("Atlantis".to_string()));

    let (state, effects) = update(state, Msg::StartClicked(JobKind::Pipeline));

    assert_eq!(state.session(JobKind::Pipeline).status, JobStatus::Idle);
    assert!(!effects
        .iter()
        .any(|e| matches!(e, Effect::StartJob { .. })));
    let notice = state.notifications().last().unwrap();
    assert_eq!(notice.severity, Severity::Error);
    assert!(notice.message.contains("Atlantis"));
}

#[test]
fn selecting_a_country_clears_the_city() {
    init_logging();
    let state = with_config(AppState::new());
    let (state, _) = update(state, Msg::CityEdited("Lagos".to_string()));
    let (state, _) = update(state, Msg::CountrySelected("UK".to_string()));

    assert_eq!(state.pipeline_form().country, "UK");
    assert!(state.pipeline_form().city.is_empty());
}

#[test]
fn config_load_failure_keeps_defaults_and_notifies() {
    init_logging();
    let state = AppState::new();
    let (state, effects) = update(state, Msg::ConfigLoadFailed("backend down".to_string()));

    assert!(state.config().countries().is_empty());
    assert_eq!(effects.len(), 2); // notice timers only
    let notice = state.notifications().last().unwrap();
    assert!(notice.message.contains("backend down"));
}

#[test]
fn boot_requests_the_startup_fetches() {
    init_logging();
    let (_, effects) = update(AppState::new(), Msg::Booted);
    assert_eq!(
        effects,
        vec![Effect::LoadConfig, Effect::ListSheets, Effect::RefreshStats]
    );
}
