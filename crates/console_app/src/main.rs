mod platform;

use console_transport::TransportMode;
use platform::app::AppConfig;
use platform::logging::LogDestination;

fn main() -> anyhow::Result<()> {
    // Keep stdout for the monitor display; logs go to ./console.log.
    platform::logging::initialize(LogDestination::File);

    let base_url = std::env::var("LEADGEN_BASE_URL")
        .unwrap_or_else(|_| "http://localhost:8000".to_string());
    let mode = match std::env::var("LEADGEN_TRANSPORT").as_deref() {
        Ok("streaming") => TransportMode::Streaming,
        _ => TransportMode::Polling,
    };

    platform::app::run_app(AppConfig { base_url, mode })
}
