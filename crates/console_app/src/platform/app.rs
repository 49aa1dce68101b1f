use std::io::{self, BufRead, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;

use anyhow::Context;
use console_core::{update, AppState, AppViewModel, JobPanelView, Msg, Severity, StepState};
use console_transport::{BackendClient, TransportMode};

use super::console::{self, ConsoleCommand};
use super::effects::EffectRunner;

pub struct AppConfig {
    pub base_url: String,
    pub mode: TransportMode,
}

const STEP_LABELS: [&str; 5] = ["Scrape", "Qualify", "Dedup", "Sheet", "Email"];
const LOG_TAIL: usize = 8;

/// Blocking message loop: stdin commands and transport events feed the same
/// channel, the pure update function folds them into state, and a dirty
/// state triggers a full redraw.
pub fn run_app(config: AppConfig) -> anyhow::Result<()> {
    let client = BackendClient::new(&config.base_url).context("building backend client")?;
    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let effects = EffectRunner::new(client, config.mode, msg_tx.clone());

    let quit = Arc::new(AtomicBool::new(false));
    spawn_input_thread(msg_tx.clone(), quit.clone());

    println!("lead-gen console connected to {}", config.base_url);
    println!("type 'help' for commands");

    let mut state = AppState::new();
    msg_tx
        .send(Msg::Booted)
        .context("priming the message loop")?;

    while !quit.load(Ordering::SeqCst) {
        let msg = match msg_rx.recv() {
            Ok(msg) => msg,
            Err(_) => break,
        };
        let (next, pending) = update(state, msg);
        state = next;
        effects.enqueue(pending);
        if state.consume_dirty() {
            render(&state.view());
        }
    }

    Ok(())
}

/// Reads stdin line by line until quit or EOF. Sends a `NoOp` on quit so the
/// blocked main loop wakes up and observes the flag.
fn spawn_input_thread(msg_tx: mpsc::Sender<Msg>, quit: Arc<AtomicBool>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            match console::parse_line(&line) {
                ConsoleCommand::Dispatch(msg) => {
                    if msg_tx.send(msg).is_err() {
                        return;
                    }
                }
                ConsoleCommand::Help => println!("{}", console::HELP_TEXT),
                ConsoleCommand::Quit => break,
                ConsoleCommand::Unknown(input) => {
                    if !input.is_empty() {
                        println!("unrecognized command: {input} (try 'help')");
                    }
                }
            }
        }
        quit.store(true, Ordering::SeqCst);
        let _ = msg_tx.send(Msg::NoOp);
    });
}

fn render(view: &AppViewModel) {
    let mut out = String::new();

    out.push_str("\n================ lead-gen monitor ================\n");

    for notice in &view.notifications {
        if !notice.visible {
            continue;
        }
        let tag = match notice.severity {
            Severity::Info => "info",
            Severity::Success => "ok",
            Severity::Error => "error",
        };
        out.push_str(&format!("[{tag}] {}\n", notice.message));
    }

    out.push_str(&format!(
        "\npipeline [{:?}]  country={:?} city={:?} niche={:?} emails={}\n",
        view.pipeline.status,
        view.pipeline_form.country,
        view.pipeline_form.city,
        view.pipeline_form.niche,
        if view.pipeline_form.send_emails { "on" } else { "off" },
    ));
    out.push_str(&format!("  steps: {}\n", step_line(&view.pipeline.steps)));
    push_panel(&mut out, &view.pipeline);

    out.push_str(&format!(
        "\nemail [{:?}]  tab={:?}\n",
        view.email.status, view.email_form.sheet_tab,
    ));
    push_panel(&mut out, &view.email);

    if !view.stats.is_empty() {
        out.push_str("\nsheet stats (total / emailed / pending):\n");
        for row in &view.stats {
            out.push_str(&format!(
                "  {:<24} {:>6} / {:>6} / {:>6}\n",
                row.tab, row.total, row.emailed, row.pending
            ));
        }
    }

    print!("{out}");
    let _ = io::stdout().flush();
}

fn step_line(steps: &[StepState]) -> String {
    steps
        .iter()
        .zip(STEP_LABELS)
        .map(|(state, label)| match state {
            StepState::Completed => format!("[x] {label}"),
            StepState::Active => format!("[>] {label}"),
            StepState::Pending => format!("[ ] {label}"),
        })
        .collect::<Vec<_>>()
        .join("  ")
}

fn push_panel(out: &mut String, panel: &JobPanelView) {
    let skip = panel.logs.len().saturating_sub(LOG_TAIL);
    for entry in &panel.logs[skip..] {
        out.push_str(&format!(
            "  {} {:>7?} {}\n",
            entry.ts, entry.level, entry.message
        ));
    }
    if let Some(result) = &panel.result {
        let s = &result.summary;
        out.push_str(&format!(
            "  => {:?}: {} (scraped {}, qualified {}, deduped {}, added {}, emailed {})\n",
            result.status,
            result.message,
            s.scraped,
            s.qualified,
            s.duplicates_removed,
            s.added_to_sheet,
            s.emails_sent
        ));
    }
}
