//! Line-oriented command surface read from stdin.
//!
//! Each input line maps to at most one core message, so the parser stays a
//! pure function over the line text and is easy to test.

use console_core::{JobKind, Msg};

#[derive(Debug, PartialEq)]
pub enum ConsoleCommand {
    Dispatch(Msg),
    Quit,
    Help,
    Unknown(String),
}

pub const HELP_TEXT: &str = "\
commands:
  start pipeline | start email   launch a job
  stop pipeline | stop email     request cooperative cancellation
  country <name>                 set the pipeline country
  city <name>                    set the pipeline city
  niche <name>                   set the pipeline niche
  emails on | emails off         toggle outreach emails after scraping
  tab <name>                     pick the sheet tab for the email job
  refresh                        reload config, sheets, and dashboard stats
  help                           show this text
  quit                           exit";

/// Parses a single input line. Whitespace-only lines come back as
/// `Unknown("")` and the caller drops them silently.
pub fn parse_line(line: &str) -> ConsoleCommand {
    let trimmed = line.trim();
    let (verb, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (trimmed, ""),
    };

    match verb.to_ascii_lowercase().as_str() {
        "start" => match job_kind(rest) {
            Some(kind) => ConsoleCommand::Dispatch(Msg::StartClicked(kind)),
            None => ConsoleCommand::Unknown(trimmed.to_string()),
        },
        "stop" => match job_kind(rest) {
            Some(kind) => ConsoleCommand::Dispatch(Msg::StopClicked(kind)),
            None => ConsoleCommand::Unknown(trimmed.to_string()),
        },
        "country" if !rest.is_empty() => {
            ConsoleCommand::Dispatch(Msg::CountrySelected(rest.to_string()))
        }
        "city" => ConsoleCommand::Dispatch(Msg::CityEdited(rest.to_string())),
        "niche" if !rest.is_empty() => {
            ConsoleCommand::Dispatch(Msg::NicheSelected(rest.to_string()))
        }
        "emails" => match rest.to_ascii_lowercase().as_str() {
            "on" => ConsoleCommand::Dispatch(Msg::SendEmailsToggled(true)),
            "off" => ConsoleCommand::Dispatch(Msg::SendEmailsToggled(false)),
            _ => ConsoleCommand::Unknown(trimmed.to_string()),
        },
        "tab" if !rest.is_empty() => {
            ConsoleCommand::Dispatch(Msg::SheetTabSelected(rest.to_string()))
        }
        "refresh" => ConsoleCommand::Dispatch(Msg::Booted),
        "help" | "?" => ConsoleCommand::Help,
        "quit" | "exit" | "q" => ConsoleCommand::Quit,
        _ => ConsoleCommand::Unknown(trimmed.to_string()),
    }
}

fn job_kind(word: &str) -> Option<JobKind> {
    match word.to_ascii_lowercase().as_str() {
        "pipeline" => Some(JobKind::Pipeline),
        "email" => Some(JobKind::Email),
        _ => None,
    }
}
