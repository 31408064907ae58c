//! Interactive single-screen session driven by line commands on stdin.

use anyhow::Result;
use client_core::{DecisionSession, RequestLifecycleState, ScenarioField, SubmitOutcome};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

use crate::render::{render_disaster_types, render_screen};

const HELP: &str = "\
commands:
  set <field> <value>   edit disasterType or eventCount
  submit                run the analysis
  show                  redraw the screen
  reset                 clear the last result or error
  types                 list disaster categories
  help                  this text
  quit                  leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Set { field: String, value: String },
    Submit,
    Show,
    Reset,
    Types,
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let command = match verb.to_ascii_lowercase().as_str() {
        "set" => {
            let (field, value) = rest
                .trim()
                .split_once(char::is_whitespace)
                .ok_or_else(|| "usage: set <field> <value>".to_string())?;
            Command::Set {
                field: field.to_string(),
                value: value.trim().to_string(),
            }
        }
        "submit" | "analyze" | "run" => Command::Submit,
        "show" => Command::Show,
        "reset" => Command::Reset,
        "types" => Command::Types,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(format!("unknown command '{other}'; type 'help'")),
    };
    Ok(Some(command))
}

pub async fn run<R>(session: &mut DecisionSession, input: R) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    println!("{}", render_screen(session.scenario().input(), &session.view()));
    println!("{HELP}");

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                println!("{message}");
                continue;
            }
        };
        debug!(?command, "console command");

        match command {
            Command::Set { field, value } => {
                let edited = field
                    .parse::<ScenarioField>()
                    .and_then(|field| session.scenario_mut().set_field(field, &value));
                match edited {
                    Ok(()) => println!("{}", render_screen(session.scenario().input(), &session.view())),
                    Err(err) => println!("{err}"),
                }
            }
            Command::Submit => submit_and_watch(session).await,
            Command::Show => {
                println!("{}", render_screen(session.scenario().input(), &session.view()))
            }
            Command::Reset => {
                session.orchestrator().reset();
                println!("{}", render_screen(session.scenario().input(), &session.view()));
            }
            Command::Types => print!("{}", render_disaster_types()),
            Command::Help => println!("{HELP}"),
            Command::Quit => break,
        }
    }
    Ok(())
}

/// Draws the loading screen as soon as the lifecycle enters it, then the
/// outcome once the request settles.
async fn submit_and_watch(session: &DecisionSession) {
    let mut updates = session.orchestrator().subscribe();
    updates.borrow_and_update();

    let submit = session.submit();
    tokio::pin!(submit);
    let outcome = loop {
        tokio::select! {
            biased;
            outcome = &mut submit => break outcome,
            changed = updates.changed() => {
                if changed.is_err() {
                    break (&mut submit).await;
                }
                let loading = matches!(updates.borrow_and_update().state, RequestLifecycleState::Loading);
                if loading {
                    println!("{}", render_screen(session.scenario().input(), &session.view()));
                }
            }
        }
    };

    if outcome == SubmitOutcome::Ignored {
        println!("A request is already in flight.");
        return;
    }
    println!("{}", render_screen(session.scenario().input(), &session.view()));
}

#[cfg(test)]
#[path = "tests/console_tests.rs"]
mod tests;
