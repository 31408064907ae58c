mod config;
mod console;
mod render;

use std::{path::PathBuf, sync::Arc};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    DecisionSession, HttpTransport, PresentationController, ProjectionBuilder, ScenarioField,
    ScenarioState, View,
};
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "disaster-dss", about = "Disaster risk decision support client")]
struct Cli {
    /// Config file; defaults to ./dss.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Prediction endpoint, overriding config and environment.
    #[arg(long)]
    endpoint: Option<String>,
    #[arg(long)]
    timeout_ms: Option<u64>,
    /// Print the view as JSON instead of the text screen.
    #[arg(long)]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run one analysis and print the result.
    Predict {
        #[arg(long)]
        disaster_type: Option<String>,
        #[arg(long)]
        events: Option<u64>,
    },
    /// Edit the scenario and submit repeatedly from stdin.
    Interactive,
    /// List the supported disaster categories.
    Types,
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    if let Commands::Types = cli.command {
        print!("{}", render::render_disaster_types());
        return Ok(());
    }

    let mut settings = config::load_settings(cli.config.as_deref())?;
    if let Some(endpoint) = cli.endpoint {
        settings.endpoint = endpoint;
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        settings.request_timeout_ms = timeout_ms;
    }
    settings.validate()?;
    info!(endpoint = %settings.endpoint, timeout_ms = settings.request_timeout_ms, "settings loaded");

    let transport = HttpTransport::new(settings.endpoint.clone());
    let mut session = DecisionSession::new(
        ScenarioState::new(settings.initial_scenario()),
        Arc::new(transport),
        settings.submit_policy(),
        PresentationController::new(ProjectionBuilder::new(settings.unit_rule())),
    );

    match cli.command {
        Commands::Predict {
            disaster_type,
            events,
        } => {
            if let Some(value) = disaster_type {
                session
                    .scenario_mut()
                    .set_field(ScenarioField::DisasterType, &value)?;
            }
            if let Some(count) = events {
                session.scenario_mut().set_event_count(count);
            }
            session.submit().await;

            let view = session.view();
            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&view).context("failed to encode view")?
                );
            } else {
                print!("{}", render::render_screen(session.scenario().input(), &view));
            }
            if let View::Error { message, .. } = view {
                bail!("{message}");
            }
        }
        Commands::Interactive => {
            let stdin = BufReader::new(tokio::io::stdin());
            console::run(&mut session, stdin).await?;
        }
        Commands::Types => {}
    }

    Ok(())
}
