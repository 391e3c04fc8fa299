//! # incident-replay
//!
//! Replays a JSON scenario (positions, submissions, votes, verifications)
//! through an in-memory reporting session and prints the resulting report.

mod scenario;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use configs::{LoggingSettings, Settings};
use services::{ReportingSession, SessionPolicies};
use storage_adapters::InMemoryIncidentRepository;
use tracing_subscriber::EnvFilter;

use crate::scenario::{replay, Scenario};

#[derive(Debug, Parser)]
#[command(name = "incident-replay", version, about = "Replay an incident scenario and print the report")]
struct Cli {
    /// Scenario JSON file.
    scenario: PathBuf,

    /// Settings file (toml/yaml/json). Defaults to config/incidents.*
    #[arg(long, env = "INCIDENTS_CONFIG")]
    config: Option<String>,

    /// Force JSON log lines regardless of settings.
    #[arg(long)]
    json_logs: bool,

    /// Pretty-print the report.
    #[arg(long)]
    pretty: bool,
}

fn init_tracing(logging: &LoggingSettings, force_json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(logging.level.as_str()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if logging.json || force_json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = match cli.config.as_deref() {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    }
    .context("loading settings")?;
    init_tracing(&settings.logging, cli.json_logs);

    let raw = std::fs::read_to_string(&cli.scenario)
        .with_context(|| format!("reading scenario {}", cli.scenario.display()))?;
    let scenario = Scenario::from_json(&raw)?;
    tracing::info!(steps = scenario.steps.len(), path = %cli.scenario.display(), "replaying scenario");

    let policies = SessionPolicies {
        verification: settings.verification,
        clustering: settings.clustering,
        heatmap: settings.heatmap,
        catalog: settings.catalog,
    };
    let session = ReportingSession::new(InMemoryIncidentRepository::new(), policies);
    let report = replay(session, scenario);

    let rendered = if cli.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{rendered}");
    Ok(())
}
