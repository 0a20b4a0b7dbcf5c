//! Tactics encounter runner.
//!
//! Loads an encounter config and a scenario, lets the auto-pilot play the
//! party against the enemy policy, and prints every event plus a summary.
//!
//! # Examples
//!
//! ```bash
//! # Built-in dark forest, instant pacing, human-readable output
//! cargo run -p tactics-client
//!
//! # Custom scenario, JSON lines, wall-clock delays
//! cargo run -p tactics-client -- --scenario cave.ron --json --realtime
//! ```

mod cli;
mod config;
mod logging;
mod report;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tactics_content::{ConfigLoader, ScenarioLoader, TemplateCatalog, TemplateLoader};
use tactics_runtime::{AutoPilot, DriverOutcome, EncounterDriver, EventRecord, Pace, TracingListener};
use tokio::sync::Mutex;

use crate::cli::Cli;
use crate::config::ClientConfig;

const DEFAULT_SCENARIO: &str = "dark_forest";

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = ClientConfig::from_env().merge(Cli::parse());
    let _guard = logging::setup_logging(config.log_dir.as_deref())?;

    run(config).await
}

async fn run(config: ClientConfig) -> Result<()> {
    let encounter_config = match &config.config_path {
        Some(path) => ConfigLoader::load(path)?,
        None => ConfigLoader::builtin()?,
    };
    let catalog = match &config.templates_path {
        Some(path) => TemplateLoader::load_with_builtin(path)?,
        None => TemplateCatalog::builtin(),
    };
    let spec = match &config.scenario_path {
        Some(path) => ScenarioLoader::load(path)?,
        None => ScenarioLoader::builtin(DEFAULT_SCENARIO)?,
    };

    let scenario = spec.resolve(&catalog)?;
    tracing::info!(
        scenario = %scenario.name,
        party = scenario.party.len(),
        enemies = scenario.enemies.len(),
        "Starting encounter"
    );
    let mut session = scenario
        .start(encounter_config)
        .context("Scenario rejected by encounter setup")?;
    session.attach(TracingListener);
    let session = Arc::new(Mutex::new(session));

    let json = config.json;
    let pace = if config.realtime {
        Pace::Realtime
    } else {
        Pace::Instant
    };
    let mut driver = EncounterDriver::new(&session, AutoPilot::new())
        .with_pace(pace)
        .with_sink(move |record| print_record(record, json));

    let outcome = driver.run().await?;
    let DriverOutcome::Finished(summary) = outcome else {
        anyhow::bail!("Encounter was abandoned before it resolved");
    };

    if json {
        println!("{}", serde_json::to_string(&summary)?);
    } else {
        let session = session.lock().await;
        println!("{}", report::summarize(&summary, session.roster()));
    }
    Ok(())
}

fn print_record(record: &EventRecord, json: bool) {
    if !json {
        println!("{}", report::describe(record));
        return;
    }
    match record.to_json_line() {
        Ok(line) => println!("{line}"),
        Err(err) => tracing::warn!(%err, "Failed to serialize event"),
    }
}

#[cfg(test)]
mod tests {
    use tactics_core::EncounterConfig;

    use super::*;

    #[test]
    fn builtin_content_starts_an_encounter() {
        let spec = ScenarioLoader::builtin(DEFAULT_SCENARIO).unwrap();
        let scenario = spec.resolve(&TemplateCatalog::builtin()).unwrap();
        let session = scenario.start(EncounterConfig::instant()).unwrap();

        assert_eq!(session.round(), 1);
        assert!(session.acting_unit().is_some());
    }
}
