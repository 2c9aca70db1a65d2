mod cli;
mod commands;

use crate::cli::Cli;
use anyhow::Context;
use clap::Parser;
use nullpointer_client::{ClientSettings, NullPointerClient, NullPointerService};
use nullpointer_storage::{default_history_path, InMemoryHistory, JsonFileHistory};
use nullpointer_telemetry::level_for_verbosity;
use std::process::ExitCode;
use std::time::Duration;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    nullpointer_telemetry::init(cli.log_format.into(), level_for_verbosity(cli.verbose))?;

    info!(
        service = %cli.service,
        log_format = %cli.log_format,
        no_history = cli.no_history,
        "starting npy"
    );

    let settings = match cli.timeout {
        Some(secs) => ClientSettings::builder()
            .timeout(Duration::from_secs(secs))
            .build(),
        None => ClientSettings::default(),
    };
    let client = NullPointerClient::new(settings).context("failed to set up the http client")?;

    if cli.no_history {
        let service = NullPointerService::new(client, InMemoryHistory::new());
        return commands::run(&cli, service).await;
    }

    let path = match &cli.history_file {
        Some(path) => path.clone(),
        None => default_history_path()?,
    };
    let history = JsonFileHistory::open(&path)
        .with_context(|| format!("failed to open history at {}", path.display()))?;
    info!(path = %history.path().display(), "using history file");

    commands::run(&cli, NullPointerService::new(client, history)).await
}
