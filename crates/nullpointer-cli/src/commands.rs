use crate::cli::{Cli, Command, HistoryCommand};
use anyhow::{Context, Result};
use nullpointer_client::{NullPointerClient, NullPointerService, ReusePolicy};
use nullpointer_core::{
    History, HistoryRecord, HistoryRepository, Lookup, Partition, ServiceUrl, Submission,
};
use std::io::{self, Write};
use std::process::ExitCode;
use tracing::{info, warn};

type Service<H> = NullPointerService<NullPointerClient, H>;

pub async fn run<H: HistoryRepository>(cli: &Cli, mut service: Service<H>) -> Result<ExitCode> {
    let mut out = io::stdout().lock();

    match &cli.command {
        Command::Upload { path, force } => {
            // one file, one history item, however it was spelled
            let path = std::fs::canonicalize(path)
                .with_context(|| format!("cannot upload {}", path.display()))?;
            submit(&mut service, &cli.service, Submission::Upload(path), *force, &mut out).await
        }
        Command::Shorten { url, force } => {
            let submission = Submission::Shorten(url.clone());
            submit(&mut service, &cli.service, submission, *force, &mut out).await
        }
        Command::Remote { url, force } => {
            let submission = Submission::Remote(url.clone());
            submit(&mut service, &cli.service, submission, *force, &mut out).await
        }
        Command::Info => {
            let text = service
                .submitter()
                .fetch_info(&cli.service)
                .await
                .with_context(|| format!("failed to fetch info from {}", cli.service))?;
            writeln!(out, "{}", text.trim_end())?;
            Ok(ExitCode::SUCCESS)
        }
        Command::History(command) => history(&mut service, &cli.service, command, &mut out),
    }
}

async fn submit<H: HistoryRepository>(
    service: &mut Service<H>,
    service_url: &ServiceUrl,
    submission: Submission,
    force: bool,
    out: &mut impl Write,
) -> Result<ExitCode> {
    let policy = if force {
        ReusePolicy::AlwaysSubmit
    } else {
        ReusePolicy::ReuseExisting
    };

    let outcome = service
        .submit(service_url, &submission, policy)
        .await
        .with_context(|| format!("failed to {submission} via {service_url}"))?;

    if outcome.is_reused() {
        info!(item = %outcome.record().item, "already submitted, use --force to send again");
    }
    writeln!(out, "{}", outcome.response())?;
    Ok(ExitCode::SUCCESS)
}

fn history<H: HistoryRepository>(
    service: &mut Service<H>,
    service_url: &ServiceUrl,
    command: &HistoryCommand,
    out: &mut impl Write,
) -> Result<ExitCode> {
    match command {
        HistoryCommand::List { all: true } => {
            write_history(out, &service.history()?)?;
        }
        HistoryCommand::List { all: false } => {
            if let Some(partition) = service.history()?.partition(service_url.as_str()) {
                write_partition(out, partition)?;
            }
        }
        HistoryCommand::Forget { response, item } => {
            let lookup = Lookup::new(
                item.as_deref().unwrap_or_default(),
                response.as_deref().unwrap_or_default(),
            );
            match service.forget(service_url, lookup)? {
                Some(record) => write_record(out, &record)?,
                None => {
                    warn!(service = %service_url, ?lookup, "no matching record");
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
        HistoryCommand::Clear { all } => {
            let target = (!all).then_some(service_url);
            service.clear(target)?;
            info!(service = target.map(ServiceUrl::as_str).unwrap_or("*"), "history cleared");
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn write_partition(out: &mut impl Write, partition: &Partition) -> io::Result<()> {
    for (response, item) in partition {
        writeln!(out, "{response}\t{item}")?;
    }
    Ok(())
}

fn write_history(out: &mut impl Write, history: &History) -> io::Result<()> {
    for (service_url, partition) in history.partitions() {
        writeln!(out, "# {service_url}")?;
        write_partition(out, partition)?;
    }
    Ok(())
}

fn write_record(out: &mut impl Write, record: &HistoryRecord) -> io::Result<()> {
    writeln!(
        out,
        "{}\t{}\t{}",
        record.service_url, record.response, record.item
    )
}
