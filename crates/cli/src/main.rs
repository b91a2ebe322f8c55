use crate::{args::Cli, error::CliError};
use clap::Parser;
use engine_runtime::execution::executor;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod args;
mod error;
mod output;

#[tokio::main]
async fn main() -> ExitCode {
    // RUST_LOG overrides the default level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(phase = err.phase(), "{err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let pipeline = cli.pipeline();
    info!(
        url = %pipeline.source.url,
        table = %pipeline.destination.table,
        destination = %pipeline.destination.connection,
        "Starting ingestion"
    );

    let report = executor::run(pipeline).await?;

    if let Some(path) = &cli.report {
        output::write_report(&report, path).await?;
        info!(path = %path.display(), "Report written");
    }

    Ok(())
}
