//! Ceph Doctor CLI binary entrypoint.
//!
//! This is the main entry point for the `cephdoctor` command-line tool.

use std::io;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use doctor_cli::cli::{Cli, Commands};
use doctor_cli::commands::ClusterCommand;
use doctor_cli::output::OutputFormat;
use doctor_cli::error::usage_exit_status;
use doctor_cli::CliError;
use doctor_core::{CancellationToken, OpContext};
use doctor_persist::FsClusterRepository;

fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    // Parse CLI arguments
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(usage_exit_status(&e));
        }
    };

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to create async runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is_expected() => {
            eprintln!("{e}");
            e.exit_code()
        }
        Err(e) => {
            eprintln!("Error: {e}");
            e.exit_code()
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let token = CancellationToken::new();
    let mut ctx = OpContext::with_token(token.clone());
    if let Some(secs) = cli.timeout {
        ctx = ctx.with_timeout(Duration::from_secs(secs));
    }

    let watcher = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupt received, canceling");
            token.cancel();
        }
    });

    // Storage calls block on the filesystem.
    let result = tokio::task::spawn_blocking(move || execute(&cli, &ctx)).await;
    watcher.abort();

    result.map_err(|e| CliError::Runtime(format!("command task failed: {e}")))?
}

fn execute(cli: &Cli, ctx: &OpContext) -> Result<(), CliError> {
    let repo = FsClusterRepository::new(cli.state_dir.clone().unwrap_or_default())?;
    debug!(root = %repo.root().display(), "opened cluster repository");

    let format = OutputFormat::new(cli.format);
    let mut stdout = io::stdout().lock();

    match &cli.command {
        Commands::Cluster { command } => {
            ClusterCommand::new(&repo, ctx).execute(&mut stdout, &format, command)
        }
    }
}
