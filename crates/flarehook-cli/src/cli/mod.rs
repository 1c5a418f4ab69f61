//! CLI argument parsing and operation dispatch.

pub mod args;
pub mod commands;

use anyhow::Result;
use args::{Cli, Operation};
use clap::Parser;
use colored::Colorize;
use flarehook::Credentials;
use std::process::ExitCode;
use tracing::{debug, error, info};

use crate::config::{self, HookConfig};
use crate::logging;

/// Run the hook and map the outcome to a process exit code.
pub async fn run() -> ExitCode {
    let cli = Cli::parse();

    logging::init(config::debug_enabled(|name| std::env::var(name).ok()));

    match execute(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{} {err:#}", "ERROR:".red().bold());
            ExitCode::from(1)
        }
    }
}

async fn execute(cli: Cli) -> Result<()> {
    // Credentials are checked before any operation runs
    let config = HookConfig::from_env();
    let credentials = Credentials::from_env()?;

    let Some(name) = cli.operation else {
        debug!("No hook operation given");
        return Ok(());
    };

    let op = match name.parse::<Operation>() {
        Ok(op) => op,
        Err(err) => {
            debug!("{err}, ignoring");
            return Ok(());
        }
    };

    info!("flarehook executing: {op}");

    let ctx = commands::Context {
        config,
        credentials,
    };

    match op {
        Operation::DeployChallenge => commands::challenge::deploy(&ctx, &cli.args).await,
        Operation::CleanChallenge => commands::challenge::clean(&ctx, &cli.args).await,
        Operation::DeployCert
        | Operation::UnchangedCert
        | Operation::InvalidChallenge
        | Operation::StartupHook
        | Operation::ExitHook => {
            commands::notify::execute(&ctx, op, &cli.args);
            Ok(())
        }
    }
}
