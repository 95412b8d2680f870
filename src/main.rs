//! credpolicy CLI - password policy enforcement
//!
//! Usage: credpolicy <COMMAND>
//!
//! Commands:
//!   providers        List registered policy providers
//!   validate-policy  Parse and normalize a policy specification
//!   check            Evaluate a candidate password
//!   set-password     Evaluate, hash and store a new password
//!   expired          Report whether the current password has expired

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::{
    cmd_check, cmd_expired, cmd_providers, cmd_set_password, cmd_validate_policy, resolve_config,
    Workspace,
};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init();
}

fn run(cli: Cli) -> Result<ExitCode> {
    let json = cli.json;
    match &cli.command {
        Commands::Providers => cmd_providers(json),
        Commands::ValidatePolicy { spec } => cmd_validate_policy(spec, json),
        Commands::Check { user, password } => {
            let workspace = Workspace::open(&resolve_config(&cli)?)?;
            cmd_check(&workspace, user, password, json)
        }
        Commands::SetPassword { user, password } => {
            let workspace = Workspace::open(&resolve_config(&cli)?)?;
            cmd_set_password(&workspace, user, password, json)
        }
        Commands::Expired { user } => {
            let workspace = Workspace::open(&resolve_config(&cli)?)?;
            cmd_expired(&workspace, user, json)
        }
    }
}
