// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `sj` - run security scanners as supervised background jobs

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod color;
mod commands;
mod config;
mod env;
mod exit_error;
mod logging;
mod output;

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::list::ListArgs;
use commands::parse::ParseArgs;
use commands::run::{RunArgs, ScanArgs};
use commands::{cancel, Context};
use config::Config;
use exit_error::{ExitError, FAILURE};
use output::OutputFormat;

#[derive(Parser)]
#[command(name = "sj", version, about = "Run security scanners as supervised jobs", styles = color::styles())]
struct Cli {
    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a target with one of the built-in tool profiles
    Scan(ScanArgs),
    /// Run an arbitrary executable as a job
    Run(RunArgs),
    /// Parse saved scanner output
    Parse(ParseArgs),
    /// Show a job and its parsed results
    Show {
        /// Job ID (supports prefix matching)
        id: String,
    },
    /// Mark a job as cancelled
    Cancel {
        /// Job ID (supports prefix matching)
        id: String,

        /// Reason recorded on the job
        #[arg(long, default_value = cancel::DEFAULT_REASON)]
        reason: String,
    },
    /// List jobs
    List(ListArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let code = match e.downcast_ref::<ExitError>() {
                Some(exit) => {
                    if !exit.message.is_empty() {
                        eprintln!("error: {}", exit.message);
                    }
                    exit.code
                }
                None => {
                    eprintln!("error: {e:#}");
                    FAILURE
                }
            };
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let state_dir = env::state_dir()?;
    let _log_guard = logging::init(&state_dir);
    let config = Config::load(&Config::path(&state_dir))?;
    let ctx = Context { state_dir, config, format: OutputFormat::from_flag(cli.json) };

    match cli.command {
        Commands::Scan(args) => commands::run::scan(&ctx, args).await,
        Commands::Run(args) => commands::run::run(&ctx, args).await,
        Commands::Parse(args) => commands::parse::handle(&ctx, args),
        Commands::Show { id } => commands::show::handle(&ctx, &id).await,
        Commands::Cancel { id, reason } => cancel::handle(&ctx, &id, &reason).await,
        Commands::List(args) => commands::list::handle(&ctx, args).await,
    }
}
