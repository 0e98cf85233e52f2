//! estransfer - export event-store streams to files and import them back.
//!
//! This binary is the interactive front end over `estransfer-http`: it
//! resolves the stream name, transfer file and confirmations, then hands a
//! validated triple to the export or import pipeline.

mod cli;
mod commands;
mod output;
mod prompt;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::Cli;

/// Conventional exit status after SIGINT.
const INTERRUPTED: i32 = 130;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose, cli.json_logs);

    // The losing branch is dropped before select! returns, so an interrupted
    // transfer has already released its temporary files here.
    let result = tokio::select! {
        result = commands::handle(cli.store, cli.command) => result,
        _ = tokio::signal::ctrl_c() => {
            output::error("Interrupted");
            // A prompt may still be blocked on stdin; skip runtime shutdown.
            std::process::exit(INTERRUPTED);
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output::error(&format!("{err:#}"));
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbosity: u8, json: bool) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}
