//! CLI argument definitions.

use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};

use estransfer_core::{ClientConfig, Credentials, StoreUrl};

use crate::commands::{export::ExportArgs, import::ImportArgs, streams::StreamsArgs};

/// Move event-store streams to and from local files.
#[derive(Parser, Debug)]
#[command(name = "estransfer")]
#[command(author, version = env!("ESTRANSFER_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(flatten)]
    pub store: StoreArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export a stream's events into a .json, .zip or .tar.xz file
    Export(ExportArgs),

    /// Import events from a file into a stream
    Import(ImportArgs),

    /// List the streams in the store
    Streams(StreamsArgs),
}

/// Connection settings shared by every command.
#[derive(Args, Debug, Clone)]
pub struct StoreArgs {
    /// Base URL of the event store HTTP API
    #[arg(
        short,
        long,
        env = "ESTRANSFER_ADDRESS",
        default_value = "http://localhost:2113",
        global = true
    )]
    pub address: String,

    /// Username for basic auth
    #[arg(long, env = "ESTRANSFER_USERNAME", global = true)]
    pub username: Option<String>,

    /// Password for basic auth
    #[arg(long, env = "ESTRANSFER_PASSWORD", hide_env_values = true, global = true)]
    pub password: Option<String>,

    /// Delay between projection status checks, in milliseconds
    #[arg(long, default_value_t = 100, global = true)]
    pub poll_interval_ms: u64,

    /// Per-request timeout, in seconds
    #[arg(long, default_value_t = 30, global = true)]
    pub timeout_secs: u64,
}

impl StoreArgs {
    /// Build the client configuration these arguments describe.
    pub fn client_config(&self) -> Result<ClientConfig> {
        let store = StoreUrl::new(&self.address).context("Invalid store address")?;

        let mut config = ClientConfig::new(store)
            .with_poll_interval(Duration::from_millis(self.poll_interval_ms))
            .with_request_timeout(Duration::from_secs(self.timeout_secs));

        match (&self.username, &self.password) {
            (Some(username), Some(password)) => {
                config = config.with_credentials(Credentials::new(username, password));
            }
            (None, None) => {}
            _ => bail!("--username and --password must be given together"),
        }

        Ok(config)
    }
}
