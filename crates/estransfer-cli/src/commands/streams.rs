//! Streams command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use estransfer_http::{StoreClient, list_streams};

use crate::output;

#[derive(Args, Debug)]
pub struct StreamsArgs {
    /// Print the names as a JSON array
    #[arg(long)]
    pub json: bool,
}

pub async fn run(client: &StoreClient, args: StreamsArgs) -> Result<()> {
    let names = list_streams(client)
        .await
        .context("Failed to list streams")?;

    if args.json {
        return output::json(&names);
    }

    if names.is_empty() {
        println!("No streams found.");
        return Ok(());
    }

    for (i, name) in names.iter().enumerate() {
        println!("{:>4}  {}", (i + 1).to_string().cyan(), name);
    }
    Ok(())
}
