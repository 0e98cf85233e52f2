//! Command implementations.

pub mod export;
pub mod import;
pub mod streams;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use estransfer_archive::TransferFormat;
use estransfer_core::StreamName;
use estransfer_http::StoreClient;

use crate::cli::{Commands, StoreArgs};
use crate::{output, prompt};

/// Run a parsed command against the configured store.
pub async fn handle(store: StoreArgs, command: Commands) -> Result<()> {
    let config = store.client_config()?;
    debug!(store = %config.store, authenticated = config.credentials.is_some(), "Using store");
    let client = StoreClient::new(config).context("Failed to create HTTP client")?;

    match command {
        Commands::Export(args) => export::run(&client, args).await,
        Commands::Import(args) => import::run(&client, args).await,
        Commands::Streams(args) => streams::run(&client, args).await,
    }
}

/// Check that `path` names a supported transfer file.
///
/// A path without an extension is written or read as plain JSON once the
/// user agrees (or `yes` is set). Returns `None` when the user declines.
async fn resolve_file(path: PathBuf, yes: bool) -> Result<Option<(PathBuf, TransferFormat)>> {
    let format = TransferFormat::from_path(&path)
        .with_context(|| format!("Cannot use {}", path.display()))?;

    if !yes && has_no_extension(&path) {
        let question = format!("{} has no extension. Treat it as JSON?", path.display());
        if !prompt::confirm(&question, true).await? {
            return Ok(None);
        }
    }

    Ok(Some((path, format)))
}

fn has_no_extension(path: &Path) -> bool {
    path.extension().is_none()
}

/// Ask for a stream name until a valid one is given.
async fn ask_stream_name(question: &str) -> Result<StreamName> {
    loop {
        let answer = prompt::ask(question).await?;
        match StreamName::new(answer) {
            Ok(stream) => return Ok(stream),
            Err(err) => output::warn(&err.to_string()),
        }
    }
}

fn aborted() -> Result<()> {
    output::note("Aborted.");
    Ok(())
}
