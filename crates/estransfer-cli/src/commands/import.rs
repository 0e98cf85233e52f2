//! Import command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Args;

use estransfer_core::StreamName;
use estransfer_http::{ReplayReport, StoreClient, import_stream, stream_exists};

use super::{aborted, ask_stream_name, resolve_file};
use crate::{output, prompt};

#[derive(Args, Debug)]
pub struct ImportArgs {
    /// Stream to append to (asked for when omitted)
    #[arg(short, long)]
    pub stream: Option<String>,

    /// Input file: .json, .zip or .tar.xz
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Skip confirmations, including the existing-stream check
    #[arg(short, long)]
    pub yes: bool,
}

pub async fn run(client: &StoreClient, args: ImportArgs) -> Result<()> {
    let path = match args.file {
        Some(path) => path,
        None => PathBuf::from(prompt::ask("Input file (.json, .zip, .tar.xz):").await?),
    };
    let Some((path, format)) = resolve_file(path, args.yes).await? else {
        return aborted();
    };
    if !path.is_file() {
        bail!("File not found: {}", path.display());
    }

    let stream = match args.stream {
        Some(name) => StreamName::new(name).context("Invalid stream name")?,
        None => ask_stream_name("Stream name:").await?,
    };

    if !args.yes {
        output::note("Checking existing streams...");
        let exists = stream_exists(client, &stream)
            .await
            .context("Failed to list streams")?;
        if exists {
            output::warn(&format!(
                "Stream {} already exists; events will be appended to it",
                stream
            ));
            if !prompt::confirm("Continue?", false).await? {
                return aborted();
            }
        }
    }

    output::note(&format!("Importing {} ({}) into {}...", path.display(), format, stream));
    let report = import_stream(client, &stream, &path)
        .await
        .with_context(|| format!("Failed to import {}", path.display()))?;

    print_report(&stream, &report);
    Ok(())
}

fn print_report(stream: &StreamName, report: &ReplayReport) {
    for line in &report.malformed {
        output::warn(&format!("Skipped {line}"));
    }

    let (succeeded, failed) = report.counts();
    if report.is_clean() {
        output::success(&format!("Imported {} events into {}", succeeded, stream));
    } else {
        output::warn(&format!("Imported {} events into {} with problems", succeeded, stream));
    }
    println!();
    output::field("Appended", succeeded);
    output::field("Failed", failed);
    if !report.malformed.is_empty() {
        output::field("Malformed lines", report.malformed.len());
    }
}
