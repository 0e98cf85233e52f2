//! Export command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use estransfer_core::StreamName;
use estransfer_http::{ExportSummary, StoreClient, export_stream, list_streams};

use super::{aborted, resolve_file};
use crate::{output, prompt};

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Stream to export (chosen from a list when omitted)
    #[arg(short, long)]
    pub stream: Option<String>,

    /// Output file: .json, .zip or .tar.xz
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Skip confirmations
    #[arg(short, long)]
    pub yes: bool,
}

pub async fn run(client: &StoreClient, args: ExportArgs) -> Result<()> {
    // A bad file name should fail before the store is contacted.
    let file = match args.file {
        Some(path) => match resolve_file(path, args.yes).await? {
            Some(file) => Some(file),
            None => return aborted(),
        },
        None => None,
    };

    let stream = match args.stream {
        Some(name) => StreamName::new(name).context("Invalid stream name")?,
        None => choose_stream(client).await?,
    };

    let (path, format) = match file {
        Some(file) => file,
        None => {
            let answer = prompt::ask("Output file (.json, .zip, .tar.xz):").await?;
            match resolve_file(PathBuf::from(answer), args.yes).await? {
                Some(file) => file,
                None => return aborted(),
            }
        }
    };

    if !args.yes && path.exists() {
        let question = format!("{} already exists. Overwrite it?", path.display());
        if !prompt::confirm(&question, false).await? {
            return aborted();
        }
    }

    output::note(&format!("Exporting {} as {}...", stream, format));
    let summary = export_stream(client, &stream, &path)
        .await
        .with_context(|| format!("Failed to export {}", stream))?;

    print_summary(&stream, &summary);
    Ok(())
}

async fn choose_stream(client: &StoreClient) -> Result<StreamName> {
    output::note("Discovering streams...");
    let names = list_streams(client)
        .await
        .context("Failed to list streams")?;
    let name = prompt::choose("Stream number:", &names).await?;
    StreamName::new(name).context("Invalid stream name")
}

fn print_summary(stream: &StreamName, summary: &ExportSummary) {
    if let Some(err) = &summary.truncated {
        output::warn(&format!("Reading stopped early: {err}"));
    }
    for dropped in &summary.dropped {
        output::warn(&format!("Skipped {}: {}", dropped.title, dropped.reason));
    }

    let Some(path) = &summary.output else {
        println!("No events were exported.");
        return;
    };

    output::success(&format!(
        "Exported {} events from {}",
        summary.events_written, stream
    ));
    println!();
    output::field("File", path.display());
    output::field("Entries", summary.entries_listed);
    if !summary.dropped.is_empty() {
        output::field("Skipped", summary.dropped.len());
    }
}
