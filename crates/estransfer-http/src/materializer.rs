//! Event materializer.
//!
//! Turns the entry references gathered by the reader into full event bodies,
//! written as newline-delimited JSON in commit order (oldest first).

use std::io::Write;

use tracing::{debug, instrument, warn};

use estransfer_core::{Entry, Result};

use crate::client::StoreClient;

/// An event left out of an export because its content could not be fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedEvent {
    /// Entry title, `<sequence>@<stream>`.
    pub title: String,
    pub uri: Option<String>,
    pub reason: String,
}

/// Outcome of materializing a list of entries.
#[derive(Debug, Default)]
pub struct MaterializeReport {
    /// Lines written.
    pub written: usize,
    /// Entries skipped, oldest first.
    pub dropped: Vec<DroppedEvent>,
}

/// Fetch each entry's content and write it to `out`, one JSON object per line.
///
/// `entries` is in store order (newest first); output is reversed so the file
/// reads chronologically. An entry whose content cannot be fetched is skipped
/// and listed in [`MaterializeReport::dropped`]. Only write errors abort.
#[instrument(skip_all, fields(entries = entries.len()))]
pub async fn materialize<W: Write>(
    client: &StoreClient,
    entries: &[Entry],
    out: &mut W,
) -> Result<MaterializeReport> {
    let mut report = MaterializeReport::default();

    for entry in entries.iter().rev() {
        let Some(uri) = entry.content_uri() else {
            warn!(title = %entry.title, "Entry has no content link, skipping");
            report.dropped.push(DroppedEvent {
                title: entry.title.clone(),
                uri: None,
                reason: "entry has no content link".to_string(),
            });
            continue;
        };

        match client.fetch_event(uri).await {
            Ok(body) => {
                writeln!(out, "{}", body)?;
                report.written += 1;
            }
            Err(err) => {
                warn!(title = %entry.title, uri, error = %err, "Failed to fetch event, skipping");
                report.dropped.push(DroppedEvent {
                    title: entry.title.clone(),
                    uri: Some(uri.to_string()),
                    reason: err.to_string(),
                });
            }
        }
    }

    out.flush()?;
    debug!(written = report.written, dropped = report.dropped.len(), "Materialized events");
    Ok(report)
}
