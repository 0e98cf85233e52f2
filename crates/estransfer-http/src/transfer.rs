//! Export and import pipelines.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use tracing::{info, instrument, warn};

use estransfer_archive::{ExportSink, ImportSource, TransferFormat};
use estransfer_core::{Error, Result, StreamName};

use crate::client::StoreClient;
use crate::materializer::{DroppedEvent, materialize};
use crate::reader::read_entries;
use crate::replay::{ReplayReport, replay};

/// Outcome of an export.
#[derive(Debug)]
pub struct ExportSummary {
    /// Entries found while paginating.
    pub entries_listed: usize,
    /// Events written to the transfer file.
    pub events_written: usize,
    /// Events whose content could not be fetched.
    pub dropped: Vec<DroppedEvent>,
    /// Set when pagination stopped before the last page.
    pub truncated: Option<Error>,
    /// The transfer file, or `None` when there was nothing to export.
    pub output: Option<PathBuf>,
}

/// Export every readable event of `stream` into the transfer file at `target`.
///
/// The file format follows the extension of `target`. When the stream yields
/// no entries no file is created.
///
/// # Errors
///
/// Fails for unsupported extensions (before any request is sent) and for
/// local I/O or compression failures. Network failures are tolerated and
/// reported in the summary.
#[instrument(skip(client, target), fields(target = %target.as_ref().display()))]
pub async fn export_stream(
    client: &StoreClient,
    stream: &StreamName,
    target: impl AsRef<Path>,
) -> Result<ExportSummary> {
    let target = target.as_ref();
    TransferFormat::from_path(target)?;

    let listing = read_entries(client, client.store().stream_url(stream)).await;
    let entries_listed = listing.entries.len();

    if listing.entries.is_empty() {
        info!("No events to export");
        return Ok(ExportSummary {
            entries_listed,
            events_written: 0,
            dropped: Vec::new(),
            truncated: listing.interrupted,
            output: None,
        });
    }

    let sink = ExportSink::create(target)?;
    let report = {
        let mut out = BufWriter::new(File::create(sink.record_path())?);
        materialize(client, &listing.entries, &mut out).await?
    };
    let output = sink.finish()?;

    if !report.dropped.is_empty() {
        warn!(dropped = report.dropped.len(), "Some events were not exported");
    }
    info!(
        written = report.written,
        output = %output.display(),
        "Export finished"
    );

    Ok(ExportSummary {
        entries_listed,
        events_written: report.written,
        dropped: report.dropped,
        truncated: listing.interrupted,
        output: Some(output),
    })
}

/// Append every record of the transfer file at `source` to `stream`.
///
/// # Errors
///
/// Fails for unsupported extensions, unreadable files, and archives that do
/// not hold exactly one `.json` file; in those cases nothing is appended.
/// Per-record failures are counted in the report instead.
#[instrument(skip(client, source), fields(source = %source.as_ref().display()))]
pub async fn import_stream(
    client: &StoreClient,
    stream: &StreamName,
    source: impl AsRef<Path>,
) -> Result<ReplayReport> {
    let source = ImportSource::open(source)?;
    let input = BufReader::new(File::open(source.record_path())?);

    let report = replay(client, stream, input).await?;
    info!(
        succeeded = report.succeeded,
        failed = report.failed,
        malformed = report.malformed.len(),
        "Import finished"
    );
    Ok(report)
}
