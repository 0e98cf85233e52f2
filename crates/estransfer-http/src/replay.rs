//! Replay writer.
//!
//! Reads a newline-delimited record stream and appends each record to a
//! stream, one request per record, in file order. Individual failures are
//! counted and skipped; nothing is retried.

use std::fmt;
use std::io::BufRead;

use tracing::{debug, instrument, warn};

use estransfer_core::{EventRecord, Result, StreamName};

use crate::client::StoreClient;

/// A line that could not be parsed as an event record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedLine {
    /// 1-based line number.
    pub line: usize,
    pub reason: String,
}

impl fmt::Display for MalformedLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.reason)
    }
}

/// Outcome of a replay.
#[derive(Debug, Default)]
pub struct ReplayReport {
    /// Records the store accepted.
    pub succeeded: usize,
    /// Records the store rejected or that could not be sent.
    pub failed: usize,
    /// Lines skipped before submission.
    pub malformed: Vec<MalformedLine>,
}

impl ReplayReport {
    /// The `(success_count, failure_count)` pair.
    pub fn counts(&self) -> (usize, usize) {
        (self.succeeded, self.failed)
    }

    /// True when every line was parsed and appended.
    pub fn is_clean(&self) -> bool {
        self.failed == 0 && self.malformed.is_empty()
    }
}

/// Append every record read from `input` to `stream`.
///
/// Blank lines are ignored. Malformed lines, including ones that are not
/// valid UTF-8, are reported and skipped, and a rejected append increments
/// [`ReplayReport::failed`]; neither stops the replay. Only an error reading
/// `input` itself aborts.
///
/// Replaying the same input twice appends every record twice unless the store
/// deduplicates by event id.
#[instrument(skip(client, input), fields(%stream))]
pub async fn replay<R: BufRead>(
    client: &StoreClient,
    stream: &StreamName,
    mut input: R,
) -> Result<ReplayReport> {
    let mut report = ReplayReport::default();
    let mut buf = Vec::new();
    let mut number = 0;

    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        number += 1;

        let parsed = std::str::from_utf8(trim_line_end(&buf))
            .map_err(|err| err.to_string())
            .and_then(|line| {
                if line.trim().is_empty() {
                    return Ok(None);
                }
                EventRecord::from_json_line(line)
                    .map(Some)
                    .map_err(|err| err.to_string())
            });

        let record = match parsed {
            Ok(Some(record)) => record,
            Ok(None) => continue,
            Err(reason) => {
                warn!(line = number, error = %reason, "Skipping malformed record");
                report.malformed.push(MalformedLine {
                    line: number,
                    reason,
                });
                continue;
            }
        };

        match client.append(stream, &record).await {
            Ok(()) => report.succeeded += 1,
            Err(err) => {
                warn!(line = number, event_id = %record.event_id, error = %err, "Failed to append event");
                report.failed += 1;
            }
        }
    }

    debug!(
        succeeded = report.succeeded,
        failed = report.failed,
        malformed = report.malformed.len(),
        "Replay finished"
    );
    Ok(report)
}

/// Strip a trailing `\n` or `\r\n`.
fn trim_line_end(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}
