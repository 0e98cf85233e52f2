//! Stream discovery through the `$streams` system projection.
//!
//! The store only maintains its index of stream names while the `$streams`
//! projection runs. Discovery enables it, polls until it reports full
//! progress, disables it again, then reads the index stream.
//!
//! The projection lifecycle is an explicit state machine, advanced one
//! network step at a time by [`DiscoveryState::step`].

use tokio::time::sleep;
use tracing::{debug, info, instrument, warn};

use estransfer_core::{ProjectionCommand, Result, StreamName};

use crate::client::StoreClient;
use crate::reader::read_entries;

/// Projection that materializes the index of all streams.
pub const ALL_STREAMS_PROJECTION: &str = "$streams";

/// Prefix of every title in the `$streams` index (`0@<stream>`).
const INDEX_TITLE_PREFIX: &str = "0@";

/// How a projection run ended.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionRun {
    /// Progress reached 100 before polling stopped.
    pub completed: bool,
    /// Last progress value observed, if any status was read.
    pub last_progress: Option<f64>,
    /// Number of status documents read.
    pub polls: u32,
    /// The disable command succeeded.
    pub disabled: bool,
}

/// Lifecycle of one projection run.
#[derive(Debug, Clone, PartialEq)]
pub enum DiscoveryState {
    /// The enable command has not been sent yet.
    Enabling,
    /// Waiting for progress to reach 100.
    Polling {
        polls: u32,
        last_progress: Option<f64>,
    },
    /// Polling has ended; the disable command is next.
    Disabling {
        completed: bool,
        polls: u32,
        last_progress: Option<f64>,
    },
    Done(ProjectionRun),
}

impl DiscoveryState {
    /// Perform one transition.
    ///
    /// Only a failed enable is an error. A failed status fetch ends polling
    /// early and a failed disable is logged; both still reach [`Self::Done`].
    pub async fn step(self, client: &StoreClient, projection: &str) -> Result<Self> {
        match self {
            DiscoveryState::Enabling => {
                client
                    .projection_command(projection, ProjectionCommand::Enable)
                    .await?;
                debug!(projection, "Projection enabled");
                Ok(DiscoveryState::Polling {
                    polls: 0,
                    last_progress: None,
                })
            }
            DiscoveryState::Polling {
                polls,
                last_progress,
            } => match client.projection_status(projection).await {
                Ok(status) => {
                    let polls = polls + 1;
                    debug!(
                        projection,
                        progress = status.progress,
                        state = status.status.as_deref().unwrap_or("unknown"),
                        polls,
                        "Projection status"
                    );
                    if status.is_complete() {
                        Ok(DiscoveryState::Disabling {
                            completed: true,
                            polls,
                            last_progress: Some(status.progress),
                        })
                    } else {
                        sleep(client.config().poll_interval).await;
                        Ok(DiscoveryState::Polling {
                            polls,
                            last_progress: Some(status.progress),
                        })
                    }
                }
                Err(err) => {
                    warn!(projection, error = %err, "Failed to fetch projection status");
                    Ok(DiscoveryState::Disabling {
                        completed: false,
                        polls,
                        last_progress,
                    })
                }
            },
            DiscoveryState::Disabling {
                completed,
                polls,
                last_progress,
            } => {
                let disabled = match client
                    .projection_command(projection, ProjectionCommand::Disable)
                    .await
                {
                    Ok(()) => true,
                    Err(err) => {
                        warn!(projection, error = %err, "Failed to disable projection");
                        false
                    }
                };
                Ok(DiscoveryState::Done(ProjectionRun {
                    completed,
                    last_progress,
                    polls,
                    disabled,
                }))
            }
            done @ DiscoveryState::Done(_) => Ok(done),
        }
    }
}

/// Enable a projection, wait for it to catch up, then disable it.
#[instrument(skip(client))]
pub async fn run_projection(client: &StoreClient, projection: &str) -> Result<ProjectionRun> {
    let mut state = DiscoveryState::Enabling;
    loop {
        state = state.step(client, projection).await?;
        if let DiscoveryState::Done(run) = state {
            return Ok(run);
        }
    }
}

/// List the names of all streams in the store.
///
/// # Errors
///
/// Fails if the projection cannot be enabled, or if the first page of the
/// index cannot be read. Later index pages that fail only truncate the list.
#[instrument(skip(client))]
pub async fn list_streams(client: &StoreClient) -> Result<Vec<String>> {
    let run = run_projection(client, ALL_STREAMS_PROJECTION).await?;
    if !run.completed {
        warn!(progress = ?run.last_progress, "Stream index may be incomplete");
    }

    let index = client.store().stream_url(&StreamName::all_streams());
    let listing = read_entries(client, index).await;
    if listing.entries.is_empty()
        && let Some(err) = listing.interrupted
    {
        return Err(err);
    }

    let names: Vec<String> = listing
        .entries
        .iter()
        .map(|entry| entry.title.replacen(INDEX_TITLE_PREFIX, "", 1))
        .collect();
    info!(streams = names.len(), "Discovered streams");
    Ok(names)
}

/// Whether a stream with this name appears in the index.
pub async fn stream_exists(client: &StoreClient, stream: &StreamName) -> Result<bool> {
    let names = list_streams(client).await?;
    Ok(names.iter().any(|name| name == stream.as_str()))
}
