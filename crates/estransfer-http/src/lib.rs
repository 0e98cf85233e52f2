//! estransfer-http - Moves event streams between an event store's HTTP API and files.
//!
//! The pieces, leaves first:
//!
//! - [`reader`] walks a stream's Atom pages following `next` links.
//! - [`materializer`] fetches each entry's content and writes it as one JSON
//!   line, oldest event first.
//! - [`replay`] posts every record of a line stream back to a stream.
//! - [`discovery`] runs the `$streams` projection and lists stream names.
//! - [`transfer`] wires the above to the archive codec as
//!   [`export_stream`] and [`import_stream`].
//!
//! Every network call is a sequential round-trip through one [`StoreClient`].
//!
//! # Example
//!
//! ```no_run
//! use estransfer_core::{ClientConfig, StoreUrl, StreamName};
//! use estransfer_http::{StoreClient, export_stream, import_stream};
//!
//! # async fn example() -> Result<(), estransfer_core::Error> {
//! let store = StoreUrl::new("http://localhost:2113")?;
//! let client = StoreClient::new(ClientConfig::new(store))?;
//!
//! let summary = export_stream(&client, &StreamName::new("orders")?, "orders.zip").await?;
//! println!("exported {} events", summary.events_written);
//!
//! let report = import_stream(&client, &StreamName::new("orders-copy")?, "orders.zip").await?;
//! let (ok, failed) = report.counts();
//! println!("{ok} appended, {failed} failed");
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod discovery;
pub mod materializer;
pub mod reader;
pub mod replay;
pub mod transfer;

pub use client::StoreClient;
pub use discovery::{DiscoveryState, ProjectionRun, list_streams, run_projection, stream_exists};
pub use materializer::{DroppedEvent, MaterializeReport, materialize};
pub use reader::{Listing, entry_stream, read_entries};
pub use replay::{MalformedLine, ReplayReport, replay};
pub use transfer::{ExportSummary, export_stream, import_stream};
