//! estransfer-archive - Transfer file containers.
//!
//! A transfer file is a newline-delimited JSON record stream, either bare or
//! wrapped in a single-member `.zip` or `.tar.xz` container. This crate hides
//! the container: exporters write to [`ExportSink::record_path`] and call
//! [`ExportSink::finish`]; importers read from [`ImportSource::record_path`].
//! Temporary staging directories are owned by those guards and removed when
//! they drop, on success and on error alike.

mod export;
mod format;
mod import;
mod tar_xz;
mod zip_container;

pub use export::ExportSink;
pub use format::TransferFormat;
pub use import::ImportSource;

/// File name of the record stream inside a container produced by this crate.
pub const RECORD_FILE_NAME: &str = "events.json";
