//! estransfer-core - Shared types for moving event-store streams to and from files.
//!
//! Nothing in this crate touches the network or the filesystem. It defines the
//! vocabulary the other crates speak: validated store URLs and stream names,
//! the Atom-style page and entry shapes returned by the store, the durable
//! [`EventRecord`] written to transfer files, and the unified [`Error`] type.

pub mod config;
pub mod credentials;
pub mod error;
pub mod event;
pub mod types;

pub use config::ClientConfig;
pub use credentials::Credentials;
pub use error::Error;
pub use event::{Entry, EventRecord, Link, Page, ProjectionCommand, ProjectionStatus};
pub use types::{StoreUrl, StreamName};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
