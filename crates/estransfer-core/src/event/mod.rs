//! Store document shapes and the durable event record.
//!
//! [`Page`] and [`Entry`] mirror the Atom-style JSON the store serves for
//! stream reads. They are transient: consumed while paginating and dropped.
//! [`EventRecord`] is what survives into a transfer file and back.

mod entry;
mod projection;
mod record;

pub use entry::{Entry, Link, Page};
pub use projection::{ProjectionCommand, ProjectionStatus};
pub use record::EventRecord;
