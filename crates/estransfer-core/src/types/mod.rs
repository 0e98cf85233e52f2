//! Validated identifier types.
//!
//! These types enforce their invariants at construction time so the
//! transfer pipeline never re-validates its inputs.

mod store_url;
mod stream_name;

pub use store_url::StoreUrl;
pub use stream_name::StreamName;
