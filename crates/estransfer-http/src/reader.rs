//! Paginated stream reader.
//!
//! The store serves a stream as a chain of Atom pages, newest events first,
//! each page linking to the next older one with `rel="next"`. [`entry_stream`]
//! walks that chain lazily; [`read_entries`] drains it into memory.
//!
//! A page that cannot be fetched ends the walk. Entries gathered before the
//! failure are kept: this is a best-effort read, not a retry loop.

use futures_util::{Stream, StreamExt};
use tracing::{debug, warn};
use url::Url;

use estransfer_core::{Entry, Error, Result};

use crate::client::StoreClient;

/// Lazily yield every entry reachable from `start` by following `next` links.
///
/// Pages are fetched only as entries are pulled. A fetch failure is yielded
/// as the final item. The sequence is not resumable; calling this again
/// starts over from the first page.
pub fn entry_stream(client: &StoreClient, start: Url) -> impl Stream<Item = Result<Entry>> + '_ {
    async_stream::stream! {
        let mut next = Some(start.to_string());
        let mut pages = 0usize;

        while let Some(uri) = next.take() {
            match client.fetch_page(&uri).await {
                Ok(page) => {
                    pages += 1;
                    next = page.next_uri().map(str::to_owned);
                    debug!(page = pages, entries = page.entries.len(), more = next.is_some(), "Read stream page");
                    for entry in page.entries {
                        yield Ok(entry);
                    }
                }
                Err(err) => yield Err(err),
            }
        }
    }
}

/// Entries collected from a stream, in the order the store returned them.
#[derive(Debug, Default)]
pub struct Listing {
    pub entries: Vec<Entry>,
    /// The failure that cut pagination short, if any.
    pub interrupted: Option<Error>,
}

impl Listing {
    /// True when the walk reached a page without a `next` link.
    pub fn is_complete(&self) -> bool {
        self.interrupted.is_none()
    }
}

/// Collect every entry reachable from `start`.
///
/// Never fails: a page fetch error is logged and returned in
/// [`Listing::interrupted`] next to the entries read so far.
pub async fn read_entries(client: &StoreClient, start: Url) -> Listing {
    let mut stream = std::pin::pin!(entry_stream(client, start));
    let mut listing = Listing::default();

    while let Some(item) = stream.next().await {
        match item {
            Ok(entry) => listing.entries.push(entry),
            Err(err) => {
                warn!(
                    error = %err,
                    entries = listing.entries.len(),
                    "Failed to fetch stream page, keeping entries read so far"
                );
                listing.interrupted = Some(err);
                break;
            }
        }
    }

    listing
}
