//! Atom-style collection pages and entries.

use serde::{Deserialize, Serialize};

/// A relation link attached to a page or an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub uri: String,
    pub relation: String,
}

/// A lightweight reference to one event, as listed on a stream page.
///
/// The title has the form `<sequence>@<stream>`; the full event content
/// lives behind the entry's first link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub id: Option<String>,
    /// The event type, for event entries.
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub links: Vec<Link>,
}

impl Entry {
    /// URI from which the full event content is fetched.
    ///
    /// This is the entry's first link, falling back to its `id`.
    pub fn content_uri(&self) -> Option<&str> {
        self.links
            .first()
            .map(|link| link.uri.as_str())
            .or(self.id.as_deref())
    }

    /// Sequence number encoded before the `@` in the title.
    pub fn sequence(&self) -> Option<u64> {
        let (number, _) = self.title.split_once('@')?;
        number.parse().ok()
    }
}

/// One page of a stream collection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub entries: Vec<Entry>,
    #[serde(default)]
    pub links: Vec<Link>,
}

impl Page {
    pub const NEXT: &'static str = "next";
    pub const PREVIOUS: &'static str = "previous";

    /// Returns the first link with the given relation.
    pub fn link(&self, relation: &str) -> Option<&Link> {
        self.links.iter().find(|link| link.relation == relation)
    }

    /// URI of the next page, if there is one.
    pub fn next_uri(&self) -> Option<&str> {
        self.link(Self::NEXT).map(|link| link.uri.as_str())
    }
}
