//! Store URL type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::error::{Error, InvalidInputError};
use crate::event::ProjectionCommand;

use super::StreamName;

/// A validated base URL of an event store's HTTP API.
///
/// Only absolute `http` and `https` URLs with a host are accepted. Endpoint
/// URLs are built by appending encoded path segments, so a base with a path
/// prefix (`https://host/es`) works the same as a bare host.
///
/// # Example
///
/// ```
/// use estransfer_core::{StoreUrl, StreamName};
///
/// let store = StoreUrl::new("http://localhost:2113/").unwrap();
/// let stream = StreamName::new("orders").unwrap();
/// assert_eq!(store.stream_url(&stream).as_str(), "http://localhost:2113/streams/orders");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct StoreUrl(Url);

impl StoreUrl {
    /// Create a new store URL from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL does not parse or is not an http(s) URL.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let url = Url::parse(s).map_err(|e| InvalidInputError::StoreUrl {
            value: s.to_string(),
            reason: e.to_string(),
        })?;

        Self::validate(&url, s)?;

        Ok(Self(url))
    }

    /// URL of a stream's head page; also the append endpoint.
    pub fn stream_url(&self, stream: &StreamName) -> Url {
        self.endpoint(&["streams", stream.as_str()])
    }

    /// URL of a projection's status document.
    pub fn projection_url(&self, projection: &str) -> Url {
        self.endpoint(&["projection", projection])
    }

    /// URL of a projection command.
    pub fn projection_command_url(&self, projection: &str, command: ProjectionCommand) -> Url {
        self.endpoint(&["projection", projection, "command", command.as_str()])
    }

    /// Returns the base URL as a string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the inner URL.
    pub fn as_url(&self) -> &Url {
        &self.0
    }

    /// Returns the host string.
    pub fn host(&self) -> Option<&str> {
        self.0.host_str()
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.0.clone();
        url.set_query(None);
        url.set_fragment(None);
        // Validation rejects cannot-be-a-base URLs, so this always succeeds.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn validate(url: &Url, original: &str) -> Result<(), Error> {
        if url.cannot_be_a_base() {
            return Err(InvalidInputError::StoreUrl {
                value: original.to_string(),
                reason: "must be an absolute URL".to_string(),
            }
            .into());
        }

        let scheme = url.scheme();
        if scheme != "http" && scheme != "https" {
            return Err(InvalidInputError::StoreUrl {
                value: original.to_string(),
                reason: format!("unsupported scheme '{}' (use http or https)", scheme),
            }
            .into());
        }

        if url.host_str().is_none_or(str::is_empty) {
            return Err(InvalidInputError::StoreUrl {
                value: original.to_string(),
                reason: "must have a host".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

impl fmt::Display for StoreUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.as_str().trim_end_matches('/'))
    }
}

impl FromStr for StoreUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for StoreUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.0.as_str())
    }
}

impl<'de> Deserialize<'de> for StoreUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        StoreUrl::new(&s).map_err(serde::de::Error::custom)
    }
}

impl AsRef<str> for StoreUrl {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stream(name: &str) -> StreamName {
        StreamName::new(name).unwrap()
    }

    #[test]
    fn valid_localhost_http() {
        let store = StoreUrl::new("http://localhost:2113").unwrap();
        assert_eq!(store.host(), Some("localhost"));
    }

    #[test]
    fn valid_remote_https() {
        let store = StoreUrl::new("https://es.example.com").unwrap();
        assert_eq!(store.host(), Some("es.example.com"));
    }

    #[test]
    fn stream_url_construction() {
        let store = StoreUrl::new("http://localhost:2113").unwrap();
        assert_eq!(
            store.stream_url(&stream("orders")).as_str(),
            "http://localhost:2113/streams/orders"
        );
    }

    #[test]
    fn trailing_slash_does_not_double() {
        let store = StoreUrl::new("http://localhost:2113/").unwrap();
        assert_eq!(
            store.stream_url(&stream("orders")).as_str(),
            "http://localhost:2113/streams/orders"
        );
    }

    #[test]
    fn path_prefix_is_kept() {
        let store = StoreUrl::new("https://proxy.example.com/es/").unwrap();
        assert_eq!(
            store.projection_url("$streams").as_str(),
            "https://proxy.example.com/es/projection/$streams"
        );
    }

    #[test]
    fn stream_name_is_segment_encoded() {
        let store = StoreUrl::new("http://localhost:2113").unwrap();
        assert_eq!(
            store.stream_url(&stream("my orders")).as_str(),
            "http://localhost:2113/streams/my%20orders"
        );
    }

    #[test]
    fn projection_command_urls() {
        let store = StoreUrl::new("http://localhost:2113").unwrap();
        assert_eq!(
            store
                .projection_command_url("$streams", ProjectionCommand::Enable)
                .as_str(),
            "http://localhost:2113/projection/$streams/command/enable"
        );
        assert_eq!(
            store
                .projection_command_url("$streams", ProjectionCommand::Disable)
                .as_str(),
            "http://localhost:2113/projection/$streams/command/disable"
        );
    }

    #[test]
    fn display_trims_trailing_slash() {
        let store = StoreUrl::new("http://localhost:2113/").unwrap();
        assert_eq!(store.to_string(), "http://localhost:2113");
    }

    #[test]
    fn invalid_relative_url() {
        assert!(StoreUrl::new("/streams/orders").is_err());
    }

    #[test]
    fn invalid_scheme() {
        assert!(StoreUrl::new("ftp://localhost:2113").is_err());
        assert!(StoreUrl::new("file:///tmp/store").is_err());
    }
}
