//! Client configuration threaded through every transfer component.

use std::time::Duration;

use crate::credentials::Credentials;
use crate::types::StoreUrl;

/// Media type of Atom-style JSON stream pages and entries.
pub const ATOM_JSON: &str = "application/vnd.eventstore.atom+json";

/// Media type of an append request body.
pub const EVENTS_JSON: &str = "application/vnd.eventstore.events+json";

/// Plain JSON, used for projection status and append responses.
pub const JSON: &str = "application/json";

/// How often projection progress is polled.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Upper bound on a single HTTP round-trip.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Everything a component needs to talk to one store.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use estransfer_core::{ClientConfig, Credentials, StoreUrl};
///
/// let store = StoreUrl::new("http://localhost:2113").unwrap();
/// let config = ClientConfig::new(store)
///     .with_credentials(Credentials::new("admin", "changeit"))
///     .with_poll_interval(Duration::from_millis(250));
/// assert_eq!(config.poll_interval, Duration::from_millis(250));
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the store's HTTP API.
    pub store: StoreUrl,
    /// Basic-auth credentials, if the store requires them.
    pub credentials: Option<Credentials>,
    /// Delay between projection status polls.
    pub poll_interval: Duration,
    /// Timeout applied to each request.
    pub request_timeout: Duration,
    /// User-Agent header value.
    pub user_agent: String,
}

impl ClientConfig {
    /// Configuration with defaults for everything but the store URL.
    pub fn new(store: StoreUrl) -> Self {
        Self {
            store,
            credentials: None,
            poll_interval: DEFAULT_POLL_INTERVAL,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            user_agent: concat!("estransfer/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}
