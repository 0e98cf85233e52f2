//! HTTP client for the store's API.

use std::sync::Arc;

use reqwest::header::{ACCEPT, CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument, trace};

use estransfer_core::config::{ATOM_JSON, EVENTS_JSON, JSON};
use estransfer_core::error::{Error, FormatError, ProtocolError, TransportError};
use estransfer_core::{
    ClientConfig, EventRecord, Page, ProjectionCommand, ProjectionStatus, Result, StoreUrl,
    StreamName,
};

/// Longest response body kept in a [`ProtocolError`].
const ERROR_BODY_LIMIT: usize = 512;

/// HTTP client bound to one store and one [`ClientConfig`].
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct StoreClient {
    http: reqwest::Client,
    config: Arc<ClientConfig>,
}

impl StoreClient {
    /// Create a client for the configured store.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.request_timeout)
            .build()
            .map_err(transport)?;

        Ok(Self {
            http,
            config: Arc::new(config),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns the store URL this client talks to.
    pub fn store(&self) -> &StoreUrl {
        &self.config.store
    }

    /// Fetch one page of a stream collection.
    #[instrument(skip(self))]
    pub async fn fetch_page(&self, uri: &str) -> Result<Page> {
        debug!("Fetching stream page");
        self.get_json(uri, ATOM_JSON).await
    }

    /// Fetch the full body of one event entry.
    #[instrument(skip(self))]
    pub async fn fetch_event(&self, uri: &str) -> Result<Value> {
        debug!("Fetching event");
        self.get_json(uri, ATOM_JSON).await
    }

    /// Append one record to a stream.
    ///
    /// Only `200 OK` and `201 Created` count as success.
    #[instrument(skip(self, record), fields(%stream, event_id = %record.event_id))]
    pub async fn append(&self, stream: &StreamName, record: &EventRecord) -> Result<()> {
        let url = self.store().stream_url(stream);
        debug!(event_type = %record.event_type, "Appending event");

        let response = self
            .request(Method::POST, url.as_str())
            .header(CONTENT_TYPE, EVENTS_JSON)
            .header(ACCEPT, JSON)
            .json(&[record])
            .send()
            .await
            .map_err(transport)?;

        match response.status() {
            StatusCode::OK | StatusCode::CREATED => Ok(()),
            _ => Err(protocol_error(url.as_str(), response).await),
        }
    }

    /// Send a command to a projection.
    #[instrument(skip(self))]
    pub async fn projection_command(
        &self,
        projection: &str,
        command: ProjectionCommand,
    ) -> Result<()> {
        let url = self.store().projection_command_url(projection, command);
        debug!(command = command.as_str(), "Sending projection command");

        let response = self
            .request(Method::POST, url.as_str())
            .header(CONTENT_LENGTH, "0")
            .send()
            .await
            .map_err(transport)?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(protocol_error(url.as_str(), response).await)
        }
    }

    /// Fetch a projection's status document.
    #[instrument(skip(self))]
    pub async fn projection_status(&self, projection: &str) -> Result<ProjectionStatus> {
        let url = self.store().projection_url(projection);
        self.get_json(url.as_str(), JSON).await
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let builder = self.http.request(method, url);
        match &self.config.credentials {
            Some(credentials) => {
                builder.basic_auth(credentials.username(), Some(credentials.password()))
            }
            None => builder,
        }
    }

    async fn get_json<R: DeserializeOwned>(&self, url: &str, accept: &str) -> Result<R> {
        let response = self
            .request(Method::GET, url)
            .header(ACCEPT, accept)
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        trace!(status = %status, "Response");
        if !status.is_success() {
            return Err(protocol_error(url, response).await);
        }

        let body = response.bytes().await.map_err(transport)?;
        serde_json::from_slice(&body).map_err(|e| {
            FormatError::Body {
                url: url.to_string(),
                reason: e.to_string(),
            }
            .into()
        })
    }
}

/// Map a reqwest error onto the transport taxonomy.
pub(crate) fn transport(err: reqwest::Error) -> Error {
    let message = err.to_string();
    let err = if err.is_timeout() {
        TransportError::Timeout { message }
    } else if err.is_connect() {
        TransportError::Connection { message }
    } else {
        TransportError::Http { message }
    };
    Error::Transport(err)
}

async fn protocol_error(url: &str, response: reqwest::Response) -> Error {
    let status = response.status().as_u16();
    let body = response.text().await.ok().map(|mut text| {
        if text.len() > ERROR_BODY_LIMIT {
            let mut cut = ERROR_BODY_LIMIT;
            while !text.is_char_boundary(cut) {
                cut -= 1;
            }
            text.truncate(cut);
        }
        text
    });
    Error::Protocol(ProtocolError::new(status, url, body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_creation() {
        let store = StoreUrl::new("http://localhost:2113").unwrap();
        let client = StoreClient::new(ClientConfig::new(store.clone())).unwrap();
        assert_eq!(client.store(), &store);
    }
}
