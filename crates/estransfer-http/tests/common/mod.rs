//! Helpers for emulating the store's HTTP API with wiremock.

#![allow(dead_code)]

use std::time::Duration;

use estransfer_core::config::ATOM_JSON;
use estransfer_core::{ClientConfig, StoreUrl, StreamName};
use estransfer_http::StoreClient;
use serde_json::{Value, json};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

/// An event as the store holds it.
pub struct StoredEvent {
    pub id: &'static str,
    pub event_type: &'static str,
    pub data: Value,
}

pub fn event(id: &'static str, event_type: &'static str, data: Value) -> StoredEvent {
    StoredEvent {
        id,
        event_type,
        data,
    }
}

/// Client for a mock server with a fast poll interval.
pub fn client_for(server: &MockServer) -> StoreClient {
    let store = StoreUrl::new(server.uri()).unwrap();
    StoreClient::new(ClientConfig::new(store).with_poll_interval(Duration::from_millis(5))).unwrap()
}

pub fn stream(name: &str) -> StreamName {
    StreamName::new(name).unwrap()
}

pub fn event_path(stream: &str, number: usize) -> String {
    format!("/streams/{}/{}", stream, number)
}

pub fn page_path(stream: &str, page: usize) -> String {
    if page == 0 {
        format!("/streams/{}", stream)
    } else {
        format!("/streams/{}/page/{}", stream, page)
    }
}

/// Entry reference as listed on a page.
pub fn entry_json(server: &MockServer, stream: &str, number: usize, event_type: &str) -> Value {
    let uri = format!("{}{}", server.uri(), event_path(stream, number));
    json!({
        "title": format!("{}@{}", number, stream),
        "id": uri,
        "summary": event_type,
        "links": [
            {"uri": uri, "relation": "edit"},
            {"uri": uri, "relation": "alternate"}
        ]
    })
}

/// Full entry body served for a single event.
pub fn event_body(stream: &str, number: usize, event: &StoredEvent) -> Value {
    json!({
        "title": format!("{}@{}", number, stream),
        "content": {
            "eventStreamId": stream,
            "eventNumber": number,
            "eventType": event.event_type,
            "eventId": event.id,
            "data": event.data,
            "metadata": ""
        }
    })
}

/// Page body with the given entries and an optional `next` page.
pub fn page_json(server: &MockServer, stream: &str, entries: Vec<Value>, next: Option<usize>) -> Value {
    let mut links = vec![json!({
        "uri": format!("{}/streams/{}", server.uri(), stream),
        "relation": "self"
    })];
    if let Some(next) = next {
        links.push(json!({
            "uri": format!("{}{}", server.uri(), page_path(stream, next)),
            "relation": "next"
        }));
    }
    json!({ "links": links, "entries": entries })
}

pub async fn mount_page(server: &MockServer, stream: &str, page: usize, body: Value) {
    Mock::given(method("GET"))
        .and(path(page_path(stream, page)))
        .and(header("accept", ATOM_JSON))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Serve `events` (oldest first) as a stream split into pages of `per_page`,
/// newest first, with each event's content behind its own link.
pub async fn mount_stream(server: &MockServer, stream: &str, events: &[StoredEvent], per_page: usize) {
    let newest_first: Vec<(usize, &StoredEvent)> = events.iter().enumerate().rev().collect();
    let chunks: Vec<_> = newest_first.chunks(per_page.max(1)).collect();

    for (page, chunk) in chunks.iter().enumerate() {
        let entries = chunk
            .iter()
            .map(|(number, ev)| entry_json(server, stream, *number, ev.event_type))
            .collect();
        let next = (page + 1 < chunks.len()).then_some(page + 1);
        mount_page(server, stream, page, page_json(server, stream, entries, next)).await;
    }

    for (number, ev) in events.iter().enumerate() {
        Mock::given(method("GET"))
            .and(path(event_path(stream, number)))
            .and(header("accept", ATOM_JSON))
            .respond_with(ResponseTemplate::new(200).set_body_json(event_body(stream, number, ev)))
            .mount(server)
            .await;
    }
}

/// Accept every append to `stream` with `201 Created`.
pub async fn accept_appends(server: &MockServer, stream: &str) {
    Mock::given(method("POST"))
        .and(path(format!("/streams/{}", stream)))
        .respond_with(ResponseTemplate::new(201))
        .mount(server)
        .await;
}

/// Bodies of all append requests received, in arrival order.
pub async fn appended(server: &MockServer) -> Vec<Value> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|r: &&Request| r.method.as_str() == "POST" && r.url.path().starts_with("/streams/"))
        .map(|r| serde_json::from_slice(&r.body).unwrap())
        .collect()
}

/// The append body expected for one event.
pub fn append_body(event: &StoredEvent) -> Value {
    json!([{ "eventId": event.id, "eventType": event.event_type, "data": event.data }])
}
