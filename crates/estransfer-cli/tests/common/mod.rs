//! Helpers for running the binary against a wiremock store.

#![allow(dead_code)]

use std::process::{Output, Stdio};

use serde_json::{Value, json};
use tokio::process::Command;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

/// Run the CLI binary against `server` with no stdin.
pub async fn run_cli(server: &MockServer, args: &[&str]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_estransfer"));
    cmd.args(args)
        .args(["--address", &server.uri(), "--poll-interval-ms", "5"])
        .env_remove("ESTRANSFER_ADDRESS")
        .env_remove("ESTRANSFER_USERNAME")
        .env_remove("ESTRANSFER_PASSWORD")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1")
        .stdin(Stdio::null());
    cmd.output().await.expect("Failed to execute CLI")
}

/// Run the CLI and expect success, returning stdout.
pub async fn run_cli_success(server: &MockServer, args: &[&str]) -> String {
    let output = run_cli(server, args).await;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

/// Serve `events` (oldest first, as `(id, type)`) on one page, newest first.
pub async fn mount_stream(server: &MockServer, stream: &str, events: &[(&str, &str)]) {
    let entries: Vec<Value> = events
        .iter()
        .enumerate()
        .rev()
        .map(|(number, _)| {
            let uri = format!("{}/streams/{}/{}", server.uri(), stream, number);
            json!({
                "title": format!("{}@{}", number, stream),
                "id": uri,
                "links": [{"uri": uri, "relation": "edit"}]
            })
        })
        .collect();
    mount_page(server, stream, entries).await;

    for (number, (id, event_type)) in events.iter().enumerate() {
        Mock::given(method("GET"))
            .and(path(format!("/streams/{}/{}", stream, number)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "title": format!("{}@{}", number, stream),
                "content": {
                    "eventStreamId": stream,
                    "eventNumber": number,
                    "eventId": id,
                    "eventType": event_type,
                    "data": {"n": number}
                }
            })))
            .mount(server)
            .await;
    }
}

/// Serve a single page holding `entries` and no `next` link.
pub async fn mount_page(server: &MockServer, stream: &str, entries: Vec<Value>) {
    Mock::given(method("GET"))
        .and(path(format!("/streams/{}", stream)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "links": [{"uri": format!("{}/streams/{}", server.uri(), stream), "relation": "self"}],
            "entries": entries
        })))
        .mount(server)
        .await;
}

/// A `$streams` projection that completes at once, indexing `names`.
pub async fn mount_discovery(server: &MockServer, names: &[&str]) {
    for command in ["enable", "disable"] {
        Mock::given(method("POST"))
            .and(path(format!("/projection/$streams/command/{}", command)))
            .respond_with(ResponseTemplate::new(200))
            .mount(server)
            .await;
    }
    Mock::given(method("GET"))
        .and(path("/projection/$streams"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"progress": 100.0})))
        .mount(server)
        .await;

    let entries = names
        .iter()
        .map(|name| json!({"title": format!("0@{}", name), "links": []}))
        .collect();
    mount_page(server, "$streams", entries).await;
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
    requests(server)
        .await
        .iter()
        .filter(|r| r.method.as_str() == "POST" && r.url.path().starts_with("/streams/"))
        .map(|r| serde_json::from_slice(&r.body).unwrap())
        .collect()
}

pub async fn requests(server: &MockServer) -> Vec<Request> {
    server.received_requests().await.unwrap_or_default()
}
