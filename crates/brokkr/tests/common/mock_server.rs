//! Mock server helpers for manifest and archive endpoints
//!
//! Provides utilities for setting up wiremock mock servers with the
//! response patterns the update pipeline consumes.

use std::time::Duration;

use brokkr::VersionManifest;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::constants::manifest_endpoint;

/// Mount the platform manifest endpoint serving this manifest as JSON
pub async fn mock_manifest(server: &MockServer, manifest: &VersionManifest) {
    let mut body = json!({
        "Version": manifest.version,
        "Checksum": manifest.checksum,
        "Path": manifest.path,
        "Datetime": manifest.datetime,
        "Size": manifest.size,
    });
    if let Some(binary) = &manifest.binary {
        body["Binary"] = json!(binary);
    }

    Mock::given(method("GET"))
        .and(path(manifest_endpoint()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Mount the platform manifest endpoint serving a raw body
pub async fn mock_manifest_body(server: &MockServer, body: &str) {
    Mock::given(method("GET"))
        .and(path(manifest_endpoint()))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

/// Mount the platform manifest endpoint answering with an error status
pub async fn mock_manifest_status(server: &MockServer, status: u16) {
    Mock::given(method("GET"))
        .and(path(manifest_endpoint()))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

/// Mount an archive endpoint serving the given bytes
pub async fn mock_archive(server: &MockServer, archive_path: &str, content: &[u8]) {
    Mock::given(method("GET"))
        .and(path(format!("/{archive_path}")))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(content.to_vec()))
        .mount(server)
        .await;
}

/// Mount an archive endpoint answering with an error status
pub async fn mock_archive_status(server: &MockServer, archive_path: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(format!("/{archive_path}")))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

/// Mount an archive endpoint that stalls before answering
pub async fn mock_slow_archive(
    server: &MockServer,
    archive_path: &str,
    content: &[u8],
    delay: Duration,
) {
    Mock::given(method("GET"))
        .and(path(format!("/{archive_path}")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(content.to_vec())
                .set_delay(delay),
        )
        .mount(server)
        .await;
}
