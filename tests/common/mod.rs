//! Shared test utilities and fixtures
//!
//! Common infrastructure for integration tests.

#![allow(dead_code)]

use serde_json::Value;
use tenant_fetch_runner::RequestRunner;
use tenant_fetch_transport::HttpTransport;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Start a mock server that simulates the tenant API
pub async fn start_tenant_mock() -> MockServer {
    MockServer::start().await
}

/// Mount a `GET` that answers with `{"item": item}`
pub async fn mount_item(server: &MockServer, route: &str, item: Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "item": item })))
        .mount(server)
        .await;
}

/// Mount a `GET` that answers with `status` and a JSON body
pub async fn mount_status(server: &MockServer, route: &str, status: u16, body: Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

/// Runner over an HTTP transport rooted at the mock server
pub fn runner_for(server: &MockServer) -> RequestRunner<HttpTransport> {
    let transport = HttpTransport::builder(server.uri())
        .user_agent("tenant-fetch-test/1.0")
        .build()
        .expect("mock server URI is a valid root");
    RequestRunner::new(transport)
}
