//! Shared helpers for API client integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use mojio_domain::ClientConfig;
use mojio_infra::ApiClient;
use once_cell::sync::Lazy;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

static TRACING: Lazy<()> = Lazy::new(|| {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
});

/// Route test output through the libtest capture.
pub fn init_tracing() {
    Lazy::force(&TRACING);
}

/// Configuration pointing both the API and the OAuth provider at `server`.
pub fn config_for(server: &MockServer) -> ClientConfig {
    let mut config = ClientConfig::new("test-app", "test-secret");
    config.base_url = format!("{}/{{version}}", server.uri());
    config.oauth_base_url = server.uri();
    config.timeout_secs = 5;
    config
}

pub fn client_for(server: &MockServer) -> Arc<ApiClient> {
    init_tracing();
    Arc::new(ApiClient::new(config_for(server)).expect("client should build"))
}

/// Token endpoint answering every grant with `access_token`.
pub async fn mount_token_endpoint(server: &MockServer, access_token: &str) {
    Mock::given(method("POST"))
        .and(path("/OAuth2/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": access_token,
            "refresh_token": format!("{access_token}-refresh"),
            "expires_in": 3600,
            "token_type": "bearer"
        })))
        .mount(server)
        .await;
}

/// `Authorization` header values of every request the server saw, in order.
pub async fn authorization_headers(server: &MockServer) -> Vec<Option<String>> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|request| !request.url.path().starts_with("/OAuth2"))
        .map(|request| {
            request
                .headers
                .get("authorization")
                .and_then(|value| value.to_str().ok())
                .map(str::to_string)
        })
        .collect()
}
