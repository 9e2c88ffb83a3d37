use crate::core::config::Config;
use crate::core::state::AppState;
use crate::stores::user_store::UserStore;
use axum::body::Body;
use axum::http::{header, HeaderMap, HeaderValue};
use axum::response::Response;
use http_body_util::BodyExt;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tempfile::TempDir;

/// AppState backed by a temp-dir store. The TempDir must be kept alive
/// for the duration of the test.
pub fn test_state() -> (Arc<AppState>, TempDir) {
    let dir = tempfile::tempdir().expect("create temp dir");

    let config: Config = toml::from_str(
        r#"
        [server]
        port = 5000
        num_threads = 1

        [provider]
        endpoint = "http://127.0.0.1:1/graphql"
        timeout_secs = 1
        "#,
    )
    .expect("parse test config");

    let store = UserStore::open(dir.path().join("users.json")).expect("open store");
    let state = AppState::new(config, store).expect("build state");

    (Arc::new(state), dir)
}

pub fn bearer_headers(token: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {token}")).expect("header value"),
    );
    headers
}

/// Collect a response body and decode it as JSON.
pub async fn read_json<T: DeserializeOwned>(response: Response) -> T {
    let body: Body = response.into_body();
    let bytes = body.collect().await.expect("collect body").to_bytes();
    serde_json::from_slice(&bytes).expect("decode JSON body")
}
