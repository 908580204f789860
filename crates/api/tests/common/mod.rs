#![allow(dead_code)]

use std::io::Write;
use std::net::{IpAddr, Ipv4Addr};

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use relay_api::config::{ExecutionMode, ServerConfig};
use relay_api::router::build_app_router;
use relay_api::state::AppState;
use relay_core::scripting::runtime::ScriptRuntime;

/// Build a test `ServerConfig` pointing at `script_path`, run through bash.
///
/// Scripts get a 5-second timeout; the request timeout stays above it so
/// script failures, not the middleware, decide the response.
pub fn test_config(script_path: &str) -> ServerConfig {
    ServerConfig {
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 0,
        mode: ExecutionMode::Local,
        script_path: script_path.to_string(),
        script_runtime: ScriptRuntime::Shell,
        script_working_dir: None,
        script_timeout_secs: 5,
        request_timeout_secs: 30,
    }
}

/// Write a bash stub script with the given body to a temp file.
pub fn stub_script(body: &str) -> tempfile::TempPath {
    let mut f = tempfile::Builder::new()
        .prefix("llm_service_stub")
        .suffix(".sh")
        .tempfile()
        .expect("create stub script");
    writeln!(f, "#!/bin/bash").expect("write shebang");
    write!(f, "{body}").expect("write body");
    f.flush().expect("flush stub script");
    f.into_temp_path()
}

/// Build the full application router (same middleware as production)
/// backed by a stub script with the given body.
///
/// The returned path must be kept alive for as long as the app is used.
pub fn build_test_app(script_body: &str) -> (tempfile::TempPath, Router) {
    let script = stub_script(script_body);
    let config = test_config(script.to_str().expect("script path"));
    (script, build_app_from_config(config))
}

pub fn build_app_from_config(config: ServerConfig) -> Router {
    build_app_router(AppState::new(config))
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_raw(app: Router, uri: &str, content_type: &str, body: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", content_type)
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// `(route, required field, script operation)` for every generation endpoint.
pub const GENERATION_ROUTES: [(&str, &str, &str); 4] = [
    ("/api/keywords", "seedKeyword", "generate_keywords"),
    ("/api/titles", "keyword", "generate_titles"),
    ("/api/topics", "title", "generate_topics"),
    ("/api/content", "topic", "generate_content"),
];
