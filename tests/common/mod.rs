//! In-process fake of the search backend for integration tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::{Query, RawQuery, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

use semantic_search_panel::{BackendClient, Config, SearchPanel};

/// What `/search` answers with.
#[derive(Clone)]
#[allow(dead_code)]
pub enum SearchReply {
    /// `num_results` hits with urls `https://example.test/<q>/<i>`.
    Echo,
    /// Fixed body, sent as JSON.
    Raw(String),
}

#[derive(Default)]
pub struct Recorder {
    calls: Mutex<Vec<(&'static str, String)>>,
}

#[allow(dead_code)]
impl Recorder {
    fn record(&self, endpoint: &'static str, query: String) {
        self.calls.lock().unwrap().push((endpoint, query));
    }

    pub fn count(&self, endpoint: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|(e, _)| *e == endpoint).count()
    }

    pub fn endpoints(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().iter().map(|(e, _)| *e).collect()
    }

    /// Raw query strings received by one endpoint, in arrival order.
    pub fn queries(&self, endpoint: &str) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(e, _)| *e == endpoint)
            .map(|(_, q)| q.clone())
            .collect()
    }

    /// Polls until `endpoint` has been hit `n` times.
    pub async fn wait_for(&self, endpoint: &str, n: usize) {
        for _ in 0..200 {
            if self.count(endpoint) >= n {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("{} was not hit {} times", endpoint, n);
    }
}

#[derive(Clone)]
pub struct FakeBackend {
    pub health_status: StatusCode,
    pub health_delay: Option<Duration>,
    pub search_status: StatusCode,
    pub search_reply: SearchReply,
    pub summarize_status: StatusCode,
    /// Fixed `/summarize` body; the summary echoes the url when unset.
    pub summarize_body: Option<String>,
    /// Requests whose raw query contains the key are delayed.
    pub slow: Vec<(String, Duration)>,
    pub recorder: Arc<Recorder>,
}

impl Default for FakeBackend {
    fn default() -> Self {
        FakeBackend {
            health_status: StatusCode::OK,
            health_delay: None,
            search_status: StatusCode::OK,
            search_reply: SearchReply::Echo,
            summarize_status: StatusCode::OK,
            summarize_body: None,
            slow: Vec::new(),
            recorder: Arc::new(Recorder::default()),
        }
    }
}

impl FakeBackend {
    fn delay_for(&self, raw_query: &str) -> Option<Duration> {
        self.slow
            .iter()
            .find(|(needle, _)| raw_query.contains(needle.as_str()))
            .map(|(_, delay)| *delay)
    }
}

fn create_router(backend: FakeBackend) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/search", get(search_handler))
        .route("/summarize", get(summarize_handler))
        .route("/test-exa", get(provider_handler))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(backend)
}

async fn health_handler(State(backend): State<FakeBackend>) -> impl IntoResponse {
    backend.recorder.record("health", String::new());
    if let Some(delay) = backend.health_delay {
        tokio::time::sleep(delay).await;
    }
    (backend.health_status, Json(json!({ "status": "ok" })))
}

async fn search_handler(
    State(backend): State<FakeBackend>,
    RawQuery(raw): RawQuery,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    let raw = raw.unwrap_or_default();
    backend.recorder.record("search", raw.clone());
    if let Some(delay) = backend.delay_for(&raw) {
        tokio::time::sleep(delay).await;
    }

    let body = match &backend.search_reply {
        SearchReply::Raw(body) => body.clone(),
        SearchReply::Echo => {
            let q = params.get("q").cloned().unwrap_or_default();
            let n: usize = params
                .get("num_results")
                .and_then(|n| n.parse().ok())
                .unwrap_or(10);
            let results: Vec<_> = (1..=n)
                .map(|i| {
                    json!({
                        "url": format!("https://example.test/{}/{}", q.replace(' ', "-"), i),
                        "title": format!("{} #{}", q, i),
                        "text": format!("Preview {}", i),
                    })
                })
                .collect();
            json!({ "results": results }).to_string()
        }
    };

    (
        backend.search_status,
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
}

async fn summarize_handler(
    State(backend): State<FakeBackend>,
    RawQuery(raw): RawQuery,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    let raw = raw.unwrap_or_default();
    backend.recorder.record("summarize", raw.clone());
    if let Some(delay) = backend.delay_for(&raw) {
        tokio::time::sleep(delay).await;
    }
    let body = match &backend.summarize_body {
        Some(body) => body.clone(),
        None => {
            let url = params.get("url").cloned().unwrap_or_default();
            json!({ "summary": format!("Summary of {}", url) }).to_string()
        }
    };
    (
        backend.summarize_status,
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
}

async fn provider_handler(State(backend): State<FakeBackend>) -> impl IntoResponse {
    backend.recorder.record("test-exa", String::new());
    Json(json!({
        "status": "success",
        "message": "Exa API is working",
        "results_count": 1,
    }))
}

/// Starts the fake on an ephemeral port and returns its base address.
pub async fn spawn_backend(backend: FakeBackend) -> (String, Arc<Recorder>) {
    let recorder = backend.recorder.clone();
    let app = create_router(backend);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{}", addr), recorder)
}

/// An address nothing listens on.
#[allow(dead_code)]
pub async fn dead_address() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

pub fn client_for(base_url: &str) -> BackendClient {
    let config = Config::default().with_backend_url(base_url).unwrap();
    BackendClient::new(&config).unwrap()
}

#[allow(dead_code)]
pub fn panel_for(base_url: &str) -> SearchPanel {
    SearchPanel::new(client_for(base_url))
}
