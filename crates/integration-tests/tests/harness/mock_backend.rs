//! Mock generation backend for integration tests
//!
//! Serves `POST /api/generate` and `GET /health` on an ephemeral port and
//! records what it received.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing};
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;

/// How the generate endpoint answers
#[derive(Debug, Clone)]
pub enum Mode {
    /// 200 with one image per `(b64_json, filetype)`
    Images(Vec<(String, String)>),
    /// Error status with a JSON body
    JsonError { status: StatusCode, body: Value },
    /// Error status with a body that is not JSON
    PlainError { status: StatusCode, body: String },
    /// 200 with a body missing the `images` field
    Malformed,
}

impl Mode {
    /// Success with `n` PNG images whose payloads are `IMG0`, `IMG1`, …
    pub fn images(n: usize) -> Self {
        Self::Images((0..n).map(|i| (format!("IMG{i}"), "png".to_owned())).collect())
    }

    /// 400 carrying `{"detail": detail}`
    pub fn detail(detail: &str) -> Self {
        Self::JsonError {
            status: StatusCode::BAD_REQUEST,
            body: json!({ "detail": detail }),
        }
    }
}

/// Mock backend handle; the server stops when this is dropped
pub struct MockBackend {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockState>,
}

struct MockState {
    mode: Mutex<Mode>,
    generate_count: AtomicU32,
    health_count: AtomicU32,
    bodies: Mutex<Vec<Value>>,
    api_keys: Mutex<Vec<Option<String>>>,
}

impl MockBackend {
    /// Start the mock server, returning immediately
    pub async fn start(mode: Mode) -> anyhow::Result<Self> {
        let state = Arc::new(MockState {
            mode: Mutex::new(mode),
            generate_count: AtomicU32::new(0),
            health_count: AtomicU32::new(0),
            bodies: Mutex::new(Vec::new()),
            api_keys: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/api/generate", routing::post(handle_generate))
            .route("/health", routing::get(handle_health))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown, state })
    }

    /// Origin to point the client at
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Change how subsequent requests are answered
    pub fn set_mode(&self, mode: Mode) {
        *self.state.mode.lock().unwrap() = mode;
    }

    /// Number of generate requests received
    pub fn generate_count(&self) -> u32 {
        self.state.generate_count.load(Ordering::Relaxed)
    }

    pub fn health_count(&self) -> u32 {
        self.state.health_count.load(Ordering::Relaxed)
    }

    /// JSON bodies of generate requests, oldest first
    pub fn bodies(&self) -> Vec<Value> {
        self.state.bodies.lock().unwrap().clone()
    }

    /// `x-api-key` values seen on generate requests
    pub fn api_keys(&self) -> Vec<Option<String>> {
        self.state.api_keys.lock().unwrap().clone()
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn handle_generate(State(state): State<Arc<MockState>>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    state.generate_count.fetch_add(1, Ordering::Relaxed);
    state.bodies.lock().unwrap().push(body);
    state.api_keys.lock().unwrap().push(
        headers
            .get("x-api-key")
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned),
    );

    let mode = state.mode.lock().unwrap().clone();

    match mode {
        Mode::Images(images) => {
            let images: Vec<Value> = images
                .into_iter()
                .map(|(b64_json, filetype)| json!({ "b64_json": b64_json, "filetype": filetype, "size": "1024x1024" }))
                .collect();

            Json(json!({
                "id": "gen-mock",
                "created": 1_700_000_000,
                "model": "gpt-image-1",
                "images": images,
            }))
            .into_response()
        }
        Mode::JsonError { status, body } => (status, Json(body)).into_response(),
        Mode::PlainError { status, body } => (status, body).into_response(),
        Mode::Malformed => Json(json!({ "data": [] })).into_response(),
    }
}

async fn handle_health(State(state): State<Arc<MockState>>) -> impl IntoResponse {
    state.health_count.fetch_add(1, Ordering::Relaxed);
    Json(json!({ "status": "ok", "api_version": "1.0.0" }))
}
