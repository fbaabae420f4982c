#![allow(dead_code)]

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use axum::{Json, Router, http::StatusCode, http::header::CONTENT_TYPE, routing::post};
use serde_json::{Value, json};
use sustainability_chatbot::{config::RelayConfig, routes::create_router, state::AppState};

/// Nothing listens on port 1.
pub const UNREACHABLE_ENDPOINT: &str = "http://127.0.0.1:1/predict";

pub struct MockPrediction {
    pub url: String,
    pub hits: Arc<AtomicUsize>,
}

impl MockPrediction {
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

async fn serve(app: Router, hits: Arc<AtomicUsize>) -> MockPrediction {
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockPrediction {
        url: format!("http://{addr}/predict"),
        hits,
    }
}

/// Replies to every prediction with the same status and raw body.
pub async fn spawn_fixed(status: StatusCode, body: &'static str) -> MockPrediction {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    let app = Router::new().route(
        "/predict",
        post(move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                (status, [(CONTENT_TYPE, "application/json")], body)
            }
        }),
    );
    serve(app, hits).await
}

/// Answers `echo: <prompt>`, proving the outbound payload shape.
pub async fn spawn_echo() -> MockPrediction {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    let app = Router::new().route(
        "/predict",
        post(move |Json(payload): Json<Value>| {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                let prompt = payload["prompt"].as_str().unwrap_or("<missing prompt>");
                Json(json!({ "answer": format!("echo: {prompt}") }))
            }
        }),
    );
    serve(app, hits).await
}

pub fn relay_config(endpoint: &str) -> RelayConfig {
    RelayConfig {
        endpoint: endpoint.to_string(),
        timeout: None,
    }
}

pub fn test_app(endpoint: &str) -> Router {
    let state = AppState::shared(&relay_config(endpoint)).unwrap();
    create_router("public").with_state(state)
}

/// Runs the chat server on an ephemeral port and returns its base URL.
pub async fn spawn_app(endpoint: &str) -> String {
    let app = test_app(endpoint);
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}
