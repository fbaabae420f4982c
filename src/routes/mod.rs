// src/routes/mod.rs
pub mod chat;

use std::{any::Any, path::Path};

use crate::{error::AppError, state::SharedState};
use axum::{
    Router,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chat::chat_handler;
use tower_http::{
    catch_panic::CatchPanicLayer, cors::CorsLayer, services::ServeDir, trace::TraceLayer,
};

pub fn create_router(static_dir: impl AsRef<Path>) -> Router<SharedState> {
    Router::new()
        .route("/api/chat", post(chat_handler))
        .route("/health", get(|| async { "OK" }))
        .fallback_service(ServeDir::new(static_dir))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::very_permissive())
}

fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    };

    AppError::Internal(format!("handler panicked: {detail}")).into_response()
}
