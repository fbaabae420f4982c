// src/message.rs
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct ChatRequest {
    pub question: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ChatResponse {
    pub answer: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
