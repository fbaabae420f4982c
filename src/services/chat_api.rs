// src/services/chat_api.rs
use reqwest::Client;

use crate::message::{ChatRequest, ChatResponse};

/// Calls `POST /api/chat` on a running server, the way the browser page does.
#[derive(Clone, Debug)]
pub struct ChatApi {
    http: Client,
    url: String,
}

impl ChatApi {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: Client::new(),
            url: format!("{}/api/chat", base_url.trim_end_matches('/')),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// `None` on transport errors, non-2xx statuses, or a body without `answer`.
    pub async fn ask(&self, question: &str) -> Option<String> {
        let request = ChatRequest {
            question: question.to_string(),
        };

        let response = match self.http.post(&self.url).json(&request).send().await {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(url = %self.url, error = %err, "chat request failed");
                return None;
            }
        };

        if !response.status().is_success() {
            tracing::warn!(url = %self.url, status = %response.status(), "chat request rejected");
            return None;
        }

        match response.json::<ChatResponse>().await {
            Ok(body) => Some(body.answer),
            Err(err) => {
                tracing::warn!(url = %self.url, error = %err, "unreadable chat response");
                None
            }
        }
    }
}
