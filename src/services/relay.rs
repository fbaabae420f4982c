// src/services/relay.rs
//! Forwards a question to the external prediction service.
//!
//! [`PredictionClient::ask`] never fails: every outbound problem is logged and
//! collapsed into [`FALLBACK_ANSWER`]. [`PredictionClient::try_ask`] keeps the
//! failure kind for callers that want it.

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::RelayConfig;

pub const FALLBACK_ANSWER: &str = "Connection failed. Please try again later.";
pub const CLARIFICATION_ANSWER: &str = "I didn't understand that question.";

#[derive(Debug, Serialize)]
struct PredictRequest<'a> {
    prompt: &'a str,
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    answer: Option<String>,
    status: Option<String>,
    error: Option<String>,
}

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("prediction service unreachable: {0}")]
    Network(#[source] reqwest::Error),

    #[error("prediction service returned {0}")]
    Status(StatusCode),

    #[error("malformed prediction response: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("prediction service reported an error: {0}")]
    Remote(String),
}

#[derive(Clone, Debug)]
pub struct PredictionClient {
    http: Client,
    endpoint: String,
}

impl PredictionClient {
    pub fn new(config: &RelayConfig) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            endpoint: config.endpoint.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Best-effort answer for `question`.
    pub async fn ask(&self, question: &str) -> String {
        match self.try_ask(question).await {
            Ok(answer) => answer,
            Err(err) => {
                tracing::error!(endpoint = %self.endpoint, error = %err, "prediction relay failed");
                FALLBACK_ANSWER.to_string()
            }
        }
    }

    /// One POST, no retry.
    pub async fn try_ask(&self, question: &str) -> Result<String, RelayError> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(&PredictRequest { prompt: question })
            .send()
            .await
            .map_err(RelayError::Network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(RelayError::Status(status));
        }

        let body = response.bytes().await.map_err(RelayError::Network)?;
        let answer = extract_answer(&body)?;
        tracing::debug!(endpoint = %self.endpoint, "prediction relay answered");
        Ok(answer)
    }
}

fn extract_answer(body: &[u8]) -> Result<String, RelayError> {
    let parsed: PredictResponse = serde_json::from_slice(body).map_err(RelayError::Parse)?;

    let failed = parsed
        .status
        .as_deref()
        .is_some_and(|s| s.eq_ignore_ascii_case("error"));
    if failed || parsed.error.is_some() {
        return Err(RelayError::Remote(
            parsed.error.unwrap_or_else(|| "unspecified".to_string()),
        ));
    }

    Ok(parsed
        .answer
        .filter(|a| !a.is_empty())
        .unwrap_or_else(|| CLARIFICATION_ANSWER.to_string()))
}
