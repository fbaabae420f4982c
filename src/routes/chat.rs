use axum::{Json, body::Bytes, extract::State};
use serde_json::Value;

use crate::{
    error::{AppError, AppResult},
    message::ChatResponse,
    state::SharedState,
};

pub async fn chat_handler(
    State(state): State<SharedState>,
    body: Bytes,
) -> AppResult<Json<ChatResponse>> {
    let question = parse_question(&body)?;
    let answer = state.relay.ask(&question).await;
    Ok(Json(ChatResponse { answer }))
}

/// Pulls the `question` string out of a raw JSON body, unchanged.
pub fn parse_question(body: &[u8]) -> AppResult<String> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(AppError::BadRequest("empty body".to_string()));
    }

    let value: Value = serde_json::from_slice(body)
        .map_err(|e| AppError::BadRequest(format!("malformed JSON: {e}")))?;

    match value.get("question") {
        Some(Value::String(q)) if q.is_empty() => {
            Err(AppError::BadRequest("question is empty".to_string()))
        }
        Some(Value::String(q)) => Ok(q.clone()),
        Some(other) => Err(AppError::BadRequest(format!(
            "question must be a string, got {}",
            json_kind(other)
        ))),
        None => Err(AppError::BadRequest("missing question field".to_string())),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
