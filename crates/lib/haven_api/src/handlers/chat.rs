// @awa-component: CHAT-ChatHandler
//
//! Chat relay endpoint.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde_json::Value;
use tracing::debug;

use haven_core::relay::{RelayError, TIMEOUT_REPLY_TEXT};

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::models::{ChatRequest, ChatResponse};

pub const MESSAGE_REQUIRED: &str = "Message is required";
pub const INVALID_BODY: &str = "Request body must be a JSON object";

/// JavaScript-style truthiness: the front door only rejects falsy messages;
/// anything else is left to relay validation.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// `POST /api/chat` — relay a message to the assistant.
///
/// Validation and assistant failures come back as `200` with user-facing
/// text; only a poll timeout surfaces as `504`.
pub async fn chat_handler(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> AppResult<Json<ChatResponse>> {
    let Json(body) = payload.map_err(|rejection| {
        debug!("rejected chat body: {rejection}");
        match rejection {
            // A non-JSON post carries no message field at all.
            JsonRejection::MissingJsonContentType(_) => {
                AppError::Validation(MESSAGE_REQUIRED.into())
            }
            _ => AppError::Validation(INVALID_BODY.into()),
        }
    })?;

    let message = body
        .message
        .filter(is_truthy)
        .ok_or_else(|| AppError::Validation(MESSAGE_REQUIRED.into()))?;

    let response = match state.relay.try_get_response(message.as_str()).await {
        Ok(reply) => reply,
        Err(RelayError::Timeout { .. }) => {
            return Err(AppError::GatewayTimeout(TIMEOUT_REPLY_TEXT.into()));
        }
        Err(e) => e.user_message(),
    };

    Ok(Json(ChatResponse { response }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn falsy_values() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!(0.0)));
        assert!(!is_truthy(&json!("")));
    }

    #[test]
    fn truthy_values() {
        assert!(is_truthy(&json!("   ")));
        assert!(is_truthy(&json!(42)));
        assert!(is_truthy(&json!(true)));
        assert!(is_truthy(&json!([])));
        assert!(is_truthy(&json!({})));
    }
}
