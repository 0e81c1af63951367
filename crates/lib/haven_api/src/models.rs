//! Request and response bodies of the HTTP API.
//!
//! These are the single canonical wire shapes; the chat reply key is always
//! `response`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `POST /api/chat` request. `message` stays untyped so that non-string
/// values reach relay validation instead of failing JSON decoding.
#[derive(Debug, Default, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<Value>,
}

/// `POST /api/chat` response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

/// Error body for every non-2xx response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// `GET /health` response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Body returned after a document is created.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub id: String,
}
