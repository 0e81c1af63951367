//! Chat relay models.

use crate::assistant::RunStatus;

/// One completed relay round trip. Never persisted.
#[derive(Debug, Clone)]
pub struct ChatExchange {
    /// Trimmed user message.
    pub message: String,
    pub thread_id: String,
    pub run_id: String,
    /// Status of the run at the last check.
    pub status: RunStatus,
    /// Number of run status checks issued.
    pub status_checks: u32,
    /// Final reply text (possibly the no-reply fallback).
    pub reply: String,
}
