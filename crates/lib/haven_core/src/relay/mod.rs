// @awa-component: CHAT-Relay
//
//! Chat relay — forwards one user message to the assistant and waits for
//! the reply.
//!
//! Each call opens a fresh thread, appends the message, starts a run, polls
//! the run under a [`PollPolicy`], and extracts the newest assistant turn.
//! Threads are never reused or cleaned up.
//!
//! # Public API
//!
//! - [`ChatRelay::get_response`] — infallible; always yields user-facing text
//! - [`ChatRelay::try_get_response`] — same flow, error kinds kept apart
//! - [`ChatRelay::exchange`] — run the flow on an already validated message

pub mod extract;
pub mod poll;
pub mod validation;

use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info, warn};

use crate::assistant::{AssistantApi, AssistantError, Role};
use crate::models::chat::ChatExchange;

pub use poll::PollPolicy;
pub use validation::{MAX_MESSAGE_CHARS, MessageError, validate_message};

/// Reply used when the assistant finished without any usable text.
pub const NO_REPLY_TEXT: &str = "Sorry, I couldn't generate a response.";

/// Reply used when any assistant call fails.
pub const ERROR_REPLY_TEXT: &str =
    "Sorry, there was an error processing your inquiry. Please try again later.";

/// Reply used when the run did not finish within the poll budget.
pub const TIMEOUT_REPLY_TEXT: &str =
    "Sorry, the assistant is taking too long to respond. Please try again later.";

/// Failure kinds of a relay call.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error(transparent)]
    InvalidMessage(#[from] MessageError),

    #[error("Assistant error: {0}")]
    Assistant(#[from] AssistantError),

    #[error("Run {run_id} did not complete after {attempts} status checks")]
    Timeout { run_id: String, attempts: u32 },
}

impl RelayError {
    /// Text safe to show to the end user. Assistant details are never included.
    pub fn user_message(&self) -> String {
        match self {
            RelayError::InvalidMessage(e) => e.to_string(),
            RelayError::Assistant(_) => ERROR_REPLY_TEXT.to_string(),
            RelayError::Timeout { .. } => TIMEOUT_REPLY_TEXT.to_string(),
        }
    }
}

/// Relays chat messages to a configured assistant.
#[derive(Clone)]
pub struct ChatRelay {
    assistant: Arc<dyn AssistantApi>,
    policy: PollPolicy,
}

impl ChatRelay {
    pub fn new(assistant: Arc<dyn AssistantApi>, policy: PollPolicy) -> Self {
        Self { assistant, policy }
    }

    /// Reply text for `message`, or a fallback text on any failure.
    pub async fn get_response(&self, message: Option<&str>) -> String {
        match self.try_get_response(message).await {
            Ok(reply) => reply,
            Err(e) => e.user_message(),
        }
    }

    /// Validate `message`, relay it, and return the reply text.
    ///
    /// Assistant errors and timeouts are logged here before being returned.
    pub async fn try_get_response(&self, message: Option<&str>) -> Result<String, RelayError> {
        let text = validate_message(message)?;
        match self.exchange(text).await {
            Ok(exchange) => Ok(exchange.reply),
            Err(e) => {
                match &e {
                    RelayError::Timeout { run_id, attempts } => {
                        warn!(run_id = %run_id, attempts, "assistant run timed out");
                    }
                    other => error!("Assistant relay failed: {other}"),
                }
                Err(e)
            }
        }
    }

    /// Run the full thread/run cycle for an already validated message.
    pub async fn exchange(&self, message: &str) -> Result<ChatExchange, RelayError> {
        let thread = self.assistant.create_thread().await?;
        self.assistant
            .append_message(&thread.id, Role::User, message)
            .await?;
        let run = self.assistant.create_run(&thread.id).await?;

        let completed =
            poll::wait_for_completion(self.assistant.as_ref(), &thread.id, &run.id, &self.policy)
                .await?;

        let messages = self.assistant.list_messages(&thread.id).await?;
        let reply = extract::latest_assistant_text(&messages).unwrap_or_else(|| {
            warn!(thread_id = %thread.id, "no assistant text in completed thread");
            NO_REPLY_TEXT.to_string()
        });

        info!(
            thread_id = %thread.id,
            run_id = %run.id,
            status_checks = completed.status_checks,
            "assistant reply received"
        );

        Ok(ChatExchange {
            message: message.to_string(),
            thread_id: thread.id,
            run_id: run.id,
            status: completed.run.status,
            status_checks: completed.status_checks,
            reply,
        })
    }
}
