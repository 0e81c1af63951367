// @awa-component: CHAT-AssistantAPI
//
//! Assistant module — client seam for the hosted conversational assistant.
//!
//! The relay only ever talks to the assistant through [`AssistantApi`], so the
//! HTTP implementation ([`openai::OpenAiAssistant`]) can be swapped for an
//! in-process double in tests.
//!
//! # Operations
//!
//! - [`AssistantApi::create_thread`] — open a new conversation context
//! - [`AssistantApi::append_message`] — add a turn to a thread
//! - [`AssistantApi::create_run`] — start asynchronous processing of a thread
//! - [`AssistantApi::retrieve_run`] — read the current status of a run
//! - [`AssistantApi::list_messages`] — list the turns of a thread, newest first

pub mod openai;
pub mod types;

use async_trait::async_trait;
use thiserror::Error;

pub use openai::{OpenAiAssistant, OpenAiConfig};
pub use types::{ContentPart, MessageContent, Role, Run, RunStatus, TextPayload, Thread, ThreadMessage};

/// Errors raised while talking to the assistant service.
#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("Assistant request failed: {0}")]
    Http(String),

    #[error("Assistant returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Assistant response parse error: {0}")]
    Decode(String),

    #[error("Run {run_id} ended with status {status}")]
    RunEnded { run_id: String, status: RunStatus },

    #[error("Config error: {0}")]
    Config(String),
}

/// Operations consumed from the hosted assistant service.
#[async_trait]
pub trait AssistantApi: Send + Sync {
    /// Create a new, empty conversation thread.
    async fn create_thread(&self) -> Result<Thread, AssistantError>;

    /// Append a turn with the given role to a thread.
    async fn append_message(
        &self,
        thread_id: &str,
        role: Role,
        content: &str,
    ) -> Result<ThreadMessage, AssistantError>;

    /// Start a run of the configured assistant over a thread.
    async fn create_run(&self, thread_id: &str) -> Result<Run, AssistantError>;

    /// Fetch the current state of a run.
    async fn retrieve_run(&self, thread_id: &str, run_id: &str) -> Result<Run, AssistantError>;

    /// List the turns of a thread, newest first.
    async fn list_messages(&self, thread_id: &str) -> Result<Vec<ThreadMessage>, AssistantError>;
}
