// @awa-component: CHAT-OpenAIAssistant
//
//! OpenAI Assistants (v2) client.
//!
//! Thin wrapper over the threads / messages / runs REST endpoints. The
//! client is built once at process start and shared behind an `Arc`.

use std::env;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::debug;

use super::types::{Role, Run, Thread, ThreadMessage};
use super::{AssistantApi, AssistantError};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const ASSISTANTS_BETA_HEADER: &str = "OpenAI-Beta";
const ASSISTANTS_BETA_VALUE: &str = "assistants=v2";
const MESSAGE_PAGE_LIMIT: &str = "20";

/// Connection settings for the assistant service.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// API key sent as a bearer token.
    pub api_key: String,
    /// Assistant that runs are created for.
    pub assistant_id: String,
    /// API root, e.g. `https://api.openai.com/v1`.
    pub base_url: String,
    /// Per-request timeout.
    pub request_timeout: Duration,
}

impl OpenAiConfig {
    pub fn new(api_key: impl Into<String>, assistant_id: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            assistant_id: assistant_id.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Read settings from the environment.
    ///
    /// | Variable                      | Default                     |
    /// |-------------------------------|-----------------------------|
    /// | `OPENAI_API_KEY`              | required                    |
    /// | `ASSISTANT_ID`                | required                    |
    /// | `OPENAI_BASE_URL`             | `https://api.openai.com/v1` |
    /// | `OPENAI_REQUEST_TIMEOUT_SECS` | `30`                        |
    pub fn from_env() -> Result<Self, AssistantError> {
        let api_key = env::var("OPENAI_API_KEY")
            .map_err(|_| AssistantError::Config("OPENAI_API_KEY is not set".to_string()))?;
        let assistant_id = env::var("ASSISTANT_ID")
            .map_err(|_| AssistantError::Config("ASSISTANT_ID is not set".to_string()))?;
        let request_timeout = match env::var("OPENAI_REQUEST_TIMEOUT_SECS") {
            Ok(raw) => Duration::from_secs(raw.parse().map_err(|_| {
                AssistantError::Config(format!("Invalid OPENAI_REQUEST_TIMEOUT_SECS: {raw}"))
            })?),
            Err(_) => DEFAULT_REQUEST_TIMEOUT,
        };

        Ok(Self {
            api_key,
            assistant_id,
            base_url: env::var("OPENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            request_timeout,
        })
    }
}

#[derive(Deserialize)]
struct MessageList {
    data: Vec<ThreadMessage>,
}

/// [`AssistantApi`] implementation backed by the OpenAI REST API.
#[derive(Debug, Clone)]
pub struct OpenAiAssistant {
    client: Client,
    config: OpenAiConfig,
}

impl OpenAiAssistant {
    /// Validate the config and build the HTTP client.
    pub fn new(config: OpenAiConfig) -> Result<Self, AssistantError> {
        if config.api_key.trim().is_empty() {
            return Err(AssistantError::Config("API key must not be empty".to_string()));
        }
        if config.assistant_id.trim().is_empty() {
            return Err(AssistantError::Config("Assistant id must not be empty".to_string()));
        }

        let base: url::Url = config
            .base_url
            .parse()
            .map_err(|e| AssistantError::Config(format!("Invalid base URL {}: {e}", config.base_url)))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(AssistantError::Config(format!(
                "Base URL must use http or https: {}",
                config.base_url
            )));
        }

        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| AssistantError::Config(format!("HTTP client build failed: {e}")))?;

        Ok(Self { client, config })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.config.base_url.trim_end_matches('/'))
    }

    fn authorized(&self, req: RequestBuilder) -> RequestBuilder {
        req.bearer_auth(&self.config.api_key)
            .header(ASSISTANTS_BETA_HEADER, ASSISTANTS_BETA_VALUE)
    }

    /// Send a request and decode a JSON body, mapping failures onto
    /// [`AssistantError`] variants.
    async fn send<T: DeserializeOwned>(
        &self,
        req: RequestBuilder,
        operation: &str,
    ) -> Result<T, AssistantError> {
        let resp = self
            .authorized(req)
            .send()
            .await
            .map_err(|e| AssistantError::Http(format!("{operation}: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp
                .text()
                .await
                .unwrap_or_else(|_| "<no body>".to_string());
            return Err(AssistantError::Status { status, body });
        }

        resp.json()
            .await
            .map_err(|e| AssistantError::Decode(format!("{operation}: {e}")))
    }
}

#[async_trait]
impl AssistantApi for OpenAiAssistant {
    async fn create_thread(&self) -> Result<Thread, AssistantError> {
        let req = self.client.post(self.endpoint("threads")).json(&json!({}));
        let thread: Thread = self.send(req, "create thread").await?;
        debug!(thread_id = %thread.id, "thread created");
        Ok(thread)
    }

    async fn append_message(
        &self,
        thread_id: &str,
        role: Role,
        content: &str,
    ) -> Result<ThreadMessage, AssistantError> {
        let req = self
            .client
            .post(self.endpoint(&format!("threads/{thread_id}/messages")))
            .json(&json!({ "role": role, "content": content }));
        self.send(req, "append message").await
    }

    async fn create_run(&self, thread_id: &str) -> Result<Run, AssistantError> {
        let req = self
            .client
            .post(self.endpoint(&format!("threads/{thread_id}/runs")))
            .json(&json!({ "assistant_id": self.config.assistant_id }));
        let run: Run = self.send(req, "create run").await?;
        debug!(thread_id, run_id = %run.id, status = %run.status, "run created");
        Ok(run)
    }

    async fn retrieve_run(&self, thread_id: &str, run_id: &str) -> Result<Run, AssistantError> {
        let req = self
            .client
            .get(self.endpoint(&format!("threads/{thread_id}/runs/{run_id}")));
        self.send(req, "retrieve run").await
    }

    async fn list_messages(&self, thread_id: &str) -> Result<Vec<ThreadMessage>, AssistantError> {
        let req = self
            .client
            .get(self.endpoint(&format!("threads/{thread_id}/messages")))
            .query(&[("order", "desc"), ("limit", MESSAGE_PAGE_LIMIT)]);
        let list: MessageList = self.send(req, "list messages").await?;
        Ok(list.data)
    }
}
