//! Forwards a question plus the filtered entries to an OpenAI-compatible chat
//! completion endpoint and returns the reply text.
//!
//! The adapter performs exactly one request per question. It does not retry,
//! does not override the HTTP client's timeout and never invents an answer:
//! every failure is returned as an [`AdvisorError`].
//!
//! Validating the question (for example rejecting an empty one) is the
//! caller's job.
use engine::EntryRecord;
use reqwest::Url;

pub use error::AdvisorError;
pub use prompt::{PREAMBLE, compose_prompt, render_table};

mod error;
mod prompt;
mod wire;

use wire::{ChatMessage, ChatRequest, ChatResponse, ErrorResponse};

/// Model used when the configuration does not name one.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
/// Public OpenAI API root.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

#[derive(Debug, Clone)]
pub struct AdvisorConfig {
    pub base_url: String,
    pub model: String,
    pub api_key: String,
}

impl AdvisorConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: api_key.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Advisor {
    endpoint: Url,
    model: String,
    api_key: String,
    http: reqwest::Client,
}

impl Advisor {
    /// Fails only when `base_url` cannot be joined with the endpoint path.
    pub fn new(config: AdvisorConfig) -> Result<Self, AdvisorError> {
        let base = format!("{}/", config.base_url.trim_end_matches('/'));
        let endpoint = Url::parse(&base)
            .and_then(|base| base.join("chat/completions"))
            .map_err(|err| AdvisorError::InvalidBaseUrl(format!("{}: {err}", config.base_url)))?;

        Ok(Self {
            endpoint,
            model: config.model,
            api_key: config.api_key,
            http: reqwest::Client::new(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Ask `question` about `records` and return the first choice's text.
    pub async fn ask(
        &self,
        question: &str,
        records: &[EntryRecord],
    ) -> Result<String, AdvisorError> {
        let prompt = compose_prompt(question, records);
        let payload = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: &prompt,
            }],
        };

        tracing::info!(model = %self.model, rows = records.len(), "asking chat service");

        let res = self
            .http
            .post(self.endpoint.clone())
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let message = res
                .json::<ErrorResponse>()
                .await
                .map(|body| body.error.message)
                .unwrap_or_else(|_| "unknown error".to_string());
            tracing::warn!(%status, %message, "chat service rejected the request");
            return Err(AdvisorError::Service { status, message });
        }

        let reply = res
            .json::<ChatResponse>()
            .await?
            .into_reply()
            .ok_or(AdvisorError::EmptyReply)?;
        tracing::debug!(chars = reply.len(), "chat service replied");
        Ok(reply)
    }
}
