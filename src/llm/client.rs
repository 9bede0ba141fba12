//! Chat-completions client
//!
//! Speaks the OpenAI-compatible `{model, messages}` → `choices[0].message.content`
//! exchange. One request, one response; no streaming.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::message::ChatMessage;

/// Why a generation call produced no text.
///
/// The agent treats every variant the same way ("generation failed") but
/// keeps the cause for display.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// Connection refused, DNS failure, timeout, TLS error...
    #[error("generation failed: request error: {0}")]
    Request(#[from] reqwest::Error),
    /// The endpoint answered with a non-2xx status
    #[error("generation failed: API returned error (status {status}): {body}")]
    Status { status: u16, body: String },
    /// The body was not a chat-completions response
    #[error("generation failed: malformed response: {0}")]
    Decode(#[from] serde_json::Error),
    /// The response parsed but carried no text
    #[error("generation failed: API did not return content in the response")]
    EmptyContent,
}

/// Anything that can turn an ordered message list into generated text.
///
/// [`ChatClient`] is the production implementation; tests script their own.
#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate(&self, messages: &[ChatMessage]) -> Result<String, GenerationError>;
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// HTTP client for a chat-completions endpoint
#[derive(Clone)]
pub struct ChatClient {
    endpoint: String,
    token: Option<String>,
    model: String,
    client: reqwest::Client,
}

impl ChatClient {
    /// Create a new chat client
    ///
    /// # Arguments
    /// * `endpoint` - Full URL of the completions route
    /// * `model` - Model identifier sent with every request
    /// * `token` - Bearer token; `None` or empty skips the `Authorization` header
    /// * `timeout` - Upper bound for one whole request/response exchange; zero means no limit
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, GenerationError> {
        let mut builder = reqwest::Client::builder();
        if !timeout.is_zero() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        Ok(Self {
            endpoint: endpoint.into(),
            token: token.filter(|t| !t.is_empty()),
            model: model.into(),
            client,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Build (but do not send) the POST request for `messages`
    pub fn build_request(&self, messages: &[ChatMessage]) -> reqwest::RequestBuilder {
        let body = CompletionRequest {
            model: &self.model,
            messages,
        };

        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        request
    }
}

#[async_trait]
impl Generator for ChatClient {
    async fn generate(&self, messages: &[ChatMessage]) -> Result<String, GenerationError> {
        debug!(model = %self.model, messages = messages.len(), "Sending completion request");

        let response = self.build_request(messages).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(GenerationError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        extract_content(&text)
    }
}

/// Pull the first choice's text out of a raw response body
fn extract_content(body: &str) -> Result<String, GenerationError> {
    let parsed: CompletionResponse = serde_json::from_str(body)?;
    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|content| !content.is_empty())
        .ok_or(GenerationError::EmptyContent)
}
