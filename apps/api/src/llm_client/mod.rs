//! LLM Client: the single point of entry for all completion-service calls.
//!
//! ARCHITECTURAL RULE: No other module may call the completion API directly.
//! Prompt builders return strings; handlers hand them to a `Completer`.
//!
//! Failures are returned to the caller as-is. There is no retry loop and no
//! request timeout: a hung upstream call hangs the request that issued it.
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod prompts;

pub const GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
/// The model used for every completion request.
pub const MODEL: &str = "mixtral-8x7b-32768";
/// Low temperature keeps the prose deterministic-sounding.
pub const TEMPERATURE: f32 = 0.3;
pub const DEFAULT_MAX_TOKENS: u32 = 1500;

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("authentication failed: {0}")]
    Unauthorized(String),

    #[error("rate limited: {0}")]
    RateLimited(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("completion service returned empty content")]
    EmptyContent,
}

/// Fixed generation parameters sent alongside every prompt.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GenerationParams {
    pub model: &'static str,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl GenerationParams {
    pub const fn with_max_tokens(max_tokens: u32) -> Self {
        Self {
            model: MODEL,
            temperature: TEMPERATURE,
            max_tokens,
        }
    }
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self::with_max_tokens(DEFAULT_MAX_TOKENS)
    }
}

/// The completion boundary. `AppState` carries an `Arc<dyn Completer>` so the
/// HTTP-backed client can be swapped for a stub in tests.
#[async_trait]
pub trait Completer: Send + Sync {
    async fn complete(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<String, CompletionError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl ChatResponse {
    /// Extracts the text of the first choice.
    pub fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .filter(|t| !t.trim().is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// HTTP client for an OpenAI-compatible chat-completions endpoint.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: Option<String>,
    api_url: String,
}

impl LlmClient {
    pub fn new(api_key: Option<String>, api_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            api_url,
        }
    }

    /// Makes a single call to the completion API, returning the full response object.
    pub async fn call(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<ChatResponse, CompletionError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            CompletionError::Unauthorized("GROQ_API_KEY is not configured".to_string())
        })?;

        let request_body = ChatRequest {
            model: params.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: params.temperature,
            max_tokens: params.max_tokens,
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_failure(status, body));
        }

        let chat: ChatResponse = response.json().await?;
        if let Some(usage) = &chat.usage {
            debug!(
                "Completion succeeded: model={}, prompt_tokens={}, completion_tokens={}",
                params.model, usage.prompt_tokens, usage.completion_tokens
            );
        }
        Ok(chat)
    }
}

#[async_trait]
impl Completer for LlmClient {
    async fn complete(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<String, CompletionError> {
        let response = self.call(prompt, params).await?;
        response
            .text()
            .map(str::to_string)
            .ok_or(CompletionError::EmptyContent)
    }
}

/// Maps a non-success HTTP status onto the completion error taxonomy.
fn classify_failure(status: StatusCode, body: String) -> CompletionError {
    let message = serde_json::from_str::<ApiErrorEnvelope>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body);

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => CompletionError::Unauthorized(message),
        StatusCode::TOO_MANY_REQUESTS => CompletionError::RateLimited(message),
        _ => CompletionError::Api {
            status: status.as_u16(),
            message,
        },
    }
}
