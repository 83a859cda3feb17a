use crate::errors::AppError;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// A single-turn text generation request.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub system: Option<String>,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>, max_tokens: u32, temperature: f32) -> Self {
        Self {
            prompt: prompt.into(),
            system: None,
            max_tokens,
            temperature,
        }
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }
}

/// Hosted text-generation service.
///
/// Implemented by the Anthropic and OpenAI clients below; tests substitute
/// scripted generators so no network credentials are needed.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Short service name used in logs and error messages.
    fn name(&self) -> &str;

    /// Sends one request and returns the raw text of the reply.
    async fn generate(&self, request: &GenerationRequest) -> Result<String, AppError>;
}

fn build_http_client(service: &str, timeout: Duration) -> Result<reqwest::Client, AppError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| AppError::ExternalApiError(format!("Failed to create {} client: {}", service, e)))
}

async fn read_success(
    service: &str,
    response: reqwest::Response,
) -> Result<reqwest::Response, AppError> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status();
    let error_text = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    tracing::error!("{} returned error {}: {}", service, status, error_text);
    Err(AppError::ExternalApiError(format!(
        "{} returned {}: {}",
        service, status, error_text
    )))
}

// ============ Anthropic Messages API ============

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

/// Client for the Anthropic Messages API.
#[derive(Clone)]
pub struct AnthropicClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl AnthropicClient {
    /// Creates a new `AnthropicClient`.
    ///
    /// # Arguments
    ///
    /// * `base_url` - API root, e.g. `https://api.anthropic.com`.
    /// * `api_key` - The API key sent as `x-api-key`.
    /// * `model` - Model identifier.
    /// * `timeout` - Per-request timeout.
    pub fn new(
        base_url: String,
        api_key: String,
        model: String,
        timeout: Duration,
    ) -> Result<Self, AppError> {
        Ok(Self {
            client: build_http_client("Anthropic", timeout)?,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            model,
        })
    }

    pub fn from_config(config: &crate::config::LeadAgentConfig) -> Result<Self, AppError> {
        Self::new(
            config.anthropic_base_url.clone(),
            config.anthropic_api_key.clone(),
            config.model.clone(),
            config.request_timeout(),
        )
    }
}

#[async_trait]
impl TextGenerator for AnthropicClient {
    fn name(&self) -> &str {
        "Anthropic"
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<String, AppError> {
        let url = format!("{}/v1/messages", self.base_url);
        tracing::debug!(
            "Anthropic request: model={}, prompt_len={}, max_tokens={}",
            self.model,
            request.prompt.len(),
            request.max_tokens
        );

        let mut body = json!({
            "model": self.model,
            "max_tokens": request.max_tokens,
            "temperature": request.temperature,
            "messages": [{ "role": "user", "content": request.prompt }],
        });
        if let Some(system) = &request.system {
            body["system"] = json!(system);
        }

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::ExternalApiError(format!("Anthropic request failed: {}", e)))?;

        let response = read_success("Anthropic", response).await?;

        let data: MessagesResponse = response.json().await.map_err(|e| {
            AppError::ExternalApiError(format!("Failed to parse Anthropic response: {}", e))
        })?;

        data.content
            .into_iter()
            .find(|block| block.kind == "text")
            .and_then(|block| block.text)
            .ok_or_else(|| {
                AppError::ExternalApiError("Anthropic response has no text content".to_string())
            })
    }
}

// ============ OpenAI Chat Completions API ============

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Client for the OpenAI Chat Completions API.
#[derive(Clone)]
pub struct OpenAiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenAiClient {
    /// Creates a new `OpenAiClient`.
    ///
    /// `base_url` includes the version segment, e.g. `https://api.openai.com/v1`.
    pub fn new(
        base_url: String,
        api_key: String,
        model: String,
        timeout: Duration,
    ) -> Result<Self, AppError> {
        Ok(Self {
            client: build_http_client("OpenAI", timeout)?,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            model,
        })
    }

    pub fn from_config(config: &crate::config::ResearchAgentConfig) -> Result<Self, AppError> {
        Self::new(
            config.openai_base_url.clone(),
            config.openai_api_key.clone(),
            config.model.clone(),
            config.request_timeout(),
        )
    }
}

#[async_trait]
impl TextGenerator for OpenAiClient {
    fn name(&self) -> &str {
        "OpenAI"
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<String, AppError> {
        let url = format!("{}/chat/completions", self.base_url);
        tracing::debug!(
            "OpenAI request: model={}, prompt_len={}",
            self.model,
            request.prompt.len()
        );

        let mut messages = Vec::new();
        if let Some(system) = &request.system {
            messages.push(json!({ "role": "system", "content": system }));
        }
        messages.push(json!({ "role": "user", "content": request.prompt }));

        let body = json!({
            "model": self.model,
            "temperature": request.temperature,
            "max_tokens": request.max_tokens,
            "messages": messages,
        });

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::ExternalApiError(format!("OpenAI request failed: {}", e)))?;

        let response = read_success("OpenAI", response).await?;

        let data: ChatCompletionResponse = response.json().await.map_err(|e| {
            AppError::ExternalApiError(format!("Failed to parse OpenAI response: {}", e))
        })?;

        data.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                AppError::ExternalApiError("OpenAI response has no message content".to_string())
            })
    }
}
