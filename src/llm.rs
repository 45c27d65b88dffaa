use async_trait::async_trait;
use serde::Serialize;
use reqwest::{Client, ClientBuilder};
use std::time::Duration;
use tracing::{debug, warn};
use crate::config::Config;
use crate::error::{Result, AppError};

/// One provider call: the prompt plus its sampling parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl GenerationRequest {
    pub fn new(prompt: String, temperature: f32, max_tokens: u32) -> Self {
        Self { prompt, temperature, max_tokens }
    }
}

/// A generative text backend. Returned text is already trimmed.
#[async_trait]
pub trait TextProvider: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<String>;
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    temperature: f32,
    max_tokens: u32,
}

/// Upper bound on one completion round trip.
pub const PROVIDER_TIMEOUT: Duration = Duration::from_secs(60);

/// Client for an OpenAI-compatible `/chat/completions` endpoint.
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    model: String,
    api_base: String,
}

impl OpenAiClient {
    pub fn new(api_key: String, model: String, api_base: String) -> Result<Self> {
        Self::with_timeout(api_key, model, api_base, PROVIDER_TIMEOUT)
    }

    pub fn with_timeout(api_key: String, model: String, api_base: String, timeout: Duration) -> Result<Self> {
        let client = ClientBuilder::new()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| AppError::ConfigError(format!("Failed to build provider client: {}", e)))?;

        Ok(Self {
            client,
            api_key,
            model,
            api_base,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            config.openai_api_key.clone(),
            config.model.clone(),
            config.api_base.clone(),
        )
    }
}

#[async_trait]
impl TextProvider for OpenAiClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<String> {
        let body = ChatRequest {
            model: &self.model,
            messages: vec![Message {
                role: "user",
                content: &request.prompt,
            }],
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        debug!(model = %self.model, prompt_chars = request.prompt.len(), "calling chat completions");
        let res = self
            .client
            .post(format!("{}/chat/completions", self.api_base))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = res.status();
        if !status.is_success() {
            let detail = res.text().await.unwrap_or_default();
            warn!(%status, "provider rejected request");
            return Err(AppError::LlmError(format!("provider returned {}: {}", status, detail)));
        }

        let json: serde_json::Value = res
            .json()
            .await
            .map_err(transport_error)?;
        extract_reply(&json)
    }
}

fn transport_error(err: reqwest::Error) -> AppError {
    if err.is_timeout() {
        AppError::LlmError(format!("provider request timed out: {}", err))
    } else {
        AppError::LlmError(err.to_string())
    }
}

fn extract_reply(json: &serde_json::Value) -> Result<String> {
    json["choices"][0]["message"]["content"]
        .as_str()
        .map(|reply| reply.trim().to_string())
        .ok_or_else(|| AppError::LlmError("Invalid response format from LLM".to_string()))
}
