//! LLM Client — unified interface for Gemini, OpenAI-compatible and Ollama backends.
//!
//! Each call is exactly one HTTP request. Retrying is the reply generator's
//! job, so a failed request comes straight back as an [`LlmError`].

use std::time::{Duration, Instant};

use reqwest::Client;
use serde_json::{Value, json};
use tracing::{debug, warn};

use npcchat_core::config::LlmConfig;

use crate::backend::TextBackend;
use crate::error::LlmError;
use crate::types::LlmResponse;

const GEMINI_DEFAULT_URL: &str = "https://generativelanguage.googleapis.com";
const OPENAI_DEFAULT_URL: &str = "https://api.openai.com";
const OLLAMA_DEFAULT_URL: &str = "http://localhost:11434";

/// Provider backend for LLM inference.
#[derive(Debug, Clone)]
pub enum LlmProvider {
    /// Google Gemini `generateContent`.
    Gemini { base_url: String, api_key: String },
    /// OpenAI-compatible API (also works with Together, OpenRouter, etc.).
    OpenAiCompatible { base_url: String, api_key: String },
    /// Ollama running locally.
    Ollama { base_url: String },
}

impl LlmProvider {
    /// Build a provider from configuration and the API key read from the
    /// environment.
    ///
    /// # Errors
    /// Returns `LlmError::ConfigError` for an unknown provider name, or
    /// when a provider that needs a key has none.
    pub fn from_config(config: &LlmConfig, api_key: Option<String>) -> Result<Self, LlmError> {
        let base_url = |default: &str| {
            config
                .base_url
                .clone()
                .unwrap_or_else(|| default.to_string())
                .trim_end_matches('/')
                .to_string()
        };
        let require_key = || {
            api_key
                .clone()
                .filter(|k| !k.trim().is_empty())
                .ok_or_else(|| {
                    LlmError::ConfigError(format!(
                        "provider '{}' needs an API key: set {}",
                        config.provider, config.api_key_env
                    ))
                })
        };

        match config.provider.trim().to_ascii_lowercase().as_str() {
            "gemini" => Ok(Self::Gemini {
                base_url: base_url(GEMINI_DEFAULT_URL),
                api_key: require_key()?,
            }),
            "openai" => Ok(Self::OpenAiCompatible {
                base_url: base_url(OPENAI_DEFAULT_URL),
                api_key: require_key()?,
            }),
            "ollama" => Ok(Self::Ollama {
                base_url: base_url(OLLAMA_DEFAULT_URL),
            }),
            other => Err(LlmError::ConfigError(format!(
                "unknown LLM provider: '{other}' (expected gemini, openai or ollama)"
            ))),
        }
    }

    /// Short provider name for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Gemini { .. } => "gemini",
            Self::OpenAiCompatible { .. } => "openai",
            Self::Ollama { .. } => "ollama",
        }
    }

    /// Endpoint URL for `model`.
    #[must_use]
    pub fn endpoint(&self, model: &str) -> String {
        match self {
            Self::Gemini { base_url, .. } => {
                format!("{base_url}/v1beta/models/{model}:generateContent")
            }
            Self::OpenAiCompatible { base_url, .. } => format!("{base_url}/v1/chat/completions"),
            Self::Ollama { base_url } => format!("{base_url}/api/generate"),
        }
    }

    /// JSON request body for a single-prompt generation.
    #[must_use]
    pub fn request_body(&self, model: &str, prompt: &str) -> Value {
        match self {
            Self::Gemini { .. } => json!({
                "contents": [{ "parts": [{ "text": prompt }] }],
            }),
            Self::OpenAiCompatible { .. } => json!({
                "model": model,
                "messages": [{ "role": "user", "content": prompt }],
            }),
            Self::Ollama { .. } => json!({
                "model": model,
                "prompt": prompt,
                "stream": false,
            }),
        }
    }

    /// Pull the generated text out of a provider response.
    ///
    /// # Errors
    /// Returns `LlmError::ParseError` if the response has no text, e.g. a
    /// Gemini reply whose only candidate was blocked.
    pub fn extract_text(&self, response: &Value) -> Result<String, LlmError> {
        let text = match self {
            Self::Gemini { .. } => response["candidates"][0]["content"]["parts"]
                .as_array()
                .map(|parts| {
                    parts
                        .iter()
                        .filter_map(|p| p["text"].as_str())
                        .collect::<String>()
                }),
            Self::OpenAiCompatible { .. } => response["choices"][0]["message"]["content"]
                .as_str()
                .map(str::to_string),
            Self::Ollama { .. } => response["response"].as_str().map(str::to_string),
        };

        text.ok_or_else(|| {
            LlmError::ParseError(format!("no text in {} response: {response}", self.name()))
        })
    }
}

/// The LLM client that sends prompts to the configured backend.
pub struct LlmClient {
    provider: LlmProvider,
    http: Client,
    model: String,
    timeout_ms: u64,
}

impl LlmClient {
    /// Create a new LLM client.
    #[must_use]
    pub fn new(provider: LlmProvider, model: impl Into<String>, timeout_ms: u64) -> Self {
        Self {
            provider,
            http: Client::new(),
            model: model.into(),
            timeout_ms,
        }
    }

    /// Create a client from configuration.
    ///
    /// # Errors
    /// Returns `LlmError::ConfigError` if the provider cannot be built.
    pub fn from_config(config: &LlmConfig, api_key: Option<String>) -> Result<Self, LlmError> {
        let provider = LlmProvider::from_config(config, api_key)?;
        Ok(Self::new(provider, config.model.clone(), config.timeout_ms))
    }

    /// The configured provider.
    #[must_use]
    pub fn provider(&self) -> &LlmProvider {
        &self.provider
    }

    /// The configured model name.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send one prompt and return the provider's answer.
    ///
    /// # Errors
    /// Returns `LlmError::Http` for a non-success status (the status code
    /// is part of the message), `Timeout`/`Unavailable`/`RequestFailed`
    /// for transport failures, and `ParseError` for an unreadable body.
    pub async fn generate(&self, prompt: &str) -> Result<LlmResponse, LlmError> {
        let url = self.provider.endpoint(&self.model);
        let body = self.provider.request_body(&self.model, prompt);

        let mut request = self
            .http
            .post(&url)
            .json(&body)
            .timeout(Duration::from_millis(self.timeout_ms));
        request = match &self.provider {
            LlmProvider::Gemini { api_key, .. } => request.query(&[("key", api_key)]),
            LlmProvider::OpenAiCompatible { api_key, .. } => {
                request.header("Authorization", format!("Bearer {api_key}"))
            }
            LlmProvider::Ollama { .. } => request,
        };

        debug!(provider = self.provider.name(), model = %self.model, "Sending LLM request");
        let start = Instant::now();
        let resp = request.send().await.map_err(|e| {
            if e.is_timeout() {
                warn!("{} request timed out after {}ms", self.provider.name(), self.timeout_ms);
                LlmError::Timeout(self.timeout_ms)
            } else {
                LlmError::from(e)
            }
        })?;
        let latency_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(LlmError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let json: Value = resp
            .json()
            .await
            .map_err(|e| LlmError::ParseError(e.to_string()))?;
        let text = self.provider.extract_text(&json)?;
        debug!(
            provider = self.provider.name(),
            model = %self.model,
            latency_ms,
            "LLM response received"
        );

        Ok(LlmResponse {
            text,
            latency_ms,
            model: self.model.clone(),
        })
    }
}

impl TextBackend for LlmClient {
    async fn generate_content(&self, prompt: &str) -> Result<String, LlmError> {
        self.generate(prompt).await.map(|r| r.text)
    }
}
