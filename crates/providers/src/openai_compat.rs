//! OpenAI-compatible provider implementation.
//!
//! Works with: Groq, OpenAI, OpenRouter, Ollama, vLLM, and any endpoint
//! exposing `/chat/completions` and `/models`.
//!
//! Implements both service traits:
//! - `CompletionService` — non-streaming chat completions with usage
//!   accounting (the turn engine requires token counts on every call)
//! - `ModelCatalog` — model listing with declared context lengths

use async_trait::async_trait;
use clai_core::completion::{
    Completion, CompletionRequest, CompletionService, ModelCatalog, ModelEntry, TokenUsage,
};
use clai_core::error::{CatalogError, CompletionError};
use serde::Deserialize;
use tracing::{debug, warn};

/// An OpenAI-compatible completion client.
pub struct OpenAiCompatClient {
    name: String,
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl OpenAiCompatClient {
    /// Create a new client with the default 120s request timeout.
    pub fn new(
        name: impl Into<String>,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self::with_client(
            name,
            base_url,
            api_key,
            std::time::Duration::from_secs(120),
        )
    }

    /// Override the per-request timeout. Timeouts surface as retryable
    /// turn failures.
    pub fn with_timeout(self, timeout: std::time::Duration) -> Self {
        Self::with_client(self.name, self.base_url, self.api_key, timeout)
    }

    fn with_client(
        name: impl Into<String>,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: std::time::Duration,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            name: name.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            client,
        }
    }

    /// Create a Groq client (convenience constructor; the default provider).
    pub fn groq(api_key: impl Into<String>) -> Self {
        Self::new("groq", "https://api.groq.com/openai/v1", api_key)
    }

    /// Create an OpenAI client (convenience constructor).
    pub fn openai(api_key: impl Into<String>) -> Self {
        Self::new("openai", "https://api.openai.com/v1", api_key)
    }

    fn map_request_error(e: reqwest::Error) -> CompletionError {
        if e.is_timeout() {
            CompletionError::Timeout(e.to_string())
        } else {
            CompletionError::Network(e.to_string())
        }
    }
}

#[async_trait]
impl CompletionService for OpenAiCompatClient {
    fn name(&self) -> &str {
        &self.name
    }

    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> std::result::Result<Completion, CompletionError> {
        let url = format!("{}/chat/completions", self.base_url);

        // The whole prompt (context prefix + preamble + message) travels as
        // a single user message, matching the wire shape the window's token
        // accounting was calibrated against.
        let body = serde_json::json!({
            "model": request.model,
            "messages": [{ "role": "user", "content": request.prompt }],
            "stream": false,
        });

        debug!(provider = %self.name, model = %request.model, "Sending completion request");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(Self::map_request_error)?;

        let status = response.status().as_u16();

        if status == 429 {
            return Err(CompletionError::RateLimited {
                retry_after_secs: 5,
            });
        }

        if status == 401 || status == 403 {
            return Err(CompletionError::AuthenticationFailed(
                "Invalid API key or insufficient permissions".into(),
            ));
        }

        if status != 200 {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status, body = %error_body, "Provider returned error");
            return Err(CompletionError::Api {
                status_code: status,
                message: error_body,
            });
        }

        let api_response: ApiResponse =
            response.json().await.map_err(|e| CompletionError::Api {
                status_code: 200,
                message: format!("Failed to parse response: {e}"),
            })?;

        let choice = api_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| CompletionError::Api {
                status_code: 200,
                message: "No choices in response".into(),
            })?;

        // Usage is mandatory: the sliding window is cost-driven.
        let usage = api_response.usage.ok_or_else(|| CompletionError::Api {
            status_code: 200,
            message: "No usage accounting in response".into(),
        })?;

        Ok(Completion {
            reply: choice.message.content.unwrap_or_default(),
            usage: TokenUsage {
                prompt_tokens: usage.prompt_tokens,
                completion_tokens: usage.completion_tokens,
            },
        })
    }
}

#[async_trait]
impl ModelCatalog for OpenAiCompatClient {
    async fn list_models(&self) -> std::result::Result<Vec<ModelEntry>, CatalogError> {
        let url = format!("{}/models", self.base_url);
        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Network(format!(
                "catalog returned status {status}"
            )));
        }

        let body: ModelsResponse = response
            .json()
            .await
            .map_err(|e| CatalogError::Malformed(e.to_string()))?;

        Ok(body
            .data
            .into_iter()
            .map(|m| ModelEntry {
                id: m.id,
                context_length: m.context_window,
            })
            .collect())
    }
}

// --- OpenAI API types (internal) ---

#[derive(Debug, Deserialize)]
struct ApiResponse {
    choices: Vec<ApiChoice>,
    usage: Option<ApiUsage>,
}

#[derive(Debug, Deserialize)]
struct ApiChoice {
    message: ApiMessage,
}

#[derive(Debug, Deserialize)]
struct ApiMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ModelsResponse {
    #[serde(default)]
    data: Vec<ApiModel>,
}

/// Groq publishes `context_window`; OpenRouter calls it `context_length`.
#[derive(Debug, Deserialize)]
struct ApiModel {
    id: String,
    #[serde(default, alias = "context_length")]
    context_window: Option<u32>,
}
