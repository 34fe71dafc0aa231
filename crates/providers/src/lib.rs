//! Completion service implementations for clai.
//!
//! All providers implement the `clai_core::CompletionService` and
//! `clai_core::ModelCatalog` traits. Groq is the default endpoint; any
//! OpenAI-compatible API works.

pub mod openai_compat;

pub use openai_compat::OpenAiCompatClient;

use clai_config::AppConfig;

/// Build the provider client described by the configuration.
pub fn build_from_config(config: &AppConfig) -> OpenAiCompatClient {
    OpenAiCompatClient::new(
        &config.provider,
        &config.api_url,
        config.api_key.clone().unwrap_or_default(),
    )
    .with_timeout(std::time::Duration::from_secs(config.request_timeout_secs))
}
