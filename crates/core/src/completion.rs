//! Service traits — the abstraction over the completion provider.
//!
//! The turn engine makes exactly one kind of outbound call
//! ([`CompletionService::complete`]) and queries the model catalog once per
//! session to resolve a token budget. Both are traits so the engine can be
//! tested against mock services and so providers can be swapped via
//! configuration.

use crate::error::{CatalogError, CompletionError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A single completion request.
///
/// The wire protocol is conversation-free: all prior context is already
/// flattened into `prompt` by the caller. The window, not the provider,
/// owns history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// The model to use (e.g., "mixtral-8x7b-32768").
    pub model: String,

    /// The full prompt text, context prefix included.
    pub prompt: String,
}

/// Token accounting reported by the provider for one call.
///
/// Both counts are required: the trimming algorithm is cost-driven, not
/// character-driven, so a response without accounting is unusable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

/// A complete response from the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Completion {
    /// The generated reply text.
    pub reply: String,

    /// Provider-side token accounting for this call.
    pub usage: TokenUsage,
}

/// One entry in the provider's model catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelEntry {
    /// The model identifier.
    pub id: String,

    /// Declared maximum context length in tokens, when the catalog
    /// publishes one.
    pub context_length: Option<u32>,
}

/// The completion endpoint. The only outbound call the turn engine makes.
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// A human-readable name for this service (e.g., "groq", "openai").
    fn name(&self) -> &str;

    /// Send a prompt and get back the reply plus token accounting.
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> std::result::Result<Completion, CompletionError>;
}

/// The model catalog, queried once per session by the budget resolver.
#[async_trait]
pub trait ModelCatalog: Send + Sync {
    /// List the models this provider serves with their context lengths.
    async fn list_models(&self) -> std::result::Result<Vec<ModelEntry>, CatalogError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completion_request_serialization() {
        let req = CompletionRequest {
            model: "mixtral-8x7b-32768".into(),
            prompt: "hello".into(),
        };
        let json = serde_json::to_string(&req).unwrap();
        assert!(json.contains("mixtral-8x7b-32768"));
        assert!(json.contains("hello"));
    }

    #[test]
    fn model_entry_tolerates_missing_context_length() {
        let entry: ModelEntry =
            serde_json::from_str(r#"{"id":"whisper-large-v3","context_length":null}"#).unwrap();
        assert_eq!(entry.id, "whisper-large-v3");
        assert!(entry.context_length.is_none());
    }
}
