//! Token budget resolution.
//!
//! A session's budget is the model's declared maximum context length,
//! looked up in the provider's catalog exactly once at session start. Every
//! failure mode — catalog unreachable, model unknown, entry without a
//! declared length — degrades to a conservative default so the session can
//! always proceed.

use clai_core::completion::ModelCatalog;
use tracing::{debug, warn};

/// Budget used when the catalog cannot supply a context length.
pub const DEFAULT_TOKEN_BUDGET: u32 = 400;

/// Resolve the token budget for `model_id`. Never fails.
pub async fn resolve_token_budget(catalog: &dyn ModelCatalog, model_id: &str) -> u32 {
    let models = match catalog.list_models().await {
        Ok(models) => models,
        Err(e) => {
            warn!(model = model_id, error = %e, "Catalog unavailable, using default token budget");
            return DEFAULT_TOKEN_BUDGET;
        }
    };

    match models.iter().find(|m| m.id == model_id) {
        Some(entry) => match entry.context_length {
            Some(length) => {
                debug!(model = model_id, context_length = length, "Resolved token budget");
                length
            }
            None => {
                warn!(
                    model = model_id,
                    "Catalog entry has no context length, using default token budget"
                );
                DEFAULT_TOKEN_BUDGET
            }
        },
        None => {
            warn!(model = model_id, "Model not in catalog, using default token budget");
            DEFAULT_TOKEN_BUDGET
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use clai_core::completion::ModelEntry;
    use clai_core::error::CatalogError;

    struct StaticCatalog {
        result: Result<Vec<ModelEntry>, CatalogError>,
    }

    #[async_trait]
    impl ModelCatalog for StaticCatalog {
        async fn list_models(&self) -> Result<Vec<ModelEntry>, CatalogError> {
            self.result.clone()
        }
    }

    fn catalog_with(entries: Vec<ModelEntry>) -> StaticCatalog {
        StaticCatalog {
            result: Ok(entries),
        }
    }

    #[tokio::test]
    async fn known_model_resolves_to_declared_length() {
        let catalog = catalog_with(vec![
            ModelEntry {
                id: "llama3-8b-8192".into(),
                context_length: Some(8192),
            },
            ModelEntry {
                id: "mixtral-8x7b-32768".into(),
                context_length: Some(32768),
            },
        ]);
        assert_eq!(
            resolve_token_budget(&catalog, "mixtral-8x7b-32768").await,
            32768
        );
    }

    #[tokio::test]
    async fn unknown_model_falls_back_to_default() {
        let catalog = catalog_with(vec![ModelEntry {
            id: "llama3-8b-8192".into(),
            context_length: Some(8192),
        }]);
        assert_eq!(
            resolve_token_budget(&catalog, "nonexistent-model").await,
            DEFAULT_TOKEN_BUDGET
        );
    }

    #[tokio::test]
    async fn unreachable_catalog_falls_back_to_default() {
        let catalog = StaticCatalog {
            result: Err(CatalogError::Network("connection refused".into())),
        };
        assert_eq!(
            resolve_token_budget(&catalog, "any-model").await,
            DEFAULT_TOKEN_BUDGET
        );
    }

    #[tokio::test]
    async fn entry_without_context_length_falls_back_to_default() {
        let catalog = catalog_with(vec![ModelEntry {
            id: "whisper-large-v3".into(),
            context_length: None,
        }]);
        assert_eq!(
            resolve_token_budget(&catalog, "whisper-large-v3").await,
            DEFAULT_TOKEN_BUDGET
        );
    }
}
