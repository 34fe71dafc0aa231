//! Error types for the clai domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.

use thiserror::Error;

/// The top-level error type for all clai operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Completion errors ---
    #[error("Completion error: {0}")]
    Completion(#[from] CompletionError),

    // --- Catalog errors ---
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Whether the failed operation can be retried as-is.
    ///
    /// A failed completion call aborts its turn without committing anything,
    /// so the same message can simply be submitted again.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Completion(_))
    }
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

#[derive(Debug, Clone, Error)]
pub enum CompletionError {
    #[error("API request failed: {message} (status: {status_code})")]
    Api { status_code: u16, message: String },

    #[error("Rate limited by provider, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),
}

#[derive(Debug, Clone, Error)]
pub enum CatalogError {
    #[error("Catalog unreachable: {0}")]
    Network(String),

    #[error("Malformed catalog response: {0}")]
    Malformed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completion_error_displays_correctly() {
        let err = Error::Completion(CompletionError::Api {
            status_code: 429,
            message: "Too many requests".into(),
        });
        assert!(err.to_string().contains("429"));
        assert!(err.to_string().contains("Too many requests"));
    }

    #[test]
    fn completion_failures_are_retryable() {
        let err = Error::Completion(CompletionError::Network("connection reset".into()));
        assert!(err.is_retryable());
    }

    #[test]
    fn catalog_failures_are_not_retryable() {
        // Catalog errors are recovered locally by the budget resolver,
        // never surfaced as a turn failure.
        let err = Error::Catalog(CatalogError::Network("dns failure".into()));
        assert!(!err.is_retryable());
    }
}
