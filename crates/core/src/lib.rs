//! # clai Core
//!
//! Domain types, traits, and error definitions for the clai chat client.
//! This crate has **zero transport dependencies** — it defines the domain
//! model that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! The two outbound services (completion endpoint, model catalog) are defined
//! as traits here. Implementations live in `clai-providers`. This enables:
//! - Swapping providers via configuration
//! - Testing the turn engine with mock services
//! - Clean dependency graph (all crates depend inward on core)

pub mod completion;
pub mod error;
pub mod turn;
pub mod window;

// Re-export key types at crate root for ergonomics
pub use completion::{Completion, CompletionRequest, CompletionService, ModelCatalog, ModelEntry, TokenUsage};
pub use error::{CatalogError, CompletionError, Error, Result};
pub use turn::{SessionId, Turn};
pub use window::ConversationWindow;
