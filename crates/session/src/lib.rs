//! Turn execution and token-budget bookkeeping for clai.
//!
//! This crate orchestrates a chat session over the service traits defined
//! in `clai-core`: it resolves the model's token budget once per session,
//! assembles prompts from the sliding window, drives the two-call-per-turn
//! completion protocol, and keeps the window trimmed to budget.

pub mod budget;
pub mod prompt;
pub mod session;

pub use budget::{resolve_token_budget, DEFAULT_TOKEN_BUDGET};
pub use session::{ChatSession, SessionPhase};
