//! Chat session — the turn executor.
//!
//! A `ChatSession` owns everything one conversation needs: the model id
//! (immutable for the session), the token budget (resolved once at start),
//! and the sliding window (mutated every turn). Nothing is shared between
//! sessions, so multiple sessions can run concurrently without cross-talk.
//!
//! Each turn issues two sequential completion requests:
//!
//! 1. a *bookkeeping* call carrying only the context prefix, so the
//!    provider tokenizes the prefix exactly as it will in the real call
//! 2. the *real* call carrying prefix + preamble + new message
//!
//! The new user message's cost is then reconciled from the real call's
//! prompt-token count by backing out the prior assistant reply's cost.
//! A failure in either call aborts the turn with the window untouched.

use std::sync::Arc;

use clai_core::completion::{CompletionRequest, CompletionService, ModelCatalog};
use clai_core::error::{Error, Result};
use clai_core::turn::{SessionId, Turn};
use clai_core::window::ConversationWindow;
use tracing::{debug, info};

use crate::budget::resolve_token_budget;
use crate::prompt;

/// Where a session is in its lifecycle.
///
/// Per turn: `Idle → AwaitingInput → Processing → Idle`. The caller marks
/// `AwaitingInput` when it starts waiting for the user; `submit` holds
/// `Processing` for the duration of the turn and returns to `Idle` whether
/// the turn succeeded or failed. `Terminated` is final.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    AwaitingInput,
    Processing,
    Terminated,
}

/// One chat session: model, budget, window, and the service to call.
pub struct ChatSession {
    id: SessionId,
    model: String,
    budget: u32,
    window: ConversationWindow,
    service: Arc<dyn CompletionService>,
    phase: SessionPhase,
}

impl ChatSession {
    /// Create a session with an already-resolved token budget.
    pub fn new(service: Arc<dyn CompletionService>, model: impl Into<String>, budget: u32) -> Self {
        let model = model.into();
        let id = SessionId::new();
        info!(session = %id, model = %model, budget, "Starting chat session");
        Self {
            id,
            model,
            budget,
            window: ConversationWindow::new(),
            service,
            phase: SessionPhase::Idle,
        }
    }

    /// Create a session, resolving the budget from the catalog.
    ///
    /// The catalog is consulted exactly once; the budget is fixed for the
    /// session's lifetime.
    pub async fn start(
        service: Arc<dyn CompletionService>,
        catalog: &dyn ModelCatalog,
        model: impl Into<String>,
    ) -> Self {
        let model = model.into();
        let budget = resolve_token_budget(catalog, &model).await;
        Self::new(service, model, budget)
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn budget(&self) -> u32 {
        self.budget
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// The current window contents (primarily for inspection and tests).
    pub fn window(&self) -> &ConversationWindow {
        &self.window
    }

    /// Mark the session as waiting for user input. No-op once terminated.
    pub fn await_input(&mut self) {
        if self.phase == SessionPhase::Idle {
            self.phase = SessionPhase::AwaitingInput;
        }
    }

    /// Execute one conversational turn and return the reply text.
    ///
    /// On failure the session window is exactly as it was before the call
    /// and the error is retryable: the same message can be submitted again.
    pub async fn submit(&mut self, user_message: &str) -> Result<String> {
        if self.phase == SessionPhase::Terminated {
            return Err(Error::Internal("session is terminated".into()));
        }

        self.phase = SessionPhase::Processing;
        let result = self.run_turn(user_message).await;
        self.phase = SessionPhase::Idle;
        result
    }

    async fn run_turn(&mut self, user_message: &str) -> Result<String> {
        // Pre-trim into a local window; nothing is committed to the session
        // until both calls have succeeded.
        let mut window = self.window.trimmed(self.budget);
        let prefix = prompt::context_prefix(&window);

        // Bookkeeping call: lets the provider tokenize the bare prefix. The
        // response itself is discarded — the marginal cost of the new
        // message is derived from the real call below.
        self.service
            .complete(CompletionRequest {
                model: self.model.clone(),
                prompt: prefix.clone(),
            })
            .await?;

        let completion = self
            .service
            .complete(CompletionRequest {
                model: self.model.clone(),
                prompt: prompt::assemble_prompt(&prefix, user_message),
            })
            .await?;

        // The real call's prompt tokens cover prefix + preamble + message.
        // The prior reply (last window entry) is part of that prefix, so
        // backing its cost out leaves the cost attributable to the new
        // message. On the first turn there is nothing to back out.
        let user_cost = match window.last() {
            Some(prior_reply) => completion
                .usage
                .prompt_tokens
                .saturating_sub(prior_reply.cost),
            None => completion.usage.prompt_tokens,
        };

        window.push(Turn::new(user_message, user_cost));
        window.push(Turn::new(&completion.reply, completion.usage.completion_tokens));

        self.window = window.trimmed(self.budget);
        debug!(
            session = %self.id,
            turns = self.window.len(),
            window_cost = self.window.total_cost(),
            "Turn committed"
        );

        Ok(completion.reply)
    }

    /// End the session. The window is discarded in full, never partially.
    pub fn close(&mut self) {
        info!(session = %self.id, "Closing chat session");
        self.window.clear();
        self.phase = SessionPhase::Terminated;
    }
}
