//! The sliding conversation window.
//!
//! An ordered sequence of [`Turn`]s representing past dialogue, oldest
//! first. The window is append-only except for bulk prefix truncation via
//! [`ConversationWindow::trimmed`], which drops the oldest entries until
//! the retained cost fits a token budget.
//!
//! `trimmed` is pure — it returns a new window and never mutates in place.
//! Appending does not trim; that is the turn executor's responsibility,
//! applied both before and after each exchange.

use crate::turn::Turn;
use serde::{Deserialize, Serialize};

/// An ordered, token-cost-accounted sequence of conversation turns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationWindow {
    turns: Vec<Turn>,
}

impl ConversationWindow {
    /// Create a new empty window.
    pub fn new() -> Self {
        Self { turns: Vec::new() }
    }

    /// Append one turn to the newest end. No trimming happens here.
    pub fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    /// The retained turns, oldest first.
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Sum of the token costs of all retained turns.
    pub fn total_cost(&self) -> u64 {
        self.turns.iter().map(|t| u64::from(t.cost)).sum()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// The most recently appended turn.
    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    /// Discard the entire window. Sessions do this on exit; the window is
    /// never partially cleared.
    pub fn clear(&mut self) {
        self.turns.clear();
    }

    /// Return a copy of this window trimmed to `max_tokens`.
    ///
    /// Scans newest → oldest accumulating cost. The first entry that pushes
    /// the running total past the budget is dropped together with everything
    /// older; the suffix strictly newer than it is kept. A window whose total
    /// already fits is returned unchanged.
    ///
    /// Boundary: if the newest entry alone exceeds the budget, the scan
    /// overflows at the first element and the result is empty. That edge is
    /// preserved intentionally for compatibility with the cost-reconciliation
    /// protocol built on top of it (see DESIGN.md).
    pub fn trimmed(&self, max_tokens: u32) -> Self {
        let mut running: u64 = 0;
        for (i, turn) in self.turns.iter().enumerate().rev() {
            running += u64::from(turn.cost);
            if running > u64::from(max_tokens) {
                return Self {
                    turns: self.turns[i + 1..].to_vec(),
                };
            }
        }
        self.clone()
    }
}

impl FromIterator<Turn> for ConversationWindow {
    fn from_iter<I: IntoIterator<Item = Turn>>(iter: I) -> Self {
        Self {
            turns: iter.into_iter().collect(),
        }
    }
}
