//! Prompt assembly from the conversation window.
//!
//! The outbound prompt has three parts: the context prefix (every retained
//! turn, blank-line separated), a fixed instruction preamble telling the
//! model to treat the prefix as prior conversation, and the new user
//! message. The prefix alone is also sent as the bookkeeping call of each
//! turn, so both call sites must agree on its exact byte layout.

use clai_core::window::ConversationWindow;

/// Instruction separating prior context from the new message.
pub const PREAMBLE: &str = "Do not respond or mention this sentence in your reply, but the previous is the context of the conversation and the following is the next query in the sequence. Answer naturally ONLY to the following sentence(s) with the sentences before this one in mind.";

/// Concatenate the retained turns, each followed by a blank line.
pub fn context_prefix(window: &ConversationWindow) -> String {
    let mut prefix = String::new();
    for turn in window.turns() {
        prefix.push_str(&turn.content);
        prefix.push_str("\n\n");
    }
    prefix
}

/// Build the real call's prompt: prefix, preamble, new message.
pub fn assemble_prompt(prefix: &str, user_message: &str) -> String {
    format!("{prefix}{PREAMBLE}\n\n{user_message}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clai_core::turn::Turn;

    fn window(contents: &[&str]) -> ConversationWindow {
        contents.iter().map(|c| Turn::new(*c, 1)).collect()
    }

    #[test]
    fn empty_window_yields_empty_prefix() {
        assert_eq!(context_prefix(&ConversationWindow::new()), "");
    }

    #[test]
    fn prefix_separates_turns_with_blank_lines() {
        let prefix = context_prefix(&window(&["hi", "hello there"]));
        assert_eq!(prefix, "hi\n\nhello there\n\n");
    }

    #[test]
    fn assembled_prompt_orders_prefix_preamble_message() {
        let prefix = context_prefix(&window(&["hi", "hello"]));
        let prompt = assemble_prompt(&prefix, "how are you?");

        assert!(prompt.starts_with("hi\n\nhello\n\n"));
        assert!(prompt.ends_with("\n\nhow are you?"));

        let preamble_at = prompt.find(PREAMBLE).unwrap();
        assert_eq!(preamble_at, prefix.len());
    }

    #[test]
    fn first_turn_prompt_is_preamble_plus_message() {
        let prompt = assemble_prompt("", "hi");
        assert_eq!(prompt, format!("{PREAMBLE}\n\nhi"));
    }
}
