//! Input line classification.
//!
//! Every line the user types is resolved into either a session command or
//! a chat message before it reaches the turn engine, replacing free-form
//! "anything that isn't a command is a message" dispatch with an explicit
//! two-variant type.

/// A classified line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatInput {
    /// A session-level command.
    Command(ChatCommand),

    /// A plain chat message for the model.
    Message(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatCommand {
    /// End the session and discard its window.
    Exit,
}

/// Classify one line. Blank lines produce nothing.
pub fn parse(line: &str) -> Option<ChatInput> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    match line {
        "exit" | "quit" | "/exit" | "/quit" => Some(ChatInput::Command(ChatCommand::Exit)),
        _ => Some(ChatInput::Message(line.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_lines_are_ignored() {
        assert_eq!(parse(""), None);
        assert_eq!(parse("   "), None);
        assert_eq!(parse("\t"), None);
    }

    #[test]
    fn exit_words_become_commands() {
        for word in ["exit", "quit", "/exit", "/quit", "  /exit  "] {
            assert_eq!(
                parse(word),
                Some(ChatInput::Command(ChatCommand::Exit)),
                "{word:?} should classify as exit"
            );
        }
    }

    #[test]
    fn everything_else_is_a_message() {
        assert_eq!(
            parse("tell me about rust"),
            Some(ChatInput::Message("tell me about rust".into()))
        );
        // A message merely containing an exit word is still a message.
        assert_eq!(
            parse("how do I exit vim?"),
            Some(ChatInput::Message("how do I exit vim?".into()))
        );
    }

    #[test]
    fn messages_are_trimmed() {
        assert_eq!(parse("  hi  "), Some(ChatInput::Message("hi".into())));
    }
}
