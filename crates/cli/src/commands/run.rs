//! `clai run` — interactive chat session.

use std::sync::Arc;

use clai_config::AppConfig;
use clai_core::completion::CompletionService;
use clai_session::ChatSession;
use tokio::io::{self, AsyncBufReadExt, BufReader};

use crate::input::{self, ChatCommand, ChatInput};

pub async fn run(model: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    // Check for an API key early — give a clear error
    if config.api_key.is_none() {
        eprintln!();
        eprintln!("  ERROR: No API key configured!");
        eprintln!();
        eprintln!("  Set one of these environment variables:");
        eprintln!("    CLAI_API_KEY     (generic)");
        eprintln!("    GROQ_API_KEY     (for the default Groq endpoint)");
        eprintln!("    OPENAI_API_KEY   (for OpenAI direct)");
        eprintln!();
        eprintln!("  Or add it to your config file:");
        eprintln!(
            "    {}",
            AppConfig::config_dir().join("config.toml").display()
        );
        eprintln!();
        return Err("No API key found. See above for setup instructions.".into());
    }

    let client = Arc::new(clai_providers::build_from_config(&config));
    let model = model.unwrap_or_else(|| config.default_model.clone());

    // The one catalog query of the session happens inside `start`.
    let service: Arc<dyn CompletionService> = client.clone();
    let mut session = ChatSession::start(service, client.as_ref(), &model).await;

    println!();
    println!("  Welcome to the AI chat! Begin messaging, or 'exit' to quit.");
    println!();
    println!("  Provider:       {}", config.provider);
    println!("  Model:          {}", session.model());
    println!("  Context budget: {} tokens", session.budget());
    println!();

    let stdin = io::stdin();
    let reader = BufReader::new(stdin);
    let mut lines = reader.lines();

    use std::io::Write;
    loop {
        session.await_input();
        print!("You > ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            // EOF (Ctrl+D)
            println!();
            break;
        };

        match input::parse(&line) {
            None => continue,
            Some(ChatInput::Command(ChatCommand::Exit)) => break,
            Some(ChatInput::Message(message)) => match session.submit(&message).await {
                Ok(reply) => {
                    println!("{}> {reply}", session.model());
                }
                Err(e) => {
                    // The window is untouched; the session stays usable.
                    eprintln!("  [Error] {e}");
                    if e.is_retryable() {
                        eprintln!("  The turn was not recorded; you can send it again.");
                    }
                }
            },
        }
    }

    session.close();
    println!("Exiting chat session.");
    Ok(())
}
