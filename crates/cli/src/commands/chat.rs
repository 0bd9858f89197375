//! Chat command handler.
//!
//! Interactive session over stdin. The session owns the conversation
//! history; the answering policy receives it read-only.

use clap::Args;
use docchat_agent::{ConversationTurn, Query};
use docchat_core::{AppConfig, AppResult};
use std::io::{BufRead, Write};

/// Interactive chat session
#[derive(Args, Debug)]
pub struct ChatCommand {}

impl ChatCommand {
    /// Execute the chat command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Starting chat session");

        let policy = super::build_policy(config)?;

        let greeting = "Hello! Ask me anything about the provided document.";
        println!("{}", greeting);
        println!("(type 'exit' or 'quit' to leave)");
        println!();

        let mut history: Vec<ConversationTurn> = Vec::new();

        let stdin = std::io::stdin();
        loop {
            print!("You: ");
            std::io::stdout().flush()?;

            let mut line = String::new();
            if stdin.lock().read_line(&mut line)? == 0 {
                // EOF
                break;
            }

            let input = line.trim();
            if input.is_empty() {
                continue;
            }
            if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
                break;
            }

            let result = policy.answer(&Query::new(input), &history).await;

            println!("[{}]", result.provenance);
            println!("{}", result.content);
            println!();

            history.push(ConversationTurn::human(input));
            history.push(ConversationTurn::ai(result.content, result.provenance));
        }

        tracing::info!("Chat session ended after {} turns", history.len() / 2);
        Ok(())
    }
}
