//! Ask command handler.
//!
//! One-shot question answering with provenance output.

use clap::Args;
use docchat_agent::Query;
use docchat_core::{AppConfig, AppError, AppResult};
use std::path::PathBuf;

/// Ask a single question and exit
#[derive(Args, Debug)]
pub struct AskCommand {
    /// The question to ask
    pub question: Option<String>,

    /// Read the question from a file
    #[arg(short, long, conflicts_with = "question")]
    pub file: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl AskCommand {
    /// Execute the ask command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing ask command");

        let question = self
            .get_question()
            .ok_or_else(|| AppError::Config("No question provided".to_string()))?;

        let policy = super::build_policy(config)?;

        // One-shot: no conversation history
        let result = policy.answer(&Query::new(question), &[]).await;

        if self.json {
            let output = serde_json::json!({
                "answer": result.content,
                "source": result.provenance.as_str(),
                "model": config.model,
                "provider": config.provider,
            });

            let json = serde_json::to_string_pretty(&output)
                .map_err(|e| AppError::Serialization(e.to_string()))?;
            println!("{}", json);
        } else {
            println!("{}", result.content);
            println!();
            println!("Source: {}", result.provenance);
        }

        Ok(())
    }

    /// Get the question text from the positional argument or a file.
    fn get_question(&self) -> Option<String> {
        self.question.clone().or_else(|| {
            self.file.as_ref().and_then(|path| {
                std::fs::read_to_string(path)
                    .map_err(|e| tracing::error!("Failed to read question file: {}", e))
                    .ok()
            })
        })
    }
}
