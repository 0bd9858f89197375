//! Command handlers for the docchat CLI.

pub mod ask;
pub mod chat;

// Re-export command types for convenience
pub use ask::AskCommand;
pub use chat::ChatCommand;

use crate::document;
use docchat_agent::{AnsweringPolicy, InMemoryIndex, PolicyConfig};
use docchat_core::{AppConfig, AppError, AppResult};
use docchat_llm::create_client;
use std::sync::Arc;

/// Build the answering policy from the resolved configuration.
///
/// The document index is optional: with no document configured the
/// agent still works, answering everything from general knowledge.
pub(crate) fn build_policy(config: &AppConfig) -> AppResult<AnsweringPolicy> {
    let api_key = config.resolve_api_key();
    let llm = create_client(
        &config.provider,
        config.endpoint.as_deref(),
        api_key.as_deref(),
    )
    .map_err(AppError::Config)?;

    let index: Option<Arc<dyn docchat_agent::DocumentIndex>> = match &config.document {
        Some(path) => {
            let passages = document::load_passages(path)?;
            if passages.is_empty() {
                tracing::warn!("Document {:?} produced no passages", path);
            }
            Some(Arc::new(InMemoryIndex::with_top_k(
                passages,
                config.retrieval.top_k,
            )))
        }
        None => {
            tracing::info!("No document configured; answers will use general knowledge");
            None
        }
    };

    let policy_config = PolicyConfig {
        fan_out: config.retrieval.fan_out,
        summary_cap: config.retrieval.summary_cap,
        specific_cap: config.retrieval.specific_cap,
        min_word_len: config.retrieval.min_word_len,
    };

    Ok(AnsweringPolicy::with_config(
        index,
        llm,
        config.model.clone(),
        policy_config,
    ))
}
