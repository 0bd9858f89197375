//! The answering policy.
//!
//! Orchestrates one conversation turn: retrieve candidate passages,
//! filter them, and either answer grounded in the document or fall back
//! to the model's general knowledge. Retrieval failures degrade; only a
//! failed model call surfaces to the user, as an `Error` provenance.

use crate::filter::{PolicyConfig, RelevanceFilter};
use crate::index::{DocumentIndex, RetrievalError};
use crate::prompt;
use crate::types::{AnswerResult, ConversationTurn, Passage, Provenance, Query, QueryIntent};
use docchat_llm::{LlmClient, LlmRequest};
use std::sync::Arc;

/// Sampling temperature for grounded answers. Low, for factual output.
const ANSWER_TEMPERATURE: f32 = 0.2;

/// Maximum tokens per answer.
const ANSWER_MAX_TOKENS: u32 = 1000;

/// Per-turn answering orchestrator.
///
/// Holds its collaborators by explicit injection; there is no shared
/// mutable state, so one instance can serve concurrent turns if the
/// index and client allow concurrent reads.
pub struct AnsweringPolicy {
    index: Option<Arc<dyn DocumentIndex>>,
    llm: Arc<dyn LlmClient>,
    model: String,
    filter: RelevanceFilter,
}

impl AnsweringPolicy {
    /// Create a policy with default tunables.
    pub fn new(
        index: Option<Arc<dyn DocumentIndex>>,
        llm: Arc<dyn LlmClient>,
        model: impl Into<String>,
    ) -> Self {
        Self::with_config(index, llm, model, PolicyConfig::default())
    }

    /// Create a policy with explicit tunables.
    pub fn with_config(
        index: Option<Arc<dyn DocumentIndex>>,
        llm: Arc<dyn LlmClient>,
        model: impl Into<String>,
        config: PolicyConfig,
    ) -> Self {
        Self {
            index,
            llm,
            model: model.into(),
            filter: RelevanceFilter::new(config),
        }
    }

    /// Answer one user turn.
    ///
    /// Never returns an error: every failure path is absorbed into the
    /// returned `AnswerResult`. History is accepted for interface
    /// compatibility; the policy treats each turn independently.
    pub async fn answer(&self, query: &Query, history: &[ConversationTurn]) -> AnswerResult {
        tracing::info!("Answering turn: {}", query.raw);
        tracing::debug!("History length: {} (not used for grounding)", history.len());

        let passages = self.retrieve(query);
        let intent = prompt::classify(query);
        tracing::debug!("Classified intent: {:?}", intent);

        let grounding = self.filter.filter(query, intent, &passages);

        if grounding.is_empty() {
            tracing::info!("No grounding available, answering from general knowledge");
            return self.answer_fallback(query).await;
        }

        self.answer_grounded(query, &grounding, intent).await
    }

    /// Retrieve candidate passages, absorbing every retrieval failure.
    fn retrieve(&self, query: &Query) -> Vec<Passage> {
        let Some(ref index) = self.index else {
            tracing::debug!("No document index configured");
            return Vec::new();
        };

        match index.query(&query.raw) {
            Ok(passages) => {
                tracing::debug!("Retrieved {} candidate passages", passages.len());
                passages
            }
            Err(RetrievalError::Unavailable) => {
                tracing::debug!("Document index reported unavailable");
                Vec::new()
            }
            Err(err @ RetrievalError::Backend(_)) => {
                tracing::warn!("Retrieval failed, degrading to fallback: {}", err);
                Vec::new()
            }
        }
    }

    /// Answer from the document with a grounded prompt.
    async fn answer_grounded(
        &self,
        query: &Query,
        grounding: &[Passage],
        intent: QueryIntent,
    ) -> AnswerResult {
        let grounded_prompt = prompt::build(query, grounding, intent);

        let request = LlmRequest::new(grounded_prompt, &self.model)
            .with_system(prompt::system_prompt())
            .with_temperature(ANSWER_TEMPERATURE)
            .with_max_tokens(ANSWER_MAX_TOKENS);

        match self.llm.complete(&request).await {
            Ok(response) => AnswerResult::new(response.content, Provenance::Document),
            Err(err) => {
                tracing::error!("Grounded model call failed: {}", err);
                AnswerResult::model_failure(&err)
            }
        }
    }

    /// Answer from general knowledge with the raw query, no document
    /// framing.
    async fn answer_fallback(&self, query: &Query) -> AnswerResult {
        let request = LlmRequest::new(query.raw.clone(), &self.model)
            .with_temperature(ANSWER_TEMPERATURE)
            .with_max_tokens(ANSWER_MAX_TOKENS);

        match self.llm.complete(&request).await {
            Ok(response) => AnswerResult::new(response.content, Provenance::GeneralKnowledge),
            Err(err) => {
                tracing::error!("Fallback model call failed: {}", err);
                AnswerResult::model_failure(&err)
            }
        }
    }
}
