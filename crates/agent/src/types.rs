//! Agent type definitions.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A contiguous span of document text returned by the index as a
/// retrieval candidate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Passage {
    /// Text content
    pub text: String,

    /// Rank assigned by the index (0 = most relevant)
    pub order: usize,
}

impl Passage {
    /// Create a passage with its index rank.
    pub fn new(text: impl Into<String>, order: usize) -> Self {
        Self {
            text: text.into(),
            order,
        }
    }

    /// Whether the passage carries no usable text.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// A single user query, created per turn.
#[derive(Debug, Clone)]
pub struct Query {
    /// Raw query text as typed by the user
    pub raw: String,
}

impl Query {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    /// Tokenize the query into the set of lowercase words considered
    /// significant for relevance matching.
    ///
    /// Words are split on non-alphanumeric boundaries; tokens of
    /// `min_word_len` characters or fewer are discarded.
    pub fn significant_tokens(&self, min_word_len: usize) -> BTreeSet<String> {
        self.raw
            .to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .filter(|token| token.len() > min_word_len)
            .map(|token| token.to_string())
            .collect()
    }
}

/// Classified intent of a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryIntent {
    /// The user wants broad coverage of the document
    Summary,
    /// A direct question with a concrete answer
    Specific,
    /// Anything else
    General,
}

/// The disclosed origin of an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Provenance {
    /// Answer grounded in retrieved document passages
    Document,
    /// Answer from the model alone, no passage survived filtering
    GeneralKnowledge,
    /// The model invocation itself failed
    Error,
}

impl Provenance {
    /// User-facing label, matching what the chat UI renders.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Document => "Document",
            Self::GeneralKnowledge => "General Knowledge",
            Self::Error => "Error",
        }
    }
}

impl std::fmt::Display for Provenance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one answering turn. Produced once, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerResult {
    /// Answer text (or a failure description for `Error` provenance)
    pub content: String,

    /// Where the answer came from
    pub provenance: Provenance,
}

impl AnswerResult {
    pub fn new(content: impl Into<String>, provenance: Provenance) -> Self {
        Self {
            content: content.into(),
            provenance,
        }
    }

    /// Build the user-visible result for a failed model invocation.
    pub fn model_failure(err: &docchat_core::AppError) -> Self {
        Self {
            content: format!("The language model request failed: {}", err),
            provenance: Provenance::Error,
        }
    }
}

/// Speaker role within a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Human,
    Ai,
}

/// One turn of conversation, owned by the caller's session state.
///
/// The policy receives history read-only and, as specified, does not
/// feed it into retrieval or prompting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provenance: Option<Provenance>,
}

impl ConversationTurn {
    /// A turn spoken by the user.
    pub fn human(content: impl Into<String>) -> Self {
        Self {
            role: Role::Human,
            content: content.into(),
            provenance: None,
        }
    }

    /// A turn spoken by the assistant, tagged with its provenance.
    pub fn ai(content: impl Into<String>, provenance: Provenance) -> Self {
        Self {
            role: Role::Ai,
            content: content.into(),
            provenance: Some(provenance),
        }
    }
}
