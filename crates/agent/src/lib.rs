//! Document question-answering agent.
//!
//! Decides, per conversation turn, whether to answer from retrieved
//! document passages or from the language model's general knowledge,
//! and reports the provenance of every answer.
//!
//! The pieces:
//! - [`DocumentIndex`] — retrieval collaborator, injected by the caller
//! - [`RelevanceFilter`] — keyword-overlap passage selection
//! - [`prompt`] — intent classification and grounded prompt templates
//! - [`AnsweringPolicy`] — orchestration and provenance decision

pub mod filter;
pub mod index;
pub mod memory_index;
pub mod policy;
pub mod prompt;
pub mod types;

// Re-export commonly used types
pub use filter::{PolicyConfig, RelevanceFilter};
pub use index::{DocumentIndex, RetrievalError};
pub use memory_index::InMemoryIndex;
pub use policy::AnsweringPolicy;
pub use types::{
    AnswerResult, ConversationTurn, Passage, Provenance, Query, QueryIntent, Role,
};
