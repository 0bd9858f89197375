//! Document index abstraction.
//!
//! Defines the retrieval collaborator the answering policy talks to.
//! The policy treats every retrieval failure as a normal fallback
//! condition, never as a user-visible error.

use crate::types::Passage;
use thiserror::Error;

/// Errors a document index may signal.
#[derive(Debug, Error)]
pub enum RetrievalError {
    /// No index is loaded; a normal fallback condition
    #[error("document index is not available")]
    Unavailable,

    /// The backend query itself failed (I/O, corrupt index, ...)
    #[error("index query failed: {0}")]
    Backend(String),
}

/// Trait for document retrieval backends.
///
/// Implementations return candidate passages ordered by descending
/// estimated relevance, bounded by an index-side top-K. The call is
/// blocking from the policy's perspective; callers that need timeouts
/// wrap it themselves.
pub trait DocumentIndex: Send + Sync {
    /// Retrieve candidate passages for a query string.
    fn query(&self, text: &str) -> Result<Vec<Passage>, RetrievalError>;
}
