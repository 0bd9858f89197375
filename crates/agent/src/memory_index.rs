//! In-memory document index.
//!
//! Ranks passages by cosine similarity over deterministic hashed-trigram
//! embeddings. Good enough to ground a single document without an
//! external embedding service; real deployments can swap in any other
//! [`DocumentIndex`] implementation.

use crate::index::{DocumentIndex, RetrievalError};
use crate::types::Passage;
use std::collections::HashMap;

/// Embedding dimension for the hashed vectors.
const EMBEDDING_DIM: usize = 256;

/// Default number of candidates returned per query.
pub const DEFAULT_TOP_K: usize = 8;

/// In-memory cosine-similarity index over document passages.
pub struct InMemoryIndex {
    /// Passage text with its normalized embedding
    entries: Vec<(String, Vec<f32>)>,

    /// Candidates returned per query
    top_k: usize,
}

impl InMemoryIndex {
    /// Build an index over the given passages with the default top-K.
    pub fn new(passages: Vec<String>) -> Self {
        Self::with_top_k(passages, DEFAULT_TOP_K)
    }

    /// Build an index over the given passages.
    pub fn with_top_k(passages: Vec<String>, top_k: usize) -> Self {
        let entries = passages
            .into_iter()
            .map(|text| {
                let embedding = embed(&text);
                (text, embedding)
            })
            .collect();

        Self { entries, top_k }
    }

    /// Number of indexed passages.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl DocumentIndex for InMemoryIndex {
    fn query(&self, text: &str) -> Result<Vec<Passage>, RetrievalError> {
        let query_embedding = embed(text);

        let mut scored: Vec<(usize, f32)> = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, (_, embedding))| (i, dot(&query_embedding, embedding)))
            .collect();

        // Stable order for equal scores keeps retrieval deterministic
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        let passages = scored
            .into_iter()
            .take(self.top_k)
            .enumerate()
            .map(|(rank, (i, _score))| Passage::new(self.entries[i].0.clone(), rank))
            .collect();

        Ok(passages)
    }
}

/// Embed text into a normalized hashed-trigram vector.
///
/// Each significant word contributes its character trigrams and the
/// whole word, hashed onto fixed dimensions. Deterministic across runs.
fn embed(text: &str) -> Vec<f32> {
    let mut embedding = vec![0.0f32; EMBEDDING_DIM];

    let lower = text.to_lowercase();
    let words: Vec<&str> = lower
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.len() > 2 && !is_stop_word(w))
        .collect();

    let mut word_freq: HashMap<&str, u32> = HashMap::new();
    for word in &words {
        *word_freq.entry(word).or_insert(0) += 1;
    }

    for (word, freq) in &word_freq {
        let chars: Vec<char> = word.chars().collect();
        for window in chars.windows(3) {
            let dim = hash_chars(window, 37) % EMBEDDING_DIM;
            embedding[dim] += (*freq as f32).sqrt();
        }

        let dim = hash_chars(&chars, 31) % EMBEDDING_DIM;
        embedding[dim] += *freq as f32;
    }

    // Normalize to unit length so dot product equals cosine similarity
    let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for v in &mut embedding {
            *v /= norm;
        }
    }

    embedding
}

fn hash_chars(chars: &[char], multiplier: u64) -> usize {
    let mut acc = 0u64;
    for c in chars {
        let mut buf = [0u8; 4];
        for b in c.encode_utf8(&mut buf).bytes() {
            acc = acc.wrapping_mul(multiplier).wrapping_add(b as u64);
        }
    }
    acc as usize
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

fn is_stop_word(word: &str) -> bool {
    const STOP_WORDS: &[&str] = &[
        "the", "and", "for", "are", "was", "were", "this", "that", "with", "from", "have", "has",
        "had", "its", "their", "they", "them", "which", "been", "will", "would", "about",
    ];
    STOP_WORDS.contains(&word)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn speech_passages() -> Vec<String> {
        vec![
            "The corpus contains recordings from 120 speakers across three regions.".to_string(),
            "Speech synthesis quality was evaluated with mean opinion scores.".to_string(),
            "Funding was provided by a regional research council.".to_string(),
        ]
    }

    #[test]
    fn test_relevant_passage_ranks_first() {
        let index = InMemoryIndex::new(speech_passages());
        let results = index.query("how many speakers are in the corpus?").unwrap();

        assert!(!results.is_empty());
        assert!(
            results[0].text.contains("speakers"),
            "expected speaker passage first, got: {}",
            results[0].text
        );
    }

    #[test]
    fn test_rank_order_assigned() {
        let index = InMemoryIndex::new(speech_passages());
        let results = index.query("speech synthesis").unwrap();

        for (i, passage) in results.iter().enumerate() {
            assert_eq!(passage.order, i);
        }
    }

    #[test]
    fn test_top_k_respected() {
        let passages: Vec<String> = (0..20).map(|i| format!("passage number {}", i)).collect();
        let index = InMemoryIndex::with_top_k(passages, 8);

        let results = index.query("passage").unwrap();
        assert_eq!(results.len(), 8);
    }

    #[test]
    fn test_empty_index_returns_no_results() {
        let index = InMemoryIndex::new(Vec::new());
        let results = index.query("anything").unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_query_is_deterministic() {
        let index = InMemoryIndex::new(speech_passages());
        let first = index.query("speakers in the dataset").unwrap();
        let second = index.query("speakers in the dataset").unwrap();

        let first_texts: Vec<&str> = first.iter().map(|p| p.text.as_str()).collect();
        let second_texts: Vec<&str> = second.iter().map(|p| p.text.as_str()).collect();
        assert_eq!(first_texts, second_texts);
    }
}
