//! Relevance filtering of retrieved passages.
//!
//! Decides which candidate passages are usable grounding for a query.
//! An empty result means "no grounding available" and sends the policy
//! down the general-knowledge fallback path.

use crate::types::{Passage, Query, QueryIntent};

/// Tunables for the relevance filter.
#[derive(Debug, Clone)]
pub struct PolicyConfig {
    /// Ranked passages considered for keyword matching
    pub fan_out: usize,

    /// Maximum passages returned for summary queries
    pub summary_cap: usize,

    /// Maximum passages returned for non-summary queries
    pub specific_cap: usize,

    /// Query tokens of this length or shorter are insignificant
    pub min_word_len: usize,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            fan_out: 5,
            summary_cap: 8,
            specific_cap: 3,
            min_word_len: 3,
        }
    }
}

/// Selects usable passages by keyword overlap with the query.
#[derive(Debug, Clone, Default)]
pub struct RelevanceFilter {
    config: PolicyConfig,
}

impl RelevanceFilter {
    pub fn new(config: PolicyConfig) -> Self {
        Self { config }
    }

    /// Filter candidate passages for one query.
    ///
    /// Blank passages are discarded first. Summary queries bypass
    /// keyword matching entirely and take the first `summary_cap`
    /// passages, since summaries need broad coverage rather than
    /// keyword precision. Everything else keeps a passage iff at least
    /// one significant query token appears as a substring of its
    /// lowercase text, considering the first `fan_out` candidates and
    /// returning at most `specific_cap`, rank order preserved.
    pub fn filter(&self, query: &Query, intent: QueryIntent, passages: &[Passage]) -> Vec<Passage> {
        let candidates: Vec<&Passage> = passages.iter().filter(|p| !p.is_blank()).collect();

        if intent == QueryIntent::Summary {
            return candidates
                .into_iter()
                .take(self.config.summary_cap)
                .cloned()
                .collect();
        }

        let tokens = query.significant_tokens(self.config.min_word_len);
        if tokens.is_empty() {
            tracing::debug!("Query has no significant tokens, nothing to match");
            return Vec::new();
        }

        let selected: Vec<Passage> = candidates
            .into_iter()
            .take(self.config.fan_out)
            .filter(|passage| {
                let haystack = passage.text.to_lowercase();
                let matches = tokens.iter().filter(|t| haystack.contains(t.as_str())).count();
                matches >= 1
            })
            .take(self.config.specific_cap)
            .cloned()
            .collect();

        tracing::debug!(
            "Relevance filter kept {} of {} passages",
            selected.len(),
            passages.len()
        );

        selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn passages(texts: &[&str]) -> Vec<Passage> {
        texts
            .iter()
            .enumerate()
            .map(|(i, t)| Passage::new(*t, i))
            .collect()
    }

    #[test]
    fn test_keyword_match_keeps_passage() {
        let filter = RelevanceFilter::default();
        let query = Query::new("how many speakers are in the dataset?");
        let candidates = passages(&[
            "The dataset contains recordings from 120 speakers.",
            "Unrelated text about cooking pasta.",
        ]);

        let result = filter.filter(&query, QueryIntent::Specific, &candidates);

        assert_eq!(result.len(), 1);
        assert!(result[0].text.contains("speakers"));
    }

    #[test]
    fn test_no_overlap_yields_empty() {
        let filter = RelevanceFilter::default();
        let query = Query::new("capital of France");
        let candidates = passages(&[
            "Speech synthesis converts text to audio.",
            "Voices were recorded in a studio.",
        ]);

        let result = filter.filter(&query, QueryIntent::Specific, &candidates);
        assert!(result.is_empty());
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let filter = RelevanceFilter::default();
        let query = Query::new("tell me the SPEAKERS count");
        let candidates = passages(&["There were many Speakers involved."]);

        let result = filter.filter(&query, QueryIntent::General, &candidates);
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_blank_passages_discarded() {
        let filter = RelevanceFilter::default();
        let query = Query::new("anything goes here really");
        let candidates = passages(&["", "   \n\t", "here is some anything text"]);

        let result = filter.filter(&query, QueryIntent::General, &candidates);
        assert_eq!(result.len(), 1);
        assert!(!result[0].text.trim().is_empty());
    }

    #[test]
    fn test_summary_bypasses_keyword_matching() {
        let filter = RelevanceFilter::default();
        let query = Query::new("give me a summary");
        // None of these share a token with the query
        let candidates = passages(&[
            "Alpha section.",
            "",
            "Beta section.",
            "Gamma section.",
            "Delta section.",
            "Epsilon section.",
            "Zeta section.",
            "Eta section.",
            "Theta section.",
            "Iota section.",
        ]);

        let result = filter.filter(&query, QueryIntent::Summary, &candidates);

        // All non-blank passages up to the summary cap of 8
        assert_eq!(result.len(), 8);
        assert_eq!(result[0].text, "Alpha section.");
        assert_eq!(result[1].text, "Beta section.");
    }

    #[test]
    fn test_specific_cap_limits_results() {
        let filter = RelevanceFilter::default();
        let query = Query::new("tell me about section content");
        let candidates = passages(&[
            "section one",
            "section two",
            "section three",
            "section four",
            "section five",
        ]);

        let result = filter.filter(&query, QueryIntent::General, &candidates);
        assert_eq!(result.len(), 3);
        // Rank order preserved
        assert_eq!(result[0].text, "section one");
        assert_eq!(result[2].text, "section three");
    }

    #[test]
    fn test_fan_out_limits_candidates() {
        let filter = RelevanceFilter::default();
        let query = Query::new("where is the needle hiding?");
        // Match sits beyond the fan-out window of 5
        let candidates = passages(&[
            "hay", "hay", "hay", "hay", "hay", "the needle is here",
        ]);

        let result = filter.filter(&query, QueryIntent::Specific, &candidates);
        assert!(result.is_empty());
    }

    #[test]
    fn test_only_short_tokens_yields_empty() {
        let filter = RelevanceFilter::default();
        let query = Query::new("is it so?");
        let candidates = passages(&["it is so"]);

        let result = filter.filter(&query, QueryIntent::General, &candidates);
        assert!(result.is_empty());
    }

    #[test]
    fn test_filter_is_deterministic() {
        let filter = RelevanceFilter::default();
        let query = Query::new("speakers in the dataset");
        let candidates = passages(&["dataset of speakers", "noise", "more speakers"]);

        let first = filter.filter(&query, QueryIntent::Specific, &candidates);
        let second = filter.filter(&query, QueryIntent::Specific, &candidates);

        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.text, b.text);
        }
    }
}
