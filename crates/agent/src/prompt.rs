//! Query intent classification and prompt construction.
//!
//! Pure string work: classify what the user is asking for, then format
//! a prompt that embeds the selected passage text.

use crate::types::{Passage, Query, QueryIntent};

/// Separator between passages in a grounded prompt, so the model can
/// tell the sections apart.
const PASSAGE_SEPARATOR: &str = "\n\n---\n\n";

/// Words and phrases that indicate a summary request.
const SUMMARY_MARKERS: &[&str] = &[
    "summary",
    "summarize",
    "summarise",
    "gist",
    "overview",
    "about",
    "describe",
    "explain",
    "tell me about",
    "what is this document",
    "main points",
    "key points",
    "brief",
    "outline",
];

/// Interrogative words that open a specific question.
const INTERROGATIVES: &[&str] = &["what", "how", "when", "where", "why", "who", "which"];

/// Classify the intent of a query.
///
/// Summary markers take precedence; then a leading interrogative word
/// or a question mark makes the query Specific; everything else is
/// General.
pub fn classify(query: &Query) -> QueryIntent {
    let lower = query.raw.to_lowercase();

    if SUMMARY_MARKERS.iter().any(|marker| lower.contains(marker)) {
        return QueryIntent::Summary;
    }

    let first_word = lower
        .split(|c: char| !c.is_alphanumeric())
        .find(|token| !token.is_empty());

    if first_word.is_some_and(|w| INTERROGATIVES.contains(&w)) || lower.contains('?') {
        return QueryIntent::Specific;
    }

    QueryIntent::General
}

/// System prompt framing every grounded model call.
///
/// The model is told to answer from the supplied material without
/// referring to the retrieval machinery.
pub fn system_prompt() -> String {
    String::from(
        "You are a helpful assistant answering questions about a document.\n\n\
         Instructions:\n\
         - Answer using only the material provided in the prompt\n\
         - Do not mention passages, sections, retrieval, or context; answer as if \
           you had read the document directly\n\
         - Do not use phrases like \"Based on the provided information\"\n\
         - If the material does not contain the answer, say so plainly\n\
         - Keep your response concise and factual\n",
    )
}

/// Build a grounded prompt for the given intent.
///
/// Passage order from the relevance filter is preserved.
pub fn build(query: &Query, passages: &[Passage], intent: QueryIntent) -> String {
    let material = join_passages(passages);

    match intent {
        QueryIntent::Summary => format!(
            "Provide an overview of the following material. Cover the main themes, \
             the key findings, and any significant details worth calling out.\n\n\
             Material:\n{}\n\nRequest: {}",
            material, query.raw
        ),
        QueryIntent::Specific => format!(
            "Answer the question directly using the material below. Preserve any \
             numbers, measurements, and concrete examples it contains. If the \
             question has multiple parts, address every part.\n\n\
             Material:\n{}\n\nQuestion: {}",
            material, query.raw
        ),
        QueryIntent::General => format!(
            "Respond helpfully to the message below, using the provided material \
             where it is relevant.\n\n\
             Material:\n{}\n\nMessage: {}",
            material, query.raw
        ),
    }
}

/// Join passage texts with a visible divider, order preserved.
fn join_passages(passages: &[Passage]) -> String {
    passages
        .iter()
        .map(|p| p.text.trim())
        .collect::<Vec<_>>()
        .join(PASSAGE_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(text: &str) -> Query {
        Query::new(text)
    }

    #[test]
    fn test_classify_summary_markers() {
        assert_eq!(classify(&q("give me a summary")), QueryIntent::Summary);
        assert_eq!(classify(&q("summarise the paper")), QueryIntent::Summary);
        assert_eq!(classify(&q("what are the main points?")), QueryIntent::Summary);
        assert_eq!(classify(&q("what is the document about?")), QueryIntent::Summary);
    }

    #[test]
    fn test_summary_takes_precedence_over_question() {
        // Contains both an interrogative and a summary marker
        assert_eq!(classify(&q("what is the gist?")), QueryIntent::Summary);
    }

    #[test]
    fn test_classify_specific_interrogative() {
        assert_eq!(
            classify(&q("how many speakers are in the dataset?")),
            QueryIntent::Specific
        );
        assert_eq!(classify(&q("when was it recorded")), QueryIntent::Specific);
        assert_eq!(classify(&q("who funded the work")), QueryIntent::Specific);
    }

    #[test]
    fn test_classify_specific_question_mark() {
        assert_eq!(classify(&q("capital of France?")), QueryIntent::Specific);
    }

    #[test]
    fn test_classify_general() {
        assert_eq!(classify(&q("capital of France")), QueryIntent::General);
        assert_eq!(classify(&q("list the authors")), QueryIntent::General);
    }

    #[test]
    fn test_classify_is_case_insensitive() {
        assert_eq!(classify(&q("SUMMARIZE this")), QueryIntent::Summary);
        assert_eq!(classify(&q("How does it work")), QueryIntent::Specific);
    }

    #[test]
    fn test_build_joins_passages_in_order() {
        let passages = vec![Passage::new("First part", 0), Passage::new("Second part", 1)];
        let prompt = build(&q("what happened?"), &passages, QueryIntent::Specific);

        assert!(prompt.contains("First part"));
        assert!(prompt.contains("Second part"));
        assert!(prompt.contains("---"));
        assert!(prompt.find("First part").unwrap() < prompt.find("Second part").unwrap());
    }

    #[test]
    fn test_build_summary_template() {
        let passages = vec![Passage::new("Body text", 0)];
        let prompt = build(&q("summarize"), &passages, QueryIntent::Summary);

        assert!(prompt.contains("overview"));
        assert!(prompt.contains("main themes"));
        assert!(prompt.contains("Body text"));
        assert!(prompt.contains("summarize"));
    }

    #[test]
    fn test_build_specific_template() {
        let passages = vec![Passage::new("120 speakers", 0)];
        let prompt = build(&q("how many speakers?"), &passages, QueryIntent::Specific);

        assert!(prompt.contains("Answer the question directly"));
        assert!(prompt.contains("120 speakers"));
        assert!(prompt.contains("Question: how many speakers?"));
    }

    #[test]
    fn test_build_general_template() {
        let passages = vec![Passage::new("Some material", 0)];
        let prompt = build(&q("interesting stuff"), &passages, QueryIntent::General);

        assert!(prompt.contains("Respond helpfully"));
        assert!(prompt.contains("Some material"));
        assert!(prompt.contains("Message: interesting stuff"));
    }

    #[test]
    fn test_system_prompt_hides_machinery() {
        let prompt = system_prompt();
        assert!(prompt.contains("Do not mention"));
        assert!(prompt.contains("concise"));
    }
}
