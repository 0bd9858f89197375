//! Document loading glue.
//!
//! Reads a plain-text document and splits it into passages on blank
//! lines. Richer ingestion (PDF parsing, chunk overlap) is deliberately
//! out of scope; any external indexer can feed the agent instead.

use docchat_core::{AppError, AppResult};
use std::path::Path;

/// Read a document file and split it into passages.
pub fn load_passages(path: &Path) -> AppResult<Vec<String>> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| AppError::Agent(format!("Failed to read document {:?}: {}", path, e)))?;

    let passages = split_paragraphs(&text);

    tracing::info!(
        "Loaded {} passages from document {:?}",
        passages.len(),
        path
    );

    Ok(passages)
}

/// Split text into paragraphs on blank lines.
fn split_paragraphs(text: &str) -> Vec<String> {
    let mut passages = Vec::new();
    let mut current = String::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.trim().is_empty() {
                passages.push(current.trim().to_string());
            }
            current.clear();
        } else {
            if !current.is_empty() {
                current.push('\n');
            }
            current.push_str(line);
        }
    }

    if !current.trim().is_empty() {
        passages.push(current.trim().to_string());
    }

    passages
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_split_on_blank_lines() {
        let text = "First paragraph\nstill first.\n\nSecond paragraph.\n\n\n\nThird.";
        let passages = split_paragraphs(text);

        assert_eq!(passages.len(), 3);
        assert_eq!(passages[0], "First paragraph\nstill first.");
        assert_eq!(passages[1], "Second paragraph.");
        assert_eq!(passages[2], "Third.");
    }

    #[test]
    fn test_whitespace_only_lines_separate() {
        let text = "one\n   \ntwo";
        let passages = split_paragraphs(text);
        assert_eq!(passages, vec!["one", "two"]);
    }

    #[test]
    fn test_empty_text() {
        assert!(split_paragraphs("").is_empty());
        assert!(split_paragraphs("\n\n\n").is_empty());
    }

    #[test]
    fn test_load_passages_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "alpha\n\nbeta").unwrap();

        let passages = load_passages(file.path()).unwrap();
        assert_eq!(passages, vec!["alpha", "beta"]);
    }

    #[test]
    fn test_load_passages_missing_file() {
        let result = load_passages(Path::new("/nonexistent/document.txt"));
        assert!(result.is_err());
    }
}
