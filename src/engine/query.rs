use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use crate::preprocessing::Normalizer;

lazy_static! {
    static ref QUOTED: Regex = Regex::new(r#""[^"]*""#).expect("valid regex");
    static ref BOOLEAN_KEYWORD: Regex = Regex::new(r"\b(AND|OR|NOT)\b").expect("valid regex");
}

/// A query split into its quoted phrases and the normalized text that is
/// turned into the bag-of-words vector.
///
/// Phrases are normalized like everything else and merged back into
/// `normalized_text`; they are not matched as literal substrings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProcessedQuery {
    pub phrases: Vec<String>,
    pub normalized_text: String,
}

impl ProcessedQuery {
    pub fn terms(&self) -> Vec<String> {
        self.normalized_text
            .split_whitespace()
            .map(str::to_string)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.normalized_text.is_empty()
    }
}

/// `AND`, `OR` and `NOT` are lower-cased and otherwise left alone; no boolean
/// algebra is applied to them.
fn fold_boolean_keywords(query: &str) -> String {
    BOOLEAN_KEYWORD
        .replace_all(query, |caps: &regex::Captures| caps[1].to_lowercase())
        .into_owned()
}

pub fn process(raw_query: &str, normalizer: &Normalizer) -> ProcessedQuery {
    let query = fold_boolean_keywords(raw_query);

    let mut phrases = Vec::new();
    let mut segments = Vec::new();
    let mut last = 0;

    for quoted in QUOTED.find_iter(&query) {
        segments.push(normalizer.normalize_to_string(&query[last..quoted.start()]));

        let text = quoted.as_str();
        let phrase = normalizer.normalize_to_string(&text[1..text.len() - 1]);
        if !phrase.is_empty() {
            phrases.push(phrase.clone());
            segments.push(phrase);
        }
        last = quoted.end();
    }
    segments.push(normalizer.normalize_to_string(&query[last..]));

    let normalized_text = segments
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    ProcessedQuery {
        phrases,
        normalized_text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stemer::StemmingPolicy;
    use std::collections::HashSet;

    fn normalizer() -> Normalizer {
        let stopwords: HashSet<String> = ["the", "of"].iter().map(|w| w.to_string()).collect();
        Normalizer::new(stopwords, StemmingPolicy::Porter)
    }

    #[test]
    fn plain_query_is_normalized() {
        let q = process("Rising prices of the houses", &normalizer());
        assert!(q.phrases.is_empty());
        assert_eq!(q.normalized_text, "rise price hous");
    }

    #[test]
    fn quoted_phrase_is_extracted_and_spliced() {
        let q = process(r#"flood "the Mekong delta" warnings"#, &normalizer());
        assert_eq!(q.phrases, vec!["mekong delta"]);
        assert_eq!(q.normalized_text, "flood mekong delta warn");
    }

    #[test]
    fn several_phrases_keep_their_position() {
        let q = process(r#""red cars" and "blue boats""#, &normalizer());
        assert_eq!(q.phrases, vec!["red car", "blue boat"]);
        assert_eq!(q.normalized_text, "red car and blue boat");
    }

    #[test]
    fn boolean_keywords_are_plain_terms() {
        let q = process("cats AND dogs NOT birds", &normalizer());
        assert_eq!(q.normalized_text, "cat and dog not bird");
    }

    #[test]
    fn keyword_folding_respects_word_boundaries() {
        assert_eq!(fold_boolean_keywords("ANDROID OR iOS"), "ANDROID or iOS");
    }

    #[test]
    fn unterminated_quote_is_plain_text() {
        let q = process(r#"storm "coast"#, &normalizer());
        assert!(q.phrases.is_empty());
        assert_eq!(q.normalized_text, "storm coast");
    }

    #[test]
    fn stopword_only_phrase_is_dropped() {
        let q = process(r#""the of" election"#, &normalizer());
        assert!(q.phrases.is_empty());
        assert_eq!(q.normalized_text, "elect");
    }
}
