use std::collections::HashSet;
use std::fs;
use std::path::Path;

use lazy_static::lazy_static;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::error::{Error, Result};
use crate::stemer::StemmingPolicy;

lazy_static! {
    static ref WORD: Regex = Regex::new(r"\w+").expect("valid regex");
}

/// Built-in stopwords for the Vietnamese news corpus.
const VIETNAMESE_STOPWORDS: &[&str] = &[
    "và", "là", "của", "các", "có", "để", "theo", "đã", "một", "không", "tôi", "bạn", "này",
    "cái", "lúc", "nào", "như", "với", "cho", "hơn", "sẽ", "được", "cùng", "nhiều", "từ", "khi",
    "mới", "vì", "lại", "nên", "đang", "chưa", "mà", "bị", "sau", "tất", "những", "lên",
];

pub fn default_stopwords() -> HashSet<String> {
    VIETNAMESE_STOPWORDS.iter().map(|w| w.to_string()).collect()
}

/// Reads one stopword per line; blank lines are skipped.
pub fn load_stop_words(path: impl AsRef<Path>) -> Result<HashSet<String>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let stop_words = content
        .lines()
        .map(|line| line.trim().to_lowercase())
        .filter(|line| !line.is_empty())
        .collect();
    Ok(stop_words)
}

fn fold(text: &str) -> String {
    text.nfkc().collect::<String>().to_lowercase()
}

/// Text-to-terms pipeline shared by documents, queries and summary sentences.
#[derive(Debug, Clone)]
pub struct Normalizer {
    stopwords: HashSet<String>,
    stemming: StemmingPolicy,
}

impl Default for Normalizer {
    fn default() -> Self {
        Normalizer::new(default_stopwords(), StemmingPolicy::default())
    }
}

impl Normalizer {
    pub fn new(stopwords: HashSet<String>, stemming: StemmingPolicy) -> Self {
        Normalizer {
            stopwords: stopwords.iter().map(|w| fold(w)).collect(),
            stemming,
        }
    }

    pub fn stopwords(&self) -> &HashSet<String> {
        &self.stopwords
    }

    /// Lower-cases, splits into words, drops stopwords and tokens that are not
    /// purely alphabetic, then stems what is left. Input order is kept.
    pub fn normalize(&self, text: &str) -> Vec<String> {
        let folded = fold(text);
        WORD.find_iter(&folded)
            .map(|m| m.as_str())
            .filter(|token| token.chars().all(char::is_alphabetic))
            .filter(|token| !self.stopwords.contains(*token))
            .map(|token| self.stemming.stem(token))
            .collect()
    }

    /// [`normalize`](Self::normalize) joined with single spaces.
    pub fn normalize_to_string(&self, text: &str) -> String {
        self.normalize(text).join(" ")
    }
}
