use std::path::PathBuf;

use serde::Deserialize;

use crate::error::Result;
use crate::preprocessing::{Normalizer, default_stopwords, load_stop_words};
use crate::stemer::StemmingPolicy;

pub const DEFAULT_TOP_K: usize = 10;
pub const DEFAULT_SUMMARY_SENTENCES: usize = 3;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// One stopword per line. The built-in Vietnamese list when unset.
    pub stopwords_path: Option<PathBuf>,
    pub stemming: StemmingPolicy,
    pub top_k: usize,
    pub summary_sentences: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            stopwords_path: None,
            stemming: StemmingPolicy::default(),
            top_k: DEFAULT_TOP_K,
            summary_sentences: DEFAULT_SUMMARY_SENTENCES,
        }
    }
}

impl EngineConfig {
    pub fn normalizer(&self) -> Result<Normalizer> {
        let stopwords = match &self.stopwords_path {
            Some(path) => load_stop_words(path)?,
            None => default_stopwords(),
        };
        Ok(Normalizer::new(stopwords, self.stemming))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.top_k, 10);
        assert_eq!(config.summary_sentences, 3);
        assert_eq!(config.stemming, StemmingPolicy::Porter);
        let normalizer = config.normalizer().unwrap();
        assert!(normalizer.stopwords().contains("và"));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: EngineConfig = serde_json::from_str(r#"{"stemming":"none","top_k":5}"#).unwrap();
        assert_eq!(config.stemming, StemmingPolicy::None);
        assert_eq!(config.top_k, 5);
        assert_eq!(config.summary_sentences, DEFAULT_SUMMARY_SENTENCES);
    }

    #[test]
    fn missing_stopword_file_is_an_error() {
        let config = EngineConfig {
            stopwords_path: Some("/no/such/stopwords.txt".into()),
            ..EngineConfig::default()
        };
        assert!(config.normalizer().is_err());
    }
}
