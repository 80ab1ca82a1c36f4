pub mod porter_algorithm;

use serde::{Deserialize, Serialize};

/// Which stemmer the normalizer runs on surviving tokens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StemmingPolicy {
    #[default]
    Porter,
    None,
}

impl StemmingPolicy {
    pub fn stem(&self, word: &str) -> String {
        match self {
            StemmingPolicy::Porter => porter_algorithm::porter_stem(word),
            StemmingPolicy::None => word.to_string(),
        }
    }
}
