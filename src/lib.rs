//! Ranked retrieval and extractive summarization over a corpus of short news
//! documents.
//!
//! Documents are normalized (lower-cased, stopword-filtered, stemmed),
//! weighted with TF-IDF and ranked against free-text queries by cosine
//! similarity. Results can be narrowed by publication date and condensed
//! with an LSA summarizer.

pub mod api;
pub mod config;
pub mod document;
pub mod engine;
pub mod error;
pub mod matrix;
pub mod preprocessing;
pub mod session;
pub mod stemer;
pub mod summarizer;

pub use config::EngineConfig;
pub use document::parser::{load_documents, load_documents_lenient};
pub use document::{Corpus, Document};
pub use engine::{DateRange, ProcessedQuery, SearchResult};
pub use error::{Error, Result};
pub use matrix::Index;
pub use preprocessing::Normalizer;
pub use session::{Session, Snapshot, Stats};
pub use summarizer::{SUMMARY_UNAVAILABLE, Summary, summarize, summarize_many};

/// Builds a fresh index over `corpus`. Nothing from a previous build is reused.
pub fn build_index(corpus: &Corpus, normalizer: &Normalizer) -> Index {
    Index::build(corpus, normalizer)
}
