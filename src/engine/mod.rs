pub mod filter;
pub mod query;
pub mod search;

use std::sync::Arc;

use crate::document::{Corpus, Document};

pub use filter::DateRange;
pub use query::ProcessedQuery;

/// A ranked hit. `document` points into the corpus it was ranked against.
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub doc_index: usize,
    pub score: f64,
    pub document: Arc<Document>,
}

/// Attaches documents to ranked `(doc_index, score)` pairs.
pub fn resolve(ranked: Vec<(usize, f64)>, corpus: &Corpus) -> Vec<SearchResult> {
    ranked
        .into_iter()
        .filter_map(|(doc_index, score)| {
            corpus.get(doc_index).map(|document| SearchResult {
                doc_index,
                score,
                document: Arc::clone(document),
            })
        })
        .collect()
}
