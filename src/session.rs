use std::sync::Arc;

use chrono::NaiveDate;
use parking_lot::RwLock;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::document::{Corpus, Document};
use crate::engine::{self, DateRange, SearchResult, filter, query, search};
use crate::error::Result;
use crate::matrix::Index;
use crate::preprocessing::Normalizer;
use crate::summarizer::{self, Summary};

/// A corpus together with the index built from it.
#[derive(Debug)]
pub struct Snapshot {
    corpus: Corpus,
    index: Index,
}

impl Snapshot {
    pub fn build(corpus: Corpus, normalizer: &Normalizer) -> Self {
        let index = Index::build(&corpus, normalizer);
        Snapshot { corpus, index }
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn index(&self) -> &Index {
        &self.index
    }

    /// Query processing, ranking, then date filtering.
    pub fn search(&self, raw_query: &str, range: &DateRange, k: usize, normalizer: &Normalizer) -> Vec<SearchResult> {
        let processed = query::process(raw_query, normalizer);
        debug!(query = raw_query, phrases = processed.phrases.len(), terms = %processed.normalized_text, "query processed");

        let ranked = search::rank(&processed, &self.index, k);
        filter::filter(engine::resolve(ranked, &self.corpus), range)
    }

    pub fn stats(&self) -> Stats {
        Stats {
            document_count: self.corpus.len(),
            vocabulary_size: self.index.vocabulary().len(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub document_count: usize,
    pub vocabulary_size: usize,
}

/// Owns the active snapshot. Reloading builds a new snapshot and swaps it in
/// whole; searches already running keep the one they started with.
#[derive(Debug)]
pub struct Session {
    config: EngineConfig,
    normalizer: Normalizer,
    current: RwLock<Arc<Snapshot>>,
}

impl Session {
    pub fn new(config: EngineConfig, corpus: Corpus) -> Result<Self> {
        let normalizer = config.normalizer()?;
        Ok(Session::with_normalizer(config, normalizer, corpus))
    }

    pub fn with_normalizer(config: EngineConfig, normalizer: Normalizer, corpus: Corpus) -> Self {
        let snapshot = Snapshot::build(corpus, &normalizer);
        Session {
            config,
            normalizer,
            current: RwLock::new(Arc::new(snapshot)),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.current.read().clone()
    }

    /// Replaces the corpus and its index. The build runs without holding the lock.
    pub fn reload(&self, corpus: Corpus) -> Stats {
        let snapshot = Arc::new(Snapshot::build(corpus, &self.normalizer));
        let stats = snapshot.stats();
        *self.current.write() = snapshot;
        info!(documents = stats.document_count, vocabulary = stats.vocabulary_size, "index swapped");
        stats
    }

    pub fn stats(&self) -> Stats {
        self.snapshot().stats()
    }

    pub fn search(&self, query: &str, from_date: Option<NaiveDate>, to_date: Option<NaiveDate>, k: usize) -> Vec<SearchResult> {
        self.search_in(query, &DateRange::new(from_date, to_date), k)
    }

    pub fn search_in(&self, query: &str, range: &DateRange, k: usize) -> Vec<SearchResult> {
        let results = self.snapshot().search(query, range, k, &self.normalizer);
        info!(query, hits = results.len(), "search");
        results
    }

    pub fn document(&self, id: &str) -> Option<Arc<Document>> {
        self.snapshot().corpus().find(id).cloned()
    }

    pub fn summarize(&self, content: &str, sentence_count: usize) -> String {
        summarizer::summarize(content, sentence_count, &self.normalizer)
    }

    pub fn summarize_many<S: AsRef<str>>(&self, contents: &[S], sentence_count: usize) -> String {
        summarizer::summarize_many(contents, sentence_count, &self.normalizer)
    }

    /// Merged summary of the documents with the given ids. Unknown ids are skipped.
    pub fn summarize_documents(&self, ids: &[String], sentence_count: usize) -> Summary {
        let snapshot = self.snapshot();
        let contents: Vec<&str> = ids
            .iter()
            .filter_map(|id| snapshot.corpus().find(id))
            .map(|doc| doc.content.as_str())
            .collect();
        summarizer::extract_many(&contents, sentence_count, &self.normalizer)
    }
}
