use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info};

use crate::document::Corpus;
use crate::error::{Error, Result};
use crate::matrix::{TfIdfMatrix, Vocabulary};
use crate::preprocessing::Normalizer;

/// Vocabulary plus document-term weights for one corpus load.
#[derive(Debug, Clone)]
pub struct Index {
    vocabulary: Vocabulary,
    matrix: TfIdfMatrix,
}

#[derive(Serialize)]
struct IndexExport<'a> {
    vocabulary: &'a [String],
    tfidf_matrix: Vec<Vec<f64>>,
}

#[cfg(feature = "parallel")]
fn normalize_all(corpus: &Corpus, normalizer: &Normalizer) -> Vec<Vec<String>> {
    use rayon::prelude::*;

    let documents: Vec<_> = corpus.iter().collect();
    documents
        .par_iter()
        .map(|doc| normalizer.normalize(&doc.content))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn normalize_all(corpus: &Corpus, normalizer: &Normalizer) -> Vec<Vec<String>> {
    corpus
        .iter()
        .map(|doc| normalizer.normalize(&doc.content))
        .collect()
}

impl Index {
    /// Builds from document contents. Rows follow corpus order.
    pub fn build(corpus: &Corpus, normalizer: &Normalizer) -> Self {
        let start = Instant::now();

        let token_lists = normalize_all(corpus, normalizer);
        let vocabulary = Vocabulary::from_token_lists(&token_lists);
        debug!(terms = vocabulary.len(), "vocabulary built");

        let matrix = TfIdfMatrix::build(&token_lists, &vocabulary);

        info!(
            documents = matrix.rows(),
            vocabulary = vocabulary.len(),
            nnz = matrix.nnz(),
            elapsed = ?start.elapsed(),
            "index built"
        );
        Index { vocabulary, matrix }
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn matrix(&self) -> &TfIdfMatrix {
        &self.matrix
    }

    /// Number of indexed documents.
    pub fn len(&self) -> usize {
        self.matrix.rows()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Writes the vocabulary and the dense weight matrix as pretty JSON.
    pub fn export_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let export = IndexExport {
            vocabulary: self.vocabulary.terms(),
            tfidf_matrix: self.matrix.to_dense_rows(),
        };

        let file = File::create(path).map_err(|e| Error::io(path, e))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &export).map_err(|source| Error::Json {
            source_name: path.display().to_string(),
            source,
        })?;
        writer.flush().map_err(|e| Error::io(path, e))?;

        info!(path = %path.display(), "index exported");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use crate::stemer::StemmingPolicy;
    use std::collections::HashSet;

    fn doc(id: &str, content: &str) -> Document {
        Document {
            id: id.to_string(),
            title: id.to_uppercase(),
            author: None,
            date: None,
            category: None,
            content: content.to_string(),
        }
    }

    #[test]
    fn build_is_deterministic() {
        let corpus = Corpus::new(vec![
            doc("a", "markets rally as rates fall"),
            doc("b", "rates hold steady, markets calm"),
            doc("c", "storm hits coastal towns"),
        ]);
        let normalizer = Normalizer::new(HashSet::new(), StemmingPolicy::Porter);
        let first = Index::build(&corpus, &normalizer);
        let second = Index::build(&corpus, &normalizer);

        assert_eq!(first.vocabulary().terms(), second.vocabulary().terms());
        assert_eq!(first.matrix().to_dense_rows(), second.matrix().to_dense_rows());
    }

    #[test]
    fn export_writes_vocabulary_and_rows() {
        let corpus = Corpus::new(vec![doc("a", "cat dog"), doc("b", "bird")]);
        let index = Index::build(&corpus, &Normalizer::default());
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.json");
        index.export_json(&path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["vocabulary"].as_array().unwrap().len(), 3);
        assert_eq!(value["tfidf_matrix"].as_array().unwrap().len(), 2);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn parallel_build_matches_sequential() {
        let corpus: Corpus = (0..64)
            .map(|i| doc(&i.to_string(), &format!("story {i} about markets rates storms and elections number{i}")))
            .collect();
        let normalizer = Normalizer::new(HashSet::new(), StemmingPolicy::Porter);

        let sequential: Vec<Vec<String>> = corpus.iter().map(|d| normalizer.normalize(&d.content)).collect();
        assert_eq!(normalize_all(&corpus, &normalizer), sequential);

        let vocabulary = Vocabulary::from_token_lists(&sequential);
        let expected = TfIdfMatrix::build(&sequential, &vocabulary);
        let index = Index::build(&corpus, &normalizer);
        assert_eq!(index.vocabulary().terms(), vocabulary.terms());
        assert_eq!(index.matrix().to_dense_rows(), expected.to_dense_rows());
    }

    #[test]
    fn empty_corpus_builds_empty_index() {
        let index = Index::build(&Corpus::default(), &Normalizer::default());
        assert!(index.is_empty());
        assert!(index.vocabulary().is_empty());
    }
}
