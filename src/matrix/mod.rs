pub mod index;

use std::collections::{BTreeMap, BTreeSet, HashMap};

use sprs::{CsMat, CsVec, CsVecView, TriMat};

pub use index::Index;

/// Sorted term list with reverse lookup. Column `i` of every matrix built
/// against it belongs to `terms[i]`.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    terms: Vec<String>,
    lookup: HashMap<String, usize>,
}

impl Vocabulary {
    /// Union of all tokens, numbered in lexicographic order.
    pub fn from_token_lists<'a, I>(lists: I) -> Self
    where
        I: IntoIterator<Item = &'a Vec<String>>,
    {
        let terms: Vec<String> = lists
            .into_iter()
            .flatten()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let lookup = terms
            .iter()
            .enumerate()
            .map(|(i, term)| (term.clone(), i))
            .collect();
        Vocabulary { terms, lookup }
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn index_of(&self, term: &str) -> Option<usize> {
        self.lookup.get(term).copied()
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Raw counts of in-vocabulary tokens, keyed by column.
    fn count(&self, tokens: &[String]) -> BTreeMap<usize, f64> {
        let mut counts = BTreeMap::new();
        for token in tokens {
            if let Some(idx) = self.index_of(token) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }
        counts
    }
}

fn l2_norm<'a>(values: impl Iterator<Item = &'a f64>) -> f64 {
    values.map(|v| v * v).sum::<f64>().sqrt()
}

/// Row-per-text TF-IDF weights with smoothed idf and unit-length rows.
#[derive(Debug, Clone)]
pub struct TfIdfMatrix {
    matrix: CsMat<f64>,
    idf: Vec<f64>,
}

impl TfIdfMatrix {
    /// `idf(t) = ln((1 + n) / (1 + df(t))) + 1`, weights are raw counts times
    /// idf, then every non-empty row is scaled to length 1.
    pub fn build(token_lists: &[Vec<String>], vocabulary: &Vocabulary) -> Self {
        let n_rows = token_lists.len();
        let n_terms = vocabulary.len();

        let counts: Vec<BTreeMap<usize, f64>> = token_lists
            .iter()
            .map(|tokens| vocabulary.count(tokens))
            .collect();

        let mut df = vec![0usize; n_terms];
        for row in &counts {
            for &term in row.keys() {
                df[term] += 1;
            }
        }

        let n = n_rows as f64;
        let idf: Vec<f64> = df
            .iter()
            .map(|&df| ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0)
            .collect();

        let mut tri_mat = TriMat::new((n_rows, n_terms));
        for (row_idx, row) in counts.iter().enumerate() {
            let weighted: Vec<(usize, f64)> = row
                .iter()
                .map(|(&term, &count)| (term, count * idf[term]))
                .collect();
            let norm = l2_norm(weighted.iter().map(|(_, w)| w));
            if norm > 0.0 {
                for (term, weight) in weighted {
                    tri_mat.add_triplet(row_idx, term, weight / norm);
                }
            }
        }

        let matrix: CsMat<f64> = tri_mat.to_csr();
        TfIdfMatrix { matrix, idf }
    }

    pub fn rows(&self) -> usize {
        self.matrix.rows()
    }

    pub fn cols(&self) -> usize {
        self.matrix.cols()
    }

    pub fn nnz(&self) -> usize {
        self.matrix.nnz()
    }

    pub fn idf(&self) -> &[f64] {
        &self.idf
    }

    pub fn row(&self, index: usize) -> Option<CsVecView<'_, f64>> {
        self.matrix.outer_view(index)
    }

    pub fn row_norm(&self, index: usize) -> f64 {
        self.row(index)
            .map(|row| l2_norm(row.data().iter()))
            .unwrap_or(0.0)
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.matrix.get(row, col).copied().unwrap_or(0.0)
    }

    /// Weighs `tokens` with the idf captured at build time and scales the
    /// result to unit length. `None` when no token is in the vocabulary.
    pub fn vectorize(&self, tokens: &[String], vocabulary: &Vocabulary) -> Option<CsVec<f64>> {
        let counts = vocabulary.count(tokens);
        let (indices, data): (Vec<usize>, Vec<f64>) = counts
            .into_iter()
            .map(|(term, count)| (term, count * self.idf[term]))
            .unzip();

        let norm = l2_norm(data.iter());
        if norm == 0.0 {
            return None;
        }
        let data = data.into_iter().map(|w| w / norm).collect();
        Some(CsVec::new(self.cols(), indices, data))
    }

    /// Dense copy, one `Vec` per row.
    pub fn to_dense_rows(&self) -> Vec<Vec<f64>> {
        self.matrix
            .outer_iterator()
            .map(|row| {
                let mut dense = vec![0.0; self.cols()];
                for (col, &value) in row.iter() {
                    dense[col] = value;
                }
                dense
            })
            .collect()
    }
}
