use std::cmp::Ordering;

use crate::engine::query::ProcessedQuery;
use crate::matrix::Index;

/// Higher score first, then lower document index.
fn by_score(a: &(usize, f64), b: &(usize, f64)) -> Ordering {
    b.1.total_cmp(&a.1).then(a.0.cmp(&b.0))
}

/// Cosine similarity of the query against every document, best `k` first.
///
/// Document rows are unit length and the query vector is scaled to unit
/// length, so the dot product is the cosine.
pub fn rank(query: &ProcessedQuery, index: &Index, k: usize) -> Vec<(usize, f64)> {
    if index.is_empty() || k == 0 {
        return Vec::new();
    }

    let Some(query_vec) = index.matrix().vectorize(&query.terms(), index.vocabulary()) else {
        return Vec::new();
    };

    let mut similarities: Vec<(usize, f64)> = (0..index.len())
        .map(|doc_idx| {
            let sim = index
                .matrix()
                .row(doc_idx)
                .map(|doc_vec| query_vec.dot(&doc_vec))
                .unwrap_or(0.0);
            (doc_idx, sim.clamp(0.0, 1.0))
        })
        .collect();

    if k < similarities.len() {
        similarities.select_nth_unstable_by(k - 1, by_score);
        similarities.truncate(k);
    }
    similarities.sort_by(by_score);
    similarities
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Corpus, Document};
    use crate::engine::query::process;
    use crate::preprocessing::Normalizer;
    use crate::stemer::StemmingPolicy;
    use std::collections::HashSet;

    fn corpus(contents: &[&str]) -> Corpus {
        contents
            .iter()
            .enumerate()
            .map(|(i, content)| Document {
                id: i.to_string(),
                title: format!("doc {i}"),
                author: None,
                date: None,
                category: None,
                content: content.to_string(),
            })
            .collect()
    }

    fn normalizer() -> Normalizer {
        Normalizer::new(HashSet::new(), StemmingPolicy::Porter)
    }

    #[test]
    fn shared_term_outranks_disjoint_document() {
        let normalizer = normalizer();
        let index = Index::build(&corpus(&["cat dog cat", "fish bird"]), &normalizer);
        let results = rank(&process(r#""cat""#, &normalizer), &index, 10);

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].0, 0);
        assert!(results[0].1 > 0.0);
        assert_eq!(results[1], (1, 0.0));
    }

    #[test]
    fn ties_break_by_corpus_order() {
        let normalizer = normalizer();
        let index = Index::build(
            &corpus(&["river flood", "mountain snow", "river flood", "river flood"]),
            &normalizer,
        );
        let results = rank(&process("river", &normalizer), &index, 10);
        let order: Vec<usize> = results.iter().map(|(i, _)| *i).collect();
        assert_eq!(order, vec![0, 2, 3, 1]);
    }

    #[test]
    fn top_k_is_a_prefix_of_full_ranking() {
        let normalizer = normalizer();
        let index = Index::build(
            &corpus(&[
                "election vote count",
                "vote",
                "election results",
                "weather report",
                "vote vote election",
            ]),
            &normalizer,
        );
        let query = process("election vote", &normalizer);
        let full = rank(&query, &index, 100);
        let top = rank(&query, &index, 2);
        assert_eq!(top, full[..2].to_vec());
        for pair in full.windows(2) {
            assert!(pair[0].1 >= pair[1].1);
        }
    }

    #[test]
    fn self_query_ranks_first() {
        let normalizer = normalizer();
        let contents = [
            "central bank raises interest rates again",
            "local team wins championship final",
            "heavy rain floods the northern provinces",
        ];
        let index = Index::build(&corpus(&contents), &normalizer);
        for (i, content) in contents.iter().enumerate() {
            let results = rank(&process(content, &normalizer), &index, 1);
            assert_eq!(results[0].0, i);
            assert!(results[0].1 > 0.0 && results[0].1 <= 1.0);
        }
    }

    #[test]
    fn empty_index_or_unknown_terms_give_nothing() {
        let normalizer = normalizer();
        let empty = Index::build(&Corpus::default(), &normalizer);
        assert!(rank(&process("anything", &normalizer), &empty, 10).is_empty());

        let index = Index::build(&corpus(&["cat"]), &normalizer);
        assert!(rank(&process("zebra", &normalizer), &index, 10).is_empty());
        assert!(rank(&process("", &normalizer), &index, 10).is_empty());
        assert!(rank(&process("cat", &normalizer), &index, 0).is_empty());
    }
}
