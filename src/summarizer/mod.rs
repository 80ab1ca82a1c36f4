//! Extractive summaries by latent semantic analysis.
//!
//! Sentences become rows of a TF-IDF matrix built the same way as the
//! document index. Each of the strongest singular directions of the
//! term-by-sentence matrix contributes the sentence that loads on it most,
//! and the chosen sentences are emitted in the order they were written.

pub mod svd;

use std::collections::HashSet;
use std::fmt;

use nalgebra::DMatrix;
use tracing::debug;

use crate::matrix::{TfIdfMatrix, Vocabulary};
use crate::preprocessing::Normalizer;

/// Returned in place of a summary when the text cannot be summarized.
pub const SUMMARY_UNAVAILABLE: &str = "Summary unavailable: not enough distinct content to summarize.";

/// Placed between merged texts so no sentence spans two of them.
const DOCUMENT_SEPARATOR: &str = "\n";

const TERMINATORS: &[char] = &['.', '!', '?', '…'];
const CLOSERS: &[char] = &['"', '\'', '”', '’', ')', ']', '»'];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Summary {
    Sentences(Vec<String>),
    Unavailable,
}

impl Summary {
    pub fn is_available(&self) -> bool {
        matches!(self, Summary::Sentences(_))
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Summary::Sentences(sentences) => f.write_str(&sentences.join(" ")),
            Summary::Unavailable => f.write_str(SUMMARY_UNAVAILABLE),
        }
    }
}

fn single_letter(part: &str) -> bool {
    let mut chars = part.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_alphabetic())
}

/// A period after a lone capital letter ("J. Smith") or closing a dotted
/// abbreviation ("U.S.", "e.g.") does not end a sentence.
fn is_abbreviation(before: &str) -> bool {
    let word = before.rsplit(char::is_whitespace).next().unwrap_or("");
    match word.split_once('.') {
        None => single_letter(word) && word.chars().all(char::is_uppercase),
        Some(_) => word.split('.').all(single_letter),
    }
}

/// Splits on line breaks and on `.`, `!`, `?` or `…` (plus any closing quote
/// or bracket) followed by whitespace or the end of the line.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut push = |s: &str| {
        let s = s.trim();
        if !s.is_empty() {
            sentences.push(s.to_string());
        }
    };

    for line in text.lines() {
        let chars: Vec<(usize, char)> = line.char_indices().collect();
        let mut start = 0;
        let mut i = 0;
        while i < chars.len() {
            let (pos, c) = chars[i];
            if !TERMINATORS.contains(&c) {
                i += 1;
                continue;
            }

            let mut j = i + 1;
            while j < chars.len() && (TERMINATORS.contains(&chars[j].1) || CLOSERS.contains(&chars[j].1)) {
                j += 1;
            }
            let end = chars.get(j).map_or(line.len(), |&(p, _)| p);
            let at_boundary = chars.get(j).is_none_or(|&(_, next)| next.is_whitespace());
            let abbreviation = c == '.' && j == i + 1 && is_abbreviation(&line[start..pos]);

            if at_boundary && !abbreviation {
                push(&line[start..end]);
                start = end;
            }
            i = j;
        }
        push(&line[start..]);
    }
    sentences
}

/// Keeps the first occurrence of each sentence.
fn distinct(sentences: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    sentences
        .into_iter()
        .filter(|s| seen.insert(s.clone()))
        .collect()
}

/// Picks `count` sentence indices from the decomposition: first the
/// strongest-loading unused sentence of each leading singular vector, then
/// the remaining sentences with the largest weighted length in that space.
fn select(decomposition: &svd::Svd, dims: usize, count: usize) -> Vec<usize> {
    let v = &decomposition.right_vectors;
    let sigma = &decomposition.singular_values;
    let n = v.nrows();
    let mut chosen = vec![false; n];
    let mut selected = Vec::with_capacity(count);

    for dim in 0..dims {
        let best = (0..n)
            .filter(|&s| !chosen[s])
            .max_by(|&a, &b| {
                v[(a, dim)]
                    .abs()
                    .total_cmp(&v[(b, dim)].abs())
                    .then(b.cmp(&a))
            });
        if let Some(s) = best {
            debug!(dim, sentence = s, score = sigma[dim] * v[(s, dim)].abs(), "lsa pick");
            chosen[s] = true;
            selected.push(s);
        }
    }

    let mut rest: Vec<(usize, f64)> = (0..n)
        .filter(|&s| !chosen[s])
        .map(|s| {
            let weight = (0..dims)
                .map(|dim| (sigma[dim] * v[(s, dim)]).powi(2))
                .sum::<f64>()
                .sqrt();
            (s, weight)
        })
        .collect();
    rest.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));

    let missing = count.saturating_sub(selected.len());
    selected.extend(rest.into_iter().take(missing).map(|(s, _)| s));
    selected.sort_unstable();
    selected
}

/// Summary of `text` in at most `sentence_count` of its own sentences.
///
/// Unavailable when the text has fewer distinct sentences than requested
/// (and always for a single sentence), or when no sentence has an indexable
/// term.
pub fn extract(text: &str, sentence_count: usize, normalizer: &Normalizer) -> Summary {
    let sentences = distinct(split_sentences(text));
    if sentence_count == 0 || sentences.len() < sentence_count.max(2) {
        debug!(sentences = sentences.len(), sentence_count, "too few sentences to summarize");
        return Summary::Unavailable;
    }

    let token_lists: Vec<Vec<String>> = sentences.iter().map(|s| normalizer.normalize(s)).collect();
    let vocabulary = Vocabulary::from_token_lists(&token_lists);
    if vocabulary.is_empty() {
        debug!("no indexable terms in text");
        return Summary::Unavailable;
    }

    let rows = TfIdfMatrix::build(&token_lists, &vocabulary).to_dense_rows();
    let term_by_sentence = DMatrix::from_fn(vocabulary.len(), sentences.len(), |t, s| rows[s][t]);
    let decomposition = svd::decompose(&term_by_sentence);

    let rank = decomposition.rank();
    if rank == 0 {
        debug!("sentence matrix has rank zero");
        return Summary::Unavailable;
    }

    let picked = select(&decomposition, rank.min(sentence_count), sentence_count);
    Summary::Sentences(picked.into_iter().map(|i| sentences[i].clone()).collect())
}

pub fn summarize(text: &str, sentence_count: usize, normalizer: &Normalizer) -> String {
    extract(text, sentence_count, normalizer).to_string()
}

/// Joins the texts and summarizes them as one. Sentences are not traced
/// back to the text they came from.
pub fn extract_many<S: AsRef<str>>(texts: &[S], sentence_count: usize, normalizer: &Normalizer) -> Summary {
    let merged = texts
        .iter()
        .map(|t| t.as_ref())
        .collect::<Vec<_>>()
        .join(DOCUMENT_SEPARATOR);
    extract(&merged, sentence_count, normalizer)
}

pub fn summarize_many<S: AsRef<str>>(texts: &[S], sentence_count: usize, normalizer: &Normalizer) -> String {
    extract_many(texts, sentence_count, normalizer).to_string()
}
