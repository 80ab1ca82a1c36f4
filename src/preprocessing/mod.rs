pub mod tokenizer;

pub use tokenizer::{Normalizer, default_stopwords, load_stop_words};
