pub mod parser;

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::engine::filter::parse_date;

/// One news record as persisted by the acquisition side, one JSON file each.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(rename = "postId")]
    pub id: String,
    pub title: String,
    pub author: Option<String>,
    pub date: Option<String>,
    pub category: Option<String>,
    pub content: String,
}

impl Document {
    /// Publication date, if the raw `date` field parses.
    pub fn published(&self) -> Option<NaiveDate> {
        self.date.as_deref().and_then(parse_date)
    }
}

/// Ordered documents of one load. Positions are the document indices used by
/// the index and stay fixed until the corpus is replaced.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    documents: Vec<Arc<Document>>,
}

impl Corpus {
    pub fn new(documents: Vec<Document>) -> Self {
        documents.into_iter().collect()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Arc<Document>> {
        self.documents.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Document>> {
        self.documents.iter()
    }

    /// Finds a document by its `postId`.
    pub fn find(&self, id: &str) -> Option<&Arc<Document>> {
        self.documents.iter().find(|doc| doc.id == id)
    }
}

impl FromIterator<Document> for Corpus {
    fn from_iter<T: IntoIterator<Item = Document>>(iter: T) -> Self {
        Corpus {
            documents: iter.into_iter().map(Arc::new).collect(),
        }
    }
}
