use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{info, warn};

use crate::document::{Corpus, Document};
use crate::error::{Error, Result};

/// Wire shape of a stored record. Every field is optional here so that a
/// missing one becomes a named error instead of a generic decode failure.
#[derive(Deserialize)]
struct Record {
    #[serde(rename = "postId")]
    post_id: Option<String>,
    title: Option<String>,
    author: Option<String>,
    date: Option<String>,
    category: Option<String>,
    content: Option<String>,
}

fn required(value: Option<String>, source_name: &str, field: &'static str) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(Error::MalformedDocument {
            source_name: source_name.to_string(),
            field,
        }),
    }
}

/// Decodes one JSON record, rejecting it when `postId`, `title` or `content`
/// is absent or blank.
pub fn parse_document(source_name: &str, json: &str) -> Result<Document> {
    let record: Record = serde_json::from_str(json).map_err(|source| Error::Json {
        source_name: source_name.to_string(),
        source,
    })?;

    Ok(Document {
        id: required(record.post_id, source_name, "postId")?,
        title: required(record.title, source_name, "title")?,
        author: record.author,
        date: record.date,
        category: record.category,
        content: required(record.content, source_name, "content")?,
    })
}

fn json_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| Error::io(dir, e))?;
    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| Error::io(dir, e))?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        }
    }
    // read_dir order is platform dependent
    files.sort();
    Ok(files)
}

fn read_document(path: &Path) -> Result<Document> {
    let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    parse_document(&path.display().to_string(), &content)
}

/// Loads every `*.json` record in `dir`, failing on the first bad one.
pub fn load_documents(dir: impl AsRef<Path>) -> Result<Corpus> {
    let dir = dir.as_ref();
    let documents = json_files(dir)?
        .iter()
        .map(|path| read_document(path))
        .collect::<Result<Vec<_>>>()?;

    info!(dir = %dir.display(), documents = documents.len(), "corpus loaded");
    Ok(Corpus::new(documents))
}

/// Like [`load_documents`], but skips records that fail to decode or validate
/// and hands them back next to the corpus.
pub fn load_documents_lenient(dir: impl AsRef<Path>) -> Result<(Corpus, Vec<Error>)> {
    let dir = dir.as_ref();
    let mut documents = Vec::new();
    let mut rejected = Vec::new();

    for path in json_files(dir)? {
        match read_document(&path) {
            Ok(doc) => documents.push(doc),
            Err(err) => {
                warn!(error = %err, "skipping record");
                rejected.push(err);
            }
        }
    }

    info!(
        dir = %dir.display(),
        documents = documents.len(),
        rejected = rejected.len(),
        "corpus loaded"
    );
    Ok((Corpus::new(documents), rejected))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_record() {
        let doc = parse_document(
            "a.json",
            r#"{"postId":"abc","title":"T","author":null,"date":"2024-03-01","category":"news","content":"Body."}"#,
        )
        .unwrap();
        assert_eq!(doc.id, "abc");
        assert_eq!(doc.author, None);
        assert_eq!(doc.category.as_deref(), Some("news"));
    }

    #[test]
    fn rejects_missing_content() {
        let err = parse_document("b.json", r#"{"postId":"x","title":"T"}"#).unwrap_err();
        match err {
            Error::MalformedDocument { field, source_name } => {
                assert_eq!(field, "content");
                assert_eq!(source_name, "b.json");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_blank_title() {
        let err = parse_document("c.json", r#"{"postId":"x","title":"  ","content":"c"}"#).unwrap_err();
        assert!(matches!(err, Error::MalformedDocument { field: "title", .. }));
    }

    #[test]
    fn invalid_json_is_reported() {
        let err = parse_document("d.json", "{not json").unwrap_err();
        assert!(matches!(err, Error::Json { .. }));
    }

    #[test]
    fn loads_directory_in_name_order() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("b.json"),
            r#"{"postId":"2","title":"B","content":"second"}"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("a.json"),
            r#"{"postId":"1","title":"A","content":"first"}"#,
        )
        .unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let corpus = load_documents(dir.path()).unwrap();
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.get(0).unwrap().id, "1");
        assert_eq!(corpus.get(1).unwrap().id, "2");
    }

    #[test]
    fn lenient_load_skips_bad_records() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("good.json"),
            r#"{"postId":"1","title":"A","content":"text"}"#,
        )
        .unwrap();
        fs::write(dir.path().join("bad.json"), r#"{"postId":"2","title":"B"}"#).unwrap();

        assert!(load_documents(dir.path()).is_err());

        let (corpus, rejected) = load_documents_lenient(dir.path()).unwrap();
        assert_eq!(corpus.len(), 1);
        assert_eq!(rejected.len(), 1);
    }

    #[test]
    fn missing_directory_is_io_error() {
        let err = load_documents("/definitely/not/here").unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
