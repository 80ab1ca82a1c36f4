use std::io;
use std::path::{Path, PathBuf};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A stored record lacks a field every document must have.
    #[error("{source_name}: missing or empty `{field}`")]
    MalformedDocument {
        source_name: String,
        field: &'static str,
    },

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{source_name}: invalid JSON: {source}")]
    Json {
        source_name: String,
        #[source]
        source: serde_json::Error,
    },

    /// A caller-supplied date bound that matches none of the accepted formats.
    #[error("invalid date `{0}`")]
    InvalidDate(String),
}

impl Error {
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        Error::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
