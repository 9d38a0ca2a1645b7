//! Error types for dumbgit-refs

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Cannot list heads at {path}: {source}")]
    HeadsUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot list tags at {path}: {source}")]
    TagsUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot read ref {path}: {source}")]
    RefUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Whether this failure takes the whole process down under strict parity.
    ///
    /// Only an unreadable `refs/tags` directory qualifies; every other
    /// failure is answered with a 404 for the offending request.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::TagsUnreadable { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
