//! Errors raised by the file and settings adapters.
//!
//! Cleaning itself never fails; these cover reading and writing the data
//! it works on.

use std::{io, path::PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error(transparent)]
    Stream(#[from] io::Error),
    #[error("line {line}: invalid chat record: {source}")]
    Chat {
        line: usize,
        source: serde_json::Error,
    },
    #[error("{}:{line}: invalid chat record: {source}", path.display())]
    ChatFile {
        path: PathBuf,
        line: usize,
        source: serde_json::Error,
    },
    #[error("{}: invalid settings: {source}", path.display())]
    Settings {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
