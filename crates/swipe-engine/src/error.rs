use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SwipeError {
    #[error("IO Error reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse Error: {0}")]
    Parse(String),

    #[error("Invalid Input: {0}")]
    InvalidInput(String),

    #[error("Unknown Key: {0:?} is not on the layout")]
    UnknownKey(char),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Coarse classification of [`SwipeError`], stable across payload changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    IoFailure,
    ParseFailure,
    InvalidInput,
    UnknownKey,
}

impl SwipeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SwipeError::Io { .. } => ErrorKind::IoFailure,
            SwipeError::Parse(_) | SwipeError::Json(_) => ErrorKind::ParseFailure,
            SwipeError::InvalidInput(_) => ErrorKind::InvalidInput,
            SwipeError::UnknownKey(_) => ErrorKind::UnknownKey,
        }
    }
}

pub type SwipeResult<T> = Result<T, SwipeError>;
