//! Error types for lipi operations.

use thiserror::Error;

use crate::script::Script;

/// Errors that can occur while transliterating, rendering or persisting state.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown script: {0}")]
    UnknownScript(String),

    #[error("Unsupported source script: {0}")]
    UnsupportedSource(Script),

    #[error("Transliteration backend error: {0}")]
    Backend(String),

    #[error("Citation lookup failed: {0}")]
    Citation(String),
}

pub type Result<T> = std::result::Result<T, Error>;
