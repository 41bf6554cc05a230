//! Error types for hyper-schema annotation.

use std::path::PathBuf;
use thiserror::Error;

/// Errors while loading a document from a file, string, or URL.
#[derive(Debug, Error)]
pub enum LoadError {
    // IO errors (exit code 3)
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("cannot read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[cfg(feature = "remote")]
    #[error("failed to fetch {url}: {source}")]
    NetworkError {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    // Parse errors (exit code 2)
    #[error("invalid JSON: {source}")]
    InvalidJson {
        #[source]
        source: serde_json::Error,
    },
}

impl LoadError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            LoadError::FileNotFound { .. } | LoadError::ReadError { .. } => 3,
            #[cfg(feature = "remote")]
            LoadError::NetworkError { .. } => 3,
            LoadError::InvalidJson { .. } => 2,
        }
    }
}

/// Errors deriving a request context from a request URL.
#[derive(Debug, Error)]
pub enum ContextError {
    #[error("invalid request URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("request URL '{url}' has no host")]
    MissingHost { url: String },

    #[error("request path '{path}' is outside the API root '{api_root}'")]
    OutsideApiRoot { path: String, api_root: String },
}

/// The document cannot carry synthesized links.
#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error("document must be an object, got {actual}")]
    NotAnObject { actual: String },

    #[error("links must be an array, got {actual}")]
    InvalidLinks { actual: String },
}

/// The body handed to the rewriter cannot be traversed.
#[derive(Debug, Error)]
pub enum RewriteError {
    #[error("body is not a traversable JSON object, got {actual}")]
    NotTraversable { actual: String },
}

/// Errors from the full annotation pipeline.
#[derive(Debug, Error)]
pub enum AnnotateError {
    #[error(transparent)]
    Context(#[from] ContextError),

    #[error(transparent)]
    Synthesis(#[from] SynthesisError),

    #[error(transparent)]
    Rewrite(#[from] RewriteError),

    #[error("no collection name: not in the request context nor in the document")]
    MissingCollection,
}

impl AnnotateError {
    /// Returns the exit code for this error type.
    ///
    /// Every annotation failure is a structural problem with the input.
    pub fn exit_code(&self) -> i32 {
        2
    }
}
