//! Error types for lexeval.
//!
//! All library operations return [`Result`], whose error type is
//! [`LexevalError`]. The binary wraps these in `anyhow` to attach the name of
//! the stage that failed.
//!
//! # Examples
//!
//! ```
//! use lexeval::error::{LexevalError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(LexevalError::config("TOP_K must be a positive integer"))
//! }
//!
//! assert!(example_operation().is_err());
//! ```

use std::io;

use thiserror::Error;

/// The main error type for lexeval operations.
#[derive(Error, Debug)]
pub enum LexevalError {
    /// I/O errors (missing input files, unwritable output directories)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Errors reading or writing `;`-separated intermediate files
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Malformed collection XML
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid configuration instructions
    #[error("Configuration error: {0}")]
    Config(String),

    /// Analysis-related errors (tokenization, filtering, etc.)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Collection contents that cannot be interpreted
    #[error("Collection error: {0}")]
    Collection(String),

    /// Inverted list or model errors
    #[error("Index error: {0}")]
    Index(String),

    /// Search errors
    #[error("Search error: {0}")]
    Search(String),

    /// Malformed fields in intermediate files
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for operations that may fail with LexevalError.
pub type Result<T> = std::result::Result<T, LexevalError>;

impl LexevalError {
    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        LexevalError::Config(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        LexevalError::Analysis(msg.into())
    }

    /// Create a new collection error.
    pub fn collection<S: Into<String>>(msg: S) -> Self {
        LexevalError::Collection(msg.into())
    }

    /// Create a new index error.
    pub fn index<S: Into<String>>(msg: S) -> Self {
        LexevalError::Index(msg.into())
    }

    /// Create a new search error.
    pub fn search<S: Into<String>>(msg: S) -> Self {
        LexevalError::Search(msg.into())
    }

    /// Create a new parse error for a malformed field in an intermediate file.
    pub fn parse<S: Into<String>>(msg: S) -> Self {
        LexevalError::Other(format!("Parse error: {}", msg.into()))
    }
}
