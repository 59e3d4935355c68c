//! Error types for the Sentira library.
//!
//! All fallible operations return [`Result`], whose error type is the
//! [`SentiraError`] enum. Loader and grid-validation errors abort a run;
//! per-combination fit failures are recovered inside the search and never
//! surface through this type.
//!
//! # Examples
//!
//! ```
//! use sentira::error::{Result, SentiraError};
//!
//! fn example_operation() -> Result<()> {
//!     Err(SentiraError::analysis("unbalanced ngram range"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use anyhow;
use thiserror::Error;

/// The main error type for Sentira operations.
#[derive(Error, Debug)]
pub enum SentiraError {
    /// The corpus source could not be reached, or a load deadline expired.
    #[error("Corpus source unavailable: {0}")]
    SourceUnavailable(String),

    /// The corpus source was reachable but returned zero records.
    #[error("Empty result: {0}")]
    EmptyResult(String),

    /// A corpus record failed validation (empty text, unknown label).
    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    /// A parameter grid axis has no candidate values.
    #[error("Invalid grid axis: {0}")]
    InvalidGridAxis(String),

    /// Every grid combination failed to fit.
    #[error("Search exhausted: {0}")]
    SearchExhausted(String),

    /// Text analysis errors (normalization, tokenization, vectorization).
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Model errors (invalid hyperparameters, fit/predict failures).
    #[error("Model error: {0}")]
    Model(String),

    /// I/O errors (file operations, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with SentiraError.
pub type Result<T> = std::result::Result<T, SentiraError>;

impl SentiraError {
    /// Create a new source-unavailable error.
    pub fn source_unavailable<S: Into<String>>(msg: S) -> Self {
        SentiraError::SourceUnavailable(msg.into())
    }

    /// Create a new empty-result error.
    pub fn empty_result<S: Into<String>>(msg: S) -> Self {
        SentiraError::EmptyResult(msg.into())
    }

    /// Create a new malformed-record error.
    pub fn malformed_record<S: Into<String>>(msg: S) -> Self {
        SentiraError::MalformedRecord(msg.into())
    }

    /// Create a new invalid-grid-axis error.
    pub fn invalid_grid_axis<S: Into<String>>(msg: S) -> Self {
        SentiraError::InvalidGridAxis(msg.into())
    }

    /// Create a new search-exhausted error.
    pub fn search_exhausted<S: Into<String>>(msg: S) -> Self {
        SentiraError::SearchExhausted(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        SentiraError::Analysis(msg.into())
    }

    /// Create a new model error.
    pub fn model<S: Into<String>>(msg: S) -> Self {
        SentiraError::Model(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        SentiraError::Other(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        SentiraError::Other(format!("Invalid argument: {}", msg.into()))
    }

    /// The process exit code a CLI run should report for this error.
    ///
    /// 1 for load/configuration failures, 2 when the whole search space
    /// failed to fit.
    pub fn exit_code(&self) -> i32 {
        match self {
            SentiraError::SearchExhausted(_) => 2,
            _ => 1,
        }
    }
}
