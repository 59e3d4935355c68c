//! Paginated corpus sources.
//!
//! A [`CorpusSource`] hands the loader one page of raw records at a time;
//! an empty page terminates pagination. The network boundary of the
//! original system sits behind this trait, so the shipped implementations
//! read from a JSONL file or from memory.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SentiraError};

/// An unvalidated record as returned by a source.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    /// Raw post text.
    pub text: String,
    /// Sentiment label string; validated by the loader.
    pub sentiment: String,
}

/// A paginated supplier of raw corpus records.
///
/// Implementations must honor the deadline: a fetch past the deadline
/// fails with `SourceUnavailable` rather than blocking.
pub trait CorpusSource: Send + Sync {
    /// Fetch the given zero-based page. An empty page marks the end.
    fn fetch_page(&self, page: usize, deadline: Option<Instant>) -> Result<Vec<RawRecord>>;

    /// Get the name of this source (for logging and error messages).
    fn name(&self) -> &'static str;
}

fn check_deadline(deadline: Option<Instant>, source: &str) -> Result<()> {
    if let Some(deadline) = deadline
        && Instant::now() >= deadline
    {
        return Err(SentiraError::source_unavailable(format!(
            "deadline expired while fetching from {source}"
        )));
    }
    Ok(())
}

/// In-memory source, paginating a fixed record list.
#[derive(Clone, Debug)]
pub struct InMemorySource {
    records: Vec<RawRecord>,
    page_size: usize,
}

impl InMemorySource {
    /// Create a source over the given records.
    pub fn new(records: Vec<RawRecord>, page_size: usize) -> Result<Self> {
        if page_size == 0 {
            return Err(SentiraError::invalid_argument("page_size must be at least 1"));
        }
        Ok(InMemorySource { records, page_size })
    }
}

impl CorpusSource for InMemorySource {
    fn fetch_page(&self, page: usize, deadline: Option<Instant>) -> Result<Vec<RawRecord>> {
        check_deadline(deadline, self.name())?;
        let start = page.saturating_mul(self.page_size);
        if start >= self.records.len() {
            return Ok(Vec::new());
        }
        let end = (start + self.page_size).min(self.records.len());
        Ok(self.records[start..end].to_vec())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

/// File-backed source reading one JSON record per line.
///
/// The file is parsed once at open time; `fetch_page` then pages over the
/// parsed records.
#[derive(Clone, Debug)]
pub struct JsonlSource {
    path: PathBuf,
    records: Vec<RawRecord>,
    page_size: usize,
}

impl JsonlSource {
    /// Open and parse a JSONL corpus file.
    pub fn open<P: AsRef<Path>>(path: P, page_size: usize) -> Result<Self> {
        if page_size == 0 {
            return Err(SentiraError::invalid_argument("page_size must be at least 1"));
        }
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path).map_err(|e| {
            SentiraError::source_unavailable(format!("cannot open {}: {e}", path.display()))
        })?;

        let mut records = Vec::new();
        for (line_no, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|e| {
                SentiraError::source_unavailable(format!("cannot read {}: {e}", path.display()))
            })?;
            if line.trim().is_empty() {
                continue;
            }
            let record: RawRecord = serde_json::from_str(&line).map_err(|e| {
                SentiraError::malformed_record(format!(
                    "{}:{}: {e}",
                    path.display(),
                    line_no + 1
                ))
            })?;
            records.push(record);
        }

        Ok(JsonlSource {
            path,
            records,
            page_size,
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CorpusSource for JsonlSource {
    fn fetch_page(&self, page: usize, deadline: Option<Instant>) -> Result<Vec<RawRecord>> {
        check_deadline(deadline, self.name())?;
        let start = page.saturating_mul(self.page_size);
        if start >= self.records.len() {
            return Ok(Vec::new());
        }
        let end = (start + self.page_size).min(self.records.len());
        Ok(self.records[start..end].to_vec())
    }

    fn name(&self) -> &'static str {
        "jsonl"
    }
}
