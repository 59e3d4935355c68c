//! Labelled corpus records and the dataset they form.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SentiraError};

/// Sentiment class of a corpus record.
///
/// The class set is fixed at three; sources with any other label vocabulary
/// are rejected at load time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Negative,
    Neutral,
    Positive,
}

impl Sentiment {
    /// All classes, in index order.
    pub const ALL: [Sentiment; 3] = [Sentiment::Negative, Sentiment::Neutral, Sentiment::Positive];

    /// Number of sentiment classes.
    pub const COUNT: usize = 3;

    /// Parse a source label string into a sentiment class.
    ///
    /// Matching is case-insensitive. Unrecognized labels are a
    /// malformed-record error.
    pub fn parse_label(label: &str) -> Result<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "negative" => Ok(Sentiment::Negative),
            "neutral" => Ok(Sentiment::Neutral),
            "positive" => Ok(Sentiment::Positive),
            other => Err(SentiraError::malformed_record(format!(
                "unrecognized sentiment label: '{other}'"
            ))),
        }
    }

    /// Stable index of this class in `[0, COUNT)`.
    pub fn index(self) -> usize {
        match self {
            Sentiment::Negative => 0,
            Sentiment::Neutral => 1,
            Sentiment::Positive => 2,
        }
    }

    /// Class for a stable index, if in range.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Lowercase display name of this class.
    pub fn as_str(self) -> &'static str {
        match self {
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
            Sentiment::Positive => "positive",
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single labelled corpus item. Immutable once loaded.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CorpusRecord {
    /// Raw text of the post.
    pub text: String,
    /// Sentiment label.
    pub label: Sentiment,
}

impl CorpusRecord {
    /// Create a new record.
    pub fn new<S: Into<String>>(text: S, label: Sentiment) -> Self {
        CorpusRecord {
            text: text.into(),
            label,
        }
    }
}

/// An ordered collection of corpus records.
#[derive(Clone, Debug, PartialEq)]
pub struct Dataset {
    records: Vec<CorpusRecord>,
}

impl Dataset {
    /// Create a dataset from records.
    pub fn new(records: Vec<CorpusRecord>) -> Self {
        Dataset { records }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the dataset has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records, in load order.
    pub fn records(&self) -> &[CorpusRecord] {
        &self.records
    }

    /// Consume the dataset, returning its records.
    pub fn into_records(self) -> Vec<CorpusRecord> {
        self.records
    }

    /// Split into disjoint training and evaluation sets.
    ///
    /// Records are shuffled with a seeded generator, so the same seed on the
    /// same dataset always produces the same split. `eval_fraction` is the
    /// fraction of records held out for evaluation and must leave at least
    /// one record on each side.
    pub fn split(&self, eval_fraction: f64, seed: u64) -> Result<(Vec<CorpusRecord>, Vec<CorpusRecord>)> {
        if !(0.0..1.0).contains(&eval_fraction) || eval_fraction == 0.0 {
            return Err(SentiraError::invalid_argument(format!(
                "eval_fraction must be in (0, 1), got {eval_fraction}"
            )));
        }
        if self.records.len() < 2 {
            return Err(SentiraError::invalid_argument(format!(
                "cannot split a dataset of {} record(s)",
                self.records.len()
            )));
        }

        let mut indices: Vec<usize> = (0..self.records.len()).collect();
        let mut rng = StdRng::seed_from_u64(seed);
        indices.shuffle(&mut rng);

        let eval_len = ((self.records.len() as f64) * eval_fraction).round() as usize;
        let eval_len = eval_len.clamp(1, self.records.len() - 1);

        let eval = indices[..eval_len]
            .iter()
            .map(|&i| self.records[i].clone())
            .collect();
        let train = indices[eval_len..]
            .iter()
            .map(|&i| self.records[i].clone())
            .collect();

        Ok((train, eval))
    }
}
