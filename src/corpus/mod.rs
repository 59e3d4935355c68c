//! Corpus loading and train/eval splitting.
//!
//! A corpus is retrieved from a paginated [`CorpusSource`], validated into
//! a [`Dataset`] of labelled records, and split deterministically into a
//! training set and a held-out evaluation set.

pub mod loader;
pub mod record;
pub mod source;

pub use loader::CorpusLoader;
pub use record::{CorpusRecord, Dataset, Sentiment};
pub use source::{CorpusSource, InMemorySource, JsonlSource, RawRecord};
