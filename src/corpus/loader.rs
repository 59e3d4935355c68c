//! Corpus loader driving a paginated source.

use std::time::{Duration, Instant};

use log::{debug, info};

use crate::corpus::record::{CorpusRecord, Dataset, Sentiment};
use crate::corpus::source::CorpusSource;
use crate::error::{Result, SentiraError};

/// Loads and validates a corpus from a [`CorpusSource`].
///
/// Pagination continues until the source returns an empty page. Every raw
/// record must carry non-empty text and a recognized sentiment label; a
/// violation aborts the load with a malformed-record error.
pub struct CorpusLoader {
    source: Box<dyn CorpusSource>,
    timeout: Option<Duration>,
}

impl CorpusLoader {
    /// Create a loader over the given source.
    pub fn new(source: Box<dyn CorpusSource>) -> Self {
        CorpusLoader {
            source,
            timeout: None,
        }
    }

    /// Set an overall deadline for the load.
    ///
    /// When it expires the source reports `SourceUnavailable`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Retrieve, validate, and assemble the full corpus.
    pub fn load(&self) -> Result<Dataset> {
        let deadline = self.timeout.map(|t| Instant::now() + t);
        let mut records = Vec::new();
        let mut page = 0;

        loop {
            let batch = self.source.fetch_page(page, deadline)?;
            if batch.is_empty() {
                break;
            }
            debug!(
                "fetched page {page} from {}: {} record(s)",
                self.source.name(),
                batch.len()
            );

            for raw in batch {
                if raw.text.trim().is_empty() {
                    return Err(SentiraError::malformed_record(format!(
                        "record {} has empty text",
                        records.len()
                    )));
                }
                let label = Sentiment::parse_label(&raw.sentiment)?;
                records.push(CorpusRecord::new(raw.text, label));
            }
            page += 1;
        }

        if records.is_empty() {
            return Err(SentiraError::empty_result(format!(
                "source {} returned zero records",
                self.source.name()
            )));
        }

        info!(
            "loaded {} record(s) from {} across {page} page(s)",
            records.len(),
            self.source.name()
        );
        Ok(Dataset::new(records))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::source::{InMemorySource, RawRecord};

    fn raw(text: &str, sentiment: &str) -> RawRecord {
        RawRecord {
            text: text.to_string(),
            sentiment: sentiment.to_string(),
        }
    }

    #[test]
    fn test_load_all_pages() {
        let records: Vec<RawRecord> = (0..7)
            .map(|i| raw(&format!("post {i}"), "positive"))
            .collect();
        let source = InMemorySource::new(records, 3).unwrap();

        let dataset = CorpusLoader::new(Box::new(source)).load().unwrap();
        assert_eq!(dataset.len(), 7);
        assert!(dataset.records().iter().all(|r| r.label == Sentiment::Positive));
    }

    #[test]
    fn test_empty_source_is_empty_result() {
        let source = InMemorySource::new(Vec::new(), 10).unwrap();
        let err = CorpusLoader::new(Box::new(source)).load().unwrap_err();
        assert!(matches!(err, SentiraError::EmptyResult(_)));
    }

    #[test]
    fn test_unknown_label_is_malformed() {
        let source =
            InMemorySource::new(vec![raw("some text", "ambivalent")], 10).unwrap();
        let err = CorpusLoader::new(Box::new(source)).load().unwrap_err();
        assert!(matches!(err, SentiraError::MalformedRecord(_)));
    }

    #[test]
    fn test_empty_text_is_malformed() {
        let source = InMemorySource::new(vec![raw("   ", "neutral")], 10).unwrap();
        let err = CorpusLoader::new(Box::new(source)).load().unwrap_err();
        assert!(matches!(err, SentiraError::MalformedRecord(_)));
    }

    #[test]
    fn test_expired_timeout_is_source_unavailable() {
        let source = InMemorySource::new(vec![raw("x", "neutral")], 1).unwrap();
        let loader = CorpusLoader::new(Box::new(source)).with_timeout(Duration::ZERO);
        let err = loader.load().unwrap_err();
        assert!(matches!(err, SentiraError::SourceUnavailable(_)));
    }
}
