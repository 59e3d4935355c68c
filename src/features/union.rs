//! Feature union: ordered concatenation of extractor outputs.

use crate::error::{Result, SentiraError};
use crate::features::FeatureExtractor;
use crate::features::vector::SparseVector;

/// Combines several extractors into one fixed-order feature vector.
///
/// Extractors are applied in the order they were added; the combined vector
/// is the concatenation of their outputs. Any extractor error aborts the
/// combine for that document.
pub struct FeatureUnion {
    extractors: Vec<Box<dyn FeatureExtractor>>,
}

impl FeatureUnion {
    /// Create an empty union.
    pub fn new() -> Self {
        FeatureUnion {
            extractors: Vec::new(),
        }
    }

    /// Add an extractor to the end of the stage order.
    pub fn add(mut self, extractor: Box<dyn FeatureExtractor>) -> Self {
        self.extractors.push(extractor);
        self
    }

    /// Number of registered extractors.
    pub fn len(&self) -> usize {
        self.extractors.len()
    }

    /// Check if the union has no extractors.
    pub fn is_empty(&self) -> bool {
        self.extractors.is_empty()
    }

    /// Combined output width across all extractors.
    pub fn width(&self) -> usize {
        self.extractors.iter().map(|e| e.width()).sum()
    }

    /// Downcast the extractor at the given stage position to a concrete type.
    pub fn extractor_as<T: 'static>(&self, index: usize) -> Option<&T> {
        self.extractors
            .get(index)
            .and_then(|e| e.as_any().downcast_ref::<T>())
    }

    /// Fit every extractor on the given documents, in stage order.
    pub fn fit(&mut self, documents: &[String]) -> Result<()> {
        if self.extractors.is_empty() {
            return Err(SentiraError::analysis("feature union has no extractors"));
        }
        for extractor in &mut self.extractors {
            extractor.fit(documents).map_err(|e| {
                SentiraError::analysis(format!("fitting {} failed: {e}", extractor.name()))
            })?;
        }
        Ok(())
    }

    /// Transform one document into the combined feature vector.
    pub fn transform(&self, document: &str) -> Result<SparseVector> {
        let mut parts = Vec::with_capacity(self.extractors.len());
        for extractor in &self.extractors {
            let part = extractor.transform(document).map_err(|e| {
                SentiraError::analysis(format!("{} failed: {e}", extractor.name()))
            })?;
            parts.push(part);
        }
        Ok(SparseVector::concat(&parts))
    }

    /// Transform a batch of documents.
    pub fn transform_batch(&self, documents: &[String]) -> Result<Vec<SparseVector>> {
        documents.iter().map(|d| self.transform(d)).collect()
    }
}

impl Default for FeatureUnion {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::count_vectorizer::{CountVectorizer, VectorizerOptions};
    use crate::features::length::LengthExtractor;

    fn docs(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_union_concatenates_in_stage_order() {
        let vectorizer = CountVectorizer::new(&VectorizerOptions::default()).unwrap();
        let mut union = FeatureUnion::new()
            .add(Box::new(vectorizer))
            .add(Box::new(LengthExtractor::new(true)));

        union.fit(&docs(&["cat dog", "dog bird"])).unwrap();
        // vocabulary: bird=0, cat=1, dog=2; length feature at index 3
        assert_eq!(union.width(), 4);

        let v = union.transform("cat cat").unwrap();
        assert_eq!(v.get(1), 2.0);
        assert_eq!(v.get(3), 7.0);
    }

    #[test]
    fn test_width_is_stable_across_length_flag() {
        for active in [false, true] {
            let vectorizer = CountVectorizer::new(&VectorizerOptions::default()).unwrap();
            let mut union = FeatureUnion::new()
                .add(Box::new(vectorizer))
                .add(Box::new(LengthExtractor::new(active)));
            union.fit(&docs(&["one two", "two three"])).unwrap();
            assert_eq!(union.width(), 4);
        }
    }

    #[test]
    fn test_empty_union_rejects_fit() {
        let mut union = FeatureUnion::new();
        assert!(union.fit(&docs(&["x"])).is_err());
    }
}
