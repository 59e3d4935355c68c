//! Feature extraction and combination.
//!
//! Extractors share a common fit/transform contract over normalized text.
//! Fitting learns state (such as a vocabulary) from the supplied documents
//! only; transforming produces a [`SparseVector`] of the extractor's fixed
//! width. The [`FeatureUnion`] concatenates extractor outputs in
//! registration order into the single vector the classifier consumes.

pub mod count_vectorizer;
pub mod length;
pub mod union;
pub mod vector;

pub use count_vectorizer::{CountVectorizer, VectorizerOptions};
pub use length::LengthExtractor;
pub use union::FeatureUnion;
pub use vector::SparseVector;

use crate::error::Result;

/// Trait for feature extractors that turn text into numeric features.
///
/// Configuration happens at construction: building an extractor from its
/// options yields a fresh, unfitted instance, so concurrent pipelines never
/// share extractor state.
pub trait FeatureExtractor: Send + Sync {
    /// Learn extractor state from the given documents.
    fn fit(&mut self, documents: &[String]) -> Result<()>;

    /// Transform one document into a feature vector of [`width`](Self::width) entries.
    fn transform(&self, document: &str) -> Result<SparseVector>;

    /// Output width of this extractor. Only meaningful after a fit.
    fn width(&self) -> usize;

    /// Get the name of this extractor (for debugging and error messages).
    fn name(&self) -> &'static str;

    /// Provide access to the concrete type for downcasting.
    fn as_any(&self) -> &dyn std::any::Any;
}
