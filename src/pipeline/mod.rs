//! The sentiment pipeline: normalization, feature union, classifier.
//!
//! A [`SentimentPipeline`] is built from a [`PipelineConfig`] and composes
//! the stages in a fixed order: mention normalization, then the feature
//! union (count vectorizer followed by the length feature), then the
//! classifier. Every configuration point builds a fresh pipeline, so refits
//! never share state with a prior fit.

use serde::{Deserialize, Serialize};

use crate::analysis::char_filter::{CharFilter, MentionCharFilter};
use crate::classifier::{Classifier, LogisticRegression};
use crate::corpus::record::{CorpusRecord, Sentiment};
use crate::error::{Result, SentiraError};
use crate::features::count_vectorizer::{CountVectorizer, VectorizerOptions};
use crate::features::length::LengthExtractor;
use crate::features::union::FeatureUnion;

/// Full configuration of one pipeline instance.
///
/// This is one point of the hyperparameter search space: the grid
/// enumerates values for each field and the search builds a pipeline per
/// combination.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Replace user mentions with a generic marker before tokenization.
    pub mention_filter: bool,
    /// Count-vectorizer knobs.
    pub vectorizer: VectorizerOptions,
    /// Emit the text-length feature (the feature slot exists either way).
    pub length_feature: bool,
    /// Inverse regularization strength of the classifier.
    pub c: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            mention_filter: true,
            vectorizer: VectorizerOptions::default(),
            length_feature: false,
            c: 1.0,
        }
    }
}

/// An ordered composition of normalization, feature extraction, and
/// classification behind a single fit/predict contract.
pub struct SentimentPipeline {
    config: PipelineConfig,
    mention_filter: Option<MentionCharFilter>,
    features: FeatureUnion,
    classifier: LogisticRegression,
    fitted: bool,
}

impl std::fmt::Debug for SentimentPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentimentPipeline")
            .field("config", &self.config)
            .field("mention_filter", &self.mention_filter.is_some())
            .field("fitted", &self.fitted)
            .finish_non_exhaustive()
    }
}

impl SentimentPipeline {
    /// Build an unfitted pipeline from a configuration.
    pub fn new(config: &PipelineConfig) -> Result<Self> {
        let mention_filter = if config.mention_filter {
            Some(MentionCharFilter::new()?)
        } else {
            None
        };

        let features = FeatureUnion::new()
            .add(Box::new(CountVectorizer::new(&config.vectorizer)?))
            .add(Box::new(LengthExtractor::new(config.length_feature)));

        let classifier = LogisticRegression::new(config.c)?;

        Ok(SentimentPipeline {
            config: *config,
            mention_filter,
            features,
            classifier,
            fitted: false,
        })
    }

    /// Configuration this pipeline was built from.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Check whether the pipeline has been fitted.
    pub fn is_fitted(&self) -> bool {
        self.fitted
    }

    /// Combined feature width. Only meaningful after a fit.
    pub fn feature_width(&self) -> usize {
        self.features.width()
    }

    /// Check whether the fitted vectorizer vocabulary contains a term.
    pub fn vocabulary_contains(&self, term: &str) -> bool {
        // The vectorizer is the first union stage by construction.
        self.features
            .extractor_as::<CountVectorizer>(0)
            .map(|v| v.contains_term(term))
            .unwrap_or(false)
    }

    fn normalize(&self, text: &str) -> String {
        match &self.mention_filter {
            Some(filter) => filter.filter(text),
            None => text.to_string(),
        }
    }

    /// Fit on the given records only.
    pub fn fit(&mut self, records: &[CorpusRecord]) -> Result<()> {
        if records.is_empty() {
            return Err(SentiraError::model("cannot fit a pipeline on zero records"));
        }

        let documents: Vec<String> = records.iter().map(|r| self.normalize(&r.text)).collect();
        let labels: Vec<Sentiment> = records.iter().map(|r| r.label).collect();

        self.features.fit(&documents)?;
        let vectors = self.features.transform_batch(&documents)?;
        self.classifier.fit(&vectors, &labels)?;

        self.fitted = true;
        Ok(())
    }

    /// Predict a sentiment per text.
    pub fn predict(&self, texts: &[String]) -> Result<Vec<Sentiment>> {
        if !self.fitted {
            return Err(SentiraError::model("pipeline has not been fitted"));
        }
        let documents: Vec<String> = texts.iter().map(|t| self.normalize(t)).collect();
        let vectors = self.features.transform_batch(&documents)?;
        self.classifier.predict(&vectors)
    }

    /// Per-class probability scores per text, in class-index order.
    pub fn predict_score(&self, texts: &[String]) -> Result<Vec<[f64; Sentiment::COUNT]>> {
        if !self.fitted {
            return Err(SentiraError::model("pipeline has not been fitted"));
        }
        let documents: Vec<String> = texts.iter().map(|t| self.normalize(t)).collect();
        let vectors = self.features.transform_batch(&documents)?;
        self.classifier.predict_score(&vectors)
    }

    /// Predict labels for a record slice, returning (truth, prediction) pairs.
    pub fn predict_records(&self, records: &[CorpusRecord]) -> Result<Vec<(Sentiment, Sentiment)>> {
        let texts: Vec<String> = records.iter().map(|r| r.text.clone()).collect();
        let predictions = self.predict(&texts)?;
        Ok(records
            .iter()
            .map(|r| r.label)
            .zip(predictions)
            .collect())
    }
}
