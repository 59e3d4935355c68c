//! Tokenizing n-gram count vectorizer.

use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};

use crate::analysis::tokenizer::{Tokenizer, TokenizerPolicy};
use crate::error::{Result, SentiraError};
use crate::features::FeatureExtractor;
use crate::features::vector::SparseVector;

/// Configuration for a [`CountVectorizer`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct VectorizerOptions {
    /// Inclusive (min_n, max_n) word n-gram range.
    pub ngram_range: (usize, usize),
    /// Drop terms whose document frequency exceeds this fraction of the
    /// fit documents. 1.0 keeps everything.
    pub max_df: f64,
    /// Tokenization policy.
    pub tokenizer: TokenizerPolicy,
}

impl Default for VectorizerOptions {
    fn default() -> Self {
        VectorizerOptions {
            ngram_range: (1, 1),
            max_df: 1.0,
            tokenizer: TokenizerPolicy::Default,
        }
    }
}

/// Bag-of-n-grams count vectorizer.
///
/// The vocabulary is learned exclusively from the documents given to
/// [`fit`](FeatureExtractor::fit); terms first seen at transform time are
/// ignored. Vocabulary indices are assigned in sorted term order, so the
/// same fit documents always produce the same feature layout.
pub struct CountVectorizer {
    options: VectorizerOptions,
    tokenizer: Box<dyn Tokenizer>,
    vocabulary: AHashMap<String, usize>,
}

impl CountVectorizer {
    /// Create a new, unfitted vectorizer from options.
    pub fn new(options: &VectorizerOptions) -> Result<Self> {
        let (min_n, max_n) = options.ngram_range;
        if min_n == 0 {
            return Err(SentiraError::analysis("ngram min_n must be at least 1"));
        }
        if max_n < min_n {
            return Err(SentiraError::analysis(format!(
                "ngram max_n ({max_n}) must be >= min_n ({min_n})"
            )));
        }
        if !(0.0..=1.0).contains(&options.max_df) {
            return Err(SentiraError::analysis(format!(
                "max_df must be in [0, 1], got {}",
                options.max_df
            )));
        }

        Ok(CountVectorizer {
            options: *options,
            tokenizer: options.tokenizer.build()?,
            vocabulary: AHashMap::new(),
        })
    }

    /// Options this vectorizer was configured with.
    pub fn options(&self) -> &VectorizerOptions {
        &self.options
    }

    /// Size of the learned vocabulary.
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Check whether a term is in the learned vocabulary.
    pub fn contains_term(&self, term: &str) -> bool {
        self.vocabulary.contains_key(term)
    }

    /// Tokenize a document and expand tokens into n-gram terms.
    fn terms(&self, document: &str) -> Result<Vec<String>> {
        let tokens = self.tokenizer.tokenize(document)?;
        let (min_n, max_n) = self.options.ngram_range;

        let mut terms = Vec::new();
        for n in min_n..=max_n {
            if n > tokens.len() {
                break;
            }
            for window in tokens.windows(n) {
                terms.push(window.join(" "));
            }
        }
        Ok(terms)
    }
}

impl FeatureExtractor for CountVectorizer {
    fn fit(&mut self, documents: &[String]) -> Result<()> {
        let mut document_frequency: AHashMap<String, usize> = AHashMap::new();
        for doc in documents {
            let unique: AHashSet<String> = self.terms(doc)?.into_iter().collect();
            for term in unique {
                *document_frequency.entry(term).or_insert(0) += 1;
            }
        }

        let n_documents = documents.len().max(1) as f64;
        let mut kept: Vec<String> = document_frequency
            .into_iter()
            .filter(|&(_, df)| df as f64 / n_documents <= self.options.max_df)
            .map(|(term, _)| term)
            .collect();
        kept.sort();

        if kept.is_empty() {
            return Err(SentiraError::analysis(
                "empty vocabulary: no terms survived document-frequency pruning",
            ));
        }

        self.vocabulary = kept
            .into_iter()
            .enumerate()
            .map(|(index, term)| (term, index))
            .collect();
        Ok(())
    }

    fn transform(&self, document: &str) -> Result<SparseVector> {
        if self.vocabulary.is_empty() {
            return Err(SentiraError::analysis("vectorizer has not been fitted"));
        }

        let mut counts: AHashMap<usize, f64> = AHashMap::new();
        for term in self.terms(document)? {
            if let Some(&index) = self.vocabulary.get(&term) {
                *counts.entry(index).or_insert(0.0) += 1.0;
            }
        }

        SparseVector::from_entries(self.vocabulary.len(), counts.into_iter().collect())
    }

    fn width(&self) -> usize {
        self.vocabulary.len()
    }

    fn name(&self) -> &'static str {
        "count_vectorizer"
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_fit_transform_counts() {
        let mut vectorizer = CountVectorizer::new(&VectorizerOptions::default()).unwrap();
        vectorizer
            .fit(&docs(&["cat dog", "dog bird", "cat bird bird"]))
            .unwrap();

        // Sorted vocabulary: bird=0, cat=1, dog=2
        assert_eq!(vectorizer.vocabulary_size(), 3);
        let v = vectorizer.transform("bird bird cat").unwrap();
        assert_eq!(v.get(0), 2.0);
        assert_eq!(v.get(1), 1.0);
        assert_eq!(v.get(2), 0.0);
    }

    #[test]
    fn test_bigrams() {
        let options = VectorizerOptions {
            ngram_range: (1, 2),
            ..Default::default()
        };
        let mut vectorizer = CountVectorizer::new(&options).unwrap();
        vectorizer.fit(&docs(&["good movie", "bad movie"])).unwrap();

        assert!(vectorizer.contains_term("good movie"));
        assert!(vectorizer.contains_term("bad movie"));
        assert!(vectorizer.contains_term("movie"));
    }

    #[test]
    fn test_max_df_prunes_ubiquitous_terms() {
        let options = VectorizerOptions {
            max_df: 0.5,
            ..Default::default()
        };
        let mut vectorizer = CountVectorizer::new(&options).unwrap();
        vectorizer
            .fit(&docs(&["the cat", "the dog", "the bird", "the fish"]))
            .unwrap();

        assert!(!vectorizer.contains_term("the"));
        assert!(vectorizer.contains_term("cat"));
    }

    #[test]
    fn test_unseen_terms_are_ignored() {
        let mut vectorizer = CountVectorizer::new(&VectorizerOptions::default()).unwrap();
        vectorizer.fit(&docs(&["known words only"])).unwrap();

        let v = vectorizer.transform("entirely novel words").unwrap();
        assert_eq!(v.nnz(), 1); // only "words" is known
    }

    #[test]
    fn test_empty_vocabulary_is_an_error() {
        let options = VectorizerOptions {
            max_df: 0.0,
            ..Default::default()
        };
        let mut vectorizer = CountVectorizer::new(&options).unwrap();
        let err = vectorizer.fit(&docs(&["a b", "a c"])).unwrap_err();
        assert!(matches!(err, SentiraError::Analysis(_)));
    }

    #[test]
    fn test_invalid_options_are_rejected() {
        let bad_ngram = VectorizerOptions {
            ngram_range: (2, 1),
            ..Default::default()
        };
        assert!(CountVectorizer::new(&bad_ngram).is_err());

        let bad_df = VectorizerOptions {
            max_df: 1.5,
            ..Default::default()
        };
        assert!(CountVectorizer::new(&bad_df).is_err());
    }
}
