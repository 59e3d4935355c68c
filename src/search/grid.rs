//! Typed hyperparameter grids.

use serde::{Deserialize, Serialize};

use crate::analysis::tokenizer::{SocialOptions, TokenizerPolicy};
use crate::error::{Result, SentiraError};
use crate::features::count_vectorizer::VectorizerOptions;
use crate::pipeline::PipelineConfig;

/// A declarative grid of candidate values, one axis per pipeline knob.
///
/// Axes are independent: every point of the Cartesian product is a legal
/// [`PipelineConfig`]. An axis with no candidates is an invalid grid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParameterGrid {
    /// Mention-normalization on/off.
    pub mention_filter: Vec<bool>,
    /// Word n-gram ranges for the vectorizer.
    pub ngram_range: Vec<(usize, usize)>,
    /// Document-frequency cutoffs for the vectorizer.
    pub max_df: Vec<f64>,
    /// Tokenization policies for the vectorizer.
    pub tokenizer: Vec<TokenizerPolicy>,
    /// Length-feature on/off.
    pub length_feature: Vec<bool>,
    /// Inverse regularization strengths for the classifier.
    pub c: Vec<f64>,
}

impl ParameterGrid {
    /// Number of combinations in the Cartesian product.
    pub fn len(&self) -> usize {
        self.mention_filter.len()
            * self.ngram_range.len()
            * self.max_df.len()
            * self.tokenizer.len()
            * self.length_feature.len()
            * self.c.len()
    }

    /// Check if the product is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Validate that every axis has at least one candidate.
    pub fn validate(&self) -> Result<()> {
        let axes: [(&str, usize); 6] = [
            ("mention_filter", self.mention_filter.len()),
            ("ngram_range", self.ngram_range.len()),
            ("max_df", self.max_df.len()),
            ("tokenizer", self.tokenizer.len()),
            ("length_feature", self.length_feature.len()),
            ("c", self.c.len()),
        ];
        for (name, cardinality) in axes {
            if cardinality == 0 {
                return Err(SentiraError::invalid_grid_axis(format!(
                    "axis '{name}' has no candidate values"
                )));
            }
        }
        Ok(())
    }

    /// Expand the grid into every combination.
    ///
    /// Axes iterate in field order with the last axis (`c`) varying
    /// fastest; this enumeration order is what first-seen tie-breaking in
    /// the search refers to.
    pub fn expand(&self) -> Result<Vec<PipelineConfig>> {
        self.validate()?;

        let mut configs = Vec::with_capacity(self.len());
        for &mention_filter in &self.mention_filter {
            for &ngram_range in &self.ngram_range {
                for &max_df in &self.max_df {
                    for &tokenizer in &self.tokenizer {
                        for &length_feature in &self.length_feature {
                            for &c in &self.c {
                                configs.push(PipelineConfig {
                                    mention_filter,
                                    vectorizer: VectorizerOptions {
                                        ngram_range,
                                        max_df,
                                        tokenizer,
                                    },
                                    length_feature,
                                    c,
                                });
                            }
                        }
                    }
                }
            }
        }
        Ok(configs)
    }
}

impl Default for ParameterGrid {
    /// The standard sweep: 2 x 3 x 3 x 2 x 2 x 5 = 360 combinations.
    fn default() -> Self {
        ParameterGrid {
            mention_filter: vec![false, true],
            ngram_range: vec![(1, 1), (1, 2), (1, 3)],
            max_df: vec![0.5, 0.75, 1.0],
            tokenizer: vec![
                TokenizerPolicy::Default,
                TokenizerPolicy::Social(SocialOptions::default()),
            ],
            length_feature: vec![false, true],
            c: vec![0.01, 0.1, 1.0, 10.0, 100.0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_grid_size() {
        let grid = ParameterGrid::default();
        assert_eq!(grid.len(), 360);
        assert_eq!(grid.expand().unwrap().len(), 360);
    }

    #[test]
    fn test_empty_axis_is_invalid() {
        let grid = ParameterGrid {
            c: Vec::new(),
            ..Default::default()
        };
        let err = grid.expand().unwrap_err();
        assert!(matches!(err, SentiraError::InvalidGridAxis(_)));
    }

    #[test]
    fn test_expansion_order_last_axis_fastest() {
        let grid = ParameterGrid {
            mention_filter: vec![false, true],
            ngram_range: vec![(1, 1)],
            max_df: vec![1.0],
            tokenizer: vec![TokenizerPolicy::Default],
            length_feature: vec![false],
            c: vec![0.1, 1.0],
        };
        let configs = grid.expand().unwrap();
        assert_eq!(configs.len(), 4);
        assert_eq!((configs[0].mention_filter, configs[0].c), (false, 0.1));
        assert_eq!((configs[1].mention_filter, configs[1].c), (false, 1.0));
        assert_eq!((configs[2].mention_filter, configs[2].c), (true, 0.1));
        assert_eq!((configs[3].mention_filter, configs[3].c), (true, 1.0));
    }

    #[test]
    fn test_combinations_are_distinct() {
        let configs = ParameterGrid::default().expand().unwrap();
        for (i, a) in configs.iter().enumerate() {
            for b in configs.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_grid_round_trips_through_json() {
        let grid = ParameterGrid::default();
        let json = serde_json::to_string(&grid).unwrap();
        let back: ParameterGrid = serde_json::from_str(&json).unwrap();
        assert_eq!(grid, back);
    }
}
