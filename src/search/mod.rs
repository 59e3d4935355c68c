//! Exhaustive grid search with k-fold cross-validation.
//!
//! The search expands the grid into its Cartesian product, evaluates each
//! combination with k-fold cross-validation on the training set, selects
//! the combination with the best mean fold accuracy (first-seen wins on
//! ties), and refits a pipeline at that configuration on the full training
//! set.
//!
//! A combination whose fit fails on any fold is caught, logged, and
//! recorded with the worst possible score; only when every combination
//! fails does the search abort with `SearchExhausted`. Combinations are
//! mutually independent, so they may be evaluated on a thread pool —
//! results are written into a table indexed by combination, keeping
//! selection identical to the sequential case.

pub mod grid;
pub mod kfold;

pub use grid::ParameterGrid;
pub use kfold::{Fold, KFold};

use log::{debug, info, warn};
use rayon::ThreadPoolBuilder;
use serde::{Deserialize, Serialize};

use crate::corpus::record::CorpusRecord;
use crate::error::{Result, SentiraError};
use crate::pipeline::{PipelineConfig, SentimentPipeline};

/// Configuration of a search run.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Number of cross-validation folds.
    pub folds: usize,
    /// Seed for the fold shuffle; fixing it makes runs reproducible.
    pub seed: u64,
    /// Worker threads for combination evaluation. `None` runs sequentially.
    pub parallelism: Option<usize>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            folds: 3,
            seed: 42,
            parallelism: None,
        }
    }
}

/// Per-combination evaluation record.
#[derive(Clone, Debug, Serialize)]
pub struct CombinationRecord {
    /// Position in grid enumeration order.
    pub index: usize,
    /// The evaluated configuration.
    pub config: PipelineConfig,
    /// Accuracy on each fold's held-out portion, in fold order.
    pub fold_scores: Vec<f64>,
    /// Mean fold accuracy; `NEG_INFINITY` for failed combinations.
    pub mean_score: f64,
    /// Failure cause, when the combination could not be fitted.
    pub error: Option<String>,
}

impl CombinationRecord {
    /// Whether the combination was evaluated without failure.
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }

    /// Fold fits attempted for this combination (failures count).
    pub fn fold_fits(&self) -> usize {
        self.fold_scores.len() + usize::from(self.error.is_some())
    }
}

/// Everything a finished search exposes.
#[derive(Debug)]
pub struct SearchOutcome {
    /// Grid index of the best combination.
    pub best_index: usize,
    /// The best configuration.
    pub best_config: PipelineConfig,
    /// Its mean cross-validation accuracy.
    pub best_score: f64,
    /// Pipeline refitted at the best configuration on the full training set.
    pub pipeline: SentimentPipeline,
    /// One record per combination, in grid enumeration order.
    pub records: Vec<CombinationRecord>,
    /// Total fold fits attempted across all combinations.
    pub fold_fits: usize,
}

/// Exhaustive cross-validated grid search over pipeline configurations.
pub struct GridSearch {
    grid: ParameterGrid,
    config: SearchConfig,
}

impl GridSearch {
    /// Create a search over the given grid with default settings.
    pub fn new(grid: ParameterGrid) -> Self {
        GridSearch {
            grid,
            config: SearchConfig::default(),
        }
    }

    /// Replace the search configuration.
    pub fn with_config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the number of cross-validation folds.
    pub fn with_folds(mut self, folds: usize) -> Self {
        self.config.folds = folds;
        self
    }

    /// Set the fold-shuffle seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Evaluate combinations on a pool of this many worker threads.
    pub fn with_parallelism(mut self, threads: usize) -> Self {
        self.config.parallelism = Some(threads);
        self
    }

    /// The grid this search runs over.
    pub fn grid(&self) -> &ParameterGrid {
        &self.grid
    }

    /// Run the full search against the training set.
    pub fn run(&self, train: &[CorpusRecord]) -> Result<SearchOutcome> {
        // Expanding
        let candidates = self.grid.expand()?;
        let folds = KFold::new(self.config.folds, self.config.seed)?.split(train.len())?;
        info!(
            "searching {} combination(s) with {}-fold cross-validation over {} record(s)",
            candidates.len(),
            folds.len(),
            train.len()
        );

        // Evaluating(i of N)
        let records = self.evaluate_all(&candidates, train, &folds)?;

        if records.iter().all(|r| !r.succeeded()) {
            return Err(SentiraError::search_exhausted(format!(
                "all {} combination(s) failed to fit",
                records.len()
            )));
        }

        // Selecting: in-order scan with strictly-greater comparison, so the
        // first-seen combination wins ties regardless of evaluation order.
        let mut best_index = 0;
        for record in &records {
            if record.mean_score > records[best_index].mean_score {
                best_index = record.index;
            }
        }
        let best_config = records[best_index].config;
        let best_score = records[best_index].mean_score;
        info!(
            "best combination {best_index} scored {best_score:.4} (mean of {} folds)",
            records[best_index].fold_scores.len()
        );

        // Refitting
        let mut pipeline = SentimentPipeline::new(&best_config)?;
        pipeline.fit(train)?;

        // Done
        let fold_fits = records.iter().map(|r| r.fold_fits()).sum();
        Ok(SearchOutcome {
            best_index,
            best_config,
            best_score,
            pipeline,
            records,
            fold_fits,
        })
    }

    fn evaluate_all(
        &self,
        candidates: &[PipelineConfig],
        train: &[CorpusRecord],
        folds: &[Fold],
    ) -> Result<Vec<CombinationRecord>> {
        match self.config.parallelism {
            None => Ok(candidates
                .iter()
                .enumerate()
                .map(|(index, config)| Self::evaluate_candidate(index, config, train, folds))
                .collect()),
            Some(threads) => {
                let threads = if threads == 0 { num_cpus::get() } else { threads };
                let pool = ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .thread_name(|i| format!("grid-search-{i}"))
                    .build()
                    .map_err(|e| {
                        SentiraError::other(format!("failed to create thread pool: {e}"))
                    })?;

                // par_iter preserves input order in the collected table, so
                // completion order never influences selection.
                use rayon::prelude::*;
                Ok(pool.install(|| {
                    candidates
                        .par_iter()
                        .enumerate()
                        .map(|(index, config)| {
                            Self::evaluate_candidate(index, config, train, folds)
                        })
                        .collect()
                }))
            }
        }
    }

    /// Cross-validate one combination. Never fails: errors become a record
    /// carrying the worst possible score.
    fn evaluate_candidate(
        index: usize,
        config: &PipelineConfig,
        train: &[CorpusRecord],
        folds: &[Fold],
    ) -> CombinationRecord {
        let mut fold_scores = Vec::with_capacity(folds.len());

        for fold in folds {
            match Self::score_fold(config, train, fold) {
                Ok(score) => fold_scores.push(score),
                Err(e) => {
                    warn!("combination {index} failed: {e} ({config:?})");
                    return CombinationRecord {
                        index,
                        config: *config,
                        fold_scores,
                        mean_score: f64::NEG_INFINITY,
                        error: Some(e.to_string()),
                    };
                }
            }
        }

        let mean_score = fold_scores.iter().sum::<f64>() / fold_scores.len() as f64;
        debug!("combination {index} scored {mean_score:.4}");
        CombinationRecord {
            index,
            config: *config,
            fold_scores,
            mean_score,
            error: None,
        }
    }

    fn score_fold(config: &PipelineConfig, train: &[CorpusRecord], fold: &Fold) -> Result<f64> {
        let fit_records: Vec<CorpusRecord> =
            fold.train.iter().map(|&i| train[i].clone()).collect();
        let held_out: Vec<CorpusRecord> =
            fold.held_out.iter().map(|&i| train[i].clone()).collect();

        let mut pipeline = SentimentPipeline::new(config)?;
        pipeline.fit(&fit_records)?;

        let pairs = pipeline.predict_records(&held_out)?;
        let correct = pairs.iter().filter(|(truth, pred)| truth == pred).count();
        Ok(correct as f64 / pairs.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::tokenizer::TokenizerPolicy;
    use crate::corpus::record::Sentiment;

    fn small_grid() -> ParameterGrid {
        ParameterGrid {
            mention_filter: vec![false],
            ngram_range: vec![(1, 1)],
            max_df: vec![1.0],
            tokenizer: vec![TokenizerPolicy::Default],
            length_feature: vec![false, true],
            c: vec![0.1, 1.0],
        }
    }

    fn labelled_corpus(n_per_class: usize) -> Vec<CorpusRecord> {
        let mut records = Vec::new();
        for i in 0..n_per_class {
            records.push(CorpusRecord::new(
                format!("great lovely wonderful {i}"),
                Sentiment::Positive,
            ));
            records.push(CorpusRecord::new(
                format!("awful dreadful terrible {i}"),
                Sentiment::Negative,
            ));
            records.push(CorpusRecord::new(
                format!("okay average ordinary {i}"),
                Sentiment::Neutral,
            ));
        }
        records
    }

    #[test]
    fn test_every_combination_is_recorded_once() {
        let grid = small_grid();
        let expected = grid.len();
        let outcome = GridSearch::new(grid)
            .with_folds(3)
            .run(&labelled_corpus(8))
            .unwrap();

        assert_eq!(outcome.records.len(), expected);
        for (i, record) in outcome.records.iter().enumerate() {
            assert_eq!(record.index, i);
        }
        assert_eq!(outcome.fold_fits, expected * 3);
    }

    #[test]
    fn test_failed_combinations_get_worst_score() {
        // max_df = 0.0 prunes the whole vocabulary, so those combinations
        // fail while the max_df = 1.0 ones succeed.
        let grid = ParameterGrid {
            max_df: vec![0.0, 1.0],
            length_feature: vec![false],
            c: vec![1.0],
            ..small_grid()
        };
        let outcome = GridSearch::new(grid).run(&labelled_corpus(6)).unwrap();

        let failed: Vec<_> = outcome.records.iter().filter(|r| !r.succeeded()).collect();
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].mean_score, f64::NEG_INFINITY);
        assert!(outcome.best_score > f64::NEG_INFINITY);
    }

    #[test]
    fn test_all_failures_is_search_exhausted() {
        let grid = ParameterGrid {
            max_df: vec![0.0],
            ..small_grid()
        };
        let err = GridSearch::new(grid).run(&labelled_corpus(6)).unwrap_err();
        assert!(matches!(err, SentiraError::SearchExhausted(_)));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let corpus = labelled_corpus(8);
        let sequential = GridSearch::new(small_grid()).run(&corpus).unwrap();
        let parallel = GridSearch::new(small_grid())
            .with_parallelism(4)
            .run(&corpus)
            .unwrap();

        assert_eq!(sequential.best_index, parallel.best_index);
        assert_eq!(sequential.best_config, parallel.best_config);
        let sequential_scores: Vec<f64> =
            sequential.records.iter().map(|r| r.mean_score).collect();
        let parallel_scores: Vec<f64> = parallel.records.iter().map(|r| r.mean_score).collect();
        assert_eq!(sequential_scores, parallel_scores);
    }

    #[test]
    fn test_ties_resolve_to_first_seen() {
        // Two identical C values produce identical combinations; the first
        // must win.
        let grid = ParameterGrid {
            length_feature: vec![false],
            c: vec![1.0, 1.0],
            ..small_grid()
        };
        let outcome = GridSearch::new(grid).run(&labelled_corpus(6)).unwrap();
        assert_eq!(
            outcome.records[0].mean_score,
            outcome.records[1].mean_score
        );
        assert_eq!(outcome.best_index, 0);
    }
}
