//! # Sentira
//!
//! A sentiment-analysis pipeline library for Rust: corpus loading, text
//! normalization and tokenization, n-gram count features, a multinomial
//! logistic-regression classifier, and exhaustive hyperparameter search
//! with k-fold cross-validation.
//!
//! ## Features
//!
//! - Paginated corpus loading with validation and timeouts
//! - Composable normalization / feature-extraction pipeline
//! - Typed parameter grids and reproducible cross-validated search
//! - Accuracy, null accuracy, confusion matrix, and per-class reports

pub mod analysis;
pub mod classifier;
pub mod cli;
pub mod corpus;
pub mod error;
pub mod evaluate;
pub mod features;
pub mod pipeline;
pub mod search;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
