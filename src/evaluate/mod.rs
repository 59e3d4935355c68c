//! Evaluation of a fitted pipeline on the held-out set.
//!
//! Produces accuracy, null accuracy (the majority class of the training
//! set predicted for every evaluation item), a confusion matrix with
//! row/column totals, and a per-class precision/recall/F1 report with a
//! weighted-average row. Metrics whose denominator is zero (a class absent
//! from the evaluation set, or never predicted) report 0.0 by convention.

use std::fmt;

use serde::Serialize;

use crate::corpus::record::{CorpusRecord, Sentiment};
use crate::error::{Result, SentiraError};
use crate::pipeline::{PipelineConfig, SentimentPipeline};

const N_CLASSES: usize = Sentiment::COUNT;

/// Label-by-predicted-label counts. Rows are true labels, columns are
/// predictions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ConfusionMatrix {
    counts: [[usize; N_CLASSES]; N_CLASSES],
}

impl ConfusionMatrix {
    /// Build a matrix from (truth, prediction) pairs.
    pub fn from_pairs(pairs: &[(Sentiment, Sentiment)]) -> Self {
        let mut counts = [[0usize; N_CLASSES]; N_CLASSES];
        for &(truth, prediction) in pairs {
            counts[truth.index()][prediction.index()] += 1;
        }
        ConfusionMatrix { counts }
    }

    /// Count of items with the given true and predicted labels.
    pub fn count(&self, truth: Sentiment, prediction: Sentiment) -> usize {
        self.counts[truth.index()][prediction.index()]
    }

    /// Total items whose true label is the given class.
    pub fn row_total(&self, truth: Sentiment) -> usize {
        self.counts[truth.index()].iter().sum()
    }

    /// Total items predicted as the given class.
    pub fn column_total(&self, prediction: Sentiment) -> usize {
        self.counts.iter().map(|row| row[prediction.index()]).sum()
    }

    /// Total item count.
    pub fn total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }
}

impl fmt::Display for ConfusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>10}", "true\\pred")?;
        for class in Sentiment::ALL {
            write!(f, "{:>10}", class.as_str())?;
        }
        writeln!(f, "{:>10}", "total")?;

        for truth in Sentiment::ALL {
            write!(f, "{:>10}", truth.as_str())?;
            for prediction in Sentiment::ALL {
                write!(f, "{:>10}", self.count(truth, prediction))?;
            }
            writeln!(f, "{:>10}", self.row_total(truth))?;
        }

        write!(f, "{:>10}", "total")?;
        for prediction in Sentiment::ALL {
            write!(f, "{:>10}", self.column_total(prediction))?;
        }
        writeln!(f, "{:>10}", self.total())
    }
}

/// Precision/recall/F1 for one class (or a weighted average).
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ClassMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

/// Per-class metrics plus the support-weighted average.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ClassificationReport {
    /// Metrics per class, in class-index order.
    pub classes: Vec<LabelledMetrics>,
    /// Support-weighted average across classes.
    pub weighted_avg: ClassMetrics,
}

/// Metrics labelled with their class name.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LabelledMetrics {
    pub label: String,
    #[serde(flatten)]
    pub metrics: ClassMetrics,
}

impl ClassificationReport {
    /// Derive the report from a confusion matrix.
    pub fn from_confusion(matrix: &ConfusionMatrix) -> Self {
        let total = matrix.total();
        let mut classes = Vec::with_capacity(N_CLASSES);
        let mut weighted = ClassMetrics {
            precision: 0.0,
            recall: 0.0,
            f1: 0.0,
            support: total,
        };

        for class in Sentiment::ALL {
            let true_positive = matrix.count(class, class) as f64;
            let predicted = matrix.column_total(class) as f64;
            let support = matrix.row_total(class);

            let precision = ratio_or_zero(true_positive, predicted);
            let recall = ratio_or_zero(true_positive, support as f64);
            let f1 = ratio_or_zero(2.0 * precision * recall, precision + recall);

            if total > 0 {
                let weight = support as f64 / total as f64;
                weighted.precision += weight * precision;
                weighted.recall += weight * recall;
                weighted.f1 += weight * f1;
            }

            classes.push(LabelledMetrics {
                label: class.as_str().to_string(),
                metrics: ClassMetrics {
                    precision,
                    recall,
                    f1,
                    support,
                },
            });
        }

        ClassificationReport {
            classes,
            weighted_avg: weighted,
        }
    }
}

/// 0.0 when the denominator is zero, by reporting convention.
fn ratio_or_zero(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:>12}{:>11}{:>9}{:>9}{:>9}",
            "", "precision", "recall", "f1", "support"
        )?;
        for entry in &self.classes {
            writeln!(
                f,
                "{:>12}{:>11.3}{:>9.3}{:>9.3}{:>9}",
                entry.label,
                entry.metrics.precision,
                entry.metrics.recall,
                entry.metrics.f1,
                entry.metrics.support
            )?;
        }
        writeln!(
            f,
            "{:>12}{:>11.3}{:>9.3}{:>9.3}{:>9}",
            "weighted avg",
            self.weighted_avg.precision,
            self.weighted_avg.recall,
            self.weighted_avg.f1,
            self.weighted_avg.support
        )
    }
}

/// Metrics of the refit pipeline on the held-out evaluation set.
#[derive(Clone, Debug, Serialize)]
pub struct EvaluationReport {
    /// Fraction of evaluation items predicted correctly.
    pub accuracy: f64,
    /// Accuracy of always predicting the training set's majority class.
    pub null_accuracy: f64,
    /// `accuracy - null_accuracy`.
    pub accuracy_delta: f64,
    /// Evaluation set size.
    pub eval_size: usize,
    /// Label-by-predicted-label counts.
    pub confusion_matrix: ConfusionMatrix,
    /// Per-class precision/recall/F1.
    pub classification_report: ClassificationReport,
}

impl fmt::Display for EvaluationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "accuracy:      {:.4}", self.accuracy)?;
        writeln!(f, "null accuracy: {:.4}", self.null_accuracy)?;
        writeln!(f, "delta:         {:+.4}", self.accuracy_delta)?;
        writeln!(f)?;
        writeln!(f, "confusion matrix ({} items):", self.eval_size)?;
        writeln!(f, "{}", self.confusion_matrix)?;
        write!(f, "{}", self.classification_report)
    }
}

/// Final report of a search run: the winning configuration and how it
/// performed on the held-out set.
#[derive(Clone, Debug, Serialize)]
pub struct SearchReport {
    /// Best configuration found by the search.
    pub best_config: PipelineConfig,
    /// Its mean cross-validation accuracy.
    pub best_mean_score: f64,
    /// Combinations evaluated.
    pub combinations: usize,
    /// Total fold fits performed.
    pub fold_fits: usize,
    /// Held-out evaluation of the refit pipeline.
    pub evaluation: EvaluationReport,
}

impl fmt::Display for SearchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "evaluated {} combination(s) ({} fold fits); best mean CV accuracy {:.4}",
            self.combinations, self.fold_fits, self.best_mean_score
        )?;
        writeln!(f, "best configuration: {:?}", self.best_config)?;
        writeln!(f)?;
        write!(f, "{}", self.evaluation)
    }
}

/// Majority class of a record slice; ties resolve to the lowest class index.
pub fn majority_class(records: &[CorpusRecord]) -> Result<Sentiment> {
    if records.is_empty() {
        return Err(SentiraError::invalid_argument(
            "cannot take the majority class of zero records",
        ));
    }
    let mut counts = [0usize; N_CLASSES];
    for record in records {
        counts[record.label.index()] += 1;
    }
    let mut best = 0;
    for class in 1..N_CLASSES {
        if counts[class] > counts[best] {
            best = class;
        }
    }
    Ok(Sentiment::ALL[best])
}

/// Evaluate a fitted pipeline on the evaluation set.
///
/// `train` supplies the majority class for the null-accuracy baseline; the
/// pipeline itself is only read, never refitted.
pub fn evaluate(
    pipeline: &SentimentPipeline,
    train: &[CorpusRecord],
    eval: &[CorpusRecord],
) -> Result<EvaluationReport> {
    if eval.is_empty() {
        return Err(SentiraError::invalid_argument(
            "evaluation set must not be empty",
        ));
    }

    let majority = majority_class(train)?;
    let pairs = pipeline.predict_records(eval)?;

    let correct = pairs.iter().filter(|(truth, pred)| truth == pred).count();
    let accuracy = correct as f64 / pairs.len() as f64;

    let majority_hits = eval.iter().filter(|r| r.label == majority).count();
    let null_accuracy = majority_hits as f64 / eval.len() as f64;

    let confusion_matrix = ConfusionMatrix::from_pairs(&pairs);
    let classification_report = ClassificationReport::from_confusion(&confusion_matrix);

    Ok(EvaluationReport {
        accuracy,
        null_accuracy,
        accuracy_delta: accuracy - null_accuracy,
        eval_size: eval.len(),
        confusion_matrix,
        classification_report,
    })
}
