//! L2-regularized multinomial logistic regression.

use crate::classifier::Classifier;
use crate::corpus::record::Sentiment;
use crate::error::{Result, SentiraError};
use crate::features::vector::SparseVector;

const N_CLASSES: usize = Sentiment::COUNT;

/// Multinomial (softmax) logistic regression trained by full-batch
/// gradient descent.
///
/// Multi-class handling is native multinomial rather than one-vs-rest: a
/// single weight matrix is trained against the softmax cross-entropy loss.
/// The L2 penalty is scaled by `1/C`, so larger `C` means weaker
/// regularization. Weights initialize to zero, making training fully
/// deterministic.
pub struct LogisticRegression {
    c: f64,
    learning_rate: f64,
    max_iter: usize,
    // weights[class] has one entry per feature; biases are kept separately
    // and excluded from the penalty.
    weights: Vec<Vec<f64>>,
    biases: [f64; N_CLASSES],
    n_features: usize,
    fitted: bool,
}

impl LogisticRegression {
    /// Create a classifier with inverse regularization strength `C > 0`.
    pub fn new(c: f64) -> Result<Self> {
        if !c.is_finite() || c <= 0.0 {
            return Err(SentiraError::model(format!(
                "inverse regularization strength C must be positive, got {c}"
            )));
        }
        Ok(LogisticRegression {
            c,
            learning_rate: 0.1,
            max_iter: 200,
            weights: Vec::new(),
            biases: [0.0; N_CLASSES],
            n_features: 0,
            fitted: false,
        })
    }

    /// Set the gradient-descent step size.
    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    /// Set the number of gradient-descent iterations.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Inverse regularization strength.
    pub fn c(&self) -> f64 {
        self.c
    }

    /// Check whether the classifier has been fitted.
    pub fn is_fitted(&self) -> bool {
        self.fitted
    }

    fn softmax_scores(&self, features: &SparseVector) -> [f64; N_CLASSES] {
        let mut logits = [0.0; N_CLASSES];
        for (class, weights) in self.weights.iter().enumerate() {
            logits[class] = features.dot(weights) + self.biases[class];
        }

        let max = logits.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let mut scores = [0.0; N_CLASSES];
        let mut sum = 0.0;
        for (class, &logit) in logits.iter().enumerate() {
            let e = (logit - max).exp();
            scores[class] = e;
            sum += e;
        }
        for score in &mut scores {
            *score /= sum;
        }
        scores
    }

    fn check_fitted(&self, features: &[SparseVector]) -> Result<()> {
        if !self.fitted {
            return Err(SentiraError::model("classifier has not been fitted"));
        }
        if let Some(bad) = features.iter().find(|f| f.width() != self.n_features) {
            return Err(SentiraError::model(format!(
                "feature width {} does not match fitted width {}",
                bad.width(),
                self.n_features
            )));
        }
        Ok(())
    }
}

impl Classifier for LogisticRegression {
    fn fit(&mut self, features: &[SparseVector], labels: &[Sentiment]) -> Result<()> {
        if features.is_empty() {
            return Err(SentiraError::model("cannot fit on zero samples"));
        }
        if features.len() != labels.len() {
            return Err(SentiraError::model(format!(
                "got {} feature vectors but {} labels",
                features.len(),
                labels.len()
            )));
        }
        let n_features = features[0].width();
        if n_features == 0 {
            return Err(SentiraError::model("cannot fit on zero-width features"));
        }
        if let Some(bad) = features.iter().find(|f| f.width() != n_features) {
            return Err(SentiraError::model(format!(
                "inconsistent feature widths: {} vs {}",
                bad.width(),
                n_features
            )));
        }

        self.n_features = n_features;
        self.weights = vec![vec![0.0; n_features]; N_CLASSES];
        self.biases = [0.0; N_CLASSES];

        let n_samples = features.len() as f64;
        let penalty = 1.0 / (self.c * n_samples);

        for _ in 0..self.max_iter {
            let mut grad_w = vec![vec![0.0; n_features]; N_CLASSES];
            let mut grad_b = [0.0; N_CLASSES];

            for (vector, &label) in features.iter().zip(labels) {
                let scores = self.softmax_scores(vector);
                for class in 0..N_CLASSES {
                    let residual = scores[class] - if label.index() == class { 1.0 } else { 0.0 };
                    if residual == 0.0 {
                        continue;
                    }
                    let grad = &mut grad_w[class];
                    for &(index, value) in vector.entries() {
                        grad[index] += residual * value;
                    }
                    grad_b[class] += residual;
                }
            }

            let step = self.learning_rate / n_samples;
            for class in 0..N_CLASSES {
                let weights = &mut self.weights[class];
                let grad = &grad_w[class];
                for index in 0..n_features {
                    let regularized = grad[index] / n_samples + penalty * weights[index];
                    weights[index] -= self.learning_rate * regularized;
                }
                self.biases[class] -= step * grad_b[class];
            }
        }

        self.fitted = true;
        Ok(())
    }

    fn predict(&self, features: &[SparseVector]) -> Result<Vec<Sentiment>> {
        let scores = self.predict_score(features)?;
        Ok(scores
            .into_iter()
            .map(|class_scores| {
                // Deterministic argmax: ties resolve to the lowest class index.
                let mut best = 0;
                for class in 1..N_CLASSES {
                    if class_scores[class] > class_scores[best] {
                        best = class;
                    }
                }
                Sentiment::ALL[best]
            })
            .collect())
    }

    fn predict_score(&self, features: &[SparseVector]) -> Result<Vec<[f64; N_CLASSES]>> {
        self.check_fitted(features)?;
        Ok(features.iter().map(|f| self.softmax_scores(f)).collect())
    }

    fn name(&self) -> &'static str {
        "logistic_regression"
    }
}
