//! Binary logistic regression over n-gram counts plus numeric features.
//!
//! A row is the sparse n-gram vector of a token followed by its four numeric
//! features. The numeric columns are standardized with the mean and standard
//! deviation seen at fit time; both are persisted with the weights so that
//! inference applies exactly the same scaling.

use std::time::Instant;

use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{LexGuardError, Result};
use crate::features::NUMERIC_FEATURES;
use crate::types::Label;
use crate::vectorizer::SparseVector;

/// Minimum number of rows needed to fit the model.
pub const MIN_TRAINING_ROWS: usize = 2;

const PROBABILITY_EPSILON: f64 = 1e-12;

/// One classifier input: n-gram counts and numeric features.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    pub ngrams: SparseVector,
    pub numeric: [f64; NUMERIC_FEATURES],
}

impl FeatureRow {
    pub fn new(ngrams: SparseVector, numeric: [f64; NUMERIC_FEATURES]) -> Self {
        Self { ngrams, numeric }
    }
}

/// Hyperparameters for gradient descent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierParams {
    /// Step size.
    pub learning_rate: f64,
    /// Maximum passes over the training rows.
    pub epochs: usize,
    /// L2 penalty on the weights (the bias is not penalized).
    pub l2: f64,
    /// Stop once the loss improves by less than this between epochs.
    pub tolerance: f64,
}

impl Default for ClassifierParams {
    fn default() -> Self {
        Self {
            learning_rate: 0.5,
            epochs: 500,
            l2: 1e-4,
            tolerance: 1e-7,
        }
    }
}

impl ClassifierParams {
    pub fn validate(&self) -> Result<()> {
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(LexGuardError::invalid_config(
                "learning_rate must be a positive number",
            ));
        }
        if self.epochs == 0 {
            return Err(LexGuardError::invalid_config("epochs must be at least 1"));
        }
        if !(self.l2.is_finite() && self.l2 >= 0.0) {
            return Err(LexGuardError::invalid_config("l2 must be non-negative"));
        }
        if !(self.tolerance.is_finite() && self.tolerance >= 0.0) {
            return Err(LexGuardError::invalid_config("tolerance must be non-negative"));
        }
        Ok(())
    }
}

/// Training statistics and loss curve.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingStats {
    /// Mean log-loss after each epoch.
    pub training_losses: Vec<f64>,
    /// Number of epochs completed.
    pub iterations: usize,
    /// Training time in milliseconds.
    pub training_time_ms: u64,
    /// Final training loss.
    pub final_training_loss: f64,
    /// Whether the tolerance stopped training before the epoch limit.
    pub converged: bool,
}

/// Logistic regression classifier predicting [`Label::Real`] vs [`Label::Fake`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegression {
    params: ClassifierParams,
    /// Number of n-gram columns the model was fitted on.
    ngram_dim: usize,
    ngram_weights: Vec<f64>,
    numeric_weights: [f64; NUMERIC_FEATURES],
    bias: f64,
    numeric_mean: [f64; NUMERIC_FEATURES],
    numeric_std: [f64; NUMERIC_FEATURES],
    training_stats: Option<TrainingStats>,
}

impl Default for LogisticRegression {
    fn default() -> Self {
        Self::new(ClassifierParams::default())
    }
}

impl LogisticRegression {
    /// Create an unfitted model.
    pub fn new(params: ClassifierParams) -> Self {
        Self {
            params,
            ngram_dim: 0,
            ngram_weights: Vec::new(),
            numeric_weights: [0.0; NUMERIC_FEATURES],
            bias: 0.0,
            numeric_mean: [0.0; NUMERIC_FEATURES],
            numeric_std: [1.0; NUMERIC_FEATURES],
            training_stats: None,
        }
    }

    /// Fit the model on `rows` whose n-gram vectors live in a space of `ngram_dim` columns.
    pub fn fit(&mut self, ngram_dim: usize, rows: &[FeatureRow], labels: &[Label]) -> Result<()> {
        self.params.validate()?;
        if rows.len() != labels.len() {
            return Err(LexGuardError::other(format!(
                "{} rows but {} labels",
                rows.len(),
                labels.len()
            )));
        }
        if rows.len() < MIN_TRAINING_ROWS {
            return Err(LexGuardError::InsufficientData {
                min_samples: MIN_TRAINING_ROWS,
                actual: rows.len(),
            });
        }
        if let Some(widest) = rows.iter().map(|row| row.ngrams.min_width()).max()
            && widest > ngram_dim
        {
            return Err(LexGuardError::ShapeMismatch {
                expected: ngram_dim,
                actual: widest,
            });
        }

        let start_time = Instant::now();
        self.ngram_dim = ngram_dim;
        self.ngram_weights = vec![0.0; ngram_dim];
        self.numeric_weights = [0.0; NUMERIC_FEATURES];
        self.bias = 0.0;
        self.fit_scaling(rows);

        let scaled: Vec<[f64; NUMERIC_FEATURES]> =
            rows.iter().map(|row| self.scale(&row.numeric)).collect();
        let targets: Vec<f64> = labels.iter().map(|label| label.target()).collect();
        let n = rows.len() as f64;

        let mut training_losses: Vec<f64> = Vec::with_capacity(self.params.epochs);
        let mut converged = false;

        for epoch in 0..self.params.epochs {
            let probabilities: Vec<f64> = rows
                .par_iter()
                .zip(scaled.par_iter())
                .map(|(row, numeric)| sigmoid(self.linear(&row.ngrams, numeric)))
                .collect();

            let loss = self.loss(&probabilities, &targets);
            if let Some(&previous) = training_losses.last()
                && (previous - loss).abs() < self.params.tolerance
            {
                training_losses.push(loss);
                converged = true;
                debug!("converged after {} epochs (loss {:.6})", epoch + 1, loss);
                break;
            }
            training_losses.push(loss);

            // Gradient of the mean log-loss plus the L2 term.
            let mut ngram_gradient = vec![0.0; ngram_dim];
            let mut numeric_gradient = [0.0; NUMERIC_FEATURES];
            let mut bias_gradient = 0.0;
            for ((row, numeric), (p, y)) in rows
                .iter()
                .zip(&scaled)
                .zip(probabilities.iter().zip(&targets))
            {
                let error = p - y;
                for &(column, value) in row.ngrams.entries() {
                    ngram_gradient[column] += error * value;
                }
                for (g, x) in numeric_gradient.iter_mut().zip(numeric) {
                    *g += error * x;
                }
                bias_gradient += error;
            }

            let rate = self.params.learning_rate;
            let l2 = self.params.l2;
            for (w, g) in self.ngram_weights.iter_mut().zip(&ngram_gradient) {
                *w -= rate * (g / n + l2 * *w);
            }
            for (w, g) in self.numeric_weights.iter_mut().zip(&numeric_gradient) {
                *w -= rate * (g / n + l2 * *w);
            }
            self.bias -= rate * bias_gradient / n;
        }

        let iterations = training_losses.len();
        self.training_stats = Some(TrainingStats {
            final_training_loss: training_losses.last().copied().unwrap_or(0.0),
            training_losses,
            iterations,
            training_time_ms: start_time.elapsed().as_millis() as u64,
            converged,
        });

        Ok(())
    }

    /// Probability that `row` is a genuine word.
    pub fn predict_proba(&self, row: &FeatureRow) -> Result<f64> {
        self.check_row(row)?;
        let numeric = self.scale(&row.numeric);
        Ok(sigmoid(self.linear(&row.ngrams, &numeric)))
    }

    /// Hard label: probability >= 0.5 means [`Label::Real`].
    pub fn predict(&self, row: &FeatureRow) -> Result<Label> {
        let probability = self.predict_proba(row)?;
        Ok(if probability >= 0.5 {
            Label::Real
        } else {
            Label::Fake
        })
    }

    /// Share of `rows` whose prediction matches `labels`; 0 for no rows.
    pub fn accuracy(&self, rows: &[FeatureRow], labels: &[Label]) -> Result<f64> {
        if rows.len() != labels.len() {
            return Err(LexGuardError::other(format!(
                "{} rows but {} labels",
                rows.len(),
                labels.len()
            )));
        }
        if rows.is_empty() {
            return Ok(0.0);
        }
        let predictions = rows
            .par_iter()
            .map(|row| self.predict(row))
            .collect::<Result<Vec<_>>>()?;
        let correct = predictions
            .iter()
            .zip(labels)
            .filter(|(predicted, actual)| predicted == actual)
            .count();
        Ok(correct as f64 / rows.len() as f64)
    }

    /// Fail unless the model was fitted on exactly `ngram_width` n-gram columns.
    pub fn ensure_ngram_width(&self, ngram_width: usize) -> Result<()> {
        if ngram_width != self.ngram_dim {
            return Err(LexGuardError::ShapeMismatch {
                expected: self.input_dim(),
                actual: ngram_width + NUMERIC_FEATURES,
            });
        }
        Ok(())
    }

    pub fn is_fitted(&self) -> bool {
        self.training_stats.is_some()
    }

    pub fn ngram_dim(&self) -> usize {
        self.ngram_dim
    }

    /// Total input width: n-gram columns plus numeric features.
    pub fn input_dim(&self) -> usize {
        self.ngram_dim + NUMERIC_FEATURES
    }

    pub fn params(&self) -> &ClassifierParams {
        &self.params
    }

    pub fn training_stats(&self) -> Option<&TrainingStats> {
        self.training_stats.as_ref()
    }

    fn check_row(&self, row: &FeatureRow) -> Result<()> {
        if !self.is_fitted() {
            return Err(LexGuardError::other("classifier has not been fitted"));
        }
        let width = row.ngrams.min_width();
        if width > self.ngram_dim {
            return Err(LexGuardError::ShapeMismatch {
                expected: self.input_dim(),
                actual: width + NUMERIC_FEATURES,
            });
        }
        Ok(())
    }

    fn fit_scaling(&mut self, rows: &[FeatureRow]) {
        let n = rows.len() as f64;
        let mut mean = [0.0; NUMERIC_FEATURES];
        for row in rows {
            for (m, x) in mean.iter_mut().zip(&row.numeric) {
                *m += x / n;
            }
        }
        let mut std = [0.0; NUMERIC_FEATURES];
        for row in rows {
            for ((s, x), m) in std.iter_mut().zip(&row.numeric).zip(&mean) {
                *s += (x - m).powi(2) / n;
            }
        }
        for s in std.iter_mut() {
            *s = s.sqrt();
            // constant column
            if *s < 1e-12 {
                *s = 1.0;
            }
        }
        self.numeric_mean = mean;
        self.numeric_std = std;
    }

    fn scale(&self, numeric: &[f64; NUMERIC_FEATURES]) -> [f64; NUMERIC_FEATURES] {
        let mut scaled = [0.0; NUMERIC_FEATURES];
        for i in 0..NUMERIC_FEATURES {
            scaled[i] = (numeric[i] - self.numeric_mean[i]) / self.numeric_std[i];
        }
        scaled
    }

    fn linear(&self, ngrams: &SparseVector, numeric: &[f64; NUMERIC_FEATURES]) -> f64 {
        let numeric_part: f64 = self
            .numeric_weights
            .iter()
            .zip(numeric)
            .map(|(w, x)| w * x)
            .sum();
        ngrams.dot(&self.ngram_weights) + numeric_part + self.bias
    }

    fn loss(&self, probabilities: &[f64], targets: &[f64]) -> f64 {
        let n = probabilities.len() as f64;
        let log_loss: f64 = probabilities
            .iter()
            .zip(targets)
            .map(|(p, y)| {
                let p = p.clamp(PROBABILITY_EPSILON, 1.0 - PROBABILITY_EPSILON);
                -(y * p.ln() + (1.0 - y) * (1.0 - p).ln())
            })
            .sum::<f64>()
            / n;
        let penalty: f64 = self
            .ngram_weights
            .iter()
            .chain(self.numeric_weights.iter())
            .map(|w| w * w)
            .sum::<f64>()
            * self.params.l2
            / 2.0;
        log_loss + penalty
    }
}

fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}
