//! Training pipeline: corpus synthesis, featurization and model fitting.
//!
//! A run is fully determined by its [`TrainingConfig`] (including the seed),
//! the known-word set and the lexical resource. All randomness flows from a
//! single [`StdRng`] seeded from `TrainingConfig::seed`.

use std::time::Instant;

use log::{info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::artifacts::ModelArtifacts;
use crate::classifier::{ClassifierParams, FeatureRow, LogisticRegression, MIN_TRAINING_ROWS};
use crate::error::{LexGuardError, Result};
use crate::features::{DEFAULT_REFERENCE_SAMPLE_SIZE, FeatureExtractor, ReferenceSample};
use crate::lexicon::{KnownWords, LexicalResource};
use crate::synth::{CorpusPlan, Synthesizer};
use crate::types::Label;
use crate::vectorizer::CharNgramVectorizer;

/// Settings for a training run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Seed for every random choice of the run.
    pub seed: u64,
    /// Genuine words sampled from the known-word set.
    pub real_samples: usize,
    /// Random-string fakes.
    pub random_fakes: usize,
    /// Typo fakes derived from the sampled genuine words.
    pub typo_fakes: usize,
    /// Words in the edit-distance reference sample.
    pub reference_sample_size: usize,
    /// Share of the corpus held out for accuracy measurement.
    pub holdout_fraction: f64,
    /// Smallest character n-gram.
    pub ngram_min: usize,
    /// Largest character n-gram.
    pub ngram_max: usize,
    /// Gradient descent settings.
    pub classifier: ClassifierParams,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            real_samples: 6000,
            random_fakes: 3000,
            typo_fakes: 3000,
            reference_sample_size: DEFAULT_REFERENCE_SAMPLE_SIZE,
            holdout_fraction: 0.2,
            ngram_min: 2,
            ngram_max: 4,
            classifier: ClassifierParams::default(),
        }
    }
}

impl TrainingConfig {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..1.0).contains(&self.holdout_fraction) {
            return Err(LexGuardError::invalid_config(format!(
                "holdout_fraction must be in [0, 1), got {}",
                self.holdout_fraction
            )));
        }
        if self.reference_sample_size == 0 {
            return Err(LexGuardError::invalid_config(
                "reference_sample_size must be at least 1",
            ));
        }
        if self.real_samples == 0 {
            return Err(LexGuardError::invalid_config("real_samples must be at least 1"));
        }
        if self.random_fakes + self.typo_fakes == 0 {
            return Err(LexGuardError::invalid_config(
                "at least one kind of fake example is required",
            ));
        }
        CharNgramVectorizer::new(self.ngram_min, self.ngram_max)?;
        self.classifier.validate()
    }

    fn plan(&self) -> CorpusPlan {
        CorpusPlan {
            real_samples: self.real_samples,
            random_fakes: self.random_fakes,
            typo_fakes: self.typo_fakes,
        }
    }
}

/// Summary of a finished training run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    pub seed: u64,
    pub corpus_size: usize,
    pub real_examples: usize,
    pub fake_examples: usize,
    pub train_size: usize,
    pub holdout_size: usize,
    pub vocabulary_size: usize,
    /// Accuracy on the held-out split; `None` when nothing was held out.
    pub holdout_accuracy: Option<f64>,
    pub final_loss: f64,
    pub iterations: usize,
    pub training_time_ms: u64,
}

/// Artifacts produced by training, plus the run summary.
#[derive(Debug, Clone)]
pub struct TrainingOutcome {
    pub artifacts: ModelArtifacts,
    pub report: TrainingReport,
}

/// Runs the training pipeline.
#[derive(Debug, Clone, Default)]
pub struct Trainer {
    config: TrainingConfig,
    synthesizer: Synthesizer,
}

impl Trainer {
    pub fn new(config: TrainingConfig) -> Self {
        Self {
            config,
            synthesizer: Synthesizer::default(),
        }
    }

    /// Use a synthesizer with custom random-string lengths.
    pub fn with_synthesizer(mut self, synthesizer: Synthesizer) -> Self {
        self.synthesizer = synthesizer;
        self
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Train a model from the known-word set and the lexical resource.
    pub fn train(&self, known: &KnownWords, resource: &dyn LexicalResource) -> Result<TrainingOutcome> {
        self.config.validate()?;
        let start_time = Instant::now();
        let mut rng = StdRng::seed_from_u64(self.config.seed);

        let requested = self.config.plan();
        let plan = requested.clamped(known.len());
        if plan != requested {
            warn!(
                "known-word set has only {} words; corpus reduced to {} real, {} typo examples",
                known.len(),
                plan.real_samples,
                plan.typo_fakes
            );
        }

        let reference = ReferenceSample::draw(known, self.config.reference_sample_size, &mut rng)?;
        let mut corpus = self.synthesizer.corpus(known, plan, &mut rng);
        if corpus.len() < MIN_TRAINING_ROWS {
            return Err(LexGuardError::InsufficientData {
                min_samples: MIN_TRAINING_ROWS,
                actual: corpus.len(),
            });
        }
        corpus.shuffle(&mut rng);

        let real_examples = corpus.iter().filter(|e| e.label == Label::Real).count();
        info!(
            "Training corpus: {} examples ({} real, {} fake), reference sample of {} words",
            corpus.len(),
            real_examples,
            corpus.len() - real_examples,
            reference.len()
        );

        let words: Vec<&str> = corpus.iter().map(|e| e.word.as_str()).collect();
        let labels: Vec<Label> = corpus.iter().map(|e| e.label).collect();

        let mut vectorizer = CharNgramVectorizer::new(self.config.ngram_min, self.config.ngram_max)?;
        let ngrams = vectorizer.fit_transform(&words);
        let features = FeatureExtractor::with_reference(resource, &reference).extract_batch(&words);
        let rows: Vec<FeatureRow> = ngrams
            .into_iter()
            .zip(&features)
            .map(|(ngrams, features)| FeatureRow::new(ngrams, features.to_dense()))
            .collect();
        info!("Vocabulary: {} character n-grams", vectorizer.vocabulary_size());

        let holdout_size = ((rows.len() as f64) * self.config.holdout_fraction).ceil() as usize;
        let train_size = rows.len() - holdout_size;
        if train_size < MIN_TRAINING_ROWS {
            return Err(LexGuardError::InsufficientData {
                min_samples: MIN_TRAINING_ROWS,
                actual: train_size,
            });
        }
        let (train_rows, holdout_rows) = rows.split_at(train_size);
        let (train_labels, holdout_labels) = labels.split_at(train_size);

        let mut classifier = LogisticRegression::new(self.config.classifier.clone());
        classifier.fit(vectorizer.vocabulary_size(), train_rows, train_labels)?;

        let holdout_accuracy = if holdout_rows.is_empty() {
            None
        } else {
            Some(classifier.accuracy(holdout_rows, holdout_labels)?)
        };
        match holdout_accuracy {
            Some(accuracy) => info!(
                "Holdout accuracy: {:.4} on {} examples",
                accuracy, holdout_size
            ),
            None => info!("No holdout split; accuracy not measured"),
        }

        let (final_loss, iterations) = classifier
            .training_stats()
            .map_or((0.0, 0), |stats| (stats.final_training_loss, stats.iterations));

        let report = TrainingReport {
            seed: self.config.seed,
            corpus_size: rows.len(),
            real_examples,
            fake_examples: rows.len() - real_examples,
            train_size,
            holdout_size,
            vocabulary_size: vectorizer.vocabulary_size(),
            holdout_accuracy,
            final_loss,
            iterations,
            training_time_ms: start_time.elapsed().as_millis() as u64,
        };

        let artifacts = ModelArtifacts::new(
            vectorizer,
            classifier,
            known.clone(),
            holdout_accuracy,
            self.config.seed,
        );

        Ok(TrainingOutcome { artifacts, report })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::BuiltinLexicon;

    fn small_config() -> TrainingConfig {
        TrainingConfig {
            real_samples: 120,
            random_fakes: 60,
            typo_fakes: 60,
            reference_sample_size: 20,
            classifier: ClassifierParams {
                epochs: 150,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_default_config() {
        let config = TrainingConfig::default();
        assert_eq!(config.seed, 42);
        assert_eq!(config.real_samples, 6000);
        assert_eq!(config.random_fakes, 3000);
        assert_eq!(config.typo_fakes, 3000);
        assert_eq!(config.reference_sample_size, 50);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_config() {
        let config = TrainingConfig {
            holdout_fraction: 1.0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(LexGuardError::InvalidConfig(_))));

        let config = TrainingConfig {
            ngram_min: 3,
            ngram_max: 2,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_train_on_builtin_lexicon() {
        let lexicon = BuiltinLexicon::english();
        let known = lexicon.known_words();
        let outcome = Trainer::new(small_config()).train(&known, &lexicon).unwrap();

        let report = &outcome.report;
        assert_eq!(report.real_examples, 120.min(known.len()));
        assert_eq!(report.corpus_size, report.train_size + report.holdout_size);
        assert!(report.vocabulary_size > 0);
        assert!(report.holdout_accuracy.is_some());

        let artifacts = &outcome.artifacts;
        assert_eq!(
            artifacts.classifier.ngram_dim(),
            artifacts.vectorizer.vocabulary_size()
        );
        assert_eq!(artifacts.known_words, known);
        assert_eq!(artifacts.manifest.seed, 42);
    }

    #[test]
    fn test_training_is_reproducible() {
        let lexicon = BuiltinLexicon::english();
        let known = lexicon.known_words();
        let trainer = Trainer::new(small_config());

        let first = trainer.train(&known, &lexicon).unwrap();
        let second = trainer.train(&known, &lexicon).unwrap();
        assert_eq!(first.artifacts.vectorizer, second.artifacts.vectorizer);
        assert_eq!(
            first.artifacts.classifier.training_stats().unwrap().training_losses,
            second.artifacts.classifier.training_stats().unwrap().training_losses
        );
        assert_eq!(
            first.report.holdout_accuracy,
            second.report.holdout_accuracy
        );
    }

    #[test]
    fn test_plan_is_clamped_to_small_lexicon() {
        let lexicon = BuiltinLexicon::english();
        let known = KnownWords::from_words(["garden", "window", "market", "planet", "silver"]);
        let config = TrainingConfig {
            holdout_fraction: 0.0,
            ..small_config()
        };

        let outcome = Trainer::new(config).train(&known, &lexicon).unwrap();
        assert_eq!(outcome.report.real_examples, 5);
        assert_eq!(outcome.report.corpus_size, 5 + 60 + 5);
        assert_eq!(outcome.report.holdout_accuracy, None);
    }

    #[test]
    fn test_empty_known_words_is_an_error() {
        let lexicon = BuiltinLexicon::english();
        let result = Trainer::new(small_config()).train(&KnownWords::default(), &lexicon);
        assert!(matches!(result, Err(LexGuardError::EmptyReference(_))));
    }
}
