//! The decision cascade that labels tokens as genuine or fabricated.
//!
//! Each cleaned token runs through four tiers, stopping at the first that
//! decides:
//!
//! 1. exact match in the known-word set: [`Label::Real`]
//! 2. frequency above `real_threshold`: [`Label::Real`]
//! 3. frequency below `fake_threshold`: [`Label::Fake`]
//! 4. anything in between goes to the classifier
//!
//! Cheap lookups settle most tokens; the classifier only sees the ambiguous
//! band. The detector holds no mutable state and can be shared across
//! threads behind an `Arc`.
//!
//! # Examples
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use lexguard::detector::{CascadeConfig, FakeWordDetector};
//! use lexguard::lexicon::BuiltinLexicon;
//!
//! let resource = Arc::new(BuiltinLexicon::english());
//! let detector = FakeWordDetector::load("model", resource, CascadeConfig::default())?;
//!
//! for verdict in detector.classify("The quick brown fox")? {
//!     println!("{} => {}", verdict.word, verdict.label);
//! }
//! # Ok::<(), lexguard::error::LexGuardError>(())
//! ```

use std::path::Path;
use std::sync::Arc;

use log::debug;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::artifacts::{ArtifactStore, ModelArtifacts};
use crate::classifier::FeatureRow;
use crate::error::{LexGuardError, Result};
use crate::features::{DEFAULT_REFERENCE_SAMPLE_SIZE, FeatureExtractor, ReferenceSample};
use crate::lexicon::LexicalResource;
use crate::text::{clean_token, tokenize};
use crate::types::{DetailedVerdict, Label, Tier, Verdict};

/// How the edit-distance feature is filled in at inference time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditDistancePolicy {
    /// Always zero.
    #[default]
    ZeroFill,
    /// Measured against a reference sample drawn once, from `CascadeConfig::seed`.
    Sampled,
}

/// Thresholds and limits of the cascade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CascadeConfig {
    /// Frequencies strictly above this are genuine.
    pub real_threshold: f64,
    /// Frequencies strictly below this are fabricated.
    pub fake_threshold: f64,
    /// Longer cleaned tokens are dropped.
    pub max_token_length: usize,
    pub edit_distance_policy: EditDistancePolicy,
    /// Reference sample size for [`EditDistancePolicy::Sampled`].
    pub reference_sample_size: usize,
    /// Seed for the reference sample.
    pub seed: u64,
}

impl Default for CascadeConfig {
    fn default() -> Self {
        Self {
            real_threshold: 4.0,
            fake_threshold: 2.0,
            max_token_length: 64,
            edit_distance_policy: EditDistancePolicy::ZeroFill,
            reference_sample_size: DEFAULT_REFERENCE_SAMPLE_SIZE,
            seed: 42,
        }
    }
}

impl CascadeConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.real_threshold.is_finite() || !self.fake_threshold.is_finite() {
            return Err(LexGuardError::invalid_config("thresholds must be finite"));
        }
        if self.fake_threshold > self.real_threshold {
            return Err(LexGuardError::invalid_config(format!(
                "fake_threshold ({}) must not exceed real_threshold ({})",
                self.fake_threshold, self.real_threshold
            )));
        }
        if self.max_token_length == 0 {
            return Err(LexGuardError::invalid_config(
                "max_token_length must be at least 1",
            ));
        }
        if self.edit_distance_policy == EditDistancePolicy::Sampled
            && self.reference_sample_size == 0
        {
            return Err(LexGuardError::invalid_config(
                "reference_sample_size must be at least 1 for the sampled policy",
            ));
        }
        Ok(())
    }
}

/// Everything the detector reads: model, lexical resource and settings.
pub struct DetectionContext {
    artifacts: ModelArtifacts,
    resource: Arc<dyn LexicalResource>,
    config: CascadeConfig,
}

impl DetectionContext {
    pub fn new(
        artifacts: ModelArtifacts,
        resource: Arc<dyn LexicalResource>,
        config: CascadeConfig,
    ) -> Self {
        Self {
            artifacts,
            resource,
            config,
        }
    }

    pub fn artifacts(&self) -> &ModelArtifacts {
        &self.artifacts
    }

    pub fn config(&self) -> &CascadeConfig {
        &self.config
    }
}

/// Labels tokens using the decision cascade.
pub struct FakeWordDetector {
    context: DetectionContext,
    reference: Option<ReferenceSample>,
}

impl FakeWordDetector {
    /// Build a detector; draws the reference sample when the policy needs one.
    ///
    /// Fails with [`LexGuardError::ShapeMismatch`] when the vectorizer and
    /// classifier disagree on the number of n-gram columns.
    pub fn new(context: DetectionContext) -> Result<Self> {
        context.config.validate()?;
        let artifacts = &context.artifacts;
        artifacts
            .classifier
            .ensure_ngram_width(artifacts.vectorizer.vocabulary_size())?;

        let reference = match context.config.edit_distance_policy {
            EditDistancePolicy::ZeroFill => None,
            EditDistancePolicy::Sampled => {
                let mut rng = StdRng::seed_from_u64(context.config.seed);
                Some(ReferenceSample::draw(
                    &context.artifacts.known_words,
                    context.config.reference_sample_size,
                    &mut rng,
                )?)
            }
        };

        Ok(Self { context, reference })
    }

    /// Load artifacts from `directory` and build a detector over them.
    pub fn load<P: AsRef<Path>>(
        directory: P,
        resource: Arc<dyn LexicalResource>,
        config: CascadeConfig,
    ) -> Result<Self> {
        let artifacts = ArtifactStore::new(directory).load()?;
        Self::new(DetectionContext::new(artifacts, resource, config))
    }

    pub fn context(&self) -> &DetectionContext {
        &self.context
    }

    /// Label every surviving token of `sentence`, in input order.
    pub fn classify(&self, sentence: &str) -> Result<Vec<Verdict>> {
        Ok(self
            .classify_detailed(sentence)?
            .into_iter()
            .map(Verdict::from)
            .collect())
    }

    /// Like [`classify`](Self::classify) but also reports the deciding tier.
    pub fn classify_detailed(&self, sentence: &str) -> Result<Vec<DetailedVerdict>> {
        tokenize(sentence, self.context.config.max_token_length)
            .map(|token| self.decide(token))
            .collect()
    }

    /// Label a single raw word; `None` when it does not survive cleaning.
    pub fn classify_token(&self, raw: &str) -> Result<Option<Label>> {
        let token = clean_token(raw);
        if token.is_empty() || token.chars().count() > self.context.config.max_token_length {
            return Ok(None);
        }
        Ok(Some(self.decide(token)?.label))
    }

    /// Classify many sentences in parallel; output order matches input order.
    pub fn classify_batch<S: AsRef<str> + Sync>(&self, sentences: &[S]) -> Result<Vec<Vec<Verdict>>> {
        sentences
            .par_iter()
            .map(|sentence| self.classify(sentence.as_ref()))
            .collect()
    }

    /// The tokens of `sentence` judged fabricated.
    pub fn fake_words(&self, sentence: &str) -> Result<Vec<String>> {
        Ok(self
            .classify(sentence)?
            .into_iter()
            .filter(|verdict| verdict.label.is_fake())
            .map(|verdict| verdict.word)
            .collect())
    }

    fn decide(&self, token: String) -> Result<DetailedVerdict> {
        let config = &self.context.config;

        let (label, tier) = if self.context.artifacts.known_words.contains(&token) {
            (Label::Real, Tier::KnownWord)
        } else {
            let frequency = self.context.resource.frequency(&token);
            if frequency > config.real_threshold {
                (Label::Real, Tier::CommonWord)
            } else if frequency < config.fake_threshold {
                (Label::Fake, Tier::RareWord)
            } else {
                (self.predict(&token)?, Tier::Model)
            }
        };

        debug!("{token}: {label} ({tier})");
        Ok(DetailedVerdict {
            word: token,
            label,
            tier,
        })
    }

    fn predict(&self, token: &str) -> Result<Label> {
        let artifacts = &self.context.artifacts;
        let resource: &dyn LexicalResource = &*self.context.resource;
        let extractor = match &self.reference {
            Some(reference) => FeatureExtractor::with_reference(resource, reference),
            None => FeatureExtractor::new(resource),
        };
        let row = FeatureRow::new(
            artifacts.vectorizer.transform(token),
            extractor.extract(token).to_dense(),
        );
        artifacts.classifier.predict(&row)
    }
}
