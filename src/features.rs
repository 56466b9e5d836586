//! Numeric feature extraction for tokens.
//!
//! Every token is described by four numbers: its length, the share of
//! vowels, its frequency score and (at training time) twice its edit
//! distance to the nearest word of a random reference sample. The sample is
//! drawn from an explicit random source so runs can be pinned by seed.

use rand::Rng;
use rand::seq::index;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::distance::nearest_distance;
use crate::error::{LexGuardError, Result};
use crate::lexicon::{KnownWords, LexicalResource};

/// Number of numeric feature columns appended after the n-gram counts.
pub const NUMERIC_FEATURES: usize = 4;

/// Default size of the reference sample used for the edit-distance feature.
pub const DEFAULT_REFERENCE_SAMPLE_SIZE: usize = 50;

const VOWELS: [char; 5] = ['a', 'e', 'i', 'o', 'u'];

/// Numeric description of a single token.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Character count.
    pub length: usize,
    /// Vowels divided by length, 0 for an empty token.
    pub vowel_ratio: f64,
    /// Frequency score reported by the lexical resource.
    pub frequency_score: f64,
    /// Twice the distance to the nearest reference word, when measured.
    pub nearest_edit_distance: Option<f64>,
}

impl FeatureVector {
    /// The classifier's numeric columns; an unmeasured distance is zero-filled.
    pub fn to_dense(&self) -> [f64; NUMERIC_FEATURES] {
        [
            self.length as f64,
            self.vowel_ratio,
            self.frequency_score,
            self.nearest_edit_distance.unwrap_or(0.0),
        ]
    }
}

/// Share of `a e i o u` among the characters of `token`.
pub fn vowel_ratio(token: &str) -> f64 {
    let length = token.chars().count();
    if length == 0 {
        return 0.0;
    }
    let vowels = token.chars().filter(|c| VOWELS.contains(c)).count();
    vowels as f64 / length as f64
}

/// Random subset of known words that edit distances are measured against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceSample {
    words: Vec<String>,
}

impl ReferenceSample {
    /// Draw up to `size` distinct words from `known` using `rng`.
    pub fn draw<R: Rng + ?Sized>(known: &KnownWords, size: usize, rng: &mut R) -> Result<Self> {
        if known.is_empty() {
            return Err(LexGuardError::empty_reference(
                "known-word set is empty; cannot measure distance to real words",
            ));
        }
        if size == 0 {
            return Err(LexGuardError::empty_reference(
                "reference sample size must be at least 1",
            ));
        }

        let all = known.as_slice();
        let amount = size.min(all.len());
        let words = index::sample(rng, all.len(), amount)
            .iter()
            .map(|i| all[i].clone())
            .collect();

        Ok(Self { words })
    }

    /// Use a fixed list of reference words.
    pub fn from_words<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let words: Vec<String> = words.into_iter().map(Into::into).collect();
        if words.is_empty() {
            return Err(LexGuardError::empty_reference("no reference words given"));
        }
        Ok(Self { words })
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Twice the minimum Damerau-Levenshtein distance from `token` to the sample.
    pub fn nearest_edit_distance(&self, token: &str) -> f64 {
        // The constructors guarantee a non-empty sample.
        nearest_distance(token, &self.words).unwrap_or(0) as f64 * 2.0
    }
}

/// Turns tokens into [`FeatureVector`]s.
pub struct FeatureExtractor<'a> {
    resource: &'a dyn LexicalResource,
    reference: Option<&'a ReferenceSample>,
}

impl<'a> FeatureExtractor<'a> {
    /// Extractor that leaves the edit-distance feature unmeasured.
    pub fn new(resource: &'a dyn LexicalResource) -> Self {
        Self {
            resource,
            reference: None,
        }
    }

    /// Extractor that also measures distance to `reference`.
    pub fn with_reference(resource: &'a dyn LexicalResource, reference: &'a ReferenceSample) -> Self {
        Self {
            resource,
            reference: Some(reference),
        }
    }

    pub fn measures_distance(&self) -> bool {
        self.reference.is_some()
    }

    /// Extract the features of a single cleaned token.
    pub fn extract(&self, token: &str) -> FeatureVector {
        FeatureVector {
            length: token.chars().count(),
            vowel_ratio: vowel_ratio(token),
            frequency_score: self.resource.frequency(token),
            nearest_edit_distance: self
                .reference
                .map(|reference| reference.nearest_edit_distance(token)),
        }
    }

    /// Extract features for many tokens in parallel, preserving order.
    pub fn extract_batch<S: AsRef<str> + Sync>(&self, tokens: &[S]) -> Vec<FeatureVector> {
        tokens
            .par_iter()
            .map(|token| self.extract(token.as_ref()))
            .collect()
    }
}
