//! Common types shared by training and detection.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Authenticity label for a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Label {
    /// A genuine word of the language.
    Real,
    /// A fabricated or garbled string.
    Fake,
}

impl Label {
    /// Target value used by the logistic loss (Real = 1, Fake = 0).
    pub(crate) fn target(self) -> f64 {
        match self {
            Label::Real => 1.0,
            Label::Fake => 0.0,
        }
    }

    pub fn is_fake(self) -> bool {
        self == Label::Fake
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Real => write!(f, "REAL"),
            Label::Fake => write!(f, "FAKE"),
        }
    }
}

/// The cascade stage that produced a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// Exact match in the known-word set.
    KnownWord,
    /// Frequency above the real threshold.
    CommonWord,
    /// Frequency below the fake threshold.
    RareWord,
    /// Ambiguous frequency band, decided by the classifier.
    Model,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::KnownWord => write!(f, "known-word"),
            Tier::CommonWord => write!(f, "common-word"),
            Tier::RareWord => write!(f, "rare-word"),
            Tier::Model => write!(f, "model"),
        }
    }
}

/// Classification result for a single token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    /// The cleaned token.
    pub word: String,
    /// Predicted label.
    pub label: Label,
}

impl Verdict {
    pub fn new(word: impl Into<String>, label: Label) -> Self {
        Self {
            word: word.into(),
            label,
        }
    }
}

/// A verdict together with the cascade tier that decided it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailedVerdict {
    pub word: String,
    pub label: Label,
    pub tier: Tier,
}

impl From<DetailedVerdict> for Verdict {
    fn from(detailed: DetailedVerdict) -> Self {
        Verdict {
            word: detailed.word,
            label: detailed.label,
        }
    }
}

/// Labelled word used to train the classifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingExample {
    pub word: String,
    pub label: Label,
}

impl TrainingExample {
    pub fn real(word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            label: Label::Real,
        }
    }

    pub fn fake(word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            label: Label::Fake,
        }
    }
}
