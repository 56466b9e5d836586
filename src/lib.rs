//! # lexguard
//!
//! Detects fabricated or garbled words in free text.
//!
//! ## How it works
//!
//! - Tokens found in the known-word set are genuine
//! - Very common words are genuine and very rare ones fabricated
//! - Tokens in the ambiguous frequency band go to a logistic regression over
//!   character n-grams and a few numeric features
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use lexguard::detector::{CascadeConfig, DetectionContext, FakeWordDetector};
//! use lexguard::lexicon::BuiltinLexicon;
//! use lexguard::training::{Trainer, TrainingConfig};
//!
//! let lexicon = BuiltinLexicon::english();
//! let config = TrainingConfig {
//!     real_samples: 100,
//!     random_fakes: 50,
//!     typo_fakes: 50,
//!     ..Default::default()
//! };
//! let outcome = Trainer::new(config).train(&lexicon.known_words(), &lexicon)?;
//!
//! let context = DetectionContext::new(outcome.artifacts, Arc::new(lexicon), CascadeConfig::default());
//! let detector = FakeWordDetector::new(context)?;
//! let words: Vec<String> = detector
//!     .classify("The quick brown fox")?
//!     .into_iter()
//!     .map(|verdict| verdict.word)
//!     .collect();
//! assert_eq!(words, vec!["the", "quick", "brown", "fox"]);
//! # Ok::<(), lexguard::error::LexGuardError>(())
//! ```

pub mod artifacts;
pub mod classifier;
pub mod cli;
pub mod config;
pub mod detector;
pub mod distance;
pub mod error;
pub mod features;
pub mod lexicon;
pub mod synth;
pub mod text;
pub mod training;
pub mod types;
pub mod vectorizer;

pub mod prelude {
    pub use crate::artifacts::{ArtifactStore, ModelArtifacts};
    pub use crate::detector::{CascadeConfig, DetectionContext, EditDistancePolicy, FakeWordDetector};
    pub use crate::error::{LexGuardError, Result};
    pub use crate::lexicon::{BuiltinLexicon, FrequencyLexicon, KnownWords, LexicalResource};
    pub use crate::training::{Trainer, TrainingConfig};
    pub use crate::types::{Label, Verdict};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
