//! Lexical resources: the known-word set and word frequency lookups.
//!
//! The detector only needs two queries from a lexical resource, captured by
//! the [`LexicalResource`] trait. [`FrequencyLexicon`] is the bundled
//! implementation backed by word counts; [`KnownWords`] is the persisted
//! set of genuine words used for exact-match checks and training samples.

pub mod builtin;
pub mod frequency;
pub mod known_words;
pub mod resource;

// Re-export commonly used types
pub use builtin::BuiltinLexicon;
pub use frequency::FrequencyLexicon;
pub use known_words::KnownWords;
pub use resource::{LexicalResource, UNKNOWN_FREQUENCY};
