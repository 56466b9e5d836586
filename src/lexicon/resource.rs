//! Lexical resource trait definition.

use std::sync::Arc;

/// Frequency returned for words the resource has never seen.
pub const UNKNOWN_FREQUENCY: f64 = 0.0;

/// Query contract for a dictionary/frequency service.
///
/// Frequencies are on the Zipf scale: `log10` of occurrences per billion
/// words, so a score of 4 means roughly ten occurrences per million words.
/// Implementations must be safe to share across threads; the detector only
/// ever reads from them.
pub trait LexicalResource: Send + Sync {
    /// Whether `word` is a known word of the language.
    fn contains(&self, word: &str) -> bool;

    /// Commonness score of `word`; [`UNKNOWN_FREQUENCY`] when absent.
    fn frequency(&self, word: &str) -> f64;
}

impl<T: LexicalResource + ?Sized> LexicalResource for Arc<T> {
    fn contains(&self, word: &str) -> bool {
        (**self).contains(word)
    }

    fn frequency(&self, word: &str) -> f64 {
        (**self).frequency(word)
    }
}

impl<T: LexicalResource + ?Sized> LexicalResource for &T {
    fn contains(&self, word: &str) -> bool {
        (**self).contains(word)
    }

    fn frequency(&self, word: &str) -> f64 {
        (**self).frequency(word)
    }
}
