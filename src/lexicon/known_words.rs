//! The persisted set of genuine words.

use serde::{Deserialize, Serialize};

use crate::text::is_dictionary_word;

/// Sorted, deduplicated set of lower-case dictionary words.
///
/// Sorted storage keeps sampling reproducible for a given seed, which a hash
/// set would not.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnownWords {
    words: Vec<String>,
}

impl KnownWords {
    /// Build the set from arbitrary words, keeping alphabetic words longer than two characters.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut words: Vec<String> = words
            .into_iter()
            .map(|word| word.as_ref().to_lowercase())
            .filter(|word| is_dictionary_word(word))
            .collect();
        words.sort_unstable();
        words.dedup();
        Self { words }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words
            .binary_search_by(|probe| probe.as_str().cmp(word))
            .is_ok()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// All words in lexicographic order.
    pub fn as_slice(&self) -> &[String] {
        &self.words
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}
