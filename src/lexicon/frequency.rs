//! Count-backed lexical resource.

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use ahash::AHashMap;

use crate::error::Result;
use crate::lexicon::known_words::KnownWords;
use crate::lexicon::resource::{LexicalResource, UNKNOWN_FREQUENCY};

const WORDS_PER_BILLION: f64 = 1_000_000_000.0;

/// Word counts converted to Zipf-scale frequencies on lookup.
#[derive(Debug, Clone, Default)]
pub struct FrequencyLexicon {
    /// Words and their occurrence counts
    counts: AHashMap<String, u64>,
    /// Sum of all counts
    total_count: u64,
    /// Size of the corpus the counts were taken from, if not the sum of counts
    corpus_size: Option<u64>,
}

impl FrequencyLexicon {
    /// Create a new empty lexicon.
    pub fn new() -> Self {
        Self::default()
    }

    /// Treat counts as drawn from a corpus of `corpus_size` words rather than their sum.
    ///
    /// Useful when the lexicon only holds a slice of a larger frequency list.
    pub fn with_corpus_size(mut self, corpus_size: u64) -> Self {
        self.corpus_size = Some(corpus_size);
        self
    }

    /// Set the count of a word, replacing any previous count.
    ///
    /// The running total saturates at `u64::MAX`.
    pub fn add_word(&mut self, word: &str, count: u64) {
        let normalized = word.to_lowercase();
        let old = self.counts.insert(normalized, count).unwrap_or(0);
        self.total_count = self.total_count.saturating_sub(old).saturating_add(count);
    }

    /// Increment the count of a word by 1.
    pub fn increment_word(&mut self, word: &str) {
        let current = self.count(word);
        self.add_word(word, current.saturating_add(1));
    }

    /// Raw occurrence count of a word.
    pub fn count(&self, word: &str) -> u64 {
        self.counts.get(&word.to_lowercase()).copied().unwrap_or(0)
    }

    /// Number of distinct words.
    pub fn word_count(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total number of occurrences the Zipf scores are relative to.
    pub fn corpus_size(&self) -> u64 {
        self.corpus_size.unwrap_or(self.total_count)
    }

    /// Build the known-word set from every dictionary-worthy word in the lexicon.
    pub fn known_words(&self) -> KnownWords {
        KnownWords::from_words(self.counts.keys())
    }

    /// Load a word list with one word per line; repeated lines add up.
    pub fn load_word_list<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut lexicon = FrequencyLexicon::new();
        let reader = BufReader::new(File::open(path)?);

        for line in reader.lines() {
            let line = line?;
            let word = line.trim();
            if !word.is_empty() && word.chars().all(|c| c.is_alphabetic()) {
                lexicon.increment_word(word);
            }
        }

        Ok(lexicon)
    }

    /// Load a frequency file with `word count` per line.
    ///
    /// Lines that do not parse are skipped.
    pub fn load_frequency_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut lexicon = FrequencyLexicon::new();
        let reader = BufReader::new(File::open(path)?);

        for line in reader.lines() {
            let line = line?;
            let mut parts = line.split_whitespace();
            let (Some(word), Some(count)) = (parts.next(), parts.next()) else {
                continue;
            };
            if let Ok(count) = count.parse::<u64>()
                && word.chars().all(|c| c.is_alphabetic())
            {
                lexicon.add_word(word, count);
            }
        }

        Ok(lexicon)
    }

    /// Count every alphabetic word in a body of text.
    pub fn from_corpus(text: &str) -> Self {
        let mut lexicon = FrequencyLexicon::new();
        text.split(|c: char| !c.is_alphabetic())
            .filter(|word| !word.is_empty())
            .for_each(|word| lexicon.increment_word(word));
        lexicon
    }

    /// Save as a frequency file, most frequent first.
    pub fn save_frequency_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut file = File::create(path)?;
        let mut entries: Vec<(&String, &u64)> = self.counts.iter().collect();
        entries.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

        for (word, count) in entries {
            writeln!(file, "{word} {count}")?;
        }

        Ok(())
    }
}

impl LexicalResource for FrequencyLexicon {
    fn contains(&self, word: &str) -> bool {
        self.counts.contains_key(&word.to_lowercase())
    }

    fn frequency(&self, word: &str) -> f64 {
        let count = self.count(word);
        let corpus_size = self.corpus_size();
        if count == 0 || corpus_size == 0 {
            return UNKNOWN_FREQUENCY;
        }
        (count as f64 * WORDS_PER_BILLION / corpus_size as f64).log10()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_lexicon_basic_operations() {
        let mut lexicon = FrequencyLexicon::new();
        assert!(lexicon.is_empty());
        assert!(!lexicon.contains("hello"));

        lexicon.add_word("Hello", 5);
        assert!(lexicon.contains("hello"));
        assert!(lexicon.contains("HELLO"));
        assert_eq!(lexicon.count("hello"), 5);

        lexicon.increment_word("hello");
        assert_eq!(lexicon.count("hello"), 6);
        assert_eq!(lexicon.corpus_size(), 6);

        lexicon.add_word("hello", 2);
        assert_eq!(lexicon.corpus_size(), 2);
    }

    #[test]
    fn test_zipf_frequency() {
        let mut lexicon = FrequencyLexicon::new().with_corpus_size(1_000_000_000);
        lexicon.add_word("common", 100_000);
        lexicon.add_word("rare", 10);

        assert!((lexicon.frequency("common") - 5.0).abs() < 1e-9);
        assert!((lexicon.frequency("rare") - 1.0).abs() < 1e-9);
        assert_eq!(lexicon.frequency("absent"), UNKNOWN_FREQUENCY);
    }

    #[test]
    fn test_huge_counts_saturate() {
        let mut lexicon = FrequencyLexicon::new();
        lexicon.add_word("huge", u64::MAX);
        lexicon.add_word("small", 10);
        lexicon.increment_word("huge");

        assert_eq!(lexicon.count("huge"), u64::MAX);
        assert_eq!(lexicon.corpus_size(), u64::MAX);
        assert!(lexicon.frequency("small").is_finite());
        assert!(lexicon.frequency("huge") > lexicon.frequency("small"));
    }

    #[test]
    fn test_frequency_is_monotonic_in_count() {
        let mut lexicon = FrequencyLexicon::new();
        lexicon.add_word("often", 50);
        lexicon.add_word("sometimes", 5);
        lexicon.add_word("once", 1);

        assert!(lexicon.frequency("often") > lexicon.frequency("sometimes"));
        assert!(lexicon.frequency("sometimes") > lexicon.frequency("once"));
    }

    #[test]
    fn test_from_corpus_and_known_words() {
        let lexicon = FrequencyLexicon::from_corpus("The quick brown fox. The ox ran!");
        assert_eq!(lexicon.count("the"), 2);
        assert_eq!(lexicon.count("ox"), 1);

        let known = lexicon.known_words();
        assert!(known.contains("fox"));
        assert!(!known.contains("ox"));
    }

    #[test]
    fn test_frequency_file_round_trip() {
        let mut lexicon = FrequencyLexicon::new();
        lexicon.add_word("hello", 5);
        lexicon.add_word("world", 3);

        let temp_file = NamedTempFile::new().unwrap();
        lexicon.save_frequency_file(temp_file.path()).unwrap();

        let loaded = FrequencyLexicon::load_frequency_file(temp_file.path()).unwrap();
        assert_eq!(loaded.count("hello"), 5);
        assert_eq!(loaded.count("world"), 3);
        assert_eq!(loaded.word_count(), 2);
    }

    #[test]
    fn test_load_word_list() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "hello").unwrap();
        writeln!(temp_file, "world").unwrap();
        writeln!(temp_file, "hello").unwrap();
        writeln!(temp_file, "r2d2").unwrap();
        temp_file.flush().unwrap();

        let lexicon = FrequencyLexicon::load_word_list(temp_file.path()).unwrap();
        assert_eq!(lexicon.count("hello"), 2);
        assert_eq!(lexicon.count("world"), 1);
        assert_eq!(lexicon.word_count(), 2);
    }
}
