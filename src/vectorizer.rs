//! Character n-gram count vectorizer.
//!
//! The vocabulary is learned once from the training words and then frozen.
//! Columns follow the lexicographic order of the n-grams, so fitting the same
//! words always produces the same feature space.
//!
//! # Examples
//!
//! ```
//! use lexguard::vectorizer::CharNgramVectorizer;
//!
//! let mut vectorizer = CharNgramVectorizer::new(2, 3).unwrap();
//! vectorizer.fit(&["abc"]);
//! assert_eq!(vectorizer.vocabulary(), &["ab", "abc", "bc"]);
//!
//! let counts = vectorizer.transform("abcz");
//! assert_eq!(counts.nnz(), 3);
//! ```

use std::collections::BTreeMap;

use ahash::AHashMap;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{LexGuardError, Result};

/// Sparse vector of `(column, value)` pairs sorted by column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    /// Build from pairs; duplicate columns are summed.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (usize, f64)>) -> Self {
        let mut merged: BTreeMap<usize, f64> = BTreeMap::new();
        for (column, value) in pairs {
            *merged.entry(column).or_insert(0.0) += value;
        }
        Self {
            entries: merged.into_iter().collect(),
        }
    }

    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    /// Number of stored (non-zero) entries.
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    /// Largest column index plus one, or 0 when empty.
    pub fn min_width(&self) -> usize {
        self.entries.last().map_or(0, |(column, _)| column + 1)
    }

    /// Value at `column`, zero when absent.
    pub fn get(&self, column: usize) -> f64 {
        self.entries
            .binary_search_by_key(&column, |(c, _)| *c)
            .map_or(0.0, |i| self.entries[i].1)
    }

    /// Dot product with a dense weight slice.
    pub fn dot(&self, dense: &[f64]) -> f64 {
        self.entries
            .iter()
            .map(|&(column, value)| dense.get(column).copied().unwrap_or(0.0) * value)
            .sum()
    }
}

/// Learns a vocabulary of character n-grams and maps words to n-gram counts.
#[derive(Debug, Clone, PartialEq)]
pub struct CharNgramVectorizer {
    /// Minimum n-gram size
    min_n: usize,
    /// Maximum n-gram size
    max_n: usize,
    /// Vocabulary in column order
    vocabulary: Vec<String>,
    /// N-gram to column lookup
    index: AHashMap<String, usize>,
}

impl Default for CharNgramVectorizer {
    fn default() -> Self {
        Self {
            min_n: 2,
            max_n: 4,
            vocabulary: Vec::new(),
            index: AHashMap::new(),
        }
    }
}

impl CharNgramVectorizer {
    /// Create an unfitted vectorizer for n-grams of size `min_n..=max_n`.
    pub fn new(min_n: usize, max_n: usize) -> Result<Self> {
        if min_n == 0 {
            return Err(LexGuardError::invalid_config("min_n must be at least 1"));
        }
        if max_n < min_n {
            return Err(LexGuardError::invalid_config(format!(
                "max_n ({max_n}) must be >= min_n ({min_n})"
            )));
        }
        Ok(Self {
            min_n,
            max_n,
            ..Default::default()
        })
    }

    pub fn ngram_range(&self) -> (usize, usize) {
        (self.min_n, self.max_n)
    }

    /// Learn the vocabulary from `words`, replacing any previous one.
    pub fn fit<S: AsRef<str>>(&mut self, words: &[S]) {
        let mut vocabulary: Vec<String> = words
            .iter()
            .flat_map(|word| self.ngrams(word.as_ref()))
            .collect();
        vocabulary.sort_unstable();
        vocabulary.dedup();

        self.index = Self::build_index(&vocabulary);
        self.vocabulary = vocabulary;
    }

    /// Count the known n-grams of `word`; unseen n-grams are ignored.
    pub fn transform(&self, word: &str) -> SparseVector {
        SparseVector::from_pairs(
            self.ngrams(word)
                .into_iter()
                .filter_map(|gram| self.index.get(&gram).map(|&column| (column, 1.0))),
        )
    }

    /// Transform many words in parallel, preserving order.
    pub fn transform_batch<S: AsRef<str> + Sync>(&self, words: &[S]) -> Vec<SparseVector> {
        words
            .par_iter()
            .map(|word| self.transform(word.as_ref()))
            .collect()
    }

    /// Fit on `words` and return their vectors.
    pub fn fit_transform<S: AsRef<str> + Sync>(&mut self, words: &[S]) -> Vec<SparseVector> {
        self.fit(words);
        self.transform_batch(words)
    }

    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    /// Number of n-gram columns.
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn is_fitted(&self) -> bool {
        !self.vocabulary.is_empty()
    }

    /// Contiguous character n-grams of `word`; no padding at the edges.
    fn ngrams(&self, word: &str) -> Vec<String> {
        let chars: Vec<char> = word.chars().collect();
        let mut grams = Vec::new();
        for size in self.min_n..=self.max_n {
            if size > chars.len() {
                break;
            }
            grams.extend(chars.windows(size).map(|window| window.iter().collect::<String>()));
        }
        grams
    }

    fn build_index(vocabulary: &[String]) -> AHashMap<String, usize> {
        vocabulary
            .iter()
            .enumerate()
            .map(|(column, gram)| (gram.clone(), column))
            .collect()
    }
}

/// Serializable form of the vectorizer; the lookup index is rebuilt on load.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SerializableVectorizer {
    min_n: usize,
    max_n: usize,
    vocabulary: Vec<String>,
}

impl Serialize for CharNgramVectorizer {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        SerializableVectorizer {
            min_n: self.min_n,
            max_n: self.max_n,
            vocabulary: self.vocabulary.clone(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for CharNgramVectorizer {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let data = SerializableVectorizer::deserialize(deserializer)?;
        if data.min_n == 0 || data.max_n < data.min_n {
            return Err(serde::de::Error::custom(format!(
                "invalid n-gram range {}..={}",
                data.min_n, data.max_n
            )));
        }
        let index = Self::build_index(&data.vocabulary);
        Ok(Self {
            min_n: data.min_n,
            max_n: data.max_n,
            vocabulary: data.vocabulary,
            index,
        })
    }
}
