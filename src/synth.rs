//! Synthesis of fabricated words used as negative training examples.
//!
//! Two kinds of fakes are produced:
//!
//! - random strings, which rarely resemble any real word (easy fakes)
//! - typo-like words, made by swapping two adjacent letters of a real word
//!   (hard fakes, one edit away from something genuine)

use rand::Rng;
use rand::seq::index;

use crate::lexicon::KnownWords;
use crate::types::TrainingExample;

const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz";

/// How many examples of each kind a training corpus holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CorpusPlan {
    /// Genuine words sampled from the known-word set.
    pub real_samples: usize,
    /// Uniformly random strings.
    pub random_fakes: usize,
    /// Adjacent-swap typos of sampled genuine words.
    pub typo_fakes: usize,
}

impl CorpusPlan {
    /// Shrink the plan to what `available` known words can supply.
    pub fn clamped(self, available: usize) -> Self {
        let real_samples = self.real_samples.min(available);
        Self {
            real_samples,
            random_fakes: self.random_fakes,
            typo_fakes: self.typo_fakes.min(real_samples),
        }
    }

    pub fn total(&self) -> usize {
        self.real_samples + self.random_fakes + self.typo_fakes
    }
}

/// Generator of fake words. Holds no state besides its length bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Synthesizer {
    min_length: usize,
    max_length: usize,
}

impl Default for Synthesizer {
    fn default() -> Self {
        Self {
            min_length: 3,
            max_length: 10,
        }
    }
}

impl Synthesizer {
    /// Synthesizer producing random strings with lengths in `[min_length, max_length]`.
    ///
    /// Bounds are normalized so that `1 <= min_length <= max_length`.
    pub fn new(min_length: usize, max_length: usize) -> Self {
        let min_length = min_length.max(1);
        Self {
            min_length,
            max_length: max_length.max(min_length),
        }
    }

    /// A string of uniformly random lowercase letters with uniformly random length.
    pub fn random_string<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        let length = rng.random_range(self.min_length..=self.max_length);
        (0..length)
            .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
            .collect()
    }

    /// `word` with two adjacent characters swapped at a random position.
    ///
    /// Words shorter than three characters are returned unchanged.
    pub fn typo_like<R: Rng + ?Sized>(&self, word: &str, rng: &mut R) -> String {
        let mut chars: Vec<char> = word.chars().collect();
        if chars.len() < 3 {
            return word.to_string();
        }
        let i = rng.random_range(0..chars.len() - 1);
        chars.swap(i, i + 1);
        chars.into_iter().collect()
    }

    /// Labelled corpus: sampled real words, then random fakes, then typos.
    ///
    /// Typos are made from words of the real sample, so every hard fake sits
    /// next to a genuine word the model also sees. The plan is clamped to the
    /// size of `known`.
    pub fn corpus<R: Rng + ?Sized>(
        &self,
        known: &KnownWords,
        plan: CorpusPlan,
        rng: &mut R,
    ) -> Vec<TrainingExample> {
        let plan = plan.clamped(known.len());
        let all = known.as_slice();

        let real_sample: Vec<&str> = index::sample(rng, all.len(), plan.real_samples)
            .iter()
            .map(|i| all[i].as_str())
            .collect();

        let mut examples = Vec::with_capacity(plan.total());
        examples.extend(real_sample.iter().map(|&word| TrainingExample::real(word)));
        examples.extend((0..plan.random_fakes).map(|_| TrainingExample::fake(self.random_string(rng))));

        let typo_sources = index::sample(rng, real_sample.len(), plan.typo_fakes);
        for i in typo_sources.iter() {
            let typo = self.typo_like(real_sample[i], rng);
            examples.push(TrainingExample::fake(typo));
        }

        examples
    }
}
