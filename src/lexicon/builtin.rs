//! A small bundled English lexicon.
//!
//! Good enough for demos and tests. Production use should load a full word
//! list and frequency file through [`FrequencyLexicon`].

use crate::lexicon::frequency::FrequencyLexicon;

/// Corpus size the bundled Zipf values are expressed against.
const CORPUS_SIZE: u64 = 1_000_000_000;

/// Common English words with approximate Zipf frequencies.
const ENGLISH_ZIPF: &[(&str, f64)] = &[
    ("the", 7.73),
    ("and", 7.41),
    ("that", 7.06),
    ("for", 6.95),
    ("you", 6.91),
    ("with", 6.76),
    ("this", 6.72),
    ("was", 6.71),
    ("are", 6.63),
    ("have", 6.61),
    ("not", 6.61),
    ("but", 6.58),
    ("they", 6.42),
    ("his", 6.40),
    ("from", 6.39),
    ("she", 6.17),
    ("will", 6.27),
    ("can", 6.27),
    ("all", 6.39),
    ("one", 6.35),
    ("what", 6.34),
    ("there", 6.27),
    ("would", 6.14),
    ("their", 6.15),
    ("about", 6.16),
    ("out", 6.21),
    ("which", 5.96),
    ("when", 6.12),
    ("make", 5.76),
    ("like", 6.18),
    ("time", 6.02),
    ("just", 6.19),
    ("him", 5.96),
    ("know", 6.05),
    ("take", 5.69),
    ("people", 5.82),
    ("into", 5.83),
    ("year", 5.59),
    ("your", 6.14),
    ("good", 5.88),
    ("some", 5.91),
    ("could", 5.79),
    ("them", 5.94),
    ("see", 5.83),
    ("other", 5.70),
    ("than", 5.78),
    ("then", 5.77),
    ("now", 6.03),
    ("look", 5.56),
    ("only", 5.81),
    ("come", 5.63),
    ("over", 5.71),
    ("think", 5.80),
    ("also", 5.69),
    ("back", 5.77),
    ("after", 5.65),
    ("use", 5.46),
    ("two", 5.67),
    ("how", 6.01),
    ("our", 5.83),
    ("work", 5.65),
    ("first", 5.68),
    ("well", 5.87),
    ("way", 5.77),
    ("even", 5.60),
    ("new", 5.94),
    ("want", 5.85),
    ("because", 5.72),
    ("any", 5.62),
    ("these", 5.58),
    ("give", 5.43),
    ("day", 5.63),
    ("most", 5.42),
    ("been", 5.86),
    ("has", 5.85),
    ("had", 5.98),
    ("were", 5.95),
    ("said", 5.70),
    ("each", 5.11),
    ("where", 5.62),
    ("did", 5.86),
    ("does", 5.45),
    ("made", 5.51),
    ("find", 5.42),
    ("home", 5.52),
    ("help", 5.52),
    ("hand", 5.09),
    ("right", 5.85),
    ("world", 5.47),
    ("life", 5.58),
    ("love", 5.71),
    ("house", 5.25),
    ("water", 5.16),
    ("place", 5.25),
    ("word", 4.87),
    ("before", 5.47),
    ("through", 5.42),
    ("still", 5.55),
    ("here", 5.89),
    ("should", 5.61),
    ("never", 5.61),
    ("those", 5.38),
    ("came", 5.29),
    ("may", 5.54),
    ("part", 5.25),
    ("against", 5.03),
    ("such", 5.13),
    ("turn", 4.88),
    ("every", 5.34),
    ("point", 5.08),
    ("small", 4.99),
    ("end", 5.34),
    ("why", 5.62),
    ("hello", 4.87),
    ("quick", 4.86),
    ("brown", 4.72),
    ("fox", 4.50),
    ("jumped", 4.12),
    ("lazy", 4.25),
    ("dog", 5.04),
    ("cat", 4.80),
    ("okay", 5.23),
    ("company", 5.28),
    ("business", 5.36),
    ("software", 4.78),
    ("engineer", 4.24),
    ("engineering", 4.39),
    ("developer", 4.00),
    ("manager", 4.66),
    ("management", 4.82),
    ("project", 4.96),
    ("team", 5.29),
    ("experience", 5.06),
    ("skills", 4.63),
    ("data", 5.05),
    ("analysis", 4.67),
    ("design", 4.91),
    ("marketing", 4.47),
    ("sales", 4.61),
    ("customer", 4.45),
    ("service", 5.05),
    ("services", 4.99),
    ("support", 5.05),
    ("product", 4.74),
    ("products", 4.72),
    ("technology", 4.83),
    ("systems", 4.73),
    ("system", 5.17),
    ("network", 4.71),
    ("security", 4.91),
    ("research", 4.97),
    ("university", 4.95),
    ("college", 4.85),
    ("school", 5.33),
    ("health", 5.04),
    ("financial", 4.65),
    ("bank", 4.85),
    ("international", 4.84),
    ("global", 4.54),
    ("group", 5.14),
    ("solutions", 4.25),
    ("consulting", 3.72),
    ("limited", 4.47),
    ("corporation", 4.07),
    ("industries", 3.89),
    ("partners", 4.20),
    ("communication", 4.33),
    ("leadership", 4.24),
    ("python", 4.04),
    ("language", 4.93),
    ("search", 4.87),
    ("query", 3.66),
    ("dictionary", 3.81),
    ("computer", 4.74),
    ("program", 4.91),
    ("information", 5.11),
    ("process", 4.93),
    ("result", 4.76),
    ("value", 4.82),
    ("number", 5.13),
    ("string", 4.28),
    ("character", 4.65),
    ("meadow", 3.38),
    ("lantern", 3.28),
    ("orchard", 3.12),
    ("whisker", 2.56),
    ("quill", 2.89),
];

/// Factory for bundled lexicons.
pub struct BuiltinLexicon;

impl BuiltinLexicon {
    /// Common English words with approximate real-world frequencies.
    pub fn english() -> FrequencyLexicon {
        let mut lexicon = FrequencyLexicon::new().with_corpus_size(CORPUS_SIZE);
        for &(word, zipf) in ENGLISH_ZIPF {
            lexicon.add_word(word, 10f64.powf(zipf).round() as u64);
        }
        lexicon
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::LexicalResource;

    #[test]
    fn test_builtin_english() {
        let lexicon = BuiltinLexicon::english();
        assert!(lexicon.contains("the"));
        assert!(lexicon.contains("fox"));
        assert!(lexicon.word_count() > 150);

        assert!((lexicon.frequency("the") - 7.73).abs() < 0.01);
        assert!((lexicon.frequency("quill") - 2.89).abs() < 0.01);
        assert!(lexicon.frequency("the") > lexicon.frequency("fox"));
    }

    #[test]
    fn test_builtin_known_words_skip_short_words() {
        let known = BuiltinLexicon::english().known_words();
        assert!(known.contains("brown"));
        assert!(known.iter().all(|word| word.len() > 2));
    }
}
