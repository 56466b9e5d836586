//! Token cleaning for raw input text.
//!
//! A raw word becomes a token by lower-casing it and keeping only alphabetic
//! characters. Words that are empty after cleaning, or longer than the
//! configured bound, are skipped.
//!
//! ```
//! use lexguard::text::{clean_token, tokenize};
//!
//! assert_eq!(clean_token("Brown,"), "brown");
//! assert_eq!(clean_token("42"), "");
//!
//! let tokens: Vec<String> = tokenize("The fox's 2 dogs!", 64).collect();
//! assert_eq!(tokens, vec!["the", "foxs", "dogs"]);
//! ```

/// Lower-case `raw` and strip every non-alphabetic character.
pub fn clean_token(raw: &str) -> String {
    raw.chars()
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_alphabetic())
        .collect()
}

/// Split `text` on whitespace and yield the cleaned, non-empty tokens in order.
///
/// Tokens with more than `max_len` characters are dropped.
pub fn tokenize(text: &str, max_len: usize) -> impl Iterator<Item = String> + '_ {
    text.split_whitespace()
        .map(clean_token)
        .filter(move |token| !token.is_empty() && token.chars().count() <= max_len)
}

/// Whether `word` is usable as a known word: alphabetic and longer than two characters.
pub fn is_dictionary_word(word: &str) -> bool {
    word.chars().count() > 2 && word.chars().all(|c| c.is_alphabetic())
}
