//! Text tokenization.
//!
//! Tokenization is deliberately minimal: maximal runs of word characters,
//! case-folded to lowercase. No stop-word removal and no stemming, so the
//! metrics downstream describe the raw vocabulary of the corpus.

use crate::metrics::TermCounts;

/// Tokenizes text into lowercase word tokens.
///
/// A token is a maximal run of word characters (Unicode alphanumerics or
/// `_`), emitted in document order. The iterator is lazy and restartable;
/// identical text always yields the identical token sequence.
pub fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !is_word_char(c))
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
}

/// Tokenizes text and counts occurrences per distinct token.
pub fn count_tokens(text: &str) -> TermCounts {
    let mut counts = TermCounts::new();
    for token in tokenize(text) {
        *counts.entry(token).or_insert(0) += 1;
    }
    counts
}

/// A word character for tokenization purposes.
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Replaces characters that are unsafe in filenames with `_`.
///
/// Applied to source base names before they become output file stems, so a
/// document id is always usable as a filename on every platform.
pub fn sanitize_file_stem(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' => '_',
            other => other,
        })
        .collect()
}
