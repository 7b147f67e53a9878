//! Bag-of-tokens overlap between two free-text fields.

use std::collections::BTreeSet;

/// Tokens of length two or less (`at`, `of`, `-`) carry no signal.
const MIN_TOKEN_LEN: usize = 3;

/// Lowercase alphanumeric tokens longer than two characters.
///
/// Anything that is not alphanumeric separates tokens.
pub fn tokenize(text: &str) -> BTreeSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.chars().count() >= MIN_TOKEN_LEN)
        .map(str::to_lowercase)
        .collect()
}

/// Number of distinct tokens `a` and `b` have in common; 0 if either is empty.
pub fn shared_token_count(a: &str, b: &str) -> usize {
    if a.trim().is_empty() || b.trim().is_empty() {
        return 0;
    }
    let left = tokenize(a);
    let right = tokenize(b);
    left.intersection(&right).count()
}
