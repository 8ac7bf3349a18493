//! Picks the longest words of a message

use rand::Rng;
use regex::Regex;
use std::cmp::Reverse;
use std::ops::RangeInclusive;
use std::sync::LazyLock;

/// Unicode-aware word run: letters, digits, marks and connector punctuation
static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+").expect("valid regex"));

/// Split `text` into word tokens, in order of appearance
pub fn tokenize(text: &str) -> Vec<&str> {
    WORD.find_iter(text).map(|m| m.as_str()).collect()
}

/// Return up to `k` of the longest words in `text`
///
/// `k` is drawn uniformly from `k_range` and capped at the number of words.
/// Words are ordered by non-increasing length (in characters); words of
/// equal length keep their order of appearance.
pub fn choose_words<'a, R: Rng + ?Sized>(
    text: &'a str,
    k_range: RangeInclusive<usize>,
    rng: &mut R,
) -> Vec<&'a str> {
    let mut words = tokenize(text);
    if words.is_empty() {
        return words;
    }

    let k = rng.gen_range(k_range).min(words.len());
    words.sort_by_key(|word| Reverse(word.chars().count()));
    words.truncate(k);
    words
}
