//! Acceptance check for a translated candidate
//!
//! A translation is accepted when it starts in the target script and does
//! not share a long aligned run of characters with the text it came from.
//! A long shared run means the service echoed the scrambled input back
//! instead of translating it.
//!
//! # Diagonal matching
//!
//! [`longest_substring_finder`] is deliberately *not* a general longest
//! common substring search. For every start offset `i` in `a` it walks `b`
//! from its beginning and compares `a[i + j]` with `b[j]`, so it only finds
//! runs that sit at offset `i` in `a` and offset `0..` in `b` along the same
//! diagonal. A run that starts later in `b` than in `a`, e.g. `"abc"` vs
//! `"xxabc"`, is missed. Accepted answers depend on this weaker check.

use crate::answer::script::ScriptClassifier;

/// Longest run of `a[i + j] == b[j]` over all offsets `i`
///
/// Characters are compared exactly (case-sensitive). On ties the earliest
/// run found wins.
pub fn longest_substring_finder(a: &str, b: &str) -> String {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let mut best: &[char] = &[];
    for i in 0..a.len() {
        let mut run_start = 0;
        let mut run_len = 0;
        for (j, &c) in b.iter().enumerate() {
            if a.get(i + j) == Some(&c) {
                if run_len == 0 {
                    run_start = j;
                }
                run_len += 1;
            } else {
                if run_len > best.len() {
                    best = &b[run_start..run_start + run_len];
                }
                run_len = 0;
            }
        }
        // A run reaching the end of `b` still counts
        if run_len > best.len() {
            best = &b[run_start..run_start + run_len];
        }
    }
    best.iter().collect()
}

/// Why a candidate was accepted or rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationVerdict {
    Valid,
    /// The service returned nothing
    Empty,
    /// The first character is outside the target script
    WrongScript(char),
    /// The shared diagonal run is at least the threshold long
    TooSimilar { overlap: usize },
}

impl ValidationVerdict {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationVerdict::Valid)
    }
}

/// Applies the script and overlap checks to a (source, translated) pair
#[derive(Debug, Clone)]
pub struct OverlapValidator {
    script: ScriptClassifier,
    threshold: usize,
}

impl OverlapValidator {
    /// Candidates sharing a run of `threshold` or more characters are rejected
    pub fn new(script: ScriptClassifier, threshold: usize) -> Self {
        Self { script, threshold }
    }

    pub fn verdict(&self, original: &str, translated: &str) -> ValidationVerdict {
        let Some(first) = translated.chars().next() else {
            return ValidationVerdict::Empty;
        };
        if !self.script.starts_with_script(translated) {
            return ValidationVerdict::WrongScript(first);
        }

        let overlap = longest_substring_finder(original, translated).chars().count();
        if overlap >= self.threshold {
            return ValidationVerdict::TooSimilar { overlap };
        }
        ValidationVerdict::Valid
    }

    pub fn is_translation_valid(&self, original: &str, translated: &str) -> bool {
        self.verdict(original, translated).is_valid()
    }
}
