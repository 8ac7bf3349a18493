//! Membership test for a fixed alphabet

/// Decides whether characters belong to the target script
///
/// The alphabet is stored lowercase; lookups lowercase the probe first, so
/// `'Ж'` and `'ж'` classify the same way. Only the first character of a
/// string is ever inspected: this is a cheap necessary condition, not a
/// full script validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptClassifier {
    symbols: Vec<char>,
}

impl ScriptClassifier {
    pub fn new(symbols: &str) -> Self {
        let mut symbols: Vec<char> = symbols.chars().flat_map(char::to_lowercase).collect();
        symbols.sort_unstable();
        symbols.dedup();
        Self { symbols }
    }

    pub fn contains(&self, c: char) -> bool {
        // Some uppercase letters lowercase to several chars; all of them must match
        c.to_lowercase()
            .all(|lower| self.symbols.binary_search(&lower).is_ok())
    }

    /// Whether `text` is non-empty and its first character is in the script
    pub fn starts_with_script(&self, text: &str) -> bool {
        text.chars().next().is_some_and(|c| self.contains(c))
    }

    /// The distinct symbols of the script, sorted
    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CYRILLIC_SYMBOLS;

    fn cyrillic() -> ScriptClassifier {
        ScriptClassifier::new(CYRILLIC_SYMBOLS)
    }

    #[test]
    fn test_lowercase_cyrillic_is_in_script() {
        let script = cyrillic();
        for c in CYRILLIC_SYMBOLS.chars() {
            assert!(script.contains(c), "{} should be Cyrillic", c);
        }
    }

    #[test]
    fn test_uppercase_is_case_insensitive() {
        let script = cyrillic();
        assert!(script.contains('Ж'));
        assert!(script.contains('Ё'));
        assert!(script.contains('Я'));
    }

    #[test]
    fn test_latin_digits_and_punctuation_rejected() {
        let script = cyrillic();
        for c in ['a', 'Z', '0', ' ', '.', '-', 'é'] {
            assert!(!script.contains(c), "{:?} should not be Cyrillic", c);
        }
    }

    #[test]
    fn test_starts_with_script() {
        let script = cyrillic();
        assert!(script.starts_with_script("Истину знает только Бог."));
        assert!(!script.starts_with_script("Only God knows"));
        assert!(!script.starts_with_script(" истина"));
        assert!(!script.starts_with_script(""));
    }

    #[test]
    fn test_classification_is_repeatable() {
        let script = cyrillic();
        for c in ['ю', 'q', 'Ъ'] {
            assert_eq!(script.contains(c), script.contains(c));
        }
    }

    #[test]
    fn test_symbols_deduplicated() {
        let script = ScriptClassifier::new("абАБв");
        assert_eq!(script.symbols(), &['а', 'б', 'в']);
    }
}
