//! Synthetic word generation
//!
//! Produces pseudo-words in the target script. The words are plain uniform
//! draws from the alphabet: nothing makes them pronounceable, and nothing
//! keeps them unique.

use crate::config::AnswerConfig;
use rand::Rng;
use rand::seq::SliceRandom;
use std::ops::RangeInclusive;

#[derive(Debug, Clone)]
pub struct TextGenerator {
    symbols: Vec<char>,
    word_count: RangeInclusive<usize>,
    word_length: RangeInclusive<usize>,
}

impl TextGenerator {
    /// Both ranges must be non-empty; see [`AnswerConfig::validate`].
    pub fn new(
        symbols: &str,
        word_count: RangeInclusive<usize>,
        word_length: RangeInclusive<usize>,
    ) -> Self {
        Self {
            symbols: symbols.chars().collect(),
            word_count,
            word_length,
        }
    }

    pub fn from_config(config: &AnswerConfig) -> Self {
        Self::new(
            &config.symbols,
            config.generated_word_count.clone(),
            config.generated_word_length.clone(),
        )
    }

    /// `length` symbols drawn independently and uniformly
    pub fn generate_text<R: Rng + ?Sized>(&self, rng: &mut R, length: usize) -> String {
        self.draw(rng, length).into_iter().collect()
    }

    /// Longest block [`generate_words`](Self::generate_words) can consume
    pub fn block_length(&self) -> usize {
        self.word_count.end() * self.word_length.end()
    }

    /// A random number of words, each of a random length
    ///
    /// One block of [`block_length`](Self::block_length) symbols is drawn up
    /// front and cut into consecutive words, so the block never runs short.
    pub fn generate_words<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<String> {
        let count = rng.gen_range(self.word_count.clone());
        let block = self.draw(rng, self.block_length());

        let mut words = Vec::with_capacity(count);
        let mut rest = block.as_slice();
        for _ in 0..count {
            let length = rng.gen_range(self.word_length.clone());
            let (word, tail) = rest.split_at(length);
            words.push(word.iter().collect());
            rest = tail;
        }
        words
    }

    fn draw<R: Rng + ?Sized>(&self, rng: &mut R, length: usize) -> Vec<char> {
        (0..length)
            .filter_map(|_| self.symbols.choose(rng).copied())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CYRILLIC_SYMBOLS;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn generator() -> TextGenerator {
        TextGenerator::from_config(&AnswerConfig::default())
    }

    #[test]
    fn test_generate_text_length_and_alphabet() {
        let mut rng = StdRng::seed_from_u64(1);
        let text = generator().generate_text(&mut rng, 40);
        assert_eq!(text.chars().count(), 40);
        assert!(text.chars().all(|c| CYRILLIC_SYMBOLS.contains(c)));
    }

    #[test]
    fn test_generate_text_zero_length() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(generator().generate_text(&mut rng, 0), "");
    }

    #[test]
    fn test_block_length_covers_longest_output() {
        assert_eq!(generator().block_length(), 55);
    }

    #[test]
    fn test_generate_words_within_ranges() {
        let generator = generator();
        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            let words = generator.generate_words(&mut rng);
            assert!((5..=11).contains(&words.len()), "seed {}: {:?}", seed, words);
            for word in &words {
                let length = word.chars().count();
                assert!((3..=5).contains(&length), "seed {}: {:?}", seed, word);
                assert!(word.chars().all(|c| CYRILLIC_SYMBOLS.contains(c)));
            }
        }
    }

    #[test]
    fn test_generate_words_deterministic_for_seed() {
        let generator = generator();
        let mut a = StdRng::seed_from_u64(7);
        let mut b = StdRng::seed_from_u64(7);
        assert_eq!(generator.generate_words(&mut a), generator.generate_words(&mut b));
    }

    #[test]
    fn test_generate_words_fixed_shape() {
        let generator = TextGenerator::new("ab", 3..=3, 2..=2);
        let mut rng = StdRng::seed_from_u64(0);
        let words = generator.generate_words(&mut rng);
        assert_eq!(words.len(), 3);
        assert!(words.iter().all(|w| w.len() == 2));
    }
}
