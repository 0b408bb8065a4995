// words.rs - Static Word List
// Newline-delimited candidate words for the random word command, loaded once at startup.

use std::fs;
use std::path::Path;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::ConfigError;

#[derive(Debug, Clone)]
pub struct WordList(Vec<String>);

impl WordList {
    /// One word per line; blank lines are skipped
    pub fn parse(text: &str) -> Self {
        WordList(
            text.lines()
                .map(str::trim)
                .filter(|w| !w.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let words = Self::parse(&text);
        if words.is_empty() {
            log::warn!("[WORDS] {} has no words; random word will reply empty", path.display());
        }
        println!("📚 Loaded {} words from {}", words.len(), path.display());
        Ok(words)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Uniformly random word, `None` when the list is empty
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
        self.0.choose(rng).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_parse_skips_blank_lines() {
        let words = WordList::parse("cat\n\ndog\r\nfox\n");
        assert_eq!(words.len(), 3);
    }

    #[test]
    fn test_pick_returns_listed_word() {
        let words = WordList::parse("cat\ndog\nfox");
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let word = words.pick(&mut rng).unwrap();
            assert!(["cat", "dog", "fox"].contains(&word));
        }
    }

    #[test]
    fn test_pick_from_empty_list() {
        let words = WordList::parse("\n  \n");
        assert!(words.is_empty());
        assert_eq!(words.pick(&mut rand::thread_rng()), None);
    }

    #[test]
    fn test_load_missing_file() {
        let result = WordList::load("definitely/not/here/words.txt");
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
