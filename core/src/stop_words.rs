use std::collections::HashSet;

use crate::error::{Result, SearchError};
use crate::tokenizer::{is_valid_word, split_into_words};

/// Immutable set of words excluded from indexing and querying.
#[derive(Debug, Clone, Default)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    /// Build from a space-separated list, e.g. `"and in on"`.
    pub fn parse(text: &str) -> Result<Self> {
        Self::from_words(split_into_words(text))
    }

    /// Build from any collection of words. Empty strings and duplicates are ignored.
    pub fn from_words<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = HashSet::new();
        for word in words {
            let word = word.as_ref();
            if word.is_empty() { continue; }
            if !is_valid_word(word) {
                return Err(SearchError::invalid_configuration(format!(
                    "stop word {word:?} contains control characters"
                )));
            }
            set.insert(word.to_string());
        }
        Ok(Self { words: set })
    }

    pub fn is_stop_word(&self, word: &str) -> bool { self.words.contains(word) }

    pub fn len(&self) -> usize { self.words.len() }

    pub fn is_empty(&self) -> bool { self.words.is_empty() }
}
