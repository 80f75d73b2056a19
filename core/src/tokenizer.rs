/// Lazy iterator over the space-delimited words of a text.
/// Clones are independent cursors starting at the current position.
#[derive(Debug, Clone)]
pub struct Words<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Words<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let trimmed = self.rest.trim_start_matches(' ');
        if trimmed.is_empty() {
            self.rest = trimmed;
            return None;
        }
        let end = trimmed.find(' ').unwrap_or(trimmed.len());
        let (word, rest) = trimmed.split_at(end);
        self.rest = rest;
        Some(word)
    }
}

impl std::iter::FusedIterator for Words<'_> {}

/// Split text into maximal runs of non-space characters. Only the ASCII
/// space separates words; empty words are never produced.
pub fn split_into_words(text: &str) -> Words<'_> {
    Words { rest: text }
}

/// A word is valid when it holds no ASCII control characters (0x00..0x20).
pub fn is_valid_word(word: &str) -> bool {
    !word.bytes().any(|b| b < b' ')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_tokenize() {
        let t: Vec<&str> = split_into_words("  fat   cat ").collect();
        assert_eq!(t, vec!["fat", "cat"]);
    }

    #[test]
    fn tabs_are_not_separators() {
        let t: Vec<&str> = split_into_words("a\tb c").collect();
        assert_eq!(t, vec!["a\tb", "c"]);
        assert!(!is_valid_word(t[0]));
        assert!(is_valid_word("café"));
    }
}
