use crate::error::{Result, SearchError};
use crate::stop_words::StopWords;
use crate::tokenizer::{is_valid_word, split_into_words};

/// Parsed query. Words borrow from the raw query text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query<'a> {
    pub plus_words: Vec<&'a str>,
    pub minus_words: Vec<&'a str>,
}

struct QueryWord<'a> {
    data: &'a str,
    is_minus: bool,
    is_stop: bool,
}

fn parse_query_word<'a>(token: &'a str, stop_words: &StopWords) -> Result<QueryWord<'a>> {
    let (data, is_minus) = match token.strip_prefix('-') {
        Some(rest) => (rest, true),
        None => (token, false),
    };
    if data.is_empty() {
        return Err(SearchError::EmptyQueryWord);
    }
    if data.starts_with('-') {
        return Err(SearchError::MalformedMinusWord(token.to_string()));
    }
    if !is_valid_word(data) {
        return Err(SearchError::InvalidWord(token.to_string()));
    }
    Ok(QueryWord { data, is_minus, is_stop: stop_words.is_stop_word(data) })
}

impl<'a> Query<'a> {
    /// Parse and deduplicate; both word lists come back sorted.
    pub fn parse(text: &'a str, stop_words: &StopWords) -> Result<Self> {
        let mut query = Self::parse_unsorted(text, stop_words)?;
        query.plus_words.sort_unstable();
        query.plus_words.dedup();
        query.minus_words.sort_unstable();
        query.minus_words.dedup();
        Ok(query)
    }

    /// Parse keeping query order and duplicates. Callers must deduplicate
    /// whatever they derive from the plus words.
    pub fn parse_unsorted(text: &'a str, stop_words: &StopWords) -> Result<Self> {
        let mut query = Query::default();
        for token in split_into_words(text) {
            let word = parse_query_word(token, stop_words)?;
            if word.is_stop { continue; }
            if word.is_minus {
                query.minus_words.push(word.data);
            } else {
                query.plus_words.push(word.data);
            }
        }
        Ok(query)
    }
}
