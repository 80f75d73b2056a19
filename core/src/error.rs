use thiserror::Error;

use crate::DocId;

/// Errors returned by the search server and its helpers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("document {0} already exists")]
    DuplicateDocument(DocId),

    #[error("document {0} not found")]
    DocumentNotFound(DocId),

    #[error("empty query word")]
    EmptyQueryWord,

    #[error("malformed minus word: {0:?}")]
    MalformedMinusWord(String),

    #[error("invalid word: {0:?}")]
    InvalidWord(String),

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

pub type Result<T> = std::result::Result<T, SearchError>;

impl SearchError {
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        SearchError::InvalidArgument(msg.into())
    }

    pub fn invalid_configuration<S: Into<String>>(msg: S) -> Self {
        SearchError::InvalidConfiguration(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_context() {
        assert_eq!(SearchError::DuplicateDocument(3).to_string(), "document 3 already exists");
        assert_eq!(SearchError::DocumentNotFound(7).to_string(), "document 7 not found");
        assert_eq!(
            SearchError::MalformedMinusWord("-cat".into()).to_string(),
            "malformed minus word: \"-cat\""
        );
        assert_eq!(
            SearchError::invalid_argument("negative document id -1").to_string(),
            "invalid argument: negative document id -1"
        );
    }
}
