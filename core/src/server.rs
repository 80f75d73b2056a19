//! The search server: document lifecycle, TF-IDF ranking and matching.

use std::collections::BTreeMap;
use tracing::{debug, trace};

use crate::document::{average_rating, Document, DocumentData, DocumentIds, DocumentStatus, DocumentStore};
use crate::error::{Result, SearchError};
use crate::execution::{ExecutionPolicy, Sequential};
use crate::index::InvertedIndex;
use crate::query::Query;
use crate::stop_words::StopWords;
use crate::tokenizer::{is_valid_word, split_into_words};
use crate::DocId;

/// Maximum number of documents returned by a ranked query.
pub const MAX_RESULT_DOCUMENT_COUNT: usize = 5;
/// Relevances closer than this are ranked by rating instead.
pub const RELEVANCE_EPSILON: f64 = 1e-6;

#[derive(Debug, Default)]
pub struct SearchServer {
    stop_words: StopWords,
    index: InvertedIndex,
    documents: DocumentStore,
}

impl SearchServer {
    /// Create a server from a space-separated stop word list.
    pub fn new(stop_words: &str) -> Result<Self> {
        Ok(Self::with_stop_words(StopWords::parse(stop_words)?))
    }

    pub fn from_stop_words<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self::with_stop_words(StopWords::from_words(words)?))
    }

    pub fn with_stop_words(stop_words: StopWords) -> Self {
        Self { stop_words, ..Self::default() }
    }

    pub fn add_document(&mut self, id: DocId, text: &str, status: DocumentStatus, ratings: &[i32]) -> Result<()> {
        if id < 0 {
            return Err(SearchError::invalid_argument(format!("negative document id {id}")));
        }
        if self.documents.contains(id) {
            return Err(SearchError::DuplicateDocument(id));
        }
        let words = self.split_into_words_no_stop(text)?;
        let rating = average_rating(ratings);

        self.index.insert(id, &words);
        self.documents.insert(id, text, status, rating);
        debug!(id, words = words.len(), rating, ?status, "document added");
        Ok(())
    }

    fn split_into_words_no_stop<'t>(&self, text: &'t str) -> Result<Vec<&'t str>> {
        let mut words = Vec::new();
        for word in split_into_words(text) {
            if !is_valid_word(word) {
                return Err(SearchError::invalid_argument(format!("word {word:?} contains control characters")));
            }
            if !self.stop_words.is_stop_word(word) {
                words.push(word);
            }
        }
        Ok(words)
    }

    pub fn remove_document(&mut self, id: DocId) {
        self.remove_document_with(Sequential, id)
    }

    /// Remove a document, updating the postings of its words through `policy`.
    /// Absent ids are ignored.
    pub fn remove_document_with<E: ExecutionPolicy>(&mut self, policy: E, id: DocId) {
        if self.documents.remove(id).is_none() {
            return;
        }
        self.index.remove(policy, id);
        debug!(id, "document removed");
    }

    /// Top documents with status [`DocumentStatus::Actual`].
    pub fn find_top_documents(&self, raw_query: &str) -> Result<Vec<Document>> {
        self.find_top_documents_by_status(raw_query, DocumentStatus::Actual)
    }

    pub fn find_top_documents_by_status(&self, raw_query: &str, status: DocumentStatus) -> Result<Vec<Document>> {
        self.find_top_documents_by(raw_query, move |_, document_status, _| document_status == status)
    }

    pub fn find_top_documents_by<P>(&self, raw_query: &str, predicate: P) -> Result<Vec<Document>>
    where
        P: Fn(DocId, DocumentStatus, i32) -> bool + Sync,
    {
        self.find_top_documents_with(Sequential, raw_query, predicate)
    }

    /// Rank documents accepted by `predicate(id, status, rating)` against the
    /// query and return at most [`MAX_RESULT_DOCUMENT_COUNT`] of them, best first.
    pub fn find_top_documents_with<E, P>(&self, policy: E, raw_query: &str, predicate: P) -> Result<Vec<Document>>
    where
        E: ExecutionPolicy,
        P: Fn(DocId, DocumentStatus, i32) -> bool + Sync,
    {
        let query = Query::parse(raw_query, &self.stop_words)?;
        let mut matched = self.find_all_documents(policy, &query, &predicate);
        sort_by_relevance(policy, &mut matched);
        matched.truncate(MAX_RESULT_DOCUMENT_COUNT);
        trace!(query = raw_query, hits = matched.len(), "ranked query");
        Ok(matched)
    }

    fn find_all_documents<E, P>(&self, policy: E, query: &Query<'_>, predicate: &P) -> Vec<Document>
    where
        E: ExecutionPolicy,
        P: Fn(DocId, DocumentStatus, i32) -> bool + Sync,
    {
        if self.documents.is_empty() {
            return Vec::new();
        }
        let document_count = self.documents.len() as f64;

        let relevance = policy.accumulate(&query.plus_words, |word, sink| {
            let Some(postings) = self.index.document_freqs(word) else {
                return;
            };
            let inverse_document_freq = (document_count / postings.len() as f64).ln();
            for (&id, &term_freq) in postings {
                let Some(data) = self.documents.get(id) else {
                    continue;
                };
                if !predicate(id, data.status, data.rating) {
                    continue;
                }
                if query.minus_words.iter().any(|minus| self.index.contains_word(id, minus)) {
                    continue;
                }
                sink(id, term_freq * inverse_document_freq);
            }
        });

        relevance
            .into_iter()
            .filter(|&(_, relevance)| relevance != 0.0)
            .filter_map(|(id, relevance)| {
                self.documents.get(id).map(|data| Document::new(id, relevance, data.rating))
            })
            .collect()
    }

    pub fn match_document(&self, raw_query: &str, id: DocId) -> Result<(Vec<&str>, DocumentStatus)> {
        self.match_document_with(Sequential, raw_query, id)
    }

    /// Plus words of the query indexed for `id`, sorted and deduplicated.
    /// A single minus word present in the document empties the list.
    pub fn match_document_with<E: ExecutionPolicy>(
        &self,
        policy: E,
        raw_query: &str,
        id: DocId,
    ) -> Result<(Vec<&str>, DocumentStatus)> {
        let data = self.documents.get(id).ok_or(SearchError::DocumentNotFound(id))?;
        let query = Query::parse_unsorted(raw_query, &self.stop_words)?;
        let Some(word_freqs) = self.index.word_freqs(id) else {
            return Ok((Vec::new(), data.status));
        };

        if policy.any(&query.minus_words, |word| word_freqs.contains_key(*word)) {
            return Ok((Vec::new(), data.status));
        }

        let mut matched: Vec<&str> = policy
            .filter(&query.plus_words, |word| word_freqs.contains_key(*word))
            .into_iter()
            .filter_map(|word| word_freqs.get_key_value(word).map(|(key, _)| &**key))
            .collect();
        matched.sort_unstable();
        matched.dedup();
        Ok((matched, data.status))
    }

    pub fn document_count(&self) -> usize { self.documents.len() }

    /// Term frequencies of a document; empty when the id is unknown.
    pub fn word_frequencies(&self, id: DocId) -> BTreeMap<&str, f64> {
        self.index
            .word_freqs(id)
            .map(|freqs| freqs.iter().map(|(word, &tf)| (&**word, tf)).collect())
            .unwrap_or_default()
    }

    pub fn document(&self, id: DocId) -> Option<&DocumentData> { self.documents.get(id) }

    pub fn stop_words(&self) -> &StopWords { &self.stop_words }

    /// Live document ids in ascending order.
    pub fn iter(&self) -> DocumentIds<'_> { self.documents.ids() }
}

impl<'a> IntoIterator for &'a SearchServer {
    type Item = DocId;
    type IntoIter = DocumentIds<'a>;

    fn into_iter(self) -> Self::IntoIter { self.iter() }
}

/// Sort by descending relevance. Runs of documents within
/// [`RELEVANCE_EPSILON`] of the run's best relevance are ordered by
/// descending rating, then ascending id, so both policies agree.
fn sort_by_relevance<E: ExecutionPolicy>(policy: E, documents: &mut [Document]) {
    policy.sort_by(documents, |lhs, rhs| rhs.relevance.total_cmp(&lhs.relevance));
    let mut start = 0;
    while start < documents.len() {
        let head = documents[start].relevance;
        let end = documents[start..]
            .iter()
            .position(|doc| head - doc.relevance >= RELEVANCE_EPSILON)
            .map_or(documents.len(), |offset| start + offset);
        documents[start..end].sort_by(|lhs, rhs| rhs.rating.cmp(&lhs.rating).then(lhs.id.cmp(&rhs.id)));
        start = end;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ties_are_broken_by_rating() {
        let mut docs = vec![
            Document::new(1, 0.5, 1),
            Document::new(2, 0.9, 0),
            Document::new(3, 0.5 + RELEVANCE_EPSILON / 2.0, 0),
            Document::new(4, 0.5, 7),
        ];
        sort_by_relevance(Sequential, &mut docs);
        let ids: Vec<DocId> = docs.iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![2, 4, 1, 3]);
    }

    #[test]
    fn tie_runs_are_anchored_at_their_head() {
        let step = RELEVANCE_EPSILON * 0.6;
        let mut docs = vec![
            Document::new(1, 1.0, 0),
            Document::new(2, 1.0 - step, 5),
            Document::new(3, 1.0 - 2.0 * step, 9),
        ];
        sort_by_relevance(Sequential, &mut docs);
        let ids: Vec<DocId> = docs.iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }

    #[test]
    fn stop_only_document_is_stored_but_unreachable() {
        let mut server = SearchServer::new("a the").unwrap();
        server.add_document(3, "the a  the", DocumentStatus::Actual, &[4]).unwrap();
        assert_eq!(server.document_count(), 1);
        assert!(server.word_frequencies(3).is_empty());
        assert!(server.find_top_documents("the a").unwrap().is_empty());
        assert_eq!(server.document(3).map(|d| d.rating), Some(4));
        assert_eq!(server.match_document("x", 3).unwrap(), (vec![], DocumentStatus::Actual));
    }

    #[test]
    fn empty_index_yields_nothing() {
        let server = SearchServer::default();
        assert!(server.find_top_documents("cat").unwrap().is_empty());
        assert_eq!(server.iter().count(), 0);
    }
}
