use serde::{Deserialize, Serialize};
use std::collections::{btree_map, BTreeMap};
use std::fmt;

use crate::DocId;

/// A ranked search hit.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Document {
    pub id: DocId,
    pub relevance: f64,
    pub rating: i32,
}

impl Document {
    pub fn new(id: DocId, relevance: f64, rating: i32) -> Self { Self { id, relevance, rating } }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ document_id = {}, relevance = {}, rating = {} }}",
            self.id, self.relevance, self.rating
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    #[default]
    Actual,
    Irrelevant,
    Banned,
    Removed,
}

/// Stored metadata plus the canonical text of a document.
#[derive(Debug, Clone)]
pub struct DocumentData {
    pub rating: i32,
    pub status: DocumentStatus,
    text: Box<str>,
}

impl DocumentData {
    pub fn text(&self) -> &str { &self.text }
}

/// Integer average with truncation toward zero; 0 for no ratings.
pub fn average_rating(ratings: &[i32]) -> i32 {
    if ratings.is_empty() {
        return 0;
    }
    let sum: i64 = ratings.iter().map(|&r| i64::from(r)).sum();
    (sum / ratings.len() as i64) as i32
}

/// Ascending iterator over live document ids.
pub type DocumentIds<'a> = std::iter::Copied<btree_map::Keys<'a, DocId, DocumentData>>;

/// Live documents keyed by id, iterated in ascending id order.
#[derive(Debug, Default)]
pub struct DocumentStore {
    docs: BTreeMap<DocId, DocumentData>,
}

impl DocumentStore {
    pub fn new() -> Self { Self::default() }

    pub fn insert(&mut self, id: DocId, text: &str, status: DocumentStatus, rating: i32) {
        self.docs.insert(id, DocumentData { rating, status, text: text.into() });
    }

    pub fn remove(&mut self, id: DocId) -> Option<DocumentData> { self.docs.remove(&id) }

    pub fn get(&self, id: DocId) -> Option<&DocumentData> { self.docs.get(&id) }

    pub fn contains(&self, id: DocId) -> bool { self.docs.contains_key(&id) }

    pub fn len(&self) -> usize { self.docs.len() }

    pub fn is_empty(&self) -> bool { self.docs.is_empty() }

    pub fn ids(&self) -> DocumentIds<'_> { self.docs.keys().copied() }
}
