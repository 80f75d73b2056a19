use std::collections::BTreeMap;
use std::sync::Arc;

use crate::execution::ExecutionPolicy;
use crate::DocId;

/// Term frequencies of one document, keyed by word.
pub type WordFreqs = BTreeMap<Arc<str>, f64>;
/// Term frequencies of one word, keyed by document id.
pub type DocFreqs = BTreeMap<DocId, f64>;

/// Word -> document and document -> word views over the same
/// `(word, id, tf)` triples.
///
/// Word keys are interned: both views share one `Arc<str>` per distinct
/// word, and the allocation lives until the last document using it is
/// removed.
#[derive(Debug, Default)]
pub struct InvertedIndex {
    word_to_document_freqs: BTreeMap<Arc<str>, DocFreqs>,
    document_to_word_freqs: BTreeMap<DocId, WordFreqs>,
}

impl InvertedIndex {
    pub fn new() -> Self { Self::default() }

    /// Index `words` (already filtered) for document `id`.
    ///
    /// A document with no words gets an empty entry so it is still known to
    /// the per-document view.
    pub fn insert(&mut self, id: DocId, words: &[&str]) {
        let mut word_freqs = WordFreqs::new();
        if !words.is_empty() {
            let inv_word_count = 1.0 / words.len() as f64;
            for &word in words {
                match word_freqs.get_mut(word) {
                    Some(tf) => *tf += inv_word_count,
                    None => {
                        let key = self.intern(word);
                        word_freqs.insert(key, inv_word_count);
                    }
                }
            }
            for (word, &tf) in &word_freqs {
                self.word_to_document_freqs.entry(Arc::clone(word)).or_default().insert(id, tf);
            }
        }
        self.document_to_word_freqs.insert(id, word_freqs);
    }

    fn intern(&self, word: &str) -> Arc<str> {
        match self.word_to_document_freqs.get_key_value(word) {
            Some((key, _)) => Arc::clone(key),
            None => Arc::from(word),
        }
    }

    /// Retract every entry of `id` from both views. Postings of the
    /// document's words are updated through `policy`; words left without
    /// documents disappear.
    pub fn remove<E: ExecutionPolicy>(&mut self, policy: E, id: DocId) -> bool {
        let Some(word_freqs) = self.document_to_word_freqs.remove(&id) else {
            return false;
        };
        let mut postings: Vec<(Arc<str>, DocFreqs)> = word_freqs
            .keys()
            .filter_map(|word| self.word_to_document_freqs.remove_entry(&**word))
            .collect();
        policy.for_each_mut(&mut postings, |(_, docs)| {
            docs.remove(&id);
        });
        self.word_to_document_freqs
            .extend(postings.into_iter().filter(|(_, docs)| !docs.is_empty()));
        true
    }

    pub fn document_freqs(&self, word: &str) -> Option<&DocFreqs> {
        self.word_to_document_freqs.get(word)
    }

    pub fn word_freqs(&self, id: DocId) -> Option<&WordFreqs> {
        self.document_to_word_freqs.get(&id)
    }

    pub fn contains_word(&self, id: DocId, word: &str) -> bool {
        self.word_freqs(id).is_some_and(|freqs| freqs.contains_key(word))
    }

    /// Number of distinct indexed words.
    pub fn word_count(&self) -> usize { self.word_to_document_freqs.len() }
}
