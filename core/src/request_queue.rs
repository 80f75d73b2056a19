use std::collections::VecDeque;
use tracing::debug;

use crate::document::{Document, DocumentStatus};
use crate::error::Result;
use crate::server::SearchServer;
use crate::DocId;

/// Number of most recent requests considered, one tick per request
/// (minutes in a day).
pub const REQUEST_WINDOW: u64 = 1440;

#[derive(Debug, Clone, Copy)]
struct QueryResult {
    timestamp: u64,
    results: usize,
}

/// Tracks how many of the recent ranked queries came back empty.
pub struct RequestQueue<'s> {
    server: &'s SearchServer,
    requests: VecDeque<QueryResult>,
    no_result_requests: usize,
    current_time: u64,
}

impl<'s> RequestQueue<'s> {
    pub fn new(server: &'s SearchServer) -> Self {
        Self { server, requests: VecDeque::new(), no_result_requests: 0, current_time: 0 }
    }

    pub fn add_find_request(&mut self, raw_query: &str) -> Result<Vec<Document>> {
        self.add_find_request_by_status(raw_query, DocumentStatus::Actual)
    }

    pub fn add_find_request_by_status(&mut self, raw_query: &str, status: DocumentStatus) -> Result<Vec<Document>> {
        self.add_find_request_by(raw_query, move |_, document_status, _| document_status == status)
    }

    pub fn add_find_request_by<P>(&mut self, raw_query: &str, predicate: P) -> Result<Vec<Document>>
    where
        P: Fn(DocId, DocumentStatus, i32) -> bool + Sync,
    {
        let documents = self.server.find_top_documents_by(raw_query, predicate)?;
        self.record(documents.len());
        Ok(documents)
    }

    /// Count a request that was ranked elsewhere, such as one entry of a
    /// [`process_queries`](crate::process_queries) batch.
    pub fn add_completed_request(&mut self, documents: &[Document]) {
        self.record(documents.len());
    }

    /// Requests inside the window that returned no documents.
    pub fn no_result_requests(&self) -> usize { self.no_result_requests }

    fn record(&mut self, results: usize) {
        self.current_time += 1;
        while let Some(oldest) = self.requests.front() {
            if self.current_time - oldest.timestamp < REQUEST_WINDOW {
                break;
            }
            if oldest.results == 0 {
                self.no_result_requests -= 1;
            }
            self.requests.pop_front();
        }
        self.requests.push_back(QueryResult { timestamp: self.current_time, results });
        if results == 0 {
            self.no_result_requests += 1;
            debug!(tick = self.current_time, empty = self.no_result_requests, "request returned nothing");
        }
    }
}
