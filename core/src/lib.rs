//! In-memory TF-IDF search over short documents with minus-word filtering.
//!
//! ```
//! use search_core::{DocumentStatus, SearchServer};
//!
//! let mut server = SearchServer::new("and in on").unwrap();
//! server.add_document(0, "white cat and fancy collar", DocumentStatus::Actual, &[8, -3]).unwrap();
//! server.add_document(1, "fluffy cat fluffy tail", DocumentStatus::Actual, &[7, 2, 7]).unwrap();
//!
//! let hits = server.find_top_documents("fluffy cat -collar").unwrap();
//! assert_eq!(hits.len(), 1);
//! assert_eq!(hits[0].id, 1);
//! ```

pub mod concurrent_map;
pub mod document;
pub mod error;
pub mod execution;
pub mod index;
pub mod paginator;
pub mod process_queries;
pub mod query;
pub mod request_queue;
pub mod server;
pub mod stop_words;
pub mod tokenizer;

pub type DocId = i32;

pub use concurrent_map::ConcurrentMap;
pub use document::{Document, DocumentStatus};
pub use error::{Result, SearchError};
pub use execution::{ExecutionPolicy, Parallel, Sequential};
pub use paginator::{paginate, Paginator};
pub use process_queries::{process_queries, process_queries_joined};
pub use request_queue::RequestQueue;
pub use server::{SearchServer, MAX_RESULT_DOCUMENT_COUNT};
pub use stop_words::StopWords;
