use rayon::prelude::*;

use crate::document::Document;
use crate::error::Result;
use crate::server::SearchServer;

/// Run every query against the server in parallel. Results keep the order
/// of `queries`; the first failing query aborts the batch.
pub fn process_queries<S>(server: &SearchServer, queries: &[S]) -> Result<Vec<Vec<Document>>>
where
    S: AsRef<str> + Sync,
{
    queries.par_iter().map(|query| server.find_top_documents(query.as_ref())).collect()
}

/// Same as [`process_queries`], concatenated into one list.
pub fn process_queries_joined<S>(server: &SearchServer, queries: &[S]) -> Result<Vec<Document>>
where
    S: AsRef<str> + Sync,
{
    Ok(process_queries(server, queries)?.into_iter().flatten().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DocumentStatus;

    fn server() -> SearchServer {
        let mut server = SearchServer::new("and with").unwrap();
        let texts = [
            "funny pet and nasty rat",
            "funny pet with curly hair",
            "funny pet and not very nasty rat",
            "pet with rat and rat and rat",
            "nasty rat with curly hair",
        ];
        for (id, text) in texts.iter().enumerate() {
            server.add_document(id as i32 + 1, text, DocumentStatus::Actual, &[1, 2]).unwrap();
        }
        server
    }

    #[test]
    fn results_follow_query_order() {
        let server = server();
        let queries = ["nasty rat -not", "not very funny nasty pet", "curly hair"];
        let results = process_queries(&server, &queries).unwrap();
        let sizes: Vec<usize> = results.iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![3, 5, 2]);
        for (query, batch) in queries.iter().zip(&results) {
            assert_eq!(batch, &server.find_top_documents(query).unwrap());
        }
    }

    #[test]
    fn joined_concatenates() {
        let server = server();
        let queries = vec!["curly hair".to_string(), "nasty rat -not".to_string()];
        let joined = process_queries_joined(&server, &queries).unwrap();
        assert_eq!(joined.len(), 5);
        assert_eq!(joined[0].id, 2);
        assert_eq!(joined[1].id, 5);
    }

    #[test]
    fn first_error_propagates() {
        let server = server();
        assert!(process_queries(&server, &["rat", "--rat"]).is_err());
    }
}
