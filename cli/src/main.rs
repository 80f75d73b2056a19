use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use search_core::request_queue::REQUEST_WINDOW;
use search_core::{
    paginate, process_queries, Document, DocumentStatus, Parallel, RequestQueue, SearchServer, Sequential,
};
use tracing_subscriber::{fmt, EnvFilter};

use std::path::PathBuf;

mod loader;

#[derive(Parser)]
#[command(name = "search")]
#[command(about = "Rank documents against keyword queries with TF-IDF", long_about = None)]
struct Cli {
    /// Input path (JSON/JSONL file or a directory of them)
    #[arg(long, env = "SEARCH_DOCS")]
    docs: PathBuf,
    /// Space-separated stop words
    #[arg(long, env = "SEARCH_STOP_WORDS", default_value = "")]
    stop_words: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the top documents for each query
    Query {
        /// Only rank documents with this status
        #[arg(long, value_enum, default_value_t = StatusArg::Actual)]
        status: StatusArg,
        /// Rank all queries at once on the thread pool (actual documents only)
        #[arg(long, default_value_t = false, conflicts_with = "status")]
        parallel: bool,
        /// Results per printed page
        #[arg(long, env = "SEARCH_PAGE_SIZE", default_value_t = 2)]
        page_size: usize,
        #[arg(required = true)]
        queries: Vec<String>,
    },
    /// Show which query words a document contains
    Match {
        #[arg(long)]
        id: i32,
        #[arg(long, default_value_t = false)]
        parallel: bool,
        query: String,
    },
    /// Print the live documents, optionally removing some first
    Stats {
        #[arg(long)]
        remove: Vec<i32>,
        #[arg(long, default_value_t = false)]
        parallel: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum StatusArg {
    Actual,
    Irrelevant,
    Banned,
    Removed,
}

impl From<StatusArg> for DocumentStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Actual => DocumentStatus::Actual,
            StatusArg::Irrelevant => DocumentStatus::Irrelevant,
            StatusArg::Banned => DocumentStatus::Banned,
            StatusArg::Removed => DocumentStatus::Removed,
        }
    }
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    let mut server = SearchServer::new(&cli.stop_words).context("invalid stop words")?;
    tracing::debug!(stop_words = server.stop_words().len(), "stop words loaded");
    loader::load_into(&mut server, &cli.docs)?;

    match cli.command {
        Commands::Query { status, parallel, page_size, queries } => {
            run_queries(&server, status.into(), parallel, page_size, &queries)
        }
        Commands::Match { id, parallel, query } => {
            let (words, status) = if parallel {
                server.match_document_with(Parallel, &query, id)?
            } else {
                server.match_document_with(Sequential, &query, id)?
            };
            println!("{{ document_id = {id}, status = {status:?}, words = {} }}", words.join(" "));
            if let Some(data) = server.document(id) {
                println!("  {}", data.text());
            }
            Ok(())
        }
        Commands::Stats { remove, parallel } => {
            for id in remove {
                if parallel {
                    server.remove_document_with(Parallel, id);
                } else {
                    server.remove_document(id);
                }
            }
            println!("{} documents", server.document_count());
            for id in &server {
                println!("{id}: {} words", server.word_frequencies(id).len());
            }
            Ok(())
        }
    }
}

fn run_queries(
    server: &SearchServer,
    status: DocumentStatus,
    parallel: bool,
    page_size: usize,
    queries: &[String],
) -> Result<()> {
    let mut requests = RequestQueue::new(server);
    if parallel {
        let results = process_queries(server, queries)?;
        for (query, documents) in queries.iter().zip(&results) {
            requests.add_completed_request(documents);
            print_results(query, documents, page_size)?;
        }
    } else {
        for query in queries {
            let documents = requests
                .add_find_request_by_status(query, status)
                .with_context(|| format!("query {query:?}"))?;
            print_results(query, &documents, page_size)?;
        }
    }
    println!(
        "{} of the last {} requests found nothing",
        requests.no_result_requests(),
        REQUEST_WINDOW.min(queries.len() as u64)
    );
    Ok(())
}

fn print_results(query: &str, documents: &[Document], page_size: usize) -> Result<()> {
    println!("query: {query}");
    let pages = paginate(documents, page_size)?;
    for (n, page) in pages.iter().enumerate() {
        println!("  page {}: {page}", n + 1);
    }
    Ok(())
}
