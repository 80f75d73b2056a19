use anyhow::{Context, Result};
use search_core::{DocumentStatus, SearchServer};
use serde::Deserialize;
use walkdir::WalkDir;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct InputDoc {
    pub id: i32,
    pub text: String,
    #[serde(default)]
    pub status: DocumentStatus,
    #[serde(default)]
    pub ratings: Vec<i32>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoadStats {
    pub added: usize,
    pub skipped: usize,
}

/// `.json` and `.jsonl` files under `input`, or `input` itself when it is a file.
pub fn collect_files(input: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = Vec::new();
    if input.is_dir() {
        for entry in WalkDir::new(input).sort_by_file_name().into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() && matches!(p.extension().and_then(|s| s.to_str()), Some("json" | "jsonl")) {
                files.push(p.to_path_buf());
            }
        }
    } else if input.is_file() {
        files.push(input.to_path_buf());
    }
    files
}

pub fn read_documents(file: &Path) -> Result<Vec<InputDoc>> {
    let f = File::open(file).with_context(|| format!("opening {}", file.display()))?;
    let reader = BufReader::new(f);
    if file.extension().and_then(|s| s.to_str()) == Some("jsonl") {
        let mut docs = Vec::new();
        for (line_no, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() { continue; }
            let doc: InputDoc = serde_json::from_str(&line)
                .with_context(|| format!("{}:{}", file.display(), line_no + 1))?;
            docs.push(doc);
        }
        return Ok(docs);
    }
    let json: serde_json::Value = serde_json::from_reader(reader)
        .with_context(|| format!("parsing {}", file.display()))?;
    let docs = match json {
        serde_json::Value::Array(arr) => arr
            .into_iter()
            .map(serde_json::from_value)
            .collect::<std::result::Result<Vec<InputDoc>, _>>()?,
        serde_json::Value::Object(_) => vec![serde_json::from_value(json)?],
        _ => Vec::new(),
    };
    Ok(docs)
}

/// Add every document found under `input`. Documents the server rejects are
/// logged and skipped; unreadable files abort the load.
pub fn load_into(server: &mut SearchServer, input: &Path) -> Result<LoadStats> {
    let mut stats = LoadStats::default();
    for file in collect_files(input) {
        for doc in read_documents(&file)? {
            match server.add_document(doc.id, &doc.text, doc.status, &doc.ratings) {
                Ok(()) => stats.added += 1,
                Err(err) => {
                    tracing::warn!(id = doc.id, file = %file.display(), %err, "skipping document");
                    stats.skipped += 1;
                }
            }
        }
    }
    tracing::info!(added = stats.added, skipped = stats.skipped, "loaded documents");
    Ok(stats)
}
