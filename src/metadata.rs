//! Per-file metadata callbacks for the directory reader.
//!
//! `extract_epub_metadata` reads the Dublin Core fields of one EPUB into a
//! fixed six-key record. `default_file_metadata` describes any file by its
//! filesystem attributes and is used when no callback is injected.

use crate::epub_reader::EpubData;
use crate::error::LoaderError;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Metadata attached to each loaded document.
pub type FileMetadata = BTreeMap<String, String>;

pub const DEFAULT_TITLE: &str = "N/A";
pub const RECORD_TYPE: &str = "epub";
pub const EMBEDDINGS: &str = "openaiembeddings";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetadataRecord {
    pub title: String,
    pub author: String,
    pub language: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub embeddings: String,
}

impl MetadataRecord {
    pub fn into_metadata(self) -> FileMetadata {
        BTreeMap::from([
            ("title".to_string(), self.title),
            ("author".to_string(), self.author),
            ("language".to_string(), self.language),
            ("description".to_string(), self.description),
            ("type".to_string(), self.kind),
            ("embeddings".to_string(), self.embeddings),
        ])
    }
}

/// Literal suffix trim, applied once. Not extension-aware: "Notes on.epub"
/// loses its ".epub" even though it is not a file name.
fn strip_epub_suffix(title: &str) -> &str {
    title.strip_suffix(".epub").unwrap_or(title)
}

pub fn extract_epub_metadata(path: &Path) -> Result<MetadataRecord> {
    if !path.exists() {
        return Err(LoaderError::FileNotFound {
            path: path.to_path_buf(),
        }
        .into());
    }

    let epub = EpubData::open(path)?;

    let record = MetadataRecord {
        title: epub
            .title()
            .map(|t| strip_epub_suffix(&t).to_string())
            .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        author: epub.author().unwrap_or_default(),
        language: epub.language().unwrap_or_default(),
        description: epub.description().unwrap_or_default(),
        kind: RECORD_TYPE.to_string(),
        embeddings: EMBEDDINGS.to_string(),
    };

    debug!(path = %path.display(), title = %record.title, "Extracted EPUB metadata");
    Ok(record)
}

/// `extract_epub_metadata` shaped as a directory-reader callback.
pub fn epub_file_metadata(path: &Path) -> Result<FileMetadata> {
    extract_epub_metadata(path).map(MetadataRecord::into_metadata)
}

pub fn default_file_metadata(path: &Path) -> Result<FileMetadata> {
    let stat = fs::metadata(path)
        .with_context(|| format!("Failed to stat file: {}", path.display()))?;

    let mut meta = BTreeMap::new();
    meta.insert("file_path".to_string(), path.display().to_string());
    meta.insert(
        "file_name".to_string(),
        path.file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default(),
    );
    meta.insert(
        "file_type".to_string(),
        mime_guess::from_path(path).first_or_octet_stream().to_string(),
    );
    meta.insert("file_size".to_string(), stat.len().to_string());
    if let Ok(modified) = stat.modified() {
        let modified: DateTime<Utc> = modified.into();
        meta.insert(
            "last_modified_date".to_string(),
            modified.format("%Y-%m-%d").to_string(),
        );
    }

    Ok(meta)
}
