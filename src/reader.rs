use crate::docx_reader::DocxReader;
use crate::epub_reader::EpubReader;
use crate::markdown;
use crate::metadata::FileMetadata;
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// One loaded file: its extracted text plus whatever metadata the
/// directory reader's callback produced for it.
#[derive(Debug, Clone, Serialize)]
pub struct Document {
    pub id: String,
    pub text: String,
    pub metadata: FileMetadata,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Epub,
    Docx,
    Html,
    PlainText,
}

impl FileFormat {
    /// Anything without a dedicated reader falls back to plain text.
    pub fn detect(path: &Path) -> Self {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "epub" => Self::Epub,
            "docx" => Self::Docx,
            "html" | "htm" | "xhtml" => Self::Html,
            _ => Self::PlainText,
        }
    }
}

/// Trait for turning a file of one format into indexable text
pub trait DocumentReader {
    fn read_text(&self, path: &Path) -> Result<String>;
}

pub fn reader_for(format: FileFormat) -> Box<dyn DocumentReader> {
    match format {
        FileFormat::Epub => Box::new(EpubReader),
        FileFormat::Docx => Box::new(DocxReader),
        FileFormat::Html => Box::new(HtmlReader),
        FileFormat::PlainText => Box::new(PlainTextReader),
    }
}

pub struct HtmlReader;

impl DocumentReader for HtmlReader {
    fn read_text(&self, path: &Path) -> Result<String> {
        let bytes =
            fs::read(path).with_context(|| format!("Failed to read HTML: {}", path.display()))?;
        Ok(markdown::html_to_markdown(&String::from_utf8_lossy(&bytes)))
    }
}

pub struct PlainTextReader;

impl DocumentReader for PlainTextReader {
    fn read_text(&self, path: &Path) -> Result<String> {
        let bytes =
            fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
