use crate::markdown;
use crate::reader::DocumentReader;
use anyhow::{Context, Result};
use rbook::prelude::*;
use rbook::Epub;
use std::path::Path;
use tracing::debug;

pub struct EpubData {
    epub: Epub,
}

impl EpubData {
    pub fn open(path: &Path) -> Result<Self> {
        let epub = Epub::options()
            .strict(false)
            .open(path)
            .with_context(|| format!("Failed to open EPUB: {}", path.display()))?;
        Ok(Self { epub })
    }

    /// Raw XHTML of every spine document, in reading order.
    pub fn chapters(&self) -> Result<Vec<String>> {
        let mut chapters = Vec::new();
        let mut reader = self.epub.reader();

        while let Some(result) = reader.read_next() {
            let data = result.context("Failed to read chapter content")?;
            let html_content = data.content().to_string();

            if html_content.trim().is_empty() {
                continue;
            }

            chapters.push(html_content);
        }

        Ok(chapters)
    }

    /// First declared `dc:title`, ignoring any `title-type` refinements.
    pub fn title(&self) -> Option<String> {
        let mut titles = self.epub.metadata().titles();
        titles.next().map(|t| t.value().to_string())
    }

    pub fn author(&self) -> Option<String> {
        let mut creators = self.epub.metadata().creators();
        creators.next().map(|c| c.value().to_string())
    }

    pub fn language(&self) -> Option<String> {
        let mut langs = self.epub.metadata().languages();
        langs.next().map(|l| l.value().to_string())
    }

    pub fn description(&self) -> Option<String> {
        let mut descs = self.epub.metadata().descriptions();
        descs.next().map(|d| d.value().to_string())
    }
}

/// Whole-book text: each spine document converted to Markdown, joined by a
/// blank line.
pub struct EpubReader;

impl DocumentReader for EpubReader {
    fn read_text(&self, path: &Path) -> Result<String> {
        let epub = EpubData::open(path)?;
        let mut parts = Vec::new();

        for html in epub.chapters()? {
            let md = markdown::html_to_markdown(&html);
            if !md.trim().is_empty() {
                parts.push(md.trim_end().to_string());
            }
        }

        debug!(path = %path.display(), chapters = parts.len(), "Read EPUB text");
        Ok(parts.join("\n\n"))
    }
}
