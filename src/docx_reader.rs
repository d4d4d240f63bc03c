use crate::markdown;
use crate::reader::DocumentReader;
use anyhow::{Context, Result};
use docx_rust::document::{
    BodyContent, Paragraph, ParagraphContent, Run, RunContent, Table, TableCellContent,
    TableRowContent,
};
use docx_rust::{Docx, DocxFile};
use std::path::Path;

pub struct DocxReader;

impl DocumentReader for DocxReader {
    fn read_text(&self, path: &Path) -> Result<String> {
        let file = DocxFile::from_file(path)
            .map_err(|e| anyhow::anyhow!("{}", e))
            .with_context(|| format!("Failed to open DOCX: {}", path.display()))?;
        let docx = file
            .parse()
            .map_err(|e| anyhow::anyhow!("{}", e))
            .with_context(|| format!("Failed to parse DOCX content: {}", path.display()))?;

        Ok(markdown::clean_markdown(&docx_to_text(&docx)))
    }
}

/// Flatten a DOCX body into indexable text. Headings keep a Markdown `#`
/// prefix so they read like the EPUB output; every list item becomes `-`.
pub fn docx_to_text(docx: &Docx) -> String {
    let mut out = String::new();
    for content in &docx.document.body.content {
        push_body_content(docx, content, &mut out);
    }
    out
}

fn push_body_content(docx: &Docx, content: &BodyContent, out: &mut String) {
    match content {
        BodyContent::Paragraph(para) => push_paragraph(docx, para, out),
        BodyContent::Table(table) => push_table(docx, table, out),
        BodyContent::Sdt(sdt) => {
            if let Some(ref sdt_content) = sdt.content {
                for item in &sdt_content.content {
                    push_body_content(docx, item, out);
                }
            }
        }
        _ => {}
    }
}

fn heading_level(style_id: &str) -> Option<usize> {
    match style_id {
        "Title" | "title" => Some(1),
        "Subtitle" | "subtitle" => Some(2),
        id => {
            let digit = id
                .strip_prefix("Heading")
                .or_else(|| id.strip_prefix("heading"))?
                .trim_start();
            digit.parse::<usize>().ok().filter(|l| (1..=6).contains(l))
        }
    }
}

fn push_paragraph(docx: &Docx, para: &Paragraph, out: &mut String) {
    let text = inline_text(docx, para);
    let text = text.trim();

    let mut level = None;
    let mut listed = false;
    if let Some(ref prop) = para.property {
        if let Some(ref style_id) = prop.style_id {
            level = heading_level(style_id.value.as_ref());
        }
        listed = prop.numbering.is_some();
    }

    if text.is_empty() {
        out.push('\n');
        return;
    }

    match (level, listed) {
        (Some(level), _) => {
            out.push_str(&"#".repeat(level));
            out.push(' ');
            out.push_str(text);
            out.push_str("\n\n");
        }
        (None, true) => {
            out.push_str("- ");
            out.push_str(text);
            out.push('\n');
        }
        (None, false) => {
            out.push_str(text);
            out.push_str("\n\n");
        }
    }
}

fn inline_text(docx: &Docx, para: &Paragraph) -> String {
    let mut result = String::new();

    for pc in &para.content {
        match pc {
            ParagraphContent::Run(run) => result.push_str(&run_text(run)),
            ParagraphContent::Link(link) => {
                let display = link.content.as_ref().map(run_text).unwrap_or_default();
                let target = link.id.as_ref().and_then(|id| {
                    docx.document_rels.as_ref().and_then(|rels| {
                        rels.relationships
                            .iter()
                            .find(|r| r.id.as_ref() == id.as_ref())
                            .map(|r| r.target.to_string())
                    })
                });
                match target {
                    Some(url) if !display.is_empty() => {
                        result.push_str(&format!("[{}]({})", display, url))
                    }
                    Some(url) => result.push_str(&url),
                    None => result.push_str(&display),
                }
            }
            _ => {}
        }
    }

    result
}

fn run_text(run: &Run) -> String {
    let mut text = String::new();
    for rc in &run.content {
        match rc {
            RunContent::Text(t) => text.push_str(&t.text),
            RunContent::Break(_) => text.push('\n'),
            RunContent::Tab(_) => text.push('\t'),
            _ => {}
        }
    }
    text
}

/// Tables become one line per row with cells separated by ` | `.
fn push_table(docx: &Docx, table: &Table, out: &mut String) {
    let mut wrote = false;

    for row in &table.rows {
        let mut cells = Vec::new();
        for cell_content in &row.cells {
            if let TableRowContent::TableCell(cell) = cell_content {
                let mut parts = Vec::new();
                for tc in &cell.content {
                    let TableCellContent::Paragraph(para) = tc;
                    let text = inline_text(docx, para);
                    if !text.trim().is_empty() {
                        parts.push(text.trim().to_string());
                    }
                }
                cells.push(parts.join(" "));
            }
        }

        if cells.iter().any(|c| !c.is_empty()) {
            out.push_str(&cells.join(" | "));
            out.push('\n');
            wrote = true;
        }
    }

    if wrote {
        out.push('\n');
    }
}
