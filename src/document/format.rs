//! Document containers: plain text and `.docx` paragraphs.
//!
//! A format knows how to turn a source document into segments and how to
//! store the translation map next to it. The output file keeps the source
//! extension, so a `.docx` document is translated into a `.docx` file with
//! one paragraph per segment.

use anyhow::{Context, Result, anyhow};
use docx_rs::{BreakType, DocumentChild, Docx, Paragraph, ParagraphChild, Run, RunChild};
use std::fs;
use std::io::{self, Cursor};
use std::path::Path;

use super::{persist, segment};
use crate::fs::atomic_write;

/// Reading and writing one kind of document container.
pub trait DocumentFormat {
    /// Reads a source document and splits it into segments.
    fn read_segments(&self, path: &Path) -> Result<Vec<String>>;

    /// Reads a translation file written by [`DocumentFormat::write_entries`].
    /// Returns `None` when the file does not exist.
    fn read_entries(&self, path: &Path) -> Result<Option<Vec<String>>>;

    /// Replaces the translation file with `entries`, one per segment.
    fn write_entries(&self, path: &Path, entries: &[String]) -> Result<()>;
}

/// UTF-8 text; segments are lines, translations use the [`persist`] format.
#[derive(Debug, Clone, Copy)]
pub struct PlainText;

/// Word documents; segments are paragraphs.
#[derive(Debug, Clone, Copy)]
pub struct DocxFile;

/// Picks the format from the file extension. Anything but `.docx` is text.
pub fn for_path(path: &Path) -> &'static dyn DocumentFormat {
    let is_docx = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("docx"));
    if is_docx {
        return &DocxFile;
    }
    &PlainText
}

impl DocumentFormat for PlainText {
    fn read_segments(&self, path: &Path) -> Result<Vec<String>> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;
        Ok(segment(&text))
    }

    fn read_entries(&self, path: &Path) -> Result<Option<Vec<String>>> {
        persist::load(path)
    }

    fn write_entries(&self, path: &Path, entries: &[String]) -> Result<()> {
        persist::save(path, entries)
    }
}

impl DocumentFormat for DocxFile {
    fn read_segments(&self, path: &Path) -> Result<Vec<String>> {
        let paragraphs = read_paragraphs(path)?;
        Ok(segment(&paragraphs.join("\n")))
    }

    fn read_entries(&self, path: &Path) -> Result<Option<Vec<String>>> {
        match read_paragraphs(path) {
            Ok(paragraphs) => Ok(Some(paragraphs)),
            Err(e)
                if e.downcast_ref::<io::Error>()
                    .is_some_and(|io| io.kind() == io::ErrorKind::NotFound) =>
            {
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    fn write_entries(&self, path: &Path, entries: &[String]) -> Result<()> {
        let docx = entries
            .iter()
            .fold(Docx::new(), |docx, entry| docx.add_paragraph(paragraph(entry)));

        let mut buffer = Cursor::new(Vec::new());
        docx.build()
            .pack(&mut buffer)
            .map_err(|e| anyhow!("Failed to build {}: {e}", path.display()))?;

        atomic_write(path, buffer.into_inner())
    }
}

/// Builds one paragraph; embedded newlines become line breaks.
fn paragraph(entry: &str) -> Paragraph {
    if entry.is_empty() {
        return Paragraph::new();
    }

    let mut run = Run::new();
    for (i, line) in entry.split('\n').enumerate() {
        if i > 0 {
            run = run.add_break(BreakType::TextWrapping);
        }
        run = run.add_text(line);
    }
    Paragraph::new().add_run(run)
}

/// Text of every top-level paragraph, empty ones included.
fn read_paragraphs(path: &Path) -> Result<Vec<String>> {
    let bytes =
        fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))?;
    let docx = docx_rs::read_docx(&bytes)
        .map_err(|e| anyhow!("Failed to parse {}: {e}", path.display()))?;

    Ok(docx
        .document
        .children
        .iter()
        .filter_map(|child| match child {
            DocumentChild::Paragraph(paragraph) => Some(paragraph_text(paragraph)),
            _ => None,
        })
        .collect())
}

fn paragraph_text(paragraph: &Paragraph) -> String {
    let mut text = String::new();
    for child in &paragraph.children {
        let ParagraphChild::Run(run) = child else {
            continue;
        };
        for run_child in &run.children {
            match run_child {
                RunChild::Text(t) => text.push_str(&t.text),
                RunChild::Tab(_) => text.push('\t'),
                RunChild::Break(_) => text.push('\n'),
                _ => {}
            }
        }
    }
    text
}
