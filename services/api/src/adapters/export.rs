//! services/api/src/adapters/export.rs
//!
//! Turns generated text into downloadable files. Implements the
//! `DocumentExporter` port from the `core` crate.

use docx_rs::{Docx, Paragraph, Run};
use std::io::Cursor;
use writing_assistant_core::{DocumentExporter, ExportError, ExportFormat};

/// Renders plain-text and `.docx` downloads.
#[derive(Clone, Copy, Debug, Default)]
pub struct FileExporter;

impl DocumentExporter for FileExporter {
    fn render(&self, text: &str, format: ExportFormat) -> Result<Vec<u8>, ExportError> {
        match format {
            ExportFormat::PlainText => Ok(to_plain_text(text)),
            ExportFormat::Docx => to_paragraph_document(text),
        }
    }
}

/// UTF-8 bytes of the text, unchanged.
pub fn to_plain_text(text: &str) -> Vec<u8> {
    text.as_bytes().to_vec()
}

/// Lines of `text` as they become document paragraphs. Empty lines are kept.
pub fn paragraph_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n').map(|line| line.strip_suffix('\r').unwrap_or(line))
}

/// Builds a word-processor document with one paragraph per line.
pub fn to_paragraph_document(text: &str) -> Result<Vec<u8>, ExportError> {
    let docx = paragraph_lines(text).fold(Docx::new(), |docx, line| {
        let paragraph = if line.is_empty() {
            Paragraph::new()
        } else {
            Paragraph::new().add_run(Run::new().add_text(line))
        };
        docx.add_paragraph(paragraph)
    });

    let mut buffer = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buffer)
        .map_err(|e| ExportError::Document {
            format: ExportFormat::Docx.extension(),
            message: e.to_string(),
        })?;
    Ok(buffer.into_inner())
}
