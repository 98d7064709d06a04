//! Word-processor (.docx) text extraction.
//!
//! A .docx file is a ZIP archive of XML parts; `docx-rs` parses it into a
//! typed tree:
//!
//! ```text
//! Document
//!   └── children: Vec<DocumentChild>
//!         └── Paragraph
//!               └── children: Vec<ParagraphChild>
//!                     ├── Run ── children: Vec<RunChild> ── Text
//!                     └── Hyperlink ── children: Vec<ParagraphChild>
//! ```
//!
//! Only top-level paragraphs are read, in document order. Tables, headers
//! and images are ignored.

use super::DocumentReader;
use crate::error::{ExtractError, ExtractResult};
use docx_rs::{DocumentChild, Paragraph, ParagraphChild, RunChild};

/// Reads paragraph text from .docx documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocxReader;

impl DocumentReader for DocxReader {
    fn extract_text(&self, bytes: &[u8]) -> ExtractResult<String> {
        let docx =
            docx_rs::read_docx(bytes).map_err(|e| ExtractError::Docx(format!("{:?}", e)))?;

        let paragraphs: Vec<String> = docx
            .document
            .children
            .iter()
            .filter_map(|child| match child {
                DocumentChild::Paragraph(para) => Some(paragraph_text(para)),
                _ => None,
            })
            .collect();

        Ok(paragraphs.join("\n"))
    }
}

/// Concatenate the runs of one paragraph; runs are fragments of the same line.
fn paragraph_text(para: &Paragraph) -> String {
    let mut text = String::new();
    collect_children(&para.children, &mut text);
    text
}

fn collect_children(children: &[ParagraphChild], out: &mut String) {
    for child in children {
        match child {
            ParagraphChild::Run(run) => {
                for rc in &run.children {
                    match rc {
                        RunChild::Text(t) => out.push_str(&t.text),
                        RunChild::Tab(_) => out.push('\t'),
                        _ => {}
                    }
                }
            }
            ParagraphChild::Hyperlink(link) => collect_children(&link.children, out),
            _ => {}
        }
    }
}
