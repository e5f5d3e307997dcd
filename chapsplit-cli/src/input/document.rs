//! Loading documents from disk

use anyhow::{Context, Result};
use chapsplit_core::Document;
use std::path::Path;

use super::FileReader;

/// How an input file is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// Extracted navigation and content units
    Json,
    /// Plain text, chapters found by scanning
    Text,
}

impl DocumentKind {
    pub fn of(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => DocumentKind::Json,
            _ => DocumentKind::Text,
        }
    }
}

/// Read and parse the document at `path`
pub fn load_document(path: &Path) -> Result<Document> {
    let content = FileReader::read_text(path)?;
    match DocumentKind::of(path) {
        DocumentKind::Json => Document::from_json_str(&content)
            .with_context(|| format!("Failed to parse document: {}", path.display())),
        DocumentKind::Text => Ok(Document::from_text(&content)),
    }
}
