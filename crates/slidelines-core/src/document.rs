//! Loading and saving PDF documents

use crate::error::{Result, SlidelinesError};
use lopdf::Document;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::debug;

/// Parse PDF bytes into a document
pub fn parse_document(bytes: &[u8]) -> Result<Document> {
    Document::load_mem(bytes).map_err(|e| SlidelinesError::ParseError(e.to_string()))
}

/// Read a PDF file fully into memory and parse it.
///
/// The file handle is closed before parsing starts, so the same path can be
/// used as the output.
pub fn load_document(path: &Path) -> Result<Document> {
    let bytes = std::fs::read(path)?;
    debug!(path = %path.display(), bytes = bytes.len(), "read input");
    parse_document(&bytes)
}

/// Serialize a document into memory
pub fn write_document(doc: &mut Document) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)
        .map_err(|e| SlidelinesError::OperationError(format!("Failed to save PDF: {}", e)))?;
    Ok(buffer)
}

/// Write a document to `path`, creating or truncating it
pub fn save_document(doc: &mut Document, path: &Path) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    doc.save_to(&mut writer)
        .map_err(|e| SlidelinesError::Io(std::io::Error::other(e.to_string())))?;
    writer.flush()?;
    debug!(path = %path.display(), "wrote output");
    Ok(())
}
