//! PDF processing module.
//!
//! The extraction rules only ever see one assembled text string per
//! document; this module is the boundary that produces it.

mod extractor;

pub use extractor::PdfExtractor;

use std::path::Path;

use tracing::debug;

use crate::error::PdfError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Trait for PDF processing implementations.
pub trait PdfProcessor {
    /// Load a PDF from bytes.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Get the number of pages in the PDF.
    fn page_count(&self) -> u32;

    /// Extract text from a specific page (1-indexed).
    fn extract_page_text(&self, page: u32) -> Result<String>;

    /// Extract the whole document as page-ordered text.
    fn extract_text(&self) -> Result<String> {
        let pages = (1..=self.page_count())
            .map(|page| self.extract_page_text(page))
            .collect::<Result<Vec<_>>>()?;
        Ok(assemble_pages(&pages))
    }
}

/// Join per-page text into one document string.
///
/// Pages keep their order and line breaks; each non-empty page is followed
/// by a newline and empty pages are skipped.
pub fn assemble_pages<S: AsRef<str>>(pages: &[S]) -> String {
    let mut text = String::new();
    for page in pages.iter().map(AsRef::as_ref) {
        if page.is_empty() {
            continue;
        }
        text.push_str(page);
        text.push('\n');
    }
    text
}

/// Read a PDF file and return its assembled text.
pub fn extract_file_text(path: &Path) -> crate::Result<String> {
    let data = std::fs::read(path)?;
    let mut extractor = PdfExtractor::new();
    extractor.load(&data)?;

    let text = extractor.extract_text()?;
    debug!("Extracted {} chars from {}", text.len(), path.display());
    Ok(text)
}
