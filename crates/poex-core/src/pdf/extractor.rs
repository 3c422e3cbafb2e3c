//! PDF text extraction using lopdf and pdf-extract.

use lopdf::Document;
use tracing::{debug, trace, warn};

use super::{assemble_pages, PdfProcessor, Result};
use crate::error::PdfError;

/// PDF text extractor using lopdf, with pdf-extract as a fallback.
pub struct PdfExtractor {
    document: Option<Document>,
    raw_data: Vec<u8>,
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self {
            document: None,
            raw_data: Vec::new(),
        }
    }

    fn document(&self) -> Result<&Document> {
        self.document
            .as_ref()
            .ok_or_else(|| PdfError::Parse("No document loaded".to_string()))
    }

    /// Whole-document text through pdf-extract.
    fn extract_text_fallback(&self) -> Result<String> {
        let text = pdf_extract::extract_text_from_mem(&self.raw_data)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))?;
        Ok(text)
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfProcessor for PdfExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // Handle PDFs with empty password encryption
        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            // pdf-extract needs the decrypted bytes
            let mut decrypted_data = Vec::new();
            doc.save_to(&mut decrypted_data)
                .map_err(|e| PdfError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
            self.raw_data = decrypted_data;
        } else {
            self.raw_data = data.to_vec();
        }

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        self.document = Some(doc);
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    fn extract_page_text(&self, page: u32) -> Result<String> {
        let doc = self.document()?;
        if !doc.get_pages().contains_key(&page) {
            return Err(PdfError::InvalidPage(page));
        }

        let text = doc
            .extract_text(&[page])
            .map_err(|e| PdfError::TextExtraction(e.to_string()))?;
        trace!("Page {}: {} chars", page, text.len());
        Ok(text)
    }

    fn extract_text(&self) -> Result<String> {
        let page_count = self.page_count();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        let mut pages = Vec::with_capacity(page_count as usize);
        for page in 1..=page_count {
            match self.extract_page_text(page) {
                Ok(text) => pages.push(text),
                Err(e) => {
                    warn!("Page {} text extraction failed: {}", page, e);
                    pages.push(String::new());
                }
            }
        }

        let text = assemble_pages(&pages);
        if !text.trim().is_empty() {
            return Ok(text);
        }

        debug!("No per-page text found, falling back to pdf-extract");
        self.extract_text_fallback()
    }
}
