//! Core library for purchase-order (PO) extraction.
//!
//! This crate provides:
//! - PDF text assembly (page-ordered text through lopdf / pdf-extract)
//! - Document field rules (chain, ship-to site, PO number and dates, vendor, state)
//! - Article-line parsing over the fixed-column item table
//! - Schema-stable PO records, one per retained article line

pub mod error;
pub mod models;
pub mod order;
pub mod pdf;

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use tracing::{error, warn};

pub use error::{ExtractionError, PdfError, PoexError, Result};
pub use models::config::PoexConfig;
pub use models::record::{ArticleLine, DocumentContext, DocumentOutcome, PoRecord, COLUMNS};
pub use models::summary::DocumentSummary;
pub use order::{ExtractionResult, OrderParser, PurchaseOrderParser, RULES_VERSION};
pub use pdf::{assemble_pages, extract_file_text, PdfExtractor, PdfProcessor};

/// Run one PDF document through text extraction and the rule engine.
///
/// Never fails: a document the PDF collaborator cannot read, or one that
/// panics anywhere in extraction, yields [`DocumentOutcome::Failed`] with a
/// single empty record, so a bad file cannot abort a batch.
pub fn process_pdf<P: PdfProcessor>(
    data: &[u8],
    processor: &mut P,
    parser: &PurchaseOrderParser,
) -> DocumentOutcome {
    let run = panic::catch_unwind(AssertUnwindSafe(|| extract_outcome(data, processor, parser)));

    run.unwrap_or_else(|payload| {
        let reason = panic_message(payload.as_ref());
        error!("PDF extraction panicked: {}", reason);
        DocumentOutcome::failed(format!("extraction panicked: {}", reason))
    })
}

fn extract_outcome<P: PdfProcessor>(
    data: &[u8],
    processor: &mut P,
    parser: &PurchaseOrderParser,
) -> DocumentOutcome {
    let text = processor.load(data).and_then(|()| processor.extract_text());

    match text {
        Ok(text) if !text.trim().is_empty() => parser.extract_document(&text),
        Ok(_) => {
            warn!("PDF produced no text");
            DocumentOutcome::failed(ExtractionError::NoText.to_string())
        }
        Err(e) => {
            warn!("PDF text extraction failed: {}", e);
            DocumentOutcome::failed(e.to_string())
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic")
}
