//! Error types for the poex-core library.

use thiserror::Error;

/// Main error type for the poex library.
#[derive(Error, Debug)]
pub enum PoexError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Purchase-order extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Invalid page number requested.
    #[error("invalid page number: {0}")]
    InvalidPage(u32),
}

/// Errors related to purchase-order field extraction.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// A rule built from configuration did not compile.
    #[error("invalid pattern for {rule}: {reason}")]
    Pattern { rule: String, reason: String },

    /// The assembled document text is empty.
    #[error("no text to extract from")]
    NoText,
}

/// Result type for the poex library.
pub type Result<T> = std::result::Result<T, PoexError>;
