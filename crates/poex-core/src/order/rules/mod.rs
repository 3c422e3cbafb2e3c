//! Rule-based field extractors for purchase orders.

pub mod amounts;
pub mod articles;
pub mod dates;
pub mod document;
pub mod patterns;
pub mod site;
pub mod states;

pub use amounts::{parse_amount, sum_amounts};
pub use articles::{clean_description, ArticleExtractor, ArticleScan, ScanMode};
pub use dates::normalize_date;
pub use document::{extract_context, DocumentField, DOCUMENT_RULES};
pub use site::SiteExtractor;
pub use states::{state_name, STATE_CODES};

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the first occurrence of the field.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field, in document order.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// An extracted value with its location in the source text.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Byte range in source text.
    pub position: Option<(usize, usize)>,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, source: impl Into<String>) -> Self {
        Self {
            value,
            position: None,
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}
