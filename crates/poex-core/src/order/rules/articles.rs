//! Article-line parsing over the PO item table.
//!
//! Extracted text collapses the item table into a token stream:
//!
//! ```text
//! <EAN-13> <description> <UOM> <qty> <free> <basic price> <discount>
//! <schedule value> <SGST> <CGST> <cess> <landing price> <MRP> <total value>
//! ```
//!
//! Every non-overlapping row match becomes one [`ArticleLine`], in text
//! order. Documents in the older single-article layout, where no row
//! matches, go through three independent fallback patterns instead.

use tracing::{debug, trace};

use super::patterns::{
    ARTICLE_CONTINUATION, ARTICLE_LINE, FALLBACK_DESCRIPTION, FALLBACK_QUANTITY, FALLBACK_TOTAL,
    HSN_ANNOTATION, WHITESPACE,
};
use super::{ExtractionMatch, FieldExtractor};
use crate::models::record::ArticleLine;

/// Which layout produced the article lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanMode {
    /// Multi-line item table.
    Table,
    /// Older single-article layout.
    Fallback,
}

/// Result of scanning one document for article lines.
#[derive(Debug, Clone, PartialEq)]
pub struct ArticleScan {
    /// Layout the lines came from.
    pub mode: ScanMode,
    /// Lines found before the brand filter.
    pub matched: usize,
    /// Lines whose description contains the brand keyword.
    pub lines: Vec<ArticleLine>,
}

/// Article-line extractor.
#[derive(Debug, Clone)]
pub struct ArticleExtractor {
    brand_keyword: String,
    continuation_window: usize,
}

impl ArticleExtractor {
    /// Create an extractor keeping lines that mention `brand_keyword`.
    pub fn new(brand_keyword: &str, continuation_window: usize) -> Self {
        Self {
            brand_keyword: brand_keyword.trim().to_lowercase(),
            continuation_window,
        }
    }

    /// Scan a document: table rows first, the fallback layout only when no
    /// row matches anywhere. Lines for other brands are dropped.
    pub fn scan(&self, text: &str) -> ArticleScan {
        let rows: Vec<ArticleLine> = self.extract_all(text).into_iter().map(|m| m.value).collect();

        let (mode, candidates) = if rows.is_empty() {
            (ScanMode::Fallback, self.extract_fallback(text).into_iter().collect())
        } else {
            (ScanMode::Table, rows)
        };

        let matched = candidates.len();
        let lines: Vec<ArticleLine> = candidates
            .into_iter()
            .filter(|line| self.is_retained(line))
            .collect();

        debug!(
            "{:?} layout: {} article line(s), {} retained",
            mode,
            matched,
            lines.len()
        );

        ArticleScan {
            mode,
            matched,
            lines,
        }
    }

    /// Brand filter: case-insensitive substring match on the description.
    pub fn is_retained(&self, line: &ArticleLine) -> bool {
        line.description.to_lowercase().contains(&self.brand_keyword)
    }

    /// Single-article extraction for the older layout.
    ///
    /// Description, quantity/price and the "Total" line are matched
    /// independently; the "Total" quantity only fills an empty quantity.
    /// Yields nothing without a description.
    pub fn extract_fallback(&self, text: &str) -> Option<ArticleLine> {
        let mut line = ArticleLine::default();

        if let Some(caps) = FALLBACK_DESCRIPTION.captures(text) {
            line.ean = caps[1].to_string();
            line.description = clean_description(&caps[2]);
        }

        if let Some(caps) = FALLBACK_QUANTITY.captures(text) {
            line.uom = caps[1].to_string();
            line.quantity = caps[2].to_string();
            line.unit_price = caps[3].to_string();
        }

        if let Some(caps) = FALLBACK_TOTAL.captures(text) {
            if line.quantity.is_empty() {
                line.quantity = caps[1].to_string();
            }
            line.total_value = caps[2].replace(',', "");
        }

        if line.description.is_empty() {
            return None;
        }
        Some(line)
    }

    /// Weight annotation wrapped onto the line after a row, e.g. "PURI(1KG)".
    fn continuation<'t>(&self, text: &'t str, row_end: usize) -> Option<&'t str> {
        let rest = &text[row_end..];
        let window_end = rest
            .char_indices()
            .nth(self.continuation_window)
            .map(|(i, _)| i)
            .unwrap_or(rest.len());

        ARTICLE_CONTINUATION
            .captures(&rest[..window_end])
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim())
    }
}

impl Default for ArticleExtractor {
    fn default() -> Self {
        Self::new("shareat", 120)
    }
}

impl FieldExtractor for ArticleExtractor {
    type Output = ExtractionMatch<ArticleLine>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    /// All table rows, unfiltered.
    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut results = Vec::new();

        for caps in ARTICLE_LINE.captures_iter(text) {
            let Some(full_match) = caps.get(0) else {
                continue;
            };

            let mut description = caps[2].trim().to_string();
            if let Some(cont) = self.continuation(text, full_match.end()) {
                trace!("Continuation {:?} for {:?}", cont, description);
                description.push(' ');
                description.push_str(cont);
            }

            let line = ArticleLine {
                ean: caps[1].to_string(),
                description: clean_description(&description),
                uom: caps[3].to_string(),
                quantity: caps[4].to_string(),
                unit_price: caps[5].to_string(),
                total_value: caps[6].replace(',', ""),
            };
            trace!("Article line: {:?}", line);

            results.push(
                ExtractionMatch::new(line, full_match.as_str())
                    .with_position(full_match.start(), full_match.end()),
            );
        }

        results
    }
}

/// Strip "[HSN...]" annotations and collapse whitespace.
pub fn clean_description(description: &str) -> String {
    let without_hsn = HSN_ANNOTATION.replace_all(description, "");
    WHITESPACE.replace_all(&without_hsn, " ").trim().to_string()
}
