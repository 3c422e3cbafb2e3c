//! Rule-based purchase-order parser.

use std::time::Instant;

use tracing::{debug, info, warn};

use crate::error::Result;
use crate::models::config::ExtractionConfig;
use crate::models::record::{ArticleLine, DocumentContext, DocumentOutcome};

use super::rules::{extract_context, ArticleExtractor, ScanMode, SiteExtractor};
use super::RULES_VERSION;

/// Result of parsing one document's text.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// Document-scoped fields.
    pub context: DocumentContext,
    /// Article lines that passed the brand filter, in text order.
    pub articles: Vec<ArticleLine>,
    /// Assembled output records.
    pub outcome: DocumentOutcome,
    /// Extraction warnings.
    pub warnings: Vec<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Trait for purchase-order parsing.
pub trait OrderParser {
    /// Parse a purchase order from assembled text.
    fn parse(&self, text: &str) -> ExtractionResult;
}

/// Purchase-order parser over the canonical rule table.
///
/// Configurable rules are compiled once; the parser holds no per-document
/// state and can be shared across threads.
#[derive(Debug, Clone)]
pub struct PurchaseOrderParser {
    site: SiteExtractor,
    articles: ArticleExtractor,
    /// Shorter text is flagged as a probable scan; 0 disables the check.
    min_text_length: usize,
}

impl PurchaseOrderParser {
    /// Create a parser with the default extraction settings.
    pub fn new() -> Self {
        let config = ExtractionConfig::default();
        Self {
            site: SiteExtractor::default(),
            articles: ArticleExtractor::new(&config.brand_keyword, config.continuation_window),
            min_text_length: 0,
        }
    }

    /// Create a parser from extraction settings.
    pub fn from_config(config: &ExtractionConfig) -> Result<Self> {
        Ok(Self {
            site: SiteExtractor::new(&config.buyer_name, &config.site_brand_tokens)?,
            articles: ArticleExtractor::new(&config.brand_keyword, config.continuation_window),
            min_text_length: 0,
        })
    }

    /// Warn about documents with less text than this.
    pub fn with_min_text_length(mut self, min_text_length: usize) -> Self {
        self.min_text_length = min_text_length;
        self
    }

    /// Records for one document's text. Always at least one.
    pub fn extract_document(&self, text: &str) -> DocumentOutcome {
        self.parse(text).outcome
    }
}

impl Default for PurchaseOrderParser {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderParser for PurchaseOrderParser {
    fn parse(&self, text: &str) -> ExtractionResult {
        let start = Instant::now();
        let mut warnings = Vec::new();

        info!(
            "Parsing purchase order from {} characters of text ({})",
            text.len(),
            RULES_VERSION
        );

        let text_length = text.trim().chars().count();
        if text_length < self.min_text_length {
            warn!(
                "Only {} characters of text, document is probably scanned",
                text_length
            );
            warnings.push(format!("Only {} characters of text", text_length));
        }

        let context = extract_context(text, &self.site);
        if context.po_number.is_empty() {
            warnings.push("Could not extract PO number".to_string());
        }

        let scan = self.articles.scan(text);
        if scan.matched == 0 {
            warnings.push("Could not extract article lines".to_string());
        } else if scan.lines.is_empty() {
            warnings.push(format!(
                "{} article line(s) found, none for the configured brand",
                scan.matched
            ));
        }
        if scan.mode == ScanMode::Fallback && !scan.lines.is_empty() {
            debug!("Article taken from the single-article layout");
        }

        let outcome = DocumentOutcome::assemble(&context, &scan.lines);

        debug!(
            "PO {:?}: {} record(s), status {}",
            context.po_number,
            outcome.len(),
            outcome.status()
        );

        ExtractionResult {
            context,
            articles: scan.lines,
            outcome,
            warnings,
            processing_time_ms: start.elapsed().as_millis() as u64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::record::PoRecord;
    use pretty_assertions::assert_eq;

    const ORDER: &str = "PURCHASE ORDER\n\
        PO # 12345\n\
        PO Date 01/02/2024 Delivery Dt 05.02.2024\n\
        Sr EAN Description UOM Qty Free Basic Disc Sch SGST CGST Cess LP MRP Total\n\
        1 1234567890123 SHAREAT TEST ITEM EA 10 0 22.00 0.00 220.00 6.60 6.60 0.00 25.50 30.00 255.00\n";

    #[test]
    fn test_parse_single_article_order() {
        let parser = PurchaseOrderParser::new();
        let result = parser.parse(ORDER);

        assert_eq!(result.outcome.status(), "extracted");
        assert_eq!(result.outcome.len(), 1);
        assert_eq!(
            result.outcome.first(),
            &PoRecord {
                po_number: "12345".to_string(),
                po_date: "02/01/2024".to_string(),
                delivery_date: "02/05/2024".to_string(),
                article_description: "SHAREAT TEST ITEM".to_string(),
                total_pcs: "10".to_string(),
                basic_price: "25.50".to_string(),
                total_value: "255.00".to_string(),
                ..PoRecord::default()
            }
        );
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_parse_is_deterministic() {
        let parser = PurchaseOrderParser::new();
        assert_eq!(parser.extract_document(ORDER), parser.extract_document(ORDER));
    }

    #[test]
    fn test_no_articles_keeps_document_fields() {
        let parser = PurchaseOrderParser::new();
        let result = parser.parse("PO # 777\nPO Date 10/11/2023\n");

        assert_eq!(result.outcome.status(), "no_articles");
        assert_eq!(result.outcome.first().po_number, "777");
        assert_eq!(result.outcome.first().po_date, "11/10/2023");
        assert_eq!(result.outcome.first().article_description, "");
        assert_eq!(result.warnings, vec!["Could not extract article lines".to_string()]);
    }

    #[test]
    fn test_filtered_out_lines_warn() {
        let text = ORDER.replace("SHAREAT", "OTHERCO");
        let result = PurchaseOrderParser::new().parse(&text);

        assert_eq!(result.outcome.status(), "no_articles");
        assert!(result.articles.is_empty());
        assert_eq!(
            result.warnings,
            vec!["1 article line(s) found, none for the configured brand".to_string()]
        );
    }

    #[test]
    fn test_empty_text_yields_one_empty_record() {
        let outcome = PurchaseOrderParser::new().extract_document("");
        assert_eq!(outcome.len(), 1);
        assert!(outcome.first().is_empty());
    }

    #[test]
    fn test_from_config_changes_keyword() {
        let config = ExtractionConfig {
            brand_keyword: "otherco".to_string(),
            ..ExtractionConfig::default()
        };
        let parser = PurchaseOrderParser::from_config(&config).unwrap();
        let text = ORDER.replace("SHAREAT", "OTHERCO");

        assert_eq!(parser.parse(&text).articles.len(), 1);
        assert_eq!(parser.parse(ORDER).articles.len(), 0);
    }

    #[test]
    fn test_short_text_warning() {
        let parser = PurchaseOrderParser::new().with_min_text_length(50);
        let result = parser.parse("PO # 1");
        assert!(result.warnings.contains(&"Only 6 characters of text".to_string()));

        let result = parser.parse(ORDER);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_parser_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PurchaseOrderParser>();
    }
}
