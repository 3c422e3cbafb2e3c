//! Per-document status entries for batch runs.

use rust_decimal::Decimal;
use serde::Serialize;

use super::record::DocumentOutcome;
use crate::order::rules::sum_amounts;

/// Status line for one processed document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentSummary {
    pub source_file: String,
    pub status: &'static str,
    pub po_number: String,
    pub vendor_name: String,
    /// The description for a single article, otherwise "<n> article(s)".
    pub articles: String,
    pub rows: usize,
    /// Sum of the rows' total values.
    pub total_value: Decimal,
    pub error: String,
}

impl DocumentSummary {
    /// Summarize a document's outcome.
    pub fn from_outcome(source_file: impl Into<String>, outcome: &DocumentOutcome) -> Self {
        let first = outcome.first();
        let articles = match outcome {
            DocumentOutcome::Extracted { first, rest } if rest.is_empty() => {
                first.article_description.clone()
            }
            DocumentOutcome::Extracted { .. } => format!("{} article(s)", outcome.len()),
            DocumentOutcome::NoArticles { .. } => "0 article(s)".to_string(),
            DocumentOutcome::Failed { .. } => String::new(),
        };

        Self {
            source_file: source_file.into(),
            status: outcome.status(),
            po_number: first.po_number.clone(),
            vendor_name: first.vendor_name.clone(),
            articles,
            rows: outcome.len(),
            total_value: sum_amounts(outcome.records().map(|r| r.total_value.as_str())),
            error: outcome.error().unwrap_or_default().to_string(),
        }
    }

    /// Column headers matching [`DocumentSummary::values`].
    pub const HEADERS: [&'static str; 8] = [
        "SOURCE FILE",
        "STATUS",
        "PO NO",
        "VENDOR NAME",
        "ARTICLES",
        "ROWS",
        "TOTAL VALUE",
        "ERROR",
    ];

    /// Cell values in header order.
    pub fn values(&self) -> [String; 8] {
        [
            self.source_file.clone(),
            self.status.to_string(),
            self.po_number.clone(),
            self.vendor_name.clone(),
            self.articles.clone(),
            self.rows.to_string(),
            self.total_value.to_string(),
            self.error.clone(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::record::{ArticleLine, DocumentContext};
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    fn line(description: &str, total: &str) -> ArticleLine {
        ArticleLine {
            description: description.to_string(),
            total_value: total.to_string(),
            ..ArticleLine::default()
        }
    }

    fn context() -> DocumentContext {
        DocumentContext {
            po_number: "4500012345".to_string(),
            vendor_name: "Shareat Foods Pvt Ltd".to_string(),
            ..DocumentContext::default()
        }
    }

    #[test]
    fn test_single_article_uses_description() {
        let outcome = DocumentOutcome::assemble(&context(), &[line("SHAREAT MIX", "255.00")]);
        let summary = DocumentSummary::from_outcome("a.pdf", &outcome);

        assert_eq!(
            summary,
            DocumentSummary {
                source_file: "a.pdf".to_string(),
                status: "extracted",
                po_number: "4500012345".to_string(),
                vendor_name: "Shareat Foods Pvt Ltd".to_string(),
                articles: "SHAREAT MIX".to_string(),
                rows: 1,
                total_value: Decimal::from_str("255.00").unwrap(),
                error: String::new(),
            }
        );
    }

    #[test]
    fn test_multiple_articles_are_counted_and_summed() {
        let outcome = DocumentOutcome::assemble(
            &context(),
            &[line("SHAREAT A", "255.00"), line("SHAREAT B", "1008.00")],
        );
        let summary = DocumentSummary::from_outcome("b.pdf", &outcome);

        assert_eq!(summary.articles, "2 article(s)");
        assert_eq!(summary.rows, 2);
        assert_eq!(summary.total_value, Decimal::from_str("1263.00").unwrap());
    }

    #[test]
    fn test_no_articles_and_failure() {
        let outcome = DocumentOutcome::assemble(&context(), &[]);
        let summary = DocumentSummary::from_outcome("c.pdf", &outcome);
        assert_eq!(summary.status, "no_articles");
        assert_eq!(summary.articles, "0 article(s)");
        assert_eq!(summary.total_value, Decimal::ZERO);

        let outcome = DocumentOutcome::failed("PDF parse error: bad xref");
        let summary = DocumentSummary::from_outcome("d.pdf", &outcome);
        assert_eq!(summary.status, "failed");
        assert_eq!(summary.po_number, "");
        assert_eq!(summary.rows, 1);
        assert_eq!(summary.error, "PDF parse error: bad xref");
        assert_eq!(summary.values()[7], "PDF parse error: bad xref");
    }
}
