//! Purchase-order output records.
//!
//! A [`PoRecord`] is one output row. Every record carries the same twenty
//! columns in the same order; a field no rule filled is the empty string.

use serde::Serialize;

/// Output column headers, in record order.
pub const COLUMNS: [&str; 20] = [
    "CHAINS",
    "SITE CODE",
    "STATE",
    "VENDOR CODE",
    "VENDOR NAME",
    "SALES PERSON",
    "PO NO",
    "PO DATE",
    "DELIVERY DATE",
    "ARTICLE DESCRIPTION",
    "TOTAL PCS",
    "BASIC PRICE WITHOUT TAX",
    "TOTAL BASIC PO VALUE WITHOUT TAX",
    "REMARKS",
    "GRN AMOUNT",
    "PRICE/PCS",
    "ACTUAL BILLING PRICE",
    "BILLING PRICE OF RELIANCE",
    "PRICE DIFFERENCE",
    "REMARKS BY SO",
];

/// One row of extracted purchase-order data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PoRecord {
    #[serde(rename = "CHAINS")]
    pub chains: String,
    #[serde(rename = "SITE CODE")]
    pub site_code: String,
    #[serde(rename = "STATE")]
    pub state: String,
    #[serde(rename = "VENDOR CODE")]
    pub vendor_code: String,
    #[serde(rename = "VENDOR NAME")]
    pub vendor_name: String,
    #[serde(rename = "SALES PERSON")]
    pub sales_person: String,
    #[serde(rename = "PO NO")]
    pub po_number: String,
    #[serde(rename = "PO DATE")]
    pub po_date: String,
    #[serde(rename = "DELIVERY DATE")]
    pub delivery_date: String,
    #[serde(rename = "ARTICLE DESCRIPTION")]
    pub article_description: String,
    #[serde(rename = "TOTAL PCS")]
    pub total_pcs: String,
    #[serde(rename = "BASIC PRICE WITHOUT TAX")]
    pub basic_price: String,
    #[serde(rename = "TOTAL BASIC PO VALUE WITHOUT TAX")]
    pub total_value: String,
    #[serde(rename = "REMARKS")]
    pub remarks: String,
    #[serde(rename = "GRN AMOUNT")]
    pub grn_amount: String,
    #[serde(rename = "PRICE/PCS")]
    pub price_per_pcs: String,
    #[serde(rename = "ACTUAL BILLING PRICE")]
    pub actual_billing_price: String,
    #[serde(rename = "BILLING PRICE OF RELIANCE")]
    pub reliance_billing_price: String,
    #[serde(rename = "PRICE DIFFERENCE")]
    pub price_difference: String,
    #[serde(rename = "REMARKS BY SO")]
    pub remarks_by_so: String,
}

impl PoRecord {
    /// A record with every column empty.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A record holding the document-scoped fields and empty article fields.
    pub fn from_context(context: &DocumentContext) -> Self {
        Self {
            chains: context.chain.clone(),
            site_code: context.site_code.clone(),
            state: context.state.clone(),
            vendor_code: context.vendor_code.clone(),
            vendor_name: context.vendor_name.clone(),
            po_number: context.po_number.clone(),
            po_date: context.po_date.clone(),
            delivery_date: context.delivery_date.clone(),
            ..Self::default()
        }
    }

    /// Overlay the article-specific columns from a parsed line.
    pub fn with_article(mut self, line: &ArticleLine) -> Self {
        self.article_description = line.description.clone();
        self.total_pcs = line.quantity.clone();
        self.basic_price = line.unit_price.clone();
        self.total_value = line.total_value.clone();
        self
    }

    /// Cell values in [`COLUMNS`] order.
    pub fn values(&self) -> [&str; 20] {
        [
            &self.chains,
            &self.site_code,
            &self.state,
            &self.vendor_code,
            &self.vendor_name,
            &self.sales_person,
            &self.po_number,
            &self.po_date,
            &self.delivery_date,
            &self.article_description,
            &self.total_pcs,
            &self.basic_price,
            &self.total_value,
            &self.remarks,
            &self.grn_amount,
            &self.price_per_pcs,
            &self.actual_billing_price,
            &self.reliance_billing_price,
            &self.price_difference,
            &self.remarks_by_so,
        ]
    }

    /// Check if every column is empty.
    pub fn is_empty(&self) -> bool {
        self.values().iter().all(|v| v.is_empty())
    }
}

/// Document-scoped fields shared by every record from one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DocumentContext {
    /// Retail chain (company name after "Ship To").
    pub chain: String,
    /// Ship-to address summary.
    pub site_code: String,
    /// State name resolved from the first GSTIN.
    pub state: String,
    /// Explicitly labelled vendor code.
    pub vendor_code: String,
    /// Vendor name.
    pub vendor_name: String,
    /// PO number.
    pub po_number: String,
    /// PO date as MM/DD/YYYY.
    pub po_date: String,
    /// Delivery date as MM/DD/YYYY.
    pub delivery_date: String,
}

/// A single article line recovered from the item table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ArticleLine {
    /// EAN-13 anchor code (matching only, not written to records).
    pub ean: String,
    /// Cleaned product description.
    pub description: String,
    /// Unit of measure column.
    pub uom: String,
    /// Ordered quantity.
    pub quantity: String,
    /// Per-unit price (landing price in the table layout).
    pub unit_price: String,
    /// Line total with thousands separators removed.
    pub total_value: String,
}

/// Records produced for one document.
///
/// Every variant holds at least one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DocumentOutcome {
    /// One record per retained article line.
    Extracted { first: PoRecord, rest: Vec<PoRecord> },
    /// No article line matched or passed the brand filter.
    NoArticles { record: PoRecord },
    /// The document could not be read; the record is fully empty.
    Failed { record: PoRecord, error: String },
}

impl DocumentOutcome {
    /// Assemble records from a document context and its retained lines.
    pub fn assemble(context: &DocumentContext, lines: &[ArticleLine]) -> Self {
        let mut records = lines
            .iter()
            .map(|line| PoRecord::from_context(context).with_article(line));

        match records.next() {
            Some(first) => Self::Extracted {
                first,
                rest: records.collect(),
            },
            None => Self::NoArticles {
                record: PoRecord::from_context(context),
            },
        }
    }

    /// Outcome for a document that failed before extraction.
    pub fn failed(error: impl Into<String>) -> Self {
        Self::Failed {
            record: PoRecord::empty(),
            error: error.into(),
        }
    }

    /// First record (always present).
    pub fn first(&self) -> &PoRecord {
        match self {
            Self::Extracted { first, .. } => first,
            Self::NoArticles { record } | Self::Failed { record, .. } => record,
        }
    }

    /// Iterate over the records in output order.
    pub fn records(&self) -> impl Iterator<Item = &PoRecord> {
        let rest: &[PoRecord] = match self {
            Self::Extracted { rest, .. } => rest,
            _ => &[],
        };
        std::iter::once(self.first()).chain(rest.iter())
    }

    /// Consume the outcome into its records.
    pub fn into_records(self) -> Vec<PoRecord> {
        match self {
            Self::Extracted { first, mut rest } => {
                rest.insert(0, first);
                rest
            }
            Self::NoArticles { record } | Self::Failed { record, .. } => vec![record],
        }
    }

    /// Number of records; never zero.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        match self {
            Self::Extracted { rest, .. } => rest.len() + 1,
            _ => 1,
        }
    }

    /// Short status label.
    pub fn status(&self) -> &'static str {
        match self {
            Self::Extracted { .. } => "extracted",
            Self::NoArticles { .. } => "no_articles",
            Self::Failed { .. } => "failed",
        }
    }

    /// Error text for a failed document.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed { error, .. } => Some(error),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn context() -> DocumentContext {
        DocumentContext {
            chain: "Avenue Supermarts Ltd".to_string(),
            po_number: "12345".to_string(),
            ..DocumentContext::default()
        }
    }

    fn line(description: &str) -> ArticleLine {
        ArticleLine {
            ean: "1234567890123".to_string(),
            description: description.to_string(),
            uom: "EA".to_string(),
            quantity: "10".to_string(),
            unit_price: "25.50".to_string(),
            total_value: "255.00".to_string(),
        }
    }

    #[test]
    fn test_values_follow_column_order() {
        let record = PoRecord {
            chains: "A".to_string(),
            remarks_by_so: "Z".to_string(),
            ..PoRecord::default()
        };
        let values = record.values();
        assert_eq!(values.len(), COLUMNS.len());
        assert_eq!(values[0], "A");
        assert_eq!(values[19], "Z");
    }

    #[test]
    fn test_json_keys_match_columns() {
        let json = serde_json::to_value(PoRecord::empty()).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), COLUMNS.len());
        for column in COLUMNS {
            assert_eq!(object.get(column), Some(&serde_json::Value::String(String::new())));
        }
    }

    #[test]
    fn test_assemble_copies_context_per_line() {
        let outcome = DocumentOutcome::assemble(&context(), &[line("SHAREAT A"), line("SHAREAT B")]);
        assert_eq!(outcome.status(), "extracted");
        assert_eq!(outcome.len(), 2);

        let mut records = outcome.into_records();
        records[0].po_number.push_str("-changed");
        assert_eq!(records[1].po_number, "12345");
        assert_eq!(records[1].article_description, "SHAREAT B");
        assert_eq!(records[0].basic_price, "25.50");
    }

    #[test]
    fn test_assemble_without_lines_keeps_context() {
        let outcome = DocumentOutcome::assemble(&context(), &[]);
        assert_eq!(outcome.status(), "no_articles");
        assert_eq!(outcome.len(), 1);
        assert_eq!(outcome.first().po_number, "12345");
        assert!(outcome.first().article_description.is_empty());
    }

    #[test]
    fn test_failed_outcome_is_single_empty_record() {
        let outcome = DocumentOutcome::failed("broken xref");
        assert_eq!(outcome.records().count(), 1);
        assert!(outcome.first().is_empty());
        assert_eq!(outcome.error(), Some("broken xref"));
    }
}
