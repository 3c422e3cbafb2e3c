//! End-to-end tests for `process_pdf()`.
//!
//! A mock `PdfProcessor` hands back pre-built page text, so these tests run
//! without PDF fixtures.

use poex_core::error::PdfError;
use poex_core::{process_pdf, DocumentOutcome, PdfProcessor, PurchaseOrderParser};
use pretty_assertions::assert_eq;

struct MockProcessor {
    pages: Vec<String>,
    fail_load: bool,
}

impl MockProcessor {
    fn with_pages(pages: &[&str]) -> Self {
        Self {
            pages: pages.iter().map(|s| s.to_string()).collect(),
            fail_load: false,
        }
    }

    fn broken() -> Self {
        Self {
            pages: Vec::new(),
            fail_load: true,
        }
    }
}

impl PdfProcessor for MockProcessor {
    fn load(&mut self, _data: &[u8]) -> Result<(), PdfError> {
        if self.fail_load {
            return Err(PdfError::Parse("not a PDF".to_string()));
        }
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn extract_page_text(&self, page: u32) -> Result<String, PdfError> {
        self.pages
            .get(page as usize - 1)
            .cloned()
            .ok_or(PdfError::InvalidPage(page))
    }
}

const HEADER: &str = "PURCHASE ORDER\n\
    Ship To Avenue Supermarts Ltd\n\
    Kandivali DMart\n\
    Shop No 1, Link Road, Malad West\n\
    Mumbai 400064 PO # 4500012345\n\
    PO Date 01/02/2024 Delivery Dt 05.02.2024\n\
    CIN: L51900MH2000PLC126473\n\
    Vendor Shareat Foods Pvt Ltd GSTIN 27ABCDE1234F1Z5\n\
    Vendor Code: V10023";

const TABLE: &str = "Sr EAN Description UOM Qty Free Basic Disc Sch SGST CGST Cess LP MRP Total\n\
    1 8901234567801 SHAREAT BHEL MIX EA 10 0 22.00 0.00 220.00 6.60 6.60 0.00 25.50 30.00 255.00\n\
    2 8901234567802 OTHERCO NAMKEEN EA 20 0 10.00 0.00 200.00 6.00 6.00 0.00 11.00 15.00 220.00\n\
    3 8901234567803 SHAREAT FOOCHKA PANI EA 24 0 40.00 0.00 960.00 24.00 24.00 0.00 42.00 60.00 1,008.00\n\
    PURI(1KG) [HSN:19059040]";

// ---------------------------------------------------------------------------
// Multi-page order with two retained articles
// ---------------------------------------------------------------------------
#[test]
fn multi_article_order_across_pages() {
    let mut processor = MockProcessor::with_pages(&[HEADER, "", TABLE]);
    let outcome = process_pdf(b"%PDF", &mut processor, &PurchaseOrderParser::new());

    assert_eq!(outcome.status(), "extracted");
    assert_eq!(outcome.len(), 2);

    let records: Vec<_> = outcome.records().collect();
    assert_eq!(records[0].article_description, "SHAREAT BHEL MIX");
    assert_eq!(records[1].article_description, "SHAREAT FOOCHKA PANI PURI(1KG)");
    assert_eq!(records[1].total_value, "1008.00");

    for record in &records {
        assert_eq!(record.chains, "Avenue Supermarts Ltd");
        assert_eq!(
            record.site_code,
            "Kandivali DMart, Link Road, Malad West, Mumbai - 400064"
        );
        assert_eq!(record.state, "Maharashtra");
        assert_eq!(record.vendor_code, "V10023");
        assert_eq!(record.vendor_name, "Shareat Foods Pvt Ltd");
        assert_eq!(record.po_number, "4500012345");
        assert_eq!(record.po_date, "02/01/2024");
        assert_eq!(record.delivery_date, "02/05/2024");
        assert_eq!(record.sales_person, "");
        assert_eq!(record.remarks_by_so, "");
    }
}

// ---------------------------------------------------------------------------
// Unreadable document: one empty record, no panic
// ---------------------------------------------------------------------------
#[test]
fn unreadable_document_yields_empty_record() {
    let mut processor = MockProcessor::broken();
    let outcome = process_pdf(b"garbage", &mut processor, &PurchaseOrderParser::new());

    match &outcome {
        DocumentOutcome::Failed { record, error } => {
            assert!(record.is_empty());
            assert!(error.contains("not a PDF"));
        }
        other => panic!("expected failure, got {:?}", other),
    }
    assert_eq!(outcome.into_records().len(), 1);
}

// ---------------------------------------------------------------------------
// Image-only document: no text at all
// ---------------------------------------------------------------------------
#[test]
fn document_without_text_fails_softly() {
    let mut processor = MockProcessor::with_pages(&["", "  "]);
    let outcome = process_pdf(b"%PDF", &mut processor, &PurchaseOrderParser::new());

    assert_eq!(outcome.status(), "failed");
    assert_eq!(outcome.len(), 1);
    assert!(outcome.first().is_empty());
}

// ---------------------------------------------------------------------------
// Header without matching articles keeps the document fields
// ---------------------------------------------------------------------------
#[test]
fn header_only_document_keeps_context() {
    let mut processor = MockProcessor::with_pages(&[HEADER]);
    let outcome = process_pdf(b"%PDF", &mut processor, &PurchaseOrderParser::new());

    assert_eq!(outcome.status(), "no_articles");
    assert_eq!(outcome.first().po_number, "4500012345");
    assert_eq!(outcome.first().article_description, "");
    assert_eq!(outcome.first().total_pcs, "");
}

// ---------------------------------------------------------------------------
// Same pages, same records
// ---------------------------------------------------------------------------
#[test]
fn extraction_is_idempotent() {
    let parser = PurchaseOrderParser::new();
    let first = process_pdf(b"", &mut MockProcessor::with_pages(&[HEADER, TABLE]), &parser);
    let second = process_pdf(b"", &mut MockProcessor::with_pages(&[HEADER, TABLE]), &parser);
    assert_eq!(first, second);
}

// ---------------------------------------------------------------------------
// A processor that panics mid-document is contained as a failure
// ---------------------------------------------------------------------------
struct PanickingProcessor;

impl PdfProcessor for PanickingProcessor {
    fn load(&mut self, _data: &[u8]) -> Result<(), PdfError> {
        Ok(())
    }

    fn page_count(&self) -> u32 {
        1
    }

    fn extract_page_text(&self, _page: u32) -> Result<String, PdfError> {
        panic!("malformed content stream");
    }
}

#[test]
fn panicking_extraction_yields_failed_record() {
    let outcome = process_pdf(b"%PDF", &mut PanickingProcessor, &PurchaseOrderParser::new());

    assert_eq!(outcome.status(), "failed");
    assert_eq!(outcome.len(), 1);
    assert!(outcome.first().is_empty());
    let error = outcome.error().unwrap();
    assert!(error.contains("panicked"));
    assert!(error.contains("malformed content stream"));
}

// ---------------------------------------------------------------------------
// Non-ASCII digits in a GSTIN do not break the state rule
// ---------------------------------------------------------------------------
#[test]
fn devanagari_gstin_digits_leave_state_empty() {
    let mut processor =
        MockProcessor::with_pages(&["PO # 12345\nVendor Shareat Foods GSTIN २७ABCDE1234F1Z5\n"]);
    let outcome = process_pdf(b"%PDF", &mut processor, &PurchaseOrderParser::new());

    assert_eq!(outcome.status(), "no_articles");
    assert_eq!(outcome.first().po_number, "12345");
    assert_eq!(outcome.first().vendor_name, "Shareat Foods");
    assert_eq!(outcome.first().state, "");
}
