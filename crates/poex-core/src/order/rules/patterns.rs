//! Common regex patterns for purchase-order extraction.
//!
//! The `regex` crate has no lookaround, so every rule that needs to stop
//! before a terminator either consumes the terminator after the capture or
//! is scanned by hand (see `site`).

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Ship-to block
    pub static ref CHAIN_NAME: Regex = Regex::new(
        r"Ship To\s+([\w\s]+Ltd\.?)"
    ).unwrap();

    pub static ref SHIP_TO_BLOCK: Regex = Regex::new(
        r"(?s)Ship To\s+(.*?)CIN:"
    ).unwrap();

    pub static ref SITE_PO_NUMBER: Regex = Regex::new(
        r"PO\s*#\s*\d+"
    ).unwrap();

    pub static ref SITE_PO_DATE: Regex = Regex::new(
        r"PO\s*Date\s*[\d./\-]+"
    ).unwrap();

    pub static ref SITE_DELIVERY: Regex = Regex::new(
        r"Delivery\s*Dt?\s*[\d./\-]+"
    ).unwrap();

    pub static ref CITY_PIN: Regex = Regex::new(
        r"([A-Z][a-z]+)\s+(\d{6})"
    ).unwrap();

    // Anchored at a candidate fragment end: " City 400064"
    pub static ref CITY_PIN_AHEAD: Regex = Regex::new(
        r"^\s+[A-Z][a-z]+\s+\d{6}"
    ).unwrap();

    pub static ref REPEATED_COMMA: Regex = Regex::new(
        r",\s*,"
    ).unwrap();

    // Header fields. Digit classes are ASCII-only: captured codes are
    // sliced and parsed downstream.
    pub static ref PO_NUMBER: Regex = Regex::new(
        r"PO\s*#\s*([0-9]+)"
    ).unwrap();

    pub static ref PO_DATE: Regex = Regex::new(
        r"PO\s*Date\s*([0-9]{2}[./\-][0-9]{2}[./\-][0-9]{4})"
    ).unwrap();

    pub static ref DELIVERY_DATE: Regex = Regex::new(
        r"Delivery\s*Dt?\s*([0-9]{2}[./\-][0-9]{2}[./\-][0-9]{4})"
    ).unwrap();

    // Vendor
    pub static ref VENDOR_NAME: Regex = Regex::new(
        r"Vendor\s+([\w\s]+?)(?:\s+GSTIN|\s+Phone|\s+FSSAI|Email)"
    ).unwrap();

    pub static ref VENDOR_NAME_AFTER_PHONE: Regex = Regex::new(
        r"Phone\s+Vendor\s+([\w\s]+?)(?:\s+GSTIN|Email|\n)"
    ).unwrap();

    pub static ref VENDOR_CODE: Regex = Regex::new(
        r"(?i)Vendor\s*Code\s*[:\s]*([A-Za-z0-9\-]+)"
    ).unwrap();

    pub static ref GSTIN: Regex = Regex::new(
        r"GSTIN[:\s]*([0-9]{2}[A-Z0-9]+)"
    ).unwrap();

    // Article table row:
    // EAN, description, UOM, qty, free, basic price, discount, schedule value,
    // SGST, CGST, cess, landing price, MRP, total value.
    // The UOM must be a whole word followed by a quantity, so the "KG" of a
    // "(1KG)" weight inside the description never ends it.
    pub static ref ARTICLE_LINE: Regex = Regex::new(concat!(
        r"(\d{13})\s+",
        r"([\w\s()\-/]+?)\s*",
        r"\b(EA|PC|KG|LT|MT)\s+",
        r"(\d+)\s+",
        r"\d+\s+",
        r"[\d.]+\s+",
        r"[\d.]+\s+",
        r"[\d.]+\s+",
        r"[\d.]+\s+",
        r"[\d.]+\s+",
        r"[\d.]+\s+",
        r"([\d.]+)\s+",
        r"[\d.]+\s+",
        r"([\d,]+\.?\d*)",
    )).unwrap();

    // Weight wrapped onto the next line: "PURI(1KG)", "PANIPURI(200G)"
    pub static ref ARTICLE_CONTINUATION: Regex = Regex::new(
        r"(?i)\n\s*([A-Za-z]*\s*\(\d+(?:\.\d+)?\s*(?:KG|G|ML|LT)\))"
    ).unwrap();

    // Older single-article layout
    pub static ref FALLBACK_DESCRIPTION: Regex = Regex::new(
        r"(\d{13})\s+([\w\s()\-/]+?)(?:\s*\[HSN|\s+EA\s+|\s+PC\s+|\s+KG\s+)"
    ).unwrap();

    pub static ref FALLBACK_QUANTITY: Regex = Regex::new(
        r"\b(EA|PC|KG|LT|MT)\s+(\d+)\s+\d+\s+([\d.]+)"
    ).unwrap();

    pub static ref FALLBACK_TOTAL: Regex = Regex::new(
        r"Total\s+(\d+)\s+([\d,]+\.?\d*)"
    ).unwrap();

    // Description cleanup
    pub static ref HSN_ANNOTATION: Regex = Regex::new(
        r"\[HSN.*?\]"
    ).unwrap();

    pub static ref WHITESPACE: Regex = Regex::new(
        r"\s+"
    ).unwrap();
}
