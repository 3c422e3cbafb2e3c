//! Document-level field rules.
//!
//! Each rule is a pure function over the assembled text returning the first
//! match in document order. Rules share no state, so their order in
//! [`DOCUMENT_RULES`] does not change the result.

use tracing::debug;

use super::dates::normalize_date;
use super::patterns::{
    CHAIN_NAME, DELIVERY_DATE, GSTIN, PO_DATE, PO_NUMBER, VENDOR_CODE, VENDOR_NAME,
    VENDOR_NAME_AFTER_PHONE,
};
use super::site::SiteExtractor;
use super::states::state_name;
use crate::models::record::DocumentContext;

/// Document-scoped fields filled by a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentField {
    Chain,
    PoNumber,
    PoDate,
    DeliveryDate,
    VendorName,
    State,
    VendorCode,
}

impl DocumentField {
    /// Output column name of the field.
    pub fn column(&self) -> &'static str {
        match self {
            Self::Chain => "CHAINS",
            Self::PoNumber => "PO NO",
            Self::PoDate => "PO DATE",
            Self::DeliveryDate => "DELIVERY DATE",
            Self::VendorName => "VENDOR NAME",
            Self::State => "STATE",
            Self::VendorCode => "VENDOR CODE",
        }
    }

    fn slot<'a>(&self, context: &'a mut DocumentContext) -> &'a mut String {
        match self {
            Self::Chain => &mut context.chain,
            Self::PoNumber => &mut context.po_number,
            Self::PoDate => &mut context.po_date,
            Self::DeliveryDate => &mut context.delivery_date,
            Self::VendorName => &mut context.vendor_name,
            Self::State => &mut context.state,
            Self::VendorCode => &mut context.vendor_code,
        }
    }
}

/// A document rule: text in, first matching value out.
pub type DocumentRule = fn(&str) -> Option<String>;

/// The static document rules. The site summary is configurable and lives in
/// [`SiteExtractor`].
pub const DOCUMENT_RULES: &[(DocumentField, DocumentRule)] = &[
    (DocumentField::Chain, chain_name),
    (DocumentField::PoNumber, po_number),
    (DocumentField::PoDate, po_date),
    (DocumentField::DeliveryDate, delivery_date),
    (DocumentField::VendorName, vendor_name),
    (DocumentField::State, state),
    (DocumentField::VendorCode, vendor_code),
];

/// Build the document context from assembled text.
pub fn extract_context(text: &str, site: &SiteExtractor) -> DocumentContext {
    let mut context = DocumentContext {
        site_code: site.extract(text),
        ..DocumentContext::default()
    };

    for (field, rule) in DOCUMENT_RULES {
        match rule(text) {
            Some(value) => {
                debug!("{}: {:?}", field.column(), value);
                *field.slot(&mut context) = value;
            }
            None => debug!("{}: no match", field.column()),
        }
    }

    context
}

/// Company name after "Ship To", ending in "Ltd".
pub fn chain_name(text: &str) -> Option<String> {
    CHAIN_NAME.captures(text).map(|c| c[1].trim().to_string())
}

/// Digits after "PO #".
pub fn po_number(text: &str) -> Option<String> {
    PO_NUMBER.captures(text).map(|c| c[1].to_string())
}

/// "PO Date" as MM/DD/YYYY.
pub fn po_date(text: &str) -> Option<String> {
    PO_DATE.captures(text).map(|c| normalize_date(&c[1]))
}

/// "Delivery Dt" as MM/DD/YYYY.
pub fn delivery_date(text: &str) -> Option<String> {
    DELIVERY_DATE.captures(text).map(|c| normalize_date(&c[1]))
}

/// Vendor name, ending at GSTIN/Phone/FSSAI/Email.
///
/// Falls back to the "Phone Vendor <name>" layout only when the primary
/// pattern matches nowhere.
pub fn vendor_name(text: &str) -> Option<String> {
    VENDOR_NAME
        .captures(text)
        .or_else(|| VENDOR_NAME_AFTER_PHONE.captures(text))
        .map(|c| c[1].trim().to_string())
}

/// State name from the first GSTIN's two-digit prefix.
///
/// An unmapped code leaves the field empty.
pub fn state(text: &str) -> Option<String> {
    let caps = GSTIN.captures(text)?;
    let code: String = caps[1].chars().take(2).collect();
    let name = state_name(&code);
    (!name.is_empty()).then(|| name.to_string())
}

/// Explicitly labelled vendor code. The GSTIN is never used in its place.
pub fn vendor_code(text: &str) -> Option<String> {
    VENDOR_CODE.captures(text).map(|c| c[1].trim().to_string())
}
