//! Purchase-order field extraction module.

mod parser;
pub mod rules;

pub use parser::{ExtractionResult, OrderParser, PurchaseOrderParser};

/// Identifier of the canonical rule table: keyword-filtered, one record per
/// retained article line.
pub const RULES_VERSION: &str = "po-rules/2-multiline";
