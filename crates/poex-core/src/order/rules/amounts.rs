//! Amount parsing for purchase-order values.

use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse an amount with optional thousands separators.
///
/// Accepts both Western (`12,345.00`) and Indian (`1,23,456.50`) grouping;
/// commas are always grouping, the period is always the decimal point.
pub fn parse_amount(s: &str) -> Option<Decimal> {
    let cleaned: String = s
        .trim()
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    Decimal::from_str(&cleaned).ok()
}

/// Sum every parseable amount, skipping empty or malformed cells.
pub fn sum_amounts<'a>(values: impl IntoIterator<Item = &'a str>) -> Decimal {
    values.into_iter().filter_map(parse_amount).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("255.00"), Some(Decimal::from_str("255.00").unwrap()));
        assert_eq!(parse_amount("12,345.00"), Some(Decimal::from_str("12345.00").unwrap()));
        assert_eq!(parse_amount("1,23,456.50"), Some(Decimal::from_str("123456.50").unwrap()));
        assert_eq!(parse_amount("10"), Some(Decimal::from(10)));
    }

    #[test]
    fn test_parse_amount_keeps_scale() {
        assert_eq!(parse_amount("25.50").unwrap().to_string(), "25.50");
    }

    #[test]
    fn test_parse_amount_rejects_garbage() {
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("  "), None);
        assert_eq!(parse_amount("N/A"), None);
        assert_eq!(parse_amount("1.2.3"), None);
    }

    #[test]
    fn test_sum_amounts_skips_empty() {
        let total = sum_amounts(["255.00", "", "1,000.50", "bad"]);
        assert_eq!(total, Decimal::from_str("1255.50").unwrap());
    }
}
