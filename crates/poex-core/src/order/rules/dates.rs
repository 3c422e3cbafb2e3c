//! Date normalization for purchase orders.
//!
//! POs print dates day-first (`dd/mm/yyyy`, `dd-mm-yyyy`, `dd.mm.yyyy`);
//! records carry them as `MM/DD/YYYY`.

use chrono::NaiveDate;

/// Output format for normalized dates.
pub const OUTPUT_FORMAT: &str = "%m/%d/%Y";

/// Render a day-first date token as `MM/DD/YYYY`.
///
/// Best effort: a token that is not exactly three numeric parts forming a
/// real calendar date comes back unchanged.
pub fn normalize_date(token: &str) -> String {
    if token.is_empty() {
        return String::new();
    }

    parse_day_first(token)
        .map(|date| date.format(OUTPUT_FORMAT).to_string())
        .unwrap_or_else(|| token.to_string())
}

/// Parse a day-first date with `/`, `-` or `.` separators.
pub fn parse_day_first(token: &str) -> Option<NaiveDate> {
    let normalized = token.replace(['.', '-'], "/");
    let parts: Vec<&str> = normalized.split('/').collect();
    if parts.len() != 3 {
        return None;
    }

    let day: u32 = parts[0].trim().parse().ok()?;
    let month: u32 = parts[1].trim().parse().ok()?;
    let year: i32 = parts[2].trim().parse().ok()?;
    if !(1..=9999).contains(&year) {
        return None;
    }

    NaiveDate::from_ymd_opt(year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_all_separators() {
        assert_eq!(normalize_date("01/02/2024"), "02/01/2024");
        assert_eq!(normalize_date("05-02-2024"), "02/05/2024");
        assert_eq!(normalize_date("05.02.2024"), "02/05/2024");
        assert_eq!(normalize_date("31.12.2023"), "12/31/2023");
    }

    #[test]
    fn test_single_digit_parts_are_padded() {
        assert_eq!(normalize_date("5/2/2024"), "02/05/2024");
    }

    #[test]
    fn test_leap_day() {
        assert_eq!(normalize_date("29/02/2024"), "02/29/2024");
        assert_eq!(normalize_date("29/02/2023"), "29/02/2023");
    }

    #[test]
    fn test_invalid_dates_pass_through() {
        for token in ["30/02/2024", "01/13/2024", "00/01/2024", "01/02", "01/02/2024/5", "aa/bb/cccc", "2024"] {
            assert_eq!(normalize_date(token), token);
        }
    }

    #[test]
    fn test_empty_token() {
        assert_eq!(normalize_date(""), "");
    }

    #[test]
    fn test_parse_day_first() {
        assert_eq!(parse_day_first("15.01.2024"), NaiveDate::from_ymd_opt(2024, 1, 15));
        assert_eq!(parse_day_first("15.01.0000"), None);
    }
}
