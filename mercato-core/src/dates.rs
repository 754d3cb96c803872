//! Best-effort date normalization.

use chrono::NaiveDate;

/// Formats accepted besides ISO, tried in order.
const FORMATS: &[&str] = &["%m/%d/%Y", "%d-%m-%Y"];

/// Normalize a provider-supplied date string to `YYYY-MM-DD`.
///
/// Accepts `YYYY-MM-DD`, `MM/DD/YYYY`, and `DD-MM-YYYY`. Anything else is
/// returned unchanged: callers tolerate best-effort normalization over a hard
/// failure, and an unrecognized date simply falls outside every range filter.
#[must_use]
pub fn normalize_date(raw: &str) -> String {
    let bytes = raw.as_bytes();
    if bytes.len() == 10 && bytes[4] == b'-' && bytes[7] == b'-' {
        return raw.to_string();
    }
    for fmt in FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, fmt) {
            return date.format("%Y-%m-%d").to_string();
        }
    }
    raw.to_string()
}

#[cfg(test)]
mod tests {
    use super::normalize_date;

    #[test]
    fn iso_dates_pass_through() {
        assert_eq!(normalize_date("2024-01-05"), "2024-01-05");
    }

    #[test]
    fn us_dates_are_rewritten() {
        assert_eq!(normalize_date("01/05/2024"), "2024-01-05");
        assert_eq!(normalize_date("12/31/2023"), "2023-12-31");
    }

    #[test]
    fn day_first_dates_are_rewritten() {
        assert_eq!(normalize_date("05-01-2024"), "2024-01-05");
        assert_eq!(normalize_date("31-12-2023"), "2023-12-31");
    }

    #[test]
    fn unparsable_input_is_returned_unchanged() {
        assert_eq!(normalize_date("yesterday"), "yesterday");
        assert_eq!(normalize_date("2024/01/05"), "2024/01/05");
        assert_eq!(normalize_date(""), "");
    }
}
