//! Lenient parsing for the date columns, which arrive as plain strings.

use chrono::NaiveDate;

/// Parses a `YYYY-MM-DD` date, also accepting a timestamp that starts with one
/// (e.g. `2024-03-01T12:00:00+00:00`). Returns `None` for anything else.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let day = raw.get(..10)?;
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

/// The `YYYY-MM` month a date string falls in, if it parses.
pub fn month_key(raw: &str) -> Option<String> {
    parse_date(raw).map(|date| date.format("%Y-%m").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_dates() {
        assert_eq!(
            parse_date("2024-03-01"),
            NaiveDate::from_ymd_opt(2024, 3, 1)
        );
    }

    #[test]
    fn parses_timestamp_prefix() {
        assert_eq!(
            parse_date("2024-01-15T08:30:00+00:00"),
            NaiveDate::from_ymd_opt(2024, 1, 15)
        );
    }

    #[test]
    fn rejects_malformed_dates() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("2024-13-01"), None);
        assert_eq!(parse_date("03/01/2024"), None);
        assert_eq!(parse_date("soon"), None);
    }

    #[test]
    fn month_key_truncates_to_month() {
        assert_eq!(month_key("2024-03-01").as_deref(), Some("2024-03"));
        assert_eq!(month_key("2023-12-31T23:59:59Z").as_deref(), Some("2023-12"));
        assert_eq!(month_key("not a date"), None);
    }
}
