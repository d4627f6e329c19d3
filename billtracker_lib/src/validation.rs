use chrono::NaiveDate;

use crate::error::BillTrackerError;

pub const MAX_SEARCH_LENGTH: usize = 100;
pub const MAX_COMMITTEE_LENGTH: usize = 120;
pub const MAX_SPONSOR_LENGTH: usize = 100;
pub const MAX_PAGES: usize = 50;

/// Strip ASCII control characters (0x00-0x1F except space 0x20), trim whitespace,
/// and enforce a byte-length limit.
pub fn sanitize_text(input: &str, max_len: usize) -> Result<String, BillTrackerError> {
    if input.len() > max_len {
        return Err(BillTrackerError::InvalidInput(format!(
            "input exceeds maximum length of {} bytes",
            max_len
        )));
    }
    let sanitized: String = input
        .chars()
        .filter(|c| !c.is_ascii_control() || *c == ' ')
        .collect::<String>()
        .trim()
        .to_string();
    if sanitized.is_empty() {
        return Err(BillTrackerError::InvalidInput(
            "input is empty after sanitization".to_string(),
        ));
    }
    Ok(sanitized)
}

/// Validate a search string matched against bill numbers and titles.
pub fn validate_search(input: &str) -> Result<String, BillTrackerError> {
    sanitize_text(input, MAX_SEARCH_LENGTH)
}

/// Validate a committee name. Committee names are matched exactly, so case is kept.
pub fn validate_committee(input: &str) -> Result<String, BillTrackerError> {
    sanitize_text(input, MAX_COMMITTEE_LENGTH).map_err(|e| match e {
        BillTrackerError::InvalidInput(msg) => {
            BillTrackerError::InvalidInput(format!("committee {}", msg))
        }
        other => other,
    })
}

/// Validate a sponsor name.
pub fn validate_sponsor(input: &str) -> Result<String, BillTrackerError> {
    sanitize_text(input, MAX_SPONSOR_LENGTH)
}

/// Validate a status filter. Accepts any non-empty label; casing is kept.
pub fn validate_status(input: &str) -> Result<String, BillTrackerError> {
    sanitize_text(input, MAX_SEARCH_LENGTH)
}

/// Validate a YYYY-MM month key, returning it normalized with a zero-padded month.
pub fn validate_month(input: &str) -> Result<String, BillTrackerError> {
    let trimmed = input.trim();
    NaiveDate::parse_from_str(&format!("{}-01", trimmed), "%Y-%m-%d")
        .ok()
        .filter(|_| trimmed.len() <= 7)
        .map(|date| date.format("%Y-%m").to_string())
        .ok_or_else(|| {
            BillTrackerError::InvalidInput(format!(
                "invalid month '{}'. Expected format: YYYY-MM (e.g., 2024-03)",
                trimmed
            ))
        })
}

/// Validate the number of pages to load (must be 1..=MAX_PAGES).
pub fn validate_pages(pages: usize) -> Result<usize, BillTrackerError> {
    if !(1..=MAX_PAGES).contains(&pages) {
        return Err(BillTrackerError::InvalidInput(format!(
            "pages must be between 1 and {}, got {}",
            MAX_PAGES, pages
        )));
    }
    Ok(pages)
}

/// Validate a bill or rollcall identifier (must be >= 1).
pub fn validate_id(kind: &str, id: i64) -> Result<i64, BillTrackerError> {
    if id < 1 {
        return Err(BillTrackerError::InvalidInput(format!(
            "{} id must be >= 1, got {}",
            kind, id
        )));
    }
    Ok(id)
}
