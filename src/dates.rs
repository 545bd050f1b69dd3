// 📅 Date Normalization - Many input spellings, one calendar date
// Failure is a value (None), never an error: callers flag the row and move on

use chrono::{NaiveDate, NaiveDateTime};

/// Date-only formats, tried in order. Month-first wins for ambiguous
/// slash dates ("01/02/2024" is January 2nd).
const DATE_FORMATS: [&str; 7] = [
    "%m/%d/%Y",  // 01/15/2024
    "%Y-%m-%d",  // 2024-02-20
    "%B %d, %Y", // March 10, 2024 / Mar 10, 2024
    "%B %d %Y",  // March 10 2024
    "%d %B %Y",  // 10 March 2024
    "%Y/%m/%d",  // 2024/03/10
    "%m-%d-%Y",  // 03-10-2024
];

/// Timestamp formats; the time part is discarded
const DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
];

/// Parse a free-form purchase date.
///
/// Returns None for empty or unrecognized input.
pub fn normalize_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date);
        }
    }

    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(datetime.date());
        }
    }

    None
}

/// ISO rendering for logs and sheets ("invalid" when unparsed)
pub fn display_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(d) => d.format("%Y-%m-%d").to_string(),
        None => "invalid".to_string(),
    }
}

// ============================================================================
// TESTS
// ============================================================================
