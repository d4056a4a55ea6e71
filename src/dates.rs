//! Free-text date normalization.
//!
//! Operators enter dates by hand, and historical records carry several
//! regional formats. Input is tried against a fixed format list and
//! rewritten to ISO `YYYY-MM-DD` on the first match. Text that matches no
//! format passes through trimmed but otherwise unchanged — the database
//! rejects it at insert time under lenient handling, or validation rejects
//! it up front under strict handling.

use chrono::NaiveDate;

/// Accepted input formats, tried in order. ISO first so canonical input is
/// idempotent; day-first formats before month-first, so `01/02/2025` reads
/// as the 1st of February.
const INPUT_FORMATS: [&str; 4] = ["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y", "%m/%d/%Y"];

/// How unparseable date text is handled at the store boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateParsing {
    /// Pass the trimmed text through to the database; a garbage value
    /// surfaces as a storage error from Postgres.
    #[default]
    Lenient,
    /// Require a valid calendar date before any SQL runs; a garbage value
    /// is a validation error.
    Strict,
}

/// Normalize a free-text date to canonical `YYYY-MM-DD`.
///
/// Empty or whitespace-only input yields `None`. Unparseable input yields
/// the trimmed original (see [`DateParsing`] for how the store treats it).
pub fn normalize_date(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    for fmt in INPUT_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Some(date.format("%Y-%m-%d").to_string());
        }
    }
    Some(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iso_input_is_idempotent() {
        assert_eq!(normalize_date("2025-08-30").as_deref(), Some("2025-08-30"));
    }

    #[test]
    fn day_first_slash_format() {
        assert_eq!(normalize_date("30/08/2025").as_deref(), Some("2025-08-30"));
    }

    #[test]
    fn day_first_dash_format() {
        assert_eq!(normalize_date("30-08-2025").as_deref(), Some("2025-08-30"));
    }

    #[test]
    fn month_first_only_when_day_first_fails() {
        // Day slot of 30 rules out DD/MM, so this reads as August 30th.
        assert_eq!(normalize_date("08/30/2025").as_deref(), Some("2025-08-30"));
        // Ambiguous input resolves day-first.
        assert_eq!(normalize_date("01/02/2025").as_deref(), Some("2025-02-01"));
    }

    #[test]
    fn unparseable_text_passes_through_trimmed() {
        assert_eq!(normalize_date("not-a-date").as_deref(), Some("not-a-date"));
        assert_eq!(normalize_date("  not-a-date ").as_deref(), Some("not-a-date"));
    }

    #[test]
    fn empty_input_yields_none() {
        assert_eq!(normalize_date(""), None);
        assert_eq!(normalize_date("   "), None);
    }
}
