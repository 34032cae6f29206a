//! Row parsing and SQL-building helpers shared by the repos.
//!
//! Every repo converts `libsql::Row` (column-indexed) into typed structs and
//! builds `IN (...)` lists for batched lookups. These helpers isolate that,
//! plus the dual datetime format issue (`SQLite`'s `datetime('now')` vs
//! Rust's `to_rfc3339()`).

use chrono::{DateTime, Utc};
use snack_core::enums::TagDimension;

use crate::error::DatabaseError;

/// Largest id batch bound into a single `IN (...)` list.
pub const MAX_IN_LIST: usize = 500;

/// Parse a required TEXT column as `DateTime<Utc>`.
///
/// Handles both RFC 3339 (`"2026-02-09T14:30:00+00:00"`) and `SQLite`'s default
/// format (`"2026-02-09 14:30:00"`).
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string cannot be parsed as either format.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, DatabaseError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|e| DatabaseError::Query(format!("Failed to parse datetime '{s}': {e}")))
}

/// Read a nullable TEXT column. Returns `None` for both SQL NULL and empty string.
///
/// `row.get::<String>(idx)` on a NULL column returns an error, not `""`.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_opt_string(row: &libsql::Row, idx: i32) -> Result<Option<String>, DatabaseError> {
    match row.get::<Option<String>>(idx)? {
        Some(s) if s.is_empty() => Ok(None),
        other => Ok(other),
    }
}

/// Read an INTEGER column as a non-negative count.
///
/// # Errors
///
/// Returns `DatabaseError::InvalidState` for negative values.
pub fn get_count(row: &libsql::Row, idx: i32) -> Result<u64, DatabaseError> {
    let raw = row.get::<i64>(idx)?;
    u64::try_from(raw).map_err(|_| DatabaseError::InvalidState(format!("negative count {raw}")))
}

/// Numbered placeholders `?{start}, ?{start+1}, ...` for `count` params.
#[must_use]
pub fn placeholders(start: usize, count: usize) -> String {
    (start..start + count)
        .map(|i| format!("?{i}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Bind a list of text ids as positional params.
#[must_use]
pub fn text_params(values: &[String]) -> Vec<libsql::Value> {
    values.iter().map(|v| v.as_str().into()).collect()
}

/// Substring `LIKE` pattern with `\`, `%`, and `_` escaped.
///
/// Pair with `ESCAPE '\'` in the SQL.
#[must_use]
pub fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Map a tag dimension to its master table.
///
/// Exhaustive match: adding a dimension forces updating this.
#[must_use]
pub const fn dimension_table(dimension: TagDimension) -> &'static str {
    match dimension {
        TagDimension::Type => "snack_types",
        TagDimension::Flavor => "snack_flavors",
        TagDimension::Keyword => "snack_keywords",
    }
}

/// Extra predicate applied when looking up names in a master table.
///
/// Inactive keywords do not exist as far as search is concerned.
#[must_use]
pub const fn dimension_filter(dimension: TagDimension) -> &'static str {
    match dimension {
        TagDimension::Keyword => "AND is_active = 1",
        TagDimension::Type | TagDimension::Flavor => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn parses_both_datetime_formats() {
        let a = parse_datetime("2026-02-09T14:30:00+00:00").unwrap();
        let b = parse_datetime("2026-02-09 14:30:00").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn rejects_garbage_datetime() {
        assert!(matches!(
            parse_datetime("yesterday"),
            Err(DatabaseError::Query(_))
        ));
    }

    #[test]
    fn placeholders_are_numbered_from_start() {
        assert_eq!(placeholders(1, 3), "?1, ?2, ?3");
        assert_eq!(placeholders(4, 2), "?4, ?5");
        assert_eq!(placeholders(1, 0), "");
    }

    #[rstest]
    #[case("오레오", "%오레오%")]
    #[case("50%", "%50\\%%")]
    #[case("a_b", "%a\\_b%")]
    #[case("c:\\x", "%c:\\\\x%")]
    fn contains_pattern_escapes_wildcards(#[case] needle: &str, #[case] expected: &str) {
        assert_eq!(contains_pattern(needle), expected);
    }

    #[test]
    fn keyword_dimension_filters_inactive() {
        assert_eq!(dimension_table(TagDimension::Keyword), "snack_keywords");
        assert!(dimension_filter(TagDimension::Keyword).contains("is_active"));
        assert!(dimension_filter(TagDimension::Flavor).is_empty());
    }
}
