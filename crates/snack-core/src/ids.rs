//! ID prefix constants.
//!
//! IDs are generated by the database as `{prefix}-{8 hex chars}`, e.g. `snk-a3f8b2c1`.

pub const PREFIX_SNACK: &str = "snk";
pub const PREFIX_TYPE: &str = "typ";
pub const PREFIX_FLAVOR: &str = "flv";
pub const PREFIX_KEYWORD: &str = "kwd";
pub const PREFIX_REVIEW: &str = "rev";

/// Every prefix in use, for exhaustive ID format tests.
pub const ALL_PREFIXES: &[&str] = &[
    PREFIX_SNACK,
    PREFIX_TYPE,
    PREFIX_FLAVOR,
    PREFIX_KEYWORD,
    PREFIX_REVIEW,
];
