//! Dialect-aware identifier quoting.
//!
//! The model keeps dialects as free-form strings (an object may carry any
//! dialect tag or none at all); only identifier quoting needs to know the
//! concrete vendor conventions. Unrecognized dialects quote nothing.

use std::borrow::Cow;

/// Quotes an identifier according to the given SQL dialect.
///
/// - `postgresql` / `oracle`: double quotes
/// - `mysql` / `mariadb`: backticks
/// - `sqlserver`: square brackets
/// - anything else (or no dialect): returned unchanged
///
/// Dialect matching is case-insensitive. Empty identifiers pass through
/// untouched.
pub fn quote_identifier<'a>(identifier: &'a str, dialect: Option<&str>) -> Cow<'a, str> {
    if identifier.is_empty() {
        return Cow::Borrowed(identifier);
    }

    match dialect.map(str::to_lowercase).as_deref() {
        Some("postgresql") | Some("oracle") => Cow::Owned(format!("\"{}\"", identifier)),
        Some("mysql") | Some("mariadb") => Cow::Owned(format!("`{}`", identifier)),
        Some("sqlserver") => Cow::Owned(format!("[{}]", identifier)),
        _ => Cow::Borrowed(identifier),
    }
}
