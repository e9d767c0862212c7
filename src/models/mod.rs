pub mod author;
pub mod book;

pub use author::Author;
pub use book::{Book, Genre};

use chrono::NaiveDate;

/// Deserialize helper for PATCH bodies: distinguishes an absent field
/// (outer `None`) from an explicit `null` (`Some(None)`).
pub(crate) fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: serde::Deserialize<'de>,
    D: serde::Deserializer<'de>,
{
    serde::Deserialize::deserialize(de).map(Some)
}

/// Accepts plain dates (YYYY-MM-DD) or full RFC 3339 timestamps.
pub(crate) fn is_valid_date(value: &str) -> bool {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
        || chrono::DateTime::parse_from_rfc3339(value).is_ok()
}
