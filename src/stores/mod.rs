//! Stores - persistence operations for each entity type
//!
//! Each store owns a database handle and is constructed once at startup;
//! BookStore additionally holds the AuthorStore it checks references against.

pub mod author;
pub mod book;

pub use author::AuthorStore;
pub use book::BookStore;

/// LIKE pattern for a literal, case-insensitive substring match.
/// `%` and `_` in the search term are escaped so they match themselves.
pub(crate) fn substring_pattern(q: &str) -> sea_orm::sea_query::LikeExpr {
    let escaped = q
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    sea_orm::sea_query::LikeExpr::new(format!("%{}%", escaped)).escape('\\')
}
