//! Application state containing the stores and shared resources

use sea_orm::DatabaseConnection;

use crate::stores::{AuthorStore, BookStore};

/// Application state shared across all handlers.
/// Stores are constructed explicitly at startup; BookStore takes the
/// AuthorStore it depends on for the referential check.
#[derive(Clone)]
pub struct AppState {
    pub authors: AuthorStore,
    pub books: BookStore,
}

impl AppState {
    pub fn new(db: DatabaseConnection) -> Self {
        let authors = AuthorStore::new(db.clone());
        let books = BookStore::new(db, authors.clone());

        Self { authors, books }
    }
}
