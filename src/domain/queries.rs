//! Shared query and pagination types for store listings

use serde::Serialize;

use crate::models::book::Genre;

/// Requested page of a listing. Both fields are 1-based and validated at the
/// boundary before a store sees them.
#[derive(Debug, Clone, Copy)]
pub struct PageRequest {
    pub page: u64,
    pub limit: u64,
}

impl PageRequest {
    /// Zero-based page index for the paginator
    pub fn index(&self) -> u64 {
        self.page - 1
    }
}

/// Paginated result carrying the total matching count
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub data: Vec<T>,
}

/// Filter criteria for book listings; all provided filters are ANDed
#[derive(Debug, Default, Clone)]
pub struct BookQuery {
    pub genre: Option<Genre>,
    pub author_id: Option<i32>,
    pub search: Option<String>,
}
