//! Domain layer - Pure business abstractions
//!
//! This layer contains no Axum dependencies. Only error types and the
//! shared query/pagination shapes the stores operate on.

pub mod errors;
pub mod queries;

pub use errors::DomainError;
pub use queries::*;
