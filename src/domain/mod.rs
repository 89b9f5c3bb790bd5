//! Domain layer - Pure business abstractions
//!
//! This layer contains NO framework dependencies (no SeaORM, no Axum).
//! Only trait definitions, query types and domain error types.

pub mod errors;
pub mod listing;
pub mod property;
pub mod repositories;
pub mod search;

pub use errors::DomainError;
pub use listing::*;
pub use property::*;
pub use repositories::*;
pub use search::*;
