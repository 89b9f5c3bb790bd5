//! Services Layer
//!
//! Business operations behind the HTTP handlers. Services depend only on the
//! repository traits, so they run the same against any store implementation.

pub mod account_service;
pub mod favorite_service;
pub mod listing_service;
pub mod property_service;
pub mod search_service;

pub use account_service::{LoginRequest, RegisterRequest, TokenResponse};
pub use property_service::FormData;
