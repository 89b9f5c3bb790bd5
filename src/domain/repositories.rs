//! Repository trait definitions
//!
//! These traits define the contract for data access.
//! Implementations live in the infrastructure layer.

use async_trait::async_trait;
use serde::Serialize;
use utoipa::ToSchema;

use super::{
    DomainError, ListingQuery, PropertyChanges, PropertyDetail, PropertyDraft, PropertySummary,
    SearchQuery, SearchSuggestions,
};

/// Favorite data for API responses
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Favorite {
    pub id: i32,
    pub user: i32,
    pub property_id: i32,
    pub created_at: String,
    pub updated_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property: Option<PropertySummary>,
}

/// Public user data
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub created_at: String,
}

/// User data needed to check a login
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub user: User,
    pub password_hash: String,
}

/// Repository trait for Property entity
#[async_trait]
pub trait PropertyRepository: Send + Sync {
    /// Listing page: fixed summary projection with thumbnail and favorite flag
    async fn list(&self, query: &ListingQuery) -> Result<Vec<PropertySummary>, DomainError>;

    /// Number of rows `list` would return without pagination
    async fn count(&self, query: &ListingQuery) -> Result<u64, DomainError>;

    /// Summaries for the given ids regardless of country or status
    async fn summaries_by_ids(
        &self,
        ids: &[i32],
        viewer_id: Option<i32>,
    ) -> Result<Vec<PropertySummary>, DomainError>;

    /// City, street and address suggestion buckets
    async fn quick_search(&self, query: &SearchQuery) -> Result<SearchSuggestions, DomainError>;

    /// Find a property with all its images
    async fn find_by_id(&self, id: i32) -> Result<Option<PropertyDetail>, DomainError>;

    /// Create a property and its images in one transaction
    async fn create(&self, owner_id: i32, draft: PropertyDraft)
        -> Result<PropertyDetail, DomainError>;

    /// Apply changes to a property owned by `owner_id`
    async fn update(
        &self,
        id: i32,
        owner_id: i32,
        changes: PropertyChanges,
    ) -> Result<PropertyDetail, DomainError>;

    /// Distinct city names, sorted
    async fn cities(&self) -> Result<Vec<String>, DomainError>;
}

/// Repository trait for user favorites
#[async_trait]
pub trait FavoriteRepository: Send + Sync {
    /// Insert a favorite; an existing `(user, property)` pair is a conflict
    async fn create(&self, user_id: i32, property_id: i32) -> Result<Favorite, DomainError>;

    /// All favorites of a user, oldest first
    async fn find_for_user(&self, user_id: i32) -> Result<Vec<Favorite>, DomainError>;

    /// A favorite, only if it belongs to `user_id`
    async fn find_owned(&self, id: i32, user_id: i32) -> Result<Option<Favorite>, DomainError>;

    /// Delete a favorite owned by `user_id`; anything else is `NotFound`
    async fn delete_owned(&self, id: i32, user_id: i32) -> Result<(), DomainError>;
}

/// Repository trait for User entity
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(
        &self,
        username: String,
        email: String,
        password_hash: String,
    ) -> Result<User, DomainError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, DomainError>;

    async fn find_credentials(&self, username: &str)
        -> Result<Option<UserCredentials>, DomainError>;
}
