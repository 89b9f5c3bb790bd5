//! Property Service - creating, reading and editing single listings

use chrono::Datelike;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{
    DomainError, NewProperty, PropertyDetail, PropertyRepository, PropertyStatus, PropertyType,
    PropertyUpdate,
};

/// Choices offered by the listing form.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FormData {
    pub types: Vec<PropertyType>,
    pub status: Vec<PropertyStatus>,
    pub cities: Vec<String>,
}

pub async fn create_property(
    repo: &dyn PropertyRepository,
    owner_id: i32,
    input: NewProperty,
) -> Result<PropertyDetail, DomainError> {
    let draft = input.validate(chrono::Utc::now().year())?;
    let created = repo.create(owner_id, draft).await?;
    tracing::info!(
        "Created property {} ({}, {}) with {} images",
        created.id,
        created.property_type,
        created.city,
        created.images.len()
    );
    Ok(created)
}

pub async fn get_property(
    repo: &dyn PropertyRepository,
    id: i32,
) -> Result<PropertyDetail, DomainError> {
    repo.find_by_id(id).await?.ok_or(DomainError::NotFound)
}

/// Apply a partial update. Only the owner may edit; anyone else gets `NotFound`.
pub async fn update_property(
    repo: &dyn PropertyRepository,
    id: i32,
    owner_id: i32,
    input: PropertyUpdate,
) -> Result<PropertyDetail, DomainError> {
    let changes = input.validate()?;
    repo.update(id, owner_id, changes).await
}

/// Listings are withdrawn through their status, never deleted.
pub fn delete_property(id: i32) -> Result<(), DomainError> {
    tracing::warn!("Refused deletion of property {}", id);
    Err(DomainError::MethodNotAllowed(
        "`Property` deletion is not allowed.".to_string(),
    ))
}

pub async fn form_data(repo: &dyn PropertyRepository) -> Result<FormData, DomainError> {
    Ok(FormData {
        types: PropertyType::ALL.to_vec(),
        status: PropertyStatus::ALL.to_vec(),
        cities: repo.cities().await?,
    })
}
