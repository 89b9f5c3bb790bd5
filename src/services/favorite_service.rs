//! Favorite Service - a user's bookmarked listings

use std::collections::HashMap;

use crate::domain::{DomainError, Favorite, FavoriteRepository, PropertyRepository};

/// Attach the property summary to each favorite with one batched read.
async fn with_properties(
    properties: &dyn PropertyRepository,
    user_id: i32,
    mut favorites: Vec<Favorite>,
) -> Result<Vec<Favorite>, DomainError> {
    let ids: Vec<i32> = favorites.iter().map(|f| f.property_id).collect();
    let mut summaries: HashMap<i32, _> = properties
        .summaries_by_ids(&ids, Some(user_id))
        .await?
        .into_iter()
        .map(|s| (s.id, s))
        .collect();

    for favorite in &mut favorites {
        favorite.property = summaries.remove(&favorite.property_id);
    }
    Ok(favorites)
}

/// Bookmark a property. A second attempt for the same pair is a conflict.
pub async fn add_favorite(
    properties: &dyn PropertyRepository,
    favorites: &dyn FavoriteRepository,
    user_id: i32,
    property_id: i32,
) -> Result<Favorite, DomainError> {
    let mut summary = properties
        .summaries_by_ids(&[property_id], Some(user_id))
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| {
            DomainError::validation(
                "property_id",
                format!("Invalid pk \"{}\" - object does not exist.", property_id),
            )
        })?;

    let mut favorite = favorites.create(user_id, property_id).await?;
    tracing::info!("User {} favorited property {}", user_id, property_id);

    summary.favorite = true;
    favorite.property = Some(summary);
    Ok(favorite)
}

pub async fn list_favorites(
    properties: &dyn PropertyRepository,
    favorites: &dyn FavoriteRepository,
    user_id: i32,
) -> Result<Vec<Favorite>, DomainError> {
    let found = favorites.find_for_user(user_id).await?;
    with_properties(properties, user_id, found).await
}

/// A single favorite; other users' favorites are reported as missing.
pub async fn get_favorite(
    properties: &dyn PropertyRepository,
    favorites: &dyn FavoriteRepository,
    id: i32,
    user_id: i32,
) -> Result<Favorite, DomainError> {
    let favorite = favorites
        .find_owned(id, user_id)
        .await?
        .ok_or(DomainError::NotFound)?;
    let mut found = with_properties(properties, user_id, vec![favorite]).await?;
    found.pop().ok_or(DomainError::NotFound)
}

pub async fn remove_favorite(
    favorites: &dyn FavoriteRepository,
    id: i32,
    user_id: i32,
) -> Result<(), DomainError> {
    favorites.delete_owned(id, user_id).await?;
    tracing::info!("User {} removed favorite {}", user_id, id);
    Ok(())
}
