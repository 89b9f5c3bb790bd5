use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::domain::{DomainError, Favorite};
use crate::infrastructure::auth::AuthUser;
use crate::infrastructure::AppState;
use crate::services::favorite_service;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateFavorite {
    pub property_id: i32,
}

#[utoipa::path(
    get,
    path = "/api/favorites",
    responses(
        (status = 200, description = "The caller's favorites", body = [Favorite]),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer" = []))
)]
pub async fn list_favorites(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<Favorite>>, DomainError> {
    let favorites = favorite_service::list_favorites(
        state.property_repo.as_ref(),
        state.favorite_repo.as_ref(),
        user.id,
    )
    .await?;
    Ok(Json(favorites))
}

#[utoipa::path(
    post,
    path = "/api/favorites",
    request_body = CreateFavorite,
    responses(
        (status = 201, description = "Favorite created", body = Favorite),
        (status = 400, description = "Unknown property"),
        (status = 401, description = "Not authenticated"),
        (status = 409, description = "Already in favorites")
    ),
    security(("bearer" = []))
)]
pub async fn create_favorite(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateFavorite>,
) -> Result<(StatusCode, Json<Favorite>), DomainError> {
    let favorite = favorite_service::add_favorite(
        state.property_repo.as_ref(),
        state.favorite_repo.as_ref(),
        user.id,
        payload.property_id,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(favorite)))
}

#[utoipa::path(
    get,
    path = "/api/favorites/{id}",
    params(("id" = i32, Path, description = "Favorite id")),
    responses(
        (status = 200, description = "Favorite", body = Favorite),
        (status = 404, description = "Not found or not owned by the caller")
    ),
    security(("bearer" = []))
)]
pub async fn get_favorite(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<Favorite>, DomainError> {
    let favorite = favorite_service::get_favorite(
        state.property_repo.as_ref(),
        state.favorite_repo.as_ref(),
        id,
        user.id,
    )
    .await?;
    Ok(Json(favorite))
}

#[utoipa::path(
    delete,
    path = "/api/favorites/{id}",
    params(("id" = i32, Path, description = "Favorite id")),
    responses(
        (status = 204, description = "Favorite removed"),
        (status = 404, description = "Not found or not owned by the caller")
    ),
    security(("bearer" = []))
)]
pub async fn delete_favorite(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
) -> Result<StatusCode, DomainError> {
    favorite_service::remove_favorite(state.favorite_repo.as_ref(), id, user.id).await?;
    Ok(StatusCode::NO_CONTENT)
}
