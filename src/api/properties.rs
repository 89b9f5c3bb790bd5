//! Property listing, detail and management handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::{Query, WithRejection};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{
    parse_number, DomainError, IdFilterField, ListingParams, NewProperty, PropertyDetail, PropertySummary,
    PropertyUpdate,
};
use crate::infrastructure::auth::{AuthUser, MaybeAuthUser};
use crate::infrastructure::AppState;
use crate::services::{listing_service, property_service, FormData};

/// Query string of the listing and count endpoints.
///
/// List parameters may be repeated and/or comma-separated. Numbers arrive as
/// text so a malformed value is reported against its own field.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PropertyListQuery {
    /// Values restricting the listing, matched against `id_field`
    #[serde(default)]
    pub ids: Vec<String>,
    /// `id` (default), `postal_code` or `city`
    pub id_field: Option<String>,
    /// ISO 3166-1 alpha-2 code, required
    pub country_code: Option<String>,
    /// Statuses, ACTIVE when omitted
    #[serde(default)]
    pub status: Vec<String>,
    pub city: Option<String>,
    #[serde(default)]
    pub property_type: Vec<String>,
    #[param(value_type = Option<f64>)]
    pub min_price: Option<String>,
    #[param(value_type = Option<f64>)]
    pub max_price: Option<String>,
    #[param(value_type = Option<f64>)]
    pub min_area: Option<String>,
    #[param(value_type = Option<f64>)]
    pub max_area: Option<String>,
    #[param(value_type = Option<f64>)]
    pub total_rooms: Option<String>,
    /// e.g. `-price,created_at`; unknown fields are ignored
    pub ordering: Option<String>,
    #[param(value_type = Option<u64>)]
    pub page: Option<String>,
    #[param(value_type = Option<u64>)]
    pub limit: Option<String>,
}

impl PropertyListQuery {
    fn into_listing_params(self, viewer_id: Option<i32>) -> Result<ListingParams, DomainError> {
        let id_filter_field = match self.id_field.as_deref().map(str::trim) {
            None | Some("") | Some("id") => IdFilterField::Id,
            Some("postal_code") => IdFilterField::PostalCode,
            Some("city") => IdFilterField::City,
            Some(other) => {
                return Err(DomainError::validation(
                    "id_field",
                    format!("\"{}\" is not a valid choice.", other),
                ))
            }
        };

        Ok(ListingParams {
            id_filter: Some(self.ids).filter(|ids| !ids.is_empty()),
            id_filter_field,
            country_code: self.country_code,
            status: self.status,
            viewer_id,
            city: self.city,
            property_types: self.property_type,
            min_price: parse_number(self.min_price.as_deref(), "min_price")?,
            max_price: parse_number(self.max_price.as_deref(), "max_price")?,
            min_area: parse_number(self.min_area.as_deref(), "min_area")?,
            max_area: parse_number(self.max_area.as_deref(), "max_area")?,
            total_rooms: parse_number(self.total_rooms.as_deref(), "total_rooms")?,
            ordering: self.ordering,
            page: parse_number(self.page.as_deref(), "page")?,
            limit: parse_number(self.limit.as_deref(), "limit")?,
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CountResponse {
    pub count: u64,
}

#[utoipa::path(
    get,
    path = "/api/properties",
    params(PropertyListQuery),
    responses(
        (status = 200, description = "Matching listings", body = [PropertySummary]),
        (status = 400, description = "Missing country_code or invalid filter")
    )
)]
pub async fn list_properties(
    State(state): State<AppState>,
    MaybeAuthUser(viewer): MaybeAuthUser,
    WithRejection(Query(query), _): WithRejection<Query<PropertyListQuery>, DomainError>,
) -> Result<Json<Vec<PropertySummary>>, DomainError> {
    let params = query.into_listing_params(viewer.map(|u| u.id))?;
    let properties = listing_service::list_properties(state.property_repo.as_ref(), params).await?;
    Ok(Json(properties))
}

#[utoipa::path(
    get,
    path = "/api/properties/count",
    params(PropertyListQuery),
    responses(
        (status = 200, description = "Number of matching listings", body = CountResponse),
        (status = 400, description = "Missing country_code or invalid filter")
    )
)]
pub async fn count_properties(
    State(state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<PropertyListQuery>, DomainError>,
) -> Result<Json<CountResponse>, DomainError> {
    let params = query.into_listing_params(None)?;
    let count = listing_service::count_properties(state.property_repo.as_ref(), params).await?;
    Ok(Json(CountResponse { count }))
}

#[utoipa::path(
    post,
    path = "/api/properties",
    request_body = NewProperty,
    responses(
        (status = 201, description = "Property created", body = PropertyDetail),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer" = []))
)]
pub async fn create_property(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<NewProperty>,
) -> Result<(StatusCode, Json<PropertyDetail>), DomainError> {
    let created =
        property_service::create_property(state.property_repo.as_ref(), user.id, payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get,
    path = "/api/properties/{id}",
    params(("id" = i32, Path, description = "Property id")),
    responses(
        (status = 200, description = "Property with all images", body = PropertyDetail),
        (status = 404, description = "Property not found")
    )
)]
pub async fn get_property(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<PropertyDetail>, DomainError> {
    let property = property_service::get_property(state.property_repo.as_ref(), id).await?;
    Ok(Json(property))
}

#[utoipa::path(
    patch,
    path = "/api/properties/{id}",
    params(("id" = i32, Path, description = "Property id")),
    request_body = PropertyUpdate,
    responses(
        (status = 200, description = "Property updated", body = PropertyDetail),
        (status = 404, description = "Property not found or not owned by the caller")
    ),
    security(("bearer" = []))
)]
pub async fn update_property(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
    Json(payload): Json<PropertyUpdate>,
) -> Result<Json<PropertyDetail>, DomainError> {
    let updated =
        property_service::update_property(state.property_repo.as_ref(), id, user.id, payload)
            .await?;
    Ok(Json(updated))
}

#[utoipa::path(
    delete,
    path = "/api/properties/{id}",
    params(("id" = i32, Path, description = "Property id")),
    responses(
        (status = 405, description = "Properties cannot be deleted")
    )
)]
pub async fn delete_property(Path(id): Path<i32>) -> Result<StatusCode, DomainError> {
    property_service::delete_property(id)?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/properties/form-data",
    responses(
        (status = 200, description = "Choices for the listing form", body = FormData),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer" = []))
)]
pub async fn form_data(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Result<Json<FormData>, DomainError> {
    let data = property_service::form_data(state.property_repo.as_ref()).await?;
    Ok(Json(data))
}
