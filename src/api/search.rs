use axum::{extract::State, Json};
use axum_extra::extract::{Query, WithRejection};

use crate::domain::{DomainError, SearchParams, SearchSuggestions};
use crate::infrastructure::AppState;
use crate::services::search_service;

#[utoipa::path(
    get,
    path = "/api/properties/search",
    params(
        ("text" = String, Query, description = "At least 2 characters"),
        ("country_code" = String, Query, description = "ISO 3166-1 alpha-2 code"),
        ("property_types" = Option<Vec<String>>, Query, description = "Property types, repeated and/or comma-separated"),
        ("status" = Option<Vec<String>>, Query, description = "Statuses, repeated and/or comma-separated, ACTIVE when omitted"),
        ("limit" = Option<u64>, Query, description = "Maximum entries per bucket")
    ),
    responses(
        (status = 200, description = "City, street and address suggestions", body = SearchSuggestions),
        (status = 400, description = "Text too short or country_code missing"),
        (status = 500, description = "Search failed")
    )
)]
pub async fn quick_search(
    State(state): State<AppState>,
    WithRejection(Query(params), _): WithRejection<Query<SearchParams>, DomainError>,
) -> Result<Json<SearchSuggestions>, DomainError> {
    let suggestions = search_service::quick_search(state.property_repo.as_ref(), params).await?;
    Ok(Json(suggestions))
}
