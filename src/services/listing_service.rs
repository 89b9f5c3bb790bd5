//! Listing Service - filtered, paginated property summaries

use crate::domain::{DomainError, ListingParams, ListingQuery, PropertyRepository, PropertySummary};

/// List properties matching `params`, annotated for the viewer.
pub async fn list_properties(
    repo: &dyn PropertyRepository,
    params: ListingParams,
) -> Result<Vec<PropertySummary>, DomainError> {
    let query = ListingQuery::build(params)?;
    tracing::debug!(
        "List properties - country={}, statuses={:?}, types={:?}, viewer={:?}, page={}, limit={:?}",
        query.country_code,
        query.statuses,
        query.property_types,
        query.viewer_id,
        query.page,
        query.limit
    );
    repo.list(&query).await
}

/// Count the rows `list_properties` would return across all pages.
pub async fn count_properties(
    repo: &dyn PropertyRepository,
    params: ListingParams,
) -> Result<u64, DomainError> {
    let query = ListingQuery::build(params)?;
    repo.count(&query).await
}
