//! Search Service - location suggestions for the search box

use crate::domain::{DomainError, PropertyRepository, SearchParams, SearchQuery, SearchSuggestions};

/// Suggest cities, streets and addresses matching a text fragment.
///
/// Store failures are logged here with the full query at `warn` and returned
/// unchanged; the HTTP layer reports them once at `error` as a generic 500.
pub async fn quick_search(
    repo: &dyn PropertyRepository,
    params: SearchParams,
) -> Result<SearchSuggestions, DomainError> {
    let query = SearchQuery::build(params)?;

    match repo.quick_search(&query).await {
        Ok(suggestions) => {
            tracing::debug!(
                "Quick search '{}' in {}: {} cities, {} streets, {} addresses",
                query.text,
                query.country_code,
                suggestions.cities.len(),
                suggestions.streets.len(),
                suggestions.addresses.len()
            );
            Ok(suggestions)
        }
        Err(e) => {
            tracing::warn!(
                "Quick search failed for text={:?} country={} types={:?} statuses={:?}: {}",
                query.text,
                query.country_code,
                query.property_types,
                query.statuses,
                e
            );
            Err(e)
        }
    }
}
