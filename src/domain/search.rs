//! Search suggestion query and result types

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::property::{parse_number, parse_tag_list, PropertyStatus, PropertyType};
use super::DomainError;

/// Shortest accepted search fragment, in characters.
pub const MIN_SEARCH_LENGTH: usize = 2;

/// Raw suggestion parameters as received from the request layer.
/// List entries may repeat and may each be comma-separated.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    pub text: Option<String>,
    pub country_code: Option<String>,
    #[serde(default)]
    pub property_types: Vec<String>,
    #[serde(default)]
    pub status: Vec<String>,
    pub limit: Option<String>,
}

/// Validated suggestion query.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    /// Trimmed, at least `MIN_SEARCH_LENGTH` characters.
    pub text: String,
    /// Upper-cased ISO 3166-1 alpha-2 code.
    pub country_code: String,
    pub property_types: Vec<PropertyType>,
    /// Never empty.
    pub statuses: Vec<PropertyStatus>,
    /// Per-bucket cap; `None` returns every group.
    pub limit: Option<u64>,
}

impl SearchQuery {
    pub fn build(params: SearchParams) -> Result<Self, DomainError> {
        let text = params.text.as_deref().map(str::trim).unwrap_or_default();
        if text.chars().count() < MIN_SEARCH_LENGTH {
            return Err(DomainError::validation(
                "text",
                format!(
                    "Ensure this field has at least {} characters.",
                    MIN_SEARCH_LENGTH
                ),
            ));
        }

        let country_code = params
            .country_code
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_uppercase)
            .ok_or_else(|| {
                DomainError::validation("country_code", "This query parameter is required.")
            })?;

        let property_types = parse_tag_list(&params.property_types, "property_types")?;

        let mut statuses: Vec<PropertyStatus> = parse_tag_list(&params.status, "status")?;
        if statuses.is_empty() {
            statuses.push(PropertyStatus::Active);
        }

        Ok(Self {
            text: text.to_string(),
            country_code,
            property_types,
            statuses,
            limit: parse_number::<u64>(params.limit.as_deref(), "limit")?.filter(|l| *l > 0),
        })
    }

    /// `%text%` pattern for a case-insensitive `LIKE`, with `\` as escape character.
    pub fn like_pattern(&self) -> String {
        format!("%{}%", escape_like(&self.text.to_lowercase()))
    }
}

/// Escape `LIKE` wildcards so user input only ever matches literally.
pub fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct CitySuggestion {
    pub city: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct StreetSuggestion {
    pub street_name: String,
    pub postal_code: String,
    pub city: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct AddressSuggestion {
    pub street_name: String,
    pub street_number: Option<String>,
    pub postal_code: String,
    pub city: String,
}

/// The three suggestion buckets. Each is always present, possibly empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct SearchSuggestions {
    pub cities: Vec<CitySuggestion>,
    pub streets: Vec<StreetSuggestion>,
    pub addresses: Vec<AddressSuggestion>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(text: &str) -> SearchParams {
        SearchParams {
            text: Some(text.to_string()),
            country_code: Some("mk".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn short_text_is_rejected() {
        assert!(matches!(
            SearchQuery::build(params(" a ")),
            Err(DomainError::Validation { field: "text", .. })
        ));
        assert!(matches!(
            SearchQuery::build(SearchParams::default()),
            Err(DomainError::Validation { field: "text", .. })
        ));
        // Two characters, one of them multi-byte.
        assert!(SearchQuery::build(params("Ač")).is_ok());
    }

    #[test]
    fn defaults_are_applied() {
        let query = SearchQuery::build(params(" ki ")).unwrap();
        assert_eq!(query.text, "ki");
        assert_eq!(query.country_code, "MK");
        assert_eq!(query.statuses, vec![PropertyStatus::Active]);
        assert!(query.property_types.is_empty());
        assert_eq!(query.limit, None);
    }

    #[test]
    fn property_types_are_parsed_from_a_comma_list() {
        let mut p = params("ki");
        p.property_types = vec!["apartment,,COMMERCIAL".to_string(), "LAND".to_string()];
        let query = SearchQuery::build(p).unwrap();
        assert_eq!(
            query.property_types,
            vec![
                PropertyType::Apartment,
                PropertyType::Commercial,
                PropertyType::Land
            ]
        );

        let mut p = params("ki");
        p.property_types = vec!["villa".to_string()];
        assert!(matches!(
            SearchQuery::build(p),
            Err(DomainError::Validation { field: "property_types", .. })
        ));
    }

    #[test]
    fn limit_is_parsed_and_zero_means_unbounded() {
        let mut p = params("ki");
        p.limit = Some("3".to_string());
        assert_eq!(SearchQuery::build(p).unwrap().limit, Some(3));

        let mut p = params("ki");
        p.limit = Some("0".to_string());
        assert_eq!(SearchQuery::build(p).unwrap().limit, None);

        let mut p = params("ki");
        p.limit = Some("many".to_string());
        assert!(matches!(
            SearchQuery::build(p),
            Err(DomainError::Validation { field: "limit", .. })
        ));
    }

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
        let query = SearchQuery::build(params("Ti")).unwrap();
        assert_eq!(query.like_pattern(), "%ti%");
    }
}
