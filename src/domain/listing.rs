//! Listing query construction
//!
//! `ListingQuery::build` turns raw request parameters into a validated,
//! normalized query. The same `ListingQuery` drives both the listing and the
//! count, so the two can never disagree about which rows match.

use super::property::{parse_tag_list, PropertyStatus, PropertyType};
use super::DomainError;

/// Upper bound on a page of listings.
pub const MAX_PAGE_SIZE: u64 = 100;

/// Column the id-subset filter applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdFilterField {
    #[default]
    Id,
    PostalCode,
    City,
}

/// Restricts a listing to rows whose `field` is one of the given values.
#[derive(Debug, Clone, PartialEq)]
pub enum IdFilter {
    Ids(Vec<i32>),
    PostalCodes(Vec<String>),
    Cities(Vec<String>),
}

/// Fields a listing may be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderField {
    Id,
    CreatedAt,
    Price,
    Area,
    TotalRooms,
    ConstructionYear,
}

impl OrderField {
    fn from_param(name: &str) -> Option<Self> {
        match name {
            "id" => Some(OrderField::Id),
            "created_at" => Some(OrderField::CreatedAt),
            "price" => Some(OrderField::Price),
            "area" => Some(OrderField::Area),
            "total_rooms" => Some(OrderField::TotalRooms),
            "construction_year" => Some(OrderField::ConstructionYear),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderTerm {
    pub field: OrderField,
    pub descending: bool,
}

/// Parse `price,-created_at` style ordering. Unknown fields are dropped;
/// when nothing usable remains the listing falls back to newest first.
pub fn parse_ordering(raw: Option<&str>) -> Vec<OrderTerm> {
    let mut terms: Vec<OrderTerm> = Vec::new();

    for part in raw.unwrap_or_default().split(',') {
        let part = part.trim();
        let (descending, name) = match part.strip_prefix('-') {
            Some(name) => (true, name),
            None => (false, part),
        };
        let Some(field) = OrderField::from_param(name) else {
            continue;
        };
        if terms.iter().any(|t| t.field == field) {
            continue;
        }
        terms.push(OrderTerm { field, descending });
    }

    if terms.is_empty() {
        terms.push(OrderTerm {
            field: OrderField::Id,
            descending: true,
        });
    }
    terms
}

/// Raw listing parameters as received from the request layer.
#[derive(Debug, Clone, Default)]
pub struct ListingParams {
    pub id_filter: Option<Vec<String>>,
    pub id_filter_field: IdFilterField,
    pub country_code: Option<String>,
    /// Each entry may be a comma-separated list. Empty means ACTIVE only.
    pub status: Vec<String>,
    pub viewer_id: Option<i32>,
    pub city: Option<String>,
    pub property_types: Vec<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub min_area: Option<f64>,
    pub max_area: Option<f64>,
    pub total_rooms: Option<f64>,
    pub ordering: Option<String>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

/// Validated listing query consumed by `PropertyRepository::list` and `count`.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingQuery {
    pub id_filter: Option<IdFilter>,
    /// Upper-cased ISO 3166-1 alpha-2 code.
    pub country_code: String,
    /// Never empty.
    pub statuses: Vec<PropertyStatus>,
    pub viewer_id: Option<i32>,
    pub city: Option<String>,
    pub property_types: Vec<PropertyType>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub min_area: Option<f64>,
    pub max_area: Option<f64>,
    pub total_rooms: Option<f64>,
    /// Never empty.
    pub ordering: Vec<OrderTerm>,
    pub page: u64,
    pub limit: Option<u64>,
}

impl ListingQuery {
    pub fn build(params: ListingParams) -> Result<Self, DomainError> {
        let country_code = params
            .country_code
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_uppercase)
            .ok_or_else(|| {
                DomainError::validation("country_code", "This query parameter is required.")
            })?;

        let mut statuses: Vec<PropertyStatus> = parse_tag_list(&params.status, "status")?;
        if statuses.is_empty() {
            statuses.push(PropertyStatus::Active);
        }

        let property_types = parse_tag_list(&params.property_types, "property_type")?;

        let id_filter = match params.id_filter {
            Some(values) => build_id_filter(params.id_filter_field, values)?,
            None => None,
        };

        let limit = match params.limit {
            Some(0) => {
                return Err(DomainError::validation(
                    "limit",
                    "Ensure this value is greater than or equal to 1.",
                ))
            }
            Some(limit) => Some(limit.min(MAX_PAGE_SIZE)),
            None => None,
        };

        Ok(Self {
            id_filter,
            country_code,
            statuses,
            viewer_id: params.viewer_id,
            city: params
                .city
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty()),
            property_types,
            min_price: params.min_price,
            max_price: params.max_price,
            min_area: params.min_area,
            max_area: params.max_area,
            total_rooms: params.total_rooms,
            ordering: parse_ordering(params.ordering.as_deref()),
            page: params.page.unwrap_or(0),
            limit,
        })
    }

    /// Row offset of the requested page, when paginated.
    pub fn offset(&self) -> Option<u64> {
        self.limit.map(|limit| self.page.saturating_mul(limit))
    }
}

/// Blank input means "no id filter", never "match nothing".
fn build_id_filter(
    field: IdFilterField,
    values: Vec<String>,
) -> Result<Option<IdFilter>, DomainError> {
    let values: Vec<String> = values
        .into_iter()
        .flat_map(|v| {
            v.split(',')
                .map(|s| s.trim().to_string())
                .collect::<Vec<_>>()
        })
        .filter(|v| !v.is_empty())
        .collect();
    if values.is_empty() {
        return Ok(None);
    }

    Ok(Some(match field {
        IdFilterField::Id => IdFilter::Ids(
            values
                .iter()
                .map(|v| {
                    v.parse::<i32>().map_err(|_| {
                        DomainError::validation("ids", format!("\"{}\" is not a valid id.", v))
                    })
                })
                .collect::<Result<Vec<_>, _>>()?,
        ),
        IdFilterField::PostalCode => IdFilter::PostalCodes(values),
        IdFilterField::City => IdFilter::Cities(values),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(country: &str) -> ListingParams {
        ListingParams {
            country_code: Some(country.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn missing_country_code_is_a_validation_error() {
        let err = ListingQuery::build(ListingParams::default()).unwrap_err();
        assert!(matches!(err, DomainError::Validation { field: "country_code", .. }));

        let err = ListingQuery::build(params("  ")).unwrap_err();
        assert!(matches!(err, DomainError::Validation { field: "country_code", .. }));
    }

    #[test]
    fn status_defaults_to_active_and_country_is_uppercased() {
        let query = ListingQuery::build(params("mk")).unwrap();
        assert_eq!(query.country_code, "MK");
        assert_eq!(query.statuses, vec![PropertyStatus::Active]);
        assert_eq!(
            query.ordering,
            vec![OrderTerm {
                field: OrderField::Id,
                descending: true
            }]
        );
    }

    #[test]
    fn explicit_statuses_replace_the_default() {
        let mut p = params("MK");
        p.status = vec!["SOLD,pending".to_string()];
        let query = ListingQuery::build(p).unwrap();
        assert_eq!(query.statuses, vec![PropertyStatus::Sold, PropertyStatus::Pending]);
    }

    #[test]
    fn unknown_status_is_rejected() {
        let mut p = params("MK");
        p.status = vec!["GONE".to_string()];
        assert!(matches!(
            ListingQuery::build(p),
            Err(DomainError::Validation { field: "status", .. })
        ));
    }

    #[test]
    fn ordering_keeps_known_fields_only() {
        assert_eq!(
            parse_ordering(Some("total_rooms,-price,bogus")),
            vec![
                OrderTerm {
                    field: OrderField::TotalRooms,
                    descending: false
                },
                OrderTerm {
                    field: OrderField::Price,
                    descending: true
                },
            ]
        );
        assert_eq!(
            parse_ordering(Some("non_existent_field")),
            vec![OrderTerm {
                field: OrderField::Id,
                descending: true
            }]
        );
    }

    #[test]
    fn id_filter_parses_ids_and_rejects_garbage() {
        let mut p = params("MK");
        p.id_filter = Some(vec!["3,7".to_string()]);
        let query = ListingQuery::build(p).unwrap();
        assert_eq!(query.id_filter, Some(IdFilter::Ids(vec![3, 7])));

        let mut p = params("MK");
        p.id_filter = Some(vec!["x".to_string()]);
        assert!(ListingQuery::build(p).is_err());

        let mut p = params("MK");
        p.id_filter = Some(vec![]);
        assert_eq!(ListingQuery::build(p).unwrap().id_filter, None);

        let mut p = params("MK");
        p.id_filter = Some(vec![" , ".to_string()]);
        assert_eq!(ListingQuery::build(p).unwrap().id_filter, None);
    }

    #[test]
    fn pagination_is_clamped() {
        let mut p = params("MK");
        p.limit = Some(500);
        p.page = Some(2);
        let query = ListingQuery::build(p).unwrap();
        assert_eq!(query.limit, Some(MAX_PAGE_SIZE));
        assert_eq!(query.offset(), Some(200));

        let mut p = params("MK");
        p.limit = Some(0);
        assert!(ListingQuery::build(p).is_err());
    }
}
