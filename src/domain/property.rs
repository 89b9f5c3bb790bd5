//! Property classification tags and the property DTOs shared by all layers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

use super::DomainError;

/// Image formats accepted for property images.
pub const ALLOWED_IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "bmp", "gif"];

/// Returned by `FromStr` on the tag enums; carries the rejected input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTag(pub String);

/// Canonical form used to compare tags: `under contract` and `Under-Contract`
/// both become `UNDER_CONTRACT`.
fn normalize_tag(raw: &str) -> String {
    raw.trim()
        .chars()
        .map(|c| match c {
            ' ' | '-' => '_',
            c => c.to_ascii_uppercase(),
        })
        .collect()
}

/// Lifecycle tag of a listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PropertyStatus {
    #[default]
    Active,
    Pending,
    UnderContract,
    Sold,
    OffMarket,
    Expired,
    Withdrawn,
    ComingSoon,
    Auction,
    Leased,
    Draft,
}

impl PropertyStatus {
    pub const ALL: [PropertyStatus; 11] = [
        PropertyStatus::Active,
        PropertyStatus::Pending,
        PropertyStatus::UnderContract,
        PropertyStatus::Sold,
        PropertyStatus::OffMarket,
        PropertyStatus::Expired,
        PropertyStatus::Withdrawn,
        PropertyStatus::ComingSoon,
        PropertyStatus::Auction,
        PropertyStatus::Leased,
        PropertyStatus::Draft,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyStatus::Active => "ACTIVE",
            PropertyStatus::Pending => "PENDING",
            PropertyStatus::UnderContract => "UNDER_CONTRACT",
            PropertyStatus::Sold => "SOLD",
            PropertyStatus::OffMarket => "OFF_MARKET",
            PropertyStatus::Expired => "EXPIRED",
            PropertyStatus::Withdrawn => "WITHDRAWN",
            PropertyStatus::ComingSoon => "COMING_SOON",
            PropertyStatus::Auction => "AUCTION",
            PropertyStatus::Leased => "LEASED",
            PropertyStatus::Draft => "DRAFT",
        }
    }
}

impl fmt::Display for PropertyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PropertyStatus {
    type Err = UnknownTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = normalize_tag(s);
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == tag)
            .ok_or_else(|| UnknownTag(s.trim().to_string()))
    }
}

/// Physical category of a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PropertyType {
    SingleFamilyHome,
    Apartment,
    Condominium,
    Townhouse,
    Duplex,
    Triplex,
    Cooperative,
    Farmhouse,
    Mansion,
    Land,
    BoatHouse,
    Recreational,
    CountryProperty,
    Commercial,
}

impl PropertyType {
    pub const ALL: [PropertyType; 14] = [
        PropertyType::SingleFamilyHome,
        PropertyType::Apartment,
        PropertyType::Condominium,
        PropertyType::Townhouse,
        PropertyType::Duplex,
        PropertyType::Triplex,
        PropertyType::Cooperative,
        PropertyType::Farmhouse,
        PropertyType::Mansion,
        PropertyType::Land,
        PropertyType::BoatHouse,
        PropertyType::Recreational,
        PropertyType::CountryProperty,
        PropertyType::Commercial,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::SingleFamilyHome => "SINGLE_FAMILY_HOME",
            PropertyType::Apartment => "APARTMENT",
            PropertyType::Condominium => "CONDOMINIUM",
            PropertyType::Townhouse => "TOWNHOUSE",
            PropertyType::Duplex => "DUPLEX",
            PropertyType::Triplex => "TRIPLEX",
            PropertyType::Cooperative => "COOPERATIVE",
            PropertyType::Farmhouse => "FARMHOUSE",
            PropertyType::Mansion => "MANSION",
            PropertyType::Land => "LAND",
            PropertyType::BoatHouse => "BOAT_HOUSE",
            PropertyType::Recreational => "RECREATIONAL",
            PropertyType::CountryProperty => "COUNTRY_PROPERTY",
            PropertyType::Commercial => "COMMERCIAL",
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PropertyType {
    type Err = UnknownTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = normalize_tag(s);
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == tag)
            .ok_or_else(|| UnknownTag(s.trim().to_string()))
    }
}

/// Parse a list of raw values, each of which may itself be a comma-separated list.
/// Blank items are skipped. Unknown tags fail validation on `field`.
pub fn parse_tag_list<T, S>(values: &[S], field: &'static str) -> Result<Vec<T>, DomainError>
where
    T: FromStr<Err = UnknownTag> + PartialEq,
    S: AsRef<str>,
{
    let mut tags = Vec::new();
    for item in values.iter().flat_map(|v| v.as_ref().split(',')) {
        if item.trim().is_empty() {
            continue;
        }
        let tag = item.parse::<T>().map_err(|UnknownTag(value)| {
            DomainError::validation(field, format!("\"{}\" is not a valid choice.", value))
        })?;
        if !tags.contains(&tag) {
            tags.push(tag);
        }
    }
    Ok(tags)
}

/// Parse an optional numeric query value. Blank counts as absent.
pub fn parse_number<T: FromStr>(
    raw: Option<&str>,
    field: &'static str,
) -> Result<Option<T>, DomainError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse::<T>()
            .map(Some)
            .map_err(|_| DomainError::validation(field, "A valid number is required.")),
    }
}

/// Check an image reference against the accepted raster formats.
pub fn validate_image_reference(reference: &str) -> Result<(), DomainError> {
    let extension = reference
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    if reference.trim().is_empty() || !ALLOWED_IMAGE_EXTENSIONS.contains(&extension.as_str()) {
        return Err(DomainError::validation(
            "image",
            format!(
                "File extension \"{}\" is not allowed. Allowed extensions are: {}.",
                extension,
                ALLOWED_IMAGE_EXTENSIONS.join(", ")
            ),
        ));
    }
    Ok(())
}

/// Fixed projection returned by listing queries: only what a summary card needs.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PropertySummary {
    pub id: i32,
    pub property_type: String,
    pub created_at: String,
    pub price: f64,
    pub price_currency: String,
    pub total_rooms: Option<f64>,
    pub area: f64,
    pub energy_class: Option<String>,
    pub street_name: String,
    pub street_number: Option<String>,
    pub postal_code: String,
    pub city: String,
    /// Representative image: primary first, else lowest id, else null.
    pub thumbnail: Option<String>,
    pub favorite: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PropertyImage {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub is_primary: bool,
    pub image: String,
    pub created_at: String,
}

/// Full record for the single-property view.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PropertyDetail {
    pub id: i32,
    pub price: f64,
    pub price_currency: String,
    pub area: f64,
    pub total_area: f64,
    pub measured_area: Option<f64>,
    pub total_rooms: Option<f64>,
    pub toilets: Option<i32>,
    pub construction_year: Option<i32>,
    pub renovation_year: Option<i32>,
    pub total_floors: Option<i32>,
    pub heating: String,
    pub outer_walls: String,
    pub roof_type: String,
    pub description: String,
    pub energy_class: Option<String>,
    pub street_name: String,
    pub street_number: Option<String>,
    pub postal_code: String,
    pub city: String,
    pub region: Option<String>,
    pub country_code: String,
    pub property_type: String,
    pub status: String,
    pub owner: Option<i32>,
    pub created_at: String,
    pub updated_at: String,
    pub images: Vec<PropertyImage>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewPropertyImage {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_primary: bool,
    pub image: String,
}

/// Input for creating a property
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewProperty {
    pub price: f64,
    pub price_currency: String,
    pub area: f64,
    pub total_area: f64,
    pub measured_area: Option<f64>,
    pub total_rooms: Option<f64>,
    pub toilets: Option<i32>,
    pub construction_year: Option<i32>,
    pub renovation_year: Option<i32>,
    pub total_floors: Option<i32>,
    #[serde(default)]
    pub heating: String,
    #[serde(default)]
    pub outer_walls: String,
    #[serde(default)]
    pub roof_type: String,
    #[serde(default)]
    pub description: String,
    pub energy_class: Option<String>,
    pub street_name: String,
    pub street_number: Option<String>,
    pub postal_code: String,
    pub city: String,
    pub region: Option<String>,
    pub country_code: String,
    pub property_type: String,
    pub status: Option<String>,
    #[serde(default)]
    pub images: Vec<NewPropertyImage>,
}

/// A `NewProperty` that passed validation, with tags resolved.
#[derive(Debug, Clone)]
pub struct PropertyDraft {
    pub property: NewProperty,
    pub country_code: String,
    pub property_type: PropertyType,
    pub status: PropertyStatus,
}

fn non_negative(field: &'static str, value: Option<f64>) -> Result<(), DomainError> {
    match value {
        Some(v) if !v.is_finite() || v < 0.0 => Err(DomainError::validation(
            field,
            "Ensure this value is greater than or equal to 0.",
        )),
        _ => Ok(()),
    }
}

fn year_in_range(field: &'static str, value: Option<i32>, current_year: i32) -> Result<(), DomainError> {
    match value {
        Some(y) if y < 0 => Err(DomainError::validation(
            field,
            "Ensure this value is greater than or equal to 0.",
        )),
        Some(y) if y > current_year => Err(DomainError::validation(
            field,
            format!("Ensure this value is less than or equal to {}.", current_year),
        )),
        _ => Ok(()),
    }
}

fn required_text(field: &'static str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(field, "This field may not be blank."));
    }
    Ok(())
}

impl NewProperty {
    /// Validate field bounds and resolve the classification tags.
    pub fn validate(self, current_year: i32) -> Result<PropertyDraft, DomainError> {
        non_negative("price", Some(self.price))?;
        non_negative("area", Some(self.area))?;
        non_negative("total_area", Some(self.total_area))?;
        non_negative("measured_area", self.measured_area)?;
        non_negative("total_rooms", self.total_rooms)?;
        if matches!(self.toilets, Some(t) if t < 0) {
            return Err(DomainError::validation(
                "toilets",
                "Ensure this value is greater than or equal to 0.",
            ));
        }
        year_in_range("construction_year", self.construction_year, current_year)?;
        year_in_range("renovation_year", self.renovation_year, current_year)?;
        if matches!(self.total_floors, Some(f) if f < 1) {
            return Err(DomainError::validation(
                "total_floors",
                "Ensure this value is greater than or equal to 1.",
            ));
        }

        let currency = self.price_currency.trim();
        if currency.is_empty() || currency.chars().count() > 5 {
            return Err(DomainError::validation(
                "price_currency",
                "Provide a currency abbreviation of at most 5 characters.",
            ));
        }

        required_text("street_name", &self.street_name)?;
        required_text("postal_code", &self.postal_code)?;
        required_text("city", &self.city)?;

        let country_code = self.country_code.trim().to_ascii_uppercase();
        if country_code.len() != 2 || !country_code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(DomainError::validation(
                "country_code",
                "Provide an ISO 3166-1 alpha-2 country code.",
            ));
        }

        let property_type = self.property_type.parse::<PropertyType>().map_err(|UnknownTag(v)| {
            DomainError::validation("property_type", format!("\"{}\" is not a valid choice.", v))
        })?;

        let status = match self.status.as_deref() {
            Some(raw) if !raw.trim().is_empty() => {
                raw.parse::<PropertyStatus>().map_err(|UnknownTag(v)| {
                    DomainError::validation("status", format!("\"{}\" is not a valid choice.", v))
                })?
            }
            _ => PropertyStatus::default(),
        };

        for image in &self.images {
            validate_image_reference(&image.image)?;
        }

        Ok(PropertyDraft {
            property: self,
            country_code,
            property_type,
            status,
        })
    }
}

/// Partial update of a listing by its owner
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct PropertyUpdate {
    pub status: Option<String>,
    pub price: Option<f64>,
    pub price_currency: Option<String>,
    pub description: Option<String>,
}

/// A `PropertyUpdate` with the status tag resolved.
#[derive(Debug, Clone, Default)]
pub struct PropertyChanges {
    pub status: Option<PropertyStatus>,
    pub price: Option<f64>,
    pub price_currency: Option<String>,
    pub description: Option<String>,
}

impl PropertyUpdate {
    pub fn validate(self) -> Result<PropertyChanges, DomainError> {
        non_negative("price", self.price)?;

        let status = match self.status.as_deref() {
            Some(raw) => Some(raw.parse::<PropertyStatus>().map_err(|UnknownTag(v)| {
                DomainError::validation("status", format!("\"{}\" is not a valid choice.", v))
            })?),
            None => None,
        };

        if let Some(currency) = &self.price_currency {
            let currency = currency.trim();
            if currency.is_empty() || currency.chars().count() > 5 {
                return Err(DomainError::validation(
                    "price_currency",
                    "Provide a currency abbreviation of at most 5 characters.",
                ));
            }
        }

        Ok(PropertyChanges {
            status,
            price: self.price,
            price_currency: self.price_currency.map(|c| c.trim().to_string()),
            description: self.description,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> NewProperty {
        NewProperty {
            price: 50000.0,
            price_currency: "EUR".to_string(),
            area: 110.0,
            total_area: 130.0,
            measured_area: None,
            total_rooms: Some(4.0),
            toilets: None,
            construction_year: Some(1998),
            renovation_year: None,
            total_floors: None,
            heating: String::new(),
            outer_walls: String::new(),
            roof_type: String::new(),
            description: String::new(),
            energy_class: None,
            street_name: "Maršal Tito".to_string(),
            street_number: None,
            postal_code: "6250".to_string(),
            city: "Kičevo".to_string(),
            region: None,
            country_code: "mk".to_string(),
            property_type: "apartment".to_string(),
            status: None,
            images: vec![],
        }
    }

    #[test]
    fn tags_parse_case_insensitively() {
        assert_eq!("apartment".parse::<PropertyType>(), Ok(PropertyType::Apartment));
        assert_eq!("Under contract".parse::<PropertyStatus>(), Ok(PropertyStatus::UnderContract));
        assert_eq!("coming-soon".parse::<PropertyStatus>(), Ok(PropertyStatus::ComingSoon));
        assert!("villa".parse::<PropertyType>().is_err());
    }

    #[test]
    fn tag_lists_split_commas_and_dedupe() {
        let tags: Vec<PropertyStatus> =
            parse_tag_list(&["ACTIVE,sold", " active ", ""], "status").unwrap();
        assert_eq!(tags, vec![PropertyStatus::Active, PropertyStatus::Sold]);

        let err = parse_tag_list::<PropertyType, _>(&["APARTMENT,castle"], "property_types")
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation { field: "property_types", .. }));
    }

    #[test]
    fn numbers_parse_with_field_scoped_errors() {
        assert_eq!(parse_number::<f64>(Some(" 1500.5 "), "min_price").unwrap(), Some(1500.5));
        assert_eq!(parse_number::<u64>(Some(""), "page").unwrap(), None);
        assert_eq!(parse_number::<u64>(None, "page").unwrap(), None);
        assert!(matches!(
            parse_number::<f64>(Some("abc"), "min_price"),
            Err(DomainError::Validation { field: "min_price", .. })
        ));
    }

    #[test]
    fn image_references_are_checked_by_extension() {
        assert!(validate_image_reference("media/property/images/1/front.JPG").is_ok());
        assert!(validate_image_reference("plan.gif").is_ok());
        assert!(validate_image_reference("notes.pdf").is_err());
        assert!(validate_image_reference("no_extension").is_err());
    }

    #[test]
    fn validate_resolves_defaults() {
        let draft = sample().validate(2026).unwrap();
        assert_eq!(draft.country_code, "MK");
        assert_eq!(draft.property_type, PropertyType::Apartment);
        assert_eq!(draft.status, PropertyStatus::Active);
    }

    #[test]
    fn validate_rejects_out_of_range_values() {
        let mut future = sample();
        future.construction_year = Some(2030);
        assert!(matches!(
            future.validate(2026),
            Err(DomainError::Validation { field: "construction_year", .. })
        ));

        let mut negative = sample();
        negative.price = -1.0;
        assert!(matches!(
            negative.validate(2026),
            Err(DomainError::Validation { field: "price", .. })
        ));

        let mut floors = sample();
        floors.total_floors = Some(0);
        assert!(matches!(
            floors.validate(2026),
            Err(DomainError::Validation { field: "total_floors", .. })
        ));

        let mut country = sample();
        country.country_code = "MKD".to_string();
        assert!(matches!(
            country.validate(2026),
            Err(DomainError::Validation { field: "country_code", .. })
        ));
    }
}
