use crate::api;
use crate::domain;
use crate::services;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Registers the JWT bearer scheme referenced by authenticated endpoints.
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        api::health::health_check,
        api::auth::register,
        api::auth::login,
        api::auth::me,
        api::properties::list_properties,
        api::properties::count_properties,
        api::properties::create_property,
        api::properties::get_property,
        api::properties::update_property,
        api::properties::delete_property,
        api::properties::form_data,
        api::search::quick_search,
        api::favorites::list_favorites,
        api::favorites::create_favorite,
        api::favorites::get_favorite,
        api::favorites::delete_favorite,
    ),
    components(
        schemas(
            domain::PropertyType,
            domain::PropertyStatus,
            domain::PropertySummary,
            domain::PropertyImage,
            domain::PropertyDetail,
            domain::NewProperty,
            domain::NewPropertyImage,
            domain::PropertyUpdate,
            domain::CitySuggestion,
            domain::StreetSuggestion,
            domain::AddressSuggestion,
            domain::SearchSuggestions,
            domain::Favorite,
            domain::User,
            services::FormData,
            services::RegisterRequest,
            services::LoginRequest,
            services::TokenResponse,
            api::properties::CountResponse,
            api::favorites::CreateFavorite,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "balkan-listings", description = "Property listing API")
    )
)]
pub struct ApiDoc;
