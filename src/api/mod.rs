pub mod auth;
pub mod error;
pub mod favorites;
pub mod health;
pub mod properties;
pub mod search;

use axum::{
    routing::{get, post},
    Router,
};

use crate::infrastructure::AppState;

pub fn api_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Auth
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/me", get(auth::me))
        // Properties
        .route(
            "/properties",
            get(properties::list_properties).post(properties::create_property),
        )
        .route("/properties/count", get(properties::count_properties))
        .route("/properties/search", get(search::quick_search))
        .route("/properties/form-data", get(properties::form_data))
        .route(
            "/properties/:id",
            get(properties::get_property)
                .patch(properties::update_property)
                .delete(properties::delete_property),
        )
        // Favorites
        .route(
            "/favorites",
            get(favorites::list_favorites).post(favorites::create_favorite),
        )
        .route(
            "/favorites/:id",
            get(favorites::get_favorite).delete(favorites::delete_favorite),
        )
        .with_state(state)
}
