#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use balkan_listings::auth;
use balkan_listings::db;
use balkan_listings::models::{favorite, property, property_image, user};
use balkan_listings::server::build_router;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use serde_json::Value;
use tower::util::ServiceExt; // for `oneshot`

pub async fn setup() -> (Router, DatabaseConnection) {
    let db = db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB");
    (build_router(db.clone(), &[]), db)
}

pub async fn create_user(db: &DatabaseConnection, username: &str) -> i32 {
    let now = chrono::Utc::now().to_rfc3339();
    let user = user::ActiveModel {
        username: Set(username.to_string()),
        email: Set(format!("{}@example.mk", username)),
        password_hash: Set("hash".to_string()),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };
    user.insert(db).await.expect("Failed to create user").id
}

pub fn token_for(user_id: i32, username: &str) -> String {
    auth::create_jwt(user_id, username).expect("Failed to create token")
}

/// Listing fixture. Defaults describe an active apartment in Kičevo, MK.
pub struct PropertySeed {
    pub price: f64,
    pub area: f64,
    pub total_rooms: Option<f64>,
    pub construction_year: Option<i32>,
    pub street_name: &'static str,
    pub street_number: Option<&'static str>,
    pub postal_code: &'static str,
    pub city: &'static str,
    pub country_code: &'static str,
    pub property_type: &'static str,
    pub status: &'static str,
    pub owner_id: Option<i32>,
}

impl Default for PropertySeed {
    fn default() -> Self {
        Self {
            price: 50000.0,
            area: 110.0,
            total_rooms: Some(4.0),
            construction_year: None,
            street_name: "Maršal Tito",
            street_number: Some("12"),
            postal_code: "6250",
            city: "Kičevo",
            country_code: "MK",
            property_type: "APARTMENT",
            status: "ACTIVE",
            owner_id: None,
        }
    }
}

pub async fn insert_property(db: &DatabaseConnection, seed: PropertySeed) -> i32 {
    let now = chrono::Utc::now().to_rfc3339();
    let property = property::ActiveModel {
        price: Set(seed.price),
        price_currency: Set("EUR".to_string()),
        area: Set(seed.area),
        total_area: Set(seed.area + 20.0),
        measured_area: Set(None),
        total_rooms: Set(seed.total_rooms),
        toilets: Set(None),
        construction_year: Set(seed.construction_year),
        renovation_year: Set(None),
        total_floors: Set(None),
        heating: Set(String::new()),
        outer_walls: Set(String::new()),
        roof_type: Set(String::new()),
        description: Set("Sunny flat close to the centre".to_string()),
        energy_class: Set(Some("B".to_string())),
        street_name: Set(seed.street_name.to_string()),
        street_number: Set(seed.street_number.map(str::to_string)),
        postal_code: Set(seed.postal_code.to_string()),
        city: Set(seed.city.to_string()),
        region: Set(None),
        country_code: Set(seed.country_code.to_string()),
        property_type: Set(seed.property_type.to_string()),
        status: Set(seed.status.to_string()),
        owner_id: Set(seed.owner_id),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };
    property
        .insert(db)
        .await
        .expect("Failed to create property")
        .id
}

pub async fn insert_image(
    db: &DatabaseConnection,
    property_id: i32,
    image: &str,
    is_primary: bool,
) -> i32 {
    let now = chrono::Utc::now().to_rfc3339();
    let image = property_image::ActiveModel {
        property_id: Set(property_id),
        title: Set(String::new()),
        description: Set(String::new()),
        is_primary: Set(is_primary),
        image: Set(image.to_string()),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };
    image.insert(db).await.expect("Failed to create image").id
}

pub async fn insert_favorite(db: &DatabaseConnection, user_id: i32, property_id: i32) -> i32 {
    let now = chrono::Utc::now().to_rfc3339();
    let favorite = favorite::ActiveModel {
        user_id: Set(user_id),
        property_id: Set(property_id),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };
    favorite
        .insert(db)
        .await
        .expect("Failed to create favorite")
        .id
}

/// Send a request and decode the JSON body (`Value::Null` for empty bodies).
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

pub async fn get(app: &Router, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
    send(app, Method::GET, uri, token, None).await
}

/// Ids of a listing response, in response order.
pub fn ids(body: &Value) -> Vec<i64> {
    body.as_array()
        .expect("expected a JSON array")
        .iter()
        .map(|row| row["id"].as_i64().unwrap())
        .collect()
}
