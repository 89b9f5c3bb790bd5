mod common;

use axum::http::{Method, StatusCode};
use balkan_listings::models::favorite;
use common::*;
use sea_orm::{EntityTrait, PaginatorTrait};
use serde_json::json;

#[tokio::test]
async fn test_create_favorite() {
    let (app, db) = setup().await;
    let user = create_user(&db, "ana").await;
    let property = insert_property(&db, PropertySeed::default()).await;
    insert_image(&db, property, "media/front.jpg", true).await;
    let token = token_for(user, "ana");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/favorites",
        Some(&token),
        Some(json!({ "property_id": property })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["user"], user);
    assert_eq!(body["property_id"], property);
    assert_eq!(body["property"]["id"], property);
    assert_eq!(body["property"]["thumbnail"], "media/front.jpg");
    assert_eq!(body["property"]["favorite"], true);
}

#[tokio::test]
async fn test_duplicate_favorite_is_a_conflict() {
    let (app, db) = setup().await;
    let user = create_user(&db, "ana").await;
    let property = insert_property(&db, PropertySeed::default()).await;
    let token = token_for(user, "ana");
    let payload = json!({ "property_id": property });

    let (status, _) = send(&app, Method::POST, "/api/favorites", Some(&token), Some(payload.clone())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, Method::POST, "/api/favorites", Some(&token), Some(payload)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "duplicate_favorite");
    assert!(body["detail"]
        .as_str()
        .unwrap()
        .contains("already in your favorites"));

    let stored = favorite::Entity::find().count(&db).await.unwrap();
    assert_eq!(stored, 1);
}

#[tokio::test]
async fn test_same_property_for_two_users_is_allowed() {
    let (app, db) = setup().await;
    let ana = create_user(&db, "ana").await;
    let marko = create_user(&db, "marko").await;
    let property = insert_property(&db, PropertySeed::default()).await;

    for (id, name) in [(ana, "ana"), (marko, "marko")] {
        let token = token_for(id, name);
        let (status, _) = send(
            &app,
            Method::POST,
            "/api/favorites",
            Some(&token),
            Some(json!({ "property_id": property })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }
}

#[tokio::test]
async fn test_favorite_for_unknown_property() {
    let (app, db) = setup().await;
    let user = create_user(&db, "ana").await;
    let token = token_for(user, "ana");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/favorites",
        Some(&token),
        Some(json!({ "property_id": 9999 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["property_id"][0],
        "Invalid pk \"9999\" - object does not exist."
    );
}

#[tokio::test]
async fn test_favorites_require_authentication() {
    let (app, db) = setup().await;
    let property = insert_property(&db, PropertySeed::default()).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/favorites",
        None,
        Some(json!({ "property_id": property })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["detail"], "Authentication credentials were not provided.");

    let (status, _) = get(&app, "/api/favorites", Some("not-a-jwt")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_list_and_retrieve_own_favorites() {
    let (app, db) = setup().await;
    let ana = create_user(&db, "ana").await;
    let marko = create_user(&db, "marko").await;
    let first = insert_property(&db, PropertySeed::default()).await;
    // Favorites are listed even when the property left the active market.
    let sold = insert_property(
        &db,
        PropertySeed {
            status: "SOLD",
            ..Default::default()
        },
    )
    .await;
    let mine_a = insert_favorite(&db, ana, first).await;
    let mine_b = insert_favorite(&db, ana, sold).await;
    let theirs = insert_favorite(&db, marko, first).await;
    let token = token_for(ana, "ana");

    let (status, body) = get(&app, "/api/favorites", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![mine_a as i64, mine_b as i64]);
    assert_eq!(body[1]["property"]["id"], sold);
    assert_eq!(body[1]["property"]["favorite"], true);

    let (status, body) = get(&app, &format!("/api/favorites/{}", mine_a), Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["property_id"], first);

    let (status, body) = get(&app, &format!("/api/favorites/{}", theirs), Some(&token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Not found.");
}

#[tokio::test]
async fn test_delete_favorite_is_owner_only() {
    let (app, db) = setup().await;
    let ana = create_user(&db, "ana").await;
    let marko = create_user(&db, "marko").await;
    let property = insert_property(&db, PropertySeed::default()).await;
    let favorite_id = insert_favorite(&db, ana, property).await;
    let uri = format!("/api/favorites/{}", favorite_id);

    let (status, _) = send(&app, Method::DELETE, &uri, Some(&token_for(marko, "marko")), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(favorite::Entity::find().count(&db).await.unwrap(), 1);

    let ana_token = token_for(ana, "ana");
    let (status, body) = send(&app, Method::DELETE, &uri, Some(&ana_token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, serde_json::Value::Null);

    let (status, _) = send(&app, Method::DELETE, &uri, Some(&ana_token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(favorite::Entity::find().count(&db).await.unwrap(), 0);
}
