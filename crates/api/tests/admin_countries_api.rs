//! HTTP-level integration tests for the `/api/admin/countries` endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, post_json, put_json, seed_city, seed_country};
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_country_returns_201(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/admin/countries",
        serde_json::json!({"name": "Netherlands", "slug": "netherlands"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert!(json["country"]["id"].is_number());
    assert_eq!(json["country"]["name"], "Netherlands");
    assert_eq!(json["country"]["cityCount"], 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_country_derives_slug(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/admin/countries",
        serde_json::json!({"name": "New Zealand"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["country"]["slug"], "new-zealand");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_country_rejects_duplicate_name(pool: PgPool) {
    seed_country(&pool, "Netherlands", "netherlands").await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/admin/countries",
        serde_json::json!({"name": "Netherlands", "slug": "nl"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Country name already exists");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_countries_with_city_counts(pool: PgPool) {
    let nl = seed_country(&pool, "Netherlands", "netherlands").await;
    seed_country(&pool, "Belgium", "belgium").await;
    seed_city(&pool, "Utrecht", "utrecht", nl).await;
    seed_city(&pool, "Amsterdam", "amsterdam", nl).await;

    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/api/admin/countries").await).await;
    let countries = json["countries"].as_array().unwrap();
    assert_eq!(countries.len(), 2);
    // Ordered by name: Belgium first.
    assert_eq!(countries[0]["name"], "Belgium");
    assert_eq!(countries[0]["cityCount"], 0);
    assert_eq!(countries[1]["name"], "Netherlands");
    assert_eq!(countries[1]["cityCount"], 2);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_country(pool: PgPool) {
    let id = seed_country(&pool, "Holland", "holland").await;

    let app = common::build_test_app(pool);
    let response = put_json(
        app,
        &format!("/api/admin/countries/{id}"),
        serde_json::json!({"name": "Netherlands", "slug": "netherlands"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["country"]["name"], "Netherlands");
    assert_eq!(json["country"]["slug"], "netherlands");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_country_without_cities(pool: PgPool) {
    let id = seed_country(&pool, "Netherlands", "netherlands").await;

    let app = common::build_test_app(pool);
    let response = delete(app, &format!("/api/admin/countries/{id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_country_with_cities_returns_409(pool: PgPool) {
    let id = seed_country(&pool, "Netherlands", "netherlands").await;
    seed_city(&pool, "Utrecht", "utrecht", id).await;

    let app = common::build_test_app(pool);
    let response = delete(app, &format!("/api/admin/countries/{id}")).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Country has 1 cities and cannot be deleted");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_missing_country_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = delete(app, "/api/admin/countries/999999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
