mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, create, delete, get, post_json, put_json};
use serde_json::json;
use sqlx::PgPool;

struct Fixture {
    owner: i64,
    other: i64,
    destination: i64,
}

async fn fixture(pool: &PgPool) -> Fixture {
    let mut users = Vec::new();
    for name in ["nora", "otto"] {
        users.push(
            create(
                pool,
                "/api/v1/users/register",
                json!({
                    "username": name,
                    "email": format!("{name}@example.com"),
                    "password": "river-lantern-42",
                }),
            )
            .await,
        );
    }
    let destination = create(
        pool,
        "/api/v1/destinations",
        json!({ "title": "Xiamen", "location": "Fujian" }),
    )
    .await;
    Fixture {
        owner: users[0],
        other: users[1],
        destination,
    }
}

async fn create_itinerary(pool: &PgPool, f: &Fixture, title: &str, is_public: bool) -> i64 {
    create(
        pool,
        "/api/v1/itineraries",
        json!({
            "title": title,
            "user_id": f.owner,
            "destination_id": f.destination,
            "start_date": "2025-05-01",
            "end_date": "2025-05-03",
            "is_public": is_public,
        }),
    )
    .await
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_itinerary_with_end_before_start_returns_400(pool: PgPool) {
    let f = fixture(&pool).await;

    let response = post_json(
        build_test_app(pool),
        "/api/v1/itineraries",
        json!({
            "title": "Backwards",
            "user_id": f.owner,
            "destination_id": f.destination,
            "start_date": "2025-05-03",
            "end_date": "2025-05-01",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_private_itinerary_is_visible_only_to_owner(pool: PgPool) {
    let f = fixture(&pool).await;
    let public = create_itinerary(&pool, &f, "Beaches", true).await;
    let private = create_itinerary(&pool, &f, "Secret", false).await;

    let uri = format!("/api/v1/itineraries?user_id={}", f.other);
    let json = body_json(get(build_test_app(pool.clone()), &uri).await).await;
    let ids: Vec<_> = json["data"].as_array().unwrap().iter().map(|i| i["id"].as_i64().unwrap()).collect();
    assert_eq!(ids, vec![public]);

    let uri = format!("/api/v1/itineraries?user_id={}", f.owner);
    let json = body_json(get(build_test_app(pool.clone()), &uri).await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);

    let response = get(build_test_app(pool.clone()), &format!("/api/v1/itineraries/{private}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let uri = format!("/api/v1/itineraries/{private}?user_id={}", f.owner);
    let response = get(build_test_app(pool), &uri).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_checks_range_against_stored_dates(pool: PgPool) {
    let f = fixture(&pool).await;
    let id = create_itinerary(&pool, &f, "Trip", true).await;
    let uri = format!("/api/v1/itineraries/{id}");

    let response = put_json(build_test_app(pool.clone()), &uri, json!({ "end_date": "2025-04-30" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = put_json(build_test_app(pool), &uri, json!({ "end_date": "2025-05-01" })).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["end_date"], "2025-05-01");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_days_and_items_hierarchy(pool: PgPool) {
    let f = fixture(&pool).await;
    let itinerary = create_itinerary(&pool, &f, "Trip", true).await;

    let day = create(
        &pool,
        &format!("/api/v1/itineraries/{itinerary}/days"),
        json!({ "day_number": 1, "date": "2025-05-01" }),
    )
    .await;

    let items_uri = format!("/api/v1/itinerary-days/{day}/items");
    create(
        &pool,
        &items_uri,
        json!({ "custom_location": "Night market", "start_time": "19:00:00", "end_time": "21:00:00" }),
    )
    .await;
    create(
        &pool,
        &items_uri,
        json!({ "custom_location": "Hotel breakfast", "start_time": "08:00:00", "end_time": "09:00:00" }),
    )
    .await;

    let json = body_json(get(build_test_app(pool.clone()), &items_uri).await).await;
    let locations: Vec<_> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["custom_location"].as_str().unwrap())
        .collect();
    assert_eq!(locations, vec!["Hotel breakfast", "Night market"]);

    let response = delete(build_test_app(pool.clone()), &format!("/api/v1/itineraries/{itinerary}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(build_test_app(pool), &format!("/api/v1/itinerary-days/{day}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_day_number_returns_409(pool: PgPool) {
    let f = fixture(&pool).await;
    let itinerary = create_itinerary(&pool, &f, "Trip", true).await;
    let uri = format!("/api/v1/itineraries/{itinerary}/days");

    create(&pool, &uri, json!({ "day_number": 1, "date": "2025-05-01" })).await;
    let response = post_json(
        build_test_app(pool),
        &uri,
        json!({ "day_number": 1, "date": "2025-05-02" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_day_number_zero_returns_400(pool: PgPool) {
    let f = fixture(&pool).await;
    let itinerary = create_itinerary(&pool, &f, "Trip", true).await;

    let response = post_json(
        build_test_app(pool),
        &format!("/api/v1/itineraries/{itinerary}/days"),
        json!({ "day_number": 0, "date": "2025-05-01" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_item_without_target_returns_400(pool: PgPool) {
    let f = fixture(&pool).await;
    let itinerary = create_itinerary(&pool, &f, "Trip", true).await;
    let day = create(
        &pool,
        &format!("/api/v1/itineraries/{itinerary}/days"),
        json!({ "day_number": 1, "date": "2025-05-01" }),
    )
    .await;

    let response = post_json(
        build_test_app(pool),
        &format!("/api/v1/itinerary-days/{day}/items"),
        json!({ "start_time": "10:00:00", "end_time": "11:00:00" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
