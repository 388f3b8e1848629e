mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, create, get, post_json, put_json};
use serde_json::{json, Value};
use sqlx::PgPool;
use travelguide_db::models::attraction::CreateAttraction;
use travelguide_db::models::image::{CreateAttractionImage, CreateImage};
use travelguide_db::repositories::{AttractionRepo, ImageRepo};

async fn seed(pool: &PgPool) -> (i64, i64) {
    let hangzhou = create(
        pool,
        "/api/v1/destinations",
        json!({ "title": "Hangzhou", "location": "Hangzhou" }),
    )
    .await;
    let suzhou = create(
        pool,
        "/api/v1/destinations",
        json!({ "title": "Suzhou", "location": "Suzhou" }),
    )
    .await;
    (hangzhou, suzhou)
}

async fn create_attraction(pool: &PgPool, name: &str, destination: i64, category: &str) -> i64 {
    create(
        pool,
        "/api/v1/attractions",
        json!({
            "name": name,
            "location": name,
            "destination_id": destination,
            "category": category,
        }),
    )
    .await
}

fn names(json: &Value) -> Vec<String> {
    let mut names: Vec<String> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["name"].as_str().unwrap().to_string())
        .collect();
    names.sort();
    names
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_attraction_applies_defaults(pool: PgPool) {
    let (hangzhou, _) = seed(&pool).await;

    let response = post_json(
        build_test_app(pool),
        "/api/v1/attractions",
        json!({ "name": "West Lake", "location": "Xihu", "destination_id": hangzhou }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["data"]["category"], "景点");
    assert_eq!(json["data"]["rating"], 5.0);
    assert_eq!(json["data"]["opening_hours"], "");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_attraction_for_missing_destination_returns_400(pool: PgPool) {
    let response = post_json(
        build_test_app(pool),
        "/api/v1/attractions",
        json!({ "name": "Ghost", "location": "?", "destination_id": 777 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "INVALID_REFERENCE");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_filters_by_destination_and_category(pool: PgPool) {
    let (hangzhou, suzhou) = seed(&pool).await;
    create_attraction(&pool, "West Lake", hangzhou, "风景名胜").await;
    create_attraction(&pool, "Lingyin", hangzhou, "寺庙").await;
    create_attraction(&pool, "Humble Garden", suzhou, "风景名胜").await;

    let uri = format!("/api/v1/attractions?destination={hangzhou}");
    let json = body_json(get(build_test_app(pool.clone()), &uri).await).await;
    assert_eq!(names(&json), vec!["Lingyin", "West Lake"]);

    let uri = format!(
        "/api/v1/attractions?destination={hangzhou}&category={}",
        urlencoding::encode("风景名胜")
    );
    let json = body_json(get(build_test_app(pool.clone()), &uri).await).await;
    assert_eq!(names(&json), vec!["West Lake"]);

    let uri = format!("/api/v1/attractions?category={}", urlencoding::encode("风景名胜"));
    let json = body_json(get(build_test_app(pool), &uri).await).await;
    assert_eq!(names(&json), vec!["Humble Garden", "West Lake"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_filters_by_tag_name(pool: PgPool) {
    let (hangzhou, _) = seed(&pool).await;
    let lake = create_attraction(&pool, "West Lake", hangzhou, "风景名胜").await;
    create_attraction(&pool, "Museum", hangzhou, "博物馆").await;
    let tag = create(&pool, "/api/v1/tags", json!({ "name": "lakes", "category": "nature" })).await;

    let response = post_json(
        build_test_app(pool.clone()),
        &format!("/api/v1/attractions/{lake}/tags"),
        json!({ "tag_id": tag }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(get(build_test_app(pool), "/api/v1/attractions?tag=lakes").await).await;
    assert_eq!(names(&json), vec!["West Lake"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_attraction_counts_views(pool: PgPool) {
    let (hangzhou, _) = seed(&pool).await;
    let id = create_attraction(&pool, "Leifeng Pagoda", hangzhou, "景点").await;

    let response = get(build_test_app(pool), &format!("/api/v1/attractions/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["views_count"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_attraction_rejects_bad_rating(pool: PgPool) {
    let (hangzhou, _) = seed(&pool).await;
    let id = create_attraction(&pool, "Leifeng Pagoda", hangzhou, "景点").await;

    let response = put_json(
        build_test_app(pool),
        &format!("/api/v1/attractions/{id}"),
        json!({ "rating": -1.0 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_images_are_listed_in_gallery_order(pool: PgPool) {
    let (hangzhou, _) = seed(&pool).await;

    let mut gallery = Vec::new();
    for (order, title) in [(2, "second"), (1, "first")] {
        let image = ImageRepo::create(
            &pool,
            &CreateImage {
                title: title.into(),
                file_path: format!("original_images/{title}.jpg"),
                width: 800,
                height: 600,
                file_size_bytes: 1024,
            },
        )
        .await
        .unwrap();
        gallery.push(CreateAttractionImage {
            image_id: image.id,
            title: title.into(),
            description: String::new(),
            sort_order: order,
        });
    }
    let input = CreateAttraction {
        name: "West Lake".into(),
        location: "Xihu".into(),
        destination_id: hangzhou,
        ..Default::default()
    };
    let id = AttractionRepo::upsert_with_gallery(&pool, &input, &gallery)
        .await
        .unwrap()
        .attraction
        .id;

    let response = get(build_test_app(pool), &format!("/api/v1/attractions/{id}/images")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let titles: Vec<_> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["first", "second"]);
    assert_eq!(json["data"][0]["file_path"], "original_images/first.jpg");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_images_of_missing_attraction_returns_404(pool: PgPool) {
    let response = get(build_test_app(pool), "/api/v1/attractions/5/images").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
