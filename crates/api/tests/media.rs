mod common;

use axum::http::StatusCode;
use common::{build_test_app_with_media, get};
use http_body_util::BodyExt;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn stored_image_is_served_by_file_path(pool: PgPool) {
    let root = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(root.path().join("original_images")).unwrap();
    std::fs::write(root.path().join("original_images/west_lake.jpg"), b"\xFF\xD8jpeg").unwrap();

    let response = get(
        build_test_app_with_media(pool, root.path()),
        "/media/original_images/west_lake.jpg",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["content-type"], "image/jpeg");

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"\xFF\xD8jpeg");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_media_file_returns_404(pool: PgPool) {
    let root = tempfile::tempdir().unwrap();

    let response = get(
        build_test_app_with_media(pool, root.path()),
        "/media/original_images/nope.jpg",
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn path_traversal_is_not_served(pool: PgPool) {
    let outer = tempfile::tempdir().unwrap();
    let root = outer.path().join("media");
    std::fs::create_dir_all(&root).unwrap();
    std::fs::write(outer.path().join("secret.txt"), b"nope").unwrap();

    let response = get(build_test_app_with_media(pool, &root), "/media/../secret.txt").await;
    assert_ne!(response.status(), StatusCode::OK);
}
