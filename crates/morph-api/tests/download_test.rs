//! Download and retention integration tests.
//!
//! Run with: `cargo test -p morph-api --test download_test`

mod helpers;

use axum_test::multipart::{MultipartForm, Part};
use helpers::{fixtures, setup_test_app};
use serde_json::Value;
use std::time::Duration;

async fn convert_png(app: &helpers::TestApp) -> String {
    let response = app
        .client()
        .post("/api/convert")
        .multipart(
            MultipartForm::new()
                .add_part(
                    "file",
                    Part::bytes(fixtures::png_with_alpha()).file_name("photo.png"),
                )
                .add_text("category", "image")
                .add_text("targetFormat", "png"),
        )
        .await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    body["filename"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_download_missing_artifact() {
    let app = setup_test_app();
    let response = app
        .client()
        .get("/api/download/00000000-0000-0000-0000-000000000000_converted.png")
        .await;

    assert_eq!(response.status_code(), 404);
    let body: Value = response.json();
    assert_eq!(body["error"], "File not found");
}

#[tokio::test]
async fn test_download_rejects_path_traversal() {
    let app = setup_test_app();
    let response = app.client().get("/api/download/..%2Fsecret.txt").await;
    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn test_download_serves_attachment() {
    let app = setup_test_app();
    let filename = convert_png(&app).await;

    let response = app
        .client()
        .get(&format!("/api/download/{}", filename))
        .await;

    assert_eq!(response.status_code(), 200);
    let disposition = response
        .headers()
        .get("content-disposition")
        .expect("disposition header")
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.starts_with("attachment"));
    assert!(disposition.contains(&filename));
    assert!(!response.as_bytes().is_empty());
}

#[tokio::test]
async fn test_swept_artifact_is_gone() {
    let app = setup_test_app();
    let filename = convert_png(&app).await;

    // Zero max-age: the artifact is already past retention.
    let removed = morph_processing::sweeper::sweep(app.converted_dir.path(), Duration::ZERO);
    assert!(removed >= 1);

    let response = app
        .client()
        .get(&format!("/api/download/{}", filename))
        .await;
    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn test_fresh_artifact_survives_sweep() {
    let app = setup_test_app();
    let filename = convert_png(&app).await;

    let removed =
        morph_processing::sweeper::sweep(app.converted_dir.path(), Duration::from_secs(3600));
    assert_eq!(removed, 0);

    let response = app
        .client()
        .get(&format!("/api/download/{}", filename))
        .await;
    assert_eq!(response.status_code(), 200);
}
