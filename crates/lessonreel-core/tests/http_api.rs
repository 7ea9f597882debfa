//! HttpLessonApi against a local backend

use axum::{
    extract::Path,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use lessonreel_core::{
    ClientConfig, HttpLessonApi, LessonApi, LessonApp, LessonId, SessionStatus, VideoId,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio_test::{assert_err, assert_ok};

/// Timestamp the backend issues for a lesson; "legacy" lessons use a string
fn issued_timestamp(id: &str) -> Value {
    match id {
        "legacy" => json!("2024-06-10T06:13:20Z"),
        _ => json!(1_718_000_000_000_i64),
    }
}

async fn video_ref(Path(id): Path<String>) -> Result<Json<Value>, StatusCode> {
    if id == "404" {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(Json(json!({
        "encryptedVideoId": format!("enc:{}", id),
        "timestamp": issued_timestamp(&id),
        "checksum": format!("sum:{}", id),
    })))
}

/// Accepts only a reference forwarded exactly as issued
async fn decrypt(Json(body): Json<Value>) -> Result<Json<Value>, StatusCode> {
    let encrypted = body["encryptedVideoId"].as_str().ok_or(StatusCode::BAD_REQUEST)?;
    let id = encrypted.strip_prefix("enc:").ok_or(StatusCode::BAD_REQUEST)?;

    if body["checksum"] != json!(format!("sum:{}", id)) || body["timestamp"] != issued_timestamp(id) {
        return Err(StatusCode::FORBIDDEN);
    }
    if id == "bad" {
        return Ok(Json(json!({ "unexpected": true })));
    }
    Ok(Json(json!({ "videoId": format!("yt-{}", id) })))
}

async fn spawn_backend(lessons: Router) -> ClientConfig {
    let app = Router::new().nest("/api", lessons);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    ClientConfig::default()
        .with_base_url(&format!("http://{}/api", addr))
        .unwrap()
        .with_timeout_ms(5_000)
}

fn backend(lessons: Value) -> Router {
    Router::new()
        .route("/lessons", get(move || async move { Json(lessons) }))
        .route("/lessons/{id}/video", get(video_ref))
        .route("/decrypt", post(decrypt))
}

#[tokio::test]
async fn test_list_lessons_in_server_order() {
    let config = spawn_backend(backend(json!([
        {"id": 2, "title": "Second", "description": "b", "thumbnail": "t2", "duration": "2:00"},
        {"id": 1, "title": "First", "description": "a", "thumbnail": "t1", "duration": "1:00"},
    ])))
    .await;
    let api = HttpLessonApi::new(&config).unwrap();

    let lessons = assert_ok!(api.list_lessons().await);
    let titles: Vec<_> = lessons.iter().map(|l| l.title.as_str()).collect();
    assert_eq!(titles, ["Second", "First"]);
    assert_eq!(lessons[0].id, LessonId::from("2"));
}

#[tokio::test]
async fn test_two_step_resolution() {
    let config = spawn_backend(backend(json!([]))).await;
    let api = HttpLessonApi::new(&config).unwrap();

    let reference = api.fetch_video_ref(&LessonId::from("7")).await.unwrap();
    assert_eq!(reference.encrypted_video_id, "enc:7");

    let video = api.decrypt(&reference).await.unwrap();
    assert_eq!(video, VideoId::new("yt-7"));
}

#[tokio::test]
async fn test_tampered_reference_is_rejected() {
    let config = spawn_backend(backend(json!([]))).await;
    let api = HttpLessonApi::new(&config).unwrap();

    let mut reference = api.fetch_video_ref(&LessonId::from("7")).await.unwrap();
    reference.checksum = json!("sum:7x");

    let err = assert_err!(api.decrypt(&reference).await);
    assert_eq!(err.error_code(), "DECRYPT");
}

#[tokio::test]
async fn test_string_timestamp_is_forwarded_unchanged() {
    let config = spawn_backend(backend(json!([]))).await;
    let api = HttpLessonApi::new(&config).unwrap();

    let reference = assert_ok!(api.fetch_video_ref(&LessonId::from("legacy")).await);
    assert_eq!(reference.timestamp, json!("2024-06-10T06:13:20Z"));
    assert_eq!(reference.issued_at(), None);

    let video = assert_ok!(api.decrypt(&reference).await);
    assert_eq!(video, VideoId::new("yt-legacy"));
}

#[tokio::test]
async fn test_error_statuses_map_to_taxonomy() {
    let config = spawn_backend(backend(json!([]))).await;
    let api = HttpLessonApi::new(&config).unwrap();

    let err = api.fetch_video_ref(&LessonId::from("404")).await.unwrap_err();
    assert_eq!(err.error_code(), "REFERENCE_FETCH");

    let reference = api.fetch_video_ref(&LessonId::from("bad")).await.unwrap();
    let err = api.decrypt(&reference).await.unwrap_err();
    assert_eq!(err.error_code(), "DECRYPT");
}

#[tokio::test]
async fn test_malformed_catalog() {
    let lessons = Router::new().route("/lessons", get(|| async { "<html>maintenance</html>" }));
    let config = spawn_backend(lessons).await;
    let api = HttpLessonApi::new(&config).unwrap();

    let err = assert_err!(api.list_lessons().await);
    assert_eq!(err.error_code(), "LIST_FETCH");
}

#[tokio::test]
async fn test_unreachable_backend() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = ClientConfig::default()
        .with_base_url(&format!("http://{}/api", addr))
        .unwrap();
    let app = LessonApp::from_config(&config).unwrap();

    let state = app.mount().await;
    assert!(matches!(state, lessonreel_core::CatalogState::Failed(_)));
}

#[tokio::test]
async fn test_app_end_to_end() {
    let config = spawn_backend(backend(json!([
        {"id": "intro", "title": "Intro", "description": "", "thumbnail": "", "duration": "0:30"},
    ])))
    .await;
    let app = LessonApp::from_config(&config).unwrap();

    let catalog = app.mount().await;
    let first = catalog.lessons().unwrap()[0].id.clone();

    app.play(&first).await;
    assert_eq!(app.playback().status(), SessionStatus::Ready(VideoId::new("yt-intro")));

    let url = app.playback().embed_url().unwrap();
    assert_eq!(url.path(), "/embed/yt-intro");

    let api: Arc<dyn LessonApi> = Arc::new(HttpLessonApi::new(&config).unwrap());
    assert_eq!(api.list_lessons().await.unwrap().len(), 1);
}
