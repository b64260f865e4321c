//! End-to-end tests of the HTTP surface over a temp media root and SQLite database

mod common;

use axum::http::StatusCode;
use common::*;
use serde_json::json;

const WORK_ID: i64 = 123456;

/// Work RJ123456 with one top-level track and a lyrics-bearing subdirectory
///
/// Listing order: 0 `track1.lrc`, 1 `track1.mp3`, 2 `SE/01.flac`, 3 `SE/notes.txt`
async fn env_with_work() -> TestEnv {
    let env = TestEnv::new().await;
    let work_dir = env.add_work(WORK_ID, ROOT_FOLDER, "RJ123456").await;
    write_file(&work_dir, "track1.mp3", b"0123456789abcdef");
    write_file(&work_dir, "track1.lrc", "[00:01.00]こんにちは".as_bytes());
    write_file(&work_dir, "SE/01.flac", b"fLaC0000");
    write_file(&work_dir, "SE/notes.txt", b"plain notes");
    env
}

#[tokio::test]
async fn test_health() {
    let env = TestEnv::new().await;
    let response = get(&env.app(false), "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_stream_serves_local_file() {
    let env = env_with_work().await;
    let response = get(&env.app(false), "/stream/123456/1").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(header(&response, "content-type"), Some("audio/mpeg"));
    assert!(header(&response, "content-disposition").is_none());
    assert_eq!(body_bytes(response).await, b"0123456789abcdef");
}

#[tokio::test]
async fn test_stream_honours_range() {
    let env = env_with_work().await;
    let response = get_with_range(&env.app(false), "/stream/123456/1", "bytes=4-7").await;

    assert_eq!(response.status(), StatusCode::PARTIAL_CONTENT);
    assert_eq!(header(&response, "content-range"), Some("bytes 4-7/16"));
    assert_eq!(body_bytes(response).await, b"4567");
}

#[tokio::test]
async fn test_stream_flac_content_type() {
    let env = env_with_work().await;
    let response = get(&env.app(false), "/stream/123456/2").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(header(&response, "content-type"), Some("audio/flac"));
}

#[tokio::test]
async fn test_stream_lyrics_has_charset() {
    let env = env_with_work().await;
    let response = get(&env.app(false), "/stream/123456/0").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        header(&response, "content-type"),
        Some("text/plain; charset=UTF-8")
    );
}

#[tokio::test]
async fn test_stream_shift_jis_text() {
    let env = TestEnv::new().await;
    let work_dir = env.add_work(7, ROOT_FOLDER, "RJ000007").await;
    let (encoded, _, _) =
        encoding_rs::SHIFT_JIS.encode("これはシフトJISで書かれたテキストファイルです。");
    write_file(&work_dir, "readme.txt", &encoded);

    let response = get(&env.app(false), "/stream/7/0").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        header(&response, "content-type"),
        Some("text/plain; charset=Shift_JIS")
    );
    assert_eq!(body_bytes(response).await, encoded.into_owned());
}

#[tokio::test]
async fn test_offload_redirects_stream_and_download() {
    let env = env_with_work().await;
    let app = env.app(true);

    let stream = get(&app, "/stream/123456/1").await;
    assert_eq!(stream.status(), StatusCode::FOUND);
    assert_eq!(
        header(&stream, "location"),
        Some("/media/stream/VoiceWork/RJ123456/track1.mp3")
    );

    let download = get(&app, "/download/123456/2").await;
    assert_eq!(download.status(), StatusCode::FOUND);
    assert_eq!(
        header(&download, "location"),
        Some("/media/download/VoiceWork/RJ123456/SE/01.flac")
    );
}

#[tokio::test]
async fn test_offload_location_is_percent_encoded() {
    let env = TestEnv::new().await;
    let work_dir = env.add_work(8, ROOT_FOLDER, "RJ000008").await;
    write_file(&work_dir, "本編/01 トラック.mp3", b"mp3");

    let response = get(&env.app(true), "/stream/8/0").await;

    assert_eq!(response.status(), StatusCode::FOUND);
    let location = header(&response, "location").unwrap();
    assert!(location.starts_with("/media/stream/VoiceWork/RJ000008/"));
    assert!(location.is_ascii());
    assert!(!location.contains(' '));
}

#[tokio::test]
async fn test_text_is_inline_even_with_offload() {
    let env = env_with_work().await;
    let app = env.app(true);

    let stream = get(&app, "/stream/123456/3").await;
    assert_eq!(stream.status(), StatusCode::OK);
    assert_eq!(
        header(&stream, "content-type"),
        Some("text/plain; charset=UTF-8")
    );
    assert_eq!(body_bytes(stream).await, b"plain notes");

    let download = get(&app, "/download/123456/0").await;
    assert_eq!(download.status(), StatusCode::OK);
    assert!(header(&download, "content-disposition")
        .unwrap()
        .starts_with("attachment"));
}

#[tokio::test]
async fn test_download_is_attachment() {
    let env = env_with_work().await;
    let response = get(&env.app(false), "/download/123456/1").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        header(&response, "content-disposition"),
        Some("attachment; filename=\"track1.mp3\"; filename*=UTF-8''track1.mp3")
    );
    assert_eq!(body_bytes(response).await, b"0123456789abcdef");
}

#[tokio::test]
async fn test_absolute_work_dir_resolves_under_root() {
    let env = TestEnv::new().await;
    let work_dir = env.add_work(11, ROOT_FOLDER, "RJ000011").await;
    write_file(&work_dir, "SE/01.mp3", b"inside root");
    kikoeru_storage::works::upsert(
        env.db.pool(),
        &kikoeru_core::types::Work::new(11, ROOT_FOLDER, "/RJ000011"),
    )
    .await
    .unwrap();

    let inline = get(&env.app(false), "/stream/11/0").await;
    assert_eq!(inline.status(), StatusCode::OK);
    assert_eq!(body_bytes(inline).await, b"inside root");

    let redirect = get(&env.app(true), "/stream/11/0").await;
    assert_eq!(
        header(&redirect, "location"),
        Some("/media/stream/VoiceWork/RJ000011/SE/01.mp3")
    );
}

#[tokio::test]
async fn test_unconfigured_root_folder_names_folder() {
    let env = TestEnv::new().await;
    env.add_work(9, "OldDrive", "RJ000009").await;

    let response = get(&env.app(false), "/stream/9/0").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("OldDrive"));
}

#[tokio::test]
async fn test_index_out_of_range() {
    let env = env_with_work().await;
    let app = env.app(false);

    for uri in [
        "/stream/123456/4",
        "/download/123456/99",
        "/check-lrc/123456/4",
    ] {
        let response = get(&app, uri).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", uri);
    }
}

#[tokio::test]
async fn test_invalid_path_parameters() {
    let env = env_with_work().await;
    let app = env.app(false);

    for uri in [
        "/stream/123456/-1",
        "/stream/abc/0",
        "/download/123456/1.5",
        "/history/alice/abc",
    ] {
        let response = get(&app, uri).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", uri);
        let body = body_json(response).await;
        assert!(body["error"].is_string(), "{}", uri);
    }
}

#[tokio::test]
async fn test_malformed_history_body_answers_json_error() {
    let env = TestEnv::new().await;
    let app = env.app(false);

    // Missing `hash`
    let response = post_json(
        &app,
        "/history",
        &json!({ "username": "alice", "id": 1, "play_time": 1.0 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body_json(response).await["error"].is_string());

    // No JSON content type
    let request = axum::http::Request::builder()
        .uri("/history")
        .method("POST")
        .body(axum::body::Body::from("{}"))
        .unwrap();
    let response = tower::ServiceExt::oneshot(app.clone(), request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert!(body_json(response).await["error"].is_string());
}

#[tokio::test]
async fn test_unknown_work() {
    let env = TestEnv::new().await;
    let response = get(&env.app(false), "/stream/404/0").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_missing_work_directory() {
    let env = TestEnv::new().await;
    let work_dir = env.add_work(10, ROOT_FOLDER, "RJ000010").await;
    std::fs::remove_dir_all(&work_dir).unwrap();

    let response = get(&env.app(true), "/stream/10/0").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_check_lrc_found() {
    let env = env_with_work().await;
    let response = get(&env.app(false), "/check-lrc/123456/1").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["result"], true);
    assert_eq!(body["hash"], "123456/0");
}

#[tokio::test]
async fn test_check_lrc_not_found() {
    let env = env_with_work().await;
    let response = get(&env.app(false), "/check-lrc/123456/2").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["result"], false);
    assert_eq!(body["hash"], "");
}

#[tokio::test]
async fn test_history_round_trip() {
    let env = env_with_work().await;
    let app = env.app(false);

    let response = post_json(
        &app,
        "/history",
        &json!({
            "username": "alice",
            "id": WORK_ID,
            "hash": "123456/1",
            "play_time": 12.5,
            "track_name": "track1.mp3"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["result"], true);
    assert_eq!(body["message"], "UPSERT success");

    let response = get(&app, "/history/alice/123456").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!([{ "hash": "123456/1", "play_time": 12.5 }])
    );
}

#[tokio::test]
async fn test_history_upsert_keeps_one_entry() {
    let env = env_with_work().await;
    let app = env.app(false);

    for (hash, play_time) in [("123456/1", 10.0), ("123456/2", 42.0)] {
        let response = post_json(
            &app,
            "/history",
            &json!({
                "username": "alice",
                "id": WORK_ID,
                "hash": hash,
                "play_time": play_time
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let entries = body_json(get(&app, "/history/alice/123456").await).await;
    assert_eq!(entries, json!([{ "hash": "123456/2", "play_time": 42.0 }]));

    // Other users are unaffected
    let entries = body_json(get(&app, "/history/bob/123456").await).await;
    assert_eq!(entries, json!([]));
}

#[tokio::test]
async fn test_history_rejects_bad_input() {
    let env = TestEnv::new().await;
    let app = env.app(false);

    let blank_user = post_json(
        &app,
        "/history",
        &json!({ "username": " ", "id": 1, "hash": "1/0", "play_time": 1.0 }),
    )
    .await;
    assert_eq!(blank_user.status(), StatusCode::BAD_REQUEST);

    let negative = post_json(
        &app,
        "/history",
        &json!({ "username": "alice", "id": 1, "hash": "1/0", "play_time": -3.0 }),
    )
    .await;
    assert_eq!(negative.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_history_failure_has_no_success_body() {
    let env = TestEnv::new().await;
    let app = env.app_with_broken_history();

    let response = post_json(
        &app,
        "/history",
        &json!({ "username": "alice", "id": 1, "hash": "1/0", "play_time": 1.0 }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert!(body.get("result").is_none());
    assert!(body["error"].is_string());

    let response = get(&app, "/history/alice/1").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
