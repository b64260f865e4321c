//! Common test utilities and fixtures
#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, Response},
    Router,
};
use kikoeru_core::{
    error::{KikoeruError, Result},
    storage::HistoryStore,
    types::{HistoryEntry, RootFolder, UpsertHistory, Work, WorkId},
};
use kikoeru_scanner::DirectoryTrackLister;
use kikoeru_server::{create_router, AppState, MediaSettings};
use kikoeru_storage::LocalStorageContext;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;
use tower::util::ServiceExt;

pub const ROOT_FOLDER: &str = "VoiceWork";

/// A media root on disk plus a migrated database
pub struct TestEnv {
    pub media_dir: TempDir,
    pub db: Arc<LocalStorageContext>,
    _db_dir: TempDir,
}

impl TestEnv {
    pub async fn new() -> Self {
        let db_dir = TempDir::new().unwrap();
        let db_url = format!("sqlite://{}", db_dir.path().join("test.db").display());
        let pool = kikoeru_storage::create_pool(&db_url).await.unwrap();
        kikoeru_storage::run_migrations(&pool).await.unwrap();

        Self {
            media_dir: TempDir::new().unwrap(),
            db: Arc::new(LocalStorageContext::new(pool)),
            _db_dir: db_dir,
        }
    }

    pub fn root(&self) -> &Path {
        self.media_dir.path()
    }

    /// Media settings with the temp dir configured as `VoiceWork`
    pub fn media_settings(&self, offload: bool) -> MediaSettings {
        MediaSettings {
            root_folders: vec![RootFolder::new(ROOT_FOLDER, self.root())],
            offload_media: offload,
            offload_stream_path: "/media/stream/".to_string(),
            offload_download_path: "/media/download/".to_string(),
        }
    }

    /// Register a work row and create its directory
    pub async fn add_work(&self, id: WorkId, root_folder: &str, dir: &str) -> PathBuf {
        kikoeru_storage::works::upsert(self.db.pool(), &Work::new(id, root_folder, dir))
            .await
            .unwrap();
        let work_dir = self.root().join(dir);
        std::fs::create_dir_all(&work_dir).unwrap();
        work_dir
    }

    pub fn app(&self, offload: bool) -> Router {
        let state = AppState::new(
            self.db.clone(),
            self.db.clone(),
            Arc::new(DirectoryTrackLister::new()),
            &self.media_settings(offload),
        );
        create_router(state)
    }

    /// App whose history store always fails
    pub fn app_with_broken_history(&self) -> Router {
        let state = AppState::new(
            self.db.clone(),
            Arc::new(FailingHistory),
            Arc::new(DirectoryTrackLister::new()),
            &self.media_settings(false),
        );
        create_router(state)
    }
}

/// Write a file under a work directory, creating subdirectories
pub fn write_file(work_dir: &Path, relative: &str, bytes: &[u8]) {
    let path = work_dir.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, bytes).unwrap();
}

pub struct FailingHistory;

#[async_trait]
impl HistoryStore for FailingHistory {
    async fn upsert_history(&self, _history: UpsertHistory) -> Result<()> {
        Err(KikoeruError::storage("database is locked"))
    }

    async fn get_history(&self, _user_name: &str, _work_id: WorkId) -> Result<Vec<HistoryEntry>> {
        Err(KikoeruError::storage("database is locked"))
    }
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get_with_range(app: &Router, uri: &str, range: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .header("range", range)
        .body(Body::empty())
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn post_json(app: &Router, uri: &str, body: &serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .method("POST")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub fn header<'a>(response: &'a Response<Body>, name: &str) -> Option<&'a str> {
    response.headers().get(name).and_then(|v| v.to_str().ok())
}
