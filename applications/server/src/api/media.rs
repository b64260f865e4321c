/// Media delivery API: streaming, downloads and lyrics lookup
use crate::{
    api::extract::Path,
    error::{Result, ServerError},
    services::{find_lyrics, LyricsMatch},
    state::AppState,
};
use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use kikoeru_core::types::{DeliveryDecision, DeliveryIntent, WorkId};
use serde::Serialize;
use std::path::Path as FsPath;
use tower::ServiceExt;
use tower_http::services::ServeFile;

/// GET /stream/:id/:index
/// Stream a track, with range request support when served locally
pub async fn stream(
    Path((work_id, index)): Path<(WorkId, usize)>,
    State(app_state): State<AppState>,
    request: Request,
) -> Result<Response> {
    deliver(&app_state, work_id, index, DeliveryIntent::Stream, request).await
}

/// GET /download/:id/:index
/// Download a track as an attachment
pub async fn download(
    Path((work_id, index)): Path<(WorkId, usize)>,
    State(app_state): State<AppState>,
    request: Request,
) -> Result<Response> {
    deliver(&app_state, work_id, index, DeliveryIntent::Download, request).await
}

async fn deliver(
    app_state: &AppState,
    work_id: WorkId,
    index: usize,
    intent: DeliveryIntent,
    request: Request,
) -> Result<Response> {
    let resolved = app_state.resolver.resolve(work_id, index).await?;
    let decision = app_state.dispatcher.decide(&resolved, intent).await?;

    match decision {
        // Offload from this process, 302 to a virtual directory of a reverse proxy.
        // Downloads rely on the proxy setting Content-Disposition for its download path.
        DeliveryDecision::Redirect { location, .. } => found(&location),
        DeliveryDecision::Inline {
            path,
            content_type,
            attachment,
        } => {
            let filename = attachment.then_some(resolved.track.title.as_str());
            serve_file(&path, content_type.as_deref(), filename, request).await
        }
    }
}

/// Serve a local file, overriding the guessed content type when asked
///
/// The body streams from the open file; a client disconnect drops the body
/// and closes the file.
async fn serve_file(
    path: &FsPath,
    content_type: Option<&str>,
    attachment_name: Option<&str>,
    request: Request,
) -> Result<Response> {
    let mut response = match ServeFile::new(path).oneshot(request).await {
        Ok(response) => response.into_response(),
        Err(never) => match never {},
    };

    if !response.status().is_success() {
        return Ok(response);
    }

    let headers = response.headers_mut();
    if let Some(content_type) = content_type {
        let value = HeaderValue::from_str(content_type)
            .map_err(|e| ServerError::Internal(format!("Invalid content type: {}", e)))?;
        headers.insert(header::CONTENT_TYPE, value);
    }
    if let Some(name) = attachment_name {
        let value = HeaderValue::from_str(&attachment_disposition(name))
            .map_err(|e| ServerError::Internal(format!("Invalid disposition: {}", e)))?;
        headers.insert(header::CONTENT_DISPOSITION, value);
    }

    Ok(response)
}

/// 302 Found
fn found(location: &str) -> Result<Response> {
    Response::builder()
        .status(StatusCode::FOUND)
        .header(header::LOCATION, location)
        .body(Body::empty())
        .map_err(|e| ServerError::Internal(format!("Failed to build response: {}", e)))
}

/// `attachment` disposition with an ASCII fallback and an RFC 5987 UTF-8 name
pub fn attachment_disposition(filename: &str) -> String {
    let fallback: String = filename
        .chars()
        .map(|c| {
            if (c.is_ascii_graphic() && c != '"' && c != '\\') || c == ' ' {
                c
            } else {
                '_'
            }
        })
        .collect();

    format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        fallback,
        urlencoding::encode(filename)
    )
}

#[derive(Debug, Serialize)]
pub struct CheckLyricsResponse {
    pub result: bool,
    pub message: String,
    pub hash: String,
}

/// GET /check-lrc/:id/:index
/// Check whether a track has a companion `.lrc` file
pub async fn check_lrc(
    Path((work_id, index)): Path<(WorkId, usize)>,
    State(app_state): State<AppState>,
) -> Result<Json<CheckLyricsResponse>> {
    let resolved = app_state.resolver.resolve(work_id, index).await?;

    let response = match find_lyrics(&resolved).await {
        LyricsMatch::Found { hash } => CheckLyricsResponse {
            result: true,
            message: "Lyrics file found".to_string(),
            hash,
        },
        LyricsMatch::NotFound => CheckLyricsResponse {
            result: false,
            message: "No lyrics file".to_string(),
            hash: String::new(),
        },
    };

    Ok(Json(response))
}
