/// Playback history API routes
use crate::{
    api::extract::{JsonBody, Path},
    error::{Result, ServerError},
    state::AppState,
};
use axum::{extract::State, Json};
use kikoeru_core::types::{HistoryEntry, UpsertHistory, WorkId};
use serde::{Deserialize, Serialize};

/// GET /history/:username/:id
pub async fn get_history(
    Path((username, work_id)): Path<(String, WorkId)>,
    State(app_state): State<AppState>,
) -> Result<Json<Vec<HistoryEntry>>> {
    let entries = app_state.history.get_history(&username, work_id).await?;
    Ok(Json(entries))
}

#[derive(Debug, Deserialize)]
pub struct SaveHistoryRequest {
    pub username: String,
    pub id: WorkId,
    pub hash: String,
    pub play_time: f64,
    #[serde(default)]
    pub track_name: String,
}

#[derive(Debug, Serialize)]
pub struct SaveHistoryResponse {
    pub result: bool,
    pub message: String,
}

/// POST /history
/// Save the playback position of a user within a work
pub async fn save_history(
    State(app_state): State<AppState>,
    JsonBody(request): JsonBody<SaveHistoryRequest>,
) -> Result<Json<SaveHistoryResponse>> {
    if request.username.trim().is_empty() {
        return Err(ServerError::BadRequest("username is required".to_string()));
    }
    if !request.play_time.is_finite() || request.play_time < 0.0 {
        return Err(ServerError::BadRequest(
            "play_time must be a non-negative number".to_string(),
        ));
    }

    // A failed upsert propagates here and never reaches the success body
    app_state
        .history
        .upsert_history(UpsertHistory {
            user_name: request.username,
            work_id: request.id,
            hash: request.hash,
            play_time: request.play_time,
            track_name: request.track_name,
        })
        .await?;

    Ok(Json(SaveHistoryResponse {
        result: true,
        message: "UPSERT success".to_string(),
    }))
}
