/// Playback history types
use crate::types::WorkId;
use serde::{Deserialize, Serialize};

/// Last playback position of a user within a work
///
/// At most one record exists per `(user_name, work_id)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub user_name: String,
    pub work_id: WorkId,
    /// Hash of the track being played
    pub hash: String,
    /// Position within the track
    pub play_time: f64,
    pub track_name: String,
    /// Last update timestamp (Unix epoch seconds)
    pub updated_at: i64,
}

/// Data for inserting or replacing a history record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpsertHistory {
    pub user_name: String,
    pub work_id: WorkId,
    pub hash: String,
    pub play_time: f64,
    pub track_name: String,
}

/// The part of a history record returned to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub hash: String,
    pub play_time: f64,
}

impl From<HistoryRecord> for HistoryEntry {
    fn from(record: HistoryRecord) -> Self {
        Self {
            hash: record.hash,
            play_time: record.play_time,
        }
    }
}
