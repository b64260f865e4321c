/// Core error types for Kikoeru
use crate::types::WorkId;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `KikoeruError`
pub type Result<T> = std::result::Result<T, KikoeruError>;

/// Core error type for track resolution, delivery and history
#[derive(Error, Debug)]
pub enum KikoeruError {
    /// No work row with this id
    #[error("Work not found: {0}")]
    WorkNotFound(WorkId),

    /// The work references a root folder that is not configured
    #[error("Root folder not found: \"{root_folder}\", try restarting the server or rescanning")]
    ConfigurationMismatch {
        /// Name stored on the work row
        root_folder: String,
    },

    /// Track index past the end of the work's track list
    #[error("Track index {index} out of range (work has {len} tracks)")]
    TrackIndexOutOfRange {
        /// Requested index
        index: usize,
        /// Length of the track list
        len: usize,
    },

    /// Resolved file is missing on disk
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Store read/write failure
    #[error("Storage error: {0}")]
    Storage(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl KikoeruError {
    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a configuration mismatch error for a root folder name
    pub fn configuration_mismatch(root_folder: impl Into<String>) -> Self {
        Self::ConfigurationMismatch {
            root_folder: root_folder.into(),
        }
    }
}
