//! Kikoeru Core
//!
//! Platform-agnostic types, traits, and error handling for the Kikoeru media
//! server.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `RootFolder`, `Work`, `Track`, `HistoryRecord`, delivery types
//! - **Collaborator Traits**: `WorkStore`, `HistoryStore`, `TrackListProvider`
//! - **Utilities**: URL fragment joining and text charset detection
//! - **Error Handling**: Unified `KikoeruError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use kikoeru_core::path::join_fragments;
//!
//! let url = join_fragments("/media/stream", ["VoiceWork", "RJ123456", "", "track1.mp3"]);
//! assert_eq!(url, "/media/stream/VoiceWork/RJ123456/track1.mp3");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod encoding;
pub mod error;
pub mod path;
pub mod storage;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{KikoeruError, Result};
pub use storage::{HistoryStore, WorkStore};
pub use traits::TrackListProvider;

pub use types::{
    DeliveryDecision, DeliveryIntent, HistoryEntry, HistoryRecord, MediaKind, OffloadConfig,
    RootFolder, Track, UpsertHistory, Work, WorkId,
};
