/// Track types
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One file within a work's ordered file listing
///
/// Tracks are produced per request by a `TrackListProvider` and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// 0-based position within the work's track list
    pub index: usize,
    /// File name
    pub title: String,
    /// Subdirectory relative to the work directory, `None` at the top level
    pub subtitle: Option<String>,
    /// Content identifier
    pub hash: String,
}

impl Track {
    pub fn new(
        index: usize,
        title: impl Into<String>,
        subtitle: Option<String>,
        hash: impl Into<String>,
    ) -> Self {
        Self {
            index,
            title: title.into(),
            subtitle,
            hash: hash.into(),
        }
    }

    /// Subdirectory or the empty string
    pub fn subtitle_or_empty(&self) -> &str {
        self.subtitle.as_deref().unwrap_or("")
    }

    /// File extension without the dot, as written on disk
    pub fn extension(&self) -> Option<&str> {
        Path::new(&self.title).extension().and_then(|ext| ext.to_str())
    }

    pub fn media_kind(&self) -> MediaKind {
        MediaKind::from_extension(self.extension())
    }

    /// Title with its extension replaced by `.lrc`
    pub fn lyrics_title(&self) -> String {
        Path::new(&self.title)
            .with_extension("lrc")
            .to_string_lossy()
            .into_owned()
    }
}

/// How a file is treated by the delivery policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    /// `.txt` and `.lrc`: needs charset detection, never offloaded
    Text,
    /// `.flac`: needs a content type override when streamed
    Flac,
    Other,
}

impl MediaKind {
    /// Classify an extension (case-sensitive, without the dot)
    pub fn from_extension(ext: Option<&str>) -> Self {
        match ext {
            Some("txt" | "lrc") => Self::Text,
            Some("flac") => Self::Flac,
            _ => Self::Other,
        }
    }

    pub fn is_text(self) -> bool {
        self == Self::Text
    }
}
