//! Work directory enumeration

use crate::natural::natural_cmp;
use async_trait::async_trait;
use kikoeru_core::{
    error::{KikoeruError, Result},
    traits::TrackListProvider,
    types::{Track, WorkId},
};
use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// File extensions listed as tracks (compared lowercase)
pub const SUPPORTED_EXTENSIONS: &[&str] = &[
    // audio
    "mp3", "ogg", "opus", "wav", "aac", "flac", "m4a", "mka",
    // video
    "mp4", "webm",
    // text
    "txt", "lrc", "srt", "ass", "vtt", "pdf",
    // images
    "jpg", "jpeg", "png", "webp",
];

/// Lists the files of a work directory as tracks
///
/// Files are grouped by subdirectory (top level first) and ordered naturally
/// by name within each group. Every call walks the directory again.
#[derive(Debug, Clone, Default)]
pub struct DirectoryTrackLister {
    follow_links: bool,
}

impl DirectoryTrackLister {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether to follow symbolic links
    pub fn follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    /// Enumerate a work directory synchronously
    pub fn scan(&self, work_id: WorkId, work_dir: &Path) -> Result<Vec<Track>> {
        if !work_dir.is_dir() {
            return Err(KikoeruError::FileNotFound(work_dir.to_path_buf()));
        }

        let mut entries: Vec<(Option<String>, String)> = Vec::new();
        let walker = WalkDir::new(work_dir)
            .follow_links(self.follow_links)
            .min_depth(1);

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry under {}: {}", work_dir.display(), e);
                    continue;
                }
            };

            if !entry.file_type().is_file() || !is_track_file(entry.path()) {
                continue;
            }

            let Some(title) = entry.file_name().to_str().map(str::to_string) else {
                tracing::warn!("Skipping non UTF-8 file name: {:?}", entry.path());
                continue;
            };

            entries.push((subdirectory(work_dir, entry.path()), title));
        }

        entries.sort_by(|(a_dir, a_title), (b_dir, b_title)| {
            compare_dirs(a_dir.as_deref(), b_dir.as_deref())
                .then_with(|| natural_cmp(a_title, b_title))
        });

        Ok(entries
            .into_iter()
            .enumerate()
            .map(|(index, (subtitle, title))| {
                Track::new(index, title, subtitle, format!("{}/{}", work_id, index))
            })
            .collect())
    }
}

#[async_trait]
impl TrackListProvider for DirectoryTrackLister {
    async fn list(&self, work_id: WorkId, work_dir: &Path) -> Result<Vec<Track>> {
        let lister = self.clone();
        let work_dir: PathBuf = work_dir.to_path_buf();

        tokio::task::spawn_blocking(move || lister.scan(work_id, &work_dir))
            .await
            .map_err(|e| KikoeruError::Io(std::io::Error::other(e)))?
    }
}

/// Check if a file should be listed as a track
pub fn is_track_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Parent directory of `file` relative to `root`, with `/` separators
fn subdirectory(root: &Path, file: &Path) -> Option<String> {
    let parent = file.parent()?.strip_prefix(root).ok()?;
    let parts: Vec<String> = parent
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}

fn compare_dirs(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => natural_cmp(a, b),
    }
}
