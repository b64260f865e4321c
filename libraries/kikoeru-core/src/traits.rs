/// Core traits for Kikoeru
use crate::error::Result;
use crate::types::{Track, WorkId};
use async_trait::async_trait;
use std::path::Path;

/// Produces the ordered track list of a work
///
/// Implementers enumerate the work directory on every call; results are not
/// cached by the core. Each returned track's `index` equals its position in
/// the list.
#[async_trait]
pub trait TrackListProvider: Send + Sync {
    /// List the tracks found under `work_dir`
    ///
    /// # Errors
    /// Returns an error if the directory cannot be read
    async fn list(&self, work_id: WorkId, work_dir: &Path) -> Result<Vec<Track>>;
}
