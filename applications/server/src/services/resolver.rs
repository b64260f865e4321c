/// Track resolution: (work id, track index) -> file on disk
use kikoeru_core::{
    error::{KikoeruError, Result},
    storage::WorkStore,
    traits::TrackListProvider,
    types::{RootFolder, Track, Work, WorkId},
};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

/// A track located on disk together with everything needed to deliver it
#[derive(Debug, Clone)]
pub struct ResolvedTrack {
    pub work: Work,
    pub root_folder: RootFolder,
    pub track: Track,
    /// The full track list of the work, `track` included
    pub tracks: Vec<Track>,
    /// `root_folder.path / work.dir / subtitle / title`, always under the root
    pub path: PathBuf,
}

pub struct TrackResolver {
    works: Arc<dyn WorkStore>,
    track_lister: Arc<dyn TrackListProvider>,
    root_folders: Arc<[RootFolder]>,
}

impl TrackResolver {
    pub fn new(
        works: Arc<dyn WorkStore>,
        track_lister: Arc<dyn TrackListProvider>,
        root_folders: Vec<RootFolder>,
    ) -> Self {
        Self {
            works,
            track_lister,
            root_folders: root_folders.into(),
        }
    }

    /// Resolve a track of a work
    ///
    /// # Errors
    /// - `WorkNotFound` if no work has this id
    /// - `ConfigurationMismatch` if the work's root folder is not configured
    /// - `TrackIndexOutOfRange` if the work has no track at `index`
    pub async fn resolve(&self, work_id: WorkId, index: usize) -> Result<ResolvedTrack> {
        let work = self
            .works
            .get_work(work_id)
            .await?
            .ok_or(KikoeruError::WorkNotFound(work_id))?;

        let root_folder = RootFolder::find(&self.root_folders, &work.root_folder)
            .cloned()
            .ok_or_else(|| KikoeruError::configuration_mismatch(&work.root_folder))?;

        let work_dir = root_folder.path.join(relative_path([work.dir.as_str()]));
        let tracks = self.track_lister.list(work_id, &work_dir).await?;

        let track = tracks
            .get(index)
            .cloned()
            .ok_or(KikoeruError::TrackIndexOutOfRange {
                index,
                len: tracks.len(),
            })?;

        let path = track_path(&root_folder, &work, &track);
        tracing::debug!("Resolved work {} track {} to {}", work_id, index, path.display());

        Ok(ResolvedTrack {
            work,
            root_folder,
            track,
            tracks,
            path,
        })
    }
}

/// Absolute path of a track file
pub fn track_path(root_folder: &RootFolder, work: &Work, track: &Track) -> PathBuf {
    root_folder.path.join(relative_path([
        work.dir.as_str(),
        track.subtitle_or_empty(),
        track.title.as_str(),
    ]))
}

/// Concatenate path parts, keeping only their normal components
///
/// Roots and prefixes inside a part are dropped and `..` only pops what the
/// parts themselves added, so the result never leaves the folder it is
/// joined to.
fn relative_path<'a>(parts: impl IntoIterator<Item = &'a str>) -> PathBuf {
    let mut relative = PathBuf::new();
    for part in parts {
        for component in Path::new(part).components() {
            match component {
                Component::Normal(segment) => relative.push(segment),
                Component::ParentDir => {
                    relative.pop();
                }
                Component::RootDir | Component::Prefix(_) | Component::CurDir => {}
            }
        }
    }
    relative
}
