/// Companion lyrics lookup
use crate::services::resolver::ResolvedTrack;

/// Outcome of a lyrics lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LyricsMatch {
    NotFound,
    /// Hash of the `.lrc` entry in the work's track list
    Found { hash: String },
}

/// Find the `.lrc` file that accompanies a track
///
/// The lyrics file shares the track's name and subdirectory. The on-disk
/// check runs first; the track list is only scanned when the file exists.
pub async fn find_lyrics(resolved: &ResolvedTrack) -> LyricsMatch {
    let lyrics_path = resolved.path.with_extension("lrc");
    match tokio::fs::try_exists(&lyrics_path).await {
        Ok(true) => {}
        Ok(false) => return LyricsMatch::NotFound,
        Err(e) => {
            tracing::warn!(
                "Lyrics check failed for {}: {}",
                lyrics_path.display(),
                e
            );
            return LyricsMatch::NotFound;
        }
    }

    let lyrics_title = resolved.track.lyrics_title();
    tracing::debug!("Found lyrics file {}", lyrics_title);

    resolved
        .tracks
        .iter()
        .find(|candidate| {
            candidate.title == lyrics_title && candidate.subtitle == resolved.track.subtitle
        })
        .map_or(LyricsMatch::NotFound, |candidate| LyricsMatch::Found {
            hash: candidate.hash.clone(),
        })
}
