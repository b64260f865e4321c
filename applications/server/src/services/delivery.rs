//! Delivery dispatch: how a resolved track reaches the client
//!
//! Policy, in order:
//! 1. The file must exist on disk
//! 2. `.txt`/`.lrc` are sniffed for a charset and always served inline, the
//!    browser needs the charset before it renders them
//! 3. `.flac` streams are labelled `audio/flac` (iOS rejects `audio/x-flac`)
//! 4. With offload on, everything else redirects to the reverse proxy
//! 5. Otherwise the local file is served, as an attachment for downloads

use crate::services::resolver::ResolvedTrack;
use kikoeru_core::{
    encoding::{self, SNIFF_LIMIT},
    error::{KikoeruError, Result},
    path::{fragment_segments, join_segments},
    types::{DeliveryDecision, DeliveryIntent, MediaKind, OffloadConfig},
};
use std::path::Path;
use tokio::io::AsyncReadExt;

pub const FLAC_CONTENT_TYPE: &str = "audio/flac";

#[derive(Debug, Clone)]
pub struct DeliveryDispatcher {
    offload: OffloadConfig,
}

impl DeliveryDispatcher {
    pub fn new(offload: OffloadConfig) -> Self {
        Self { offload }
    }

    /// Decide how to deliver a resolved track
    ///
    /// # Errors
    /// Returns `FileNotFound` if the resolved file is missing on disk
    pub async fn decide(
        &self,
        resolved: &ResolvedTrack,
        intent: DeliveryIntent,
    ) -> Result<DeliveryDecision> {
        match tokio::fs::metadata(&resolved.path).await {
            Ok(metadata) if metadata.is_file() => {}
            Ok(_) => return Err(KikoeruError::FileNotFound(resolved.path.clone())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(KikoeruError::FileNotFound(resolved.path.clone()));
            }
            Err(e) => return Err(e.into()),
        }

        let kind = resolved.track.media_kind();
        let content_type = match (kind, intent) {
            (MediaKind::Text, _) => sniff_text_content_type(&resolved.path).await,
            (MediaKind::Flac, DeliveryIntent::Stream) => Some(FLAC_CONTENT_TYPE.to_string()),
            _ => None,
        };

        let decision = if self.offload.enabled && !kind.is_text() {
            let (url, location) = self.offload_target(resolved, intent);
            DeliveryDecision::Redirect {
                url,
                location,
                content_type,
            }
        } else {
            DeliveryDecision::Inline {
                path: resolved.path.clone(),
                content_type,
                attachment: intent == DeliveryIntent::Download,
            }
        };

        tracing::debug!(
            "{} work {} track {}: {:?}",
            intent,
            resolved.work.id,
            resolved.track.index,
            decision
        );

        Ok(decision)
    }

    /// `<base>/<root folder name>/<work dir>/<subtitle>/<title>`, plain and
    /// percent-encoded
    ///
    /// With the default base and a deeper folder layout:
    /// `/media/stream/VoiceWork/second/RJ123456/subdirs/track.mp3`
    ///
    /// The base is configured by the operator and is used as is. Every segment
    /// after it comes from the filesystem and is encoded on its own.
    pub fn offload_target(
        &self,
        resolved: &ResolvedTrack,
        intent: DeliveryIntent,
    ) -> (String, String) {
        let base = self.offload.base_for(intent);
        let segments = fragment_segments([
            resolved.root_folder.name.as_str(),
            resolved.work.dir.as_str(),
            resolved.track.subtitle_or_empty(),
            resolved.track.title.as_str(),
        ]);

        let location = join_segments(
            base,
            segments.iter().map(|segment| urlencoding::encode(segment)),
        );
        (join_segments(base, &segments), location)
    }
}

/// Sniff the leading bytes of a text file
///
/// Read failures are not fatal: the file is still served, without a charset.
async fn sniff_text_content_type(path: &Path) -> Option<String> {
    match read_prefix(path, SNIFF_LIMIT).await {
        Ok(bytes) => encoding::text_content_type(&bytes),
        Err(e) => {
            tracing::warn!("Charset detection failed for {}: {}", path.display(), e);
            None
        }
    }
}

async fn read_prefix(path: &Path, limit: usize) -> std::io::Result<Vec<u8>> {
    let file = tokio::fs::File::open(path).await?;
    let mut bytes = Vec::new();
    file.take(limit as u64).read_to_end(&mut bytes).await?;
    Ok(bytes)
}
