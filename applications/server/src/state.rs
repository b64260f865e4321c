/// Shared application state
use crate::config::MediaSettings;
use crate::services::{DeliveryDispatcher, TrackResolver};
use kikoeru_core::{HistoryStore, TrackListProvider, WorkStore};
use std::sync::Arc;

/// Application state shared across all handlers
///
/// Everything in here is immutable after startup, requests never share
/// mutable state.
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<TrackResolver>,
    pub dispatcher: Arc<DeliveryDispatcher>,
    pub history: Arc<dyn HistoryStore>,
}

impl AppState {
    pub fn new(
        works: Arc<dyn WorkStore>,
        history: Arc<dyn HistoryStore>,
        track_lister: Arc<dyn TrackListProvider>,
        media: &MediaSettings,
    ) -> Self {
        let resolver = TrackResolver::new(works, track_lister, media.root_folders.clone());
        let dispatcher = DeliveryDispatcher::new(media.offload());

        Self {
            resolver: Arc::new(resolver),
            dispatcher: Arc::new(dispatcher),
            history,
        }
    }
}
