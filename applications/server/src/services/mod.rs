/// Server services
pub mod delivery;
pub mod lyrics;
pub mod resolver;

pub use delivery::DeliveryDispatcher;
pub use lyrics::{find_lyrics, LyricsMatch};
pub use resolver::{ResolvedTrack, TrackResolver};
