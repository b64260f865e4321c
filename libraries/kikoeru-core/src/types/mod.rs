mod delivery;
mod folder;
mod history;
mod track;
mod work;

pub use delivery::{DeliveryDecision, DeliveryIntent, OffloadConfig};
pub use folder::RootFolder;
pub use history::{HistoryEntry, HistoryRecord, UpsertHistory};
pub use track::{MediaKind, Track};
pub use work::{Work, WorkId};
