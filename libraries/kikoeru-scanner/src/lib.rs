//! Kikoeru Scanner
//!
//! Filesystem implementation of the core's `TrackListProvider`: enumerates a
//! work directory into the ordered track list the media endpoints index into.
//!
//! Track order is stable across calls for an unchanged directory, which is
//! what makes a numeric track index meaningful to clients.

mod natural;
mod scanner;

pub use natural::natural_cmp;
pub use scanner::{is_track_file, DirectoryTrackLister, SUPPORTED_EXTENSIONS};
