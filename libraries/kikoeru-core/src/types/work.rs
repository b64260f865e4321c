/// Work types
use serde::{Deserialize, Serialize};

/// Work identifier (`t_work.id`)
pub type WorkId = i64;

/// A media release stored as a directory under a root folder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Work {
    pub id: WorkId,
    /// Name of the `RootFolder` this work lives under
    pub root_folder: String,
    /// Path of the work directory relative to the root folder
    pub dir: String,
}

impl Work {
    pub fn new(id: WorkId, root_folder: impl Into<String>, dir: impl Into<String>) -> Self {
        Self {
            id,
            root_folder: root_folder.into(),
            dir: dir.into(),
        }
    }
}
