/// Configured root folders
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A named base directory under which work directories live
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootFolder {
    /// Unique name referenced by `Work::root_folder`
    pub name: String,
    /// Absolute filesystem base
    pub path: PathBuf,
}

impl RootFolder {
    /// Create a new root folder
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    /// Find a folder by name in a configured list
    ///
    /// Folder lists hold tens of entries, a linear scan is enough.
    pub fn find<'a>(folders: &'a [RootFolder], name: &str) -> Option<&'a RootFolder> {
        folders.iter().find(|folder| folder.name == name)
    }
}
