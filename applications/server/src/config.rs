/// Server configuration
use crate::error::{Result, ServerError};
use kikoeru_core::types::{OffloadConfig, RootFolder};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_server")]
    pub server: ServerSettings,

    #[serde(default = "default_storage")]
    pub storage: StorageSettings,

    #[serde(default)]
    pub media: MediaSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_database_url")]
    pub database_url: String,
}

/// Where works live and how their files are delivered
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MediaSettings {
    #[serde(default)]
    pub root_folders: Vec<RootFolder>,

    /// Redirect media requests to a reverse proxy instead of serving bytes
    #[serde(default)]
    pub offload_media: bool,

    #[serde(default = "default_offload_stream_path")]
    pub offload_stream_path: String,

    #[serde(default = "default_offload_download_path")]
    pub offload_download_path: String,
}

impl MediaSettings {
    pub fn offload(&self) -> OffloadConfig {
        OffloadConfig {
            enabled: self.offload_media,
            stream_path: self.offload_stream_path.clone(),
            download_path: self.offload_download_path.clone(),
        }
    }
}

impl Default for MediaSettings {
    fn default() -> Self {
        Self {
            root_folders: Vec::new(),
            offload_media: false,
            offload_stream_path: default_offload_stream_path(),
            offload_download_path: default_offload_download_path(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from file and environment
    ///
    /// Reads `path` when given, otherwise `config.toml` in the working
    /// directory if it exists. Environment variables prefixed with
    /// `KIKOERU__` override file values (`KIKOERU__MEDIA__OFFLOAD_MEDIA=true`).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let config_path = PathBuf::from("config.toml");
                if config_path.exists() {
                    settings = settings.add_source(config::File::from(config_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("KIKOERU")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let mut names = HashSet::new();
        for folder in &self.media.root_folders {
            if folder.name.trim().is_empty() {
                return Err(ServerError::Config(format!(
                    "Root folder at {:?} has an empty name",
                    folder.path
                )));
            }
            if !names.insert(folder.name.as_str()) {
                return Err(ServerError::Config(format!(
                    "Duplicate root folder name: {}",
                    folder.name
                )));
            }
            if !folder.path.is_dir() {
                tracing::warn!(
                    "Root folder {} does not exist: {}",
                    folder.name,
                    folder.path.display()
                );
            }
        }

        if self.media.offload_media
            && (self.media.offload_stream_path.is_empty()
                || self.media.offload_download_path.is_empty())
        {
            return Err(ServerError::Config(
                "offload_stream_path and offload_download_path are required when offload_media is on"
                    .to_string(),
            ));
        }

        Ok(())
    }
}

// Default values
fn default_server() -> ServerSettings {
    ServerSettings {
        host: default_host(),
        port: default_port(),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8888
}

fn default_storage() -> StorageSettings {
    StorageSettings {
        database_url: default_database_url(),
    }
}

fn default_database_url() -> String {
    "sqlite://./data/kikoeru.db".to_string()
}

fn default_offload_stream_path() -> String {
    OffloadConfig::default().stream_path
}

fn default_offload_download_path() -> String {
    OffloadConfig::default().download_path
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            storage: default_storage(),
            media: MediaSettings::default(),
        }
    }
}
