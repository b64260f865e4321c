/// Delivery decision types
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How the client asked for the file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryIntent {
    Stream,
    Download,
}

impl DeliveryIntent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stream => "stream",
            Self::Download => "download",
        }
    }
}

impl std::fmt::Display for DeliveryIntent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Settings for handing byte delivery to an external static file server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OffloadConfig {
    pub enabled: bool,
    /// Base URL path used for `DeliveryIntent::Stream`
    pub stream_path: String,
    /// Base URL path used for `DeliveryIntent::Download`
    pub download_path: String,
}

impl OffloadConfig {
    /// Offload base for an intent
    pub fn base_for(&self, intent: DeliveryIntent) -> &str {
        match intent {
            DeliveryIntent::Stream => &self.stream_path,
            DeliveryIntent::Download => &self.download_path,
        }
    }
}

impl Default for OffloadConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            stream_path: "/media/stream/".to_string(),
            download_path: "/media/download/".to_string(),
        }
    }
}

/// Serving strategy computed per request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryDecision {
    /// Serve the local file from this process
    Inline {
        path: PathBuf,
        /// Replaces the guessed `Content-Type` when set
        content_type: Option<String>,
        /// Force `Content-Disposition: attachment`
        attachment: bool,
    },
    /// Redirect the client to the offload server
    Redirect {
        url: String,
        /// `url` with every segment after the base percent-encoded
        location: String,
        content_type: Option<String>,
    },
}

impl DeliveryDecision {
    pub fn is_redirect(&self) -> bool {
        matches!(self, Self::Redirect { .. })
    }

    pub fn content_type(&self) -> Option<&str> {
        match self {
            Self::Inline { content_type, .. } | Self::Redirect { content_type, .. } => {
                content_type.as_deref()
            }
        }
    }
}
