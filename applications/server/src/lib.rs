//! Kikoeru Server Library
//!
//! HTTP media server for voice works: track streaming and downloads with
//! optional reverse-proxy offload, lyrics lookup, and playback history.
//!
//! This library exposes the core components for testing purposes.

pub mod api;
pub mod config;
pub mod error;
pub mod services;
pub mod state;

// Re-export commonly used types for convenience
pub use api::create_router;
pub use config::{MediaSettings, ServerConfig};
pub use error::{Result, ServerError};
pub use services::{DeliveryDispatcher, TrackResolver};
pub use state::AppState;
