//! Lessonreel Core - Lesson Player Library
//!
//! This crate provides the core functionality of the lesson player:
//! - Lesson catalog loading with loading/empty/error states
//! - Two-step video resolution (obfuscated reference, then decrypt)
//! - Playback session state with stale-result suppression
//! - Embedded player contract and error-code translation
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        LessonApp                            │
//! ├─────────────────────────────────────────────────────────────┤
//! │                                                             │
//! │  ┌──────────────┐   Selection    ┌──────────────────────┐   │
//! │  │   Catalog    │ ─────────────► │  Playback Controller │   │
//! │  │  Controller  │                │   (session status)   │   │
//! │  └──────┬───────┘                └───┬──────────────┬───┘   │
//! │         │                            │              │       │
//! │         │        ┌───────────────┐   │    ┌─────────┴────┐  │
//! │         └──────► │   LessonApi   │ ◄─┘    │   Embedded   │  │
//! │                  │ (HTTP client) │        │    Player    │  │
//! │                  └───────────────┘        └──────────────┘  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Without the default `client` feature only the data types, the player
//! contract and the error table are built; this is what the wasm crate uses.

pub mod config;
pub mod error;
pub mod player;
pub mod types;

#[cfg(feature = "client")]
pub mod api;
#[cfg(feature = "client")]
pub mod app;
#[cfg(feature = "client")]
pub mod catalog;
#[cfg(feature = "client")]
pub mod playback;

pub use config::ClientConfig;
pub use error::{Error, Result};
pub use player::{playback_error_message, EmbedConfig, PlayerControl, PlayerErrorCode, PlayerEvent};
pub use types::*;

#[cfg(feature = "client")]
pub use api::{HttpLessonApi, LessonApi};
#[cfg(feature = "client")]
pub use app::LessonApp;
#[cfg(feature = "client")]
pub use catalog::{CatalogController, CatalogState, Selection};
#[cfg(feature = "client")]
pub use playback::{PlaybackController, SessionStatus};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the library
pub fn init() {
    tracing::info!(version = VERSION, "Lessonreel Core initialized");
}
