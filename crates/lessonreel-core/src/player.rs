//! Embedded player contract
//!
//! The third-party widget is an external collaborator. This module fixes
//! what we hand it (a video id plus a fixed set of player vars) and what
//! it hands back (ready, ended, and error signals).

use serde::{Deserialize, Serialize};
use url::Url;

use crate::types::VideoId;

/// Base URL of the embeddable player
pub const EMBED_BASE_URL: &str = "https://www.youtube.com/embed/";

/// Fixed configuration passed to the embedded player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedConfig {
    /// Start playing as soon as the player is ready
    pub autoplay: bool,
    /// Show the player's own controls
    pub controls: bool,
    /// Reduce the widget's branding
    pub modest_branding: bool,
    /// Suggest related videos at the end
    pub related_videos: bool,
    /// Allow full screen
    pub fullscreen: bool,
    /// Enable the programmatic API (needed for pause on end)
    pub js_api: bool,
}

impl Default for EmbedConfig {
    fn default() -> Self {
        Self {
            autoplay: true,
            controls: true,
            modest_branding: true,
            related_videos: false,
            fullscreen: true,
            js_api: true,
        }
    }
}

impl EmbedConfig {
    /// Player vars as the widget expects them, in a stable order
    pub fn player_vars(&self) -> Vec<(&'static str, u8)> {
        vec![
            ("autoplay", self.autoplay as u8),
            ("controls", self.controls as u8),
            ("modestbranding", self.modest_branding as u8),
            ("rel", self.related_videos as u8),
            ("fs", self.fullscreen as u8),
            ("enablejsapi", self.js_api as u8),
        ]
    }

    /// Player vars as a JSON object
    pub fn player_vars_json(&self) -> serde_json::Value {
        self.player_vars()
            .into_iter()
            .map(|(k, v)| (k.to_string(), serde_json::Value::from(v)))
            .collect::<serde_json::Map<_, _>>()
            .into()
    }

    /// Iframe URL for a resolved video
    pub fn embed_url(&self, video_id: &VideoId) -> Url {
        let mut url = Url::parse(EMBED_BASE_URL).expect("embed base URL is valid");
        url.path_segments_mut()
            .expect("embed base URL has a path")
            .pop_if_empty()
            .push(video_id.as_str());
        {
            let mut query = url.query_pairs_mut();
            for (key, value) in self.player_vars() {
                query.append_pair(key, &value.to_string());
            }
        }
        url
    }
}

/// Control handle bound when the embedded player reports ready
pub trait PlayerControl: Send + Sync {
    /// Pause playback
    fn pause(&self);
}

/// Signals reported by the embedded player
pub enum PlayerEvent {
    /// Player is ready; carries the handle for later control calls
    Ready(Box<dyn PlayerControl>),
    /// Playback reached the end
    Ended,
    /// Player failed with a numeric error code
    Error(i32),
}

impl std::fmt::Debug for PlayerEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlayerEvent::Ready(_) => f.write_str("Ready"),
            PlayerEvent::Ended => f.write_str("Ended"),
            PlayerEvent::Error(code) => f.debug_tuple("Error").field(code).finish(),
        }
    }
}

/// Error codes reported by the embedded player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerErrorCode {
    /// Owner disallows embedding (101 and 150)
    EmbeddingBlocked,
    /// Malformed or unknown video id (2)
    InvalidVideoId,
    /// HTML5 playback environment failure (5)
    Html5Error,
    /// Anything else
    Other(i32),
}

impl PlayerErrorCode {
    pub fn from_code(code: i32) -> Self {
        match code {
            101 | 150 => PlayerErrorCode::EmbeddingBlocked,
            2 => PlayerErrorCode::InvalidVideoId,
            5 => PlayerErrorCode::Html5Error,
            other => PlayerErrorCode::Other(other),
        }
    }

    /// User-facing message for this code
    pub fn message(&self) -> String {
        match self {
            PlayerErrorCode::EmbeddingBlocked => "This video cannot be played here. \
                The owner has blocked embedding. \
                Please enable \"Allow embedding\" in your YouTube video settings."
                .to_string(),
            PlayerErrorCode::InvalidVideoId => {
                "Invalid video ID. Please check the video ID configured on the server.".to_string()
            }
            PlayerErrorCode::Html5Error => {
                "HTML5 player error. The video may not be available.".to_string()
            }
            PlayerErrorCode::Other(code) => format!(
                "Error playing video (Code: {}). The video might be private or unavailable.",
                code
            ),
        }
    }
}

/// Translate a player error code into the message shown to the user
pub fn playback_error_message(code: i32) -> String {
    PlayerErrorCode::from_code(code).message()
}
