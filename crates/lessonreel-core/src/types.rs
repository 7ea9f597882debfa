//! Core types for Lessonreel

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Opaque lesson identifier as issued by the backend
///
/// Backends differ on whether ids are JSON strings or numbers; both are
/// accepted and kept in their decimal/string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct LessonId(String);

impl LessonId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for LessonId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(serde_json::Number),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => LessonId(s),
            RawId::Number(n) => LessonId(n.to_string()),
        })
    }
}

impl std::fmt::Display for LessonId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for LessonId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for LessonId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A catalog entry describing one playable video (metadata only)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub id: LessonId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Thumbnail image URL
    #[serde(default)]
    pub thumbnail: String,
    /// Display label such as "12:34"
    #[serde(default)]
    pub duration: String,
}

/// Server-issued payload that must be exchanged for a playable id
///
/// All three fields are forwarded to the decrypt exchange exactly as
/// received; nothing here is checked on the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObfuscatedVideoRef {
    pub encrypted_video_id: String,
    /// Issue time as the backend encoded it, usually epoch milliseconds
    pub timestamp: serde_json::Value,
    pub checksum: serde_json::Value,
}

impl ObfuscatedVideoRef {
    /// Issue time, for logging only. `None` unless the backend sent
    /// integer milliseconds.
    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        self.timestamp.as_i64().and_then(DateTime::from_timestamp_millis)
    }
}

/// The resolved identifier handed to the embedded player
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoId(String);

impl VideoId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Keep the resolved id out of debug output and log lines.
impl std::fmt::Debug for VideoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("VideoId(<redacted>)")
    }
}

impl std::fmt::Display for VideoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Body of a successful decrypt exchange
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayableVideoRef {
    pub video_id: VideoId,
}

/// Unique identifier for a playback session
#[cfg(feature = "client")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub uuid::Uuid);

#[cfg(feature = "client")]
impl SessionId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

#[cfg(feature = "client")]
impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "client")]
impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
