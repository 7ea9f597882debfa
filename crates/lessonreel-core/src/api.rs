//! Backend API access
//!
//! Three calls make up the whole surface:
//! - `GET  lessons`            ordered lesson catalog
//! - `GET  lessons/{id}/video` obfuscated video reference
//! - `POST decrypt`            reference in, playable id out

use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

use crate::{
    config::ClientConfig,
    types::{Lesson, LessonId, ObfuscatedVideoRef, PlayableVideoRef, VideoId},
    Error, Result,
};

/// Trait for lesson backends
#[async_trait]
pub trait LessonApi: Send + Sync {
    /// Fetch the lesson catalog in server order
    async fn list_lessons(&self) -> Result<Vec<Lesson>>;

    /// Fetch the obfuscated video reference for a lesson
    async fn fetch_video_ref(&self, lesson_id: &LessonId) -> Result<ObfuscatedVideoRef>;

    /// Exchange an obfuscated reference for a playable video id
    async fn decrypt(&self, reference: &ObfuscatedVideoRef) -> Result<VideoId>;
}

/// reqwest-backed implementation of [`LessonApi`]
#[derive(Debug, Clone)]
pub struct HttpLessonApi {
    client: Client,
    base_url: Url,
}

impl HttpLessonApi {
    /// Create a client for the configured backend
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    /// Base URL routes are resolved against
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn route(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> reqwest::Result<T> {
        self.client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        url: Url,
        body: &B,
    ) -> reqwest::Result<T> {
        self.client
            .post(url)
            .json(body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }
}

#[async_trait]
impl LessonApi for HttpLessonApi {
    #[instrument(skip(self))]
    async fn list_lessons(&self) -> Result<Vec<Lesson>> {
        let url = self.route(&["lessons"]);
        let lessons: Vec<Lesson> = self
            .get_json(url)
            .await
            .map_err(|e| Error::ListFetch(e.to_string()))?;

        debug!(count = lessons.len(), "Lesson catalog fetched");
        Ok(lessons)
    }

    #[instrument(skip_all, fields(lesson_id = %lesson_id))]
    async fn fetch_video_ref(&self, lesson_id: &LessonId) -> Result<ObfuscatedVideoRef> {
        let url = self.route(&["lessons", lesson_id.as_str(), "video"]);
        let reference: ObfuscatedVideoRef = self
            .get_json(url)
            .await
            .map_err(|e| Error::ReferenceFetch(e.to_string()))?;

        debug!(issued_at = ?reference.issued_at(), "Video reference fetched");
        Ok(reference)
    }

    #[instrument(skip_all)]
    async fn decrypt(&self, reference: &ObfuscatedVideoRef) -> Result<VideoId> {
        let url = self.route(&["decrypt"]);
        let playable: PlayableVideoRef = self
            .post_json(url, reference)
            .await
            .map_err(|e| Error::Decrypt(e.to_string()))?;

        debug!("Video reference decrypted");
        Ok(playable.video_id)
    }
}
