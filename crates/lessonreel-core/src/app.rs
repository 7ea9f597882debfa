//! Top-level coordinator
//!
//! Owns the catalog, the playback controller, and the single optional
//! selection handed between them. Nothing else is shared.

use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

use crate::{
    api::{HttpLessonApi, LessonApi},
    catalog::{CatalogController, CatalogState, Selection},
    config::ClientConfig,
    player::EmbedConfig,
    playback::{PlaybackController, SessionStatus},
    types::{LessonId, SessionId},
    Result,
};

/// Lesson browser application state
#[derive(Debug, Clone)]
pub struct LessonApp {
    catalog: CatalogController,
    playback: PlaybackController,
    selection: Arc<RwLock<Option<Selection>>>,
}

impl LessonApp {
    /// Create an app over any backend
    pub fn new(api: Arc<dyn LessonApi>, embed: EmbedConfig) -> Self {
        Self {
            catalog: CatalogController::new(api.clone()),
            playback: PlaybackController::new(api, embed),
            selection: Arc::new(RwLock::new(None)),
        }
    }

    /// Create an app talking HTTP to the configured backend
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let api = HttpLessonApi::new(config)?;
        info!(base_url = %api.base_url(), "Lesson backend configured");
        Ok(Self::new(Arc::new(api), EmbedConfig::default()))
    }

    pub fn catalog(&self) -> &CatalogController {
        &self.catalog
    }

    pub fn playback(&self) -> &PlaybackController {
        &self.playback
    }

    /// Mount: fetch the catalog once
    pub async fn mount(&self) -> CatalogState {
        self.catalog.load().await
    }

    /// Current selection
    pub async fn selection(&self) -> Option<Selection> {
        self.selection.read().await.clone()
    }

    /// Select a lesson and open a playback session for it
    pub async fn play(&self, lesson_id: &LessonId) -> SessionId {
        let selection = self.catalog.select(lesson_id);
        *self.selection.write().await = Some(selection.clone());
        self.playback.open(selection.into_lesson_id()).await
    }

    /// Close the player overlay and clear the selection
    pub async fn close_player(&self) {
        *self.selection.write().await = None;
        self.playback.close().await;
    }

    /// Snapshot of both controllers
    pub fn view(&self) -> (CatalogState, SessionStatus) {
        (self.catalog.state(), self.playback.status())
    }
}
