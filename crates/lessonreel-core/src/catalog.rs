//! Lesson catalog controller
//!
//! Fetches the lesson list once per mount, tracks loading/error/empty
//! state, and hands selected lesson ids to the playback side.

use std::sync::Arc;
use tokio::sync::watch;
use tracing::{error, info, instrument};

use crate::{
    api::LessonApi,
    error::LIST_FETCH_MESSAGE,
    types::{Lesson, LessonId},
};

/// Message shown when the catalog loads but holds no lessons
pub const EMPTY_CATALOG_MESSAGE: &str = "No Video available yet.";

/// Display state of the lesson list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogState {
    /// Fetch in flight; the list is not rendered
    Loading,
    /// Lessons in server order
    Loaded(Vec<Lesson>),
    /// Fetch failed; carries the user-facing message
    Failed(String),
}

impl CatalogState {
    /// Loaded lessons, if any
    pub fn lessons(&self) -> Option<&[Lesson]> {
        match self {
            CatalogState::Loaded(lessons) => Some(lessons),
            _ => None,
        }
    }

    /// True when the fetch succeeded with zero lessons
    pub fn is_empty(&self) -> bool {
        matches!(self, CatalogState::Loaded(lessons) if lessons.is_empty())
    }
}

impl std::fmt::Display for CatalogState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogState::Loading => write!(f, "loading"),
            CatalogState::Loaded(lessons) => write!(f, "loaded({})", lessons.len()),
            CatalogState::Failed(_) => write!(f, "failed"),
        }
    }
}

/// A lesson chosen for playback
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Selection(LessonId);

impl Selection {
    pub fn lesson_id(&self) -> &LessonId {
        &self.0
    }

    pub fn into_lesson_id(self) -> LessonId {
        self.0
    }
}

/// Controller owning the lesson list for the lifetime of one mount
#[derive(Clone)]
pub struct CatalogController {
    api: Arc<dyn LessonApi>,
    state_tx: Arc<watch::Sender<CatalogState>>,
}

impl CatalogController {
    /// Create a controller; it starts in `Loading` until [`load`](Self::load) completes
    pub fn new(api: Arc<dyn LessonApi>) -> Self {
        let (state_tx, _) = watch::channel(CatalogState::Loading);
        Self {
            api,
            state_tx: Arc::new(state_tx),
        }
    }

    /// Current display state
    pub fn state(&self) -> CatalogState {
        self.state_tx.borrow().clone()
    }

    /// Subscribe to state changes
    pub fn subscribe(&self) -> watch::Receiver<CatalogState> {
        self.state_tx.subscribe()
    }

    /// Fetch the catalog. Issues exactly one request and never retries on its own.
    #[instrument(skip(self))]
    pub async fn load(&self) -> CatalogState {
        self.set_state(CatalogState::Loading);

        let next = match self.api.list_lessons().await {
            Ok(lessons) => {
                info!(count = lessons.len(), "Lessons loaded");
                CatalogState::Loaded(lessons)
            }
            Err(e) => {
                error!(error = %e, code = e.error_code(), "Failed to load lessons");
                CatalogState::Failed(LIST_FETCH_MESSAGE.to_string())
            }
        };

        self.set_state(next.clone());
        next
    }

    /// Manual recovery after a failed load
    pub async fn retry(&self) -> CatalogState {
        info!("Retrying lesson catalog fetch");
        self.load().await
    }

    /// Emit a selection for the given lesson.
    ///
    /// Membership in the loaded list is not checked; an unknown id simply
    /// fails later at the backend.
    pub fn select(&self, lesson_id: &LessonId) -> Selection {
        info!(lesson_id = %lesson_id, "Lesson selected");
        Selection(lesson_id.clone())
    }

    fn set_state(&self, state: CatalogState) {
        self.state_tx.send_replace(state);
    }
}

impl std::fmt::Debug for CatalogController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogController")
            .field("state", &*self.state_tx.borrow())
            .finish_non_exhaustive()
    }
}
