//! Playback Session - resolves a lesson to a playable video and tracks the
//! embedded player
//!
//! Coordinates:
//! - Obfuscated reference fetch, then the decrypt exchange (strictly in order)
//! - Session status transitions
//! - Embedded player signals (ready, ended, error)
//!
//! Every call to [`PlaybackController::open`] starts a new session. Results
//! that arrive for a superseded session are dropped on arrival; in-flight
//! requests are never aborted.

use std::sync::Arc;
use tokio::sync::{watch, Mutex};
use tracing::{debug, error, info, instrument, warn};
use url::Url;

use crate::{
    api::LessonApi,
    player::{EmbedConfig, PlayerControl, PlayerEvent},
    types::{LessonId, SessionId, VideoId},
    Error,
};

/// Status of the playback session as shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStatus {
    /// No session open
    Idle,
    /// Resolving the lesson to a playable video
    Loading,
    /// Playable id resolved; the embedded player is bound to it
    Ready(VideoId),
    /// Terminal for the current lesson; carries the user-facing message
    Failed(String),
}

impl SessionStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, SessionStatus::Loading)
    }

    pub fn video_id(&self) -> Option<&VideoId> {
        match self {
            SessionStatus::Ready(id) => Some(id),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            SessionStatus::Failed(message) => Some(message),
            _ => None,
        }
    }
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionStatus::Idle => write!(f, "idle"),
            SessionStatus::Loading => write!(f, "loading"),
            SessionStatus::Ready(_) => write!(f, "ready"),
            SessionStatus::Failed(_) => write!(f, "failed"),
        }
    }
}

/// Phase of an open session
enum Phase {
    Resolving,
    Ready {
        /// Handle bound once the embedded player reports ready
        control: Option<Box<dyn PlayerControl>>,
    },
    Failed,
}

/// The one open session
struct ActiveSession {
    id: SessionId,
    lesson_id: LessonId,
    phase: Phase,
}

/// Playback session controller
#[derive(Clone)]
pub struct PlaybackController {
    api: Arc<dyn LessonApi>,
    embed: EmbedConfig,
    session: Arc<Mutex<Option<ActiveSession>>>,
    status_tx: Arc<watch::Sender<SessionStatus>>,
}

impl PlaybackController {
    /// Create a controller with no open session
    pub fn new(api: Arc<dyn LessonApi>, embed: EmbedConfig) -> Self {
        let (status_tx, _) = watch::channel(SessionStatus::Idle);
        Self {
            api,
            embed,
            session: Arc::new(Mutex::new(None)),
            status_tx: Arc::new(status_tx),
        }
    }

    /// Current status
    pub fn status(&self) -> SessionStatus {
        self.status_tx.borrow().clone()
    }

    /// Subscribe to status changes
    pub fn subscribe(&self) -> watch::Receiver<SessionStatus> {
        self.status_tx.subscribe()
    }

    /// Player configuration used for every session
    pub fn embed_config(&self) -> EmbedConfig {
        self.embed
    }

    /// Iframe URL for the current session, once ready
    pub fn embed_url(&self) -> Option<Url> {
        self.status_tx
            .borrow()
            .video_id()
            .map(|id| self.embed.embed_url(id))
    }

    /// Id of the open session, if any
    pub async fn current_session(&self) -> Option<SessionId> {
        self.session.lock().await.as_ref().map(|s| s.id)
    }

    /// Open a session for `lesson_id` and resolve it.
    ///
    /// Replaces any open session. Returns once this session's resolution
    /// settles or is superseded; the outcome is visible through
    /// [`status`](Self::status).
    #[instrument(skip_all, fields(lesson_id = %lesson_id))]
    pub async fn open(&self, lesson_id: LessonId) -> SessionId {
        let id = self.begin(lesson_id.clone()).await;

        let reference = match self.api.fetch_video_ref(&lesson_id).await {
            Ok(reference) => reference,
            Err(e) => {
                self.fail(id, e).await;
                return id;
            }
        };

        if !self.is_current(id).await {
            debug!(session_id = %id, "Session superseded before decrypt; dropping reference");
            return id;
        }

        match self.api.decrypt(&reference).await {
            Ok(video_id) => self.ready(id, video_id).await,
            Err(e) => self.fail(id, e).await,
        }

        id
    }

    /// Route a signal from the embedded player bound to `session_id`
    pub async fn handle_player_event(&self, session_id: SessionId, event: PlayerEvent) {
        let mut guard = self.session.lock().await;
        let session = match guard.as_mut() {
            Some(session) if session.id == session_id => session,
            _ => {
                debug!(session_id = %session_id, ?event, "Ignoring player event for stale session");
                return;
            }
        };

        let Phase::Ready { control } = &mut session.phase else {
            warn!(session_id = %session_id, ?event, "Player event outside ready state");
            return;
        };

        match event {
            PlayerEvent::Ready(handle) => {
                debug!(session_id = %session_id, "Player control bound");
                *control = Some(handle);
            }
            PlayerEvent::Ended => {
                if let Some(control) = control {
                    control.pause();
                }
                info!(session_id = %session_id, "Playback ended");
            }
            PlayerEvent::Error(code) => {
                let err = Error::Playback { code };
                error!(session_id = %session_id, lesson_id = %session.lesson_id, code, "Embedded player error");
                session.phase = Phase::Failed;
                self.status_tx.send_replace(SessionStatus::Failed(err.user_message()));
            }
        }
    }

    /// Tear down the open session, discarding the playable id and player handle
    pub async fn close(&self) {
        if let Some(session) = self.session.lock().await.take() {
            info!(session_id = %session.id, lesson_id = %session.lesson_id, "Session closed");
        }
        self.status_tx.send_replace(SessionStatus::Idle);
    }

    async fn begin(&self, lesson_id: LessonId) -> SessionId {
        let id = SessionId::new();
        let mut guard = self.session.lock().await;
        if let Some(previous) = guard.as_ref() {
            debug!(previous = %previous.id, "Replacing open session");
        }
        info!(session_id = %id, lesson_id = %lesson_id, "Session opened");
        *guard = Some(ActiveSession {
            id,
            lesson_id,
            phase: Phase::Resolving,
        });
        self.status_tx.send_replace(SessionStatus::Loading);
        id
    }

    async fn is_current(&self, id: SessionId) -> bool {
        matches!(self.session.lock().await.as_ref(), Some(s) if s.id == id)
    }

    async fn ready(&self, id: SessionId, video_id: VideoId) {
        let mut guard = self.session.lock().await;
        match guard.as_mut() {
            Some(session) if session.id == id => {
                session.phase = Phase::Ready { control: None };
                info!(session_id = %id, "Video resolved");
                self.status_tx.send_replace(SessionStatus::Ready(video_id));
            }
            _ => debug!(session_id = %id, "Discarding resolved video for stale session"),
        }
    }

    async fn fail(&self, id: SessionId, err: Error) {
        let mut guard = self.session.lock().await;
        match guard.as_mut() {
            Some(session) if session.id == id => {
                error!(session_id = %id, error = %err, code = err.error_code(), "Failed to load video");
                session.phase = Phase::Failed;
                self.status_tx.send_replace(SessionStatus::Failed(err.user_message()));
            }
            _ => debug!(session_id = %id, error = %err, "Discarding failure for stale session"),
        }
    }
}

impl std::fmt::Debug for PlaybackController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackController")
            .field("status", &*self.status_tx.borrow())
            .field("embed", &self.embed)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::VIDEO_LOAD_MESSAGE, types::ObfuscatedVideoRef, Lesson, Result};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Backend that resolves every lesson `n` to video `vid-n`
    struct EchoApi {
        decrypts: AtomicUsize,
        fail_decrypt: bool,
    }

    impl EchoApi {
        fn new() -> Self {
            Self { decrypts: AtomicUsize::new(0), fail_decrypt: false }
        }
    }

    #[async_trait]
    impl LessonApi for EchoApi {
        async fn list_lessons(&self) -> Result<Vec<Lesson>> {
            Ok(vec![])
        }

        async fn fetch_video_ref(&self, lesson_id: &LessonId) -> Result<ObfuscatedVideoRef> {
            if lesson_id.as_str() == "missing" {
                return Err(Error::ReferenceFetch("404 Not Found".into()));
            }
            Ok(ObfuscatedVideoRef {
                encrypted_video_id: format!("enc-{}", lesson_id),
                timestamp: 0.into(),
                checksum: "c".into(),
            })
        }

        async fn decrypt(&self, reference: &ObfuscatedVideoRef) -> Result<VideoId> {
            self.decrypts.fetch_add(1, Ordering::SeqCst);
            if self.fail_decrypt {
                return Err(Error::Decrypt("checksum mismatch".into()));
            }
            let lesson = reference.encrypted_video_id.trim_start_matches("enc-");
            Ok(VideoId::new(format!("vid-{}", lesson)))
        }
    }

    struct CountingControl(Arc<AtomicUsize>);

    impl PlayerControl for CountingControl {
        fn pause(&self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn controller(api: EchoApi) -> PlaybackController {
        PlaybackController::new(Arc::new(api), EmbedConfig::default())
    }

    #[tokio::test]
    async fn test_open_resolves_to_ready() {
        let playback = controller(EchoApi::new());
        assert_eq!(playback.status(), SessionStatus::Idle);

        playback.open(LessonId::from("7")).await;
        assert_eq!(playback.status(), SessionStatus::Ready(VideoId::new("vid-7")));
        assert!(playback.embed_url().unwrap().path().ends_with("/vid-7"));
    }

    #[tokio::test]
    async fn test_reference_failure_skips_decrypt() {
        let api = Arc::new(EchoApi::new());
        let playback = PlaybackController::new(api.clone(), EmbedConfig::default());

        playback.open(LessonId::from("missing")).await;
        assert_eq!(playback.status(), SessionStatus::Failed(VIDEO_LOAD_MESSAGE.to_string()));
        assert_eq!(api.decrypts.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_decrypt_failure() {
        let playback = controller(EchoApi { decrypts: AtomicUsize::new(0), fail_decrypt: true });
        playback.open(LessonId::from("1")).await;
        assert_eq!(playback.status().error_message(), Some(VIDEO_LOAD_MESSAGE));
    }

    #[tokio::test]
    async fn test_ended_pauses_and_stays_ready() {
        let playback = controller(EchoApi::new());
        let session = playback.open(LessonId::from("1")).await;
        let pauses = Arc::new(AtomicUsize::new(0));

        playback
            .handle_player_event(session, PlayerEvent::Ready(Box::new(CountingControl(pauses.clone()))))
            .await;
        playback.handle_player_event(session, PlayerEvent::Ended).await;

        assert_eq!(pauses.load(Ordering::SeqCst), 1);
        assert!(playback.status().video_id().is_some());
    }

    #[tokio::test]
    async fn test_player_error_codes() {
        let playback = controller(EchoApi::new());

        let session = playback.open(LessonId::from("1")).await;
        playback.handle_player_event(session, PlayerEvent::Error(101)).await;
        assert!(playback.status().error_message().unwrap().contains("blocked embedding"));

        let session = playback.open(LessonId::from("2")).await;
        playback.handle_player_event(session, PlayerEvent::Error(999)).await;
        assert!(playback.status().error_message().unwrap().contains("999"));
    }

    #[tokio::test]
    async fn test_failed_ignores_further_player_events() {
        let playback = controller(EchoApi::new());
        let session = playback.open(LessonId::from("1")).await;

        playback.handle_player_event(session, PlayerEvent::Error(5)).await;
        let failed = playback.status();
        playback.handle_player_event(session, PlayerEvent::Error(2)).await;
        assert_eq!(playback.status(), failed);
    }

    #[tokio::test]
    async fn test_stale_player_events_ignored() {
        let playback = controller(EchoApi::new());
        let old = playback.open(LessonId::from("1")).await;
        playback.open(LessonId::from("2")).await;

        playback.handle_player_event(old, PlayerEvent::Error(150)).await;
        assert_eq!(playback.status(), SessionStatus::Ready(VideoId::new("vid-2")));
    }

    #[tokio::test]
    async fn test_close_discards_session() {
        let api = Arc::new(EchoApi::new());
        let playback = PlaybackController::new(api.clone(), EmbedConfig::default());

        let first = playback.open(LessonId::from("1")).await;
        playback.close().await;
        assert_eq!(playback.status(), SessionStatus::Idle);
        assert_eq!(playback.current_session().await, None);
        assert!(playback.embed_url().is_none());

        let second = playback.open(LessonId::from("1")).await;
        assert_ne!(first, second);
        assert_eq!(api.decrypts.load(Ordering::SeqCst), 2);
    }
}
