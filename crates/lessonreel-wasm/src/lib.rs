//! Lessonreel WASM - Browser helpers for the lesson player
//!
//! Provides the browser-side pieces of the player contract:
//! - Scoped context menu suppression tied to mount/unmount
//! - Player vars and iframe URL for the embedded player
//! - Player error-code translation
//!
//! ## Integration
//!
//! ```javascript
//! import init, { ContextMenuGuard, playerVars, playerErrorMessage } from '@lessonreel/wasm';
//!
//! await init();
//! const guard = new ContextMenuGuard();   // on mount
//! const opts = { playerVars: playerVars() };
//! onError = (e) => setError(playerErrorMessage(e.data));
//! guard.dispose();                         // on unmount
//! ```

use lessonreel_core::{playback_error_message, EmbedConfig, VideoId};
use serde::Serialize;
use wasm_bindgen::prelude::*;

mod context_menu;

pub use context_menu::ContextMenuGuard;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    web_sys::console::log_1(&"[Lessonreel WASM] Initialized".into());
}

/// Library version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Player vars object for the embedded player
#[wasm_bindgen(js_name = playerVars)]
pub fn player_vars() -> Result<JsValue, JsValue> {
    EmbedConfig::default()
        .player_vars_json()
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Iframe URL for a resolved video id
#[wasm_bindgen(js_name = embedUrl)]
pub fn embed_url(video_id: &str) -> String {
    EmbedConfig::default()
        .embed_url(&VideoId::new(video_id))
        .to_string()
}

/// User-facing message for an embedded player error code
#[wasm_bindgen(js_name = playerErrorMessage)]
pub fn player_error_message(code: i32) -> String {
    playback_error_message(code)
}
