//! Context Menu Guard - scoped suppression of the browser context menu
//!
//! Installed when the app mounts and disposed when it unmounts. The
//! listener runs in the capture phase so it also covers the embedded
//! player's surface.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Event};

const CONTEXT_MENU: &str = "contextmenu";

/// Registration of the document-wide `contextmenu` blocker
#[wasm_bindgen]
pub struct ContextMenuGuard {
    document: Document,
    listener: Option<Closure<dyn FnMut(Event)>>,
}

#[wasm_bindgen]
impl ContextMenuGuard {
    /// Install the blocker on the current document
    #[wasm_bindgen(constructor)]
    pub fn install() -> Result<ContextMenuGuard, JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document available"))?;

        let listener = Closure::wrap(Box::new(|event: Event| {
            event.prevent_default();
            event.stop_propagation();
        }) as Box<dyn FnMut(Event)>);

        document.add_event_listener_with_callback_and_bool(
            CONTEXT_MENU,
            listener.as_ref().unchecked_ref(),
            true,
        )?;
        web_sys::console::debug_1(&"[Lessonreel WASM] Context menu blocked".into());

        Ok(Self {
            document,
            listener: Some(listener),
        })
    }

    /// Whether the blocker is still registered
    #[wasm_bindgen(getter)]
    pub fn active(&self) -> bool {
        self.listener.is_some()
    }

    /// Remove the blocker. Safe to call more than once.
    pub fn dispose(&mut self) {
        if let Some(listener) = self.listener.take() {
            let _ = self.document.remove_event_listener_with_callback_and_bool(
                CONTEXT_MENU,
                listener.as_ref().unchecked_ref(),
                true,
            );
            web_sys::console::debug_1(&"[Lessonreel WASM] Context menu restored".into());
        }
    }
}

impl Drop for ContextMenuGuard {
    fn drop(&mut self) {
        self.dispose();
    }
}
