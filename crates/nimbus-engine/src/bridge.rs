//! In-page bridge between the engine backend and the shell.
//!
//! A small script is injected into every view at creation. It forwards the
//! page-side occurrences the backend cannot observe natively — HTML
//! fullscreen changes, the reserved split-focus shortcut, context-menu
//! requests, find-in-page results, and favicon query replies — as JSON
//! messages over the webview IPC channel. [`parse_bridge_event`] turns a
//! raw message body back into a [`ViewEvent`].

use serde::Deserialize;
use tracing::warn;

use nimbus_common::types::ContextMenuParams;
use nimbus_common::ViewId;

use crate::events::ViewEvent;

/// Injected into every view before any page script runs.
pub const INIT_SCRIPT: &str = r#"
(function() {
    function post(kind, payload) {
        window.ipc.postMessage(JSON.stringify({ kind: kind, payload: payload || null }));
    }

    document.addEventListener('fullscreenchange', function() {
        post('fullscreen', { entered: !!document.fullscreenElement });
    });

    document.addEventListener('keydown', function(e) {
        if (e.altKey && e.code === 'KeyS') {
            e.preventDefault();
            post('reserved-shortcut', { shortcut: 'toggle-split-focus' });
        }
    });

    document.addEventListener('contextmenu', function(e) {
        var link = e.target && e.target.closest ? e.target.closest('a[href]') : null;
        var selection = window.getSelection ? String(window.getSelection()) : '';
        post('context-menu', {
            x: e.clientX,
            y: e.clientY,
            linkUrl: link ? link.href : null,
            selectionText: selection || null,
            isEditable: !!(e.target && e.target.isContentEditable)
        });
    });

    window.__nimbusQueryFavicon = function() {
        var links = document.querySelectorAll('link[rel*="icon"]');
        var href = null;
        for (var i = 0; i < links.length; i++) {
            if (links[i].href) { href = links[i].href; break; }
        }
        post('favicon', { iconUrl: href });
    };

    window.__nimbusFind = function(text) {
        var matches = 0;
        try { if (window.find(text, false, false, true)) { matches = 1; } } catch (_) {}
        post('found-in-page', { matches: matches, activeMatch: matches });
    };
})();
"#;

/// Evaluated to answer a favicon query; the reply arrives as a `favicon`
/// bridge message.
pub const FAVICON_QUERY_SCRIPT: &str = "window.__nimbusQueryFavicon();";

#[derive(Debug, Deserialize)]
struct BridgeMessage {
    kind: String,
    #[serde(default)]
    payload: serde_json::Value,
}

/// Parse a raw IPC body from a view into a [`ViewEvent`]. Malformed or
/// unknown messages are dropped (warn-logged), never surfaced as errors.
pub fn parse_bridge_event(view: ViewId, body: &str) -> Option<ViewEvent> {
    let msg: BridgeMessage = match serde_json::from_str(body) {
        Ok(m) => m,
        Err(_) => {
            warn!(%view, body_len = body.len(), "bridge message rejected: invalid JSON");
            return None;
        }
    };

    match msg.kind.as_str() {
        "fullscreen" => match msg.payload.get("entered").and_then(|v| v.as_bool()) {
            Some(true) => Some(ViewEvent::FullscreenEntered { view }),
            Some(false) => Some(ViewEvent::FullscreenExited { view }),
            None => None,
        },
        "reserved-shortcut" => {
            let shortcut = msg.payload.get("shortcut").and_then(|v| v.as_str());
            match shortcut {
                Some("toggle-split-focus") => Some(ViewEvent::SplitFocusShortcut { view }),
                _ => None,
            }
        }
        "context-menu" => serde_json::from_value::<ContextMenuParams>(msg.payload)
            .ok()
            .map(|params| ViewEvent::ContextMenuRequested { view, params }),
        "found-in-page" => {
            let matches = msg.payload.get("matches").and_then(|v| v.as_u64())? as u32;
            let active_match = msg
                .payload
                .get("activeMatch")
                .and_then(|v| v.as_u64())
                .unwrap_or(0) as u32;
            Some(ViewEvent::FoundInPage {
                view,
                matches,
                active_match,
            })
        }
        "favicon" => {
            let icon_url = msg
                .payload
                .get("iconUrl")
                .and_then(|v| v.as_str())
                .map(str::to_string);
            Some(ViewEvent::FaviconResolved { view, icon_url })
        }
        other => {
            warn!(%view, kind = other, "unknown bridge message kind");
            None
        }
    }
}
