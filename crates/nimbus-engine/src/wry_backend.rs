//! Real engine backend: `wry` webviews as children of a host window.
//!
//! Each view is a child webview positioned inside the window; attachment to
//! the display stack maps to visibility (child webviews cannot be
//! re-parented). Handlers registered at build time push [`ViewEvent`]s into
//! a shared drain vector consumed by the shell's pump.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tracing::{debug, warn};
use wry::raw_window_handle::HasWindowHandle;
use wry::{WebView, WebViewBuilder};

use nimbus_common::{Bounds, EngineError, ViewId};

use crate::bridge;
use crate::content::{ContentProvider, SCHEME};
use crate::engine::Engine;
use crate::events::ViewEvent;
use crate::filter::UrlPatternFilter;
use crate::options::{Partition, ViewOptions};

struct WryView {
    webview: WebView,
    /// Best-effort URL/history tracking; wry exposes no synchronous
    /// session-history query, so link-click navigations inside the page
    /// are not reflected here.
    current_url: String,
    back: Vec<String>,
    forward: Vec<String>,
}

pub struct WryEngine<W: HasWindowHandle> {
    window: W,
    next: u64,
    views: HashMap<ViewId, WryView>,
    events: Arc<Mutex<Vec<ViewEvent>>>,
    filter: Arc<UrlPatternFilter>,
    content: Arc<ContentProvider>,
}

fn to_wry_rect(bounds: Bounds) -> wry::Rect {
    wry::Rect {
        position: wry::dpi::LogicalPosition::new(bounds.x as f64, bounds.y as f64).into(),
        size: wry::dpi::LogicalSize::new(bounds.width as f64, bounds.height as f64).into(),
    }
}

fn push_event(events: &Arc<Mutex<Vec<ViewEvent>>>, event: ViewEvent) {
    if let Ok(mut evts) = events.lock() {
        evts.push(event);
    }
}

impl<W: HasWindowHandle> WryEngine<W> {
    pub fn new(window: W, filter: Arc<UrlPatternFilter>) -> Self {
        Self {
            window,
            next: 0,
            views: HashMap::new(),
            events: Arc::new(Mutex::new(Vec::new())),
            filter,
            content: Arc::new(ContentProvider::new()),
        }
    }

    pub fn filter(&self) -> &Arc<UrlPatternFilter> {
        &self.filter
    }

    fn view(&self, view: ViewId) -> Option<&WryView> {
        self.views.get(&view)
    }

    fn eval(&self, view: ViewId, script: &str) {
        if let Some(v) = self.view(view) {
            if let Err(e) = v.webview.evaluate_script(script) {
                warn!(%view, error = %e, "script evaluation failed");
            }
        }
    }
}

impl<W: HasWindowHandle> Engine for WryEngine<W> {
    fn create_view(&mut self, options: ViewOptions) -> Result<ViewId, EngineError> {
        self.next += 1;
        let id = ViewId(self.next);
        let events = Arc::clone(&self.events);
        let filter = Arc::clone(&self.filter);
        let content = Arc::clone(&self.content);

        let mut builder = WebViewBuilder::new()
            .with_transparent(options.transparent)
            .with_devtools(cfg!(debug_assertions))
            .with_incognito(options.partition == Partition::Incognito)
            .with_focused(false)
            .with_initialization_script(bridge::INIT_SCRIPT);

        if let Some(ua) = &options.user_agent {
            builder = builder.with_user_agent(ua);
        }

        // Bridge messages: fullscreen, shortcut, context menu, find
        // results, favicon replies.
        let ipc_events = Arc::clone(&events);
        builder = builder.with_ipc_handler(move |request| {
            if let Some(event) = bridge::parse_bridge_event(id, request.body()) {
                push_event(&ipc_events, event);
            }
        });

        let load_events = Arc::clone(&events);
        builder = builder.with_on_page_load_handler(move |event, url| {
            let event = match event {
                wry::PageLoadEvent::Started => ViewEvent::LoadStarted { view: id },
                wry::PageLoadEvent::Finished => ViewEvent::LoadFinished { view: id },
            };
            debug!(view = %id, url = %url, "page load");
            push_event(&load_events, event);
        });

        let title_events = Arc::clone(&events);
        builder = builder.with_document_title_changed_handler(move |title| {
            push_event(
                &title_events,
                ViewEvent::TitleChanged { view: id, title },
            );
        });

        // Policy callback: runs before the navigation commits. Blocked
        // requests are dropped silently; allowed ones are reported as the
        // commit (wry has no separate committed callback).
        let nav_events = Arc::clone(&events);
        builder = builder.with_navigation_handler(move |url| {
            if filter.is_blocked(&url) {
                debug!(view = %id, url = %url, "navigation blocked by request filter");
                return false;
            }
            push_event(
                &nav_events,
                ViewEvent::NavigationCommitted {
                    view: id,
                    url: url.clone(),
                },
            );
            true
        });

        // New top-level destinations are always denied in place; the shell
        // answers by creating a sibling tab.
        let popup_events = Arc::clone(&events);
        builder = builder.with_new_window_req_handler(move |url| {
            push_event(
                &popup_events,
                ViewEvent::NewWindowRequested { view: id, url },
            );
            false
        });

        builder = builder.with_custom_protocol(SCHEME.to_string(), move |_wv_id, request| {
            let uri = request.uri().to_string();
            let path = uri
                .strip_prefix("nimbus://")
                .unwrap_or(&uri)
                .trim_start_matches('/');
            match content.resolve(path) {
                Some((mime, body)) => wry::http::Response::builder()
                    .status(200)
                    .header("Content-Type", mime)
                    .body(std::borrow::Cow::from(body.as_bytes().to_vec()))
                    .unwrap(),
                None => {
                    warn!(path = %path, "bundled content not found");
                    wry::http::Response::builder()
                        .status(404)
                        .body(std::borrow::Cow::from(b"Not Found".to_vec()))
                        .unwrap()
                }
            }
        });

        let webview = builder
            .build_as_child(&self.window)
            .map_err(|e| EngineError::Creation(e.to_string()))?;

        // Views start detached; the compositor attaches them.
        if let Err(e) = webview.set_visible(false) {
            warn!(view = %id, error = %e, "could not hide freshly created view");
        }

        debug!(view = %id, "view created");
        self.views.insert(
            id,
            WryView {
                webview,
                current_url: String::new(),
                back: Vec::new(),
                forward: Vec::new(),
            },
        );
        Ok(id)
    }

    fn destroy_view(&mut self, view: ViewId) {
        if self.views.remove(&view).is_some() {
            debug!(%view, "view destroyed");
            push_event(&self.events, ViewEvent::Closed { view });
        }
    }

    fn attach(&mut self, view: ViewId) {
        if let Some(v) = self.view(view) {
            if let Err(e) = v.webview.set_visible(true) {
                warn!(%view, error = %e, "attach failed");
            }
        }
    }

    fn detach(&mut self, view: ViewId) {
        if let Some(v) = self.view(view) {
            if let Err(e) = v.webview.set_visible(false) {
                warn!(%view, error = %e, "detach failed");
            }
        }
    }

    fn set_bounds(&mut self, view: ViewId, bounds: Bounds) {
        if let Some(v) = self.view(view) {
            if let Err(e) = v.webview.set_bounds(to_wry_rect(bounds)) {
                warn!(%view, error = %e, "set_bounds failed");
            }
        }
    }

    fn navigate(&mut self, view: ViewId, url: &str) {
        let Some(v) = self.views.get_mut(&view) else {
            return;
        };
        if !v.current_url.is_empty() {
            let previous = std::mem::replace(&mut v.current_url, url.to_string());
            v.back.push(previous);
        } else {
            v.current_url = url.to_string();
        }
        v.forward.clear();
        if let Err(e) = v.webview.load_url(url) {
            warn!(%view, url, error = %e, "load_url failed");
            push_event(
                &self.events,
                ViewEvent::LoadFailed {
                    view,
                    description: e.to_string(),
                },
            );
        }
    }

    fn go_back(&mut self, view: ViewId) {
        let Some(v) = self.views.get_mut(&view) else {
            return;
        };
        if let Some(previous) = v.back.pop() {
            let current = std::mem::replace(&mut v.current_url, previous);
            v.forward.push(current);
            if let Err(e) = v.webview.evaluate_script("history.back();") {
                warn!(%view, error = %e, "go_back failed");
            }
        }
    }

    fn go_forward(&mut self, view: ViewId) {
        let Some(v) = self.views.get_mut(&view) else {
            return;
        };
        if let Some(next) = v.forward.pop() {
            let current = std::mem::replace(&mut v.current_url, next);
            v.back.push(current);
            if let Err(e) = v.webview.evaluate_script("history.forward();") {
                warn!(%view, error = %e, "go_forward failed");
            }
        }
    }

    fn reload(&mut self, view: ViewId) {
        self.eval(view, "location.reload();");
    }

    fn stop(&mut self, view: ViewId) {
        self.eval(view, "window.stop();");
    }

    fn can_go_back(&self, view: ViewId) -> bool {
        self.view(view).is_some_and(|v| !v.back.is_empty())
    }

    fn can_go_forward(&self, view: ViewId) -> bool {
        self.view(view).is_some_and(|v| !v.forward.is_empty())
    }

    fn current_url(&self, view: ViewId) -> Option<String> {
        self.view(view).map(|v| v.current_url.clone())
    }

    fn request_favicon(&mut self, view: ViewId) {
        let Some(v) = self.view(view) else {
            return;
        };
        if v.webview.evaluate_script(bridge::FAVICON_QUERY_SCRIPT).is_err() {
            // Page is gone or scripting unavailable; report "no icon" so
            // the shell can fall back to the conventional path.
            push_event(
                &self.events,
                ViewEvent::FaviconResolved {
                    view,
                    icon_url: None,
                },
            );
        }
    }

    fn find_in_page(&mut self, view: ViewId, text: &str) {
        let quoted = serde_json::to_string(text).unwrap_or_else(|_| "\"\"".to_string());
        self.eval(view, &format!("window.__nimbusFind({quoted});"));
    }

    fn stop_find(&mut self, view: ViewId) {
        self.eval(
            view,
            "window.getSelection && window.getSelection().removeAllRanges();",
        );
    }

    fn set_zoom(&mut self, view: ViewId, factor: f64) {
        if let Some(v) = self.view(view) {
            if let Err(e) = v.webview.zoom(factor) {
                warn!(%view, factor, error = %e, "zoom failed");
            }
        }
    }

    fn drain_events(&mut self) -> Vec<ViewEvent> {
        match self.events.lock() {
            Ok(mut evts) => std::mem::take(&mut *evts),
            Err(_) => Vec::new(),
        }
    }
}
