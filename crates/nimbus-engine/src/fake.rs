//! Deterministic in-memory engine for tests.
//!
//! `navigate` synthesizes the load-start / committed / load-finish event
//! sequence a real backend would report, and every structural operation is
//! recorded in an op log so tests can assert ordering (detach-all before
//! attach, teardown on close, and so on).

use std::collections::HashMap;

use nimbus_common::{Bounds, EngineError, ViewId};

use crate::engine::Engine;
use crate::events::ViewEvent;
use crate::options::ViewOptions;

#[derive(Debug, Clone, PartialEq)]
pub enum EngineOp {
    Create(ViewId),
    Destroy(ViewId),
    Attach(ViewId),
    Detach(ViewId),
    SetBounds(ViewId, Bounds),
    Navigate(ViewId, String),
}

#[derive(Debug, Clone)]
pub struct FakeView {
    pub options: ViewOptions,
    pub url: String,
    pub attached: bool,
    pub bounds: Option<Bounds>,
    pub back: Vec<String>,
    pub forward: Vec<String>,
    /// What the document will report when its favicon is queried.
    pub favicon: Option<String>,
    pub zoom: f64,
    pub find_query: Option<String>,
}

impl FakeView {
    fn new(options: ViewOptions) -> Self {
        Self {
            options,
            url: String::new(),
            attached: false,
            bounds: None,
            back: Vec::new(),
            forward: Vec::new(),
            favicon: None,
            zoom: 1.0,
            find_query: None,
        }
    }
}

#[derive(Default)]
pub struct FakeEngine {
    next: u64,
    views: HashMap<ViewId, FakeView>,
    events: Vec<ViewEvent>,
    pub ops: Vec<EngineOp>,
}

impl FakeEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self, view: ViewId) -> Option<&FakeView> {
        self.views.get(&view)
    }

    pub fn view_count(&self) -> usize {
        self.views.len()
    }

    /// Ids of currently attached views, in id order.
    pub fn attached_views(&self) -> Vec<ViewId> {
        let mut attached: Vec<ViewId> = self
            .views
            .iter()
            .filter(|(_, v)| v.attached)
            .map(|(id, _)| *id)
            .collect();
        attached.sort();
        attached
    }

    /// Inject an event as if the engine had reported it.
    pub fn push_event(&mut self, event: ViewEvent) {
        self.events.push(event);
    }

    /// Configure what the document will answer to a favicon query.
    pub fn set_favicon(&mut self, view: ViewId, favicon: Option<String>) {
        if let Some(v) = self.views.get_mut(&view) {
            v.favicon = favicon;
        }
    }

    pub fn take_ops(&mut self) -> Vec<EngineOp> {
        std::mem::take(&mut self.ops)
    }

    fn emit_navigation(&mut self, view: ViewId, url: String) {
        self.events.push(ViewEvent::LoadStarted { view });
        self.events.push(ViewEvent::NavigationCommitted {
            view,
            url: url.clone(),
        });
        self.events.push(ViewEvent::LoadFinished { view });
    }
}

impl Engine for FakeEngine {
    fn create_view(&mut self, options: ViewOptions) -> Result<ViewId, EngineError> {
        self.next += 1;
        let id = ViewId(self.next);
        self.views.insert(id, FakeView::new(options));
        self.ops.push(EngineOp::Create(id));
        Ok(id)
    }

    fn destroy_view(&mut self, view: ViewId) {
        if self.views.remove(&view).is_some() {
            self.ops.push(EngineOp::Destroy(view));
            self.events.push(ViewEvent::Closed { view });
        }
    }

    fn attach(&mut self, view: ViewId) {
        if let Some(v) = self.views.get_mut(&view) {
            v.attached = true;
            self.ops.push(EngineOp::Attach(view));
        }
    }

    fn detach(&mut self, view: ViewId) {
        if let Some(v) = self.views.get_mut(&view) {
            v.attached = false;
            self.ops.push(EngineOp::Detach(view));
        }
    }

    fn set_bounds(&mut self, view: ViewId, bounds: Bounds) {
        if let Some(v) = self.views.get_mut(&view) {
            v.bounds = Some(bounds);
            self.ops.push(EngineOp::SetBounds(view, bounds));
        }
    }

    fn navigate(&mut self, view: ViewId, url: &str) {
        let Some(v) = self.views.get_mut(&view) else {
            return;
        };
        if !v.url.is_empty() {
            let previous = std::mem::replace(&mut v.url, url.to_string());
            v.back.push(previous);
        } else {
            v.url = url.to_string();
        }
        v.forward.clear();
        self.ops.push(EngineOp::Navigate(view, url.to_string()));
        self.emit_navigation(view, url.to_string());
    }

    fn go_back(&mut self, view: ViewId) {
        let Some(v) = self.views.get_mut(&view) else {
            return;
        };
        let Some(previous) = v.back.pop() else {
            return;
        };
        let current = std::mem::replace(&mut v.url, previous.clone());
        v.forward.push(current);
        self.emit_navigation(view, previous);
    }

    fn go_forward(&mut self, view: ViewId) {
        let Some(v) = self.views.get_mut(&view) else {
            return;
        };
        let Some(next) = v.forward.pop() else {
            return;
        };
        let current = std::mem::replace(&mut v.url, next.clone());
        v.back.push(current);
        self.emit_navigation(view, next);
    }

    fn reload(&mut self, view: ViewId) {
        let Some(v) = self.views.get(&view) else {
            return;
        };
        let url = v.url.clone();
        if !url.is_empty() {
            self.emit_navigation(view, url);
        }
    }

    fn stop(&mut self, view: ViewId) {
        if self.views.contains_key(&view) {
            self.events.push(ViewEvent::LoadFinished { view });
        }
    }

    fn can_go_back(&self, view: ViewId) -> bool {
        self.views.get(&view).is_some_and(|v| !v.back.is_empty())
    }

    fn can_go_forward(&self, view: ViewId) -> bool {
        self.views.get(&view).is_some_and(|v| !v.forward.is_empty())
    }

    fn current_url(&self, view: ViewId) -> Option<String> {
        self.views.get(&view).map(|v| v.url.clone())
    }

    fn request_favicon(&mut self, view: ViewId) {
        if let Some(v) = self.views.get(&view) {
            let icon_url = v.favicon.clone();
            self.events
                .push(ViewEvent::FaviconResolved { view, icon_url });
        }
    }

    fn find_in_page(&mut self, view: ViewId, text: &str) {
        if let Some(v) = self.views.get_mut(&view) {
            v.find_query = Some(text.to_string());
            self.events.push(ViewEvent::FoundInPage {
                view,
                matches: 1,
                active_match: 1,
            });
        }
    }

    fn stop_find(&mut self, view: ViewId) {
        if let Some(v) = self.views.get_mut(&view) {
            v.find_query = None;
        }
    }

    fn set_zoom(&mut self, view: ViewId, factor: f64) {
        if let Some(v) = self.views.get_mut(&view) {
            v.zoom = factor;
        }
    }

    fn drain_events(&mut self) -> Vec<ViewEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigate_synthesizes_load_sequence() {
        let mut engine = FakeEngine::new();
        let view = engine.create_view(ViewOptions::default()).unwrap();
        engine.drain_events();

        engine.navigate(view, "https://example.com/");
        let events = engine.drain_events();
        assert!(matches!(events[0], ViewEvent::LoadStarted { .. }));
        assert!(
            matches!(&events[1], ViewEvent::NavigationCommitted { url, .. } if url == "https://example.com/")
        );
        assert!(matches!(events[2], ViewEvent::LoadFinished { .. }));
    }

    #[test]
    fn history_tracking() {
        let mut engine = FakeEngine::new();
        let view = engine.create_view(ViewOptions::default()).unwrap();

        engine.navigate(view, "https://a.example/");
        assert!(!engine.can_go_back(view));

        engine.navigate(view, "https://b.example/");
        assert!(engine.can_go_back(view));
        assert!(!engine.can_go_forward(view));

        engine.go_back(view);
        assert_eq!(engine.current_url(view).as_deref(), Some("https://a.example/"));
        assert!(engine.can_go_forward(view));

        engine.go_forward(view);
        assert_eq!(engine.current_url(view).as_deref(), Some("https://b.example/"));
    }

    #[test]
    fn destroy_is_idempotent() {
        let mut engine = FakeEngine::new();
        let view = engine.create_view(ViewOptions::default()).unwrap();
        engine.destroy_view(view);
        engine.destroy_view(view);
        assert_eq!(engine.view_count(), 0);
        let closed: Vec<_> = engine
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, ViewEvent::Closed { .. }))
            .collect();
        assert_eq!(closed.len(), 1);
    }

    #[test]
    fn unknown_view_operations_are_noops() {
        let mut engine = FakeEngine::new();
        let ghost = ViewId(99);
        engine.navigate(ghost, "https://example.com/");
        engine.attach(ghost);
        engine.destroy_view(ghost);
        assert!(engine.drain_events().is_empty());
        assert!(engine.ops.is_empty());
    }
}
