//! The shell context object and per-tab navigation commands.

use std::collections::HashMap;
use std::time::Instant;

use tokio::sync::broadcast;
use tracing::debug;

use nimbus_common::events::{EventBus, ShellEvent};
use nimbus_common::{TabId, ViewId, WindowSize};
use nimbus_engine::Engine;
use nimbus_persistence::Store;

use crate::config::ShellConfig;
use crate::history::HistoryLog;
use crate::layout::ViewConfig;
use crate::registry::TabRegistry;
use crate::router::ViewBinding;
use crate::settings::Settings;
use crate::tab::Tab;

pub(crate) struct FaviconProbe {
    pub tab: TabId,
    pub due: Instant,
}

/// Single-owner browser core. One instance per window; every mutation goes
/// through `&mut self`, so tab state never needs interior locking.
pub struct BrowserShell<E: Engine> {
    pub(crate) engine: E,
    pub(crate) tabs: TabRegistry,
    /// View ownership records, written at view creation and never inferred
    /// afterwards.
    pub(crate) bindings: HashMap<ViewId, ViewBinding>,
    pub(crate) active: Option<TabId>,
    pub(crate) window_size: WindowSize,
    pub(crate) view_config: ViewConfig,
    /// Tab whose primary view currently covers the whole window.
    pub(crate) fullscreen: Option<TabId>,
    pub(crate) pending_favicons: Vec<FaviconProbe>,
    pub(crate) history: HistoryLog,
    pub(crate) bus: EventBus,
    pub(crate) store: Store,
    pub(crate) config: ShellConfig,
}

impl<E: Engine> BrowserShell<E> {
    pub fn new(engine: E, store: Store, config: ShellConfig, window_size: WindowSize) -> Self {
        let history = HistoryLog::load(&store);
        Self {
            engine,
            tabs: TabRegistry::default(),
            bindings: HashMap::new(),
            active: None,
            window_size,
            view_config: ViewConfig::default(),
            fullscreen: None,
            pending_favicons: Vec::new(),
            history,
            bus: EventBus::new(config.bus_capacity),
            store,
            config,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ShellEvent> {
        self.bus.subscribe()
    }

    pub fn active_tab(&self) -> Option<TabId> {
        self.active
    }

    pub fn tab(&self, id: TabId) -> Option<&Tab> {
        self.tabs.get(id)
    }

    pub fn tab_count(&self) -> usize {
        self.tabs.len()
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn load_settings(&self) -> Settings {
        Settings::load(&self.store)
    }

    pub fn save_settings(&self, settings: &Settings) {
        settings.save(&self.store);
    }

    /// Addresses of the open tabs, in creation order. Incognito tabs are
    /// left out so they never reach disk.
    pub fn session_snapshot(&self) -> Vec<String> {
        self.tabs
            .iter()
            .filter(|tab| !tab.incognito)
            .map(|tab| tab.url.clone())
            .collect()
    }

    pub fn persist_session(&self) {
        self.store.write("session", &self.session_snapshot());
    }

    /// Load `url` into the focused pane of `id`.
    pub fn navigate(&mut self, id: TabId, url: &str) {
        let Some(tab) = self.tabs.get(id) else {
            return;
        };
        let view = tab.focused_view();
        let resolved = self.resolve_address(url);
        debug!(tab = %id, view = %view, url = %resolved, "navigate");
        self.engine.navigate(view, &resolved);
    }

    pub fn go_back(&mut self, id: TabId) {
        if let Some(view) = self.focused_view(id) {
            self.engine.go_back(view);
        }
    }

    pub fn go_forward(&mut self, id: TabId) {
        if let Some(view) = self.focused_view(id) {
            self.engine.go_forward(view);
        }
    }

    pub fn refresh(&mut self, id: TabId) {
        if let Some(view) = self.focused_view(id) {
            self.engine.reload(view);
        }
    }

    /// Cancel the in-flight load in the focused pane.
    pub fn stop_loading(&mut self, id: TabId) {
        if let Some(view) = self.focused_view(id) {
            self.engine.stop(view);
        }
    }

    pub fn find_in_page(&mut self, id: TabId, text: &str) {
        if let Some(view) = self.focused_view(id) {
            self.engine.find_in_page(view, text);
        }
    }

    pub fn stop_find(&mut self, id: TabId) {
        if let Some(view) = self.focused_view(id) {
            self.engine.stop_find(view);
        }
    }

    /// Step the tab's zoom level by `delta`; zero resets. Returns the level
    /// after clamping.
    pub fn set_zoom(&mut self, id: TabId, delta: i32) -> i32 {
        let Some(tab) = self.tabs.get_mut(id) else {
            return 0;
        };
        tab.zoom_level = if delta == 0 {
            0
        } else {
            (tab.zoom_level + delta).clamp(-5, 5)
        };
        let level = tab.zoom_level;
        let view = tab.primary;
        self.engine.set_zoom(view, 1.2f64.powi(level));
        level
    }

    fn focused_view(&self, id: TabId) -> Option<ViewId> {
        self.tabs.get(id).map(Tab::focused_view)
    }
}
