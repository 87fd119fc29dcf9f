//! Tab registry and tab lifecycle operations.

use serde::Serialize;
use tracing::{info, warn};

use nimbus_common::events::ShellEvent;
use nimbus_common::{Side, TabId};
use nimbus_engine::content::{self, NEW_TAB_URL};
use nimbus_engine::{Engine, ViewOptions};

use crate::router::ViewBinding;
use crate::shell::BrowserShell;
use crate::tab::{Tab, TabOptions};

/// Ordered tab table. Ids are handed out monotonically and never reused,
/// so the greatest key is always the most recently opened tab.
#[derive(Debug, Default)]
pub struct TabRegistry {
    tabs: std::collections::BTreeMap<TabId, Tab>,
    next_id: u64,
}

impl TabRegistry {
    pub fn allocate(&mut self) -> TabId {
        self.next_id += 1;
        TabId(self.next_id)
    }

    pub fn insert(&mut self, tab: Tab) {
        self.tabs.insert(tab.id, tab);
    }

    pub fn remove(&mut self, id: TabId) -> Option<Tab> {
        self.tabs.remove(&id)
    }

    pub fn get(&self, id: TabId) -> Option<&Tab> {
        self.tabs.get(&id)
    }

    pub fn get_mut(&mut self, id: TabId) -> Option<&mut Tab> {
        self.tabs.get_mut(&id)
    }

    pub fn contains(&self, id: TabId) -> bool {
        self.tabs.contains_key(&id)
    }

    /// Most recently opened tab still in the registry.
    pub fn last_inserted(&self) -> Option<TabId> {
        self.tabs.keys().next_back().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    /// Tabs in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Tab> {
        self.tabs.values()
    }
}

/// What the presentation layer needs after a close that promoted another
/// tab. `None` is returned when the closed tab was not active, or when it
/// was the last one.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CloseOutcome {
    pub new_active_tab_id: TabId,
    pub can_go_back: bool,
    pub can_go_forward: bool,
}

impl<E: Engine> BrowserShell<E> {
    /// Open a tab, make it active, and start loading `url`. The router
    /// binding is registered before activation so no early engine event is
    /// dropped.
    pub fn create_tab(&mut self, url: &str, options: TabOptions) -> nimbus_common::Result<TabId> {
        let id = self.tabs.allocate();
        let view = self
            .engine
            .create_view(ViewOptions::incognito(options.incognito))?;
        self.bindings.insert(
            view,
            ViewBinding {
                tab: id,
                side: Side::Left,
            },
        );

        let resolved = self.resolve_address(url);
        self.tabs
            .insert(Tab::new(id, view, resolved.clone(), options.incognito));
        self.activate(id);
        self.engine.navigate(view, &resolved);
        info!(tab = %id, url = %resolved, incognito = options.incognito, "tab created");
        Ok(id)
    }

    /// Close a tab and tear down its views. Unknown ids are a silent no-op.
    /// Closing the active tab promotes the most recently opened survivor;
    /// closing the last tab requests shutdown instead.
    pub fn close_tab(&mut self, id: TabId) -> Option<CloseOutcome> {
        let tab = self.tabs.remove(id)?;
        if self.fullscreen == Some(id) {
            self.fullscreen = None;
        }
        self.pending_favicons.retain(|probe| probe.tab != id);
        for view in tab.views() {
            self.bindings.remove(&view);
            self.engine.detach(view);
            self.engine.destroy_view(view);
        }
        info!(tab = %id, "tab closed");

        if self.tabs.is_empty() {
            self.active = None;
            self.persist_session();
            self.bus.publish(ShellEvent::ShutdownRequested);
            return None;
        }

        if self.active != Some(id) {
            return None;
        }

        let promoted = self.tabs.last_inserted()?;
        self.activate(promoted);
        let primary = self.tabs.get(promoted)?.primary;
        Some(CloseOutcome {
            new_active_tab_id: promoted,
            can_go_back: self.engine.can_go_back(primary),
            can_go_forward: self.engine.can_go_forward(primary),
        })
    }

    /// Bring a tab to the front and describe it to the presentation layer.
    pub fn switch_tab(&mut self, id: TabId) {
        let Some(tab) = self.tabs.get(id) else {
            return;
        };
        let url = tab.url.clone();
        let title = tab.title.clone();
        let favicon = tab.favicon.clone();
        let incognito = tab.incognito;
        let primary = tab.primary;

        self.activate(id);
        let event = ShellEvent::TabSwitched {
            tab_id: id,
            url,
            title,
            favicon,
            incognito,
            can_go_back: self.engine.can_go_back(primary),
            can_go_forward: self.engine.can_go_forward(primary),
        };
        self.bus.publish(event);
    }

    /// Map user input to a loadable address. Bundled pages keep their
    /// virtual address; anything unparseable lands on the new-tab page.
    pub(crate) fn resolve_address(&self, url: &str) -> String {
        if url.is_empty() {
            return self.config.homepage.clone();
        }
        if content::is_virtual(url) {
            return match content::virtual_page(url) {
                Some(_) => url.to_string(),
                None => {
                    warn!(url, "unknown virtual address, opening new-tab page");
                    NEW_TAB_URL.to_string()
                }
            };
        }
        match url::Url::parse(url) {
            Ok(_) => url.to_string(),
            Err(_) => {
                warn!(url, "unparseable address, opening new-tab page");
                NEW_TAB_URL.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nimbus_common::ViewId;

    #[test]
    fn ids_are_monotonic_and_never_reused() {
        let mut registry = TabRegistry::default();
        let a = registry.allocate();
        let b = registry.allocate();
        assert!(b > a);

        registry.insert(Tab::new(b, ViewId(1), String::new(), false));
        registry.remove(b);
        let c = registry.allocate();
        assert!(c > b);
    }

    #[test]
    fn last_inserted_tracks_greatest_id() {
        let mut registry = TabRegistry::default();
        assert_eq!(registry.last_inserted(), None);

        let a = registry.allocate();
        let b = registry.allocate();
        registry.insert(Tab::new(a, ViewId(1), String::new(), false));
        registry.insert(Tab::new(b, ViewId(2), String::new(), false));
        assert_eq!(registry.last_inserted(), Some(b));

        registry.remove(b);
        assert_eq!(registry.last_inserted(), Some(a));
    }
}
