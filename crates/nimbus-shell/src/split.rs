//! Split-view control: one optional secondary pane per tab.

use tracing::{info, warn};

use nimbus_common::{Side, TabId};
use nimbus_engine::{Engine, ViewOptions};

use crate::router::ViewBinding;
use crate::shell::BrowserShell;

impl<E: Engine> BrowserShell<E> {
    /// Toggle the secondary pane of `id`. Returns whether the tab is split
    /// after the call; unknown ids report `false`.
    ///
    /// Opening attaches the new view only when the tab is currently
    /// displayed, tags it `Right` for the router, and starts loading the
    /// configured split address. Closing destroys the view and returns
    /// focus to the primary pane.
    pub fn toggle_split(&mut self, id: TabId) -> bool {
        let Some(tab) = self.tabs.get(id) else {
            return false;
        };

        if let Some(secondary) = tab.secondary {
            self.bindings.remove(&secondary);
            self.engine.detach(secondary);
            self.engine.destroy_view(secondary);
            if let Some(tab) = self.tabs.get_mut(id) {
                tab.secondary = None;
                tab.active_side = Side::Left;
            }
            self.relayout();
            info!(tab = %id, "split closed");
            return false;
        }

        let incognito = tab.incognito;
        let view = match self.engine.create_view(ViewOptions::incognito(incognito)) {
            Ok(view) => view,
            Err(error) => {
                warn!(tab = %id, %error, "secondary view creation failed");
                return false;
            }
        };
        self.bindings.insert(
            view,
            ViewBinding {
                tab: id,
                side: Side::Right,
            },
        );
        if let Some(tab) = self.tabs.get_mut(id) {
            tab.secondary = Some(view);
            tab.active_side = Side::Right;
        }
        if self.active == Some(id) {
            self.engine.attach(view);
        }
        self.relayout();
        let url = self.config.split_default_url.clone();
        self.engine.navigate(view, &url);
        info!(tab = %id, view = %view, "split opened");
        true
    }

    /// Point navigation commands at one pane of a split tab. Selecting a
    /// side on an unsplit tab leaves focus on the primary view.
    pub fn set_focus_side(&mut self, id: TabId, side: Side) {
        if let Some(tab) = self.tabs.get_mut(id) {
            tab.active_side = side;
        }
    }
}
