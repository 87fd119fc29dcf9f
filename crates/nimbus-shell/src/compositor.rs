//! Compositor: which views are attached to the window and where they sit.

use tracing::debug;

use nimbus_common::events::ShellEvent;
use nimbus_common::{TabId, ViewId, WindowSize};
use nimbus_engine::Engine;

use crate::layout::{LayoutEngine, ViewConfig};
use crate::shell::BrowserShell;

impl<E: Engine> BrowserShell<E> {
    /// Make `id` the displayed tab. Activation is atomic with respect to
    /// the display stack: every view is detached first, then the target
    /// tab's views attach, then geometry is applied. No interleaving with
    /// other mutations can observe two tabs attached at once.
    pub(crate) fn activate(&mut self, id: TabId) {
        if !self.tabs.contains(id) {
            return;
        }
        let all_views: Vec<ViewId> = self.tabs.iter().flat_map(|tab| tab.views()).collect();
        for view in all_views {
            self.engine.detach(view);
        }

        self.active = Some(id);
        let Some(tab) = self.tabs.get(id) else {
            return;
        };
        let primary = tab.primary;
        let secondary = tab.secondary;
        self.engine.attach(primary);
        if let Some(view) = secondary {
            self.engine.attach(view);
        }
        debug!(tab = %id, split = secondary.is_some(), "tab activated");
        self.relayout();
    }

    /// Recompute and apply geometry for the active tab's views.
    pub(crate) fn relayout(&mut self) {
        let Some(active) = self.active else {
            return;
        };
        let Some(tab) = self.tabs.get(active) else {
            return;
        };
        let primary = tab.primary;
        let secondary = tab.secondary;

        if self.fullscreen == Some(active) {
            let full = LayoutEngine::fullscreen(self.window_size);
            self.engine.set_bounds(primary, full);
            return;
        }

        let layout = LayoutEngine::compute(self.window_size, &self.view_config, secondary.is_some());
        self.engine.set_bounds(primary, layout.primary);
        if let (Some(view), Some(bounds)) = (secondary, layout.secondary) {
            self.engine.set_bounds(view, bounds);
        }
    }

    pub fn handle_resize(&mut self, size: WindowSize) {
        self.window_size = size;
        self.relayout();
    }

    /// Replace the chrome geometry wholesale and re-place the active views.
    pub fn update_view_bounds(&mut self, config: ViewConfig) {
        self.view_config = config;
        self.relayout();
    }

    /// Fullscreen only exists for the displayed tab; a background page
    /// entering fullscreen must not leave state behind that would be
    /// re-applied on a later activation.
    pub(crate) fn enter_fullscreen(&mut self, id: TabId) {
        if self.active != Some(id) {
            return;
        }
        self.fullscreen = Some(id);
        self.relayout();
        self.bus.publish(ShellEvent::FullscreenEntered { tab_id: id });
    }

    /// Exit is scoped to the tab that owns the fullscreen state; exits
    /// reported by any other tab's views are ignored.
    pub(crate) fn exit_fullscreen(&mut self, id: TabId) {
        if self.fullscreen != Some(id) {
            return;
        }
        self.fullscreen = None;
        self.relayout();
        self.bus.publish(ShellEvent::FullscreenExited { tab_id: id });
    }
}
