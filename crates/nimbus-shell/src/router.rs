//! Event router: engine events in, tab state updates and shell events out.
//!
//! Views are matched to tabs through the binding table written at view
//! creation. An event whose view has no binding, or whose tab has since
//! closed, is dropped without effect; the race between a user closing a
//! tab and the page still loading is resolved here, not in the engine.

use std::time::Instant;

use tracing::{debug, warn};

use nimbus_common::events::ShellEvent;
use nimbus_common::types::ContextMenuParams;
use nimbus_common::{Side, TabId};
use nimbus_engine::{Engine, ViewEvent};

use crate::shell::{BrowserShell, FaviconProbe};
use crate::tab::TabOptions;

/// Which tab and pane a view belongs to. Recorded when the view is
/// created, never inferred from engine state afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewBinding {
    pub tab: TabId,
    pub side: Side,
}

impl<E: Engine> BrowserShell<E> {
    /// Drain the engine and process everything that happened since the
    /// last call, then fire any favicon probes that have come due. `now`
    /// is injected so tests control time.
    pub fn pump(&mut self, now: Instant) {
        for event in self.engine.drain_events() {
            self.handle_view_event(event, now);
        }
        self.poll_favicons(now);
    }

    fn handle_view_event(&mut self, event: ViewEvent, now: Instant) {
        let view = event.view();
        let Some(binding) = self.bindings.get(&view).copied() else {
            debug!(%view, "event from unbound view dropped");
            return;
        };
        let ViewBinding { tab: tab_id, side } = binding;
        if !self.tabs.contains(tab_id) {
            debug!(%view, tab = %tab_id, "event for closed tab dropped");
            return;
        }

        match event {
            ViewEvent::NavigationCommitted { url, .. } => {
                self.on_navigation(tab_id, side, url, true);
            }
            ViewEvent::InPageNavigation { url, .. } => {
                self.on_navigation(tab_id, side, url, false);
            }
            ViewEvent::LoadStarted { .. } => {
                self.bus.publish(ShellEvent::TabLoadState {
                    tab_id,
                    is_loading: true,
                    side,
                });
            }
            ViewEvent::LoadFinished { .. } => {
                self.bus.publish(ShellEvent::TabLoadState {
                    tab_id,
                    is_loading: false,
                    side,
                });
                self.emit_nav_buttons(tab_id);
                if side == Side::Left {
                    self.schedule_favicon(tab_id, now + self.config.favicon_settle);
                }
            }
            ViewEvent::LoadFailed { description, .. } => {
                warn!(tab = %tab_id, %side, description, "load failed");
                self.bus.publish(ShellEvent::TabLoadState {
                    tab_id,
                    is_loading: false,
                    side,
                });
                self.bus.publish(ShellEvent::TabLoadFailed {
                    tab_id,
                    side,
                    description,
                });
            }
            ViewEvent::TitleChanged { title, .. } => {
                if side == Side::Left {
                    if let Some(tab) = self.tabs.get_mut(tab_id) {
                        tab.title = title.clone();
                    }
                }
                self.bus
                    .publish(ShellEvent::TabTitleChanged { tab_id, title });
            }
            ViewEvent::NewWindowRequested { url, .. } => {
                self.on_new_window(url);
            }
            ViewEvent::ContextMenuRequested { params, .. } => {
                self.on_context_menu(tab_id, side, params);
            }
            // Fullscreen is a primary-pane concern; the chrome bypass
            // expands the primary view only.
            ViewEvent::FullscreenEntered { .. } => {
                if side == Side::Left {
                    self.enter_fullscreen(tab_id);
                }
            }
            ViewEvent::FullscreenExited { .. } => {
                if side == Side::Left {
                    self.exit_fullscreen(tab_id);
                }
            }
            ViewEvent::SplitFocusShortcut { .. } => {
                self.bus.publish(ShellEvent::ToggleSplitFocus);
            }
            ViewEvent::FoundInPage {
                matches,
                active_match,
                ..
            } => {
                // Results from a background tab would clobber the find bar.
                if self.active == Some(tab_id) {
                    self.bus.publish(ShellEvent::FoundInPage {
                        tab_id,
                        matches,
                        active_match,
                    });
                }
            }
            ViewEvent::FaviconResolved { icon_url, .. } => {
                self.apply_favicon(tab_id, icon_url);
            }
            ViewEvent::Closed { .. } => {
                debug!(%view, "view closed");
            }
        }
    }

    fn on_navigation(&mut self, tab_id: TabId, side: Side, url: String, committed: bool) {
        if side == Side::Left {
            if let Some(tab) = self.tabs.get_mut(tab_id) {
                tab.url = url.clone();
            }
        }
        self.bus.publish(ShellEvent::TabUrlChanged {
            tab_id,
            url,
            side,
        });
        self.emit_nav_buttons(tab_id);
        if committed && side == Side::Left {
            self.record_history(tab_id);
        }
    }

    /// Pop-up requests are denied in the engine; the answer is a sibling
    /// tab at the requested address.
    fn on_new_window(&mut self, url: String) {
        match self.create_tab(&url, TabOptions::default()) {
            Ok(created) => {
                self.bus.publish(ShellEvent::TabCreatedFromMain {
                    tab_id: created,
                    url,
                });
            }
            Err(error) => warn!(url, %error, "could not open tab for new-window request"),
        }
    }

    fn on_context_menu(&mut self, tab_id: TabId, side: Side, params: ContextMenuParams) {
        self.bus.publish(ShellEvent::ContextMenu {
            tab_id,
            side,
            params,
        });
    }

    fn emit_nav_buttons(&mut self, tab_id: TabId) {
        let Some(tab) = self.tabs.get(tab_id) else {
            return;
        };
        let primary = tab.primary;
        self.bus.publish(ShellEvent::TabNavButtons {
            tab_id,
            can_go_back: self.engine.can_go_back(primary),
            can_go_forward: self.engine.can_go_forward(primary),
        });
    }

    fn schedule_favicon(&mut self, tab: TabId, due: Instant) {
        if let Some(probe) = self.pending_favicons.iter_mut().find(|p| p.tab == tab) {
            probe.due = due;
        } else {
            self.pending_favicons.push(FaviconProbe { tab, due });
        }
    }

    fn poll_favicons(&mut self, now: Instant) {
        if self.pending_favicons.is_empty() {
            return;
        }
        let due: Vec<TabId> = self
            .pending_favicons
            .iter()
            .filter(|probe| probe.due <= now)
            .map(|probe| probe.tab)
            .collect();
        self.pending_favicons.retain(|probe| probe.due > now);
        for tab_id in due {
            if let Some(tab) = self.tabs.get(tab_id) {
                let view = tab.primary;
                self.engine.request_favicon(view);
            }
        }
    }

    /// Record what the page reported, or fall back to the conventional
    /// icon path for http(s) origins. An empty favicon is still reported
    /// so the UI can clear a stale icon.
    fn apply_favicon(&mut self, tab_id: TabId, icon_url: Option<String>) {
        let Some(tab) = self.tabs.get_mut(tab_id) else {
            return;
        };
        let favicon = icon_url
            .or_else(|| conventional_favicon(&tab.url))
            .unwrap_or_default();
        tab.favicon = favicon.clone();
        self.bus
            .publish(ShellEvent::TabFaviconChanged { tab_id, favicon });
    }
}

fn conventional_favicon(page_url: &str) -> Option<String> {
    let parsed = url::Url::parse(page_url).ok()?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return None;
    }
    Some(format!(
        "{}/favicon.ico",
        parsed.origin().ascii_serialization()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conventional_favicon_only_for_http_origins() {
        assert_eq!(
            conventional_favicon("https://example.com/a/b"),
            Some("https://example.com/favicon.ico".to_string())
        );
        assert_eq!(
            conventional_favicon("http://example.com:8080/"),
            Some("http://example.com:8080/favicon.ico".to_string())
        );
        assert_eq!(conventional_favicon("nimbus://newtab"), None);
        assert_eq!(conventional_favicon("file:///tmp/x.html"), None);
        assert_eq!(conventional_favicon("not a url"), None);
    }
}
