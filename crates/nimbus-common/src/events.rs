//! Shell → presentation event channel.
//!
//! Events are at-most-once per occurrence and delivered best-effort: the
//! bus is a broadcast ring, and a consumer that falls behind loses the
//! oldest events rather than stalling the core.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::id::TabId;
use crate::types::{ContextMenuParams, Side};

/// Terminal state of a download.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DownloadState {
    Completed,
    /// The user dismissed the save prompt. A cancellation, not an error.
    Cancelled,
    Interrupted,
}

/// Events streamed from the core to the presentation layer. Serialized
/// with the channel names and payload shapes the UI consumes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "kebab-case")]
#[serde(rename_all_fields = "camelCase")]
pub enum ShellEvent {
    TabUrlChanged {
        tab_id: TabId,
        url: String,
        side: Side,
    },
    TabLoadState {
        tab_id: TabId,
        is_loading: bool,
        side: Side,
    },
    TabLoadFailed {
        tab_id: TabId,
        side: Side,
        description: String,
    },
    TabNavButtons {
        tab_id: TabId,
        can_go_back: bool,
        can_go_forward: bool,
    },
    TabFaviconChanged {
        tab_id: TabId,
        favicon: String,
    },
    TabTitleChanged {
        tab_id: TabId,
        title: String,
    },
    TabSwitched {
        tab_id: TabId,
        url: String,
        title: String,
        favicon: String,
        incognito: bool,
        can_go_back: bool,
        can_go_forward: bool,
    },
    TabCreatedFromMain {
        tab_id: TabId,
        url: String,
    },
    FullscreenEntered {
        tab_id: TabId,
    },
    FullscreenExited {
        tab_id: TabId,
    },
    FoundInPage {
        tab_id: TabId,
        matches: u32,
        active_match: u32,
    },
    ContextMenu {
        tab_id: TabId,
        side: Side,
        params: ContextMenuParams,
    },
    ToggleSplitFocus,
    DownloadStarted {
        id: String,
        filename: String,
        url: String,
    },
    DownloadFinished {
        id: String,
        state: DownloadState,
        save_path: Option<String>,
    },
    /// The last tab was closed; the owning window should shut down.
    ShutdownRequested,
}

pub struct EventBus {
    sender: broadcast::Sender<ShellEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ShellEvent> {
        self.sender.subscribe()
    }

    /// Publish an event. Returns the number of receivers it reached;
    /// zero subscribers is not an error.
    pub fn publish(&self, event: ShellEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn publish_and_receive() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();

        bus.publish(ShellEvent::ToggleSplitFocus);

        let event = rx.recv().await.unwrap();
        assert!(matches!(event, ShellEvent::ToggleSplitFocus));
    }

    #[tokio::test]
    async fn multiple_subscribers_see_every_event() {
        let bus = EventBus::new(16);
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.publish(ShellEvent::ShutdownRequested);

        assert!(matches!(
            rx1.recv().await.unwrap(),
            ShellEvent::ShutdownRequested
        ));
        assert!(matches!(
            rx2.recv().await.unwrap(),
            ShellEvent::ShutdownRequested
        ));
    }

    #[test]
    fn publish_without_subscribers_returns_zero() {
        let bus = EventBus::new(16);
        assert_eq!(bus.publish(ShellEvent::ToggleSplitFocus), 0);
    }

    #[test]
    fn url_changed_wire_format() {
        let event = ShellEvent::TabUrlChanged {
            tab_id: TabId(3),
            url: "https://example.com/".into(),
            side: Side::Right,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "tab-url-changed");
        assert_eq!(json["data"]["tabId"], 3);
        assert_eq!(json["data"]["side"], "right");
    }

    #[test]
    fn nav_buttons_wire_format() {
        let event = ShellEvent::TabNavButtons {
            tab_id: TabId(1),
            can_go_back: true,
            can_go_forward: false,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "tab-nav-buttons");
        assert_eq!(json["data"]["canGoBack"], true);
        assert_eq!(json["data"]["canGoForward"], false);
    }

    #[test]
    fn download_state_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&DownloadState::Cancelled).unwrap(),
            "\"cancelled\""
        );
    }
}
