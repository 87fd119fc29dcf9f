//! Events reported by the engine, tagged with the view that produced them.
//!
//! The shell's router maps views back to tabs and sides; the engine knows
//! nothing about tabs.

use nimbus_common::types::ContextMenuParams;
use nimbus_common::ViewId;

#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    /// A top-level navigation committed. Carries the new URL.
    NavigationCommitted { view: ViewId, url: String },
    /// Same-document navigation (fragment / history.pushState).
    InPageNavigation { view: ViewId, url: String },
    LoadStarted { view: ViewId },
    LoadFinished { view: ViewId },
    LoadFailed { view: ViewId, description: String },
    TitleChanged { view: ViewId, title: String },
    /// The page asked to open a new top-level destination. The engine has
    /// already denied it in place; the shell decides what to do instead.
    NewWindowRequested { view: ViewId, url: String },
    ContextMenuRequested {
        view: ViewId,
        params: ContextMenuParams,
    },
    FullscreenEntered { view: ViewId },
    FullscreenExited { view: ViewId },
    /// A reserved shortcut was intercepted inside the page (split-focus
    /// toggle).
    SplitFocusShortcut { view: ViewId },
    FoundInPage {
        view: ViewId,
        matches: u32,
        active_match: u32,
    },
    /// Answer to [`crate::Engine::request_favicon`]. `icon_url` is `None`
    /// when the document reports no icon link or the query failed.
    FaviconResolved {
        view: ViewId,
        icon_url: Option<String>,
    },
    /// The view was destroyed.
    Closed { view: ViewId },
}

impl ViewEvent {
    /// The view this event belongs to.
    pub fn view(&self) -> ViewId {
        match self {
            ViewEvent::NavigationCommitted { view, .. }
            | ViewEvent::InPageNavigation { view, .. }
            | ViewEvent::LoadStarted { view }
            | ViewEvent::LoadFinished { view }
            | ViewEvent::LoadFailed { view, .. }
            | ViewEvent::TitleChanged { view, .. }
            | ViewEvent::NewWindowRequested { view, .. }
            | ViewEvent::ContextMenuRequested { view, .. }
            | ViewEvent::FullscreenEntered { view }
            | ViewEvent::FullscreenExited { view }
            | ViewEvent::SplitFocusShortcut { view }
            | ViewEvent::FoundInPage { view, .. }
            | ViewEvent::FaviconResolved { view, .. }
            | ViewEvent::Closed { view } => *view,
        }
    }
}
