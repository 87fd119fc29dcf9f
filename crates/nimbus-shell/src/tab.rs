//! Per-tab record: views, last committed state, split posture.

use nimbus_common::{Side, TabId, ViewId};

/// One open tab. `secondary` doubles as the split flag: a tab is split
/// exactly when it holds a second view, so the two can never disagree.
#[derive(Debug, Clone)]
pub struct Tab {
    pub id: TabId,
    /// Left pane view. Lives as long as the tab does.
    pub primary: ViewId,
    /// Right pane view, present only while split.
    pub secondary: Option<ViewId>,
    /// Last committed primary-pane address.
    pub url: String,
    pub title: String,
    /// Resolved icon address, empty until the first probe answers.
    pub favicon: String,
    pub incognito: bool,
    /// Which pane navigation commands act on.
    pub active_side: Side,
    /// Presentation zoom step, clamped to [-5, 5].
    pub zoom_level: i32,
}

/// Options for opening a tab.
#[derive(Debug, Clone, Copy, Default)]
pub struct TabOptions {
    pub incognito: bool,
}

impl Tab {
    pub fn new(id: TabId, primary: ViewId, url: String, incognito: bool) -> Self {
        Self {
            id,
            primary,
            secondary: None,
            url,
            title: "New Tab".to_string(),
            favicon: String::new(),
            incognito,
            active_side: Side::Left,
            zoom_level: 0,
        }
    }

    pub fn is_split(&self) -> bool {
        self.secondary.is_some()
    }

    /// View that navigation commands currently target.
    pub fn focused_view(&self) -> ViewId {
        match (self.active_side, self.secondary) {
            (Side::Right, Some(view)) => view,
            _ => self.primary,
        }
    }

    /// All views owned by this tab, primary first.
    pub fn views(&self) -> impl Iterator<Item = ViewId> + '_ {
        std::iter::once(self.primary).chain(self.secondary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focused_view_follows_side_only_while_split() {
        let mut tab = Tab::new(TabId(1), ViewId(10), "https://example.com/".into(), false);
        assert_eq!(tab.focused_view(), ViewId(10));

        // Side without a secondary view falls back to primary.
        tab.active_side = Side::Right;
        assert_eq!(tab.focused_view(), ViewId(10));

        tab.secondary = Some(ViewId(11));
        assert_eq!(tab.focused_view(), ViewId(11));

        tab.active_side = Side::Left;
        assert_eq!(tab.focused_view(), ViewId(10));
    }

    #[test]
    fn views_lists_primary_first() {
        let mut tab = Tab::new(TabId(1), ViewId(10), String::new(), false);
        assert_eq!(tab.views().collect::<Vec<_>>(), vec![ViewId(10)]);
        tab.secondary = Some(ViewId(11));
        assert_eq!(tab.views().collect::<Vec<_>>(), vec![ViewId(10), ViewId(11)]);
    }
}
