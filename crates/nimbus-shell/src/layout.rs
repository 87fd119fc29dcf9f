//! Pure geometry: window size + chrome offsets in, view rectangles out.
//!
//! The layout functions hold no state and touch no engine handles, so every
//! placement decision is unit-testable without a window.

use serde::{Deserialize, Serialize};

use nimbus_common::{Bounds, WindowSize};

/// Default height of the chrome strip reserved above the content area.
pub const TOOLBAR_HEIGHT: u32 = 78;

/// Width of the visual seam between the two panes of a split tab.
const SPLIT_GUTTER: u32 = 1;

/// Chrome geometry reported by the presentation layer. Replaced wholesale
/// on every update; fields never merge with the previous value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewConfig {
    pub toolbar_height: u32,
    pub top_offset: u32,
    pub left_offset: u32,
    pub right_offset: u32,
    /// When set, every view collapses to zero size (modal overlay open).
    pub hidden: bool,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            toolbar_height: TOOLBAR_HEIGHT,
            top_offset: 0,
            left_offset: 0,
            right_offset: 0,
            hidden: false,
        }
    }
}

/// Rectangles for the views of the active tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewLayout {
    pub primary: Bounds,
    pub secondary: Option<Bounds>,
}

pub struct LayoutEngine;

impl LayoutEngine {
    /// Compute where the active tab's views go. Pure: same inputs, same
    /// rectangles.
    pub fn compute(window: WindowSize, config: &ViewConfig, is_split: bool) -> ViewLayout {
        let top = config.toolbar_height + config.top_offset;

        if config.hidden {
            let collapsed = Bounds::collapsed_at(top as i32);
            return ViewLayout {
                primary: collapsed,
                secondary: is_split.then_some(collapsed),
            };
        }

        let usable_width = window
            .width
            .saturating_sub(config.left_offset + config.right_offset);
        let usable_height = window.height.saturating_sub(top);
        let x = config.left_offset as i32;
        let y = top as i32;

        if !is_split {
            return ViewLayout {
                primary: Bounds::new(x, y, usable_width, usable_height),
                secondary: None,
            };
        }

        let left_width = (usable_width / 2).saturating_sub(SPLIT_GUTTER);
        let right_width = usable_width.saturating_sub(left_width + SPLIT_GUTTER);
        ViewLayout {
            primary: Bounds::new(x, y, left_width, usable_height),
            secondary: Some(Bounds::new(
                x + left_width as i32 + SPLIT_GUTTER as i32,
                y,
                right_width,
                usable_height,
            )),
        }
    }

    /// Whole-window rectangle for HTML fullscreen, chrome bypassed.
    pub fn fullscreen(window: WindowSize) -> Bounds {
        Bounds::new(0, 0, window.width, window.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: WindowSize = WindowSize {
        width: 1280,
        height: 800,
    };

    #[test]
    fn unsplit_fills_area_below_toolbar() {
        let layout = LayoutEngine::compute(WINDOW, &ViewConfig::default(), false);
        assert_eq!(layout.primary, Bounds::new(0, 78, 1280, 722));
        assert!(layout.secondary.is_none());
    }

    #[test]
    fn compute_is_pure() {
        let config = ViewConfig {
            left_offset: 12,
            right_offset: 4,
            ..ViewConfig::default()
        };
        let a = LayoutEngine::compute(WINDOW, &config, true);
        let b = LayoutEngine::compute(WINDOW, &config, true);
        assert_eq!(a, b);
    }

    #[test]
    fn split_panes_cover_usable_width_minus_gutter() {
        for width in [100u32, 101, 1280, 1281, 333] {
            let window = WindowSize::new(width, 800);
            let layout = LayoutEngine::compute(window, &ViewConfig::default(), true);
            let secondary = layout.secondary.unwrap();
            assert_eq!(
                layout.primary.width + secondary.width + 1,
                width,
                "width {width}"
            );
            assert_eq!(
                secondary.x,
                layout.primary.x + layout.primary.width as i32 + 1
            );
            assert_eq!(layout.primary.height, secondary.height);
            assert_eq!(layout.primary.y, secondary.y);
        }
    }

    #[test]
    fn offsets_shift_and_shrink() {
        let config = ViewConfig {
            toolbar_height: 78,
            top_offset: 10,
            left_offset: 20,
            right_offset: 30,
            hidden: false,
        };
        let layout = LayoutEngine::compute(WINDOW, &config, false);
        assert_eq!(layout.primary, Bounds::new(20, 88, 1230, 712));
    }

    #[test]
    fn hidden_collapses_every_view() {
        let config = ViewConfig {
            hidden: true,
            ..ViewConfig::default()
        };
        let layout = LayoutEngine::compute(WINDOW, &config, true);
        assert!(layout.primary.is_zero_area());
        assert!(layout.secondary.unwrap().is_zero_area());
        assert_eq!(layout.primary.y, 78);
    }

    #[test]
    fn tiny_window_saturates_instead_of_underflowing() {
        let layout = LayoutEngine::compute(WindowSize::new(10, 10), &ViewConfig::default(), true);
        assert_eq!(layout.primary.width, 4);
        assert_eq!(layout.primary.height, 0);
        let secondary = layout.secondary.unwrap();
        assert_eq!(secondary.width, 5);
    }

    #[test]
    fn fullscreen_ignores_chrome() {
        assert_eq!(LayoutEngine::fullscreen(WINDOW), Bounds::new(0, 0, 1280, 800));
    }
}
