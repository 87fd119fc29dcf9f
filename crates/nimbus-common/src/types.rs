use serde::{Deserialize, Serialize};
use std::fmt;

/// Pixel rectangle assigned to a view within the window.
/// Derived on demand by the layout engine, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Bounds {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Zero-size bounds anchored at a vertical offset. Used when the whole
    /// content area must be suppressed (modal overlay open).
    pub fn collapsed_at(y: i32) -> Self {
        Self::new(0, y, 0, 0)
    }

    pub fn is_zero_area(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Inner size of the host window, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSize {
    pub width: u32,
    pub height: u32,
}

impl WindowSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Which half of a split tab a view occupies. Non-split tabs only have a
/// `Left` (primary) view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl Default for Side {
    fn default() -> Self {
        Side::Left
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => write!(f, "left"),
            Side::Right => write!(f, "right"),
        }
    }
}

/// What the page reported when a context menu was requested. Rendering the
/// menu itself is the presentation layer's job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextMenuParams {
    pub x: i32,
    pub y: i32,
    #[serde(default)]
    pub link_url: Option<String>,
    #[serde(default)]
    pub selection_text: Option<String>,
    #[serde(default)]
    pub is_editable: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_collapsed_is_zero_area() {
        let b = Bounds::collapsed_at(78);
        assert!(b.is_zero_area());
        assert_eq!(b.y, 78);
        assert_eq!(b.x, 0);
    }

    #[test]
    fn bounds_serialization() {
        let b = Bounds::new(10, 78, 1260, 722);
        let json = serde_json::to_string(&b).unwrap();
        let back: Bounds = serde_json::from_str(&json).unwrap();
        assert_eq!(b, back);
    }

    #[test]
    fn side_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Side::Left).unwrap(), "\"left\"");
        assert_eq!(serde_json::to_string(&Side::Right).unwrap(), "\"right\"");
    }

    #[test]
    fn side_default_is_left() {
        assert_eq!(Side::default(), Side::Left);
    }

    #[test]
    fn context_menu_params_optional_fields() {
        let json = r#"{"x":4,"y":9}"#;
        let p: ContextMenuParams = serde_json::from_str(json).unwrap();
        assert_eq!(p.x, 4);
        assert!(p.link_url.is_none());
        assert!(!p.is_editable);
    }
}
