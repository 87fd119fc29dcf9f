use serde::{Deserialize, Serialize};
use std::fmt;

/// Handle to a tab. Allocated from a monotonically increasing counter and
/// never reused, so ordering by id is ordering by insertion.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct TabId(pub u64);

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tab-{}", self.0)
    }
}

/// Handle to an engine-owned rendering surface. One view loads one address
/// at a time; a split tab owns two.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct ViewId(pub u64);

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "view-{}", self.0)
    }
}

/// Short hex correlation id, used for download tickets.
pub fn short_id() -> String {
    let uuid = uuid::Uuid::new_v4();
    let bytes = uuid.as_bytes();
    format!(
        "{:02x}{:02x}{:02x}{:02x}",
        bytes[0], bytes[1], bytes[2], bytes[3]
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tab_id_display() {
        assert_eq!(TabId(3).to_string(), "tab-3");
        assert_eq!(ViewId(7).to_string(), "view-7");
    }

    #[test]
    fn tab_id_ordering_tracks_allocation_order() {
        assert!(TabId(1) < TabId(2));
        assert!(TabId(41) < TabId(42));
    }

    #[test]
    fn short_id_is_hex_and_unique() {
        let a = short_id();
        let b = short_id();
        assert_eq!(a.len(), 8);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }

    #[test]
    fn ids_serialize_as_numbers() {
        assert_eq!(serde_json::to_string(&TabId(5)).unwrap(), "5");
        let back: TabId = serde_json::from_str("5").unwrap();
        assert_eq!(back, TabId(5));
    }
}
