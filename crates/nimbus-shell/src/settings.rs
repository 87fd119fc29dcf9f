//! User settings blob. One record in the store, read and replaced whole.

use serde::{Deserialize, Serialize};

use nimbus_engine::content::NEW_TAB_URL;
use nimbus_persistence::Store;

const SETTINGS_KEY: &str = "settings";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub search_engine: String,
    pub homepage: String,
    pub show_bookmarks_bar: bool,
    pub animations: bool,
    pub glass_tint: bool,
    /// Enables the request filter's ad-host list.
    pub ad_block: bool,
    /// `"newtab"` or `"restore"`.
    pub startup_behavior: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            search_engine: "google".to_string(),
            homepage: NEW_TAB_URL.to_string(),
            show_bookmarks_bar: true,
            animations: true,
            glass_tint: true,
            ad_block: false,
            startup_behavior: "newtab".to_string(),
        }
    }
}

impl Settings {
    pub fn load(store: &Store) -> Self {
        store.read(SETTINGS_KEY, Self::default())
    }

    pub fn save(&self, store: &Store) {
        store.write(SETTINGS_KEY, self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let s = Settings::default();
        assert_eq!(s.homepage, "nimbus://newtab");
        assert!(!s.ad_block);
        assert_eq!(s.startup_behavior, "newtab");
    }

    #[test]
    fn roundtrip_through_store() {
        let store = Store::memory();
        let mut s = Settings::default();
        s.ad_block = true;
        s.search_engine = "duckduckgo".to_string();
        s.save(&store);

        let loaded = Settings::load(&store);
        assert_eq!(loaded, s);
    }

    #[test]
    fn missing_record_yields_defaults() {
        let store = Store::memory();
        assert_eq!(Settings::load(&store), Settings::default());
    }

    #[test]
    fn partial_record_fills_missing_fields() {
        let store = Store::memory();
        store.write(SETTINGS_KEY, &serde_json::json!({ "adBlock": true }));
        let loaded = Settings::load(&store);
        assert!(loaded.ad_block);
        assert_eq!(loaded.homepage, "nimbus://newtab");
    }
}
