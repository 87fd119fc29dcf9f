//! Visit history: bounded, newest first, written through to the store.

use std::collections::VecDeque;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use nimbus_common::TabId;
use nimbus_engine::content;
use nimbus_engine::Engine;
use nimbus_persistence::Store;

use crate::shell::BrowserShell;

/// Retained visit count. Older entries fall off the back.
pub const HISTORY_CAP: usize = 2000;

const HISTORY_KEY: &str = "history";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub url: String,
    pub title: String,
    /// Unix milliseconds of the visit.
    pub timestamp: i64,
}

/// In-memory visit log, newest entry at the front.
#[derive(Debug, Default)]
pub struct HistoryLog {
    entries: VecDeque<HistoryEntry>,
}

impl HistoryLog {
    pub fn load(store: &Store) -> Self {
        let mut entries: VecDeque<HistoryEntry> = store.read(HISTORY_KEY, VecDeque::new());
        entries.truncate(HISTORY_CAP);
        Self { entries }
    }

    pub fn record(&mut self, entry: HistoryEntry) {
        self.entries.push_front(entry);
        self.entries.truncate(HISTORY_CAP);
    }

    pub fn save(&self, store: &Store) {
        store.write(HISTORY_KEY, &self.entries);
    }

    /// Entries, most recent visit first.
    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn newest(&self) -> Option<&HistoryEntry> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Addresses that never appear in history: blank documents, bundled
    /// pages, and internal chrome.
    pub fn is_excluded(url: &str) -> bool {
        url.is_empty()
            || url == "about:blank"
            || content::is_virtual(url)
            || url.starts_with("chrome://")
    }
}

impl<E: Engine> BrowserShell<E> {
    pub(crate) fn record_history(&mut self, tab_id: TabId) {
        let Some(tab) = self.tabs.get(tab_id) else {
            return;
        };
        if tab.incognito || HistoryLog::is_excluded(&tab.url) {
            return;
        }
        let entry = HistoryEntry {
            url: tab.url.clone(),
            title: tab.title.clone(),
            timestamp: Utc::now().timestamp_millis(),
        };
        self.history.record(entry);
        self.history.save(&self.store);
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
        self.history.save(&self.store);
    }
}
