//! Shell tunables.

use std::time::Duration;

use nimbus_engine::content::NEW_TAB_URL;

/// Construction-time knobs for [`crate::BrowserShell`]. Everything here has
/// a production default; tests shorten the favicon settle delay instead of
/// sleeping.
#[derive(Debug, Clone)]
pub struct ShellConfig {
    /// Address opened when a tab is created without one.
    pub homepage: String,
    /// Address loaded into a freshly opened secondary pane.
    pub split_default_url: String,
    /// How long after load-stop before the favicon is probed, so late
    /// icon-link injection settles first.
    pub favicon_settle: Duration,
    /// Broadcast channel depth for the presentation bridge.
    pub bus_capacity: usize,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            homepage: NEW_TAB_URL.to_string(),
            split_default_url: "https://www.google.com".to_string(),
            favicon_settle: Duration::from_millis(600),
            bus_capacity: 256,
        }
    }
}
