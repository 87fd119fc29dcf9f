//! Download progress reporting. Downloads belong to the window, not to a
//! tab; closing the originating tab does not cancel them.

use tracing::info;

use nimbus_common::events::{DownloadState, ShellEvent};
use nimbus_common::id::short_id;
use nimbus_engine::Engine;

use crate::shell::BrowserShell;

impl<E: Engine> BrowserShell<E> {
    /// Announce a new download and hand back its id.
    pub fn download_started(&mut self, filename: &str, url: &str) -> String {
        let id = format!("dl_{}", short_id());
        info!(download = %id, filename, "download started");
        self.bus.publish(ShellEvent::DownloadStarted {
            id: id.clone(),
            filename: filename.to_string(),
            url: url.to_string(),
        });
        id
    }

    /// Report a download reaching a terminal state. `save_path` is only
    /// present for completed downloads.
    pub fn download_finished(
        &mut self,
        id: &str,
        state: DownloadState,
        save_path: Option<String>,
    ) {
        info!(download = %id, ?state, "download finished");
        self.bus.publish(ShellEvent::DownloadFinished {
            id: id.to_string(),
            state,
            save_path,
        });
    }
}
