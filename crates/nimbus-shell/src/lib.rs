//! Browser shell core: tab/view lifecycle, layout, and event routing.
//!
//! [`BrowserShell`] is the explicit context object every operation goes
//! through. It owns the tab registry, the compositor state, the event
//! router, and the engine handle. Mutations execute one at a time on one
//! control path; engine events arrive later through [`BrowserShell::pump`]
//! and every handler re-checks that its tab and view still exist.

pub mod commands;
pub mod compositor;
pub mod config;
pub mod downloads;
pub mod history;
pub mod layout;
pub mod registry;
pub mod router;
pub mod settings;
pub mod shell;
pub mod split;
pub mod tab;

pub use commands::ShellCommand;
pub use config::ShellConfig;
pub use history::{HistoryEntry, HistoryLog, HISTORY_CAP};
pub use layout::{LayoutEngine, ViewConfig, ViewLayout, TOOLBAR_HEIGHT};
pub use registry::{CloseOutcome, TabRegistry};
pub use settings::Settings;
pub use shell::BrowserShell;
pub use tab::{Tab, TabOptions};
