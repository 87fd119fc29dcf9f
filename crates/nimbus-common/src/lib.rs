pub mod errors;
pub mod events;
pub mod id;
pub mod types;

pub use errors::{EngineError, NimbusError, StoreError};
pub use events::{DownloadState, EventBus, ShellEvent};
pub use id::{short_id, TabId, ViewId};
pub use types::{Bounds, ContextMenuParams, Side, WindowSize};

pub type Result<T> = std::result::Result<T, NimbusError>;
