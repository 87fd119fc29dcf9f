//! Rendering-engine capability surface.
//!
//! The shell core treats the page-rendering engine as opaque: it can create
//! and destroy views, attach them to the display stack, position them,
//! drive navigation, query the document, and drain the events the engine
//! reports. Everything else (rendering, script execution, networking) is
//! the engine's own business.
//!
//! `Engine` is the capability trait the shell is written against. The
//! real backend (`wry_backend`, behind the `wry-backend` feature) hosts
//! child webviews of a window; the deterministic in-memory engine
//! (`fake`, behind `test-support`) backs the shell tests.

pub mod bridge;
pub mod content;
pub mod engine;
pub mod events;
pub mod filter;
pub mod options;

#[cfg(any(test, feature = "test-support"))]
pub mod fake;

#[cfg(feature = "wry-backend")]
pub mod wry_backend;

pub use content::ContentProvider;
pub use engine::Engine;
pub use events::ViewEvent;
pub use filter::UrlPatternFilter;
pub use options::{Partition, ViewOptions};
