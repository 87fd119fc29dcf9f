use nimbus_common::{Bounds, EngineError, ViewId};

use crate::events::ViewEvent;
use crate::options::ViewOptions;

/// The capability surface the shell is written against.
///
/// Views are addressed by [`ViewId`]; operations on an unknown or already
/// destroyed view are silent no-ops (teardown races are normal, not
/// errors). Navigation is fire-and-forget: outcomes arrive later as
/// [`ViewEvent`]s through [`Engine::drain_events`].
pub trait Engine {
    /// Create a new, detached view. The shell attaches and positions it
    /// separately.
    fn create_view(&mut self, options: ViewOptions) -> Result<ViewId, EngineError>;

    /// Destroy a view and release its resources. Idempotent.
    fn destroy_view(&mut self, view: ViewId);

    /// Add the view to the display stack.
    fn attach(&mut self, view: ViewId);

    /// Remove the view from the display stack. Idempotent.
    fn detach(&mut self, view: ViewId);

    fn set_bounds(&mut self, view: ViewId, bounds: Bounds);

    /// Start loading `url`. Fire-and-forget.
    fn navigate(&mut self, view: ViewId, url: &str);

    fn go_back(&mut self, view: ViewId);
    fn go_forward(&mut self, view: ViewId);
    fn reload(&mut self, view: ViewId);

    /// Cancel the in-flight navigation, if any.
    fn stop(&mut self, view: ViewId);

    /// Best-effort back/forward capability. Exact on backends that track
    /// session history, approximate otherwise.
    fn can_go_back(&self, view: ViewId) -> bool;
    fn can_go_forward(&self, view: ViewId) -> bool;

    fn current_url(&self, view: ViewId) -> Option<String>;

    /// Query the document for its icon links. Answered asynchronously via
    /// [`ViewEvent::FaviconResolved`].
    fn request_favicon(&mut self, view: ViewId);

    fn find_in_page(&mut self, view: ViewId, text: &str);
    fn stop_find(&mut self, view: ViewId);

    fn set_zoom(&mut self, view: ViewId, factor: f64);

    /// Take all pending events, in arrival order.
    fn drain_events(&mut self) -> Vec<ViewEvent>;
}
