//! Collaborator interfaces at the engine boundary.
//!
//! The engine never touches the DOM, the network or a clock. Everything it
//! needs from the host is expressed as one of these traits, and everything the
//! host needs from the engine comes back through method calls or layout
//! observers.

use crate::model::ItemIndex;
use crate::pagination::MoreData;

/// One-shot visibility subscriptions, implemented by the host's viewport observer.
pub trait ViewportObserver {
    /// Start watching `index`; the host calls
    /// [`Gallery::notify_viewport_visible`](super::Gallery::notify_viewport_visible)
    /// when it first becomes visible.
    fn observe(&mut self, index: ItemIndex);

    /// Stop watching `index`.
    fn unobserve(&mut self, index: ItemIndex);

    /// Stop watching everything.
    fn disconnect(&mut self);
}

/// External source asked for more data in stream mode.
///
/// The call must not block. New items arrive later through
/// [`Gallery::supply_data`](super::Gallery::supply_data).
pub trait DataSource {
    /// Ask for more items and say whether any may still come.
    fn request_more(&mut self) -> MoreData;
}

impl<F> DataSource for F
where
    F: FnMut() -> MoreData,
{
    fn request_more(&mut self) -> MoreData {
        self()
    }
}

/// Host scroll container, used to keep the relative position across reflows.
pub trait ScrollHost {
    /// Current vertical scroll offset in pixels.
    fn scroll_offset(&self) -> f64;

    /// Move to a vertical scroll offset in pixels.
    fn scroll_to(&mut self, offset: f64);
}

/// Handle on the host's container resize subscription.
pub trait ResizeSubscription {
    /// Stop delivering resize notifications.
    fn unsubscribe(&mut self);
}

/// The set of collaborators an engine talks to. All are optional, except
/// that stream mode requires a data source.
#[derive(Default)]
pub struct Collaborators {
    pub(super) viewport: Option<Box<dyn ViewportObserver>>,
    pub(super) data_source: Option<Box<dyn DataSource>>,
    pub(super) scroll: Option<Box<dyn ScrollHost>>,
    pub(super) resize: Option<Box<dyn ResizeSubscription>>,
}

impl Collaborators {
    /// No collaborators.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a viewport observer.
    pub fn with_viewport(mut self, viewport: impl ViewportObserver + 'static) -> Self {
        self.viewport = Some(Box::new(viewport));
        self
    }

    /// Attach a data source (required in stream mode).
    pub fn with_data_source(mut self, source: impl DataSource + 'static) -> Self {
        self.data_source = Some(Box::new(source));
        self
    }

    /// Attach a scroll host for scroll preservation.
    pub fn with_scroll_host(mut self, scroll: impl ScrollHost + 'static) -> Self {
        self.scroll = Some(Box::new(scroll));
        self
    }

    /// Attach the resize subscription to release on destroy.
    pub fn with_resize_subscription(mut self, resize: impl ResizeSubscription + 'static) -> Self {
        self.resize = Some(Box::new(resize));
        self
    }

    /// Whether a data source was supplied.
    pub fn has_data_source(&self) -> bool {
        self.data_source.is_some()
    }
}

impl std::fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collaborators")
            .field("viewport", &self.viewport.is_some())
            .field("data_source", &self.data_source.is_some())
            .field("scroll", &self.scroll.is_some())
            .field("resize", &self.resize.is_some())
            .finish()
    }
}
