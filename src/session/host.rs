use crate::{
    foundation::core::Viewport, foundation::error::ReelResult, render::style::StyleDecl,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
/// Host event families a session can subscribe to.
pub enum EventKind {
    /// Page scroll position changed.
    Scroll,
    /// Viewport size changed.
    Resize,
    /// Animation frame tick (only needed for smoothed scrubbing).
    Frame,
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// An event delivered by the host to a running session.
pub enum HostEvent {
    /// Page scroll position changed; read it back from [`Host::scroll_offset`].
    Scroll,
    /// Viewport size changed; read it back from [`Host::viewport`].
    Resize,
    /// Animation frame; `dt_secs` since the previous frame.
    Frame {
        /// Seconds elapsed since the previous frame.
        dt_secs: f64,
    },
}

impl HostEvent {
    /// Subscription family this event belongs to.
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Scroll => EventKind::Scroll,
            Self::Resize => EventKind::Resize,
            Self::Frame { .. } => EventKind::Frame,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Opaque handle for one registered listener.
pub struct ListenerId(pub u64);

/// Environment seam between the animator and whatever displays it.
///
/// The browser implementation wraps `window`/`document`; [`crate::MemoryHost`] records
/// everything in memory for tests and the CLI.
pub trait Host {
    /// Handle to a rendered element.
    type Element;

    /// Current viewport size.
    fn viewport(&self) -> Viewport;

    /// Current vertical page scroll offset.
    fn scroll_offset(&self) -> f64;

    /// Page offset of the element's top edge, used as the pin start.
    fn page_top(&self, element: &Self::Element) -> f64;

    /// Register a listener; events of this kind are routed to the owning session.
    fn bind(&mut self, kind: EventKind) -> ReelResult<ListenerId>;

    /// Remove a listener registered by [`Host::bind`]. Unknown ids are ignored.
    fn unbind(&mut self, id: ListenerId);

    /// Write one inline style declaration.
    fn set_style(&mut self, element: &Self::Element, decl: &StyleDecl) -> ReelResult<()>;

    /// Remove an inline style property, restoring the stylesheet value.
    fn remove_style(&mut self, element: &Self::Element, property: &str);

    /// Ask for one more [`HostEvent::Frame`]. Requests made before the next frame fires
    /// coalesce; hosts deliver no frames nobody asked for.
    fn request_frame(&mut self);
}

/// Element handles of one panel. Missing children are skipped, not fatal.
#[derive(Clone, Debug)]
pub struct PanelElements<E> {
    /// Panel image element.
    pub image: Option<E>,
    /// Panel text block element.
    pub text: Option<E>,
}

/// Element handles collected once at mount.
#[derive(Clone, Debug)]
pub struct ReelElements<E> {
    /// Track container; translated horizontally and pinned.
    pub track: E,
    /// Optional wrapper that reserves the pinned scroll distance.
    pub spacer: Option<E>,
    /// Per-panel handles in display order.
    pub panels: Vec<PanelElements<E>>,
}
