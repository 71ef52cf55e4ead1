use std::collections::{BTreeMap, BTreeSet};

use crate::{
    foundation::core::Viewport,
    foundation::error::{ReelError, ReelResult},
    render::style::StyleDecl,
    session::host::{EventKind, Host, ListenerId, PanelElements, ReelElements},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
/// Element handle issued by [`MemoryHost`].
pub struct ElementId(pub u32);

/// Headless host that records listeners and inline styles in memory.
///
/// Used by the CLI to preview style writes and by tests to observe session lifecycles.
#[derive(Clone, Debug)]
pub struct MemoryHost {
    viewport: Viewport,
    scroll_offset: f64,
    next_element: u32,
    next_listener: u64,
    page_tops: BTreeMap<ElementId, f64>,
    listeners: BTreeMap<ListenerId, EventKind>,
    styles: BTreeMap<ElementId, BTreeMap<String, String>>,
    detached: BTreeSet<ElementId>,
    fail_bind: Option<EventKind>,
    writes: u64,
    detached_writes: u64,
    frame_pending: bool,
    frame_requests: u64,
}

impl MemoryHost {
    /// Empty page scrolled to the top.
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            scroll_offset: 0.0,
            next_element: 0,
            next_listener: 1,
            page_tops: BTreeMap::new(),
            listeners: BTreeMap::new(),
            styles: BTreeMap::new(),
            detached: BTreeSet::new(),
            fail_bind: None,
            writes: 0,
            detached_writes: 0,
            frame_pending: false,
            frame_requests: 0,
        }
    }

    /// Allocate a new element handle at page offset 0.
    pub fn element(&mut self) -> ElementId {
        let id = ElementId(self.next_element);
        self.next_element += 1;
        id
    }

    /// Allocate the full element tree for `panels` panels: spacer, track, image + text each.
    pub fn reel_elements(&mut self, panels: usize) -> ReelElements<ElementId> {
        let spacer = self.element();
        let track = self.element();
        let panels = (0..panels)
            .map(|_| PanelElements {
                image: Some(self.element()),
                text: Some(self.element()),
            })
            .collect();
        ReelElements {
            track,
            spacer: Some(spacer),
            panels,
        }
    }

    /// Set the in-flow page offset of an element's top edge.
    pub fn set_page_top(&mut self, element: ElementId, top: f64) {
        self.page_tops.insert(element, top);
    }

    /// Move the page scroll position. Callers deliver `HostEvent::Scroll` themselves.
    pub fn scroll_to(&mut self, offset: f64) {
        self.scroll_offset = offset;
    }

    /// Change the viewport. Callers deliver `HostEvent::Resize` themselves.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Simulate removal of an element from the document.
    pub fn detach(&mut self, element: ElementId) {
        self.detached.insert(element);
    }

    /// Put a detached element back into the document.
    pub fn reattach(&mut self, element: ElementId) {
        self.detached.remove(&element);
    }

    /// Make the next `bind` of `kind` fail.
    pub fn fail_bind_on(&mut self, kind: EventKind) {
        self.fail_bind = Some(kind);
    }

    /// Listeners currently registered.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Whether any listener of `kind` is registered.
    pub fn is_bound(&self, kind: EventKind) -> bool {
        self.listeners.values().any(|k| *k == kind)
    }

    /// Inline value of `property` on `element`.
    pub fn style(&self, element: ElementId, property: &str) -> Option<&str> {
        self.styles.get(&element)?.get(property).map(String::as_str)
    }

    /// Inline styles of one element, sorted by property.
    pub fn styles_of(&self, element: ElementId) -> Option<&BTreeMap<String, String>> {
        self.styles.get(&element)
    }

    /// Whether no element carries any inline style.
    pub fn is_pristine(&self) -> bool {
        self.styles.values().all(BTreeMap::is_empty)
    }

    /// Successful style writes so far.
    pub fn write_count(&self) -> u64 {
        self.writes
    }

    /// Style writes attempted on detached elements.
    pub fn detached_write_count(&self) -> u64 {
        self.detached_writes
    }

    /// Consume the pending animation frame request, if any.
    ///
    /// A driver loop delivers `HostEvent::Frame` only while this returns `true`.
    pub fn take_frame_request(&mut self) -> bool {
        std::mem::take(&mut self.frame_pending)
    }

    /// Animation frames requested so far, coalesced requests included.
    pub fn frame_request_count(&self) -> u64 {
        self.frame_requests
    }

    fn inline_px(&self, element: ElementId, property: &str) -> f64 {
        self.style(element, property)
            .and_then(|v| v.strip_suffix("px"))
            .and_then(|v| v.parse().ok())
            .unwrap_or(0.0)
    }
}

impl Host for MemoryHost {
    type Element = ElementId;

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    /// Honors inline `position`/`top` like a browser layout would: a fixed element sits
    /// `top` below the current scroll offset, a relative one `top` below its flow position.
    fn page_top(&self, element: &ElementId) -> f64 {
        let flow = self.page_tops.get(element).copied().unwrap_or(0.0);
        match self.style(*element, "position") {
            Some("fixed") => self.scroll_offset + self.inline_px(*element, "top"),
            Some("relative") => flow + self.inline_px(*element, "top"),
            _ => flow,
        }
    }

    fn bind(&mut self, kind: EventKind) -> ReelResult<ListenerId> {
        if self.fail_bind == Some(kind) {
            self.fail_bind = None;
            return Err(ReelError::host(format!("cannot listen for {kind:?}")));
        }
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.insert(id, kind);
        Ok(id)
    }

    fn unbind(&mut self, id: ListenerId) {
        self.listeners.remove(&id);
    }

    fn set_style(&mut self, element: &ElementId, decl: &StyleDecl) -> ReelResult<()> {
        if self.detached.contains(element) {
            self.detached_writes += 1;
            return Err(ReelError::host(format!(
                "element {} is detached",
                element.0
            )));
        }
        self.styles
            .entry(*element)
            .or_default()
            .insert(decl.property.to_string(), decl.value.clone());
        self.writes += 1;
        Ok(())
    }

    fn remove_style(&mut self, element: &ElementId, property: &str) {
        if let Some(styles) = self.styles.get_mut(element) {
            styles.remove(property);
        }
    }

    fn request_frame(&mut self) {
        self.frame_pending = true;
        self.frame_requests += 1;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/memory.rs"]
mod tests;
