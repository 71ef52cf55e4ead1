use std::{
    cell::{Cell, RefCell},
    collections::BTreeMap,
    rc::{Rc, Weak},
};

use wasm_bindgen::{JsCast, prelude::*};
use web_sys::{Document, Element, HtmlElement, Node, Window};

use crate::{
    composition::model::ReelConfig,
    foundation::core::Viewport,
    foundation::error::{ReelError, ReelResult},
    render::markup::panels_markup,
    render::style::StyleDecl,
    session::animation_session::{AnimationSession, SessionState},
    session::host::{EventKind, Host, HostEvent, ListenerId, PanelElements, ReelElements},
};

type SessionCell = RefCell<AnimationSession<WebHost>>;
type SessionSlot = Rc<RefCell<Weak<SessionCell>>>;

/// Class of the wrapper created around the track when no spacer is selected.
pub const PIN_SPACER_CLASS: &str = "pin-spacer";

/// CSS selectors used to collect reel elements at mount.
#[derive(Clone, Debug, serde::Deserialize)]
#[serde(default)]
pub struct Selectors {
    /// Track container, matched once in the document.
    pub track: String,
    /// Spacer element. When unset, a `div.pin-spacer` is wrapped around the track for the
    /// lifetime of the mount.
    pub spacer: Option<String>,
    /// Panels, matched inside the track.
    pub panel: String,
    /// Image, matched inside each panel.
    pub image: String,
    /// Text block, matched inside each panel.
    pub text: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            track: ".horizontal-scroll-wrapper".to_string(),
            spacer: None,
            panel: ".panel".to_string(),
            image: ".phone-img".to_string(),
            text: ".text-content".to_string(),
        }
    }
}

enum Listener {
    Dom {
        event: &'static str,
        callback: Closure<dyn Fn()>,
    },
    Frame(Rc<FrameLoop>),
}

/// On-demand `requestAnimationFrame` loop feeding [`HostEvent::Frame`] to the session.
///
/// Nothing is scheduled until the session asks through [`Host::request_frame`]; a frame
/// whose handler asks for no successor lets the loop go idle.
struct FrameLoop {
    window: Window,
    request: Cell<Option<i32>>,
    last_ts: Cell<Option<f64>>,
    callback: RefCell<Option<Closure<dyn FnMut(f64)>>>,
}

impl FrameLoop {
    fn new(window: Window, sink: SessionSlot) -> Rc<Self> {
        let frame = Rc::new(Self {
            window,
            request: Cell::new(None),
            last_ts: Cell::new(None),
            callback: RefCell::new(None),
        });
        let weak = Rc::downgrade(&frame);
        let callback = Closure::<dyn FnMut(f64)>::new(move |ts: f64| {
            let Some(frame) = weak.upgrade() else {
                return;
            };
            frame.request.set(None);
            let dt_secs = frame
                .last_ts
                .replace(Some(ts))
                .map_or(0.0, |prev| ((ts - prev) / 1000.0).max(0.0));
            dispatch(&sink, HostEvent::Frame { dt_secs });
            if frame.request.get().is_none() {
                frame.last_ts.set(None);
            }
        });
        *frame.callback.borrow_mut() = Some(callback);
        frame
    }

    fn request(&self) -> ReelResult<()> {
        if self.request.get().is_some() {
            return Ok(());
        }
        let callback = self.callback.borrow();
        let Some(cb) = callback.as_ref() else {
            return Ok(());
        };
        let id = self
            .window
            .request_animation_frame(cb.as_ref().unchecked_ref())
            .map_err(|e| js_error("requestAnimationFrame", e))?;
        self.request.set(Some(id));
        Ok(())
    }

    fn stop(&self) {
        if let Some(id) = self.request.take() {
            let _ = self.window.cancel_animation_frame(id);
        }
        self.callback.borrow_mut().take();
    }
}

/// Browser host backed by `window` and inline element styles.
pub struct WebHost {
    window: Window,
    sink: SessionSlot,
    next_listener: u64,
    listeners: BTreeMap<ListenerId, Listener>,
}

impl WebHost {
    fn new(window: Window) -> Self {
        Self {
            window,
            sink: Rc::new(RefCell::new(Weak::new())),
            next_listener: 1,
            listeners: BTreeMap::new(),
        }
    }
}

impl Host for WebHost {
    type Element = HtmlElement;

    fn viewport(&self) -> Viewport {
        let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        Viewport {
            width: dim(self.window.inner_width()),
            height: dim(self.window.inner_height()),
        }
    }

    fn scroll_offset(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn page_top(&self, element: &HtmlElement) -> f64 {
        element.get_bounding_client_rect().top() + self.scroll_offset()
    }

    fn bind(&mut self, kind: EventKind) -> ReelResult<ListenerId> {
        let listener = match kind {
            EventKind::Scroll | EventKind::Resize => {
                let (event, host_event) = if kind == EventKind::Scroll {
                    ("scroll", HostEvent::Scroll)
                } else {
                    ("resize", HostEvent::Resize)
                };
                let sink = Rc::clone(&self.sink);
                let callback = Closure::<dyn Fn()>::new(move || dispatch(&sink, host_event));
                self.window
                    .add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
                    .map_err(|e| js_error(event, e))?;
                Listener::Dom { event, callback }
            }
            EventKind::Frame => {
                Listener::Frame(FrameLoop::new(self.window.clone(), Rc::clone(&self.sink)))
            }
        };
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.insert(id, listener);
        Ok(id)
    }

    fn unbind(&mut self, id: ListenerId) {
        match self.listeners.remove(&id) {
            Some(Listener::Dom { event, callback }) => {
                let _ = self
                    .window
                    .remove_event_listener_with_callback(event, callback.as_ref().unchecked_ref());
            }
            Some(Listener::Frame(frame)) => frame.stop(),
            None => {}
        }
    }

    fn set_style(&mut self, element: &HtmlElement, decl: &StyleDecl) -> ReelResult<()> {
        element
            .style()
            .set_property(decl.property, &decl.value)
            .map_err(|e| js_error(decl.property, e))
    }

    fn remove_style(&mut self, element: &HtmlElement, property: &str) {
        let _ = element.style().remove_property(property);
    }

    fn request_frame(&mut self) {
        for listener in self.listeners.values() {
            if let Listener::Frame(frame) = listener
                && let Err(err) = frame.request()
            {
                tracing::warn!(%err, "animation frame request failed");
            }
        }
    }
}

fn dispatch(sink: &SessionSlot, event: HostEvent) {
    let Some(cell) = sink.borrow().upgrade() else {
        return;
    };
    let Ok(mut session) = cell.try_borrow_mut() else {
        tracing::trace!(?event, "session busy; event dropped");
        return;
    };
    if let Err(err) = session.handle(event) {
        tracing::warn!(%err, ?event, "event handling failed");
    }
}

fn js_error(what: &str, err: JsValue) -> ReelError {
    ReelError::host(format!("{what}: {err:?}"))
}

fn html(element: Element, what: &str) -> ReelResult<HtmlElement> {
    element
        .dyn_into::<HtmlElement>()
        .map_err(|_| ReelError::host(format!("{what} is not an HTML element")))
}

fn child(panel: &Element, selector: &str) -> Option<HtmlElement> {
    panel
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

/// Collect the track, spacer, and per-panel elements once.
///
/// The spacer is `None` when no spacer selector is set; a selector that matches nothing
/// is an error.
pub fn collect_elements(
    document: &Document,
    selectors: &Selectors,
) -> ReelResult<ReelElements<HtmlElement>> {
    let track = document
        .query_selector(&selectors.track)
        .map_err(|e| js_error("query track", e))?
        .ok_or_else(|| ReelError::host(format!("no element matches '{}'", selectors.track)))?;
    let track = html(track, "track")?;

    let spacer = match &selectors.spacer {
        Some(sel) => {
            let el = document
                .query_selector(sel)
                .map_err(|e| js_error("query spacer", e))?
                .ok_or_else(|| ReelError::host(format!("no element matches '{sel}'")))?;
            Some(html(el, "spacer")?)
        }
        None => None,
    };

    let nodes = track
        .query_selector_all(&selectors.panel)
        .map_err(|e| js_error("query panels", e))?;
    let mut panels = Vec::with_capacity(nodes.length() as usize);
    for i in 0..nodes.length() {
        let Some(panel) = nodes.get(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
            continue;
        };
        panels.push(PanelElements {
            image: child(&panel, &selectors.image),
            text: child(&panel, &selectors.text),
        });
    }

    Ok(ReelElements {
        track,
        spacer,
        panels,
    })
}

/// Page changes made while mounting, undone on dispose.
#[derive(Default)]
struct MountedDom {
    filled_track: Option<HtmlElement>,
    created_spacer: Option<HtmlElement>,
}

impl MountedDom {
    fn undo(&mut self) {
        if let Some(spacer) = self.created_spacer.take() {
            unwrap_spacer(&spacer);
        }
        if let Some(track) = self.filled_track.take() {
            track.set_inner_html("");
        }
    }
}

fn wrap_in_spacer(document: &Document, track: &HtmlElement) -> ReelResult<HtmlElement> {
    let parent = track
        .parent_node()
        .ok_or_else(|| ReelError::host("track is not attached to the document"))?;
    let spacer = document
        .create_element("div")
        .map_err(|e| js_error("create spacer", e))?;
    let spacer = html(spacer, "spacer")?;
    spacer.set_class_name(PIN_SPACER_CLASS);
    let before: &Node = track;
    parent
        .insert_before(&spacer, Some(before))
        .map_err(|e| js_error("insert spacer", e))?;
    if let Err(err) = spacer.append_child(track) {
        spacer.remove();
        return Err(js_error("wrap track", err));
    }
    Ok(spacer)
}

fn unwrap_spacer(spacer: &HtmlElement) {
    if let Some(parent) = spacer.parent_node() {
        let before: &Node = spacer;
        while let Some(node) = spacer.first_child() {
            if parent.insert_before(&node, Some(before)).is_err() {
                break;
            }
        }
    }
    spacer.remove();
}

/// Resolve the elements a session animates, filling an empty track from `config` and
/// wrapping the track in a pin spacer when none is selected.
fn prepare_page(
    document: &Document,
    selectors: &Selectors,
    config: &ReelConfig,
    dom: &mut MountedDom,
) -> ReelResult<ReelElements<HtmlElement>> {
    let mut elements = collect_elements(document, selectors)?;
    if elements.panels.is_empty() {
        elements.track.set_inner_html(&panels_markup(config));
        dom.filled_track = Some(elements.track.clone());
        elements = collect_elements(document, selectors)?;
    }
    if elements.panels.len() != config.panel_count() {
        return Err(ReelError::host(format!(
            "page has {} panel elements but the configuration describes {}",
            elements.panels.len(),
            config.panel_count()
        )));
    }
    if elements.spacer.is_none() {
        let spacer = wrap_in_spacer(document, &elements.track)?;
        dom.created_spacer = Some(spacer.clone());
        elements.spacer = Some(spacer);
    }
    Ok(elements)
}

fn start_session(
    window: Window,
    config: ReelConfig,
    elements: ReelElements<HtmlElement>,
) -> ReelResult<Rc<SessionCell>> {
    let host = WebHost::new(window);
    let sink = Rc::clone(&host.sink);
    let session = Rc::new(RefCell::new(AnimationSession::new(config, elements, host)?));
    *sink.borrow_mut() = Rc::downgrade(&session);
    session.borrow_mut().start()?;
    Ok(session)
}

fn mount(
    config_json: &str,
    selectors_json: Option<&str>,
) -> ReelResult<(Rc<SessionCell>, MountedDom)> {
    let config = ReelConfig::from_json_str(config_json)?;
    let selectors = match selectors_json {
        Some(json) => serde_json::from_str(json)?,
        None => Selectors::default(),
    };
    let window = web_sys::window().ok_or_else(|| ReelError::host("no global window"))?;
    let document = window
        .document()
        .ok_or_else(|| ReelError::host("window has no document"))?;

    let mut dom = MountedDom::default();
    let session = prepare_page(&document, &selectors, &config, &mut dom)
        .and_then(|elements| start_session(window, config, elements));
    match session {
        Ok(session) => Ok((session, dom)),
        Err(err) => {
            dom.undo();
            Err(err)
        }
    }
}

/// Mounted scroll reel, exported to JavaScript.
///
/// Call `mount` once the document is ready and `dispose` on unmount. Freeing the
/// object from JavaScript disposes it as well. An empty track is filled with the
/// configured panels; otherwise the page must already hold exactly one panel element
/// per configured panel.
#[wasm_bindgen]
pub struct ScrollReel {
    session: Option<Rc<SessionCell>>,
    dom: MountedDom,
}

#[wasm_bindgen]
impl ScrollReel {
    /// Mount with the default selectors.
    pub fn mount(config_json: &str) -> Result<ScrollReel, JsValue> {
        Self::mount_with(config_json, None)
    }

    /// Mount with selectors given as JSON; omitted keys keep their defaults.
    #[wasm_bindgen(js_name = mountWith)]
    pub fn mount_with(
        config_json: &str,
        selectors_json: Option<String>,
    ) -> Result<ScrollReel, JsValue> {
        mount(config_json, selectors_json.as_deref())
            .map(|(session, dom)| Self {
                session: Some(session),
                dom,
            })
            .map_err(|err| js_sys::Error::new(&err.to_string()).into())
    }

    /// Whether the session is mounted and reacting to scroll.
    #[wasm_bindgen(getter, js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.session
            .as_ref()
            .and_then(|s| s.try_borrow().ok().map(|s| s.state() == SessionState::Running))
            .unwrap_or(false)
    }

    /// Remove all listeners, revert inline styles, and undo page changes made at mount.
    /// Safe to call twice.
    pub fn dispose(&mut self) {
        if let Some(cell) = self.session.take()
            && let Ok(mut session) = cell.try_borrow_mut()
        {
            session.dispose();
        }
        self.dom.undo();
    }
}

impl Drop for ScrollReel {
    fn drop(&mut self) {
        self.dispose();
    }
}
