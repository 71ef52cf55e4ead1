use std::collections::{BTreeMap, BTreeSet};

use crate::{
    composition::model::ReelConfig,
    eval::evaluator::{EvaluatedFrame, Evaluator},
    foundation::error::{ReelError, ReelResult},
    render::style::{StyleDecl, StyleTarget, compile_frame},
    session::host::{EventKind, Host, HostEvent, ListenerId, ReelElements},
    track::{controller::PinState, scrub::ScrubState},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Lifecycle of an [`AnimationSession`].
pub enum SessionState {
    /// Constructed; no listeners registered, nothing written.
    Created,
    /// Listeners registered; events drive style writes.
    Running,
    /// Torn down; listeners removed and inline styles reverted. Terminal.
    Disposed,
}

/// Scroll-linked panel animator bound to one page.
///
/// The session owns its host and the element handles collected at mount. `start` registers
/// listeners and paints the first frame; `dispose` removes every listener and reverts every
/// inline style the session wrote. Dropping a session disposes it.
pub struct AnimationSession<H: Host> {
    host: H,
    elements: ReelElements<H::Element>,
    evaluator: Evaluator,
    scrub: ScrubState,
    state: SessionState,
    listeners: Vec<(EventKind, ListenerId)>,
    applied: BTreeMap<StyleTarget, Vec<StyleDecl>>,
    touched: BTreeMap<StyleTarget, BTreeSet<&'static str>>,
    last_frame: Option<EvaluatedFrame>,
}

impl<H: Host> AnimationSession<H> {
    /// Validate `config` and bind it to pre-collected element handles.
    pub fn new(config: ReelConfig, elements: ReelElements<H::Element>, host: H) -> ReelResult<Self> {
        let anchor = elements.spacer.as_ref().unwrap_or(&elements.track);
        let evaluator = Evaluator::new(&config, host.viewport(), host.page_top(anchor))?;

        if elements.spacer.is_none() {
            tracing::warn!(
                "no spacer element; the pinned scroll distance is not reserved by the session"
            );
        }
        let expected = config.panel_count();
        if elements.panels.len() != expected {
            tracing::warn!(
                expected,
                found = elements.panels.len(),
                "panel element count does not match configuration; unmatched panels stay static"
            );
        }
        for (i, panel) in elements.panels.iter().enumerate().take(expected) {
            if panel.image.is_none() {
                tracing::warn!(panel = i, "panel image element missing; skipping its animation");
            }
            if panel.text.is_none() {
                tracing::warn!(panel = i, "panel text element missing; skipping its animation");
            }
        }

        Ok(Self {
            host,
            elements,
            evaluator,
            scrub: ScrubState::new(config.track.scrub, 0.0),
            state: SessionState::Created,
            listeners: Vec::new(),
            applied: BTreeMap::new(),
            touched: BTreeMap::new(),
            last_frame: None,
        })
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Host the session writes through.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable host access, for hosts driven from outside (tests, CLI).
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Evaluator with the current geometry.
    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    /// Most recently applied frame.
    pub fn last_frame(&self) -> Option<&EvaluatedFrame> {
        self.last_frame.as_ref()
    }

    /// Measure geometry, register listeners, and apply the initial frame.
    ///
    /// Calling `start` on a running session is a no-op.
    pub fn start(&mut self) -> ReelResult<()> {
        match self.state {
            SessionState::Running => return Ok(()),
            SessionState::Disposed => {
                return Err(ReelError::session("cannot start a disposed session"));
            }
            SessionState::Created => {}
        }

        self.remeasure();
        let mut kinds = vec![EventKind::Scroll, EventKind::Resize];
        if self.scrub.is_smoothed() {
            kinds.push(EventKind::Frame);
        }
        for kind in kinds {
            match self.host.bind(kind) {
                Ok(id) => self.listeners.push((kind, id)),
                Err(err) => {
                    self.unbind_all();
                    return Err(err);
                }
            }
        }

        self.state = SessionState::Running;
        tracing::debug!(
            listeners = self.listeners.len(),
            panels = self.evaluator.reveal().panel_count(),
            "animation session started"
        );
        self.render()
    }

    /// React to a host event. Ignored unless the session is running and subscribed to it.
    pub fn handle(&mut self, event: HostEvent) -> ReelResult<()> {
        if self.state != SessionState::Running {
            tracing::trace!(?event, state = ?self.state, "event ignored");
            return Ok(());
        }
        if !self.listeners.iter().any(|(k, _)| *k == event.kind()) {
            return Ok(());
        }

        match event {
            HostEvent::Scroll => {
                let target = self.evaluator.target_progress(self.host.scroll_offset());
                self.scrub.set_target(target);
                self.render()?;
                self.request_frame_if_moving();
                Ok(())
            }
            HostEvent::Resize => {
                self.remeasure();
                self.render()
            }
            HostEvent::Frame { dt_secs } => {
                if self.scrub.is_settled() {
                    return Ok(());
                }
                self.scrub.advance(dt_secs);
                self.render()?;
                self.request_frame_if_moving();
                Ok(())
            }
        }
    }

    /// Remove every listener and revert every inline style this session wrote.
    ///
    /// Idempotent; a disposed session never touches its elements again.
    pub fn dispose(&mut self) {
        if self.state == SessionState::Disposed {
            return;
        }
        self.unbind_all();

        let touched = std::mem::take(&mut self.touched);
        for (target, properties) in touched {
            let Some(el) = element_for(&self.elements, target) else {
                continue;
            };
            for property in properties {
                self.host.remove_style(el, property);
            }
        }
        self.applied.clear();
        self.last_frame = None;
        self.state = SessionState::Disposed;
        tracing::debug!("animation session disposed");
    }

    fn unbind_all(&mut self) {
        for (_, id) in self.listeners.drain(..) {
            self.host.unbind(id);
        }
    }

    fn request_frame_if_moving(&mut self) {
        if !self.scrub.is_settled() && self.listeners.iter().any(|(k, _)| *k == EventKind::Frame)
        {
            self.host.request_frame();
        }
    }

    /// Page offset where the pinned range starts.
    ///
    /// Without a spacer the track itself is the anchor, and while it is pinned or parked
    /// after the range its box no longer sits at its flow position. The last measured
    /// value is kept until the track is back in flow.
    fn pin_start(&self) -> f64 {
        if let Some(spacer) = &self.elements.spacer {
            return self.host.page_top(spacer);
        }
        let displaced = self
            .last_frame
            .as_ref()
            .is_some_and(|f| matches!(f.pin, PinState::Pinned | PinState::After));
        if displaced {
            self.evaluator.track().geometry().pin_start
        } else {
            self.host.page_top(&self.elements.track)
        }
    }

    fn remeasure(&mut self) {
        let pin_start = self.pin_start();
        self.evaluator.resize(self.host.viewport(), pin_start);
        let target = self.evaluator.target_progress(self.host.scroll_offset());
        self.scrub.set_target(target);
        self.scrub.snap();
    }

    fn render(&mut self) -> ReelResult<()> {
        let offset = self.host.scroll_offset();
        let frame = self.evaluator.eval_scrubbed(offset, self.scrub.current())?;
        let plan = compile_frame(&frame);

        for op in plan.ops {
            let Some(el) = element_for(&self.elements, op.target) else {
                continue;
            };
            if self.applied.get(&op.target) == Some(&op.decls) {
                continue;
            }
            let touched = self.touched.entry(op.target).or_default();
            let mut complete = true;
            for decl in &op.decls {
                match self.host.set_style(el, decl) {
                    Ok(()) => {
                        touched.insert(decl.property);
                    }
                    Err(err) => {
                        complete = false;
                        tracing::warn!(
                            style_target = ?op.target,
                            property = decl.property,
                            %err,
                            "style write failed"
                        );
                    }
                }
            }
            // Only a fully written op may short-circuit the next identical one.
            if complete {
                self.applied.insert(op.target, op.decls);
            } else {
                self.applied.remove(&op.target);
            }
        }

        self.last_frame = Some(frame);
        Ok(())
    }
}

impl<H: Host> Drop for AnimationSession<H> {
    fn drop(&mut self) {
        self.dispose();
    }
}

fn element_for<E>(elements: &ReelElements<E>, target: StyleTarget) -> Option<&E> {
    match target {
        StyleTarget::Track => Some(&elements.track),
        StyleTarget::Spacer => elements.spacer.as_ref(),
        StyleTarget::PanelImage(i) => elements.panels.get(i)?.image.as_ref(),
        StyleTarget::PanelText(i) => elements.panels.get(i)?.text.as_ref(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/animation_session.rs"]
mod tests;
