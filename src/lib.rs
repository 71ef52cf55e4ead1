//! scrollreel drives a pinned, horizontally scrolling panel track from the page's
//! vertical scroll position, with a scrubbed reveal animation on every panel.
//!
//! The crate is split into a pure, headless core and thin hosts around it.
//!
//! # Pipeline overview
//!
//! 1. **Configure**: [`ReelConfig`] (JSON or [`ReelBuilder`]) describes panels, track, and reveal.
//! 2. **Evaluate**: `scroll offset -> EvaluatedFrame` (pin state, track translation, per-panel
//!    reveal progress) via [`Evaluator`].
//! 3. **Compile**: `EvaluatedFrame -> StylePlan` (inline CSS declarations per element) via
//!    [`compile_frame`].
//! 4. **Apply**: an [`AnimationSession`] writes the plan through a [`Host`] on every scroll,
//!    resize, or animation frame, and reverts everything it wrote on dispose.
//!
//! Panel content (image, heading, paragraphs) is rendered to HTML by [`reel_markup`]; the
//! browser host fills an empty track with it before measuring.
//!
//! Evaluation and compilation are pure: the same configuration, viewport, and offset always
//! produce the same frame, in either scroll direction.
//!
//! [`MemoryHost`] runs sessions headlessly (tests, the `scrollreel` CLI). On `wasm32` the
//! `ScrollReel` export mounts a session against the live document.
#![cfg_attr(not(target_arch = "wasm32"), forbid(unsafe_code))]
#![deny(missing_docs)]

mod animation;
mod composition;
mod eval;
mod foundation;
mod host;
mod render;
mod reveal;
mod session;
mod track;

pub use animation::ease::Ease;
pub use animation::tween::{Lerp, Tween};
pub use animation::window::{ActivationWindow, Anchor, Span};
pub use composition::dsl::{ReelBuilder, panel};
pub use composition::model::{
    ElementReveal, PanelDescriptor, ReelConfig, RevealSpec, ScrollDistance, Scrub, TrackSettings,
};
pub use eval::evaluator::{EvaluatedFrame, Evaluator, MAX_SWEEP_SAMPLES};
pub use foundation::core::{Affine, ElementTransform, Vec2, Viewport, clamp01, remap01};
pub use foundation::error::{ReelError, ReelResult};
pub use host::memory::{ElementId, MemoryHost};
#[cfg(target_arch = "wasm32")]
pub use host::web::{PIN_SPACER_CLASS, ScrollReel, Selectors, WebHost, collect_elements};
pub use render::markup::{
    IMAGE_CLASS, PANEL_CLASS, TEXT_CLASS, TRACK_CLASS, panel_markup, panels_markup, reel_markup,
};
pub use render::style::{StyleDecl, StyleOp, StylePlan, StyleTarget, compile_frame, css_matrix};
pub use reveal::animator::{ElementState, PanelReveal, RevealAnimator};
pub use session::animation_session::{AnimationSession, SessionState};
pub use session::host::{EventKind, Host, HostEvent, ListenerId, PanelElements, ReelElements};
pub use track::controller::{PinState, TrackController, TrackGeometry};
pub use track::scrub::ScrubState;
