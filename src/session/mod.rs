//! Host seam and the animation session lifecycle.

pub mod animation_session;
pub mod host;
