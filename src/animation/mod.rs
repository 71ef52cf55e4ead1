//! Easing, tweening, and activation windows.

pub mod ease;
pub mod tween;
pub mod window;
