use crate::foundation::error::{ReelError, ReelResult};

pub use kurbo::{Affine, Vec2};

/// Visible browser viewport in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    /// Viewport width (`window.innerWidth`).
    pub width: f64,
    /// Viewport height (`window.innerHeight`).
    pub height: f64,
}

impl Viewport {
    /// Build a viewport, rejecting negative or non-finite dimensions.
    pub fn new(width: f64, height: f64) -> ReelResult<Self> {
        if !width.is_finite() || width < 0.0 {
            return Err(ReelError::validation(
                "viewport width must be finite and >= 0",
            ));
        }
        if !height.is_finite() || height < 0.0 {
            return Err(ReelError::validation(
                "viewport height must be finite and >= 0",
            ));
        }
        Ok(Self { width, height })
    }

    /// A zero-width viewport cannot host any horizontal travel.
    pub fn is_degenerate(self) -> bool {
        self.width <= 0.0
    }
}

/// Visual transform of one animated element, relative to its laid-out box.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ElementTransform {
    /// Offset in CSS pixels.
    pub translate: Vec2,
    /// Uniform scale.
    pub scale: f64, // default 1
}

impl Default for ElementTransform {
    fn default() -> Self {
        Self {
            translate: Vec2::ZERO,
            scale: 1.0,
        }
    }
}

impl ElementTransform {
    /// Scale about the element's own origin, then translate.
    ///
    /// CSS applies `transform-origin` itself, so no anchor is folded in here.
    pub fn to_affine(self) -> Affine {
        Affine::translate(self.translate) * Affine::scale(self.scale)
    }

    /// Whether applying the transform is a no-op.
    pub fn is_identity(self) -> bool {
        self.translate == Vec2::ZERO && self.scale == 1.0
    }
}

/// Clamp a progress scalar into `[0, 1]`; NaN collapses to 0.
pub fn clamp01(t: f64) -> f64 {
    if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) }
}

/// Map `t` from `[a, b]` onto `[0, 1]`, clamped. A collapsed range is a step at `a`.
pub fn remap01(t: f64, a: f64, b: f64) -> f64 {
    let span = b - a;
    if span <= 0.0 {
        return if t >= a { 1.0 } else { 0.0 };
    }
    clamp01((t - a) / span)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
