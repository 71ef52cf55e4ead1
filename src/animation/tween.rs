use crate::{
    animation::ease::Ease,
    foundation::core::{ElementTransform, Vec2},
    foundation::error::{ReelError, ReelResult},
};

/// Linear interpolation between two values of the same type.
pub trait Lerp: Sized {
    /// Value at `t` between `a` (`t = 0`) and `b` (`t = 1`).
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        (1.0 - t) * a + t * b
    }
}

impl Lerp for Vec2 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Vec2::new(
            <f64 as Lerp>::lerp(&a.x, &b.x, t),
            <f64 as Lerp>::lerp(&a.y, &b.y, t),
        )
    }
}

impl Lerp for ElementTransform {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Self {
            translate: <Vec2 as Lerp>::lerp(&a.translate, &b.translate, t),
            scale: <f64 as Lerp>::lerp(&a.scale, &b.scale, t),
        }
    }
}

/// A `start -> end` pair sampled by an eased progress. Serialized as `[start, end]`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Tween<T>(pub T, pub T);

impl<T> Tween<T>
where
    T: Lerp + Clone,
{
    /// Tween from `start` to `end`.
    pub fn new(start: T, end: T) -> Self {
        Self(start, end)
    }

    /// Tween that holds `value` throughout.
    pub fn constant(value: T) -> Self {
        Self(value.clone(), value)
    }

    /// Value at progress 0.
    pub fn start(&self) -> &T {
        &self.0
    }

    /// Value at progress 1.
    pub fn end(&self) -> &T {
        &self.1
    }

    /// Sample at raw progress `t` (clamped), shaped by `ease`.
    ///
    /// The same `t` always yields the same value, so scrubbing backward retraces forward
    /// motion exactly.
    pub fn sample(&self, t: f64, ease: Ease) -> T {
        T::lerp(&self.0, &self.1, ease.apply(t))
    }
}

impl Tween<f64> {
    /// Reject non-finite endpoints; `name` prefixes the error message.
    pub fn validate(&self, name: &str) -> ReelResult<()> {
        if !self.0.is_finite() || !self.1.is_finite() {
            return Err(ReelError::animation(format!(
                "{name} tween endpoints must be finite"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/tween.rs"]
mod tests;
