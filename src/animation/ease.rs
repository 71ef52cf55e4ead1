/// Easing curve applied to a normalized progress value.
///
/// Every curve maps `0 -> 0` and `1 -> 1`. All curves except [`Ease::OutBack`] are monotonic
/// on `[0, 1]`; `OutBack` overshoots past 1 before settling.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Ease {
    /// Identity curve ("ease: none").
    Linear,
    /// Quadratic ease-in.
    InQuad,
    /// Quadratic ease-out; the reveal default.
    #[default]
    OutQuad,
    /// Quadratic ease-in-out.
    InOutQuad,
    /// Cubic ease-in.
    InCubic,
    /// Cubic ease-out.
    OutCubic,
    /// Cubic ease-in-out.
    InOutCubic,
    /// Ease-out with a small overshoot (back easing, overshoot constant 1.70158).
    OutBack,
}

const BACK_OVERSHOOT: f64 = 1.701_58;

impl Ease {
    /// Apply the curve. Input is clamped to `[0, 1]` first.
    pub fn apply(self, t: f64) -> f64 {
        let t = crate::foundation::core::clamp01(t);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
            Self::OutBack => {
                let c3 = BACK_OVERSHOOT + 1.0;
                let u = t - 1.0;
                1.0 + c3 * u.powi(3) + BACK_OVERSHOOT * u.powi(2)
            }
        }
    }

    /// Whether the curve stays within `[0, 1]` and never decreases.
    pub fn is_monotonic(self) -> bool {
        !matches!(self, Self::OutBack)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
