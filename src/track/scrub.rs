use crate::{composition::model::Scrub, foundation::core::clamp01};

/// Remaining gap below which a smoothed scrub snaps onto its target.
const SETTLE_EPSILON: f64 = 1e-4;

/// Applied track progress, optionally lagging behind the scroll-derived target.
///
/// Smoothing is an exponential approach with time constant `lag_secs / 3`, so roughly 95% of
/// any jump is covered after `lag_secs`. The applied value moves toward the target and never
/// past it, which keeps backward scrubbing an exact mirror of forward scrubbing once settled.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrubState {
    mode: Scrub,
    target: f64,
    current: f64,
}

impl ScrubState {
    /// Settled state at `initial` progress.
    pub fn new(mode: Scrub, initial: f64) -> Self {
        let initial = clamp01(initial);
        Self {
            mode,
            target: initial,
            current: initial,
        }
    }

    /// Whether the state needs animation frames to converge.
    pub fn is_smoothed(&self) -> bool {
        matches!(self.mode, Scrub::Smoothed { lag_secs } if lag_secs > 0.0)
    }

    /// Scroll-derived progress being chased.
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Progress currently applied to the page.
    pub fn current(&self) -> f64 {
        self.current
    }

    /// Record a new scroll-derived target. Immediate mode applies it at once.
    pub fn set_target(&mut self, target: f64) {
        self.target = clamp01(target);
        if !self.is_smoothed() {
            self.current = self.target;
        }
    }

    /// Advance the applied progress by `dt_secs` of wall time and return it.
    pub fn advance(&mut self, dt_secs: f64) -> f64 {
        let Scrub::Smoothed { lag_secs } = self.mode else {
            self.current = self.target;
            return self.current;
        };
        if lag_secs <= 0.0 || !dt_secs.is_finite() {
            self.current = self.target;
            return self.current;
        }

        let dt = dt_secs.max(0.0);
        let tau = lag_secs / 3.0;
        let alpha = 1.0 - (-dt / tau).exp();
        self.current += (self.target - self.current) * alpha;
        if (self.target - self.current).abs() < SETTLE_EPSILON {
            self.current = self.target;
        }
        self.current
    }

    /// Jump straight to the target (used on resize and initial mount).
    pub fn snap(&mut self) -> f64 {
        self.current = self.target;
        self.current
    }

    /// Whether the applied progress has reached the target.
    pub fn is_settled(&self) -> bool {
        self.current == self.target
    }
}

#[cfg(test)]
#[path = "../../tests/unit/track/scrub.rs"]
mod tests;
