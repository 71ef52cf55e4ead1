use crate::{
    foundation::core::remap01,
    foundation::error::{ReelError, ReelResult},
};

/// Alignment point between a panel and the viewport.
///
/// The anchor is reached when the point at `panel` (fraction of the panel width, 0 = left edge)
/// lines up with the point at `viewport` (fraction of the viewport width).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Anchor {
    /// Fraction of the panel width, `0` = left edge.
    pub panel: f64,
    /// Fraction of the viewport width, `0` = left edge.
    pub viewport: f64,
}

impl Anchor {
    /// Panel's left edge touches the viewport's right edge ("left right").
    pub const ENTERING: Self = Self {
        panel: 0.0,
        viewport: 1.0,
    };
    /// Panel center at viewport center ("center center").
    pub const CENTERED: Self = Self {
        panel: 0.5,
        viewport: 0.5,
    };

    /// Build a validated anchor.
    pub fn new(panel: f64, viewport: f64) -> ReelResult<Self> {
        let a = Self { panel, viewport };
        a.validate()?;
        Ok(a)
    }

    /// Both fractions must lie within `[0, 1]`.
    pub fn validate(&self) -> ReelResult<()> {
        for (name, v) in [("panel", self.panel), ("viewport", self.viewport)] {
            if !v.is_finite() || !(0.0..=1.0).contains(&v) {
                return Err(ReelError::validation(format!(
                    "anchor {name} fraction must be within [0, 1]"
                )));
            }
        }
        Ok(())
    }

    /// Track progress at which this anchor is reached for panel `index` of `count`.
    ///
    /// Panels are one viewport wide, so the track has travelled `index + panel - viewport`
    /// panel widths at that moment. Returns `None` when the track cannot travel
    /// (`count <= 1`).
    pub fn track_progress(self, index: usize, count: usize) -> Option<f64> {
        if count <= 1 {
            return None;
        }
        let travel_panels = (count - 1) as f64;
        Some((index as f64 + self.panel - self.viewport) / travel_panels)
    }
}

/// Range of track progress over which one panel's reveal is interpolated.
///
/// Bounds may fall outside `[0, 1]`: a window entirely below 0 is complete before the track
/// starts moving.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ActivationWindow {
    /// Track progress at which the reveal starts.
    pub start: f64,
    /// Track progress at which the reveal completes.
    pub end: f64,
}

impl ActivationWindow {
    /// Window for panel `index` of `count` between two anchors.
    ///
    /// Without travel (`count <= 1`) the single panel is treated as already revealed.
    pub fn for_panel(index: usize, count: usize, start: Anchor, end: Anchor) -> Self {
        match (
            start.track_progress(index, count),
            end.track_progress(index, count),
        ) {
            (Some(a), Some(b)) => Self {
                start: a.min(b),
                end: a.max(b),
            },
            _ => Self::REVEALED,
        }
    }

    /// A window that is complete at any track progress.
    pub const REVEALED: Self = Self {
        start: f64::NEG_INFINITY,
        end: f64::NEG_INFINITY,
    };

    /// Local progress in `[0, 1]`: 0 before `start`, 1 at or after `end`, linear between.
    pub fn progress_at(&self, track_progress: f64) -> f64 {
        if self.end == f64::NEG_INFINITY {
            return 1.0;
        }
        remap01(track_progress, self.start, self.end)
    }

    /// Width of the window in track progress.
    pub fn len(&self) -> f64 {
        (self.end - self.start).max(0.0)
    }
}

/// Sub-range `[a, b]` of a panel's local progress used by one element.
///
/// Lets the text start later than the image while both share the panel's driving progress.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Span(pub f64, pub f64);

impl Span {
    /// The whole panel window.
    pub const FULL: Self = Self(0.0, 1.0);

    /// Require `0 <= a <= b <= 1`.
    pub fn validate(&self, name: &str) -> ReelResult<()> {
        let Self(a, b) = *self;
        if !(a.is_finite() && b.is_finite() && 0.0 <= a && a <= b && b <= 1.0) {
            return Err(ReelError::validation(format!(
                "{name} span must satisfy 0 <= a <= b <= 1"
            )));
        }
        Ok(())
    }

    /// Element-local progress for panel progress `t`.
    pub fn local(&self, t: f64) -> f64 {
        remap01(t, self.0, self.1)
    }
}

impl Default for Span {
    fn default() -> Self {
        Self::FULL
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/window.rs"]
mod tests;
