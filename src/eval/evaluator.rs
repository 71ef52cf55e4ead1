use crate::{
    composition::model::ReelConfig,
    foundation::core::{Viewport, clamp01},
    foundation::error::{ReelError, ReelResult},
    reveal::animator::{PanelReveal, RevealAnimator},
    track::controller::{PinState, TrackController, TrackGeometry},
};

/// Upper bound on the frames a single [`Evaluator::sweep`] may produce.
pub const MAX_SWEEP_SAMPLES: u64 = 100_000;

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Everything the page needs to draw one scroll position.
pub struct EvaluatedFrame {
    /// Page scroll offset this frame was evaluated for.
    pub scroll_offset: f64,
    /// Pin state of the track at that offset.
    pub pin: PinState,
    /// Track progress applied to the track and panels (may lag the scroll when smoothed).
    pub track_progress: f64,
    /// Horizontal track translation in pixels.
    pub track_translate_px: f64,
    /// Pinned range geometry used for this frame.
    pub geometry: TrackGeometry,
    /// Per-panel reveal states in display order.
    pub panels: Vec<PanelReveal>,
}

/// Evaluates scroll offsets into frames.
///
/// Track progress is always computed before any panel state that depends on it.
#[derive(Clone, Debug)]
pub struct Evaluator {
    track: TrackController,
    reveal: RevealAnimator,
}

impl Evaluator {
    #[tracing::instrument(skip(config))]
    /// Validate `config` and measure the track for `viewport`.
    pub fn new(config: &ReelConfig, viewport: Viewport, pin_start: f64) -> ReelResult<Self> {
        config.validate()?;
        let n = config.panel_count();
        Ok(Self {
            track: TrackController::new(n, viewport, pin_start, config.track),
            reveal: RevealAnimator::new(n, config.reveal),
        })
    }

    /// Track controller (geometry and pin state).
    pub fn track(&self) -> &TrackController {
        &self.track
    }

    /// Per-panel reveal animator.
    pub fn reveal(&self) -> &RevealAnimator {
        &self.reveal
    }

    /// Re-measure after a viewport resize. Panel windows do not depend on pixel sizes.
    pub fn resize(&mut self, viewport: Viewport, pin_start: f64) {
        self.track.resize(viewport, pin_start);
    }

    /// Scroll-derived track progress for `scroll_offset`.
    pub fn target_progress(&self, scroll_offset: f64) -> f64 {
        self.track.progress(scroll_offset)
    }

    #[tracing::instrument(level = "trace", skip(self))]
    /// Evaluate with the track following the scroll position exactly.
    pub fn eval(&self, scroll_offset: f64) -> ReelResult<EvaluatedFrame> {
        check_offset(scroll_offset)?;
        let progress = self.track.progress(scroll_offset);
        Ok(self.frame(scroll_offset, progress))
    }

    #[tracing::instrument(level = "trace", skip(self))]
    /// Evaluate with an externally smoothed track progress.
    pub fn eval_scrubbed(
        &self,
        scroll_offset: f64,
        applied_progress: f64,
    ) -> ReelResult<EvaluatedFrame> {
        check_offset(scroll_offset)?;
        if applied_progress.is_nan() {
            return Err(ReelError::evaluation("applied track progress is NaN"));
        }
        let progress = if self.track.geometry().is_active() {
            clamp01(applied_progress)
        } else {
            0.0
        };
        Ok(self.frame(scroll_offset, progress))
    }

    /// Evaluate offsets from one `step` before the pinned range to one `step` past it.
    ///
    /// Fails with [`ReelError::Evaluation`] when `step` would produce more than
    /// [`MAX_SWEEP_SAMPLES`] frames.
    pub fn sweep(&self, step: f64) -> ReelResult<Vec<EvaluatedFrame>> {
        if !step.is_finite() || step <= 0.0 {
            return Err(ReelError::evaluation("sweep step must be finite and > 0"));
        }
        let g = self.track.geometry();
        let first = (g.pin_start - step).max(0.0);
        let last = g.pin_end() + step;
        let samples = ((last - first) / step).floor() + 1.0;
        if samples.is_nan() || samples > MAX_SWEEP_SAMPLES as f64 {
            return Err(ReelError::evaluation(format!(
                "sweep step {step} yields {samples} samples, limit is {MAX_SWEEP_SAMPLES}"
            )));
        }
        let count = samples as u64 - 1;
        (0..=count)
            .map(|i| self.eval(first + step * i as f64))
            .collect()
    }

    fn frame(&self, scroll_offset: f64, track_progress: f64) -> EvaluatedFrame {
        // Producer first: track state. Panels consume it.
        let track_translate_px = self.track.translation_px(track_progress);
        let pin = self.track.pin_state(scroll_offset);
        let panels = self.reveal.all(track_progress);
        EvaluatedFrame {
            scroll_offset,
            pin,
            track_progress,
            track_translate_px,
            geometry: *self.track.geometry(),
            panels,
        }
    }
}

fn check_offset(scroll_offset: f64) -> ReelResult<()> {
    if !scroll_offset.is_finite() {
        return Err(ReelError::evaluation("scroll offset must be finite"));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/eval/evaluator.rs"]
mod tests;
