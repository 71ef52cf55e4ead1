use crate::{
    animation::window::ActivationWindow,
    composition::model::{ElementReveal, RevealSpec},
    foundation::core::{ElementTransform, Vec2, clamp01},
};

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
/// Interpolated visual state of one element at a given panel progress.
pub struct ElementState {
    /// Element-local progress after applying the element's span.
    pub progress: f64,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Scale and vertical offset relative to the laid-out box.
    pub transform: ElementTransform,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
/// Reveal state of one panel for a given track progress.
pub struct PanelReveal {
    /// Panel position in display order.
    pub index: usize,
    /// Activation window in track-progress terms.
    pub window: ActivationWindow,
    /// Panel progress in `[0, 1]`.
    pub progress: f64,
    /// Image element state.
    pub image: ElementState,
    /// Text block state.
    pub text: ElementState,
}

/// Maps track progress to each panel's entrance animation.
///
/// Windows are resolved once per panel count; sampling is pure, so the same track progress
/// always yields the same states regardless of scroll direction.
#[derive(Clone, Debug)]
pub struct RevealAnimator {
    spec: RevealSpec,
    windows: Vec<ActivationWindow>,
}

impl RevealAnimator {
    /// Resolve one activation window per panel.
    pub fn new(panel_count: usize, spec: RevealSpec) -> Self {
        let windows = (0..panel_count)
            .map(|i| ActivationWindow::for_panel(i, panel_count, spec.start, spec.end))
            .collect();
        Self { spec, windows }
    }

    /// Number of panels.
    pub fn panel_count(&self) -> usize {
        self.windows.len()
    }

    /// Activation windows in display order.
    pub fn windows(&self) -> &[ActivationWindow] {
        &self.windows
    }

    /// Reveal state of panel `index`, or `None` when out of range.
    pub fn panel(&self, index: usize, track_progress: f64) -> Option<PanelReveal> {
        let window = *self.windows.get(index)?;
        let progress = window.progress_at(track_progress);
        Some(PanelReveal {
            index,
            window,
            progress,
            image: sample_element(&self.spec.image, progress, &self.spec),
            text: sample_element(&self.spec.text, progress, &self.spec),
        })
    }

    /// Reveal states for every panel, in display order.
    pub fn all(&self, track_progress: f64) -> Vec<PanelReveal> {
        (0..self.windows.len())
            .filter_map(|i| self.panel(i, track_progress))
            .collect()
    }
}

fn sample_element(el: &ElementReveal, panel_progress: f64, spec: &RevealSpec) -> ElementState {
    let t = el.span.local(panel_progress);
    ElementState {
        progress: t,
        opacity: clamp01(el.opacity.sample(t, spec.ease)),
        transform: ElementTransform {
            translate: Vec2::new(0.0, el.translate_y.sample(t, spec.ease)),
            scale: el.scale.sample(t, spec.ease).max(0.0),
        },
    }
}

#[cfg(test)]
#[path = "../../tests/unit/reveal/animator.rs"]
mod tests;
