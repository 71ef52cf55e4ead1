use crate::{
    composition::model::{ScrollDistance, TrackSettings},
    foundation::core::{Viewport, clamp01},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
/// Where the page scroll sits relative to the pinned range.
pub enum PinState {
    /// The track cannot travel (fewer than two panels or no viewport width); never pinned.
    Disabled,
    /// Scroll offset is above the pinned range; the track scrolls with the page.
    Before,
    /// Track is fixed to the viewport and vertical scroll drives horizontal travel.
    Pinned,
    /// Scroll offset is past the pinned range; the track scrolls away with the page.
    After,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
/// Derived geometry of the pinned range, recomputed on resize.
pub struct TrackGeometry {
    /// Number of panels on the track.
    pub panel_count: usize,
    /// Viewport used for the measurement.
    pub viewport: Viewport,
    /// Page scroll offset at which pinning starts (track top reaches viewport top).
    pub pin_start: f64,
    /// Length of the pinned scroll range in pixels; 0 when the controller is a no-op.
    pub scroll_length: f64,
    /// Total horizontal travel in pixels, `(N - 1) * viewport width`.
    pub travel_px: f64,
}

impl TrackGeometry {
    /// Page scroll offset at which pinning ends.
    pub fn pin_end(&self) -> f64 {
        self.pin_start + self.scroll_length
    }

    /// Height the pin spacer must occupy so the page can scroll through the pinned range.
    pub fn spacer_height(&self) -> f64 {
        self.viewport.height + self.scroll_length
    }

    /// Whether scrolling moves the track at all.
    pub fn is_active(&self) -> bool {
        self.scroll_length > 0.0 && self.travel_px > 0.0
    }
}

/// Maps vertical page scroll onto horizontal track travel.
#[derive(Clone, Debug)]
pub struct TrackController {
    settings: TrackSettings,
    geometry: TrackGeometry,
}

impl TrackController {
    #[tracing::instrument(skip(settings))]
    /// Build a controller for `panel_count` panels pinned at `pin_start`.
    pub fn new(
        panel_count: usize,
        viewport: Viewport,
        pin_start: f64,
        settings: TrackSettings,
    ) -> Self {
        let geometry = measure(panel_count, viewport, pin_start, &settings);
        Self { settings, geometry }
    }

    /// Recompute geometry after a viewport resize or layout shift.
    pub fn resize(&mut self, viewport: Viewport, pin_start: f64) {
        self.geometry = measure(self.geometry.panel_count, viewport, pin_start, &self.settings);
        tracing::debug!(
            width = viewport.width,
            scroll_length = self.geometry.scroll_length,
            travel_px = self.geometry.travel_px,
            "track geometry recomputed"
        );
    }

    /// Geometry of the last measurement.
    pub fn geometry(&self) -> &TrackGeometry {
        &self.geometry
    }

    /// Settings the controller was built with.
    pub fn settings(&self) -> &TrackSettings {
        &self.settings
    }

    /// Track progress in `[0, 1]`, linear in scroll offset across the pinned range.
    pub fn progress(&self, scroll_offset: f64) -> f64 {
        let g = &self.geometry;
        if !g.is_active() {
            return 0.0;
        }
        clamp01((scroll_offset - g.pin_start) / g.scroll_length)
    }

    /// Horizontal track translation in pixels (`0` to `-travel_px`).
    pub fn translation_px(&self, progress: f64) -> f64 {
        -self.geometry.travel_px * clamp01(progress)
    }

    /// Pin state at `scroll_offset`; the range end is exclusive.
    pub fn pin_state(&self, scroll_offset: f64) -> PinState {
        let g = &self.geometry;
        if !g.is_active() {
            PinState::Disabled
        } else if scroll_offset < g.pin_start {
            PinState::Before
        } else if scroll_offset >= g.pin_end() {
            PinState::After
        } else {
            PinState::Pinned
        }
    }
}

fn measure(
    panel_count: usize,
    viewport: Viewport,
    pin_start: f64,
    settings: &TrackSettings,
) -> TrackGeometry {
    let pin_start = if pin_start.is_finite() { pin_start } else { 0.0 };
    if panel_count <= 1 || viewport.is_degenerate() {
        return TrackGeometry {
            panel_count,
            viewport,
            pin_start,
            scroll_length: 0.0,
            travel_px: 0.0,
        };
    }

    let travel_panels = (panel_count - 1) as f64;
    let range_panels = match settings.scroll_distance {
        ScrollDistance::Panels => panel_count as f64,
        ScrollDistance::Travel => travel_panels,
    };
    TrackGeometry {
        panel_count,
        viewport,
        pin_start,
        scroll_length: range_panels * viewport.width * settings.scroll_scale,
        travel_px: travel_panels * viewport.width,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/track/controller.rs"]
mod tests;
