use super::*;

fn viewport(width: f64) -> Viewport {
    Viewport::new(width, 800.0).unwrap()
}

fn travel_settings() -> TrackSettings {
    TrackSettings {
        scroll_distance: ScrollDistance::Travel,
        ..TrackSettings::default()
    }
}

#[test]
fn default_range_is_one_viewport_per_panel() {
    let c = TrackController::new(5, viewport(1000.0), 0.0, TrackSettings::default());
    let g = c.geometry();
    assert_eq!(g.scroll_length, 5000.0);
    assert_eq!(g.travel_px, 4000.0);
    assert_eq!(g.spacer_height(), 5800.0);
    assert_eq!(c.translation_px(c.progress(5000.0)), -4000.0);
}

#[test]
fn translation_is_linear_and_monotonic_across_range() {
    let c = TrackController::new(5, viewport(1000.0), 0.0, travel_settings());
    assert_eq!(c.translation_px(c.progress(0.0)), 0.0);
    assert_eq!(c.translation_px(c.progress(4000.0)), -4000.0);

    let mut prev = f64::INFINITY;
    for offset in (0..=4000).step_by(125) {
        let offset = f64::from(offset);
        let x = c.translation_px(c.progress(offset));
        assert!((x + offset).abs() < 1e-9, "offset {offset} -> {x}");
        assert!(x <= prev);
        prev = x;
    }
}

#[test]
fn progress_clamps_outside_pinned_range() {
    let c = TrackController::new(3, viewport(500.0), 300.0, TrackSettings::default());
    assert_eq!(c.progress(0.0), 0.0);
    assert_eq!(c.progress(300.0), 0.0);
    assert_eq!(c.progress(300.0 + 750.0), 0.5);
    assert_eq!(c.progress(10_000.0), 1.0);
}

#[test]
fn pin_state_tracks_range_edges() {
    let c = TrackController::new(3, viewport(500.0), 300.0, TrackSettings::default());
    assert_eq!(c.pin_state(299.0), PinState::Before);
    assert_eq!(c.pin_state(300.0), PinState::Pinned);
    assert_eq!(c.pin_state(1799.0), PinState::Pinned);
    assert_eq!(c.pin_state(1800.0), PinState::After);
}

#[test]
fn single_or_no_panel_is_a_no_op() {
    for count in [0, 1] {
        let c = TrackController::new(count, viewport(1000.0), 0.0, TrackSettings::default());
        assert!(!c.geometry().is_active());
        assert_eq!(c.geometry().scroll_length, 0.0);
        for offset in [0.0, 500.0, 1e6] {
            let p = c.progress(offset);
            assert_eq!(p, 0.0);
            assert!(p.is_finite());
            assert_eq!(c.translation_px(p), 0.0);
            assert_eq!(c.pin_state(offset), PinState::Disabled);
        }
    }
}

#[test]
fn zero_width_viewport_is_a_no_op() {
    let c = TrackController::new(5, viewport(0.0), 0.0, TrackSettings::default());
    assert_eq!(c.pin_state(10.0), PinState::Disabled);
    assert_eq!(c.progress(10.0), 0.0);
}

#[test]
fn resize_recomputes_length_and_travel() {
    let mut c = TrackController::new(5, viewport(1000.0), 0.0, travel_settings());
    assert_eq!(c.progress(2000.0), 0.5);

    c.resize(viewport(500.0), 100.0);
    assert_eq!(c.geometry().scroll_length, 2000.0);
    assert_eq!(c.geometry().travel_px, 2000.0);
    assert_eq!(c.geometry().pin_start, 100.0);
    assert_eq!(c.progress(1100.0), 0.5);
}

#[test]
fn scroll_scale_stretches_range_without_changing_travel() {
    let settings = TrackSettings {
        scroll_scale: 2.0,
        ..travel_settings()
    };
    let c = TrackController::new(5, viewport(1000.0), 0.0, settings);
    assert_eq!(c.geometry().scroll_length, 8000.0);
    assert_eq!(c.geometry().travel_px, 4000.0);
    assert_eq!(c.translation_px(c.progress(4000.0)), -2000.0);
}
