use super::*;
use crate::{
    composition::dsl::ReelBuilder,
    composition::model::{ScrollDistance, Scrub},
    foundation::core::Viewport,
    host::memory::{ElementId, MemoryHost},
    session::host::PanelElements,
    track::controller::PinState,
};

fn config(panels: usize, scrub: Scrub) -> ReelConfig {
    let mut b = ReelBuilder::new()
        .scroll_distance(ScrollDistance::Travel)
        .scrub(scrub);
    for i in 0..panels {
        b = b.simple_panel(format!("/images/{i}.jpg"), format!("Panel {i}"), ["body"]);
    }
    b.build().unwrap()
}

fn session(panels: usize, scrub: Scrub) -> (AnimationSession<MemoryHost>, ReelElements<ElementId>) {
    let mut host = MemoryHost::new(Viewport::new(1000.0, 800.0).unwrap());
    let elements = host.reel_elements(panels);
    let s = AnimationSession::new(config(panels, scrub), elements.clone(), host).unwrap();
    (s, elements)
}

fn scroll(s: &mut AnimationSession<MemoryHost>, offset: f64) {
    s.host_mut().scroll_to(offset);
    s.handle(HostEvent::Scroll).unwrap();
}

#[test]
fn start_binds_listeners_and_paints_first_frame() {
    let (mut s, els) = session(5, Scrub::Immediate);
    assert_eq!(s.state(), SessionState::Created);
    assert!(s.host().is_pristine());

    s.start().unwrap();
    assert_eq!(s.state(), SessionState::Running);
    assert_eq!(s.host().listener_count(), 2);
    assert!(!s.host().is_bound(EventKind::Frame));
    assert_eq!(
        s.host().style(els.track, "transform"),
        Some("translate3d(0px, 0px, 0px)")
    );
    assert_eq!(s.host().style(els.spacer.unwrap(), "height"), Some("4800px"));

    // Second start is a no-op.
    s.start().unwrap();
    assert_eq!(s.host().listener_count(), 2);
}

#[test]
fn scrolling_drives_track_and_last_panel() {
    let (mut s, els) = session(5, Scrub::Immediate);
    s.start().unwrap();

    scroll(&mut s, 2000.0);
    assert_eq!(
        s.host().style(els.track, "transform"),
        Some("translate3d(-2000px, 0px, 0px)")
    );
    assert_eq!(s.host().style(els.track, "position"), Some("fixed"));
    let last_image = els.panels[4].image.unwrap();
    assert_eq!(s.host().style(last_image, "opacity"), Some("0"));

    scroll(&mut s, 4000.0);
    assert_eq!(s.host().style(last_image, "opacity"), Some("1"));
    let frame = s.last_frame().unwrap();
    assert_eq!(frame.pin, PinState::After);
    assert_eq!(frame.panels[0].progress, 1.0);

    // Backward scrub restores the earlier state exactly.
    scroll(&mut s, 2000.0);
    assert_eq!(s.host().style(last_image, "opacity"), Some("0"));
    assert_eq!(s.host().style(els.track, "position"), Some("fixed"));
}

#[test]
fn unchanged_declarations_are_not_rewritten() {
    let (mut s, _) = session(5, Scrub::Immediate);
    s.start().unwrap();
    scroll(&mut s, 1000.0);
    let writes = s.host().write_count();
    scroll(&mut s, 1000.0);
    assert_eq!(s.host().write_count(), writes);
}

#[test]
fn dispose_unbinds_reverts_and_is_idempotent() {
    let (mut s, els) = session(5, Scrub::Immediate);
    s.start().unwrap();
    scroll(&mut s, 3000.0);
    assert!(!s.host().is_pristine());

    s.dispose();
    assert_eq!(s.state(), SessionState::Disposed);
    assert_eq!(s.host().listener_count(), 0);
    assert!(s.host().is_pristine());
    assert!(s.last_frame().is_none());

    // Scrolling after unmount neither errors nor touches elements.
    let writes = s.host().write_count();
    for el in [els.track, els.panels[2].image.unwrap()] {
        s.host_mut().detach(el);
    }
    scroll(&mut s, 3500.0);
    s.handle(HostEvent::Resize).unwrap();
    s.handle(HostEvent::Frame { dt_secs: 0.016 }).unwrap();
    assert_eq!(s.host().write_count(), writes);
    assert_eq!(s.host().detached_write_count(), 0);

    s.dispose();
    assert!(matches!(s.start(), Err(ReelError::Session(_))));
}

#[test]
fn resize_remeasures_geometry() {
    let (mut s, els) = session(5, Scrub::Immediate);
    s.start().unwrap();
    scroll(&mut s, 1000.0);

    s.host_mut().resize(Viewport::new(500.0, 400.0).unwrap());
    s.handle(HostEvent::Resize).unwrap();
    // 1000px into a 2000px range is halfway across 2000px of travel.
    assert_eq!(
        s.host().style(els.track, "transform"),
        Some("translate3d(-1000px, 0px, 0px)")
    );
    assert_eq!(s.host().style(els.spacer.unwrap(), "height"), Some("2400px"));
}

#[test]
fn pin_start_follows_spacer_offset() {
    let mut host = MemoryHost::new(Viewport::new(1000.0, 800.0).unwrap());
    let els = host.reel_elements(5);
    host.set_page_top(els.spacer.unwrap(), 600.0);
    let mut s = AnimationSession::new(config(5, Scrub::Immediate), els.clone(), host).unwrap();
    s.start().unwrap();

    scroll(&mut s, 300.0);
    assert_eq!(s.host().style(els.track, "position"), Some("relative"));
    scroll(&mut s, 2600.0);
    assert_eq!(
        s.host().style(els.track, "transform"),
        Some("translate3d(-2000px, 0px, 0px)")
    );
}

#[test]
fn smoothed_scrub_catches_up_on_frames() {
    let (mut s, els) = session(5, Scrub::Smoothed { lag_secs: 1.0 });
    s.start().unwrap();
    assert!(s.host().is_bound(EventKind::Frame));
    assert_eq!(s.host().listener_count(), 3);

    scroll(&mut s, 4000.0);
    // Pin state follows the scroll at once; travel lags behind.
    assert_eq!(s.last_frame().unwrap().pin, PinState::After);
    assert_eq!(s.last_frame().unwrap().track_progress, 0.0);

    let mut prev = 0.0;
    for _ in 0..30 {
        s.handle(HostEvent::Frame { dt_secs: 1.0 / 60.0 }).unwrap();
        let p = s.last_frame().unwrap().track_progress;
        assert!(p >= prev);
        prev = p;
    }
    assert!(prev > 0.5 && prev < 1.0);

    for _ in 0..600 {
        s.handle(HostEvent::Frame { dt_secs: 1.0 / 60.0 }).unwrap();
    }
    assert_eq!(
        s.host().style(els.track, "transform"),
        Some("translate3d(-4000px, 0px, 0px)")
    );
}

#[test]
fn missing_children_are_skipped() {
    let mut host = MemoryHost::new(Viewport::new(1000.0, 800.0).unwrap());
    let mut els = host.reel_elements(3);
    els.panels[1] = PanelElements {
        image: None,
        text: els.panels[1].text,
    };
    els.panels.truncate(2);
    let mut s = AnimationSession::new(config(3, Scrub::Immediate), els.clone(), host).unwrap();
    s.start().unwrap();
    scroll(&mut s, 1500.0);

    assert!(s.host().style(els.panels[1].text.unwrap(), "opacity").is_some());
    assert!(s.host().style(els.panels[0].image.unwrap(), "opacity").is_some());
    assert_eq!(s.last_frame().unwrap().panels.len(), 3);
}

#[test]
fn failed_bind_rolls_back_earlier_listeners() {
    let mut host = MemoryHost::new(Viewport::new(1000.0, 800.0).unwrap());
    let els = host.reel_elements(2);
    host.fail_bind_on(EventKind::Resize);
    let mut s = AnimationSession::new(config(2, Scrub::Immediate), els, host).unwrap();
    assert!(matches!(s.start(), Err(ReelError::Host(_))));
    assert_eq!(s.host().listener_count(), 0);
    assert_eq!(s.state(), SessionState::Created);
    assert!(s.host().is_pristine());
}

#[test]
fn invalid_config_is_rejected_at_construction() {
    let mut host = MemoryHost::new(Viewport::new(1000.0, 800.0).unwrap());
    let els = host.reel_elements(1);
    let mut cfg = config(1, Scrub::Immediate);
    cfg.track.scroll_scale = f64::NAN;
    assert!(AnimationSession::new(cfg, els, host).is_err());
}

#[test]
fn resize_while_pinned_keeps_pin_start_without_spacer() {
    let mut host = MemoryHost::new(Viewport::new(1000.0, 800.0).unwrap());
    let mut els = host.reel_elements(5);
    els.spacer = None;
    host.set_page_top(els.track, 600.0);
    let mut s = AnimationSession::new(config(5, Scrub::Immediate), els.clone(), host).unwrap();
    s.start().unwrap();

    scroll(&mut s, 2600.0);
    assert_eq!(s.host().style(els.track, "position"), Some("fixed"));
    s.host_mut().resize(Viewport::new(1000.0, 600.0).unwrap());
    s.handle(HostEvent::Resize).unwrap();
    assert_eq!(s.evaluator().track().geometry().pin_start, 600.0);
    assert_eq!(
        s.host().style(els.track, "transform"),
        Some("translate3d(-2000px, 0px, 0px)")
    );

    // Parked after the range the track is offset by `top`; still not a new flow position.
    scroll(&mut s, 5000.0);
    assert_eq!(s.last_frame().unwrap().pin, PinState::After);
    s.handle(HostEvent::Resize).unwrap();
    assert_eq!(s.evaluator().track().geometry().pin_start, 600.0);
    assert_eq!(
        s.host().style(els.track, "transform"),
        Some("translate3d(-4000px, 0px, 0px)")
    );

    // Back in flow, a moved track is measured again.
    scroll(&mut s, 0.0);
    assert_eq!(s.last_frame().unwrap().pin, PinState::Before);
    s.host_mut().set_page_top(els.track, 900.0);
    s.handle(HostEvent::Resize).unwrap();
    assert_eq!(s.evaluator().track().geometry().pin_start, 900.0);
}

#[test]
fn failed_writes_are_retried_on_the_next_frame() {
    let mut host = MemoryHost::new(Viewport::new(1000.0, 800.0).unwrap());
    let els = host.reel_elements(5);
    let first_image = els.panels[0].image.unwrap();
    host.detach(first_image);
    let mut s = AnimationSession::new(config(5, Scrub::Immediate), els.clone(), host).unwrap();
    s.start().unwrap();
    assert_eq!(s.host().style(first_image, "opacity"), None);

    // Panel 0 is fully revealed at rest, so its declarations do not change on scroll.
    s.host_mut().reattach(first_image);
    scroll(&mut s, 10.0);
    assert_eq!(s.host().style(first_image, "opacity"), Some("1"));

    s.dispose();
    assert!(s.host().is_pristine());
}

#[test]
fn frames_are_requested_only_while_catching_up() {
    let (mut s, els) = session(5, Scrub::Smoothed { lag_secs: 1.0 });
    s.start().unwrap();
    assert!(!s.host_mut().take_frame_request());

    scroll(&mut s, 4000.0);
    let mut frames = 0;
    while s.host_mut().take_frame_request() {
        s.handle(HostEvent::Frame { dt_secs: 1.0 / 60.0 }).unwrap();
        frames += 1;
        assert!(frames < 10_000, "scrub never settled");
    }
    assert!(frames > 1);
    assert_eq!(
        s.host().style(els.track, "transform"),
        Some("translate3d(-4000px, 0px, 0px)")
    );

    // Settled: the same scroll position asks for nothing.
    let requested = s.host().frame_request_count();
    scroll(&mut s, 4000.0);
    assert_eq!(s.host().frame_request_count(), requested);
    assert!(!s.host_mut().take_frame_request());
}

#[test]
fn immediate_scrub_never_requests_frames() {
    let (mut s, _) = session(5, Scrub::Immediate);
    s.start().unwrap();
    scroll(&mut s, 2500.0);
    assert_eq!(s.host().frame_request_count(), 0);
}
