use super::*;
use crate::foundation::error::ReelError;

#[test]
fn builder_collects_panels_in_order() {
    let cfg = ReelBuilder::new()
        .simple_panel("/images/cat1.jpg", "Collective Purr", ["Three heads."])
        .simple_panel(
            "/images/cat4.jpg",
            "Deep Cat Meditation",
            ["Mindful.", "Breathe."],
        )
        .scroll_distance(ScrollDistance::Travel)
        .ease(Ease::Linear)
        .build()
        .unwrap();

    assert_eq!(cfg.panel_count(), 2);
    assert_eq!(cfg.panels[0].title, "Collective Purr");
    assert_eq!(cfg.panels[1].body, vec!["Mindful.", "Breathe."]);
    assert_eq!(cfg.track.scroll_distance, ScrollDistance::Travel);
    assert_eq!(cfg.reveal.ease, Ease::Linear);
}

#[test]
fn build_runs_validation() {
    let err = ReelBuilder::new()
        .simple_panel("", "No image", Vec::<String>::new())
        .build()
        .unwrap_err();
    assert!(matches!(err, ReelError::Validation(_)));

    let err = ReelBuilder::new().scroll_scale(-1.0).build().unwrap_err();
    assert!(matches!(err, ReelError::Validation(_)));
}

#[test]
fn window_and_element_overrides_apply() {
    let text = ElementReveal {
        span: crate::animation::window::Span(0.5, 1.0),
        ..ElementReveal::text_default()
    };
    let cfg = ReelBuilder::new()
        .window(Anchor::CENTERED, Anchor::CENTERED)
        .text_reveal(text)
        .scrub(Scrub::Smoothed { lag_secs: 0.5 })
        .build()
        .unwrap();
    assert_eq!(cfg.reveal.start, Anchor::CENTERED);
    assert_eq!(cfg.reveal.text.span.0, 0.5);
    assert_eq!(cfg.track.scrub, Scrub::Smoothed { lag_secs: 0.5 });
}
