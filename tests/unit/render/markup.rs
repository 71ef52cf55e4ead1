use super::*;
use crate::composition::dsl::ReelBuilder;

fn cats() -> ReelConfig {
    ReelConfig::from_json_str(include_str!("../../data/cats.json")).unwrap()
}

#[test]
fn cat_panels_render_content_in_order() {
    let cfg = cats();
    let html = reel_markup(&cfg);
    assert!(html.starts_with("<div class=\"horizontal-scroll-wrapper\">"));

    let mut cursor = 0;
    let mut expect_next = |needle: String| {
        let at = html[cursor..]
            .find(&needle)
            .unwrap_or_else(|| panic!("{needle} missing after byte {cursor}"));
        cursor += at + needle.len();
    };
    for panel in &cfg.panels {
        expect_next(format!("<section class=\"{PANEL_CLASS}\">"));
        expect_next(format!("src=\"{}\"", html_escape(&panel.image)));
        expect_next(format!("alt=\"{}\"", html_escape(&panel.alt)));
        expect_next(format!("<h2>{}</h2>", html_escape(&panel.title)));
        for line in &panel.body {
            expect_next(format!("<p>{}</p>", html_escape(line)));
        }
    }
}

#[test]
fn one_paragraph_per_body_line() {
    let cfg = cats();
    let html = panels_markup(&cfg);
    let sections: Vec<&str> = html.split("<section").skip(1).collect();
    assert_eq!(sections.len(), 5);
    let counts: Vec<usize> = sections.iter().map(|s| s.matches("<p>").count()).collect();
    assert_eq!(counts, vec![2, 3, 1, 2, 2]);
    for s in &sections {
        assert_eq!(s.matches(&format!("class=\"{IMAGE_CLASS}\"")).count(), 1);
        assert_eq!(s.matches(&format!("class=\"{TEXT_CLASS}\"")).count(), 1);
    }
}

#[test]
fn content_is_escaped() {
    let html = panel_markup(&PanelDescriptor {
        image: "/a.jpg\" onerror=\"x".to_string(),
        alt: "A & B".to_string(),
        title: "Tom & Jerry".to_string(),
        body: vec!["<b>bold</b> & more".to_string()],
    });
    assert!(html.contains("&lt;b&gt;bold&lt;"));
    assert!(html.contains("&amp; more"));
    assert!(html.contains("alt=\"A &amp; B\""));
    assert!(html.contains("<h2>Tom &amp; Jerry</h2>"));
    assert!(!html.contains("\" onerror=\""));
}

#[test]
fn panel_without_body_has_only_a_heading() {
    let cfg = ReelBuilder::new()
        .simple_panel("/only.jpg", "Only", Vec::<String>::new())
        .build()
        .unwrap();
    let html = panel_markup(&cfg.panels[0]);
    assert!(html.contains("<h2>Only</h2>"));
    assert!(!html.contains("<p>"));
}
