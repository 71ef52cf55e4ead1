use crate::composition::model::{PanelDescriptor, ReelConfig};

/// Class of the track container.
pub const TRACK_CLASS: &str = "horizontal-scroll-wrapper";
/// Class of each panel section.
pub const PANEL_CLASS: &str = "panel";
/// Class of the image that zooms in.
pub const IMAGE_CLASS: &str = "phone-img";
/// Class of the text block that rises in.
pub const TEXT_CLASS: &str = "text-content";

fn html_escape(value: &str) -> String {
    v_htmlescape::escape(value).to_string()
}

/// Markup of one panel: image and text block side by side.
pub fn panel_markup(panel: &PanelDescriptor) -> String {
    let mut html = String::new();
    html.push_str(&format!("<section class=\"{PANEL_CLASS}\">\n"));
    html.push_str("  <div class=\"panel-content\">\n");
    html.push_str(&format!(
        "    <img src=\"{}\" class=\"{IMAGE_CLASS}\" alt=\"{}\" />\n",
        html_escape(&panel.image),
        html_escape(&panel.alt)
    ));
    html.push_str(&format!("    <div class=\"{TEXT_CLASS}\">\n"));
    html.push_str(&format!("      <h2>{}</h2>\n", html_escape(&panel.title)));
    for paragraph in &panel.body {
        html.push_str(&format!("      <p>{}</p>\n", html_escape(paragraph)));
    }
    html.push_str("    </div>\n");
    html.push_str("  </div>\n");
    html.push_str("</section>\n");
    html
}

/// Inner markup of the track: every configured panel, in display order.
pub fn panels_markup(config: &ReelConfig) -> String {
    config.panels.iter().map(panel_markup).collect()
}

/// Full track element with its panels, ready to drop into a page body.
pub fn reel_markup(config: &ReelConfig) -> String {
    format!(
        "<div class=\"{TRACK_CLASS}\">\n{}</div>\n",
        panels_markup(config)
    )
}

#[cfg(test)]
#[path = "../../tests/unit/render/markup.rs"]
mod tests;
