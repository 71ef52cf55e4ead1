use std::path::Path;

use crate::{
    animation::ease::Ease,
    animation::tween::Tween,
    animation::window::{Anchor, Span},
    foundation::error::{ReelError, ReelResult},
};

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// Complete page configuration for one scroll reel.
///
/// A config is a pure data model that can be:
/// - built programmatically (see [`crate::ReelBuilder`])
/// - serialized/deserialized via Serde (JSON)
///
/// Only `panels` is required in JSON; every other section falls back to the canonical
/// timing policy.
pub struct ReelConfig {
    /// Ordered panels; display order is array order.
    pub panels: Vec<PanelDescriptor>,
    /// Horizontal track behavior.
    #[serde(default)]
    pub track: TrackSettings,
    /// Per-panel entrance animation.
    #[serde(default)]
    pub reveal: RevealSpec,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Static content of one panel.
pub struct PanelDescriptor {
    /// Image URI, used verbatim as the `src` of the panel image.
    pub image: String,
    /// Image alternative text.
    #[serde(default)]
    pub alt: String,
    /// Panel heading.
    pub title: String,
    /// Body paragraphs, in order.
    #[serde(default)]
    pub body: Vec<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Settings for the horizontal track controller.
pub struct TrackSettings {
    /// How the pinned scroll range length is derived from the panel count.
    #[serde(default)]
    pub scroll_distance: ScrollDistance,
    /// Multiplier applied to the derived scroll range length.
    #[serde(default = "default_scroll_scale")]
    pub scroll_scale: f64,
    /// How closely the applied progress follows the scroll position.
    #[serde(default)]
    pub scrub: Scrub,
}

impl Default for TrackSettings {
    fn default() -> Self {
        Self {
            scroll_distance: ScrollDistance::default(),
            scroll_scale: default_scroll_scale(),
            scrub: Scrub::default(),
        }
    }
}

fn default_scroll_scale() -> f64 {
    1.0
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Pinned scroll range length, in viewport widths.
pub enum ScrollDistance {
    /// `N` viewport widths for `N` panels.
    #[default]
    Panels,
    /// `N - 1` viewport widths: one pixel of scroll per pixel of horizontal travel.
    Travel,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Scrub coupling between scroll position and applied progress.
pub enum Scrub {
    /// Applied progress equals scroll-derived progress.
    #[default]
    Immediate,
    /// Applied progress chases the scroll-derived progress and catches up in about
    /// `lag_secs`.
    Smoothed {
        /// Catch-up time in seconds.
        lag_secs: f64,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Entrance animation shared by every panel.
pub struct RevealSpec {
    /// Window start anchor.
    #[serde(default = "default_start_anchor")]
    pub start: Anchor,
    /// Window end anchor.
    #[serde(default = "default_end_anchor")]
    pub end: Anchor,
    /// Easing applied to every revealed property.
    #[serde(default)]
    pub ease: Ease,
    /// Image element animation.
    #[serde(default = "ElementReveal::image_default")]
    pub image: ElementReveal,
    /// Text block animation.
    #[serde(default = "ElementReveal::text_default")]
    pub text: ElementReveal,
}

fn default_start_anchor() -> Anchor {
    Anchor::ENTERING
}

fn default_end_anchor() -> Anchor {
    Anchor::CENTERED
}

impl Default for RevealSpec {
    fn default() -> Self {
        Self {
            start: default_start_anchor(),
            end: default_end_anchor(),
            ease: Ease::default(),
            image: ElementReveal::image_default(),
            text: ElementReveal::text_default(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Interpolated properties of one element inside a panel.
pub struct ElementReveal {
    /// Portion of the panel window this element animates over.
    #[serde(default)]
    pub span: Span,
    /// Opacity, clamped to `[0, 1]` at evaluation time.
    pub opacity: Tween<f64>,
    /// Uniform scale.
    pub scale: Tween<f64>,
    /// Vertical offset in CSS pixels (positive is down).
    pub translate_y: Tween<f64>,
}

impl ElementReveal {
    /// Fade in while growing from 85% to full size.
    pub fn image_default() -> Self {
        Self {
            span: Span::FULL,
            opacity: Tween::new(0.0, 1.0),
            scale: Tween::new(0.85, 1.0),
            translate_y: Tween::constant(0.0),
        }
    }

    /// Fade in while rising 50px, starting a fifth of the window late.
    pub fn text_default() -> Self {
        Self {
            span: Span(0.2, 1.0),
            opacity: Tween::new(0.0, 1.0),
            scale: Tween::constant(1.0),
            translate_y: Tween::new(50.0, 0.0),
        }
    }

    fn validate(&self, name: &str) -> ReelResult<()> {
        self.span.validate(name)?;
        self.opacity.validate(&format!("{name} opacity"))?;
        self.scale.validate(&format!("{name} scale"))?;
        self.translate_y.validate(&format!("{name} translate_y"))?;
        if *self.scale.start() < 0.0 || *self.scale.end() < 0.0 {
            return Err(ReelError::validation(format!(
                "{name} scale endpoints must be >= 0"
            )));
        }
        Ok(())
    }
}

impl ReelConfig {
    /// Parse a config from JSON text. The result is not validated.
    pub fn from_json_str(s: &str) -> ReelResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Read and parse a JSON config file. The result is not validated.
    pub fn from_path(path: impl AsRef<Path>) -> ReelResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            ReelError::Other(anyhow::Error::new(e).context(format!(
                "read reel config '{}'",
                path.display()
            )))
        })?;
        Self::from_json_str(&text)
    }

    /// Number of panels on the track.
    pub fn panel_count(&self) -> usize {
        self.panels.len()
    }

    /// Validate panel content, track settings, and reveal timing.
    pub fn validate(&self) -> ReelResult<()> {
        for (i, panel) in self.panels.iter().enumerate() {
            if panel.image.trim().is_empty() {
                return Err(ReelError::validation(format!(
                    "panel {i} image must be non-empty"
                )));
            }
            if panel.title.trim().is_empty() {
                return Err(ReelError::validation(format!(
                    "panel {i} title must be non-empty"
                )));
            }
        }

        let track = &self.track;
        if !track.scroll_scale.is_finite() || track.scroll_scale <= 0.0 {
            return Err(ReelError::validation(
                "track scroll_scale must be finite and > 0",
            ));
        }
        if let Scrub::Smoothed { lag_secs } = track.scrub
            && (!lag_secs.is_finite() || lag_secs < 0.0)
        {
            return Err(ReelError::validation(
                "track scrub lag_secs must be finite and >= 0",
            ));
        }

        self.reveal.start.validate()?;
        self.reveal.end.validate()?;
        self.reveal.image.validate("image")?;
        self.reveal.text.validate("text")?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/model.rs"]
mod tests;
