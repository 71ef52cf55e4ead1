use crate::{
    animation::ease::Ease,
    animation::window::Anchor,
    composition::model::{
        ElementReveal, PanelDescriptor, ReelConfig, RevealSpec, ScrollDistance, Scrub,
        TrackSettings,
    },
    foundation::error::ReelResult,
};

/// Fluent builder for [`ReelConfig`]; `build` validates.
pub struct ReelBuilder {
    panels: Vec<PanelDescriptor>,
    track: TrackSettings,
    reveal: RevealSpec,
}

impl Default for ReelBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ReelBuilder {
    /// Start from the canonical timing policy with no panels.
    pub fn new() -> Self {
        Self {
            panels: Vec::new(),
            track: TrackSettings::default(),
            reveal: RevealSpec::default(),
        }
    }

    /// Append a fully specified panel.
    pub fn panel(mut self, panel: PanelDescriptor) -> Self {
        self.panels.push(panel);
        self
    }

    /// Append a panel from its image, title and body paragraphs.
    pub fn simple_panel<I, S>(
        self,
        image: impl Into<String>,
        title: impl Into<String>,
        body: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.panel(panel(image, title, body))
    }

    /// Pinned scroll range length policy.
    pub fn scroll_distance(mut self, distance: ScrollDistance) -> Self {
        self.track.scroll_distance = distance;
        self
    }

    /// Multiplier on the pinned scroll range length.
    pub fn scroll_scale(mut self, scale: f64) -> Self {
        self.track.scroll_scale = scale;
        self
    }

    /// Scrub coupling.
    pub fn scrub(mut self, scrub: Scrub) -> Self {
        self.track.scrub = scrub;
        self
    }

    /// Reveal window anchors.
    pub fn window(mut self, start: Anchor, end: Anchor) -> Self {
        self.reveal.start = start;
        self.reveal.end = end;
        self
    }

    /// Ease shared by all revealed properties.
    pub fn ease(mut self, ease: Ease) -> Self {
        self.reveal.ease = ease;
        self
    }

    /// Image element animation.
    pub fn image_reveal(mut self, reveal: ElementReveal) -> Self {
        self.reveal.image = reveal;
        self
    }

    /// Text block animation.
    pub fn text_reveal(mut self, reveal: ElementReveal) -> Self {
        self.reveal.text = reveal;
        self
    }

    /// Finish and validate.
    pub fn build(self) -> ReelResult<ReelConfig> {
        let cfg = ReelConfig {
            panels: self.panels,
            track: self.track,
            reveal: self.reveal,
        };
        cfg.validate()?;
        Ok(cfg)
    }
}

/// Build a [`PanelDescriptor`] with empty alt text.
pub fn panel<I, S>(image: impl Into<String>, title: impl Into<String>, body: I) -> PanelDescriptor
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    PanelDescriptor {
        image: image.into(),
        alt: String::new(),
        title: title.into(),
        body: body.into_iter().map(Into::into).collect(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/dsl.rs"]
mod tests;
