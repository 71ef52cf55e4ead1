use crate::{
    eval::evaluator::EvaluatedFrame, foundation::core::ElementTransform,
    reveal::animator::ElementState, track::controller::PinState,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
/// Element a style operation is addressed to.
pub enum StyleTarget {
    /// Horizontally translated (and pinned) track container.
    Track,
    /// Wrapper whose height reserves the pinned scroll distance.
    Spacer,
    /// Image of panel `i`.
    PanelImage(usize),
    /// Text block of panel `i`.
    PanelText(usize),
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
/// One inline CSS declaration.
pub struct StyleDecl {
    /// CSS property name.
    pub property: &'static str,
    /// CSS value.
    pub value: String,
}

impl StyleDecl {
    /// Build a declaration.
    pub fn new(property: &'static str, value: impl Into<String>) -> Self {
        Self {
            property,
            value: value.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Declarations for one target.
pub struct StyleOp {
    /// Addressed element.
    pub target: StyleTarget,
    /// Declarations, applied in order.
    pub decls: Vec<StyleDecl>,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
/// Backend-agnostic style writes for one evaluated frame.
pub struct StylePlan {
    /// Operations in application order: spacer, track, then panels in display order.
    pub ops: Vec<StyleOp>,
}

impl StylePlan {
    /// Declarations addressed to `target`, if any.
    pub fn decls_for(&self, target: StyleTarget) -> Option<&[StyleDecl]> {
        self.ops
            .iter()
            .find(|op| op.target == target)
            .map(|op| op.decls.as_slice())
    }

    /// Value of `property` on `target`, if planned.
    pub fn value(&self, target: StyleTarget, property: &str) -> Option<&str> {
        self.decls_for(target)?
            .iter()
            .find(|d| d.property == property)
            .map(|d| d.value.as_str())
    }
}

/// Compile an evaluated frame into inline style writes.
pub fn compile_frame(frame: &EvaluatedFrame) -> StylePlan {
    let mut ops = Vec::with_capacity(2 + frame.panels.len() * 2);

    let spacer_height = if frame.geometry.is_active() {
        px(frame.geometry.spacer_height())
    } else {
        "auto".to_string()
    };
    ops.push(StyleOp {
        target: StyleTarget::Spacer,
        decls: vec![StyleDecl::new("height", spacer_height)],
    });

    let mut track = vec![StyleDecl::new(
        "transform",
        format!("translate3d({}, 0px, 0px)", px(frame.track_translate_px)),
    )];
    track.extend(pin_decls(frame));
    ops.push(StyleOp {
        target: StyleTarget::Track,
        decls: track,
    });

    for panel in &frame.panels {
        ops.push(StyleOp {
            target: StyleTarget::PanelImage(panel.index),
            decls: element_decls(&panel.image),
        });
        ops.push(StyleOp {
            target: StyleTarget::PanelText(panel.index),
            decls: element_decls(&panel.text),
        });
    }

    StylePlan { ops }
}

fn pin_decls(frame: &EvaluatedFrame) -> Vec<StyleDecl> {
    match frame.pin {
        PinState::Pinned => vec![
            StyleDecl::new("position", "fixed"),
            StyleDecl::new("top", "0px"),
            StyleDecl::new("left", "0px"),
        ],
        // Parked at the end of the spacer so the track scrolls away from where it stopped.
        PinState::After => vec![
            StyleDecl::new("position", "relative"),
            StyleDecl::new("top", px(frame.geometry.scroll_length)),
            StyleDecl::new("left", "0px"),
        ],
        PinState::Before | PinState::Disabled => vec![
            StyleDecl::new("position", "relative"),
            StyleDecl::new("top", "0px"),
            StyleDecl::new("left", "0px"),
        ],
    }
}

fn element_decls(state: &ElementState) -> Vec<StyleDecl> {
    vec![
        StyleDecl::new("opacity", num(state.opacity)),
        StyleDecl::new("transform", css_matrix(state.transform)),
    ]
}

/// CSS `matrix(a, b, c, d, e, f)` for an element transform.
pub fn css_matrix(t: ElementTransform) -> String {
    let [a, b, c, d, e, f] = t.to_affine().as_coeffs();
    format!(
        "matrix({}, {}, {}, {}, {}, {})",
        num(a),
        num(b),
        num(c),
        num(d),
        num(e),
        num(f)
    )
}

fn px(v: f64) -> String {
    format!("{}px", num(v))
}

/// Format with at most four decimals, no trailing zeros, and no negative zero.
fn num(v: f64) -> String {
    let s = format!("{v:.4}");
    let s = if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    };
    if s == "-0" { "0".to_string() } else { s }
}

#[cfg(test)]
#[path = "../../tests/unit/render/style.rs"]
mod tests;
