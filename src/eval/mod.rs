//! Scroll offset to frame evaluation.

pub mod evaluator;
