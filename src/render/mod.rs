//! Frame to inline-style compilation, and panel markup.

pub mod markup;
pub mod style;
