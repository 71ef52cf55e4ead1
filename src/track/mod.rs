//! Pinned horizontal track: scroll mapping and scrub smoothing.

pub mod controller;
pub mod scrub;
