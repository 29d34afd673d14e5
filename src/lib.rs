//! Random-dot autostereogram ("magic eye") generation from grayscale depth
//! maps.
//!
//! Depth is encoded as horizontal disparity: for every row, each depth sample
//! demands that two screen columns carry the same dot so the eyes fuse them
//! at the depicted distance. [`links::LinkTable`] resolves conflicting
//! demands with hidden-surface removal, and [`pattern::fill_row`] propagates
//! random binary dots along the surviving links. [`render_rds`] ties the
//! stages together over all rows.

pub mod geometry;
pub mod links;
pub mod pattern;
pub mod render;

pub use crate::geometry::{Geometry, ParamError, RenderParams};
pub use crate::render::render_rds;
