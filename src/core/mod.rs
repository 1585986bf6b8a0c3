//! Core - math primitives shared by every other layer
//!
//! - vec2/     2D vector math (f64)
//! - polygon/  shoelace area, centroid and in-place transforms
//! - color/    render-only RGB colors
//! - utils/    contract macros ("roll cage" for caller obligations)

// Macros first so the rest of the crate can use them.
#[macro_use]
#[path = "utils/safety.rs"]
pub mod safety;

pub mod color;
pub mod polygon;
pub mod vec2;

pub use color::RgbColor;
pub use polygon::{polygon_area, polygon_centroid, rotate_polygon, translate_polygon};
pub use vec2::Vec2;
