//! Systems - everything that reads and writes bodies each tick
//!
//! - collision/  separating-axis overlap test between two convex polygons
//! - forces/     force-creator framework and the built-in force laws

pub mod collision;
pub mod forces;
