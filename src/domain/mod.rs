//! Domain - the simulated objects
//!
//! A [`Body`] is one polygon in world space plus its kinematic state and the
//! per-tick force/impulse accumulators that force laws write into.

mod body;
mod mass;

pub use body::{Body, BodyId};
pub use mass::Mass;
