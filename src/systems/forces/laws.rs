use crate::domain::BodyId;

use super::{ForceContext, ForceCreator};

/// Below this centroid distance gravity is not applied (the 1/d² term blows up).
pub const DEFAULT_GRAVITY_MIN_DISTANCE: f64 = 5.0;

/// Newtonian gravity between two bodies
///
/// F = G·mA·mB/d² along unit(A→B) on A, negated on B.
#[derive(Clone, Debug)]
pub struct Gravity {
    g: f64,
    min_distance: f64,
    a: BodyId,
    b: BodyId,
}

impl Gravity {
    pub fn new(g: f64, a: BodyId, b: BodyId) -> Self {
        Self {
            g,
            min_distance: DEFAULT_GRAVITY_MIN_DISTANCE,
            a,
            b,
        }
    }

    pub fn with_min_distance(mut self, min_distance: f64) -> Self {
        assert!(min_distance >= 0.0, "gravity min distance must be >= 0");
        self.min_distance = min_distance;
        self
    }
}

impl<T> ForceCreator<T> for Gravity {
    fn apply(&mut self, ctx: &mut ForceContext<'_, T>) {
        let Some((a, b)) = ctx.pair_mut(self.a, self.b) else {
            return;
        };

        let offset = b.centroid() - a.centroid();
        let distance = offset.length();
        if distance <= self.min_distance {
            return;
        }

        let unit = offset / distance;
        let magnitude = self.g * a.mass().value() * b.mass().value() / (distance * distance);
        // An infinite-mass participant has no meaningful pull.
        if !magnitude.is_finite() {
            return;
        }
        let force = unit * magnitude;
        a.add_force(force);
        b.add_force(-force);
    }
}

/// Hooke spring with implicit zero rest length
///
/// F_A = k·(posB − posA), F_B = −F_A
#[derive(Clone, Debug)]
pub struct Spring {
    k: f64,
    a: BodyId,
    b: BodyId,
}

impl Spring {
    pub fn new(k: f64, a: BodyId, b: BodyId) -> Self {
        Self { k, a, b }
    }
}

impl<T> ForceCreator<T> for Spring {
    fn apply(&mut self, ctx: &mut ForceContext<'_, T>) {
        let Some((a, b)) = ctx.pair_mut(self.a, self.b) else {
            return;
        };
        let force = (b.centroid() - a.centroid()) * self.k;
        a.add_force(force);
        b.add_force(-force);
    }
}

/// Linear drag: F = −γ·v
#[derive(Clone, Debug)]
pub struct Drag {
    gamma: f64,
    body: BodyId,
}

impl Drag {
    pub fn new(gamma: f64, body: BodyId) -> Self {
        Self { gamma, body }
    }
}

impl<T> ForceCreator<T> for Drag {
    fn apply(&mut self, ctx: &mut ForceContext<'_, T>) {
        let Some(body) = ctx.body_mut(self.body) else {
            return;
        };
        let force = body.velocity() * -self.gamma;
        body.add_force(force);
    }
}
