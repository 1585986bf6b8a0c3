//! Edge-triggered collision bindings
//!
//! Each binding keeps one sticky "touching" flag:
//!
//! - apart -> overlap:     call the handler once
//! - overlap -> overlap:   nothing (no impulse injected every tick)
//! - overlap -> apart:     reset, ready for the next contact

use crate::core::Vec2;
use crate::domain::{Body, BodyId, Mass};
use crate::systems::collision::find_collision;

use super::{ForceContext, ForceCreator};

/// Reaction to the first tick of a contact.
///
/// `axis` is the unit collision normal pointing from `a` towards `b`.
pub trait CollisionHandler<T> {
    fn on_collision(&mut self, a: &mut Body<T>, b: &mut Body<T>, axis: Vec2);
}

impl<T, F> CollisionHandler<T> for F
where
    F: FnMut(&mut Body<T>, &mut Body<T>, Vec2),
{
    fn on_collision(&mut self, a: &mut Body<T>, b: &mut Body<T>, axis: Vec2) {
        self(a, b, axis)
    }
}

/// Remove both bodies.
#[derive(Clone, Copy, Debug, Default)]
pub struct Destroy;

impl<T> CollisionHandler<T> for Destroy {
    fn on_collision(&mut self, a: &mut Body<T>, b: &mut Body<T>, _axis: Vec2) {
        a.mark_removed();
        b.mark_removed();
    }
}

/// 1-D restitution impulse along the collision axis.
#[derive(Clone, Copy, Debug)]
pub struct PhysicsImpulse {
    elasticity: f64,
}

impl PhysicsImpulse {
    /// `elasticity` in [0, 1]: 0 perfectly inelastic, 1 perfectly elastic.
    pub fn new(elasticity: f64) -> Self {
        assert!(
            (0.0..=1.0).contains(&elasticity),
            "elasticity must be in [0, 1], got {elasticity}"
        );
        Self { elasticity }
    }

    pub fn elasticity(&self) -> f64 {
        self.elasticity
    }
}

impl<T> CollisionHandler<T> for PhysicsImpulse {
    fn on_collision(&mut self, a: &mut Body<T>, b: &mut Body<T>, axis: Vec2) {
        let j = collision_impulse(a, b, axis, self.elasticity);
        a.add_impulse(axis * j);
        b.add_impulse(axis * -j);
    }
}

/// Impulse scalar `j = m*·(1+e)·(u_B − u_A)`, applied as `+j·axis` to A and
/// `−j·axis` to B.
///
/// `m*` is the reduced mass; against an infinite mass it is the other body's
/// mass.
pub fn collision_impulse<T>(a: &Body<T>, b: &Body<T>, axis: Vec2, elasticity: f64) -> f64 {
    let u_a = a.velocity().dot(axis);
    let u_b = b.velocity().dot(axis);
    Mass::reduced(a.mass(), b.mass()) * (1.0 + elasticity) * (u_b - u_a)
}

/// Collision binding between two bodies
pub struct Collision<H> {
    a: BodyId,
    b: BodyId,
    handler: H,
    touching: bool,
}

impl<H> Collision<H> {
    /// `touching` is the initial sticky state; pass the current overlap to
    /// ignore a contact that already exists.
    pub fn new(a: BodyId, b: BodyId, handler: H, touching: bool) -> Self {
        Self {
            a,
            b,
            handler,
            touching,
        }
    }

    pub fn is_touching(&self) -> bool {
        self.touching
    }
}

impl<T, H> ForceCreator<T> for Collision<H>
where
    H: CollisionHandler<T>,
{
    fn apply(&mut self, ctx: &mut ForceContext<'_, T>) {
        let Some((a, b)) = ctx.pair_mut(self.a, self.b) else {
            return;
        };

        let info = find_collision(a.shape(), b.shape());
        if info.collided && !self.touching {
            self.handler.on_collision(a, b, info.axis);
        }
        self.touching = info.collided;
    }
}
