//! Forces - force creators and their bindings
//!
//! A force creator runs once per tick and only writes into body
//! accumulators (`add_force` / `add_impulse`), never into velocity or
//! position directly. A [`Binding`] pairs one creator with the bodies it
//! depends on; the scene drops the binding (and with it the creator's state)
//! as soon as a non-permanent dependency is purged.
//!
//! Built-in laws live in `laws` (gravity, spring, drag) and `collision`
//! (edge-triggered collision handlers). Game code can register any
//! `FnMut(&mut ForceContext<T>)` closure as well.

mod collision;
mod laws;

pub use collision::{
    collision_impulse, Collision, CollisionHandler, Destroy, PhysicsImpulse,
};
pub use laws::{Drag, Gravity, Spring, DEFAULT_GRAVITY_MIN_DISTANCE};

use crate::domain::{Body, BodyId};

/// A force law: reads body state, pushes contributions into accumulators.
pub trait ForceCreator<T> {
    fn apply(&mut self, ctx: &mut ForceContext<'_, T>);
}

impl<T, F> ForceCreator<T> for F
where
    F: FnMut(&mut ForceContext<'_, T>),
{
    fn apply(&mut self, ctx: &mut ForceContext<'_, T>) {
        self(ctx)
    }
}

/// Context passed to force creators (one per binding call).
///
/// Gives lookup by id over the scene's live bodies. Bodies and bindings added
/// through the context are deferred: new bodies join the scene right after
/// the binding pass, new bindings first run on the next tick.
pub struct ForceContext<'a, T> {
    bodies: &'a mut [Body<T>],
    spawned_bodies: &'a mut Vec<Body<T>>,
    spawned_bindings: &'a mut Vec<Binding<T>>,
    next_id: &'a mut u32,
}

impl<'a, T> ForceContext<'a, T> {
    pub(crate) fn new(
        bodies: &'a mut [Body<T>],
        spawned_bodies: &'a mut Vec<Body<T>>,
        spawned_bindings: &'a mut Vec<Binding<T>>,
        next_id: &'a mut u32,
    ) -> Self {
        Self {
            bodies,
            spawned_bodies,
            spawned_bindings,
            next_id,
        }
    }

    fn live_index(&self, id: BodyId) -> Option<usize> {
        self.bodies
            .iter()
            .position(|b| b.id() == id && !b.is_removed())
    }

    /// Every body currently in the scene, in scene order (removed ones included).
    pub fn bodies(&self) -> &[Body<T>] {
        self.bodies
    }

    /// Live (not removed) body by id
    pub fn body(&self, id: BodyId) -> Option<&Body<T>> {
        self.live_index(id).map(|i| &self.bodies[i])
    }

    pub fn body_mut(&mut self, id: BodyId) -> Option<&mut Body<T>> {
        let i = self.live_index(id)?;
        Some(&mut self.bodies[i])
    }

    /// Two distinct live bodies, mutably, in argument order.
    pub fn pair_mut(&mut self, a: BodyId, b: BodyId) -> Option<(&mut Body<T>, &mut Body<T>)> {
        let ia = self.live_index(a)?;
        let ib = self.live_index(b)?;
        if ia == ib {
            return None;
        }
        if ia < ib {
            let (lo, hi) = self.bodies.split_at_mut(ib);
            Some((&mut lo[ia], &mut hi[0]))
        } else {
            let (lo, hi) = self.bodies.split_at_mut(ia);
            Some((&mut hi[0], &mut lo[ib]))
        }
    }

    /// Queue a body; it is appended to the scene after the binding pass and
    /// integrated in the same tick. The id is valid immediately.
    pub fn add_body(&mut self, mut body: Body<T>) -> BodyId {
        let id = BodyId::allocate(&mut *self.next_id);
        body.assign_id(id);
        self.spawned_bodies.push(body);
        id
    }

    /// Queue a binding; it first runs on the next tick.
    ///
    /// Dependencies may name bodies queued through [`Self::add_body`]; any
    /// other unknown id panics.
    pub fn add_binding(&mut self, binding: Binding<T>) {
        let missing = binding
            .unknown_dependency(&*self.bodies)
            .filter(|&id| !self.spawned_bodies.iter().any(|b| b.id() == id));
        if let Some(missing) = missing {
            panic!("binding depends on body {missing:?}, which is not in the scene");
        }
        self.spawned_bindings.push(binding);
    }
}

/// A body a binding depends on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dependency {
    pub body: BodyId,
    /// Permanent dependencies never trigger the binding's purge.
    pub permanent: bool,
}

impl Dependency {
    pub fn removable(body: BodyId) -> Self {
        Self { body, permanent: false }
    }

    pub fn permanent(body: BodyId) -> Self {
        Self { body, permanent: true }
    }

    /// Infinite-mass bodies (walls, anchors) are permanent, everything else
    /// is removable.
    pub fn of<T>(body: &Body<T>) -> Self {
        Self {
            body: body.id(),
            permanent: body.mass().is_infinite(),
        }
    }
}

/// A registered force creator plus the bodies it depends on.
///
/// The creator owns all auxiliary state; dropping the binding releases it.
pub struct Binding<T> {
    creator: Box<dyn ForceCreator<T>>,
    dependencies: Vec<Dependency>,
}

impl<T> Binding<T> {
    /// Binding with no dependencies: lives as long as the scene.
    pub fn new(creator: impl ForceCreator<T> + 'static) -> Self {
        Self::with_dependencies(creator, Vec::new())
    }

    pub fn with_dependencies(
        creator: impl ForceCreator<T> + 'static,
        dependencies: Vec<Dependency>,
    ) -> Self {
        Self {
            creator: Box::new(creator),
            dependencies,
        }
    }

    pub fn dependencies(&self) -> &[Dependency] {
        &self.dependencies
    }

    /// True when the binding references `id` at all.
    pub fn depends_on(&self, id: BodyId) -> bool {
        self.dependencies.iter().any(|d| d.body == id)
    }

    pub(crate) fn apply(&mut self, ctx: &mut ForceContext<'_, T>) {
        self.creator.apply(ctx);
    }

    /// First dependency that names no body in `bodies`.
    pub(crate) fn unknown_dependency(&self, bodies: &[Body<T>]) -> Option<BodyId> {
        self.dependencies
            .iter()
            .map(|d| d.body)
            .find(|&id| !bodies.iter().any(|b| b.id() == id))
    }

    /// A participant is gone or tombstoned: the creator has nothing to act on.
    pub(crate) fn has_dead_participant(&self, bodies: &[Body<T>]) -> bool {
        self.dependencies.iter().any(|d| {
            bodies
                .iter()
                .find(|b| b.id() == d.body)
                .map_or(true, |b| b.is_removed())
        })
    }

    /// Purge rule: any non-permanent dependency is among the purged bodies.
    pub(crate) fn is_orphaned_by(&self, purged: &[BodyId]) -> bool {
        self.dependencies
            .iter()
            .any(|d| !d.permanent && purged.contains(&d.body))
    }
}

impl<T> std::fmt::Debug for Binding<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Binding")
            .field("dependencies", &self.dependencies)
            .finish_non_exhaustive()
    }
}

/// Newtonian gravity between `a` and `b`, skipped inside `min_distance`.
pub fn newtonian_gravity<T>(g: f64, min_distance: f64, a: &Body<T>, b: &Body<T>) -> Binding<T> {
    Binding::with_dependencies(
        Gravity::new(g, a.id(), b.id()).with_min_distance(min_distance),
        vec![Dependency::of(a), Dependency::of(b)],
    )
}

/// Zero-rest-length spring between `a` and `b`.
pub fn spring<T>(k: f64, a: &Body<T>, b: &Body<T>) -> Binding<T> {
    Binding::with_dependencies(
        Spring::new(k, a.id(), b.id()),
        vec![Dependency::of(a), Dependency::of(b)],
    )
}

/// Linear drag on one body.
pub fn drag<T>(gamma: f64, body: &Body<T>) -> Binding<T> {
    Binding::with_dependencies(Drag::new(gamma, body.id()), vec![Dependency::of(body)])
}

/// Edge-triggered collision calling `handler` once per contact.
///
/// The touching state starts from the current overlap, so bodies created
/// already overlapping do not fire until they separate and meet again.
pub fn collision<T, H>(a: &Body<T>, b: &Body<T>, handler: H) -> Binding<T>
where
    H: CollisionHandler<T> + 'static,
{
    let touching = crate::systems::collision::polygons_overlap(a.shape(), b.shape());
    Binding::with_dependencies(
        Collision::new(a.id(), b.id(), handler, touching),
        vec![Dependency::of(a), Dependency::of(b)],
    )
}

/// Remove both bodies as soon as they overlap (including at creation time).
pub fn destructive_collision<T>(a: &Body<T>, b: &Body<T>) -> Binding<T> {
    Binding::with_dependencies(
        Collision::new(a.id(), b.id(), Destroy, false),
        vec![Dependency::of(a), Dependency::of(b)],
    )
}

/// Impulse response with coefficient of restitution `elasticity`.
pub fn physics_collision<T>(elasticity: f64, a: &Body<T>, b: &Body<T>) -> Binding<T> {
    collision(a, b, PhysicsImpulse::new(elasticity))
}
