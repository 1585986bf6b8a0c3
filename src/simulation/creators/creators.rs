use crate::domain::{Body, BodyId};
use crate::systems::forces::{self, CollisionHandler};

use super::Scene;

/// Registering a law on a body the scene does not know is a caller bug.
fn lookup<T>(scene: &Scene<T>, id: BodyId) -> &Body<T> {
    match scene.body(id) {
        Some(body) => body,
        None => panic!("body {id:?} is not in the scene"),
    }
}

pub(super) fn create_newtonian_gravity<T>(scene: &mut Scene<T>, g: f64, a: BodyId, b: BodyId) {
    let min_distance = scene.settings.gravity_min_distance;
    let binding = forces::newtonian_gravity(g, min_distance, lookup(scene, a), lookup(scene, b));
    scene.add_binding(binding);
}

pub(super) fn create_spring<T>(scene: &mut Scene<T>, k: f64, a: BodyId, b: BodyId) {
    let binding = forces::spring(k, lookup(scene, a), lookup(scene, b));
    scene.add_binding(binding);
}

pub(super) fn create_drag<T>(scene: &mut Scene<T>, gamma: f64, body: BodyId) {
    let binding = forces::drag(gamma, lookup(scene, body));
    scene.add_binding(binding);
}

pub(super) fn create_collision<T, H>(scene: &mut Scene<T>, a: BodyId, b: BodyId, handler: H)
where
    H: CollisionHandler<T> + 'static,
{
    let binding = forces::collision(lookup(scene, a), lookup(scene, b), handler);
    scene.add_binding(binding);
}

pub(super) fn create_destructive_collision<T>(scene: &mut Scene<T>, a: BodyId, b: BodyId) {
    let binding = forces::destructive_collision(lookup(scene, a), lookup(scene, b));
    log::trace!("destructive collision {a:?} <-> {b:?}");
    scene.add_binding(binding);
}

pub(super) fn create_physics_collision<T>(
    scene: &mut Scene<T>,
    elasticity: f64,
    a: BodyId,
    b: BodyId,
) {
    let binding = forces::physics_collision(elasticity, lookup(scene, a), lookup(scene, b));
    scene.add_binding(binding);
}
