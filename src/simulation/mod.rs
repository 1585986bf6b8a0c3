//! Scene - owns bodies and bindings, drives the per-tick pipeline
//!
//! Every `tick(dt)` runs, in this fixed order:
//! 1. every binding registered before the tick, in registration order
//! 2. `integrate(dt)` on every body in list order (tombstoned ones included)
//! 3. purge tombstoned bodies
//! 4. purge bindings that lost a non-permanent dependency in step 3
//!
//! Orchestration only: force laws are in `systems::forces`, the overlap test
//! in `systems::collision`.

use crate::core::{RgbColor, Vec2};
use crate::domain::{Body, BodyId};
use crate::systems::collision::{find_collision, CollisionInfo};
use crate::systems::forces::{Binding, CollisionHandler, Dependency, ForceContext, ForceCreator};

#[path = "perf/perf_timer.rs"]
mod perf_timer;
#[path = "perf/tick_stats.rs"]
mod tick_stats;
#[path = "settings/settings.rs"]
mod settings;
#[path = "step/step.rs"]
mod step;
#[path = "creators/creators.rs"]
mod creators;
#[path = "render/render_extract.rs"]
mod render_extract;
mod facade;

pub use facade::Engine;
pub use settings::SceneSettings;
pub use tick_stats::TickStats;

use perf_timer::PerfTimer;
use render_extract::RenderBuffers;

/// The simulation scene
///
/// `T` is the body tag type (see [`Body`]).
pub struct Scene<T = ()> {
    /// Insertion order = processing order = draw order
    bodies: Vec<Body<T>>,
    /// Registration order = application order
    bindings: Vec<Binding<T>>,
    next_id: u32,

    settings: SceneSettings,
    tick_count: u64,
    stats: TickStats,

    // Scratch reused across ticks
    spawned_bodies: Vec<Body<T>>,
    spawned_bindings: Vec<Binding<T>>,
    purged_ids: Vec<BodyId>,

    render: RenderBuffers,
}

impl<T> Scene<T> {
    /// Create an empty scene
    pub fn new() -> Self {
        Self::with_settings(SceneSettings::default())
    }

    pub fn with_settings(settings: SceneSettings) -> Self {
        Self {
            bodies: Vec::new(),
            bindings: Vec::new(),
            next_id: 1,
            settings,
            tick_count: 0,
            stats: TickStats::default(),
            spawned_bodies: Vec::new(),
            spawned_bindings: Vec::new(),
            purged_ids: Vec::new(),
            render: RenderBuffers::default(),
        }
    }

    // === SETTINGS ===

    pub fn settings(&self) -> &SceneSettings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: SceneSettings) {
        settings::set_settings(self, settings);
    }

    pub fn load_settings_json(&mut self, json: &str) -> Result<(), String> {
        let settings = SceneSettings::from_json(json)?;
        self.set_settings(settings);
        Ok(())
    }

    /// Enable or disable per-tick stats (adds timing overhead when enabled)
    pub fn enable_stats(&mut self, enabled: bool) {
        settings::enable_stats(self, enabled);
    }

    /// Stats of the last tick (zeros when stats are disabled)
    pub fn last_tick_stats(&self) -> &TickStats {
        &self.stats
    }

    /// Completed ticks since creation
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    // === BODY API ===

    /// Take ownership of `body`, append it, and return its id.
    pub fn add_body(&mut self, mut body: Body<T>) -> BodyId {
        let id = BodyId::allocate(&mut self.next_id);
        body.assign_id(id);
        self.bodies.push(body);
        id
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Bodies in draw order. Includes bodies tombstoned since the last tick.
    pub fn bodies(&self) -> &[Body<T>] {
        &self.bodies
    }

    pub fn get_body(&self, index: usize) -> Option<&Body<T>> {
        self.bodies.get(index)
    }

    pub fn get_body_mut(&mut self, index: usize) -> Option<&mut Body<T>> {
        self.bodies.get_mut(index)
    }

    pub fn index_of(&self, id: BodyId) -> Option<usize> {
        self.bodies.iter().position(|b| b.id() == id)
    }

    pub fn body(&self, id: BodyId) -> Option<&Body<T>> {
        self.bodies.iter().find(|b| b.id() == id)
    }

    pub fn body_mut(&mut self, id: BodyId) -> Option<&mut Body<T>> {
        self.bodies.iter_mut().find(|b| b.id() == id)
    }

    /// Tombstone a body; it disappears during the next tick's cleanup.
    /// Returns false if the id is unknown.
    pub fn remove_body(&mut self, id: BodyId) -> bool {
        match self.body_mut(id) {
            Some(body) => {
                body.mark_removed();
                true
            }
            None => false,
        }
    }

    pub fn remove_body_at(&mut self, index: usize) -> bool {
        match self.bodies.get_mut(index) {
            Some(body) => {
                body.mark_removed();
                true
            }
            None => false,
        }
    }

    // === BINDING API ===

    pub fn binding_count(&self) -> usize {
        self.bindings.len()
    }

    pub fn bindings(&self) -> &[Binding<T>] {
        &self.bindings
    }

    /// Panics if a dependency names a body that is not in the scene: such a
    /// binding could never run and never be purged.
    pub fn add_binding(&mut self, binding: Binding<T>) {
        if let Some(missing) = binding.unknown_dependency(&self.bodies) {
            panic!("binding depends on body {missing:?}, which is not in the scene");
        }
        self.bindings.push(binding);
    }

    /// Register a creator with no dependencies (lives as long as the scene).
    pub fn add_force_creator(&mut self, creator: impl ForceCreator<T> + 'static) {
        self.add_binding(Binding::new(creator));
    }

    /// Register a closure with no dependencies.
    pub fn add_force_fn<F>(&mut self, creator: F)
    where
        F: FnMut(&mut ForceContext<'_, T>) + 'static,
    {
        self.add_binding(Binding::new(creator));
    }

    /// Register a creator tied to `dependencies` (purged with the first
    /// non-permanent one).
    pub fn add_force_creator_with_bodies(
        &mut self,
        creator: impl ForceCreator<T> + 'static,
        dependencies: Vec<Dependency>,
    ) {
        self.add_binding(Binding::with_dependencies(creator, dependencies));
    }

    // === FORCE LAWS ===

    /// Newtonian gravity between `a` and `b`, using the scene's
    /// `gravity_min_distance`.
    pub fn create_newtonian_gravity(&mut self, g: f64, a: BodyId, b: BodyId) {
        creators::create_newtonian_gravity(self, g, a, b);
    }

    pub fn create_spring(&mut self, k: f64, a: BodyId, b: BodyId) {
        creators::create_spring(self, k, a, b);
    }

    pub fn create_drag(&mut self, gamma: f64, body: BodyId) {
        creators::create_drag(self, gamma, body);
    }

    /// Call `handler` once each time `a` and `b` start touching.
    pub fn create_collision<H>(&mut self, a: BodyId, b: BodyId, handler: H)
    where
        H: CollisionHandler<T> + 'static,
    {
        creators::create_collision(self, a, b, handler);
    }

    pub fn create_destructive_collision(&mut self, a: BodyId, b: BodyId) {
        creators::create_destructive_collision(self, a, b);
    }

    pub fn create_physics_collision(&mut self, elasticity: f64, a: BodyId, b: BodyId) {
        creators::create_physics_collision(self, elasticity, a, b);
    }

    // === QUERIES ===

    /// Ad hoc overlap query between two bodies of this scene.
    pub fn find_collision_between(&self, a: BodyId, b: BodyId) -> Option<CollisionInfo> {
        let a = self.body(a)?;
        let b = self.body(b)?;
        Some(find_collision(a.shape(), b.shape()))
    }

    // === STEP ===

    /// Advance the simulation by `dt` seconds of host time.
    pub fn tick(&mut self, dt: f64) {
        step::tick(self, dt);
    }

    // === RENDER API ===

    /// Flatten the current body list for drawing; returns the body count.
    pub fn extract_render_buffers(&mut self) -> usize {
        render_extract::extract_render_buffers(self)
    }

    /// x/y pairs of every body's vertices, bodies back to back
    pub fn render_vertices(&self) -> &[f32] {
        &self.render.vertices
    }

    /// Vertex offsets (in vertices): body i spans `offsets[i]..offsets[i + 1]`
    pub fn render_offsets(&self) -> &[u32] {
        &self.render.offsets
    }

    /// One packed RGBA color per body
    pub fn render_colors(&self) -> &[u32] {
        &self.render.colors
    }
}

impl Scene<()> {
    /// Convenience for untagged scenes: build, add and return the id.
    pub fn spawn_polygon(&mut self, shape: Vec<Vec2>, mass: f64, color: RgbColor) -> BodyId {
        self.add_body(Body::new(shape, mass, color))
    }
}

impl<T> Default for Scene<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
