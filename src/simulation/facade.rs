use wasm_bindgen::prelude::*;

use crate::core::{RgbColor, Vec2};
use crate::domain::{Body, BodyId, Mass};

use super::{Scene, SceneSettings, TickStats};

/// JS-facing scene. Bodies carry a `u32` tag chosen by the host.
///
/// Nothing here panics on bad input: unknown or removed ids and invalid
/// values are rejected with `false` / `0` / `None`.
#[wasm_bindgen]
pub struct Engine {
    core: Scene<u32>,
}

impl Engine {
    fn live_body_mut(&mut self, id: u32) -> Option<&mut Body<u32>> {
        self.core
            .body_mut(BodyId::from_raw(id))
            .filter(|b| !b.is_removed())
    }

    fn is_live(&self, id: u32) -> bool {
        self.core
            .body(BodyId::from_raw(id))
            .map_or(false, |b| !b.is_removed())
    }

    fn live_pair(&self, a: u32, b: u32) -> Option<(BodyId, BodyId)> {
        if a == b || !self.is_live(a) || !self.is_live(b) {
            return None;
        }
        Some((BodyId::from_raw(a), BodyId::from_raw(b)))
    }

    /// Core scene (native hosts and tests)
    pub fn scene(&self) -> &Scene<u32> {
        &self.core
    }

    pub fn scene_mut(&mut self) -> &mut Scene<u32> {
        &mut self.core
    }
}

fn parse_shape(coords: &[f64]) -> Option<Vec<Vec2>> {
    if coords.len() < 6 || coords.len() % 2 != 0 || coords.iter().any(|c| !c.is_finite()) {
        return None;
    }
    Some(coords.chunks_exact(2).map(|p| Vec2::new(p[0], p[1])).collect())
}

fn parse_mass(mass: f64) -> Option<Mass> {
    if mass == f64::INFINITY {
        Some(Mass::Infinite)
    } else if mass.is_finite() && mass > 0.0 {
        Some(Mass::Finite(mass))
    } else {
        None
    }
}

#[wasm_bindgen]
impl Engine {
    /// Create an empty scene with default settings
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self { core: Scene::new() }
    }

    #[wasm_bindgen(js_name = withSettingsJson)]
    pub fn with_settings_json(json: String) -> Result<Engine, JsValue> {
        let settings = SceneSettings::from_json(&json).map_err(|e| JsValue::from_str(&e))?;
        Ok(Self {
            core: Scene::with_settings(settings),
        })
    }

    pub fn load_settings(&mut self, json: String) -> Result<(), JsValue> {
        self.core
            .load_settings_json(&json)
            .map_err(|e| JsValue::from_str(&e))?;
        Ok(())
    }

    pub fn settings_json(&self) -> String {
        self.core.settings().to_json()
    }

    /// Enable or disable per-tick stats (adds timing overhead when enabled)
    pub fn enable_stats(&mut self, enabled: bool) {
        self.core.enable_stats(enabled);
    }

    /// Last tick snapshot (zeros when stats are disabled)
    pub fn last_tick_stats(&self) -> TickStats {
        self.core.last_tick_stats().clone()
    }

    #[wasm_bindgen(getter)]
    pub fn tick_count(&self) -> u64 {
        self.core.tick_count()
    }

    // === BODY API ===

    /// Add a polygon from flat `[x0, y0, x1, y1, ...]` coordinates.
    /// `mass` may be `Infinity` for immovable bodies. Returns the body id,
    /// or 0 when the shape or mass is invalid.
    pub fn add_polygon(&mut self, coords: Vec<f64>, mass: f64, r: f32, g: f32, b: f32, tag: u32) -> u32 {
        let (Some(shape), Some(mass)) = (parse_shape(&coords), parse_mass(mass)) else {
            log::warn!("add_polygon: rejected {} coords with mass {mass}", coords.len());
            return 0;
        };
        let body = Body::with_tag(shape, mass, RgbColor::new(r, g, b), tag);
        self.core.add_body(body).raw()
    }

    /// Tombstone a body; it is purged on the next tick
    pub fn remove_body(&mut self, id: u32) -> bool {
        self.core.remove_body(BodyId::from_raw(id))
    }

    #[wasm_bindgen(getter)]
    pub fn body_count(&self) -> usize {
        self.core.body_count()
    }

    #[wasm_bindgen(getter)]
    pub fn binding_count(&self) -> usize {
        self.core.binding_count()
    }

    /// Id of the body at draw index `index` (0 when out of range)
    pub fn body_id_at(&self, index: usize) -> u32 {
        self.core.get_body(index).map_or(0, |b| b.id().raw())
    }

    pub fn is_removed(&self, id: u32) -> bool {
        self.core
            .body(BodyId::from_raw(id))
            .map_or(true, |b| b.is_removed())
    }

    pub fn tag_of(&self, id: u32) -> Option<u32> {
        self.core.body(BodyId::from_raw(id)).map(|b| *b.tag())
    }

    /// `[x, y]`, empty for unknown ids
    pub fn get_centroid(&self, id: u32) -> Vec<f64> {
        self.core
            .body(BodyId::from_raw(id))
            .map_or_else(Vec::new, |b| vec![b.centroid().x, b.centroid().y])
    }

    /// `[x, y]`, empty for unknown ids
    pub fn get_velocity(&self, id: u32) -> Vec<f64> {
        self.core
            .body(BodyId::from_raw(id))
            .map_or_else(Vec::new, |b| vec![b.velocity().x, b.velocity().y])
    }

    pub fn get_orientation(&self, id: u32) -> Option<f64> {
        self.core.body(BodyId::from_raw(id)).map(|b| b.orientation())
    }

    pub fn set_centroid(&mut self, id: u32, x: f64, y: f64) -> bool {
        if !(x.is_finite() && y.is_finite()) {
            return false;
        }
        match self.live_body_mut(id) {
            Some(body) => {
                body.set_centroid(Vec2::new(x, y));
                true
            }
            None => false,
        }
    }

    pub fn set_velocity(&mut self, id: u32, x: f64, y: f64) -> bool {
        if !(x.is_finite() && y.is_finite()) {
            return false;
        }
        match self.live_body_mut(id) {
            Some(body) => {
                body.set_velocity(Vec2::new(x, y));
                true
            }
            None => false,
        }
    }

    pub fn set_orientation(&mut self, id: u32, angle: f64) -> bool {
        if !angle.is_finite() {
            return false;
        }
        match self.live_body_mut(id) {
            Some(body) => {
                body.set_orientation(angle);
                true
            }
            None => false,
        }
    }

    pub fn set_angular_velocity(&mut self, id: u32, rate: f64) -> bool {
        if !rate.is_finite() {
            return false;
        }
        match self.live_body_mut(id) {
            Some(body) => {
                body.set_angular_velocity(rate);
                true
            }
            None => false,
        }
    }

    pub fn set_color(&mut self, id: u32, r: f32, g: f32, b: f32) -> bool {
        match self.core.body_mut(BodyId::from_raw(id)) {
            Some(body) => {
                body.set_color(RgbColor::new(r, g, b));
                true
            }
            None => false,
        }
    }

    // === FORCE LAWS ===

    pub fn create_newtonian_gravity(&mut self, g: f64, a: u32, b: u32) -> bool {
        match self.live_pair(a, b) {
            Some((a, b)) if g.is_finite() => {
                self.core.create_newtonian_gravity(g, a, b);
                true
            }
            _ => false,
        }
    }

    pub fn create_spring(&mut self, k: f64, a: u32, b: u32) -> bool {
        match self.live_pair(a, b) {
            Some((a, b)) if k.is_finite() => {
                self.core.create_spring(k, a, b);
                true
            }
            _ => false,
        }
    }

    pub fn create_drag(&mut self, gamma: f64, body: u32) -> bool {
        if !gamma.is_finite() || !self.is_live(body) {
            return false;
        }
        self.core.create_drag(gamma, BodyId::from_raw(body));
        true
    }

    pub fn create_destructive_collision(&mut self, a: u32, b: u32) -> bool {
        match self.live_pair(a, b) {
            Some((a, b)) => {
                self.core.create_destructive_collision(a, b);
                true
            }
            None => false,
        }
    }

    /// `elasticity` must be within [0, 1]
    pub fn create_physics_collision(&mut self, elasticity: f64, a: u32, b: u32) -> bool {
        match self.live_pair(a, b) {
            Some((a, b)) if (0.0..=1.0).contains(&elasticity) => {
                self.core.create_physics_collision(elasticity, a, b);
                true
            }
            _ => false,
        }
    }

    /// Current overlap of two bodies (false for unknown ids)
    pub fn find_collision_between(&self, a: u32, b: u32) -> bool {
        self.core
            .find_collision_between(BodyId::from_raw(a), BodyId::from_raw(b))
            .map_or(false, |info| info.collided)
    }

    // === STEP ===

    /// Advance by `dt` seconds. Returns false (and does nothing) for a
    /// negative or non-finite `dt`.
    pub fn tick(&mut self, dt: f64) -> bool {
        if !(dt.is_finite() && dt >= 0.0) {
            log::warn!("tick: rejected dt {dt}");
            return false;
        }
        self.core.tick(dt);
        true
    }

    // === RENDER API ===

    /// Refresh the render buffers; returns the body count
    pub fn extract_render_buffers(&mut self) -> usize {
        self.core.extract_render_buffers()
    }

    /// Pointer to the vertex buffer (f32 x/y pairs)
    pub fn vertices_ptr(&self) -> *const f32 {
        self.core.render_vertices().as_ptr()
    }

    /// Vertex buffer length in f32 elements
    pub fn vertices_len(&self) -> usize {
        self.core.render_vertices().len()
    }

    pub fn offsets_ptr(&self) -> *const u32 {
        self.core.render_offsets().as_ptr()
    }

    pub fn offsets_len(&self) -> usize {
        self.core.render_offsets().len()
    }

    pub fn colors_ptr(&self) -> *const u32 {
        self.core.render_colors().as_ptr()
    }

    pub fn colors_len(&self) -> usize {
        self.core.render_colors().len()
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
