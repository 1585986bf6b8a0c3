use wasm_bindgen::prelude::*;

/// Snapshot of the last tick. All zeros unless stats are enabled.
#[wasm_bindgen]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickStats {
    pub(super) tick_ms: f64,
    pub(super) dt: f64,
    pub(super) bindings_run: u32,
    pub(super) bindings_skipped: u32,
    pub(super) bindings_spawned: u32,
    pub(super) bodies_spawned: u32,
    pub(super) bodies_integrated: u32,
    pub(super) bodies_purged: u32,
    pub(super) bindings_purged: u32,
    pub(super) body_count: u32,
    pub(super) binding_count: u32,
}

impl TickStats {
    pub(crate) fn reset(&mut self) {
        *self = TickStats::default();
    }
}

#[wasm_bindgen]
impl TickStats {
    #[wasm_bindgen(getter)]
    pub fn tick_ms(&self) -> f64 { self.tick_ms }
    /// dt actually simulated (after clamping)
    #[wasm_bindgen(getter)]
    pub fn dt(&self) -> f64 { self.dt }
    #[wasm_bindgen(getter)]
    pub fn bindings_run(&self) -> u32 { self.bindings_run }
    /// Bindings not run because a participant was already removed
    #[wasm_bindgen(getter)]
    pub fn bindings_skipped(&self) -> u32 { self.bindings_skipped }
    #[wasm_bindgen(getter)]
    pub fn bindings_spawned(&self) -> u32 { self.bindings_spawned }
    #[wasm_bindgen(getter)]
    pub fn bodies_spawned(&self) -> u32 { self.bodies_spawned }
    #[wasm_bindgen(getter)]
    pub fn bodies_integrated(&self) -> u32 { self.bodies_integrated }
    #[wasm_bindgen(getter)]
    pub fn bodies_purged(&self) -> u32 { self.bodies_purged }
    #[wasm_bindgen(getter)]
    pub fn bindings_purged(&self) -> u32 { self.bindings_purged }
    /// Bodies left after cleanup
    #[wasm_bindgen(getter)]
    pub fn body_count(&self) -> u32 { self.body_count }
    /// Bindings left after cleanup
    #[wasm_bindgen(getter)]
    pub fn binding_count(&self) -> u32 { self.binding_count }
}
