//! Polyscene Engine - 2D polygon rigid-body simulation kernel in WASM
//!
//! A scene of convex polygon bodies advanced in fixed passes each tick:
//! force bindings write into accumulators, bodies integrate, removed bodies
//! and the bindings that depended on them are purged.
//!
//! Architecture:
//! - core/        - Vec2, polygon helpers, colors, contract macros
//! - domain/      - Body and Mass
//! - systems/     - SAT collision detection, force creators and laws
//! - simulation/  - Scene orchestration, settings, stats, JS facade

// Macros first so every later module can use them.
#[macro_use]
pub mod core;
pub mod domain;
pub mod systems;
pub mod simulation;

use wasm_bindgen::prelude::*;

// Used by `caller_contract!` expansions in downstream crates.
#[doc(hidden)]
pub use log as __log;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Route `log` records to the browser console. Safe to call repeatedly.
#[cfg(target_arch = "wasm32")]
pub fn init_logger() {
    static LOGGER: std::sync::Once = std::sync::Once::new();
    LOGGER.call_once(|| wasm_logger::init(wasm_logger::Config::default()));
}

/// Initialize the engine
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    #[cfg(target_arch = "wasm32")]
    init_logger();

    web_sys::console::log_1(&"Polyscene engine initialized".into());
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Re-export main types
pub use crate::core::{RgbColor, Vec2};
pub use domain::{Body, BodyId, Mass};
pub use simulation::{Engine, Scene, SceneSettings, TickStats};
pub use systems::collision::{find_collision, CollisionInfo};
pub use systems::forces::{
    Binding, CollisionHandler, Dependency, Destroy, ForceContext, ForceCreator, PhysicsImpulse,
};
