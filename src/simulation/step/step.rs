use crate::systems::forces::ForceContext;

use super::{PerfTimer, Scene};

pub(super) fn tick<T>(scene: &mut Scene<T>, dt: f64) {
    assert!(dt.is_finite() && dt >= 0.0, "tick dt must be finite and >= 0, got {dt}");

    let dt = match scene.settings.max_tick_dt {
        Some(max_dt) if dt > max_dt => {
            log::debug!("tick {}: dt {dt} clamped to {max_dt}", scene.tick_count);
            max_dt
        }
        _ => dt,
    };

    let stats_on = scene.settings.stats_enabled;
    if stats_on {
        scene.stats.reset();
        scene.stats.dt = dt;
    }
    let tick_start = if stats_on { Some(PerfTimer::start()) } else { None };

    let Scene {
        bodies,
        bindings,
        next_id,
        spawned_bodies,
        spawned_bindings,
        purged_ids,
        stats,
        ..
    } = scene;

    // === 1. FORCE PASS ===
    // Anything a creator spawns lands in the scratch lists, so this loop only
    // ever visits bindings that existed when the tick started.
    let mut bindings_run = 0u32;
    let mut bindings_skipped = 0u32;
    for binding in bindings.iter_mut() {
        if binding.has_dead_participant(bodies.as_slice()) {
            bindings_skipped += 1;
            continue;
        }
        let mut ctx = ForceContext::new(bodies.as_mut_slice(), spawned_bodies, spawned_bindings, next_id);
        binding.apply(&mut ctx);
        bindings_run += 1;
    }

    let bodies_spawned = spawned_bodies.len() as u32;
    let bindings_spawned = spawned_bindings.len() as u32;
    // New bodies are integrated this tick; new bindings run from the next one.
    bodies.append(spawned_bodies);
    bindings.append(spawned_bindings);

    // === 2. INTEGRATION ===
    // Bodies tombstoned during the force pass get this last step too.
    for body in bodies.iter_mut() {
        body.integrate(dt);
    }
    let bodies_integrated = bodies.len() as u32;

    // === 3. BODY CLEANUP ===
    purged_ids.clear();
    bodies.retain(|body| {
        if body.is_removed() {
            purged_ids.push(body.id());
            false
        } else {
            true
        }
    });

    // === 4. BINDING CLEANUP ===
    let bindings_before = bindings.len();
    if !purged_ids.is_empty() {
        log::trace!("purged bodies {:?}", purged_ids);
        bindings.retain(|binding| !binding.is_orphaned_by(purged_ids.as_slice()));
    }
    let bindings_purged = (bindings_before - bindings.len()) as u32;
    if bindings_purged > 0 {
        log::debug!(
            "purged {} bodies and {} bindings",
            purged_ids.len(),
            bindings_purged
        );
    }

    if stats_on {
        stats.bindings_run = bindings_run;
        stats.bindings_skipped = bindings_skipped;
        stats.bindings_spawned = bindings_spawned;
        stats.bodies_spawned = bodies_spawned;
        stats.bodies_integrated = bodies_integrated;
        stats.bodies_purged = purged_ids.len() as u32;
        stats.bindings_purged = bindings_purged;
        stats.body_count = bodies.len() as u32;
        stats.binding_count = bindings.len() as u32;
        if let Some(start) = tick_start {
            stats.tick_ms = start.elapsed_ms();
        }
    }

    scene.tick_count += 1;
}
