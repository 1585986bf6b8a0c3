use super::*;
use std::cell::Cell;
use std::rc::Rc;

fn square(cx: f64, cy: f64) -> Vec<Vec2> {
    vec![
        Vec2::new(cx - 1.0, cy - 1.0),
        Vec2::new(cx + 1.0, cy - 1.0),
        Vec2::new(cx + 1.0, cy + 1.0),
        Vec2::new(cx - 1.0, cy + 1.0),
    ]
}

fn spawn_square(scene: &mut Scene, cx: f64, mass: f64) -> BodyId {
    scene.spawn_polygon(square(cx, 0.0), mass, RgbColor::WHITE)
}

fn set_velocity(scene: &mut Scene, id: BodyId, v: Vec2) {
    scene.body_mut(id).unwrap().set_velocity(v);
}

fn ticks(scene: &mut Scene, n: usize) {
    for _ in 0..n {
        scene.tick(1.0);
    }
}

/// Counts how many ticks it ran in
struct CountRuns(Rc<Cell<u32>>);

impl ForceCreator<()> for CountRuns {
    fn apply(&mut self, _ctx: &mut ForceContext<'_, ()>) {
        self.0.set(self.0.get() + 1);
    }
}

#[test]
fn ids_start_at_one_and_are_never_reused() {
    let mut scene: Scene = Scene::new();
    let a = spawn_square(&mut scene, 0.0, 1.0);
    let b = spawn_square(&mut scene, 5.0, 1.0);
    assert_eq!(a.raw(), 1);
    assert_eq!(b.raw(), 2);

    assert!(scene.remove_body(b));
    scene.tick(0.0);
    let c = spawn_square(&mut scene, 5.0, 1.0);
    assert_eq!(c.raw(), 3);
    assert!(scene.body(b).is_none());
}

#[test]
fn removed_body_stays_visible_until_next_tick() {
    let mut scene: Scene = Scene::new();
    let a = spawn_square(&mut scene, 0.0, 1.0);
    spawn_square(&mut scene, 5.0, 1.0);

    assert!(scene.remove_body(a));
    assert_eq!(scene.body_count(), 2);
    assert!(scene.body(a).unwrap().is_removed());

    scene.tick(0.1);
    assert_eq!(scene.body_count(), 1);
    assert_eq!(scene.index_of(a), None);
}

#[test]
fn remove_rejects_unknown_targets() {
    let mut scene: Scene = Scene::new();
    spawn_square(&mut scene, 0.0, 1.0);
    assert!(!scene.remove_body(BodyId::from_raw(42)));
    assert!(!scene.remove_body_at(1));
    assert!(scene.remove_body_at(0));
}

#[test]
fn tombstoned_body_is_integrated_once_more() {
    let mut scene: Scene = Scene::new();
    scene.enable_stats(true);
    let a = spawn_square(&mut scene, 0.0, 1.0);
    spawn_square(&mut scene, 5.0, 1.0);
    scene.remove_body(a);

    scene.tick(0.5);
    let stats = scene.last_tick_stats();
    assert_eq!(stats.bodies_integrated, 2);
    assert_eq!(stats.bodies_purged, 1);
    assert_eq!(stats.body_count, 1);
}

#[test]
fn tick_moves_bodies_and_counts() {
    let mut scene: Scene = Scene::new();
    let a = spawn_square(&mut scene, 0.0, 1.0);
    set_velocity(&mut scene, a, Vec2::new(2.0, -1.0));

    scene.tick(0.5);
    scene.tick(0.5);
    assert!(scene.body(a).unwrap().centroid().is_close(Vec2::new(2.0, -1.0)));
    assert_eq!(scene.tick_count(), 2);
}

#[test]
fn oversized_dt_is_clamped() {
    let mut scene: Scene = Scene::with_settings(SceneSettings {
        max_tick_dt: Some(0.1),
        stats_enabled: true,
        ..SceneSettings::default()
    });
    let a = spawn_square(&mut scene, 0.0, 1.0);
    set_velocity(&mut scene, a, Vec2::new(1.0, 0.0));

    scene.tick(1.0);
    assert!(scene.body(a).unwrap().centroid().is_close(Vec2::new(0.1, 0.0)));
    assert_eq!(scene.last_tick_stats().dt, 0.1);
}

#[test]
#[should_panic]
fn negative_dt_is_rejected() {
    let mut scene: Scene = Scene::new();
    scene.tick(-1.0);
}

#[test]
fn destructive_collision_purges_both_bodies_and_binding() {
    let mut scene: Scene = Scene::new();
    scene.enable_stats(true);
    let a = spawn_square(&mut scene, 0.0, 1.0);
    let b = spawn_square(&mut scene, 10.0, 1.0);
    set_velocity(&mut scene, a, Vec2::new(5.0, 0.0));
    scene.create_destructive_collision(a, b);

    // a at 0, then 5: still apart
    ticks(&mut scene, 2);
    assert_eq!(scene.body_count(), 2);
    assert_eq!(scene.binding_count(), 1);

    // a at 10: overlap
    scene.tick(1.0);
    assert_eq!(scene.body_count(), 0);
    assert_eq!(scene.binding_count(), 0);
    let stats = scene.last_tick_stats();
    assert_eq!(stats.bodies_purged, 2);
    assert_eq!(stats.bindings_purged, 1);
}

#[test]
fn purge_only_drops_bindings_of_removed_bodies() {
    let mut scene: Scene = Scene::new();
    let a = spawn_square(&mut scene, 0.0, 1.0);
    let b = spawn_square(&mut scene, 20.0, 1.0);
    let c = spawn_square(&mut scene, 40.0, 1.0);
    scene.create_spring(0.1, b, c);
    scene.create_drag(0.5, c);
    scene.create_newtonian_gravity(1.0, a, c);
    assert_eq!(scene.binding_count(), 3);

    scene.remove_body(b);
    scene.tick(0.1);
    assert_eq!(scene.binding_count(), 2);
    assert!(scene.bindings().iter().all(|binding| !binding.depends_on(b)));
}

#[test]
fn infinite_mass_dependency_is_permanent() {
    let mut scene: Scene = Scene::new();
    scene.enable_stats(true);
    let wall = scene.spawn_polygon(square(0.0, 0.0), f64::INFINITY, RgbColor::BLACK);
    let ball_a = spawn_square(&mut scene, 10.0, 1.0);
    let ball_b = spawn_square(&mut scene, -10.0, 1.0);
    scene.create_physics_collision(1.0, ball_a, wall);
    scene.create_physics_collision(1.0, ball_b, wall);

    scene.remove_body(ball_a);
    scene.tick(0.1);
    assert_eq!(scene.binding_count(), 1);

    // Losing the wall itself does not purge, the binding just stops running.
    scene.remove_body(wall);
    scene.tick(0.1);
    assert_eq!(scene.binding_count(), 1);
    assert_eq!(scene.last_tick_stats().bindings_skipped, 1);
    assert_eq!(scene.last_tick_stats().bindings_run, 0);
}

#[test]
fn collision_handler_fires_once_per_contact() {
    let mut scene: Scene = Scene::new();
    let a = spawn_square(&mut scene, 0.0, 1.0);
    let b = spawn_square(&mut scene, 10.0, 1.0);
    set_velocity(&mut scene, a, Vec2::new(5.0, 0.0));

    let hits = Rc::new(Cell::new(0u32));
    let counter = hits.clone();
    scene.create_collision(a, b, move |_: &mut Body, _: &mut Body, _: Vec2| {
        counter.set(counter.get() + 1);
    });

    // Passes straight through: a at 0, 5, 10 (contact), 15, 20
    ticks(&mut scene, 5);
    assert_eq!(hits.get(), 1);

    // Back again: 25, 20, 15, 10 (contact)
    set_velocity(&mut scene, a, Vec2::new(-5.0, 0.0));
    ticks(&mut scene, 4);
    assert_eq!(hits.get(), 2);
}

#[test]
fn sticky_contact_does_not_refire_while_overlapping() {
    let mut scene: Scene = Scene::new();
    let a = spawn_square(&mut scene, 0.0, 1.0);
    let b = spawn_square(&mut scene, 3.0, 1.0);
    set_velocity(&mut scene, a, Vec2::new(2.0, 0.0));

    let hits = Rc::new(Cell::new(0u32));
    let counter = hits.clone();
    scene.create_collision(a, b, move |a: &mut Body, _: &mut Body, _: Vec2| {
        counter.set(counter.get() + 1);
        a.add_impulse(Vec2::new(-2.0, 0.0));
    });

    // a at 0 (apart), 2 (contact, stopped)
    ticks(&mut scene, 2);
    assert_eq!(hits.get(), 1);
    assert_eq!(scene.body(a).unwrap().velocity(), Vec2::zero());

    for _ in 0..5 {
        scene.tick(1.0);
    }
    assert_eq!(hits.get(), 1);
}

#[test]
fn elastic_collision_swaps_equal_masses() {
    let mut scene: Scene = Scene::new();
    let a = spawn_square(&mut scene, 0.0, 1.0);
    let b = spawn_square(&mut scene, 9.0, 1.0);
    set_velocity(&mut scene, a, Vec2::new(5.0, 0.0));
    scene.create_physics_collision(1.0, a, b);

    // a at 0, 5, then 10 overlapping b at 9
    ticks(&mut scene, 3);
    assert!(scene.body(a).unwrap().velocity().is_close(Vec2::zero()));
    assert!(scene.body(b).unwrap().velocity().is_close(Vec2::new(5.0, 0.0)));
    assert_eq!(scene.body_count(), 2);
    assert_eq!(scene.binding_count(), 1);
}

#[test]
fn ball_bounces_off_wall() {
    let mut scene: Scene = Scene::new();
    let wall = scene.spawn_polygon(square(10.0, 0.0), f64::INFINITY, RgbColor::BLACK);
    let ball = spawn_square(&mut scene, 0.0, 3.0);
    set_velocity(&mut scene, ball, Vec2::new(4.5, 0.0));
    scene.create_physics_collision(1.0, ball, wall);

    // 0, 4.5, 9 (contact)
    ticks(&mut scene, 3);
    assert!(scene.body(ball).unwrap().velocity().is_close(Vec2::new(-4.5, 0.0)));
    assert_eq!(scene.body(wall).unwrap().velocity(), Vec2::zero());
    assert!(scene.body(wall).unwrap().centroid().is_close(Vec2::new(10.0, 0.0)));
}

#[test]
fn gravity_respects_scene_min_distance() {
    let mut near: Scene = Scene::with_settings(SceneSettings {
        gravity_min_distance: 100.0,
        ..SceneSettings::default()
    });
    let a = spawn_square(&mut near, 0.0, 10.0);
    let b = spawn_square(&mut near, 50.0, 10.0);
    near.create_newtonian_gravity(1.0, a, b);
    near.tick(1.0);
    assert_eq!(near.body(a).unwrap().velocity(), Vec2::zero());

    let mut far: Scene = Scene::new();
    let a = spawn_square(&mut far, 0.0, 10.0);
    let b = spawn_square(&mut far, 50.0, 10.0);
    far.create_newtonian_gravity(1.0, a, b);
    far.tick(1.0);
    assert!(far.body(a).unwrap().velocity().x > 0.0);
    assert!(far.body(b).unwrap().velocity().x < 0.0);
}

#[test]
fn spring_pulls_bodies_together() {
    let mut scene: Scene = Scene::new();
    let a = spawn_square(&mut scene, 0.0, 1.0);
    let b = spawn_square(&mut scene, 4.0, 1.0);
    scene.create_spring(0.5, a, b);

    scene.tick(0.1);
    // F = 0.5 * 4 = 2, dv = 2 * 0.1
    assert!(scene.body(a).unwrap().velocity().is_close(Vec2::new(0.2, 0.0)));
    assert!(scene.body(b).unwrap().velocity().is_close(Vec2::new(-0.2, 0.0)));
}

#[test]
fn creator_additions_are_deferred() {
    let mut scene: Scene = Scene::new();
    spawn_square(&mut scene, 0.0, 1.0);

    let runs = Rc::new(Cell::new(0u32));
    let spawned_id = Rc::new(Cell::new(0u32));
    let (runs_in, id_out) = (runs.clone(), spawned_id.clone());
    let mut done = false;
    scene.add_force_fn(move |ctx| {
        if done {
            return;
        }
        done = true;
        let mut body = Body::new(square(50.0, 0.0), 1.0, RgbColor::WHITE);
        body.set_velocity(Vec2::new(1.0, 0.0));
        let id = ctx.add_body(body);
        // Not part of this tick's body list yet
        assert!(ctx.body(id).is_none());
        id_out.set(id.raw());
        ctx.add_binding(Binding::new(CountRuns(runs_in.clone())));
    });

    scene.tick(1.0);
    assert_eq!(scene.body_count(), 2);
    assert_eq!(scene.binding_count(), 2);
    assert_eq!(runs.get(), 0);
    // Spawned body was integrated in the tick that created it
    let id = BodyId::from_raw(spawned_id.get());
    assert_eq!(id.raw(), 2);
    assert!(scene.body(id).unwrap().centroid().is_close(Vec2::new(51.0, 0.0)));

    scene.tick(1.0);
    assert_eq!(runs.get(), 1);
}

#[test]
fn bindings_run_in_registration_order() {
    let mut scene: Scene = Scene::new();
    let order = Rc::new(std::cell::RefCell::new(Vec::new()));
    for i in 0..3 {
        let order = order.clone();
        scene.add_force_fn(move |_| order.borrow_mut().push(i));
    }
    scene.tick(0.1);
    assert_eq!(*order.borrow(), vec![0, 1, 2]);
}

#[test]
fn unbound_creators_live_forever() {
    let mut scene: Scene = Scene::new();
    let a = spawn_square(&mut scene, 0.0, 1.0);
    let runs = Rc::new(Cell::new(0u32));
    scene.add_force_creator(CountRuns(runs.clone()));

    scene.remove_body(a);
    ticks(&mut scene, 3);
    assert_eq!(scene.binding_count(), 1);
    assert_eq!(runs.get(), 3);
}

#[test]
fn custom_creator_with_dependencies_is_purged() {
    let mut scene: Scene = Scene::new();
    let a = spawn_square(&mut scene, 0.0, 1.0);
    let runs = Rc::new(Cell::new(0u32));
    scene.add_force_creator_with_bodies(CountRuns(runs.clone()), vec![Dependency::removable(a)]);

    scene.tick(0.1);
    scene.remove_body(a);
    scene.tick(0.1);
    assert_eq!(runs.get(), 1);
    assert_eq!(scene.binding_count(), 0);
}

#[test]
#[should_panic(expected = "is not in the scene")]
fn creating_a_law_on_unknown_body_panics() {
    let mut scene: Scene = Scene::new();
    let a = spawn_square(&mut scene, 0.0, 1.0);
    scene.create_spring(1.0, a, BodyId::from_raw(99));
}

#[test]
fn find_collision_between_bodies() {
    let mut scene: Scene = Scene::new();
    let a = spawn_square(&mut scene, 0.0, 1.0);
    let b = spawn_square(&mut scene, 1.5, 1.0);
    let c = spawn_square(&mut scene, 10.0, 1.0);

    let hit = scene.find_collision_between(a, b).unwrap();
    assert!(hit.collided);
    assert!(hit.axis.is_close(Vec2::new(1.0, 0.0)));
    assert!(!scene.find_collision_between(a, c).unwrap().collided);
    assert!(scene.find_collision_between(a, BodyId::from_raw(77)).is_none());
}

#[test]
fn render_buffers_follow_draw_order() {
    let mut scene: Scene = Scene::new();
    scene.spawn_polygon(
        vec![Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0)],
        1.0,
        RgbColor::new(1.0, 0.0, 0.0),
    );
    scene.spawn_polygon(square(5.0, 5.0), f64::INFINITY, RgbColor::BLACK);

    assert_eq!(scene.extract_render_buffers(), 2);
    assert_eq!(scene.render_offsets(), &[0, 3, 7]);
    assert_eq!(scene.render_vertices().len(), 14);
    assert_eq!(&scene.render_vertices()[..6], &[0.0, 0.0, 1.0, 0.0, 0.0, 1.0]);
    assert_eq!(scene.render_colors(), &[0xFF0000FF, 0xFF000000]);

    // Buffers are rebuilt, not appended to
    scene.extract_render_buffers();
    assert_eq!(scene.render_vertices().len(), 14);
}

#[test]
fn disabling_stats_zeroes_snapshot() {
    let mut scene: Scene = Scene::new();
    scene.enable_stats(true);
    spawn_square(&mut scene, 0.0, 1.0);
    scene.tick(0.1);
    assert_eq!(scene.last_tick_stats().body_count, 1);

    scene.enable_stats(false);
    scene.tick(0.1);
    assert_eq!(*scene.last_tick_stats(), TickStats::default());
}

#[test]
fn settings_load_from_json() {
    let mut scene: Scene = Scene::new();
    scene
        .load_settings_json(r#"{ "gravity_min_distance": 1.0, "stats_enabled": true }"#)
        .unwrap();
    assert_eq!(scene.settings().gravity_min_distance, 1.0);
    assert!(scene.settings().stats_enabled);
    assert!(scene.load_settings_json(r#"{ "max_tick_dt": -2 }"#).is_err());
    assert_eq!(scene.settings().gravity_min_distance, 1.0);
}

/// Inelastic contact at tick 2, then `extra` ticks of sustained overlap.
fn inelastic_pair_after(extra: usize) -> (Vec2, Vec2) {
    let mut scene: Scene = Scene::new();
    let a = spawn_square(&mut scene, 0.0, 1.0);
    let b = spawn_square(&mut scene, 3.0, 1.0);
    set_velocity(&mut scene, a, Vec2::new(2.0, 0.0));
    scene.create_physics_collision(0.0, a, b);

    // a at 0 (apart), then 2 (contact): both leave at (1, 0) still overlapping
    ticks(&mut scene, 2 + extra);
    assert!(scene.find_collision_between(a, b).unwrap().collided);
    (scene.body(a).unwrap().velocity(), scene.body(b).unwrap().velocity())
}

#[test]
fn sustained_overlap_applies_impulse_once() {
    for extra in [1, 3, 10] {
        let (va, vb) = inelastic_pair_after(extra);
        assert!(va.is_close(Vec2::new(1.0, 0.0)), "after {extra} ticks: {va:?}");
        assert!(vb.is_close(Vec2::new(1.0, 0.0)), "after {extra} ticks: {vb:?}");
    }
}

#[test]
#[should_panic(expected = "which is not in the scene")]
fn binding_on_unadded_body_is_rejected() {
    let mut scene: Scene = Scene::new();
    let body = Body::new(square(0.0, 0.0), 1.0, RgbColor::WHITE);
    // Taken before add_body: still UNASSIGNED
    let dependency = Dependency::of(&body);
    scene.add_body(body);
    scene.add_force_creator_with_bodies(CountRuns(Rc::new(Cell::new(0))), vec![dependency]);
}

#[test]
fn creator_may_bind_to_a_body_it_just_spawned() {
    let mut scene: Scene = Scene::new();
    let runs = Rc::new(Cell::new(0u32));
    let runs_in = runs.clone();
    let mut done = false;
    scene.add_force_fn(move |ctx| {
        if done {
            return;
        }
        done = true;
        let id = ctx.add_body(Body::new(square(0.0, 0.0), 1.0, RgbColor::WHITE));
        ctx.add_binding(Binding::with_dependencies(
            CountRuns(runs_in.clone()),
            vec![Dependency::removable(id)],
        ));
    });

    scene.tick(0.1);
    scene.tick(0.1);
    assert_eq!(scene.binding_count(), 2);
    assert_eq!(runs.get(), 1);
}

#[test]
#[should_panic(expected = "which is not in the scene")]
fn creator_binding_on_unknown_body_is_rejected() {
    let mut scene: Scene = Scene::new();
    scene.add_force_fn(|ctx| {
        ctx.add_binding(Binding::with_dependencies(
            CountRuns(Rc::new(Cell::new(0))),
            vec![Dependency::removable(BodyId::from_raw(99))],
        ));
    });
    scene.tick(0.1);
}
