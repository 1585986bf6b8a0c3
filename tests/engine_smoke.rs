use polyscene_engine::Engine;

const SQUARE_AT_ORIGIN: [f64; 8] = [-1.0, -1.0, 1.0, -1.0, 1.0, 1.0, -1.0, 1.0];

fn square_at(x: f64, y: f64) -> Vec<f64> {
    SQUARE_AT_ORIGIN
        .chunks(2)
        .flat_map(|p| [p[0] + x, p[1] + y])
        .collect()
}

#[test]
fn engine_rejects_bad_input_without_panicking() {
    let mut engine = Engine::new();
    assert_eq!(engine.add_polygon(vec![0.0, 0.0, 1.0, 0.0], 1.0, 1.0, 1.0, 1.0, 0), 0);
    assert_eq!(engine.add_polygon(square_at(0.0, 0.0), 0.0, 1.0, 1.0, 1.0, 0), 0);
    assert_eq!(engine.add_polygon(square_at(0.0, 0.0), f64::NAN, 1.0, 1.0, 1.0, 0), 0);

    let a = engine.add_polygon(square_at(0.0, 0.0), 1.0, 1.0, 0.0, 0.0, 7);
    assert_eq!(a, 1);
    assert!(!engine.set_velocity(99, 1.0, 0.0));
    assert!(!engine.create_spring(1.0, a, a));
    assert!(!engine.create_physics_collision(2.0, a, 99));
    assert!(!engine.tick(-1.0));
    assert!(!engine.tick(f64::NAN));

    assert!(engine.remove_body(a));
    assert!(!engine.set_velocity(a, 1.0, 0.0));
    assert!(!engine.create_drag(1.0, a));
    assert!(engine.tick(0.1));
    assert_eq!(engine.body_count(), 0);
    assert!(engine.get_centroid(a).is_empty());
    assert_eq!(engine.tag_of(a), None);
}

#[test]
fn engine_runs_a_collision() {
    let mut engine = Engine::new();
    engine.enable_stats(true);
    let a = engine.add_polygon(square_at(0.0, 0.0), 1.0, 1.0, 1.0, 1.0, 1);
    let b = engine.add_polygon(square_at(9.0, 0.0), 1.0, 1.0, 1.0, 1.0, 2);
    assert!(engine.set_velocity(a, 5.0, 0.0));
    assert!(engine.create_physics_collision(1.0, a, b));
    assert_eq!(engine.binding_count(), 1);

    for _ in 0..3 {
        assert!(engine.tick(1.0));
    }
    assert_eq!(engine.tick_count(), 3);

    let va = engine.get_velocity(a);
    let vb = engine.get_velocity(b);
    assert!(va[0].abs() < 1e-9);
    assert!((vb[0] - 5.0).abs() < 1e-9);
    assert_eq!(engine.tag_of(b), Some(2));
    assert_eq!(engine.last_tick_stats().bindings_run(), 1);
}

#[test]
fn engine_render_buffers() {
    let mut engine = Engine::new();
    engine.add_polygon(square_at(0.0, 0.0), 1.0, 0.0, 1.0, 0.0, 0);
    engine.add_polygon(vec![0.0, 0.0, 2.0, 0.0, 1.0, 2.0], f64::INFINITY, 0.0, 0.0, 1.0, 0);

    assert_eq!(engine.extract_render_buffers(), 2);
    assert_eq!(engine.vertices_len(), 14);
    assert_eq!(engine.offsets_len(), 3);
    assert_eq!(engine.colors_len(), 2);
    assert_eq!(engine.body_id_at(1), 2);
    assert_eq!(engine.body_id_at(5), 0);
}

#[test]
fn engine_settings_round_trip() {
    let engine = Engine::with_settings_json(r#"{ "max_tick_dt": 0.02 }"#.to_string())
        .unwrap_or_else(|_| panic!("settings should parse"));
    assert!(engine.settings_json().contains("0.02"));
}
