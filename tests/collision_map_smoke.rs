#[cfg(target_arch = "wasm32")]
use wasm_bindgen_test::wasm_bindgen_test;

use tilecollide_engine::{class_active, class_fixed, trace, TileGrid, Vec2, World};

const LEVEL: &str = r#"{"tilesize": 16, "data": [
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1]
]}"#;

#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
#[cfg_attr(not(target_arch = "wasm32"), test)]
fn level_json_traces_without_tunneling() {
    let grid = TileGrid::from_layer_json(LEVEL).unwrap();
    assert_eq!((grid.width(), grid.height()), (10, 6));

    // Far faster than a tile per step, straight into the right wall
    let res = trace(&grid, Vec2::new(20.0, 20.0), Vec2::new(5000.0, 0.0), Vec2::new(8.0, 8.0));
    assert!(res.collision.x);
    assert_eq!(res.hit_tile.0, 1);
    assert_eq!(res.pos.x, 144.0 - 8.0);

    // And down into the floor
    let res = trace(&grid, Vec2::new(20.0, 20.0), Vec2::new(0.0, 5000.0), Vec2::new(8.0, 8.0));
    assert!(res.collision.y);
    assert_eq!(res.pos.y, 80.0 - 8.0);

    let layer = grid.to_layer();
    assert_eq!(layer.data[5], vec![1; 10]);
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
#[cfg_attr(not(target_arch = "wasm32"), test)]
fn world_facade_runs_a_level() {
    let mut world = World::new(4, 4, 16.0).unwrap();
    world.load_collision_map(LEVEL.to_string()).unwrap();
    assert_eq!((world.width(), world.height()), (10, 6));
    world.set_gravity(600.0);

    let player = world.spawn_body(40.0, 10.0, 8.0, 14.0, class_active());
    let crate_id = world.spawn_body(90.0, 60.0, 16.0, 16.0, class_fixed());
    assert_ne!(player, 0);
    assert_ne!(crate_id, 0);
    assert!(world.set_body_gravity_factor(crate_id, 0.0));

    // Invalid spawns come back as id 0
    assert_eq!(world.spawn_body(0.0, 0.0, -4.0, 4.0, class_active()), 0);
    assert_eq!(world.spawn_body(0.0, 0.0, 4.0, 4.0, 3), 0);

    for _ in 0..120 {
        world.step(1.0 / 60.0);
    }

    assert!(world.body_standing(player));
    assert_eq!(world.body_y(player), Some(80.0 - 14.0));
    assert_eq!(world.body_y(crate_id), Some(60.0));
    assert_eq!(world.body_count(), 2);

    // Walk right into the fixed crate: it stops the player, not the other way round
    world.set_body_velocity(player, 80.0, 0.0);
    world.set_body_accel(player, 400.0, 0.0);
    for _ in 0..120 {
        world.step(1.0 / 60.0);
    }
    let px = world.body_x(player).unwrap();
    assert!(px + 8.0 <= 90.0 + 1e-3, "player at {} went into the crate", px);
    assert_eq!(world.body_x(crate_id), Some(90.0));

    assert!(world.remove_body(crate_id));
    assert_eq!(world.body_x(crate_id), None);
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
#[cfg_attr(not(target_arch = "wasm32"), test)]
fn slope_tiles_redirect_falling_bodies() {
    let mut world = World::new(3, 3, 16.0).unwrap();
    world.set_tile(1, 1, 2);
    assert_eq!(world.tile_at(1, 1), 2);
    assert_eq!(world.tile_at_px(20.0, 20.0), 2);

    let id = world.spawn_body(20.0, 10.0, 4.0, 4.0, class_active());
    world.set_body_max_vel(id, 200.0, 200.0);
    world.set_body_velocity(id, 0.0, 120.0);
    world.set_max_step(0.1);
    world.step(0.1);

    // Slid down-left along the 45° line instead of stopping dead
    let vx = world.body_vel_x(id).unwrap();
    let vy = world.body_vel_y(id).unwrap();
    assert!(vx < 0.0 && vy > 0.0);
    assert!((vx * vx + vy * vy).sqrt() <= 120.0 + 1e-3);
    assert!(world.body_standing(id));
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
#[cfg_attr(not(target_arch = "wasm32"), test)]
fn non_finite_max_velocity_is_rejected() {
    let mut world = World::new(8, 8, 16.0).unwrap();
    let id = world.spawn_body(40.0, 40.0, 8.0, 8.0, class_active());
    world.set_body_velocity(id, 30.0, 0.0);

    assert!(!world.set_body_max_vel(id, f32::NAN, 100.0));
    assert!(!world.set_body_max_vel(id, 100.0, f32::INFINITY));
    assert!(!world.set_body_max_vel(99, 100.0, 100.0));
    assert!(world.set_body_max_vel(id, -50.0, 50.0));

    world.step(1.0 / 60.0);
    assert_eq!(world.body_vel_x(id), Some(30.0));
    assert!((world.body_x(id).unwrap() - 40.5).abs() < 1e-4);
}
