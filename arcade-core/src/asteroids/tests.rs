use super::*;
use crate::constants::{ASTEROIDS_TICK_SECONDS, ROCK_CULL_MARGIN, ROCK_SPAWN_OFFSET};

const DT: f64 = ASTEROIDS_TICK_SECONDS;

fn world() -> World {
    World::new(WorldConfig::default(), 0xDEAD_BEEF).expect("default config is valid")
}

/// Keeps the spawner quiet for the length of a test.
fn quiet_world() -> World {
    let config = WorldConfig {
        rock_interval: 1.0e9,
        ..WorldConfig::default()
    };
    World::new(config, 0xDEAD_BEEF).expect("valid config")
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn invalid_configuration_is_rejected() {
    let mut config = WorldConfig::default();
    config.bounds.width = 0.0;
    assert!(matches!(
        World::new(config, 1),
        Err(ArcadeError::InvalidBounds { .. })
    ));

    let config = WorldConfig {
        rock_interval: 0.0,
        ..WorldConfig::default()
    };
    assert!(matches!(
        World::new(config, 1),
        Err(ArcadeError::InvalidInterval { .. })
    ));
}

#[test]
fn degenerate_entity_sizes_are_rejected() {
    for size in [0.0, -30.0, f64::NAN, f64::INFINITY] {
        let config = WorldConfig {
            ship_size: size,
            ..WorldConfig::default()
        };
        assert!(
            matches!(
                World::new(config, 1),
                Err(ArcadeError::InvalidSize { what: "ship", .. })
            ),
            "ship size {size}"
        );

        let config = WorldConfig {
            rock_size: size,
            ..WorldConfig::default()
        };
        assert!(
            matches!(
                World::new(config, 1),
                Err(ArcadeError::InvalidSize { what: "rock", .. })
            ),
            "rock size {size}"
        );
    }
}

#[test]
fn ship_starts_centred_at_rest() {
    let w = world();
    let ship = w.ship();
    assert_eq!(ship.velocity, Vec2::ZERO);
    assert!(close(ship.position.x + ship.size / 2.0, 400.0));
    assert!(close(ship.position.y + ship.size / 2.0, 300.0));
}

#[test]
fn ship_just_past_right_edge_wraps_to_left() {
    let mut w = quiet_world();
    let right = w.bounds().right();
    let left = w.bounds().left();
    w.ship_mut().position = Vec2::new(right + 0.5, 100.0);
    w.tick(DT);
    assert_eq!(w.ship().position.x, left);
    assert_eq!(w.ship().position.y, 100.0);
}

#[test]
fn wrap_axes_are_independent() {
    let bounds = Bounds::default();
    let wrapped = bounds.wrap(Vec2::new(-1.0, 650.0));
    assert_eq!(wrapped, Vec2::new(bounds.right(), bounds.bottom()));

    let wrapped = bounds.wrap(Vec2::new(250.0, -3.0));
    assert_eq!(wrapped, Vec2::new(250.0, bounds.top()));
}

#[test]
fn friction_damps_velocity_each_tick() {
    let mut w = quiet_world();
    w.ship_mut().velocity = Vec2::new(10.0, 0.0);
    let start = w.ship().position;
    w.tick(DT);

    assert!(close(w.ship().position.x, start.x + 10.0));
    assert!(close(w.ship().velocity.x, 9.5));
    w.tick(DT);
    assert!(close(w.ship().position.x, start.x + 19.5));
    assert!(close(w.ship().velocity.x, 9.025));
}

#[test]
fn rotation_changes_heading_only() {
    let mut ship = Ship::new(Vec2::ZERO, 10.0);
    ship.rotate_left();
    ship.rotate_left();
    ship.rotate_right();
    assert!(close(ship.angle, 10.0));
    assert_eq!(ship.velocity, Vec2::ZERO);
}

#[test]
fn engine_impulse_follows_heading() {
    let mut ship = Ship::new(Vec2::ZERO, 10.0);
    ship.fire_engine();
    assert!(close(ship.velocity.x, 0.0));
    assert!(close(ship.velocity.y, 10.0));

    for _ in 0..9 {
        ship.rotate_left();
    }
    ship.fire_engine();
    // Heading 90 degrees counter-clockwise points along -x.
    assert!(close(ship.velocity.x, -10.0));
    assert!(close(ship.velocity.y, 10.0));
}

#[test]
fn queued_commands_apply_on_next_tick() {
    let mut w = quiet_world();
    w.push_command(ShipCommand::FireEngine);
    assert_eq!(w.ship().velocity, Vec2::ZERO);

    let start_y = w.ship().position.y;
    w.tick(DT);
    assert!(close(w.ship().position.y, start_y + 10.0));
    assert!(close(w.ship().velocity.y, 9.5));
}

#[test]
fn rocks_drift_without_friction() {
    let mut w = quiet_world();
    w.insert_rock(Vec2::new(-150.0, -150.0), Vec2::new(1.5, 1.25));
    for _ in 0..10 {
        w.tick(DT);
    }
    let rock = w.rocks()[0];
    assert!(close(rock.position.x, -135.0));
    assert!(close(rock.position.y, -137.5));
    assert_eq!(rock.velocity, Vec2::new(1.5, 1.25));
}

#[test]
fn spawned_rock_spins_by_its_rotation_rate_each_tick() {
    let mut w = quiet_world();
    let id = w.spawn_rock();
    let spawned = *w.rocks().last().expect("just spawned");
    assert!(spawned.rotation_velocity > 0.0);
    assert_eq!(spawned.angle, 0.0);

    let ticks = 12;
    for _ in 0..ticks {
        w.tick(DT);
    }
    let rock = *w
        .rocks()
        .iter()
        .find(|rock| rock.id == id)
        .expect("rock still inside the cull margin");
    let n = f64::from(ticks);
    assert!(close(rock.angle, n * spawned.rotation_velocity));
    assert!(close(rock.position.x, spawned.position.x + n * spawned.velocity.x));
    assert!(close(rock.position.y, spawned.position.y + n * spawned.velocity.y));
    assert_eq!(rock.rotation_velocity, spawned.rotation_velocity);
}

#[test]
fn rock_beyond_margin_is_culled_and_within_margin_kept() {
    let mut w = quiet_world();
    let bounds = *w.bounds();
    let kept = w.insert_rock(
        Vec2::new(bounds.left() - ROCK_CULL_MARGIN + 1.0, 10.0),
        Vec2::ZERO,
    );
    w.insert_rock(
        Vec2::new(bounds.right() + ROCK_CULL_MARGIN + 1.0, 10.0),
        Vec2::ZERO,
    );
    w.insert_rock(
        Vec2::new(10.0, bounds.top() + ROCK_CULL_MARGIN + 0.5),
        Vec2::ZERO,
    );
    w.insert_rock(
        Vec2::new(10.0, bounds.bottom() - ROCK_CULL_MARGIN - 0.5),
        Vec2::ZERO,
    );

    assert_eq!(w.cull_rocks(), 3);
    assert_eq!(w.rocks().len(), 1);
    assert_eq!(w.rocks()[0].id, kept);
}

#[test]
fn tick_reports_culled_rocks() {
    let mut w = quiet_world();
    w.insert_rock(Vec2::new(-ROCK_CULL_MARGIN, 10.0), Vec2::new(-1.0, 0.0));
    let report = w.tick(DT);
    assert_eq!(report.culled, 1);
    assert!(w.rocks().is_empty());
}

#[test]
fn overlapping_boxes_collide_and_disjoint_do_not() {
    let a = Aabb::square(Vec2::new(0.0, 0.0), 10.0);
    assert!(a.overlaps(&Aabb::square(Vec2::new(9.999, 9.999), 10.0)));
    assert!(a.overlaps(&Aabb::square(Vec2::new(-5.0, 2.0), 6.0)));
    assert!(!a.overlaps(&Aabb::square(Vec2::new(10.0, 0.0), 10.0)));
    assert!(!a.overlaps(&Aabb::square(Vec2::new(0.0, 11.0), 10.0)));
    assert!(!a.overlaps(&Aabb::square(Vec2::new(20.0, 20.0), 1.0)));
}

#[test]
fn score_accumulates_elapsed_time() {
    let mut w = quiet_world();
    let ticks = 600;
    for _ in 0..ticks {
        assert!(!w.tick(DT).collided);
    }
    assert!((w.score() - ticks as f64 * DT).abs() < 1e-9);
    assert!((w.best_score() - w.score()).abs() < 1e-12);
}

#[test]
fn collision_soft_reset_keeps_rocks() {
    let mut w = world();
    for _ in 0..120 {
        w.tick(DT);
    }
    let rocks_before = w.rocks().len();
    assert!(rocks_before > 0);

    let ship_position = w.ship().position;
    let blocker = w.insert_rock(ship_position, Vec2::ZERO);
    let report = w.tick(DT);

    assert!(report.collided);
    assert_eq!(w.collisions(), 1);
    // Score restarts from zero and then credits the colliding tick.
    assert!(close(w.score(), DT));
    assert!(close(w.rock_timer(), DT));
    assert!(w.best_score() > 1.9);
    assert!(w.rocks().iter().any(|rock| rock.id == blocker));
}

#[test]
fn collision_clear_policy_empties_field() {
    let config = WorldConfig {
        collision_policy: CollisionPolicy::ClearRocks,
        ..WorldConfig::default()
    };
    let mut w = World::new(config, 9).expect("valid config");
    for _ in 0..60 {
        w.tick(DT);
    }
    let ship_position = w.ship().position;
    w.insert_rock(ship_position, Vec2::ZERO);
    let report = w.tick(DT);

    assert!(report.collided);
    assert!(report.spawned.is_none());
    assert!(w.rocks().is_empty());
}

#[test]
fn spawner_fires_on_interval() {
    // Large field: nothing can reach the ship within five seconds.
    let config = WorldConfig {
        bounds: Bounds::new(0.0, 0.0, 10_000.0, 10_000.0).expect("valid bounds"),
        ..WorldConfig::default()
    };
    let mut w = World::new(config, 3).expect("valid config");
    let spawned = (0..300).filter(|_| w.tick(DT).spawned.is_some()).count();
    // 5 seconds at one rock per half second, give or take float drift.
    assert!((9..=10).contains(&spawned), "spawned {spawned}");
}

#[test]
fn spawned_rocks_start_outside_an_edge_heading_inwards() {
    let mut w = quiet_world();
    let bounds = *w.bounds();
    for _ in 0..200 {
        let id = w.spawn_rock();
        let rock = *w.rocks().last().expect("just spawned");
        assert_eq!(rock.id, id);

        let on_left = close(rock.position.x, bounds.left() - ROCK_SPAWN_OFFSET);
        let on_right = close(rock.position.x, bounds.right() + ROCK_SPAWN_OFFSET);
        let on_bottom = close(rock.position.y, bounds.bottom() - ROCK_SPAWN_OFFSET);
        let on_top = close(rock.position.y, bounds.top() + ROCK_SPAWN_OFFSET);
        assert!(on_left || on_right || on_bottom || on_top, "rock {rock:?}");

        if on_left {
            assert!(rock.velocity.x > 0.0);
        }
        if on_right {
            assert!(rock.velocity.x < 0.0);
        }
        if on_bottom {
            assert!(rock.velocity.y > 0.0);
        }
        if on_top {
            assert!(rock.velocity.y < 0.0);
        }

        let speed_x = rock.velocity.x.abs();
        let speed_y = rock.velocity.y.abs();
        assert!((1.0..2.0).contains(&speed_x) && (1.0..2.0).contains(&speed_y));
        assert!((0.0..5.0).contains(&rock.rotation_velocity));
        assert!(rock.glyph.is_ascii_alphabetic());
        assert_eq!(rock.color[3], 1.0);
    }
}

#[test]
fn spawner_uses_all_four_edges() {
    let mut w = quiet_world();
    let bounds = *w.bounds();
    let mut seen = [false; 4];
    for _ in 0..400 {
        w.spawn_rock();
        let rock = *w.rocks().last().expect("just spawned");
        if rock.position.x < bounds.left() {
            seen[0] = true;
        } else if rock.position.x > bounds.right() {
            seen[1] = true;
        } else if rock.position.y < bounds.bottom() {
            seen[2] = true;
        } else {
            seen[3] = true;
        }
    }
    assert_eq!(seen, [true; 4]);
}

#[test]
fn same_seed_same_world() {
    let mut a = world();
    let mut b = world();
    for step in 0..500 {
        if step % 7 == 0 {
            a.push_command(ShipCommand::FireEngine);
            b.push_command(ShipCommand::FireEngine);
        }
        a.tick(DT);
        b.tick(DT);
    }
    assert_eq!(a.snapshot(), b.snapshot());
    assert_eq!(a.rng_state(), b.rng_state());
}

#[test]
fn spawner_advances_the_rng_and_snapshot_records_it() {
    let mut w = quiet_world();
    let before = w.rng_state();
    w.tick(DT);
    assert_eq!(w.rng_state(), before, "no spawn, no draws");

    w.spawn_rock();
    assert_ne!(w.rng_state(), before);
    assert_eq!(w.snapshot().rng_state, w.rng_state());

    let other = World::new(WorldConfig::default(), 0x0BAD_5EED).expect("valid config");
    assert_ne!(other.rng_state(), before);
}

#[test]
fn snapshot_serializes_to_json() {
    let mut w = world();
    for _ in 0..40 {
        w.tick(DT);
    }
    let json = serde_json::to_value(w.snapshot()).expect("snapshot serializes");
    assert_eq!(json["tick"], 40);
    assert!(json["rocks"].is_array());
    assert!(json["ship"]["position"]["x"].is_number());
}

#[test]
fn collision_policy_names() {
    assert_eq!(
        CollisionPolicy::from_name("soft-reset"),
        Some(CollisionPolicy::SoftReset)
    );
    assert_eq!(
        CollisionPolicy::from_name("CLEAR"),
        Some(CollisionPolicy::ClearRocks)
    );
    assert_eq!(CollisionPolicy::from_name("explode"), None);
    assert_eq!(CollisionPolicy::ClearRocks.as_str(), "clear_rocks");
}
