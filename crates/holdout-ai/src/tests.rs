use glam::{Vec2, Vec3};

use holdout_core::enums::{EnemyState, EnemyTier};
use holdout_map::ArenaMap;

use crate::steering::{slide_around_walls, ChaseSteering, SteeringContext, SteeringDelegate};

fn open_map() -> ArenaMap {
    ArenaMap::from_ascii(
        &[
            "############",
            "#P........E#",
            "#..........#",
            "#....D.....#",
            "#..........#",
            "############",
        ],
        1.0,
    )
    .unwrap()
}

fn context(map: &ArenaMap, tier: EnemyTier, position: Vec3, player: Vec3) -> SteeringContext<'_> {
    SteeringContext {
        entity_bits: 1,
        tier,
        state: EnemyState::Chasing,
        position,
        player_position: player,
        attack_range: 10.0,
        elapsed_secs: 0.0,
        map,
    }
}

#[test]
fn test_grunt_heads_straight_for_player() {
    let map = open_map();
    let ctx = context(
        &map,
        EnemyTier::Grunt,
        Vec3::new(8.5, 0.0, 2.5),
        Vec3::new(2.5, 0.0, 2.5),
    );
    let dir = ChaseSteering.steer(&ctx);
    assert!((dir - Vec2::new(-1.0, 0.0)).length() < 1e-5, "got {dir:?}");
}

#[test]
fn test_zero_distance_holds_position() {
    let map = open_map();
    let p = Vec3::new(4.5, 0.0, 2.5);
    let ctx = context(&map, EnemyTier::Tank, p, p);
    assert_eq!(ChaseSteering.steer(&ctx), Vec2::ZERO);
}

#[test]
fn test_spitter_keeps_its_distance() {
    let map = open_map();
    let player = Vec3::new(1.5, 0.0, 2.5);

    // Too close (hold range is 7): backs away.
    let ctx = context(&map, EnemyTier::Spitter, Vec3::new(4.5, 0.0, 2.5), player);
    let dir = ChaseSteering.steer(&ctx);
    assert!(dir.x > 0.9, "spitter should back off, got {dir:?}");

    // Inside the comfortable band: holds.
    let ctx = context(&map, EnemyTier::Spitter, Vec3::new(10.0, 0.0, 2.5), player);
    assert_eq!(ChaseSteering.steer(&ctx), Vec2::ZERO);
}

#[test]
fn test_runner_weave_stays_unit_length() {
    let map = open_map();
    for step in 0..20 {
        let mut ctx = context(
            &map,
            EnemyTier::Runner,
            Vec3::new(9.5, 0.0, 2.5),
            Vec3::new(1.5, 0.0, 2.5),
        );
        ctx.elapsed_secs = step as f64 * 0.1;
        let dir = ChaseSteering.steer(&ctx);
        assert!((dir.length() - 1.0).abs() < 1e-4);
        assert!(dir.x < 0.0, "runner should still close in");
    }
}

#[test]
fn test_slide_falls_back_to_free_axis() {
    let map = open_map();
    // Hugging the north wall at row 4, wanting to go north-west.
    let pos = Vec3::new(5.5, 0.0, 4.5);
    let desired = Vec2::new(-0.6, 0.8).normalize();
    let dir = slide_around_walls(&map, pos, desired, 0.8);
    assert_eq!(dir, Vec2::new(-1.0, 0.0));
}

#[test]
fn test_slide_keeps_clear_direction() {
    let map = open_map();
    let desired = Vec2::new(1.0, 0.0);
    assert_eq!(
        slide_around_walls(&map, Vec3::new(3.5, 0.0, 2.5), desired, 0.6),
        desired
    );
}
