use glam::Vec3;

use crate::{ArenaMap, MapError, TileGrid};

const SMALL: [&str; 5] = [
    "#######",
    "#P...E#",
    "#.#.C.#",
    "#B..D.#",
    "#######",
];

#[test]
fn test_ascii_layout_points() {
    let map = ArenaMap::from_ascii(&SMALL, 2.0).unwrap();
    assert_eq!(map.grid.width(), 7);
    assert_eq!(map.grid.height(), 5);
    assert_eq!(map.player_spawns, vec![Vec3::new(3.0, 0.0, 3.0)]);
    assert_eq!(map.enemy_spawns, vec![Vec3::new(11.0, 0.0, 3.0)]);
    assert_eq!(map.item_spawns, vec![Vec3::new(9.0, 0.0, 5.0)]);
    assert_eq!(map.barrel_spawns, vec![Vec3::new(3.0, 0.0, 7.0)]);
    assert_eq!(map.delivery_point, Vec3::new(9.0, 0.0, 7.0));
}

#[test]
fn test_walkability_queries() {
    let map = ArenaMap::from_ascii(&SMALL, 2.0).unwrap();
    // Border wall.
    assert!(!map.is_walkable(1.0, 1.0));
    // Inner pillar at col 2, row 2.
    assert!(!map.is_walkable(5.0, 5.0));
    // Floor and marker tiles.
    assert!(map.is_walkable(3.0, 3.0));
    assert!(map.is_walkable_at(map.delivery_point));
    // Outside the grid is blocked, including negatives and NaN.
    assert!(!map.is_walkable(-0.1, 3.0));
    assert!(!map.is_walkable(3.0, 100.0));
    assert!(!map.is_walkable(f32::NAN, 3.0));
}

#[test]
fn test_tile_lookup_and_counts() {
    let map = ArenaMap::from_ascii(&SMALL, 2.0).unwrap();
    assert_eq!(map.grid.tile_at(3.9, 2.1), Some((1, 1)));
    assert_eq!(map.grid.tile_at(14.0, 0.0), None);
    assert_eq!(map.grid.world_size(), (14.0, 10.0));
    assert_eq!(map.grid.walkable_count(), 14);
}

#[test]
fn test_missing_markers_fail_fast() {
    let no_player = ["###", "#E#", "#D#", "###"];
    assert!(matches!(
        ArenaMap::from_ascii(&no_player, 1.0),
        Err(MapError::MissingPlayerSpawn)
    ));

    let no_enemy = ["###", "#P#", "#D#", "###"];
    assert!(matches!(
        ArenaMap::from_ascii(&no_enemy, 1.0),
        Err(MapError::MissingEnemySpawn)
    ));

    let two_delivery = ["#####", "#PDD#", "#E..#", "#####"];
    assert!(matches!(
        ArenaMap::from_ascii(&two_delivery, 1.0),
        Err(MapError::DeliveryPointCount(2))
    ));
}

#[test]
fn test_malformed_rows_fail_fast() {
    let ragged = ["####", "#P#", "#ED#"];
    assert!(matches!(
        ArenaMap::from_ascii(&ragged, 1.0),
        Err(MapError::RaggedRow { row: 1, .. })
    ));

    let unknown = ["#P?#", "#ED#"];
    assert!(matches!(
        ArenaMap::from_ascii(&unknown, 1.0),
        Err(MapError::UnknownTile { ch: '?', .. })
    ));

    let empty: [&str; 0] = [];
    assert!(matches!(ArenaMap::from_ascii(&empty, 1.0), Err(MapError::Empty)));

    assert!(matches!(
        ArenaMap::from_ascii(&SMALL, 0.0),
        Err(MapError::InvalidTileSize(_))
    ));
}

#[test]
fn test_grid_rejects_wrong_tile_count() {
    assert!(matches!(
        TileGrid::new(2, 2, 1.0, vec![true; 3]),
        Err(MapError::TileCountMismatch {
            expected: 4,
            actual: 3
        })
    ));
}

#[test]
fn test_map_from_json() {
    let json = r######"{ "tile_size": 1.0, "rows": ["#####", "#P.E#", "#.D.#", "#####"] }"######;
    let map = ArenaMap::from_json(json).unwrap();
    assert_eq!(map.delivery_point, Vec3::new(2.5, 0.0, 2.5));
    assert!(matches!(ArenaMap::from_json("[]"), Err(MapError::Parse(_))));
}
