//! Arena layouts: the tile grid plus every named point the simulation needs.
//!
//! Layouts are authored as character rows:
//!
//! | char | meaning |
//! |---|---|
//! | `#` | wall |
//! | `.` | floor |
//! | `P` | player spawn (floor) |
//! | `E` | enemy spawn (floor) |
//! | `D` | delivery point (floor), exactly one |
//! | `C` | power cell / item spawn (floor) |
//! | `B` | explosive barrel (floor) |
//!
//! Row 0 is the lowest `z`.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::grid::TileGrid;
use crate::MapError;

/// Serialized map description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapData {
    pub tile_size: f32,
    pub rows: Vec<String>,
}

/// Validated arena map.
#[derive(Debug, Clone)]
pub struct ArenaMap {
    pub grid: TileGrid,
    pub player_spawns: Vec<Vec3>,
    pub enemy_spawns: Vec<Vec3>,
    pub delivery_point: Vec3,
    pub item_spawns: Vec<Vec3>,
    pub barrel_spawns: Vec<Vec3>,
}

impl ArenaMap {
    /// Parse a character layout. Fails fast on malformed data.
    pub fn from_ascii<S: AsRef<str>>(rows: &[S], tile_size: f32) -> Result<Self, MapError> {
        let height = rows.len();
        let width = rows.first().map(|r| r.as_ref().chars().count()).unwrap_or(0);
        if height == 0 || width == 0 {
            return Err(MapError::Empty);
        }

        let mut walkable = Vec::with_capacity(width * height);
        let mut markers: Vec<(char, u32, u32)> = Vec::new();

        for (row_idx, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            let len = row.chars().count();
            if len != width {
                return Err(MapError::RaggedRow {
                    row: row_idx,
                    expected: width,
                    actual: len,
                });
            }
            for (col_idx, ch) in row.chars().enumerate() {
                match ch {
                    '#' => walkable.push(false),
                    '.' => walkable.push(true),
                    'P' | 'E' | 'D' | 'C' | 'B' => {
                        walkable.push(true);
                        markers.push((ch, col_idx as u32, row_idx as u32));
                    }
                    other => {
                        return Err(MapError::UnknownTile {
                            ch: other,
                            row: row_idx,
                            col: col_idx,
                        })
                    }
                }
            }
        }

        let grid = TileGrid::new(width as u32, height as u32, tile_size, walkable)?;

        let mut player_spawns = Vec::new();
        let mut enemy_spawns = Vec::new();
        let mut delivery_points = Vec::new();
        let mut item_spawns = Vec::new();
        let mut barrel_spawns = Vec::new();
        for (ch, col, row) in markers {
            let center = grid.tile_center(col, row);
            match ch {
                'P' => player_spawns.push(center),
                'E' => enemy_spawns.push(center),
                'D' => delivery_points.push(center),
                'C' => item_spawns.push(center),
                'B' => barrel_spawns.push(center),
                _ => {}
            }
        }

        if player_spawns.is_empty() {
            return Err(MapError::MissingPlayerSpawn);
        }
        if enemy_spawns.is_empty() {
            return Err(MapError::MissingEnemySpawn);
        }
        let delivery_point = match delivery_points.as_slice() {
            [point] => *point,
            points => return Err(MapError::DeliveryPointCount(points.len())),
        };

        Ok(Self {
            grid,
            player_spawns,
            enemy_spawns,
            delivery_point,
            item_spawns,
            barrel_spawns,
        })
    }

    /// Build from deserialized map data.
    pub fn from_data(data: &MapData) -> Result<Self, MapError> {
        Self::from_ascii(&data.rows, data.tile_size)
    }

    /// Parse a JSON `MapData` document.
    pub fn from_json(json: &str) -> Result<Self, MapError> {
        let data: MapData = serde_json::from_str(json)?;
        Self::from_data(&data)
    }

    /// Whether a world point is walkable.
    pub fn is_walkable(&self, x: f32, z: f32) -> bool {
        self.grid.is_walkable(x, z)
    }

    pub fn is_walkable_at(&self, pos: Vec3) -> bool {
        self.grid.is_walkable_at(pos)
    }
}
