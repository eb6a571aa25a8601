//! TileGrid: walkability grid with world-space queries.

use glam::Vec3;

use crate::MapError;

/// Walkable/blocked tile grid. Tile (0, 0) covers world `x, z` in
/// `[0, tile_size)`; rows grow toward +z.
#[derive(Debug, Clone)]
pub struct TileGrid {
    /// Number of columns (x).
    width: u32,
    /// Number of rows (z).
    height: u32,
    /// World units per tile side.
    tile_size: f32,
    /// Row-major walkable flags.
    walkable: Vec<bool>,
}

impl TileGrid {
    /// Create a grid from row-major walkable flags.
    pub fn new(width: u32, height: u32, tile_size: f32, walkable: Vec<bool>) -> Result<Self, MapError> {
        if width == 0 || height == 0 {
            return Err(MapError::Empty);
        }
        if !(tile_size > 0.0 && tile_size.is_finite()) {
            return Err(MapError::InvalidTileSize(tile_size));
        }
        let expected = width as usize * height as usize;
        if walkable.len() != expected {
            return Err(MapError::TileCountMismatch {
                expected,
                actual: walkable.len(),
            });
        }
        Ok(Self {
            width,
            height,
            tile_size,
            walkable,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    /// World extent along x and z.
    pub fn world_size(&self) -> (f32, f32) {
        (
            self.width as f32 * self.tile_size,
            self.height as f32 * self.tile_size,
        )
    }

    /// Tile containing a world point. None outside the grid.
    pub fn tile_at(&self, x: f32, z: f32) -> Option<(u32, u32)> {
        if !(x.is_finite() && z.is_finite()) || x < 0.0 || z < 0.0 {
            return None;
        }
        let col = (x / self.tile_size).floor() as u32;
        let row = (z / self.tile_size).floor() as u32;
        if col >= self.width || row >= self.height {
            return None;
        }
        Some((col, row))
    }

    /// Walkable flag of a tile. Out-of-range tiles are blocked.
    pub fn is_tile_walkable(&self, col: u32, row: u32) -> bool {
        if col >= self.width || row >= self.height {
            return false;
        }
        self.walkable[row as usize * self.width as usize + col as usize]
    }

    /// Whether a world point lies on a walkable tile. Outside the map is
    /// never walkable.
    pub fn is_walkable(&self, x: f32, z: f32) -> bool {
        self.tile_at(x, z)
            .is_some_and(|(col, row)| self.is_tile_walkable(col, row))
    }

    /// Convenience overload for 3D positions (height ignored).
    pub fn is_walkable_at(&self, pos: Vec3) -> bool {
        self.is_walkable(pos.x, pos.z)
    }

    /// World-space center of a tile at ground height.
    pub fn tile_center(&self, col: u32, row: u32) -> Vec3 {
        Vec3::new(
            (col as f32 + 0.5) * self.tile_size,
            0.0,
            (row as f32 + 0.5) * self.tile_size,
        )
    }

    /// Number of walkable tiles.
    pub fn walkable_count(&self) -> usize {
        self.walkable.iter().filter(|&&w| w).count()
    }
}
