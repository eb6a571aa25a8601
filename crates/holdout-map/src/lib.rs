//! Arena map for HOLDOUT.
//!
//! Tile walkability, spawn/delivery/item points, and layout loading.

pub use holdout_core as core;

pub mod grid;
pub mod layout;

use thiserror::Error;

// Re-export key types for convenience.
pub use grid::TileGrid;
pub use layout::{ArenaMap, MapData};

/// Malformed map data. Raised when a map is built, never during a tick.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("map has no tiles")]
    Empty,
    #[error("tile size must be positive and finite, got {0}")]
    InvalidTileSize(f32),
    #[error("expected {expected} tiles, got {actual}")]
    TileCountMismatch { expected: usize, actual: usize },
    #[error("row {row} has {actual} tiles, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[error("unknown tile {ch:?} at row {row}, column {col}")]
    UnknownTile { ch: char, row: usize, col: usize },
    #[error("map has no player spawn point")]
    MissingPlayerSpawn,
    #[error("map has no enemy spawn point")]
    MissingEnemySpawn,
    #[error("map needs exactly one delivery point, found {0}")]
    DeliveryPointCount(usize),
    #[error("invalid map JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests;
