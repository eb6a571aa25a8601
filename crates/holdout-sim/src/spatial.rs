//! Uniform-grid spatial hash for proximity queries on the ground plane.
//!
//! Each entity is recorded under every cell its bounding circle's square
//! overlaps. A reverse map remembers those cells so removal touches only
//! them.

use std::collections::HashMap;

use hecs::Entity;

type Cell = (i32, i32);

/// Spatial hash of entity handles keyed by `floor(pos / cell_size)`.
#[derive(Debug)]
pub struct SpatialIndex {
    cell_size: f32,
    cells: HashMap<Cell, Vec<Entity>>,
    /// Reverse lookup: which cells hold each entity.
    entity_cells: HashMap<Entity, Vec<Cell>>,
    /// Reused buffer backing `query_near` results.
    scratch: Vec<Entity>,
}

impl SpatialIndex {
    /// Create an empty index. Non-positive cell sizes are rejected by config
    /// validation before an index is built.
    pub fn new(cell_size: f32) -> Self {
        Self {
            cell_size,
            cells: HashMap::new(),
            entity_cells: HashMap::new(),
            scratch: Vec::new(),
        }
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    fn cell_of(&self, v: f32) -> i32 {
        (v / self.cell_size).floor() as i32
    }

    /// Cells overlapped by the square bounding a circle.
    fn cell_range(&self, x: f32, z: f32, radius: f32) -> (Cell, Cell) {
        let r = radius.max(0.0);
        (
            (self.cell_of(x - r), self.cell_of(z - r)),
            (self.cell_of(x + r), self.cell_of(z + r)),
        )
    }

    /// Record an entity. Re-inserting an id replaces its previous cells.
    pub fn insert(&mut self, id: Entity, x: f32, z: f32, radius: f32) {
        if self.entity_cells.contains_key(&id) {
            self.remove(id);
        }
        let ((min_x, min_z), (max_x, max_z)) = self.cell_range(x, z, radius);
        let mut occupied = Vec::with_capacity(((max_x - min_x + 1) * (max_z - min_z + 1)) as usize);
        for cx in min_x..=max_x {
            for cz in min_z..=max_z {
                self.cells.entry((cx, cz)).or_default().push(id);
                occupied.push((cx, cz));
            }
        }
        self.entity_cells.insert(id, occupied);
    }

    /// Forget an entity. Unknown ids are ignored.
    pub fn remove(&mut self, id: Entity) {
        let Some(occupied) = self.entity_cells.remove(&id) else {
            return;
        };
        for cell in occupied {
            if let Some(bucket) = self.cells.get_mut(&cell) {
                bucket.retain(|&e| e != id);
                if bucket.is_empty() {
                    self.cells.remove(&cell);
                }
            }
        }
    }

    /// Move an entity: remove + insert.
    pub fn update(&mut self, id: Entity, x: f32, z: f32, radius: f32) {
        self.remove(id);
        self.insert(id, x, z, radius);
    }

    /// Every entity recorded in a cell overlapped by the query circle, each
    /// once, ordered by handle bits. Candidates only: callers do their own
    /// exact distance test. The slice borrows the index, so it cannot
    /// outlive the current tick's use of it.
    pub fn query_near(&mut self, x: f32, z: f32, radius: f32) -> &[Entity] {
        self.scratch.clear();
        let ((min_x, min_z), (max_x, max_z)) = self.cell_range(x, z, radius);
        for cx in min_x..=max_x {
            for cz in min_z..=max_z {
                if let Some(bucket) = self.cells.get(&(cx, cz)) {
                    self.scratch.extend_from_slice(bucket);
                }
            }
        }
        self.scratch.sort_unstable_by_key(|e| e.to_bits());
        self.scratch.dedup();
        &self.scratch
    }

    pub fn contains(&self, id: Entity) -> bool {
        self.entity_cells.contains_key(&id)
    }

    /// Number of distinct entities indexed.
    pub fn len(&self) -> usize {
        self.entity_cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entity_cells.is_empty()
    }

    /// Number of non-empty cells.
    pub fn occupied_cells(&self) -> usize {
        self.cells.len()
    }

    pub fn clear(&mut self) {
        self.cells.clear();
        self.entity_cells.clear();
        self.scratch.clear();
    }
}
