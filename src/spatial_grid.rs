/*
 * Spatial Grid Module
 *
 * A uniform 3D hash grid used as a broad-phase for the neighbor scan. With the
 * cell edge equal to the vision range, every agent whose per-axis deltas are
 * all within the vision range sits in one of the 27 cells around the query
 * cell, so the grid only ever returns a superset of the real neighbors.
 *
 * Agents are not confined to a fixed world, so cells live in a hash map keyed
 * by integer cell coordinates instead of a dense array.
 */

use std::collections::HashMap;

use glam::{IVec3, Vec3};

pub struct SpatialGrid {
    pub cell_size: f32,
    cells: HashMap<IVec3, Vec<usize>>,
}

impl SpatialGrid {
    pub fn new(cell_size: f32) -> Self {
        Self {
            cell_size,
            cells: HashMap::new(),
        }
    }

    #[inline]
    pub fn cell_of(&self, position: Vec3) -> IVec3 {
        IVec3::new(
            (position.x / self.cell_size).floor() as i32,
            (position.y / self.cell_size).floor() as i32,
            (position.z / self.cell_size).floor() as i32,
        )
    }

    // Clear the grid, keeping the per-cell allocations around
    pub fn clear(&mut self) {
        for cell in self.cells.values_mut() {
            cell.clear();
        }
    }

    // Re-hash every position; cells left empty by the previous step are dropped
    pub fn rebuild(&mut self, cell_size: f32, positions: &[Vec3]) {
        if cell_size != self.cell_size {
            self.cells.clear();
            self.cell_size = cell_size;
        } else {
            self.cells.retain(|_, cell| !cell.is_empty());
            self.clear();
        }

        for (index, &position) in positions.iter().enumerate() {
            self.insert(index, position);
        }
    }

    #[inline]
    pub fn insert(&mut self, index: usize, position: Vec3) {
        let cell = self.cell_of(position);
        self.cells.entry(cell).or_default().push(index);
    }

    // Indices stored in the query cell and its 26 neighbors, in ascending order
    pub fn nearby_indices(&self, position: Vec3) -> Vec<usize> {
        let center = self.cell_of(position);
        let mut result = Vec::new();

        for dz in -1..=1 {
            for dy in -1..=1 {
                for dx in -1..=1 {
                    if let Some(indices) = self.cells.get(&(center + IVec3::new(dx, dy, dz))) {
                        result.extend_from_slice(indices);
                    }
                }
            }
        }

        // Same summation order as a full scan
        result.sort_unstable();
        result
    }

    pub fn occupied_cells(&self) -> usize {
        self.cells.values().filter(|cell| !cell.is_empty()).count()
    }
}
