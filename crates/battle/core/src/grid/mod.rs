//! Fixed-size rectangular cell grid.
//!
//! The grid answers occupancy and index-lookup queries; everything that
//! knows *what* occupies a cell lives on the battle aggregate. Cells are
//! stored in a flat vector indexed column-major (`x * height + y`).

mod path;

pub use path::{PathMap, populate_path_costs};

use crate::state::Position;

/// One grid cell. Owned exclusively by the battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub position: Position,
    pub occupied: bool,
    /// Traversal cost. Uniform today; kept per cell so terrain variants
    /// stay a data change.
    pub cost: u32,
}

/// Fixed rectangular cell array.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    width: u32,
    height: u32,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(width: u32, height: u32) -> Self {
        let mut cells = Vec::with_capacity((width * height) as usize);
        for x in 0..width {
            for y in 0..height {
                cells.push(Cell {
                    position: Position::new(x as i32, y as i32),
                    occupied: false,
                    cost: 1,
                });
            }
        }
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && position.x < self.width as i32
            && position.y < self.height as i32
    }

    /// Flat index of an in-bounds position. Caller guarantees bounds.
    #[inline]
    pub fn cell_index(&self, position: Position) -> usize {
        position.x as usize * self.height as usize + position.y as usize
    }

    /// Bounds-checked cell lookup; `None` outside the grid.
    pub fn cell_at(&self, x: i32, y: i32) -> Option<&Cell> {
        let position = Position::new(x, y);
        if !self.contains(position) {
            return None;
        }
        Some(&self.cells[self.cell_index(position)])
    }

    pub fn is_occupied(&self, position: Position) -> bool {
        self.contains(position) && self.cells[self.cell_index(position)].occupied
    }

    /// Marks a cell occupied. Out-of-bounds positions are ignored.
    pub fn occupy(&mut self, position: Position) {
        if self.contains(position) {
            let index = self.cell_index(position);
            self.cells[index].occupied = true;
        }
    }

    /// Releases a cell. Out-of-bounds positions are ignored.
    pub fn release(&mut self, position: Position) {
        if self.contains(position) {
            let index = self.cell_index(position);
            self.cells[index].occupied = false;
        }
    }

    /// Clears every occupancy flag (used when restoring from a snapshot).
    pub fn clear_occupancy(&mut self) {
        for cell in &mut self.cells {
            cell.occupied = false;
        }
    }

    /// The four cardinal neighbors, `None` where the grid edge cuts one off.
    /// Order: west, east, south, north.
    pub fn neighbors(&self, position: Position) -> [Option<Position>; 4] {
        let candidates = [
            Position::new(position.x - 1, position.y),
            Position::new(position.x + 1, position.y),
            Position::new(position.x, position.y - 1),
            Position::new(position.x, position.y + 1),
        ];
        candidates.map(|p| self.contains(p).then_some(p))
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }
}
