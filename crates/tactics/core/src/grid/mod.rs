//! Tactical grid: terrain, occupancy, path search and line of sight.
//!
//! Every query on [`GridMap`] checks bounds first and reports invalid
//! coordinates as `false` / `None` / [`PathLength::Unreachable`] rather than
//! panicking. The map is mutated once per action execution by the turn loop
//! and read by everything else.

mod path;
mod sight;

use arrayvec::ArrayVec;

use crate::state::{Position, UnitId};

pub use path::PathLength;
pub use sight::line;

/// The eight compass offsets, in a fixed order so neighbor expansion is
/// deterministic.
pub const DIRECTIONS: [(i32, i32); 8] = [
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapDimensions {
    pub width: u32,
    pub height: u32,
}

impl MapDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && (position.x as i64) < self.width as i64
            && (position.y as i64) < self.height as i64
    }

    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Terrain classes for grid cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Terrain {
    #[default]
    Open,
    /// Blocks both movement and sight.
    Obstacle,
    /// Walkable, see-through tile with host-defined meaning (city, stronghold).
    Special(u16),
}

impl Terrain {
    pub fn is_obstacle(self) -> bool {
        matches!(self, Terrain::Obstacle)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub terrain: Terrain,
    pub occupant: Option<UnitId>,
}

impl Cell {
    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }
}

/// Rectangular battlefield grid stored in row-major order.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridMap {
    dimensions: MapDimensions,
    cells: Vec<Cell>,
}

impl GridMap {
    /// Creates an all-open map with no occupants.
    pub fn new(dimensions: MapDimensions) -> Self {
        Self {
            dimensions,
            cells: vec![Cell::default(); dimensions.area()],
        }
    }

    /// Creates an open map and marks each listed position as an obstacle.
    /// Out-of-bounds entries are ignored.
    pub fn with_obstacles(
        dimensions: MapDimensions,
        obstacles: impl IntoIterator<Item = Position>,
    ) -> Self {
        let mut map = Self::new(dimensions);
        for position in obstacles {
            map.set_terrain(position, Terrain::Obstacle);
        }
        map
    }

    pub fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    fn index(&self, position: Position) -> Option<usize> {
        if !self.dimensions.contains(position) {
            return None;
        }
        Some(position.y as usize * self.dimensions.width as usize + position.x as usize)
    }

    fn position_of(&self, index: usize) -> Position {
        let width = self.dimensions.width as usize;
        Position::new((index % width) as i32, (index / width) as i32)
    }

    pub fn is_valid_position(&self, position: Position) -> bool {
        self.dimensions.contains(position)
    }

    pub fn cell(&self, position: Position) -> Option<&Cell> {
        self.index(position).map(|index| &self.cells[index])
    }

    pub fn terrain(&self, position: Position) -> Option<Terrain> {
        self.cell(position).map(|cell| cell.terrain)
    }

    /// Returns `false` for invalid coordinates, like every other predicate.
    pub fn is_obstacle(&self, position: Position) -> bool {
        self.cell(position)
            .is_some_and(|cell| cell.terrain.is_obstacle())
    }

    /// In bounds and not an obstacle. Occupancy is not considered.
    pub fn is_walkable(&self, position: Position) -> bool {
        self.cell(position)
            .is_some_and(|cell| !cell.terrain.is_obstacle())
    }

    pub fn set_terrain(&mut self, position: Position, terrain: Terrain) -> bool {
        match self.index(position) {
            Some(index) => {
                self.cells[index].terrain = terrain;
                true
            }
            None => false,
        }
    }

    pub fn has_unit(&self, position: Position) -> bool {
        self.cell(position).is_some_and(Cell::is_occupied)
    }

    pub fn unit_at(&self, position: Position) -> Option<UnitId> {
        self.cell(position).and_then(|cell| cell.occupant)
    }

    /// Places `unit` on the cell, replacing any previous occupant.
    pub fn set_unit(&mut self, position: Position, unit: UnitId) -> bool {
        match self.index(position) {
            Some(index) => {
                self.cells[index].occupant = Some(unit);
                true
            }
            None => false,
        }
    }

    pub fn remove_unit(&mut self, position: Position) -> Option<UnitId> {
        let index = self.index(position)?;
        self.cells[index].occupant.take()
    }

    /// In-bounds, walkable neighbors in [`DIRECTIONS`] order. Diagonal steps
    /// are allowed even when both orthogonal cells are blocked.
    pub fn walkable_neighbors(&self, position: Position) -> ArrayVec<Position, 8> {
        DIRECTIONS
            .iter()
            .map(|&(dx, dy)| position.offset(dx, dy))
            .filter(|&next| self.is_walkable(next))
            .collect()
    }

    /// Iterates over every cell position with its contents, row by row.
    pub fn cells(&self) -> impl Iterator<Item = (Position, &Cell)> {
        self.cells
            .iter()
            .enumerate()
            .map(|(index, cell)| (self.position_of(index), cell))
    }
}
