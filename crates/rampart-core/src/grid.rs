//! Grid geometry and the fixed enemy route.
//!
//! The world is divided into a `GRID_SIZE` x `GRID_SIZE` grid. Towers occupy
//! cells; enemies follow the route through cell centers.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_PATH_CORNERS, GRID_SIZE, WORLD_HEIGHT, WORLD_WIDTH};
use crate::types::Position;

/// A cell coordinate on the grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridCell {
    pub x: i32,
    pub y: i32,
}

impl GridCell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Mapping between world units and grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    pub cols: u32,
    pub rows: u32,
    pub cell_width: f64,
    pub cell_height: f64,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self::new(WORLD_WIDTH, WORLD_HEIGHT, GRID_SIZE)
    }
}

impl GridSpec {
    /// A square grid of `size` x `size` cells covering a `width` x `height` world.
    pub fn new(width: f64, height: f64, size: u32) -> Self {
        Self {
            cols: size,
            rows: size,
            cell_width: width / size as f64,
            cell_height: height / size as f64,
        }
    }

    /// Cell containing a world point. May be out of bounds.
    pub fn pixel_to_grid(&self, x: f64, y: f64) -> GridCell {
        GridCell::new(
            (x / self.cell_width).floor() as i32,
            (y / self.cell_height).floor() as i32,
        )
    }

    /// Top-left corner of a cell in world units.
    pub fn grid_to_pixel(&self, cell: GridCell) -> Position {
        Position::new(
            cell.x as f64 * self.cell_width,
            cell.y as f64 * self.cell_height,
        )
    }

    /// Center of a cell in world units.
    pub fn cell_center(&self, cell: GridCell) -> Position {
        let corner = self.grid_to_pixel(cell);
        Position::new(
            corner.x + self.cell_width / 2.0,
            corner.y + self.cell_height / 2.0,
        )
    }

    pub fn in_bounds(&self, cell: GridCell) -> bool {
        cell.x >= 0 && cell.y >= 0 && (cell.x as u32) < self.cols && (cell.y as u32) < self.rows
    }
}

/// The fixed enemy route: every cell an enemy walks through, in order.
/// Immutable for the lifetime of a simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Path {
    cells: Vec<GridCell>,
    waypoints: Vec<Position>,
}

impl Default for Path {
    fn default() -> Self {
        Self::from_corners(&GridSpec::default(), &DEFAULT_PATH_CORNERS)
    }
}

impl Path {
    /// Expand axis-aligned corner cells into the full cell sequence.
    ///
    /// Corners that share neither a row nor a column are joined by walking
    /// the columns first, then the rows.
    pub fn from_corners(grid: &GridSpec, corners: &[GridCell]) -> Self {
        let mut cells: Vec<GridCell> = Vec::new();
        for (i, &corner) in corners.iter().enumerate() {
            if i == 0 {
                cells.push(corner);
                continue;
            }
            let mut cursor = corners[i - 1];
            while cursor.x != corner.x {
                cursor.x += (corner.x - cursor.x).signum();
                cells.push(cursor);
            }
            while cursor.y != corner.y {
                cursor.y += (corner.y - cursor.y).signum();
                cells.push(cursor);
            }
        }
        Self::from_cells(grid, cells)
    }

    /// Build a route from an explicit cell sequence.
    pub fn from_cells(grid: &GridSpec, cells: Vec<GridCell>) -> Self {
        let waypoints = cells.iter().map(|&c| grid.cell_center(c)).collect();
        Self { cells, waypoints }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Index of the final waypoint.
    pub fn last_index(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }

    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    /// World-space center of the waypoint at `index`.
    pub fn waypoint(&self, index: usize) -> Option<Position> {
        self.waypoints.get(index).copied()
    }

    pub fn contains(&self, cell: GridCell) -> bool {
        self.cells.contains(&cell)
    }
}
