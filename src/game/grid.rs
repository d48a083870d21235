use super::config::GameConfig;
use super::state::Cell;
use crate::render::{Rgb, Surface, palette};

/// Square playfield of `cell_count` × `cell_count` cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cell_size: i32,
    cell_count: i32,
}

impl Grid {
    /// Build a grid from a validated configuration
    pub fn new(config: &GameConfig) -> Self {
        Self {
            cell_size: config.cell_size as i32,
            cell_count: config.cell_count as i32,
        }
    }

    pub fn cell_size(&self) -> i32 {
        self.cell_size
    }

    pub fn cell_count(&self) -> i32 {
        self.cell_count
    }

    /// Side of the grid in pixels
    pub fn grid_size(&self) -> i32 {
        self.cell_size * self.cell_count
    }

    /// Pixel coordinate of the grid center on both axes
    pub fn center(&self) -> i32 {
        self.grid_size() / 2
    }

    pub fn contains(&self, cell: Cell) -> bool {
        let size = self.grid_size();
        cell.x >= 0
            && cell.y >= 0
            && cell.x < size
            && cell.y < size
            && cell.x % self.cell_size == 0
            && cell.y % self.cell_size == 0
    }

    /// Every cell, row by row
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.cell_count).flat_map(move |row| {
            (0..self.cell_count).map(move |col| Cell::at(col, row, self.cell_size))
        })
    }

    /// Size the surface to hold the whole grid
    pub fn resize<S: Surface + ?Sized>(&self, surface: &mut S) {
        let size = self.grid_size() as u32;
        surface.resize(size, size);
    }

    /// Paint the background of every cell, leaving a one pixel gap on the
    /// right and bottom edges as grid lines
    pub fn redraw<S: Surface + ?Sized>(&self, surface: &mut S) {
        let inner = (self.cell_size - 1) as u32;
        for cell in self.cells() {
            surface.fill_rect(cell.x, cell.y, inner, inner, palette::GRID);
        }
    }

    /// Fill one cell the way snake segments are drawn
    pub fn fill_cell<S: Surface + ?Sized>(&self, surface: &mut S, cell: Cell, color: Rgb) {
        let inner = (self.cell_size - 1) as u32;
        surface.fill_rect(cell.x, cell.y, inner, inner, color);
    }
}
