//! Mirrored pixel grid generation

use serde::{Deserialize, Serialize};

use crate::random::SeededRandom;

/// Scale applied to each draw before flooring. Partitions `[0, 2.3)` into
/// background (~43%), primary (~43%) and spot (~13%).
const CELL_SPREAD: f64 = 2.3;

/// A tri-state pixel value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Cell {
    /// Leave the background showing through
    Background,
    /// Paint with the primary color
    Primary,
    /// Paint with the spot color
    Spot,
}

impl Cell {
    fn from_draw(draw: f64) -> Self {
        match (draw * CELL_SPREAD).floor() as u32 {
            0 => Cell::Background,
            1 => Cell::Primary,
            _ => Cell::Spot,
        }
    }

    pub fn is_painted(self) -> bool {
        self != Cell::Background
    }
}

impl From<Cell> for u8 {
    fn from(cell: Cell) -> u8 {
        match cell {
            Cell::Background => 0,
            Cell::Primary => 1,
            Cell::Spot => 2,
        }
    }
}

impl TryFrom<u8> for Cell {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Cell::Background),
            1 => Ok(Cell::Primary),
            2 => Ok(Cell::Spot),
            other => Err(format!("cell value {} is not one of 0, 1, 2", other)),
        }
    }
}

/// A square, row-major grid of cells where every row reads the same from
/// either end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GridParts")]
pub struct PixelGrid {
    size: usize,
    cells: Vec<Cell>,
}

#[derive(Deserialize)]
struct GridParts {
    size: usize,
    cells: Vec<Cell>,
}

impl TryFrom<GridParts> for PixelGrid {
    type Error = String;

    fn try_from(parts: GridParts) -> Result<Self, Self::Error> {
        if parts.size.checked_mul(parts.size) != Some(parts.cells.len()) {
            return Err(format!(
                "grid of size {} needs {} cells, got {}",
                parts.size,
                parts.size.saturating_mul(parts.size),
                parts.cells.len()
            ));
        }
        Ok(Self { size: parts.size, cells: parts.cells })
    }
}

impl PixelGrid {
    /// Side length of the grid
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of cells (`size * size`)
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Cell at column `x`, row `y`
    pub fn get(&self, x: usize, y: usize) -> Option<Cell> {
        if x >= self.size || y >= self.size {
            return None;
        }
        self.cells.get(y * self.size + x).copied()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        // chunks(0) panics, and an empty grid has no rows anyway
        self.cells.chunks(self.size.max(1))
    }

    /// Raw tri-state values in row-major order
    pub fn values(&self) -> Vec<u8> {
        self.cells.iter().map(|&c| u8::from(c)).collect()
    }

    /// Painted cells in ascending index order as `(col, row, cell)`
    pub fn painted(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        let width = self.size;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_painted())
            .map(move |(i, &cell)| (i % width, i / width, cell))
    }

    pub fn is_mirrored(&self) -> bool {
        self.rows().all(|row| row.iter().eq(row.iter().rev()))
    }
}

/// Generate a `size` x `size` grid from `rng`.
///
/// Rows are drawn top to bottom. Each row draws its left `ceil(size / 2)`
/// cells left to right, then appends the first `size - ceil(size / 2)` of
/// them in reverse.
pub fn create_pixel_grid(size: usize, rng: &mut SeededRandom) -> PixelGrid {
    let data_width = size.div_ceil(2);
    let mirror_width = size - data_width;

    let mut cells = Vec::with_capacity(size * size);
    let mut row = Vec::with_capacity(size);
    for _ in 0..size {
        row.clear();
        row.extend((0..data_width).map(|_| Cell::from_draw(rng.next())));
        let mirrored: Vec<Cell> = row[..mirror_width].iter().rev().copied().collect();
        row.extend(mirrored);
        cells.extend_from_slice(&row);
    }

    PixelGrid { size, cells }
}
