//! Rendering backends.
//!
//! Raster output goes through the [`Surface`] capability so the pattern and
//! color logic never depends on a particular graphics host. SVG output is
//! plain string building.

pub mod paint;
pub mod raster;
pub mod svg;

use crate::pattern::Cell;
use crate::{Identicon, Result};

/// A drawing target that can be resized and filled with solid rectangles.
///
/// Colors are CSS color strings as produced by option resolution: `#rgb`,
/// `#rrggbb` or `hsl(h,s%,l%)`. Implementations report any failure through
/// the returned `Result`; the renderer passes it to the caller unchanged.
pub trait Surface {
    /// Resize the surface to `width` x `height` pixels.
    fn resize(&mut self, width: u64, height: u64) -> Result<()>;

    /// Fill the rectangle at `(x, y)` of `width` x `height` with `color`.
    fn fill_rect(&mut self, x: u64, y: u64, width: u64, height: u64, color: &str) -> Result<()>;
}

impl<S: Surface + ?Sized> Surface for &mut S {
    fn resize(&mut self, width: u64, height: u64) -> Result<()> {
        (**self).resize(width, height)
    }

    fn fill_rect(&mut self, x: u64, y: u64, width: u64, height: u64, color: &str) -> Result<()> {
        (**self).fill_rect(x, y, width, height, color)
    }
}

/// A filled square for one painted grid cell, in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect<'a> {
    pub x: u64,
    pub y: u64,
    pub side: u64,
    pub color: &'a str,
}

impl Identicon {
    /// Rectangles for every painted cell, in ascending grid index order.
    pub fn cell_rects(&self) -> impl Iterator<Item = CellRect<'_>> + '_ {
        let scale = u64::from(self.options.scale);
        self.grid.painted().map(move |(col, row, cell)| CellRect {
            x: col as u64 * scale,
            y: row as u64 * scale,
            side: scale,
            color: match cell {
                Cell::Primary => self.options.color.as_str(),
                _ => self.options.spotcolor.as_str(),
            },
        })
    }
}
