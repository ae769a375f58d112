//! Blockies
//!
//! Deterministic, blocky identicons generated from a seed string. The same
//! seed always yields the same colors and the same mirrored pixel pattern,
//! bit for bit, as the JavaScript blockies library.
//!
//! # Pipeline
//!
//! - [`RawOptions`] are sanitized and resolved into [`Options`], seeding a
//!   call-local [`SeededRandom`] and deriving missing colors from it
//! - a mirrored [`PixelGrid`] is drawn from the same generator
//! - a renderer turns the result into SVG markup or paints it onto a
//!   [`Surface`]
//!
//! # Example
//!
//! ```
//! use blockies::{create_svg, render_icon, DisplayList, RawOptions};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let options = RawOptions::new().seed("alice").size(8).scale(4);
//!
//! let svg = create_svg(&options);
//! assert!(svg.contains(r#"viewBox="0 0 32 32""#));
//!
//! let mut list = DisplayList::new();
//! render_icon(&options, &mut list)?;
//! assert!(list.commands().len() > 2);
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};

pub mod color;
pub mod error;
pub mod options;
pub mod pattern;
pub mod random;
pub mod rendering;

pub use error::{Error, Result};
pub use options::{
    resolve, Options, RawOptions, DEFAULT_SCALE, DEFAULT_SIZE, MAX_DIMENSION, MAX_SIZE,
};
pub use pattern::{create_pixel_grid, Cell, PixelGrid};
pub use random::SeededRandom;
pub use rendering::paint::{DisplayList, PaintCommand};
pub use rendering::raster::{create_icon, render_icon, PixelCanvas};
pub use rendering::svg::{create_svg, render_svg, svg_data_uri};
pub use rendering::Surface;

/// Resolved options together with the grid generated from them.
///
/// Both renderers consume this. Each call to [`Identicon::generate`] owns a
/// fresh generator, so icons can be produced from many threads at once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identicon {
    pub options: Options,
    pub grid: PixelGrid,
}

impl Identicon {
    /// Resolve `options` and draw the pixel grid.
    pub fn generate(options: &RawOptions) -> Self {
        let mut rng = SeededRandom::default();
        let options = resolve(options, &mut rng);
        let grid = create_pixel_grid(options.size as usize, &mut rng);
        log::trace!(
            "generated {}x{} grid for seed {:?}",
            options.size,
            options.size,
            options.seed
        );
        Self { options, grid }
    }
}
