//! Raster rendering onto a [`Surface`], plus an in-memory RGBA canvas.

use sha2::{Digest, Sha256};

use crate::color::Rgba;
use crate::options::MAX_DIMENSION;
use crate::rendering::Surface;
use crate::{Error, Identicon, RawOptions, Result};

/// Largest side length a [`PixelCanvas`] accepts.
pub const MAX_CANVAS_DIMENSION: u64 = MAX_DIMENSION as u64;

/// Resolve `options`, then paint the icon onto `surface`.
///
/// The surface is resized to `size * scale` square, filled with the
/// background color, and every painted cell is drawn on top in grid order.
/// Any surface failure is returned as-is.
pub fn render_icon<'s, S: Surface + ?Sized>(
    options: &RawOptions,
    surface: &'s mut S,
) -> Result<&'s mut S> {
    let icon = Identicon::generate(options);
    paint(&icon, surface)?;
    Ok(surface)
}

/// Render into a freshly allocated [`PixelCanvas`].
pub fn create_icon(options: &RawOptions) -> Result<PixelCanvas> {
    let mut canvas = PixelCanvas::default();
    render_icon(options, &mut canvas)?;
    Ok(canvas)
}

/// Paint an already generated icon onto `surface`.
pub fn paint<S: Surface + ?Sized>(icon: &Identicon, surface: &mut S) -> Result<()> {
    let side = icon.options.dimension();
    log::trace!("painting {}x{} icon for seed {:?}", side, side, icon.options.seed);

    surface.resize(side, side)?;
    surface.fill_rect(0, 0, side, side, &icon.options.bgcolor)?;
    for rect in icon.cell_rects() {
        surface.fill_rect(rect.x, rect.y, rect.side, rect.side, rect.color)?;
    }
    Ok(())
}

/// An RGBA8 pixel buffer, row-major, starting fully transparent.
///
/// Resizing clears the buffer, like a browser canvas does when its
/// dimensions are assigned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PixelCanvas {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelCanvas {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let mut canvas = Self::default();
        canvas.resize(u64::from(width), u64::from(height))?;
        Ok(canvas)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA bytes
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.data.get(i..i + 4)?;
        Some(Rgba { r: px[0], g: px[1], b: px[2], a: px[3] })
    }

    /// Binary PPM (P6) encoding of the RGB channels.
    pub fn to_ppm(&self) -> Vec<u8> {
        let header = format!("P6\n{} {}\n255\n", self.width, self.height);
        let mut out = Vec::with_capacity(header.len() + self.data.len() / 4 * 3);
        out.extend_from_slice(header.as_bytes());
        for px in self.data.chunks_exact(4) {
            out.extend_from_slice(&px[..3]);
        }
        out
    }

    /// Hex SHA-256 of the dimensions and pixel data, for golden comparisons.
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.width.to_le_bytes());
        hasher.update(self.height.to_le_bytes());
        hasher.update(&self.data);
        hex::encode(hasher.finalize())
    }
}

impl Surface for PixelCanvas {
    fn resize(&mut self, width: u64, height: u64) -> Result<()> {
        if width > MAX_CANVAS_DIMENSION || height > MAX_CANVAS_DIMENSION {
            return Err(Error::SurfaceError(format!(
                "canvas of {}x{} exceeds the {} pixel limit",
                width, height, MAX_CANVAS_DIMENSION
            )));
        }
        // both sides fit in 15 bits, so the byte count fits in usize
        let len = width as usize * height as usize * 4;
        self.width = width as u32;
        self.height = height as u32;
        self.data.clear();
        self.data.resize(len, 0);
        Ok(())
    }

    fn fill_rect(&mut self, x: u64, y: u64, width: u64, height: u64, color: &str) -> Result<()> {
        let rgba = Rgba::parse(color)?;
        let x_end = x.saturating_add(width).min(u64::from(self.width));
        let y_end = y.saturating_add(height).min(u64::from(self.height));
        if x >= x_end || y >= y_end {
            return Ok(());
        }

        let px = [rgba.r, rgba.g, rgba.b, rgba.a];
        let stride = self.width as usize * 4;
        for row in y as usize..y_end as usize {
            let start = row * stride + x as usize * 4;
            let end = row * stride + x_end as usize * 4;
            for chunk in self.data[start..end].chunks_exact_mut(4) {
                chunk.copy_from_slice(&px);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rendering::paint::{DisplayList, PaintCommand};

    const COLOR: &str = "hsl(0,40.00097936950624%,10.601410700473934%)";
    const BGCOLOR: &str = "hsl(4,41.99348018504679%,7.898475171532482%)";

    #[test]
    fn render_icon_paints_background_then_cells() {
        let mut list = DisplayList::new();
        render_icon(&RawOptions::new().seed("test"), &mut list).unwrap();

        let cmds = list.commands();
        assert_eq!(cmds[0], PaintCommand::Resize { width: 32, height: 32 });
        assert_eq!(
            cmds[1],
            PaintCommand::FillRect { x: 0, y: 0, width: 32, height: 32, color: BGCOLOR.to_string() }
        );
        assert_eq!(
            cmds[2],
            PaintCommand::FillRect { x: 0, y: 0, width: 4, height: 4, color: COLOR.to_string() }
        );
        assert_eq!(
            cmds[3],
            PaintCommand::FillRect { x: 12, y: 0, width: 4, height: 4, color: COLOR.to_string() }
        );
        // background plus 34 painted cells
        assert_eq!(list.fills().count(), 35);
    }

    #[test]
    fn render_icon_returns_the_surface() {
        let mut list = DisplayList::new();
        let returned = render_icon(&RawOptions::new().seed("x"), &mut list).unwrap();
        returned.resize(1, 1).unwrap();
        assert_eq!(list.commands().last(), Some(&PaintCommand::Resize { width: 1, height: 1 }));
    }

    #[test]
    fn canvas_fill_and_clip() {
        let mut canvas = PixelCanvas::new(4, 4).unwrap();
        assert_eq!(canvas.pixel(0, 0), Some(Rgba::TRANSPARENT));

        canvas.fill_rect(2, 2, 10, 10, "#f00").unwrap();
        assert_eq!(canvas.pixel(3, 3), Some(Rgba::rgb(255, 0, 0)));
        assert_eq!(canvas.pixel(1, 1), Some(Rgba::TRANSPARENT));
        assert_eq!(canvas.pixel(4, 0), None);

        canvas.fill_rect(10, 10, 2, 2, "#0f0").unwrap();
        canvas.resize(2, 2).unwrap();
        assert_eq!(canvas.data(), &[0u8; 16][..]);
    }

    #[test]
    fn canvas_rejects_bad_colors_and_huge_sizes() {
        let mut canvas = PixelCanvas::new(2, 2).unwrap();
        assert!(matches!(canvas.fill_rect(0, 0, 1, 1, "blue"), Err(Error::ColorError(_))));
        assert!(matches!(
            canvas.resize(MAX_CANVAS_DIMENSION + 1, 1),
            Err(Error::SurfaceError(_))
        ));
    }

    #[test]
    fn create_icon_sizes_canvas_and_paints_every_pixel() {
        let canvas = create_icon(&RawOptions::new().seed("test").scale(2)).unwrap();
        assert_eq!((canvas.width(), canvas.height()), (16, 16));
        assert!(canvas.data().chunks_exact(4).all(|px| px[3] == 255));
        // top-left cell is primary, (1, 0) is background
        assert_eq!(canvas.pixel(0, 0), Some(Rgba::parse(COLOR).unwrap()));
        assert_eq!(canvas.pixel(2, 0), Some(Rgba::parse(BGCOLOR).unwrap()));
    }

    #[test]
    fn oversized_scale_renders_at_the_default_scale() {
        let canvas = create_icon(&RawOptions::new().seed("big").size(100).scale(400)).unwrap();
        assert_eq!((canvas.width(), canvas.height()), (400, 400));

        let canvas = create_icon(&RawOptions::new().seed("big").size(u32::MAX)).unwrap();
        assert_eq!((canvas.width(), canvas.height()), (32, 32));
    }

    #[test]
    fn ppm_has_header_and_rgb_payload() {
        let mut canvas = PixelCanvas::new(2, 1).unwrap();
        canvas.fill_rect(0, 0, 2, 1, "#102030").unwrap();
        let ppm = canvas.to_ppm();
        assert!(ppm.starts_with(b"P6\n2 1\n255\n"));
        assert_eq!(&ppm[ppm.len() - 6..], &[0x10, 0x20, 0x30, 0x10, 0x20, 0x30]);
    }

    #[test]
    fn digest_is_stable_and_content_sensitive() {
        let a = create_icon(&RawOptions::new().seed("digest")).unwrap();
        let b = create_icon(&RawOptions::new().seed("digest")).unwrap();
        let c = create_icon(&RawOptions::new().seed("other")).unwrap();
        assert_eq!(a.digest(), b.digest());
        assert_ne!(a.digest(), c.digest());
        assert_eq!(a.digest().len(), 64);
    }
}
