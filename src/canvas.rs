//! Canvas: A 32-bit pixel surface that frames are rasterized into.
//!
//! Pixels are `0x00RRGGBB`. The allocation is padded up to whole glyph cells,
//! so a cell that straddles the right or bottom edge can still be drawn
//! without wrapping into the next row.

use std::io::{self, Write};

use crate::buffer::{cells_for_pixels, GLYPH_HEIGHT, GLYPH_WIDTH};
use crate::font::BitFont;
use crate::layout::Rect;
use crate::theme::Rgb;

/// A pixel surface of `width × height` visible pixels.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Canvas {
    width: u32,
    height: u32,
    /// Pixels per allocated row.
    stride: usize,
    pixels: Vec<u32>,
}

impl Canvas {
    /// Create a black canvas.
    pub fn new(width: u32, height: u32) -> Self {
        Self::allocate(width, height)
    }

    /// Reallocate for a new size; content is discarded. Returns `false` when
    /// the size is unchanged.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        if width == self.width && height == self.height {
            return false;
        }
        *self = Self::allocate(width, height);
        true
    }

    fn allocate(width: u32, height: u32) -> Self {
        let (columns, rows) = cells_for_pixels(width, height);
        let stride = usize::from(columns) * GLYPH_WIDTH as usize;
        let padded_height = usize::from(rows) * GLYPH_HEIGHT as usize;

        Self {
            width,
            height,
            stride,
            pixels: vec![0; stride * padded_height],
        }
    }

    /// Visible width in pixels.
    #[inline]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Visible height in pixels.
    #[inline]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Pixels per allocated row.
    #[inline]
    pub const fn stride(&self) -> usize {
        self.stride
    }

    /// The whole allocation, row-major with [`Canvas::stride`].
    #[inline]
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Color at (`x`, `y`) if it lies inside the visible area.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.stride + x as usize)
            .copied()
            .map(Rgb::from_u32)
    }

    /// Visible rows, each `width` pixels long.
    pub fn rows(&self) -> impl Iterator<Item = &[u32]> {
        let width = self.width as usize;
        self.pixels
            .chunks(self.stride.max(1))
            .take(self.height as usize)
            .map(move |row| &row[..width.min(row.len())])
    }

    /// Fill every allocated pixel.
    pub fn clear(&mut self, color: Rgb) {
        self.pixels.fill(color.to_u32());
    }

    /// Fill `rect`, clipped to the allocation.
    pub fn fill(&mut self, rect: Rect, color: Rgb) {
        let color = color.to_u32();
        let right = (rect.right as usize).min(self.stride);
        let left = (rect.left as usize).min(right);
        let rows = rect.height() as usize;
        for row in self
            .pixels
            .chunks_mut(self.stride.max(1))
            .skip(rect.top as usize)
            .take(rows)
        {
            row[left..right].fill(color);
        }
    }

    /// Rasterize `ch` with its top-left pixel at (`x`, `y`). A glyph that
    /// does not fit horizontally is skipped.
    pub fn put_glyph(&mut self, font: &BitFont, ch: u8, fg: Rgb, bg: Rgb, x: u32, y: u32) {
        if x as usize + GLYPH_WIDTH as usize > self.stride {
            return;
        }
        let origin = y as usize * self.stride + x as usize;
        font.put_char(ch, fg, Some(bg), &mut self.pixels, origin, self.stride);
    }

    /// Write the visible area as a binary PPM (P6) image.
    pub fn write_ppm<W: Write>(&self, out: &mut W) -> io::Result<()> {
        write!(out, "P6\n{} {}\n255\n", self.width, self.height)?;
        let mut bytes = Vec::with_capacity(self.width as usize * 3);
        for row in self.rows() {
            bytes.clear();
            for &pixel in row {
                let Rgb { r, g, b } = Rgb::from_u32(pixel);
                bytes.extend_from_slice(&[r, g, b]);
            }
            out.write_all(&bytes)?;
        }
        out.flush()
    }
}

impl std::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("stride", &self.stride)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::tests::test_font;

    #[test]
    fn test_allocation_is_padded_to_cells() {
        let canvas = Canvas::new(800, 600);
        assert_eq!(canvas.width(), 800);
        assert_eq!(canvas.stride(), 89 * 9);
        assert_eq!(canvas.pixels().len(), 89 * 9 * 38 * 16);
        assert_eq!(canvas.rows().count(), 600);
        assert!(canvas.rows().all(|row| row.len() == 800));
    }

    #[test]
    fn test_resize() {
        let mut canvas = Canvas::new(18, 16);
        assert!(!canvas.resize(18, 16));
        assert!(canvas.resize(9, 32));
        assert_eq!(canvas.pixels().len(), 9 * 32);
        assert!(canvas.resize(0, 0));
        assert!(canvas.pixels().is_empty());
    }

    #[test]
    fn test_fill_clips() {
        let mut canvas = Canvas::new(18, 32);
        let red = Rgb::new(255, 0, 0);
        canvas.fill(Rect::new(9, 16, 100, 100), red);

        assert_eq!(canvas.pixel(9, 16), Some(red));
        assert_eq!(canvas.pixel(17, 31), Some(red));
        assert_eq!(canvas.pixel(8, 16), Some(Rgb::BLACK));
        assert_eq!(canvas.pixel(9, 15), Some(Rgb::BLACK));
        assert_eq!(canvas.pixel(18, 16), None);
    }

    #[test]
    fn test_fill_exact_cell() {
        let mut canvas = Canvas::new(27, 16);
        canvas.fill(Rect::from_origin(9, 0, 9, 16), Rgb::WHITE);
        let lit = canvas.pixels().iter().filter(|&&p| p == 0xFF_FFFF).count();
        assert_eq!(lit, 9 * 16);
    }

    #[test]
    fn test_put_glyph() {
        let font = test_font();
        let mut canvas = Canvas::new(18, 16);
        let bg = Rgb::new(0x1E, 0x1E, 0x1E);
        canvas.put_glyph(&font, 0x01, Rgb::WHITE, bg, 9, 0);

        assert_eq!(canvas.pixel(9, 0), Some(Rgb::WHITE));
        assert_eq!(canvas.pixel(10, 0), Some(bg));
        assert_eq!(canvas.pixel(17, 0), Some(bg));
        assert_eq!(canvas.pixel(8, 0), Some(Rgb::BLACK));
    }

    #[test]
    fn test_put_glyph_on_partial_edge_cell() {
        let font = test_font();
        // 10 px wide: second cell is only partly visible but fully allocated
        let mut canvas = Canvas::new(10, 16);
        canvas.put_glyph(&font, 0x01, Rgb::WHITE, Rgb::BLACK, 9, 0);
        assert_eq!(canvas.pixel(9, 0), Some(Rgb::WHITE));
        assert_eq!(canvas.pixel(10, 0), None);

        canvas.put_glyph(&font, 0x01, Rgb::WHITE, Rgb::BLACK, 18, 0);
        assert_eq!(canvas.pixels().len(), 18 * 16);
    }

    #[test]
    fn test_write_ppm() {
        let mut canvas = Canvas::new(2, 1);
        canvas.fill(Rect::new(1, 0, 2, 1), Rgb::new(1, 2, 3));

        let mut out = Vec::new();
        canvas.write_ppm(&mut out).unwrap();

        let header = b"P6\n2 1\n255\n";
        assert_eq!(&out[..header.len()], header);
        assert_eq!(&out[header.len()..], &[0, 0, 0, 1, 2, 3]);
    }
}
