//! Bitmap font: 256 glyphs of 16 one-byte scanlines.
//!
//! Bit `x` of a scanline byte is pixel column `x` of the glyph (bit 0 is the
//! leftmost pixel). Glyph cells are 9 pixels wide: the 9th column repeats
//! bit 7 for the box-drawing range `0xC0..=0xDF` and is background otherwise.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::buffer::{GLYPH_HEIGHT, GLYPH_WIDTH};
use crate::error::{Error, Result};
use crate::theme::Rgb;

/// Number of glyphs in a font.
pub const GLYPH_COUNT: usize = 256;
/// Scanlines per glyph.
pub const GLYPH_ROWS: usize = GLYPH_HEIGHT as usize;
/// Size of a font asset in bytes.
pub const FONT_SIZE: usize = GLYPH_COUNT * GLYPH_ROWS;

/// Glyphs whose 9th pixel column extends bit 7.
const LINE_GRAPHICS: std::ops::RangeInclusive<u8> = 0xC0..=0xDF;

/// A loaded bitmap font.
#[derive(Clone, PartialEq, Eq)]
pub struct BitFont {
    data: Box<[u8]>,
}

impl BitFont {
    /// Wrap a font asset; it must be exactly [`FONT_SIZE`] bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != FONT_SIZE {
            return Err(Error::FontSize {
                expected: FONT_SIZE,
                actual: bytes.len(),
            });
        }
        Ok(Self { data: bytes.into() })
    }

    /// Read a font asset from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let font = Self::from_bytes(&fs::read(path)?)?;
        info!(target: "font", path = %path.display(), "font_loaded");
        Ok(font)
    }

    /// The raw asset bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// The 16 scanlines of glyph `c`.
    #[inline]
    pub fn glyph(&self, c: u8) -> &[u8] {
        let start = usize::from(c) * GLYPH_ROWS;
        &self.data[start..start + GLYPH_ROWS]
    }

    /// Whether pixel (`x`, `y`) of glyph `c` is foreground. `x` ranges over
    /// the full 9-pixel cell.
    #[inline]
    pub fn is_set(&self, c: u8, x: u32, y: u32) -> bool {
        let Some(&line) = self.glyph(c).get(y as usize) else {
            return false;
        };
        match x {
            0..=7 => line & (1 << x) != 0,
            8 => LINE_GRAPHICS.contains(&c) && line & 0x80 != 0,
            _ => false,
        }
    }

    /// Rasterize glyph `c` as a 9×16 block whose top-left pixel is
    /// `pixels[origin]`, with `stride` pixels per row.
    ///
    /// With `bg` of `None`, background pixels are left untouched. Pixels
    /// outside `pixels` are skipped.
    pub fn put_char(
        &self,
        c: u8,
        fg: Rgb,
        bg: Option<Rgb>,
        pixels: &mut [u32],
        origin: usize,
        stride: usize,
    ) {
        let fg = fg.to_u32();
        let bg = bg.map(Rgb::to_u32);

        for y in 0..GLYPH_HEIGHT {
            let row = origin + y as usize * stride;
            for x in 0..GLYPH_WIDTH {
                let color = if self.is_set(c, x, y) { Some(fg) } else { bg };
                if let (Some(color), Some(pixel)) = (color, pixels.get_mut(row + x as usize)) {
                    *pixel = color;
                }
            }
        }
    }
}

impl std::fmt::Debug for BitFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BitFont")
            .field("bytes", &self.data.len())
            .finish()
    }
}

/// Size of the fixed TGA header.
const TGA_HEADER: usize = 18;
/// Atlas image layout: 16 × 16 glyphs of 8 × 16 pixels.
const ATLAS_WIDTH: u16 = 128;
const ATLAS_HEIGHT: u16 = 256;
const ATLAS_BPP: u8 = 32;

/// Convert an uncompressed 32-bit TGA glyph atlas (128×256, glyph `i` at
/// `((i % 16) * 8, (i / 16) * 16)`) into a font asset.
///
/// A pixel is foreground when its first channel byte is non-zero.
pub fn convert_atlas(tga: &[u8]) -> Result<Vec<u8>> {
    if tga.len() < TGA_HEADER {
        return Err(Error::AtlasTruncated {
            expected: TGA_HEADER,
            actual: tga.len(),
        });
    }

    let id_length = usize::from(tga[0]);
    let width = u16::from_le_bytes([tga[12], tga[13]]);
    let height = u16::from_le_bytes([tga[14], tga[15]]);
    let bpp = tga[16];
    if width != ATLAS_WIDTH || height != ATLAS_HEIGHT || bpp != ATLAS_BPP {
        return Err(Error::AtlasFormat { width, height, bpp });
    }

    let start = TGA_HEADER + id_length;
    let expected = start + usize::from(ATLAS_WIDTH) * usize::from(ATLAS_HEIGHT) * 4;
    if tga.len() < expected {
        return Err(Error::AtlasTruncated {
            expected,
            actual: tga.len(),
        });
    }
    let pixels = &tga[start..expected];

    let mut font = vec![0u8; FONT_SIZE];
    for (i, glyph) in font.chunks_exact_mut(GLYPH_ROWS).enumerate() {
        let ox = (i % 16) * 8;
        let oy = (i / 16) * GLYPH_ROWS;
        for (y, line) in glyph.iter_mut().enumerate() {
            for x in 0..8 {
                let offset = ((oy + y) * usize::from(ATLAS_WIDTH) + ox + x) * 4;
                if pixels[offset] != 0 {
                    *line |= 1 << x;
                }
            }
        }
    }
    Ok(font)
}

/// Convert the atlas at `input` and write the font asset to `output`.
pub fn convert_atlas_file(input: &Path, output: &Path) -> Result<()> {
    let font = convert_atlas(&fs::read(input)?)?;
    fs::write(output, &font)?;
    info!(
        target: "font",
        input = %input.display(),
        output = %output.display(),
        "atlas_converted"
    );
    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::io::Write;

    /// A font where every glyph's first scanline is its own code and the
    /// rest are `0xFF`.
    pub(crate) fn test_font() -> BitFont {
        let mut data = vec![0xFFu8; FONT_SIZE];
        for c in 0..GLYPH_COUNT {
            data[c * GLYPH_ROWS] = c as u8;
        }
        BitFont::from_bytes(&data).unwrap()
    }

    fn atlas(id: &[u8]) -> Vec<u8> {
        let mut tga = vec![0u8; TGA_HEADER];
        tga[0] = id.len() as u8;
        tga[2] = 2;
        tga[12..14].copy_from_slice(&ATLAS_WIDTH.to_le_bytes());
        tga[14..16].copy_from_slice(&ATLAS_HEIGHT.to_le_bytes());
        tga[16] = ATLAS_BPP;
        tga.extend_from_slice(id);
        tga.resize(tga.len() + 128 * 256 * 4, 0);
        tga
    }

    fn set_pixel(tga: &mut [u8], id_len: usize, x: usize, y: usize) {
        let offset = TGA_HEADER + id_len + (y * 128 + x) * 4;
        tga[offset] = 0xFF;
    }

    #[test]
    fn test_from_bytes_checks_size() {
        assert!(BitFont::from_bytes(&[0; FONT_SIZE]).is_ok());
        assert!(matches!(
            BitFont::from_bytes(&[0; 100]),
            Err(Error::FontSize { expected: 4096, actual: 100 })
        ));
        assert!(BitFont::from_bytes(&[0; FONT_SIZE + 1]).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(test_font().as_bytes()).unwrap();
        let font = BitFont::load(file.path()).unwrap();
        assert_eq!(font, test_font());

        assert!(matches!(
            BitFont::load(Path::new("/nonexistent/font.dat")),
            Err(Error::Io(_))
        ));
    }

    #[test]
    fn test_bit_order() {
        let font = test_font();
        // Glyph 0b0000_0101, scanline 0: columns 0 and 2
        assert!(font.is_set(5, 0, 0));
        assert!(!font.is_set(5, 1, 0));
        assert!(font.is_set(5, 2, 0));
        assert!(!font.is_set(5, 7, 0));
        assert!(!font.is_set(5, 8, 1));
    }

    #[test]
    fn test_ninth_column() {
        let font = test_font();
        // Bit 7 is set on every 0xFF scanline
        assert!(font.is_set(0xC0, 8, 3));
        assert!(font.is_set(0xDF, 8, 3));
        assert!(!font.is_set(0xBF, 8, 3));
        assert!(!font.is_set(0xE0, 8, 3));
        // Scanline 0 of glyph 0xC0 is 0b1100_0000
        assert!(font.is_set(0xC0, 8, 0));
        assert!(!font.is_set(b'A', 8, 0));
        assert!(!font.is_set(0xC0, 9, 0));
    }

    #[test]
    fn test_put_char() {
        let font = test_font();
        let (fg, bg) = (Rgb::WHITE, Rgb::new(1, 2, 3));
        let stride = 20;
        let mut pixels = vec![0u32; stride * 16];

        font.put_char(0x03, fg, Some(bg), &mut pixels, 2, stride);

        assert_eq!(pixels[2], fg.to_u32());
        assert_eq!(pixels[3], fg.to_u32());
        assert_eq!(pixels[4], bg.to_u32());
        assert_eq!(pixels[10], bg.to_u32());
        assert_eq!(pixels[11], 0);
        assert_eq!(pixels[1], 0);
        // Scanline 1 is 0xFF: 8 foreground pixels and a background 9th
        assert_eq!(pixels[stride + 9], fg.to_u32());
        assert_eq!(pixels[stride + 10], bg.to_u32());
        assert_eq!(pixels[15 * stride + 2], fg.to_u32());
    }

    #[test]
    fn test_put_char_transparent() {
        let font = test_font();
        let mut pixels = vec![7u32; 9 * 16];
        font.put_char(0x01, Rgb::WHITE, None, &mut pixels, 0, 9);
        assert_eq!(pixels[0], 0xFF_FFFF);
        assert_eq!(pixels[1], 7);
        assert_eq!(pixels[8], 7);
    }

    #[test]
    fn test_put_char_clips_to_slice() {
        let font = test_font();
        let mut pixels = vec![0u32; 9 * 4];
        font.put_char(0xFF, Rgb::WHITE, Some(Rgb::BLACK), &mut pixels, 0, 9);
        assert!(pixels.iter().take(8).all(|&p| p == 0xFF_FFFF));
    }

    #[test]
    fn test_convert_atlas() {
        let mut tga = atlas(b"");
        // Glyph 'A' (65) lives at (8, 64); light column 3 of scanline 2
        set_pixel(&mut tga, 0, 8 + 3, 64 + 2);
        // Glyph 255 lives at (120, 240)
        set_pixel(&mut tga, 0, 127, 255);

        let font = convert_atlas(&tga).unwrap();
        assert_eq!(font.len(), FONT_SIZE);
        assert_eq!(font[65 * 16 + 2], 1 << 3);
        assert_eq!(font[255 * 16 + 15], 1 << 7);
        assert_eq!(font.iter().filter(|&&b| b != 0).count(), 2);
    }

    #[test]
    fn test_convert_atlas_skips_image_id() {
        let mut tga = atlas(b"font");
        set_pixel(&mut tga, 4, 0, 0);
        let font = convert_atlas(&tga).unwrap();
        assert_eq!(font[0], 1);
    }

    #[test]
    fn test_convert_atlas_rejects_format() {
        let mut tga = atlas(b"");
        tga[16] = 24;
        assert!(matches!(
            convert_atlas(&tga),
            Err(Error::AtlasFormat { width: 128, height: 256, bpp: 24 })
        ));
    }

    #[test]
    fn test_convert_atlas_rejects_truncated() {
        let tga = atlas(b"");
        assert!(matches!(
            convert_atlas(&tga[..1000]),
            Err(Error::AtlasTruncated { .. })
        ));
        assert!(matches!(
            convert_atlas(&tga[..10]),
            Err(Error::AtlasTruncated { expected: 18, actual: 10 })
        ));
    }

    #[test]
    fn test_convert_atlas_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("font.tga");
        let output = dir.path().join("font.dat");
        fs::write(&input, atlas(b"")).unwrap();

        convert_atlas_file(&input, &output).unwrap();
        assert!(BitFont::load(&output).is_ok());
    }
}
