//! Theme: The fixed category-to-color palette.
//!
//! A [`Theme`] is a flat array indexed by [`ThemeColor`]. Cells only carry
//! palette indices; colors are resolved when draw instructions are built.

use crate::config::ThemeConfig;
use crate::error::{Error, Result};
use crate::syntax::Category;

/// True-color RGB representation.
#[repr(C)]
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rgb {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
}

impl Rgb {
    /// Create a new RGB color.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Black (0, 0, 0)
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// White (255, 255, 255)
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Create from a 24-bit hex color (e.g., 0xFF5500).
    #[inline]
    pub const fn from_u32(hex: u32) -> Self {
        Self::new(
            ((hex >> 16) & 0xFF) as u8,
            ((hex >> 8) & 0xFF) as u8,
            (hex & 0xFF) as u8,
        )
    }

    /// Pack into a `0x00RRGGBB` pixel.
    #[inline]
    pub const fn to_u32(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Parse a `#RRGGBB` string.
    pub fn parse_hex(s: &str) -> Result<Self> {
        let digits = s
            .strip_prefix('#')
            .filter(|d| d.len() == 6 && d.bytes().all(|b| b.is_ascii_hexdigit()))
            .ok_or_else(|| Error::InvalidColor(s.to_string()))?;
        u32::from_str_radix(digits, 16)
            .map(Self::from_u32)
            .map_err(|_| Error::InvalidColor(s.to_string()))
    }
}

impl std::fmt::Debug for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<u32> for Rgb {
    /// Convert from a 24-bit hex color (e.g., 0xFF5500)
    #[inline]
    fn from(hex: u32) -> Self {
        Self::from_u32(hex)
    }
}

/// Palette slot.
///
/// The first eight slots mirror [`Category`] so lexeme categories map
/// straight onto foreground colors.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ThemeColor {
    /// Plain code.
    Code = 0,
    /// String and character literals.
    Text,
    /// Type names.
    Type,
    /// Macros and constants.
    Define,
    /// Numbers.
    Number,
    /// Keywords; also used for line numbers.
    Opcode,
    /// Comments.
    Comment,
    /// Preprocessor directives.
    Argument,
    /// Current-line background.
    BackLine,
    /// Default background.
    #[default]
    BackNormal,
    /// Selection background.
    BackSelection,
    /// Search-hit background.
    BackSearch,
    /// The cursor glyph.
    Cursor,
}

impl ThemeColor {
    /// Number of palette slots.
    pub const COUNT: usize = 13;
}

impl From<Category> for ThemeColor {
    #[inline]
    fn from(category: Category) -> Self {
        match category {
            Category::Code => Self::Code,
            Category::Text => Self::Text,
            Category::Type => Self::Type,
            Category::Define => Self::Define,
            Category::Number => Self::Number,
            Category::Opcode => Self::Opcode,
            Category::Comment => Self::Comment,
            Category::Argument => Self::Argument,
        }
    }
}

/// Immutable color palette, indexed by [`ThemeColor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    colors: [Rgb; ThemeColor::COUNT],
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// The built-in dark palette.
    pub const fn dark() -> Self {
        Self {
            colors: [
                Rgb::from_u32(0xDA_DADA), // code
                Rgb::from_u32(0xD6_9D85), // text
                Rgb::from_u32(0x4E_C9B0), // type
                Rgb::from_u32(0xBD_63C5), // define
                Rgb::from_u32(0xB5_CEA8), // number
                Rgb::from_u32(0x56_9CD6), // opcode
                Rgb::from_u32(0x57_A64A), // comment
                Rgb::from_u32(0x7F_7F7F), // argument
                Rgb::from_u32(0x00_0000), // back_line
                Rgb::from_u32(0x1E_1E1E), // back_normal
                Rgb::from_u32(0x26_4F78), // back_selection
                Rgb::from_u32(0x65_3306), // back_search
                Rgb::from_u32(0xDC_DCDC), // cursor
            ],
        }
    }

    /// Build the dark palette with the configured slots replaced.
    pub fn from_config(config: &ThemeConfig) -> Result<Self> {
        let mut theme = Self::dark();
        for (slot, value) in config.entries() {
            if let Some(value) = value {
                theme.colors[slot as usize] = Rgb::parse_hex(value)?;
            }
        }
        Ok(theme)
    }

    /// Color of a palette slot.
    #[inline]
    pub const fn get(&self, slot: ThemeColor) -> Rgb {
        self.colors[slot as usize]
    }

    /// Default foreground.
    #[inline]
    pub const fn code(&self) -> Rgb {
        self.get(ThemeColor::Code)
    }

    /// Default background.
    #[inline]
    pub const fn back_normal(&self) -> Rgb {
        self.get(ThemeColor::BackNormal)
    }

    /// Cursor color.
    #[inline]
    pub const fn cursor(&self) -> Rgb {
        self.get(ThemeColor::Cursor)
    }
}

impl std::ops::Index<ThemeColor> for Theme {
    type Output = Rgb;

    #[inline]
    fn index(&self, slot: ThemeColor) -> &Rgb {
        &self.colors[slot as usize]
    }
}
