//! Error types.

use thiserror::Error;

/// Errors surfaced by the fallible edges of the crate: asset loading,
/// configuration and I/O. Tokenizing, layout and diffing never fail.
#[derive(Debug, Error)]
pub enum Error {
    /// The bitmap font asset does not hold exactly 256 glyphs of 16 scanlines.
    #[error("font asset must be {expected} bytes, found {actual}")]
    FontSize {
        /// Required size in bytes.
        expected: usize,
        /// Size of the supplied asset.
        actual: usize,
    },

    /// The font atlas image has the wrong dimensions or depth.
    #[error("font atlas must be 128x256 at 32 bpp, found {width}x{height} at {bpp} bpp")]
    AtlasFormat {
        /// Declared width in pixels.
        width: u16,
        /// Declared height in pixels.
        height: u16,
        /// Declared bits per pixel.
        bpp: u8,
    },

    /// The font atlas image is shorter than its header claims.
    #[error("font atlas truncated: need {expected} bytes, found {actual}")]
    AtlasTruncated {
        /// Bytes required by the header.
        expected: usize,
        /// Bytes available.
        actual: usize,
    },

    /// A theme color that is not of the form `#RRGGBB`.
    #[error("invalid color {0:?}, expected #RRGGBB")]
    InvalidColor(String),

    /// Malformed configuration file.
    #[error("config parse error: {0}")]
    Config(#[from] toml::de::Error),

    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result alias using the crate [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
