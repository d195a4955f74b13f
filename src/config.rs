//! Configuration loading and parsing.
//!
//! Reads `xedit.toml` (or an explicit path). A missing file yields the
//! defaults; a malformed file is an error. Unknown keys are ignored.

use crate::error::Result;
use crate::theme::ThemeColor;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::{fs, io};
use tracing::info;

/// Default configuration file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "xedit.toml";

/// Top-level configuration.
#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct Config {
    /// Bitmap font asset (256 glyphs × 16 scanlines).
    #[serde(default)]
    pub font: Option<PathBuf>,
    /// Palette overrides.
    #[serde(default)]
    pub theme: ThemeConfig,
    /// Terminal input settings.
    #[serde(default)]
    pub input: InputConfig,
    /// Log output settings.
    #[serde(default)]
    pub log: LogConfig,
}

/// Optional `#RRGGBB` override per palette slot.
#[allow(missing_docs)]
#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct ThemeConfig {
    pub code: Option<String>,
    pub text: Option<String>,
    #[serde(rename = "type")]
    pub type_name: Option<String>,
    pub define: Option<String>,
    pub number: Option<String>,
    pub opcode: Option<String>,
    pub comment: Option<String>,
    pub argument: Option<String>,
    pub back_line: Option<String>,
    pub back_normal: Option<String>,
    pub back_selection: Option<String>,
    pub back_search: Option<String>,
    pub cursor: Option<String>,
}

impl ThemeConfig {
    /// Every slot paired with its configured value.
    pub fn entries(&self) -> [(ThemeColor, Option<&str>); ThemeColor::COUNT] {
        [
            (ThemeColor::Code, self.code.as_deref()),
            (ThemeColor::Text, self.text.as_deref()),
            (ThemeColor::Type, self.type_name.as_deref()),
            (ThemeColor::Define, self.define.as_deref()),
            (ThemeColor::Number, self.number.as_deref()),
            (ThemeColor::Opcode, self.opcode.as_deref()),
            (ThemeColor::Comment, self.comment.as_deref()),
            (ThemeColor::Argument, self.argument.as_deref()),
            (ThemeColor::BackLine, self.back_line.as_deref()),
            (ThemeColor::BackNormal, self.back_normal.as_deref()),
            (ThemeColor::BackSelection, self.back_selection.as_deref()),
            (ThemeColor::BackSearch, self.back_search.as_deref()),
            (ThemeColor::Cursor, self.cursor.as_deref()),
        ]
    }
}

/// Terminal input settings.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct InputConfig {
    /// How long the input actor waits for an event before re-checking shutdown.
    #[serde(default = "InputConfig::default_poll_timeout_ms")]
    pub poll_timeout_ms: u64,
    /// Rows scrolled per mouse wheel notch.
    #[serde(default = "InputConfig::default_scroll_lines")]
    pub scroll_lines: i32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            poll_timeout_ms: Self::default_poll_timeout_ms(),
            scroll_lines: Self::default_scroll_lines(),
        }
    }
}

impl InputConfig {
    const fn default_poll_timeout_ms() -> u64 {
        10
    }
    const fn default_scroll_lines() -> i32 {
        1
    }
}

/// Log output settings.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Log file used while the terminal is in raw mode.
    #[serde(default = "LogConfig::default_file")]
    pub file: PathBuf,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            file: Self::default_file(),
        }
    }
}

impl LogConfig {
    fn default_file() -> PathBuf {
        PathBuf::from("xedit.log")
    }
}

impl Config {
    /// Parse configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load from `path`, or from [`CONFIG_FILE`] in the working directory.
    ///
    /// A file that does not exist yields the defaults.
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let path = path.unwrap_or_else(|| Path::new(CONFIG_FILE));
        match fs::read_to_string(path) {
            Ok(content) => {
                let config = Self::parse(&content)?;
                info!(target: "config", path = %path.display(), "config_loaded");
                Ok(config)
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                info!(target: "config", path = %path.display(), "config_absent_using_defaults");
                Ok(Self::default())
            }
            Err(err) => Err(err.into()),
        }
    }
}
