//! Writer configuration
//!
//! # Environment variables
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | PRINTER_HEIGHT_PARTING | 255 | Max rows per raster chunk (1-255) |
//! | PRINTER_CHARSET | gb2312 | Default text charset label |
//! | PRINTER_DECODE_LIMIT | 536870912 | Max bytes the image decoder may allocate |

use crate::encoding::DEFAULT_CHARSET;
use crate::error::{PrintError, PrintResult};
use serde::{Deserialize, Serialize};

/// Default (and maximum) raster chunk height in dots
pub const HEIGHT_PARTING_DEFAULT: u32 = 255;

/// Default decoder allocation limit (512 MiB)
pub const DECODE_LIMIT_DEFAULT: u64 = 512 * 1024 * 1024;

/// Whether `parting` is a usable raster chunk height
pub fn is_valid_height_parting(parting: u32) -> bool {
    parting > 0 && parting <= HEIGHT_PARTING_DEFAULT
}

/// Settings of a [`PrinterWriter`](crate::PrinterWriter)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriterConfig {
    /// Max rows per raster chunk
    pub height_parting: u32,
    /// Charset label used by `print`
    pub charset: String,
    /// Max bytes the image decoder may allocate before giving up
    pub decode_limit_bytes: u64,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            height_parting: HEIGHT_PARTING_DEFAULT,
            charset: DEFAULT_CHARSET.to_string(),
            decode_limit_bytes: DECODE_LIMIT_DEFAULT,
        }
    }
}

impl WriterConfig {
    /// Load settings from environment variables
    ///
    /// Unset variables keep their defaults; values that do not parse are
    /// rejected.
    pub fn from_env() -> PrintResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> PrintResult<Self> {
        let mut config = Self::default();
        if let Some(v) = lookup("PRINTER_HEIGHT_PARTING") {
            config.height_parting = parse_var("PRINTER_HEIGHT_PARTING", &v)?;
        }
        if let Some(v) = lookup("PRINTER_CHARSET") {
            config.charset = v;
        }
        if let Some(v) = lookup("PRINTER_DECODE_LIMIT") {
            config.decode_limit_bytes = parse_var("PRINTER_DECODE_LIMIT", &v)?;
        }
        Ok(config)
    }

    /// Set the raster chunk height; out-of-range values are ignored
    pub fn with_height_parting(mut self, parting: u32) -> Self {
        if is_valid_height_parting(parting) {
            self.height_parting = parting;
        }
        self
    }

    pub fn with_charset(mut self, charset: impl Into<String>) -> Self {
        self.charset = charset.into();
        self
    }

    pub fn with_decode_limit(mut self, bytes: u64) -> Self {
        self.decode_limit_bytes = bytes;
        self
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, value: &str) -> PrintResult<T> {
    value
        .trim()
        .parse()
        .map_err(|_| PrintError::InvalidConfig(format!("{}={}", key, value)))
}
