//! # receipt-writer
//!
//! Builds ESC/POS print jobs for thermal receipt printers.
//!
//! ## Scope
//!
//! This crate handles WHAT bytes a job contains:
//! - Byte stream with reset/close lifecycle
//! - Column layout with double-width CJK glyphs
//! - GB2312 (or any WHATWG charset) text encoding
//! - Image scaling and banded raster encoding
//!
//! Getting the bytes to a printer (TCP, USB, Bluetooth) is left to the caller.
//!
//! ## Example
//!
//! ```ignore
//! use receipt_writer::{Paper80mm, PrinterWriter};
//!
//! let mut w = PrinterWriter::new(Paper80mm)?;
//! w.align_center()?;
//! w.font_size(1)?;
//! w.print("厨房单")?;
//! w.line_feed()?;
//! w.font_size(0)?;
//! w.align_left()?;
//! w.print_dashed_line()?;
//! w.line_feed()?;
//! w.print_in_one_line_balanced("宫保鸡丁", "x2", "36.00", 0)?;
//! w.line_feed()?;
//! w.feed_paper_cut()?;
//!
//! let data = w.data_and_close()?;
//! ```

mod buffer;
mod config;
mod device;
mod encoding;
mod error;
pub mod escpos;
pub mod glyph;
pub mod layout;
#[cfg(feature = "image")]
pub mod raster;
mod writer;

// Re-exports
pub use buffer::ByteStream;
pub use config::{HEIGHT_PARTING_DEFAULT, WriterConfig};
pub use device::{CustomProfile, DeviceProfile, Paper58mm, Paper80mm};
pub use encoding::{DEFAULT_CHARSET, encode};
pub use error::{PrintError, PrintResult};
pub use glyph::{Align, is_wide, measure};
pub use layout::RuleStyle;
pub use writer::PrinterWriter;

#[cfg(feature = "image")]
pub use raster::{ImageSource, ResourceResolver};

#[cfg(feature = "image")]
pub use image::DynamicImage;
