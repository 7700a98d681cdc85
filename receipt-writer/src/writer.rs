//! Receipt writer
//!
//! Collects commands, text, and images for one print job into a byte stream
//! laid out for a specific device profile.

use crate::buffer::ByteStream;
use crate::config::{HEIGHT_PARTING_DEFAULT, WriterConfig, is_valid_height_parting};
use crate::device::DeviceProfile;
use crate::encoding;
use crate::error::PrintResult;
use crate::escpos;
use crate::glyph::Align;
use crate::layout::{self, RuleStyle};
use tracing::debug;

#[cfg(feature = "image")]
use crate::raster::{self, ImageSource};

/// Print job builder for one device
///
/// ```ignore
/// use receipt_writer::{Paper58mm, PrinterWriter};
///
/// let mut w = PrinterWriter::new(Paper58mm)?;
/// w.align_center()?;
/// w.print("欢迎光临")?;
/// w.line_feed()?;
/// w.align_left()?;
/// w.print_in_one_line("合计", "12.00", 0)?;
/// w.line_feed()?;
/// w.feed_paper_cut()?;
/// let data = w.data_and_close()?;
/// ```
#[derive(Debug)]
pub struct PrinterWriter<P: DeviceProfile> {
    profile: P,
    stream: ByteStream,
    height_parting: u32,
    config: WriterConfig,
}

impl<P: DeviceProfile> PrinterWriter<P> {
    /// Create a writer with the default configuration
    pub fn new(profile: P) -> PrintResult<Self> {
        Self::with_config(profile, WriterConfig::default())
    }

    /// Create a writer with a raster chunk height
    ///
    /// An out-of-range `parting` falls back to 255.
    pub fn with_height_parting(profile: P, parting: u32) -> PrintResult<Self> {
        let config = WriterConfig {
            height_parting: parting,
            ..WriterConfig::default()
        };
        Self::with_config(profile, config)
    }

    pub fn with_config(profile: P, config: WriterConfig) -> PrintResult<Self> {
        let height_parting = if is_valid_height_parting(config.height_parting) {
            config.height_parting
        } else {
            HEIGHT_PARTING_DEFAULT
        };
        let mut writer = Self {
            profile,
            stream: ByteStream::open()?,
            height_parting,
            config,
        };
        writer.init()?;
        Ok(writer)
    }

    pub fn profile(&self) -> &P {
        &self.profile
    }

    /// Start over with a fresh stream holding only the initialize command
    pub fn init(&mut self) -> PrintResult<()> {
        self.stream = ByteStream::open()?;
        self.stream.append(&escpos::init())
    }

    // === Stream ===

    /// Append raw bytes
    ///
    /// After [`data_and_close`](Self::data_and_close) this starts a new job,
    /// so the initialize command is written first.
    pub fn write(&mut self, data: &[u8]) -> PrintResult<()> {
        if self.stream.is_closed() {
            debug!("stream closed, reinitializing");
            self.init()?;
        }
        self.stream.append(data)
    }

    /// Take the job data and keep writing into an empty stream
    pub fn data_and_reset(&mut self) -> PrintResult<Vec<u8>> {
        self.stream.drain_and_reset()
    }

    /// Take the job data and close the stream
    pub fn data_and_close(&mut self) -> PrintResult<Vec<u8>> {
        self.stream.drain_and_close()
    }

    // === Commands ===

    pub fn align_center(&mut self) -> PrintResult<()> {
        self.write(&escpos::align_center())
    }

    pub fn align_left(&mut self) -> PrintResult<()> {
        self.write(&escpos::align_left())
    }

    pub fn align_right(&mut self) -> PrintResult<()> {
        self.write(&escpos::align_right())
    }

    pub fn emphasized_on(&mut self) -> PrintResult<()> {
        self.write(&escpos::emphasized_on())
    }

    pub fn emphasized_off(&mut self) -> PrintResult<()> {
        self.write(&escpos::emphasized_off())
    }

    /// Font scale, 0 (normal) to 7
    pub fn font_size(&mut self, size: u8) -> PrintResult<()> {
        self.write(&escpos::font_size(size))
    }

    /// Line spacing in dots
    pub fn line_height(&mut self, dots: u8) -> PrintResult<()> {
        self.write(&escpos::line_height(dots))
    }

    pub fn line_feed(&mut self) -> PrintResult<()> {
        self.write(&escpos::line_feed())
    }

    /// Feed and full cut
    pub fn feed_paper_cut(&mut self) -> PrintResult<()> {
        self.write(&escpos::cut_full_feed())
    }

    /// Feed and partial cut
    pub fn feed_paper_cut_partial(&mut self) -> PrintResult<()> {
        self.write(&escpos::cut_partial_feed())
    }

    // === Text ===

    /// Write text in the configured charset
    pub fn print(&mut self, s: &str) -> PrintResult<()> {
        let bytes = encoding::encode(s, &self.config.charset)?;
        self.write(&bytes)
    }

    /// Write text in the charset named by `charset`
    pub fn print_with_charset(&mut self, s: &str, charset: &str) -> PrintResult<()> {
        let bytes = encoding::encode(s, charset)?;
        self.write(&bytes)
    }

    /// Solid horizontal rule
    pub fn print_line(&mut self) -> PrintResult<()> {
        self.print_rule(RuleStyle::Solid)
    }

    /// Dashed horizontal rule
    pub fn print_dashed_line(&mut self) -> PrintResult<()> {
        self.print_rule(RuleStyle::Dashed)
    }

    /// Horizontal rule of asterisks
    pub fn print_asterisk_line(&mut self) -> PrintResult<()> {
        self.print_rule(RuleStyle::Asterisk)
    }

    pub fn print_rule(&mut self, style: RuleStyle) -> PrintResult<()> {
        let line = layout::rule(style, self.profile.line_char_width());
        self.print(&line)
    }

    /// `str1` left and `str2` right on one line
    pub fn print_in_one_line(&mut self, str1: &str, str2: &str, font_size: u8) -> PrintResult<()> {
        let line = layout::one_line(str1, str2, self.profile.line_dot_width(font_size));
        self.print(&line)
    }

    pub fn print_in_one_line_with_charset(
        &mut self,
        str1: &str,
        str2: &str,
        font_size: u8,
        charset: &str,
    ) -> PrintResult<()> {
        let line = layout::one_line(str1, str2, self.profile.line_dot_width(font_size));
        self.print_with_charset(&line, charset)
    }

    /// Three segments with equal gaps around the middle one
    pub fn print_in_one_line3(
        &mut self,
        str1: &str,
        str2: &str,
        str3: &str,
        font_size: u8,
    ) -> PrintResult<()> {
        let line = layout::one_line3(str1, str2, str3, self.profile.line_dot_width(font_size));
        self.print(&line)
    }

    pub fn print_in_one_line3_with_charset(
        &mut self,
        str1: &str,
        str2: &str,
        str3: &str,
        font_size: u8,
        charset: &str,
    ) -> PrintResult<()> {
        let line = layout::one_line3(str1, str2, str3, self.profile.line_dot_width(font_size));
        self.print_with_charset(&line, charset)
    }

    /// Three segments with the middle one centred
    pub fn print_in_one_line_balanced(
        &mut self,
        str1: &str,
        str2: &str,
        str3: &str,
        font_size: u8,
    ) -> PrintResult<()> {
        let line =
            layout::one_line_balanced(str1, str2, str3, self.profile.line_dot_width(font_size));
        self.print(&line)
    }

    /// One string padded to the full line
    pub fn print_justified(&mut self, s: &str, align: Align, font_size: u8) -> PrintResult<()> {
        let line = layout::justify(s, align, self.profile.line_dot_width(font_size));
        self.print(&line)
    }

    // === Images ===

    /// Raster commands for `source`, scaled to the device and cut into bands
    ///
    /// Returns `None` when the image cannot be loaded.
    #[cfg(feature = "image")]
    pub fn image_bytes(&self, source: ImageSource<'_>) -> Option<Vec<Vec<u8>>> {
        let limits = raster::decode_limits(self.config.decode_limit_bytes);
        raster::image_chunks(
            source,
            self.profile.max_raster_dot_width(),
            self.height_parting,
            &limits,
        )
    }

    /// Append an image; `Ok(false)` when it could not be loaded
    #[cfg(feature = "image")]
    pub fn print_image(&mut self, source: ImageSource<'_>) -> PrintResult<bool> {
        let Some(chunks) = self.image_bytes(source) else {
            return Ok(false);
        };
        for chunk in &chunks {
            self.write(chunk)?;
        }
        Ok(true)
    }

    // === Settings ===

    pub fn height_parting(&self) -> u32 {
        self.height_parting
    }

    /// Set the raster chunk height; values outside 1..=255 are ignored
    pub fn set_height_parting(&mut self, parting: u32) {
        if !is_valid_height_parting(parting) {
            return;
        }
        self.height_parting = parting;
    }
}
