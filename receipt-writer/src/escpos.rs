//! ESC/POS command encoding
//!
//! Opaque byte producers for the commands the writer emits. Nothing in the
//! layout or image code looks inside these sequences.

const ESC: u8 = 0x1B;
const GS: u8 = 0x1D;
const LF: u8 = 0x0A;

/// Largest font scale accepted by `GS !` (8x width and height)
pub const MAX_FONT_SIZE: u8 = 7;

/// Initialize printer (ESC @)
pub fn init() -> [u8; 2] {
    [ESC, 0x40]
}

// === Alignment ===

/// ESC a 0
pub fn align_left() -> [u8; 3] {
    [ESC, 0x61, 0x00]
}

/// ESC a 1
pub fn align_center() -> [u8; 3] {
    [ESC, 0x61, 0x01]
}

/// ESC a 2
pub fn align_right() -> [u8; 3] {
    [ESC, 0x61, 0x02]
}

// === Text Style ===

/// Emphasized (bold) on, ESC E 1
pub fn emphasized_on() -> [u8; 3] {
    [ESC, 0x45, 0x01]
}

/// Emphasized (bold) off, ESC E 0
pub fn emphasized_off() -> [u8; 3] {
    [ESC, 0x45, 0x00]
}

/// Character size (GS ! n)
///
/// `size` scales width and height together: 0 is normal, 1 doubles both,
/// up to 7. Larger values are clamped.
pub fn font_size(size: u8) -> [u8; 3] {
    let size = size.min(MAX_FONT_SIZE);
    [GS, 0x21, (size << 4) | size]
}

/// Line spacing in dots (ESC 3 n)
pub fn line_height(dots: u8) -> [u8; 3] {
    [ESC, 0x33, dots]
}

/// Print buffer and feed one line
pub fn line_feed() -> [u8; 1] {
    [LF]
}

// === Paper Control ===

/// Feed to the cutter and full cut (GS V 65 0)
pub fn cut_full_feed() -> [u8; 4] {
    [GS, 0x56, 0x41, 0x00]
}

/// Feed to the cutter and partial cut, leaving one point attached (GS V 66 0)
pub fn cut_partial_feed() -> [u8; 4] {
    [GS, 0x56, 0x42, 0x00]
}

// === Raster Graphics ===

/// Raster bit image (GS v 0 m xL xH yL yH d1...dk)
///
/// `data` holds `height` rows of `ceil(width_dots / 8)` bytes each, MSB is
/// the leftmost dot, 1 prints black.
pub fn raster(width_dots: u32, height: u32, data: &[u8]) -> Vec<u8> {
    let x_bytes = width_dots.div_ceil(8);
    debug_assert_eq!(
        data.len(),
        x_bytes as usize * height as usize,
        "raster data length mismatch"
    );

    let mut cmd = Vec::with_capacity(8 + data.len());
    cmd.extend_from_slice(&[GS, 0x76, 0x30, 0x00]);
    cmd.push(x_bytes as u8);
    cmd.push((x_bytes >> 8) as u8);
    cmd.push(height as u8);
    cmd.push((height >> 8) as u8);
    cmd.extend_from_slice(data);
    cmd
}

/// Encode rows `rows` of an image as one monochrome raster command
///
/// A dot prints black when the pixel is opaque (alpha >= 128) and dark
/// (luma < 128). Transparent pixels are white.
#[cfg(feature = "image")]
pub fn raster_band(img: &image::RgbaImage, rows: std::ops::Range<u32>) -> Vec<u8> {
    let width = img.width();
    let x_bytes = width.div_ceil(8);
    let height = rows.end - rows.start;

    let mut data = Vec::with_capacity(x_bytes as usize * height as usize);
    for y in rows {
        for x_byte in 0..x_bytes {
            let mut byte = 0u8;
            for bit in 0..8 {
                let x = x_byte * 8 + bit;
                if x < width && is_black(img.get_pixel(x, y)) {
                    byte |= 1 << (7 - bit);
                }
            }
            data.push(byte);
        }
    }

    raster(width, height, &data)
}

#[cfg(feature = "image")]
fn is_black(pixel: &image::Rgba<u8>) -> bool {
    if pixel[3] < 128 {
        return false;
    }
    let luma = 0.299 * pixel[0] as f32 + 0.587 * pixel[1] as f32 + 0.114 * pixel[2] as f32;
    luma < 128.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_size() {
        assert_eq!(font_size(0), [0x1D, 0x21, 0x00]);
        assert_eq!(font_size(1), [0x1D, 0x21, 0x11]);
        assert_eq!(font_size(7), [0x1D, 0x21, 0x77]);
        assert_eq!(font_size(12), [0x1D, 0x21, 0x77]);
    }

    #[test]
    fn test_raster_header() {
        let data = vec![0xFF; 48 * 300];
        let cmd = raster(384, 300, &data);

        assert_eq!(&cmd[0..4], &[0x1D, 0x76, 0x30, 0x00]);
        assert_eq!(cmd[4], 48); // xL (384/8)
        assert_eq!(cmd[5], 0); // xH
        assert_eq!(cmd[6], 0x2C); // yL (300 = 0x012C)
        assert_eq!(cmd[7], 0x01); // yH
        assert_eq!(cmd.len(), 8 + 48 * 300);
    }

    #[test]
    fn test_raster_width_rounding() {
        let data = vec![0x00; 2 * 3];
        let cmd = raster(9, 3, &data);
        assert_eq!(cmd[4], 2);
    }

    #[cfg(feature = "image")]
    #[test]
    fn test_raster_band_bits() {
        use image::{Rgba, RgbaImage};

        // 10x2: row 0 black at x=0 and x=9, row 1 transparent black
        let mut img = RgbaImage::from_pixel(10, 2, Rgba([255, 255, 255, 255]));
        img.put_pixel(0, 0, Rgba([0, 0, 0, 255]));
        img.put_pixel(9, 0, Rgba([10, 10, 10, 255]));
        img.put_pixel(3, 1, Rgba([0, 0, 0, 0]));

        let cmd = raster_band(&img, 0..2);
        assert_eq!(&cmd[4..8], &[2, 0, 2, 0]);
        assert_eq!(&cmd[8..], &[0b1000_0000, 0b0100_0000, 0x00, 0x00]);
    }

    #[cfg(feature = "image")]
    #[test]
    fn test_raster_band_subrange() {
        use image::{Rgba, RgbaImage};

        let mut img = RgbaImage::from_pixel(8, 4, Rgba([255, 255, 255, 255]));
        img.put_pixel(7, 3, Rgba([0, 0, 0, 255]));

        let cmd = raster_band(&img, 2..4);
        assert_eq!(cmd[6], 2); // yL
        assert_eq!(&cmd[8..], &[0x00, 0x01]);
    }
}
