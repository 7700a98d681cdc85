//! Device profiles
//!
//! Every concrete printer supplies three numbers the layout and image code
//! depend on. Values come from the printer's spec sheet; nothing here
//! derives them from paper size.

use serde::{Deserialize, Serialize};

/// Capability contract of a printer model
pub trait DeviceProfile {
    /// Number of horizontal-rule units per line
    fn line_char_width(&self) -> usize;

    /// Printable character cells per line at `font_size` (0 = normal)
    fn line_dot_width(&self, font_size: u8) -> usize;

    /// Maximum raster width in dots
    fn max_raster_dot_width(&self) -> u32;
}

/// Cells per line for a font scale, one cell kept free as margin
fn cells_at_scale(base_cells: usize, font_size: u8) -> usize {
    (base_cells / (font_size as usize + 1)).saturating_sub(1)
}

/// 58mm receipt paper (32 cells, 384 dot head)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Paper58mm;

impl DeviceProfile for Paper58mm {
    fn line_char_width(&self) -> usize {
        16
    }

    fn line_dot_width(&self, font_size: u8) -> usize {
        cells_at_scale(32, font_size)
    }

    fn max_raster_dot_width(&self) -> u32 {
        380
    }
}

/// 80mm receipt paper (48 cells, 576 dot head)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Paper80mm;

impl DeviceProfile for Paper80mm {
    fn line_char_width(&self) -> usize {
        24
    }

    fn line_dot_width(&self, font_size: u8) -> usize {
        cells_at_scale(48, font_size)
    }

    fn max_raster_dot_width(&self) -> u32 {
        500
    }
}

/// Profile for any other device, e.g. loaded from a JSON settings file
///
/// ```json
/// { "line_char_width": 20, "line_dot_widths": [39, 19], "max_raster_dot_width": 320 }
/// ```
///
/// `line_dot_widths[n]` is the cell count at font size `n`; sizes past the
/// end of the table reuse the last entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomProfile {
    pub line_char_width: usize,
    pub line_dot_widths: Vec<usize>,
    pub max_raster_dot_width: u32,
}

impl DeviceProfile for CustomProfile {
    fn line_char_width(&self) -> usize {
        self.line_char_width
    }

    fn line_dot_width(&self, font_size: u8) -> usize {
        self.line_dot_widths
            .get(font_size as usize)
            .or(self.line_dot_widths.last())
            .copied()
            .unwrap_or(0)
    }

    fn max_raster_dot_width(&self) -> u32 {
        self.max_raster_dot_width
    }
}

impl<P: DeviceProfile + ?Sized> DeviceProfile for &P {
    fn line_char_width(&self) -> usize {
        (**self).line_char_width()
    }

    fn line_dot_width(&self, font_size: u8) -> usize {
        (**self).line_dot_width(font_size)
    }

    fn max_raster_dot_width(&self) -> u32 {
        (**self).max_raster_dot_width()
    }
}

impl<P: DeviceProfile + ?Sized> DeviceProfile for Box<P> {
    fn line_char_width(&self) -> usize {
        (**self).line_char_width()
    }

    fn line_dot_width(&self, font_size: u8) -> usize {
        (**self).line_dot_width(font_size)
    }

    fn max_raster_dot_width(&self) -> u32 {
        (**self).max_raster_dot_width()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paper_58mm() {
        let p = Paper58mm;
        assert_eq!(p.line_char_width(), 16);
        assert_eq!(p.line_dot_width(0), 31);
        assert_eq!(p.line_dot_width(1), 15);
        assert_eq!(p.max_raster_dot_width(), 380);
    }

    #[test]
    fn test_paper_80mm() {
        let p = Paper80mm;
        assert_eq!(p.line_char_width(), 24);
        assert_eq!(p.line_dot_width(0), 47);
        assert_eq!(p.line_dot_width(1), 23);
        assert_eq!(p.max_raster_dot_width(), 500);
    }

    #[test]
    fn test_large_font_never_underflows() {
        assert_eq!(Paper58mm.line_dot_width(7), 3);
        assert_eq!(Paper58mm.line_dot_width(255), 0);
    }

    #[test]
    fn test_custom_profile_from_json() {
        let json = r#"{ "line_char_width": 20, "line_dot_widths": [39, 19], "max_raster_dot_width": 320 }"#;
        let p: CustomProfile = serde_json::from_str(json).unwrap();
        assert_eq!(p.line_char_width(), 20);
        assert_eq!(p.line_dot_width(0), 39);
        assert_eq!(p.line_dot_width(1), 19);
        assert_eq!(p.line_dot_width(5), 19);
        assert_eq!(p.max_raster_dot_width(), 320);
    }

    #[test]
    fn test_dyn_profile() {
        let p: Box<dyn DeviceProfile> = Box::new(Paper80mm);
        assert_eq!(p.line_dot_width(0), 47);
    }
}
