//! Line composition for monospace receipts
//!
//! All widths are display cells as computed by [`glyph::measure`]. The
//! padding formulas are fixed: callers line columns up against them, so the
//! integer truncation below is part of the contract.

use crate::glyph::{self, Align};

/// Horizontal rule style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleStyle {
    /// One `─` per unit
    Solid,
    /// Two `-` per unit
    Dashed,
    /// Two `*` per unit
    Asterisk,
}

impl RuleStyle {
    fn unit(self) -> &'static str {
        match self {
            RuleStyle::Solid => "─",
            RuleStyle::Dashed => "--",
            RuleStyle::Asterisk => "**",
        }
    }
}

/// A horizontal rule of `units` repetitions
pub fn rule(style: RuleStyle, units: usize) -> String {
    style.unit().repeat(units)
}

/// Spaces needed to bring `content` cells up to the next multiple of `line_length`
///
/// Zero when the content already ends on a line boundary.
fn fill_to_line(content: usize, line_length: usize) -> usize {
    if line_length == 0 {
        return 0;
    }
    match content % line_length {
        0 => 0,
        used => line_length - used,
    }
}

/// Spaces for a possibly negative gap
fn gap(n: isize) -> String {
    " ".repeat(n.max(0) as usize)
}

/// `str1` on the left, `str2` on the right
pub fn one_line(str1: &str, str2: &str, line_length: usize) -> String {
    let padding = fill_to_line(glyph::measure(str1) + glyph::measure(str2), line_length);
    format!("{}{}{}", str1, " ".repeat(padding), str2)
}

/// Three segments with the same gap around the middle one
///
/// The gap is half the free width rounded down; an odd cell is left unused.
pub fn one_line3(str1: &str, str2: &str, str3: &str, line_length: usize) -> String {
    let content = glyph::measure(str1) + glyph::measure(str2) + glyph::measure(str3);
    let half = " ".repeat(fill_to_line(content, line_length) / 2);
    format!("{}{}{}{}{}", str1, half, str2, half, str3)
}

/// Three segments with the middle one centred on the line
///
/// ```text
/// gap1 = L/2 - w1 - w2/2
/// gap2 = L - w1 - w2 - w3 - gap1
/// ```
///
/// Gaps that come out negative insert no spaces; `gap2` is computed from the
/// unclamped `gap1`.
pub fn one_line_balanced(str1: &str, str2: &str, str3: &str, line_length: usize) -> String {
    let line_length = line_length as isize;
    let w1 = glyph::measure(str1) as isize;
    let w2 = glyph::measure(str2) as isize;
    let w3 = glyph::measure(str3) as isize;

    let gap1 = line_length / 2 - w1 - w2 / 2;
    let gap2 = line_length - w1 - w2 - w3 - gap1;

    format!("{}{}{}{}{}", str1, gap(gap1), str2, gap(gap2), str3)
}

/// A single string justified within the line
pub fn justify(s: &str, align: Align, line_length: usize) -> String {
    glyph::pad(s, line_length, align)
}
