//! Display-cell widths for thermal printer text
//!
//! Thermal printers render CJK ideographs and full-width punctuation in two
//! character cells and everything else in one. This module provides:
//! - Classifying characters as wide or narrow
//! - Measuring strings in cells
//! - Truncating/padding strings to a cell width

/// Unicode blocks printed as double-width glyphs
const WIDE_RANGES: &[(u32, u32)] = &[
    (0x2000, 0x206F),   // General Punctuation (“ ” …)
    (0x3000, 0x303F),   // CJK Symbols and Punctuation (。「」)
    (0x3400, 0x4DBF),   // CJK Unified Ideographs Extension A
    (0x4E00, 0x9FFF),   // CJK Unified Ideographs
    (0xF900, 0xFAFF),   // CJK Compatibility Ideographs
    (0xFF00, 0xFFEF),   // Halfwidth and Fullwidth Forms (，！)
    (0x20000, 0x2A6DF), // CJK Unified Ideographs Extension B
];

/// Horizontal alignment of a single string within a line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// Whether `c` occupies two cells
pub fn is_wide(c: char) -> bool {
    let cp = c as u32;
    WIDE_RANGES
        .iter()
        .any(|&(start, end)| (start..=end).contains(&cp))
}

/// Width of a single character in cells
pub fn char_width(c: char) -> usize {
    if is_wide(c) { 2 } else { 1 }
}

/// Width of a string in cells
pub fn measure(s: &str) -> usize {
    s.chars().map(char_width).sum()
}

/// Longest prefix of `s` that fits within `max_cells`
pub fn truncate(s: &str, max_cells: usize) -> &str {
    let mut width = 0;
    for (idx, c) in s.char_indices() {
        let w = char_width(c);
        if width + w > max_cells {
            return &s[..idx];
        }
        width += w;
    }
    s
}

/// Pad a string with spaces to exactly `width` cells
///
/// If the string is wider than `width`, it is truncated. A wide glyph that
/// would straddle the limit is dropped, so the result may then be one cell
/// short.
pub fn pad(s: &str, width: usize, align: Align) -> String {
    let current = measure(s);
    if current >= width {
        return truncate(s, width).to_string();
    }
    let spaces = width - current;
    match align {
        Align::Left => format!("{}{}", s, " ".repeat(spaces)),
        Align::Right => format!("{}{}", " ".repeat(spaces), s),
        Align::Center => {
            let before = spaces / 2;
            format!("{}{}{}", " ".repeat(before), s, " ".repeat(spaces - before))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_wide() {
        assert!(is_wide('中'));
        assert!(is_wide('。'));
        assert!(is_wide('，'));
        assert!(is_wide('“'));
        assert!(is_wide('㐀'));
        assert!(is_wide('𠀀'));
        assert!(is_wide('豈'));
        assert!(!is_wide('A'));
        assert!(!is_wide('─'));
        assert!(!is_wide('é'));
        assert!(!is_wide('あ'));
    }

    #[test]
    fn test_measure() {
        assert_eq!(measure(""), 0);
        assert_eq!(measure("hello"), 5);
        assert_eq!(measure("你好"), 4);
        assert_eq!(measure("AB中文CD"), 8);
        assert_eq!(measure("合计：12.00"), 11);
    }

    #[test]
    fn test_measure_matches_per_char_sum() {
        for s in ["", "abc", "桌号: 100", "“引号”", "ｆｕｌｌ", "mixed 混合 text"] {
            let expected: usize = s.chars().map(|c| if is_wide(c) { 2 } else { 1 }).sum();
            assert_eq!(measure(s), expected, "{s}");
        }
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello world", 5), "hello");
        assert_eq!(truncate("你好世界", 4), "你好");
        assert_eq!(truncate("AB中文", 4), "AB中");
        assert_eq!(truncate("AB中文", 3), "AB");
        assert_eq!(truncate("short", 10), "short");
    }

    #[test]
    fn test_pad() {
        assert_eq!(pad("hi", 5, Align::Left), "hi   ");
        assert_eq!(pad("hi", 5, Align::Right), "   hi");
        assert_eq!(pad("hi", 6, Align::Center), "  hi  ");
        assert_eq!(pad("hi", 5, Align::Center), " hi  ");
        assert_eq!(pad("hello world", 5, Align::Left), "hello");
        assert_eq!(pad("中", 4, Align::Right), "  中");
    }
}
