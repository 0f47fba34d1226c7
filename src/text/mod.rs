//! Text formatting and measurement.
//!
//! [`TextFormatter`] holds a view's raw text together with its layout
//! policy (alignment, reading direction, word wrap, trailing-space
//! preservation) and produces measured sizes and formatted rows on
//! demand. Formatting is lazy: mutations set a dirty flag and the next
//! consumer re-formats.
//!
//! Widths are display widths in terminal cells, measured with
//! `unicode-width` (CJK and most emoji occupy two cells).

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::types::Size;

// =============================================================================
// Alignment and direction
// =============================================================================

/// Placement of formatted text along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Alignment {
    #[default]
    Start = 0,
    Center = 1,
    End = 2,
}

/// Reading direction: axis-major order plus reading order, eight
/// combinations. The first component is the direction glyphs advance
/// within a run, the second is the direction runs stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum TextDirection {
    #[default]
    LeftRightTopBottom = 0,
    LeftRightBottomTop = 1,
    RightLeftTopBottom = 2,
    RightLeftBottomTop = 3,
    TopBottomLeftRight = 4,
    TopBottomRightLeft = 5,
    BottomTopLeftRight = 6,
    BottomTopRightLeft = 7,
}

impl TextDirection {
    /// Whether glyph runs advance horizontally (rows) rather than
    /// vertically (columns).
    pub const fn is_horizontal(&self) -> bool {
        matches!(
            self,
            Self::LeftRightTopBottom
                | Self::LeftRightBottomTop
                | Self::RightLeftTopBottom
                | Self::RightLeftBottomTop
        )
    }

    /// Whether glyphs within a run read backwards (right-to-left or
    /// bottom-to-top).
    pub const fn is_reversed(&self) -> bool {
        matches!(
            self,
            Self::RightLeftTopBottom
                | Self::RightLeftBottomTop
                | Self::BottomTopLeftRight
                | Self::BottomTopRightLeft
        )
    }

    /// Whether runs stack backwards (bottom-to-top or right-to-left).
    pub const fn stacks_reversed(&self) -> bool {
        matches!(
            self,
            Self::LeftRightBottomTop
                | Self::RightLeftBottomTop
                | Self::TopBottomRightLeft
                | Self::BottomTopRightLeft
        )
    }
}

// =============================================================================
// Measurement helpers
// =============================================================================

/// Display width of a string in terminal cells.
pub fn string_width(s: &str) -> i32 {
    UnicodeWidthStr::width(s) as i32
}

/// Display width of a single character in terminal cells.
pub fn char_width(c: char) -> i32 {
    UnicodeWidthChar::width(c).unwrap_or(0) as i32
}

/// Word-wrap a single paragraph (no newlines) to `width` cells.
///
/// Breaks at whitespace boundaries; a word wider than `width` is
/// hard-broken. When `preserve_trailing` is false, spaces at a wrap
/// point are dropped and the wrapped line is trimmed; the final line is
/// emitted as-is either way.
pub fn wrap_line(line: &str, width: i32, preserve_trailing: bool) -> Vec<String> {
    if width <= 0 {
        return vec![line.to_string()];
    }

    let mut out: Vec<String> = Vec::new();
    let mut cur = String::new();
    let mut cur_w = 0i32;

    for run in split_runs(line) {
        let run_w = string_width(run);
        let is_space = run.chars().all(|c| c == ' ');

        if cur_w + run_w <= width {
            cur.push_str(run);
            cur_w += run_w;
            continue;
        }

        if is_space {
            if preserve_trailing {
                // Spaces spill across the wrap point.
                for c in run.chars() {
                    if cur_w + 1 > width {
                        out.push(std::mem::take(&mut cur));
                        cur_w = 0;
                    }
                    cur.push(c);
                    cur_w += 1;
                }
            } else {
                // The wrap point eats the spaces.
                out.push(cur.trim_end().to_string());
                cur.clear();
                cur_w = 0;
            }
            continue;
        }

        // Word does not fit on the current line.
        if !cur.is_empty() {
            let line = if preserve_trailing {
                std::mem::take(&mut cur)
            } else {
                let trimmed = cur.trim_end().to_string();
                cur.clear();
                trimmed
            };
            out.push(line);
            cur_w = 0;
        }

        if run_w <= width {
            cur.push_str(run);
            cur_w = run_w;
        } else {
            // Hard-break an over-long word.
            for c in run.chars() {
                let cw = char_width(c);
                if cur_w + cw > width && cur_w > 0 {
                    out.push(std::mem::take(&mut cur));
                    cur_w = 0;
                }
                cur.push(c);
                cur_w += cw;
            }
        }
    }

    out.push(cur);
    out
}

/// Split a line into alternating word and space runs.
fn split_runs(line: &str) -> Vec<&str> {
    let mut runs = Vec::new();
    let mut start = 0;
    let mut prev_space: Option<bool> = None;

    for (i, c) in line.char_indices() {
        let is_space = c == ' ';
        if let Some(p) = prev_space {
            if p != is_space {
                runs.push(&line[start..i]);
                start = i;
            }
        }
        prev_space = Some(is_space);
    }
    if prev_space.is_some() {
        runs.push(&line[start..]);
    }
    runs
}

// =============================================================================
// TextFormatter
// =============================================================================

/// Formats a view's text: measurement, wrapping, and the formatted
/// rows the renderer paints.
///
/// Owned exclusively by one view. Mutators set [`needs_format`]; the
/// owning view's setters additionally schedule a resize request, which
/// is why the raw setters here stay crate-internal-friendly and carry
/// no tree knowledge.
///
/// [`needs_format`]: TextFormatter::needs_format
#[derive(Debug, Clone, Default)]
pub struct TextFormatter {
    text: String,
    alignment: Alignment,
    vertical_alignment: Alignment,
    direction: TextDirection,
    word_wrap: bool,
    preserve_trailing_spaces: bool,
    needs_format: bool,
    size: Size,
    lines: Vec<String>,
}

impl TextFormatter {
    pub fn new() -> Self {
        Self {
            word_wrap: true,
            needs_format: true,
            ..Self::default()
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.needs_format = true;
    }

    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    pub fn set_alignment(&mut self, alignment: Alignment) {
        self.alignment = alignment;
        self.needs_format = true;
    }

    pub fn vertical_alignment(&self) -> Alignment {
        self.vertical_alignment
    }

    pub fn set_vertical_alignment(&mut self, alignment: Alignment) {
        self.vertical_alignment = alignment;
        self.needs_format = true;
    }

    pub fn direction(&self) -> TextDirection {
        self.direction
    }

    pub fn set_direction(&mut self, direction: TextDirection) {
        self.direction = direction;
        self.needs_format = true;
    }

    pub fn word_wrap(&self) -> bool {
        self.word_wrap
    }

    pub fn set_word_wrap(&mut self, on: bool) {
        if self.word_wrap != on {
            self.word_wrap = on;
            self.needs_format = true;
        }
    }

    pub fn preserve_trailing_spaces(&self) -> bool {
        self.preserve_trailing_spaces
    }

    pub fn set_preserve_trailing_spaces(&mut self, on: bool) {
        if self.preserve_trailing_spaces != on {
            self.preserve_trailing_spaces = on;
            self.needs_format = true;
        }
    }

    pub fn needs_format(&self) -> bool {
        self.needs_format
    }

    /// Force a re-format before the next use.
    pub fn set_needs_format(&mut self) {
        self.needs_format = true;
    }

    /// The target size formatted rows are laid out against.
    pub fn size(&self) -> Size {
        self.size
    }

    pub fn set_size(&mut self, size: Size) {
        if self.size != size {
            self.size = size;
            self.needs_format = true;
        }
    }

    /// Format against the current target size and return the rows.
    /// Re-formats only when dirty.
    pub fn format_lines(&mut self) -> &[String] {
        if self.needs_format {
            self.lines = self.layout_runs(self.size);
            self.needs_format = false;
        }
        &self.lines
    }

    /// Measure the text against `constraint` and return the resulting
    /// size. The major axis wraps to the constraint; the cross axis is
    /// the number of runs produced. Does not change the target size.
    pub fn format_and_get_size(&self, constraint: Size) -> Size {
        let runs = self.layout_runs(constraint);

        if self.direction.is_horizontal() {
            let longest = runs.iter().map(|r| string_width(r)).max().unwrap_or(0);
            Size::new(longest, runs.len() as i32)
        } else {
            // Vertical: each run is a column, one cell per glyph row.
            let tallest = runs.iter().map(|r| r.chars().count() as i32).max().unwrap_or(0);
            let width: i32 = runs
                .iter()
                .map(|r| r.chars().map(char_width).max().unwrap_or(1))
                .sum();
            Size::new(width, tallest)
        }
    }

    /// Produce logical runs (rows for horizontal directions, columns
    /// for vertical) wrapped to the major-axis extent of `constraint`.
    fn layout_runs(&self, constraint: Size) -> Vec<String> {
        let major = if self.direction.is_horizontal() {
            constraint.width
        } else {
            constraint.height
        };

        let mut runs = Vec::new();
        for paragraph in self.text.split('\n') {
            if self.word_wrap && major > 0 {
                runs.extend(wrap_line(paragraph, major, self.preserve_trailing_spaces));
            } else {
                runs.push(paragraph.to_string());
            }
        }
        // An empty text still formats to zero runs, not one empty row.
        if self.text.is_empty() {
            runs.clear();
        }
        runs
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_width() {
        assert_eq!(string_width("hello"), 5);
        assert_eq!(string_width(""), 0);
        assert_eq!(string_width("日本"), 4);
    }

    #[test]
    fn test_wrap_hello_world() {
        let lines = wrap_line("hello world", 5, false);
        assert_eq!(lines, vec!["hello", "world"]);
    }

    #[test]
    fn test_wrap_trims_trailing_spaces_on_wrapped_lines() {
        let lines = wrap_line("ab   cd", 4, false);
        assert_eq!(lines, vec!["ab", "cd"]);
    }

    #[test]
    fn test_wrap_preserves_trailing_spaces_when_asked() {
        let lines = wrap_line("ab  cd", 4, true);
        assert_eq!(lines, vec!["ab  ", "cd"]);
    }

    #[test]
    fn test_wrap_hard_breaks_long_word() {
        let lines = wrap_line("abcdefgh", 3, false);
        assert_eq!(lines, vec!["abc", "def", "gh"]);
    }

    #[test]
    fn test_wrap_final_line_keeps_trailing_spaces() {
        let lines = wrap_line("ab ", 10, false);
        assert_eq!(lines, vec!["ab "]);
    }

    #[test]
    fn test_formatter_measures_wrapped() {
        let mut tf = TextFormatter::new();
        tf.set_text("hello world");
        let size = tf.format_and_get_size(Size::new(5, 100));
        assert_eq!(size, Size::new(5, 2));
    }

    #[test]
    fn test_formatter_measure_is_idempotent() {
        let mut tf = TextFormatter::new();
        tf.set_text("the quick brown fox");
        let a = tf.format_and_get_size(Size::new(10, 100));
        let b = tf.format_and_get_size(Size::new(10, 100));
        assert_eq!(a, b);
    }

    #[test]
    fn test_formatter_no_wrap_keeps_lines() {
        let mut tf = TextFormatter::new();
        tf.set_word_wrap(false);
        tf.set_text("hello world\nbye");
        let size = tf.format_and_get_size(Size::new(5, 100));
        assert_eq!(size, Size::new(11, 2));
    }

    #[test]
    fn test_formatter_vertical_direction() {
        let mut tf = TextFormatter::new();
        tf.set_direction(TextDirection::TopBottomLeftRight);
        tf.set_text("abcd ef");
        // Major axis is height: wrap runs to 4 rows.
        let size = tf.format_and_get_size(Size::new(100, 4));
        assert_eq!(size.height, 4);
        assert_eq!(size.width, 2);
    }

    #[test]
    fn test_formatter_lazy_format() {
        let mut tf = TextFormatter::new();
        tf.set_text("hello world");
        tf.set_size(Size::new(5, 2));
        assert!(tf.needs_format());
        let lines: Vec<String> = tf.format_lines().to_vec();
        assert_eq!(lines, vec!["hello", "world"]);
        assert!(!tf.needs_format());

        // No intervening change: same rows, no re-format.
        let again: Vec<String> = tf.format_lines().to_vec();
        assert_eq!(again, lines);
    }

    #[test]
    fn test_formatter_empty_text_has_no_rows() {
        let mut tf = TextFormatter::new();
        tf.set_size(Size::new(10, 2));
        assert!(tf.format_lines().is_empty());
        assert_eq!(tf.format_and_get_size(Size::new(10, 10)), Size::new(0, 0));
    }

    #[test]
    fn test_direction_axis_queries() {
        assert!(TextDirection::LeftRightTopBottom.is_horizontal());
        assert!(!TextDirection::TopBottomLeftRight.is_horizontal());
        assert!(TextDirection::RightLeftTopBottom.is_reversed());
        assert!(TextDirection::LeftRightBottomTop.stacks_reversed());
    }
}
