//! Rendering surface boundary.
//!
//! The composition core paints through the [`Surface`] trait and
//! nothing else: an exclusive clip rectangle, a current color
//! attribute, and single-glyph paints. [`TestSurface`] captures paints
//! for assertions; [`TerminalSurface`](terminal::TerminalSurface) queues
//! them for a real terminal via crossterm.

use std::collections::BTreeMap;

use crate::text::char_width;
use crate::types::{ColorAttr, Point, Rect, Size};

pub mod terminal;

pub use terminal::TerminalSurface;

// =============================================================================
// Surface trait
// =============================================================================

/// The paint target the renderer draws into.
///
/// Paints outside the current clip rectangle are dropped by the
/// implementation, which is what makes an adornment's clip exclusive.
pub trait Surface {
    /// Total paintable area, origin (0,0).
    fn size(&self) -> Size;

    /// The current clip rectangle.
    fn clip(&self) -> Rect;

    /// Replace the clip rectangle, returning the previous one so the
    /// caller can restore it.
    fn set_clip(&mut self, clip: Rect) -> Rect;

    /// Set the color attribute used by subsequent paints.
    fn set_color(&mut self, color: ColorAttr);

    /// Paint a single glyph at a screen position.
    fn paint(&mut self, pos: Point, glyph: char);

    /// Paint a string left-to-right, advancing by display width.
    fn paint_str(&mut self, pos: Point, s: &str) {
        let mut x = pos.x;
        for c in s.chars() {
            self.paint(Point::new(x, pos.y), c);
            x += char_width(c);
        }
    }
}

// =============================================================================
// TestSurface
// =============================================================================

/// An in-memory surface that records every paint, for tests and
/// headless rendering.
#[derive(Debug)]
pub struct TestSurface {
    size: Size,
    clip: Rect,
    color: ColorAttr,
    cells: BTreeMap<Point, (char, ColorAttr)>,
}

impl TestSurface {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            size: Size::new(width, height),
            clip: Rect::new(0, 0, width, height),
            color: ColorAttr::default(),
            cells: BTreeMap::new(),
        }
    }

    /// The glyph painted at `pos`, if any.
    pub fn glyph_at(&self, pos: Point) -> Option<char> {
        self.cells.get(&pos).map(|(c, _)| *c)
    }

    /// The color a glyph was painted with.
    pub fn color_at(&self, pos: Point) -> Option<ColorAttr> {
        self.cells.get(&pos).map(|(_, a)| *a)
    }

    /// Render one row as a string; unpainted cells read as spaces.
    pub fn row_string(&self, y: i32, x: i32, len: i32) -> String {
        (x..x + len)
            .map(|cx| self.glyph_at(Point::new(cx, y)).unwrap_or(' '))
            .collect()
    }

    /// Number of cells painted so far.
    pub fn painted_count(&self) -> usize {
        self.cells.len()
    }

    /// Forget all recorded paints, keeping size and clip.
    pub fn clear(&mut self) {
        self.cells.clear();
    }
}

impl Surface for TestSurface {
    fn size(&self) -> Size {
        self.size
    }

    fn clip(&self) -> Rect {
        self.clip
    }

    fn set_clip(&mut self, clip: Rect) -> Rect {
        std::mem::replace(&mut self.clip, clip)
    }

    fn set_color(&mut self, color: ColorAttr) {
        self.color = color;
    }

    fn paint(&mut self, pos: Point, glyph: char) {
        let screen = Rect::new(0, 0, self.size.width, self.size.height);
        if self.clip.contains(pos) && screen.contains(pos) {
            self.cells.insert(pos, (glyph, self.color));
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Rgba;

    #[test]
    fn test_paint_respects_clip() {
        let mut s = TestSurface::new(10, 10);
        s.set_clip(Rect::new(2, 2, 3, 3));

        s.paint(Point::new(2, 2), 'a');
        s.paint(Point::new(0, 0), 'b');
        s.paint(Point::new(5, 2), 'c');

        assert_eq!(s.glyph_at(Point::new(2, 2)), Some('a'));
        assert_eq!(s.glyph_at(Point::new(0, 0)), None);
        assert_eq!(s.glyph_at(Point::new(5, 2)), None);
    }

    #[test]
    fn test_set_clip_returns_previous() {
        let mut s = TestSurface::new(10, 10);
        let prev = s.set_clip(Rect::new(1, 1, 2, 2));
        assert_eq!(prev, Rect::new(0, 0, 10, 10));

        let prev2 = s.set_clip(prev);
        assert_eq!(prev2, Rect::new(1, 1, 2, 2));
    }

    #[test]
    fn test_paint_str_advances_by_width() {
        let mut s = TestSurface::new(20, 2);
        s.paint_str(Point::new(0, 0), "a日b");

        assert_eq!(s.glyph_at(Point::new(0, 0)), Some('a'));
        assert_eq!(s.glyph_at(Point::new(1, 0)), Some('日'));
        // The wide glyph occupies two cells; the next paint lands after it.
        assert_eq!(s.glyph_at(Point::new(3, 0)), Some('b'));
    }

    #[test]
    fn test_paint_records_current_color() {
        let mut s = TestSurface::new(5, 5);
        let color = ColorAttr::new(Rgba::CYAN, Rgba::BLACK);
        s.set_color(color);
        s.paint(Point::new(1, 1), 'x');

        assert_eq!(s.color_at(Point::new(1, 1)), Some(color));
    }

    #[test]
    fn test_paint_outside_screen_is_dropped() {
        let mut s = TestSurface::new(5, 5);
        s.set_clip(Rect::new(-2, -2, 20, 20));
        s.paint(Point::new(-1, 0), 'x');
        s.paint(Point::new(0, 6), 'y');

        assert_eq!(s.painted_count(), 0);
    }
}
