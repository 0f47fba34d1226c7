//! Core types for weft-tui.
//!
//! These types define the foundation that everything builds on.
//! Geometry flows through the view tree and the renderer; colors and
//! attributes flow through the `Surface` boundary.

// =============================================================================
// Geometry
// =============================================================================

/// A point in cell coordinates.
///
/// Coordinates are signed: a view positioned partially off its parent
/// (or off screen) has negative components after transformation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, PartialOrd, Ord)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Component-wise translation.
    #[inline]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// A size in cells. Components are clamped to zero on construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self {
            width: if width < 0 { 0 } else { width },
            height: if height < 0 { 0 } else { height },
        }
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// A rectangle: position + size, in cell coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width: if width < 0 { 0 } else { width },
            height: if height < 0 { 0 } else { height },
        }
    }

    pub const fn from_parts(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    #[inline]
    pub const fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    #[inline]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    #[inline]
    pub const fn right(&self) -> i32 {
        self.x + self.width
    }

    #[inline]
    pub const fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Check if a point is inside this rect.
    #[inline]
    pub const fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }

    /// Compute the intersection of two rects, `None` if disjoint.
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let x1 = self.x.max(other.x);
        let y1 = self.y.max(other.y);
        let x2 = self.right().min(other.right());
        let y2 = self.bottom().min(other.bottom());

        if x2 > x1 && y2 > y1 {
            Some(Rect::new(x1, y1, x2 - x1, y2 - y1))
        } else {
            None
        }
    }

    /// Translate the rect by an offset.
    #[inline]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            width: self.width,
            height: self.height,
        }
    }
}

// =============================================================================
// Thickness
// =============================================================================

/// An independent inset per edge, in cells.
///
/// Describes the area an adornment reserves around its content. All
/// edges zero means the adornment reserves nothing but still defines
/// bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Thickness {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Thickness {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// The same inset on every edge.
    pub const fn uniform(n: i32) -> Self {
        Self::new(n, n, n, n)
    }

    #[inline]
    pub const fn horizontal(&self) -> i32 {
        self.left + self.right
    }

    #[inline]
    pub const fn vertical(&self) -> i32 {
        self.top + self.bottom
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.left == 0 && self.top == 0 && self.right == 0 && self.bottom == 0
    }

    /// The rectangle that remains after removing this thickness from
    /// `rect`. Size components clamp at zero.
    pub const fn inner_rect(&self, rect: Rect) -> Rect {
        Rect::new(
            rect.x + self.left,
            rect.y + self.top,
            rect.width - self.horizontal(),
            rect.height - self.vertical(),
        )
    }

    /// Component-wise sum, used to combine stacked adornments.
    pub const fn add(&self, other: Thickness) -> Thickness {
        Thickness::new(
            self.left + other.left,
            self.top + other.top,
            self.right + other.right,
            self.bottom + other.bottom,
        )
    }
}

// =============================================================================
// Color
// =============================================================================

/// RGBA color with 8-bit channels (0-255).
///
/// Using integers for exact comparison - no floating point epsilon needed.
/// Special value: r=-1 means "terminal default" (let terminal pick),
/// r=-2 means ANSI palette color with the index in g.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgba {
    pub r: i16,
    pub g: i16,
    pub b: i16,
    pub a: i16,
}

impl Rgba {
    /// Create a new RGBA color.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as i16,
            g: g as i16,
            b: b as i16,
            a: a as i16,
        }
    }

    /// Create an opaque RGB color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Terminal default color (let terminal decide).
    pub const TERMINAL_DEFAULT: Self = Self {
        r: -1,
        g: -1,
        b: -1,
        a: -1,
    };

    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const BLUE: Self = Self::rgb(0, 0, 255);
    pub const CYAN: Self = Self::rgb(0, 255, 255);
    pub const GRAY: Self = Self::rgb(128, 128, 128);

    /// Create an ANSI palette color (0-255).
    pub const fn ansi(index: u8) -> Self {
        Self {
            r: -2,
            g: index as i16,
            b: 0,
            a: 255,
        }
    }

    /// Check if this is the terminal default color.
    #[inline]
    pub const fn is_terminal_default(&self) -> bool {
        self.r == -1
    }

    /// Check if this is an ANSI palette color.
    #[inline]
    pub const fn is_ansi(&self) -> bool {
        self.r == -2
    }

    /// Get ANSI palette index (only valid if is_ansi() returns true).
    #[inline]
    pub const fn ansi_index(&self) -> u8 {
        self.g as u8
    }
}

// =============================================================================
// Cell Attributes (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Text attributes as a bitfield for efficient storage and comparison.
    ///
    /// Combine with bitwise OR: `Attr::BOLD | Attr::ITALIC`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Attr: u8 {
        const NONE = 0;
        const BOLD = 1 << 0;
        const DIM = 1 << 1;
        const ITALIC = 1 << 2;
        const UNDERLINE = 1 << 3;
        const INVERSE = 1 << 4;
    }
}

// =============================================================================
// Color attributes and schemes
// =============================================================================

/// A complete paint state for the rendering surface: foreground,
/// background, and attribute flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColorAttr {
    pub fg: Rgba,
    pub bg: Rgba,
    pub attrs: Attr,
}

impl ColorAttr {
    pub const fn new(fg: Rgba, bg: Rgba) -> Self {
        Self {
            fg,
            bg,
            attrs: Attr::NONE,
        }
    }

    pub const fn with_attrs(mut self, attrs: Attr) -> Self {
        self.attrs = attrs;
        self
    }
}

/// The color variants a view renders with, selected by focus state.
///
/// `normal`/`focus` paint ordinary content; the `hot_*` variants paint
/// highlighted runs such as a window title or a hotkey marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorScheme {
    pub normal: ColorAttr,
    pub focus: ColorAttr,
    pub hot_normal: ColorAttr,
    pub hot_focus: ColorAttr,
}

impl Default for ColorScheme {
    fn default() -> Self {
        let normal = ColorAttr::new(Rgba::TERMINAL_DEFAULT, Rgba::TERMINAL_DEFAULT);
        Self {
            normal,
            focus: normal.with_attrs(Attr::INVERSE),
            hot_normal: normal.with_attrs(Attr::BOLD),
            hot_focus: normal.with_attrs(Attr::BOLD | Attr::INVERSE),
        }
    }
}

// =============================================================================
// Border Styles
// =============================================================================

/// Border style constants.
///
/// All 10 standard terminal border styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum BorderStyle {
    #[default]
    None = 0,
    /// ─ │ ┌ ┐ └ ┘
    Single = 1,
    /// ═ ║ ╔ ╗ ╚ ╝
    Double = 2,
    /// ─ │ ╭ ╮ ╰ ╯
    Rounded = 3,
    /// ━ ┃ ┏ ┓ ┗ ┛
    Bold = 4,
    /// ┄ ┆ ┌ ┐ └ ┘
    Dashed = 5,
    /// · · · · · ·
    Dotted = 6,
    /// - | + + + +
    Ascii = 7,
    /// █ █ █ █ █ █
    Block = 8,
    /// ═ │ ╒ ╕ ╘ ╛ (double horizontal, single vertical)
    DoubleHorz = 9,
    /// ─ ║ ╓ ╖ ╙ ╜ (single horizontal, double vertical)
    DoubleVert = 10,
}

impl BorderStyle {
    /// Get the border characters for this style.
    ///
    /// Returns: (horizontal, vertical, top_left, top_right, bottom_right, bottom_left)
    pub const fn chars(&self) -> (char, char, char, char, char, char) {
        match self {
            Self::None => (' ', ' ', ' ', ' ', ' ', ' '),
            Self::Single => ('─', '│', '┌', '┐', '┘', '└'),
            Self::Double => ('═', '║', '╔', '╗', '╝', '╚'),
            Self::Rounded => ('─', '│', '╭', '╮', '╯', '╰'),
            Self::Bold => ('━', '┃', '┏', '┓', '┛', '┗'),
            Self::Dashed => ('┄', '┆', '┌', '┐', '┘', '└'),
            Self::Dotted => ('·', '·', '·', '·', '·', '·'),
            Self::Ascii => ('-', '|', '+', '+', '+', '+'),
            Self::Block => ('█', '█', '█', '█', '█', '█'),
            Self::DoubleHorz => ('═', '│', '╒', '╕', '╛', '╘'),
            Self::DoubleVert => ('─', '║', '╓', '╖', '╜', '╙'),
        }
    }
}

// =============================================================================
// Size-to-text policy
// =============================================================================

bitflags::bitflags! {
    /// Which content-size axes are derived from measuring the view's
    /// text instead of being fixed by its frame.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct SizeToText: u8 {
        const WIDTH = 1 << 0;
        const HEIGHT = 1 << 1;
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_clamps_negative_size() {
        let r = Rect::new(2, 3, -4, 5);
        assert_eq!(r.width, 0);
        assert_eq!(r.height, 5);
        assert!(r.size().is_empty());
    }

    #[test]
    fn test_rect_contains() {
        let r = Rect::new(1, 1, 3, 3);
        assert!(r.contains(Point::new(1, 1)));
        assert!(r.contains(Point::new(3, 3)));
        assert!(!r.contains(Point::new(4, 1)));
        assert!(!r.contains(Point::new(0, 2)));
    }

    #[test]
    fn test_rect_intersect() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(5, 5, 10, 10);
        assert_eq!(a.intersect(&b), Some(Rect::new(5, 5, 5, 5)));

        let c = Rect::new(20, 20, 2, 2);
        assert_eq!(a.intersect(&c), None);
    }

    #[test]
    fn test_thickness_inner_rect() {
        let t = Thickness::new(1, 1, 1, 1);
        let inner = t.inner_rect(Rect::new(0, 0, 10, 5));
        assert_eq!(inner, Rect::new(1, 1, 8, 3));
    }

    #[test]
    fn test_thickness_inner_rect_clamps() {
        let t = Thickness::new(3, 3, 3, 3);
        let inner = t.inner_rect(Rect::new(0, 0, 4, 4));
        assert_eq!(inner.width, 0);
        assert_eq!(inner.height, 0);
        assert_eq!(inner.origin(), Point::new(3, 3));
    }

    #[test]
    fn test_thickness_add() {
        let a = Thickness::new(1, 0, 1, 0);
        let b = Thickness::new(0, 2, 0, 2);
        assert_eq!(a.add(b), Thickness::new(1, 2, 1, 2));
    }

    #[test]
    fn test_border_style_chars() {
        let (h, v, tl, tr, br, bl) = BorderStyle::Single.chars();
        assert_eq!((h, v), ('─', '│'));
        assert_eq!((tl, tr, br, bl), ('┌', '┐', '┘', '└'));

        let (h, v, ..) = BorderStyle::Double.chars();
        assert_eq!((h, v), ('═', '║'));
    }

    #[test]
    fn test_rgba_markers() {
        assert!(Rgba::TERMINAL_DEFAULT.is_terminal_default());
        let c = Rgba::ansi(42);
        assert!(c.is_ansi());
        assert_eq!(c.ansi_index(), 42);
        assert!(!Rgba::rgb(1, 2, 3).is_ansi());
    }

    #[test]
    fn test_default_scheme_variants() {
        let scheme = ColorScheme::default();
        assert_eq!(scheme.focus.attrs, Attr::INVERSE);
        assert!(scheme.hot_focus.attrs.contains(Attr::BOLD));
        assert!(scheme.hot_focus.attrs.contains(Attr::INVERSE));
    }
}
