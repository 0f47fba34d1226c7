//! Line compositing.
//!
//! [`LineCanvas`] collects straight line segments and resolves them
//! into `(position, glyph)` pairs, picking correct corner and junction
//! characters where segments meet or cross. It is a pure function of
//! the segments added: no surface access, no tree access.
//!
//! Each covered cell accumulates up to four "arms" (up/down/left/right)
//! contributed by the segments passing through it; the glyph is chosen
//! from the arm pattern. Endpoints contribute only their inward arm,
//! which is what turns two meeting segment ends into a corner.

use std::collections::BTreeMap;

use crate::types::{BorderStyle, Point, Rect};

/// Axis of a line segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// Junction class of an arm. Styles collapse onto these for
/// intersection resolution; straight runs keep their original style
/// glyphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum LineKind {
    None,
    Single,
    Double,
    Thick,
}

fn kind_of(style: BorderStyle, orientation: Orientation) -> LineKind {
    match style {
        BorderStyle::None => LineKind::None,
        BorderStyle::Double => LineKind::Double,
        BorderStyle::Bold => LineKind::Thick,
        BorderStyle::DoubleHorz => match orientation {
            Orientation::Horizontal => LineKind::Double,
            Orientation::Vertical => LineKind::Single,
        },
        BorderStyle::DoubleVert => match orientation {
            Orientation::Horizontal => LineKind::Single,
            Orientation::Vertical => LineKind::Double,
        },
        _ => LineKind::Single,
    }
}

/// One arm entering a cell.
#[derive(Debug, Clone, Copy)]
struct Arm {
    kind: LineKind,
    style: BorderStyle,
}

/// Arm slots: up, down, left, right.
#[derive(Debug, Clone, Copy, Default)]
struct CellArms {
    up: Option<Arm>,
    down: Option<Arm>,
    left: Option<Arm>,
    right: Option<Arm>,
    // Style and axis of the last segment touching the cell; resolves
    // degenerate cells with no arms (zero-length segments).
    last: Option<(BorderStyle, Orientation)>,
}

/// A straight line segment: start cell, distance, axis, style.
///
/// A segment of length `n` covers `n + 1` cells, from `start` to
/// `start + n` along its axis. Length zero covers a single cell.
#[derive(Debug, Clone, Copy)]
pub struct StraightLine {
    pub start: Point,
    pub length: i32,
    pub orientation: Orientation,
    pub style: BorderStyle,
}

/// Accumulates line segments and generates the composed glyph map.
#[derive(Debug, Default)]
pub struct LineCanvas {
    lines: Vec<StraightLine>,
}

impl LineCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a segment. Segments with `BorderStyle::None` or negative
    /// length are ignored.
    pub fn add_line(
        &mut self,
        start: Point,
        length: i32,
        orientation: Orientation,
        style: BorderStyle,
    ) {
        if style == BorderStyle::None || length < 0 {
            return;
        }
        self.lines.push(StraightLine {
            start,
            length,
            orientation,
            style,
        });
    }

    /// Resolve all segments into glyphs, restricted to `clip`.
    pub fn generate(&self, clip: Rect) -> BTreeMap<Point, char> {
        let mut cells: BTreeMap<Point, CellArms> = BTreeMap::new();

        for line in &self.lines {
            let kind = kind_of(line.style, line.orientation);
            for i in 0..=line.length {
                let p = match line.orientation {
                    Orientation::Horizontal => line.start.offset(i, 0),
                    Orientation::Vertical => line.start.offset(0, i),
                };
                let cell = cells.entry(p).or_default();
                cell.last = Some((line.style, line.orientation));
                let arm = Arm {
                    kind,
                    style: line.style,
                };
                match line.orientation {
                    Orientation::Horizontal => {
                        if i > 0 {
                            cell.left = Some(arm);
                        }
                        if i < line.length {
                            cell.right = Some(arm);
                        }
                    }
                    Orientation::Vertical => {
                        if i > 0 {
                            cell.up = Some(arm);
                        }
                        if i < line.length {
                            cell.down = Some(arm);
                        }
                    }
                }
            }
        }

        cells
            .into_iter()
            .filter(|(p, _)| clip.contains(*p))
            .filter_map(|(p, arms)| resolve(&arms).map(|ch| (p, ch)))
            .collect()
    }
}

/// Pick the glyph for one cell from its accumulated arms.
fn resolve(cell: &CellArms) -> Option<char> {
    let (u, d, l, r) = (cell.up, cell.down, cell.left, cell.right);

    // No arms at all: a zero-length segment. Draw its straight glyph.
    if u.is_none() && d.is_none() && l.is_none() && r.is_none() {
        let (style, orientation) = cell.last?;
        let (h, v, ..) = style.chars();
        return Some(match orientation {
            Orientation::Horizontal => h,
            Orientation::Vertical => v,
        });
    }

    // Straight runs and lone endpoints keep their style's glyph.
    if u.is_none() && d.is_none() {
        let style = l.or(r)?.style;
        return Some(style.chars().0);
    }
    if l.is_none() && r.is_none() {
        let style = u.or(d)?.style;
        return Some(style.chars().1);
    }

    // A corner formed by one segment style uses that style's corner
    // glyphs (this is what keeps Rounded corners round).
    let corner = |vert: Option<Arm>, horiz: Option<Arm>| -> Option<BorderStyle> {
        match (vert, horiz) {
            (Some(a), Some(b)) if a.style == b.style => Some(a.style),
            _ => None,
        }
    };
    let arm_count =
        u.is_some() as u8 + d.is_some() as u8 + l.is_some() as u8 + r.is_some() as u8;
    if arm_count == 2 {
        let pair_style = corner(d, r)
            .or_else(|| corner(d, l))
            .or_else(|| corner(u, l))
            .or_else(|| corner(u, r));
        if let Some(style) = pair_style {
            let (.., tl, tr, br, bl) = style.chars();
            if d.is_some() && r.is_some() {
                return Some(tl);
            }
            if d.is_some() && l.is_some() {
                return Some(tr);
            }
            if u.is_some() && l.is_some() {
                return Some(br);
            }
            if u.is_some() && r.is_some() {
                return Some(bl);
            }
        }
    }

    // Junctions between differing styles resolve by junction class.
    Some(junction(kind(u), kind(d), kind(l), kind(r)))
}

fn kind(arm: Option<Arm>) -> LineKind {
    arm.map(|a| a.kind).unwrap_or(LineKind::None)
}

/// Glyph table for corner/tee/cross patterns by junction class.
///
/// Pure Single, Double and Thick patterns have full coverage; mixed
/// Single/Double uses the dedicated box-drawing range. Thick mixed with
/// anything else downgrades to Single (the box-drawing repertoire has
/// no complete mixed-thick set).
fn junction(u: LineKind, d: LineKind, l: LineKind, r: LineKind) -> char {
    use LineKind::{Double, None, Single, Thick};

    let arms = [u, d, l, r];
    let has = |k: LineKind| arms.iter().any(|&a| a == k);

    // Downgrade mixed-thick patterns.
    let normalize = |k: LineKind| {
        if k == Thick && (has(Single) || has(Double)) {
            Single
        } else {
            k
        }
    };
    let (u, d, l, r) = (normalize(u), normalize(d), normalize(l), normalize(r));

    match (u, d, l, r) {
        // Pure single
        (None, Single, None, Single) => '┌',
        (None, Single, Single, None) => '┐',
        (Single, None, None, Single) => '└',
        (Single, None, Single, None) => '┘',
        (Single, Single, None, Single) => '├',
        (Single, Single, Single, None) => '┤',
        (None, Single, Single, Single) => '┬',
        (Single, None, Single, Single) => '┴',
        (Single, Single, Single, Single) => '┼',

        // Pure double
        (None, Double, None, Double) => '╔',
        (None, Double, Double, None) => '╗',
        (Double, None, None, Double) => '╚',
        (Double, None, Double, None) => '╝',
        (Double, Double, None, Double) => '╠',
        (Double, Double, Double, None) => '╣',
        (None, Double, Double, Double) => '╦',
        (Double, None, Double, Double) => '╩',
        (Double, Double, Double, Double) => '╬',

        // Pure thick
        (None, Thick, None, Thick) => '┏',
        (None, Thick, Thick, None) => '┓',
        (Thick, None, None, Thick) => '┗',
        (Thick, None, Thick, None) => '┛',
        (Thick, Thick, None, Thick) => '┣',
        (Thick, Thick, Thick, None) => '┫',
        (None, Thick, Thick, Thick) => '┳',
        (Thick, None, Thick, Thick) => '┻',
        (Thick, Thick, Thick, Thick) => '╋',

        // Single vertical, double horizontal
        (None, Single, None, Double) => '╒',
        (None, Single, Double, None) => '╕',
        (Single, None, None, Double) => '╘',
        (Single, None, Double, None) => '╛',
        (Single, Single, None, Double) => '╞',
        (Single, Single, Double, None) => '╡',
        (None, Single, Double, Double) => '╤',
        (Single, None, Double, Double) => '╧',
        (Single, Single, Double, Double) => '╪',

        // Double vertical, single horizontal
        (None, Double, None, Single) => '╓',
        (None, Double, Single, None) => '╖',
        (Double, None, None, Single) => '╙',
        (Double, None, Single, None) => '╜',
        (Double, Double, None, Single) => '╟',
        (Double, Double, Single, None) => '╢',
        (None, Double, Single, Single) => '╥',
        (Double, None, Single, Single) => '╨',
        (Double, Double, Single, Single) => '╫',

        // Uneven mixes settle on the closest cross/tee.
        (None, None, _, _) => '─',
        (_, _, None, None) => '│',
        _ => '┼',
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn border(canvas: &mut LineCanvas, rect: Rect, style: BorderStyle) {
        let origin = rect.origin();
        canvas.add_line(origin, rect.width - 1, Orientation::Horizontal, style);
        canvas.add_line(origin, rect.height - 1, Orientation::Vertical, style);
        canvas.add_line(
            Point::new(rect.x, rect.bottom() - 1),
            rect.width - 1,
            Orientation::Horizontal,
            style,
        );
        canvas.add_line(
            Point::new(rect.right() - 1, rect.y),
            rect.height - 1,
            Orientation::Vertical,
            style,
        );
    }

    #[test]
    fn test_single_rect_corners() {
        let mut lc = LineCanvas::new();
        let rect = Rect::new(0, 0, 4, 3);
        border(&mut lc, rect, BorderStyle::Single);
        let map = lc.generate(rect);

        assert_eq!(map.get(&Point::new(0, 0)), Some(&'┌'));
        assert_eq!(map.get(&Point::new(3, 0)), Some(&'┐'));
        assert_eq!(map.get(&Point::new(0, 2)), Some(&'└'));
        assert_eq!(map.get(&Point::new(3, 2)), Some(&'┘'));
        assert_eq!(map.get(&Point::new(1, 0)), Some(&'─'));
        assert_eq!(map.get(&Point::new(0, 1)), Some(&'│'));
        // Interior cells carry no glyphs.
        assert_eq!(map.get(&Point::new(1, 1)), None);
    }

    #[test]
    fn test_double_rect_corners() {
        let mut lc = LineCanvas::new();
        let rect = Rect::new(2, 1, 5, 4);
        border(&mut lc, rect, BorderStyle::Double);
        let map = lc.generate(rect);

        assert_eq!(map.get(&Point::new(2, 1)), Some(&'╔'));
        assert_eq!(map.get(&Point::new(6, 4)), Some(&'╝'));
        assert_eq!(map.get(&Point::new(4, 1)), Some(&'═'));
        assert_eq!(map.get(&Point::new(2, 2)), Some(&'║'));
    }

    #[test]
    fn test_rounded_corners_stay_round() {
        let mut lc = LineCanvas::new();
        let rect = Rect::new(0, 0, 3, 3);
        border(&mut lc, rect, BorderStyle::Rounded);
        let map = lc.generate(rect);

        assert_eq!(map.get(&Point::new(0, 0)), Some(&'╭'));
        assert_eq!(map.get(&Point::new(2, 0)), Some(&'╮'));
        assert_eq!(map.get(&Point::new(0, 2)), Some(&'╰'));
        assert_eq!(map.get(&Point::new(2, 2)), Some(&'╯'));
    }

    #[test]
    fn test_crossing_lines_make_a_cross() {
        let mut lc = LineCanvas::new();
        lc.add_line(Point::new(0, 2), 4, Orientation::Horizontal, BorderStyle::Single);
        lc.add_line(Point::new(2, 0), 4, Orientation::Vertical, BorderStyle::Single);
        let map = lc.generate(Rect::new(0, 0, 5, 5));

        assert_eq!(map.get(&Point::new(2, 2)), Some(&'┼'));
    }

    #[test]
    fn test_tee_where_edge_meets_edge() {
        let mut lc = LineCanvas::new();
        lc.add_line(Point::new(0, 0), 4, Orientation::Horizontal, BorderStyle::Single);
        lc.add_line(Point::new(2, 0), 3, Orientation::Vertical, BorderStyle::Single);
        let map = lc.generate(Rect::new(0, 0, 5, 5));

        assert_eq!(map.get(&Point::new(2, 0)), Some(&'┬'));
    }

    #[test]
    fn test_mixed_single_double_junction() {
        let mut lc = LineCanvas::new();
        lc.add_line(Point::new(0, 1), 4, Orientation::Horizontal, BorderStyle::Double);
        lc.add_line(Point::new(2, 1), 3, Orientation::Vertical, BorderStyle::Single);
        let map = lc.generate(Rect::new(0, 0, 6, 6));

        assert_eq!(map.get(&Point::new(2, 1)), Some(&'╤'));
    }

    #[test]
    fn test_clip_restricts_output() {
        let mut lc = LineCanvas::new();
        lc.add_line(Point::new(0, 0), 9, Orientation::Horizontal, BorderStyle::Single);
        let map = lc.generate(Rect::new(0, 0, 5, 1));

        assert_eq!(map.len(), 5);
        assert!(map.keys().all(|p| p.x < 5));
    }

    #[test]
    fn test_none_style_adds_nothing() {
        let mut lc = LineCanvas::new();
        lc.add_line(Point::new(0, 0), 5, Orientation::Horizontal, BorderStyle::None);
        assert!(lc.generate(Rect::new(0, 0, 10, 10)).is_empty());
    }

    #[test]
    fn test_zero_length_segment_is_one_cell() {
        let mut lc = LineCanvas::new();
        lc.add_line(Point::new(3, 3), 0, Orientation::Vertical, BorderStyle::Single);
        let map = lc.generate(Rect::new(0, 0, 10, 10));

        assert_eq!(map.get(&Point::new(3, 3)), Some(&'│'));
        assert_eq!(map.len(), 1);
    }
}
