//! Adornments.
//!
//! An [`Adornment`] is a non-recursive decoration bound to exactly one
//! owning view: a border, margin, or padding band that lives *outside*
//! the owner's content area. Adornments are never subviews - their
//! superview is always `None`, and trying to give them one fails -
//! so their screen rectangle resolves through the owner's ancestor
//! chain instead of a chain of their own.

use tracing::trace;

use crate::canvas::{LineCanvas, Orientation};
use crate::error::ViewError;
use crate::surface::Surface;
use crate::text::string_width;
use crate::types::{BorderStyle, Point, Rect, Thickness};
use crate::view::{ViewId, ViewTree};

/// A border/margin decoration attached to one owning view.
#[derive(Debug, Clone, Default)]
pub struct Adornment {
    parent: Option<ViewId>,
    /// Inset reserved on each edge of the owner's frame.
    pub thickness: Thickness,
    /// Border drawn along the outer edge; `None` draws no lines but
    /// the thickness fill still happens.
    pub border_style: BorderStyle,
    /// Overrides the owner's title when set.
    pub title: Option<String>,
    /// Local rectangle the adornment occupies, relative to the owner's
    /// frame origin.
    pub frame: Rect,
    /// Glyph the thickness band is filled with.
    pub fill: char,
}

impl Adornment {
    pub fn new(thickness: Thickness, border_style: BorderStyle) -> Self {
        Self {
            thickness,
            border_style,
            fill: ' ',
            ..Self::default()
        }
    }

    pub(crate) fn attach(&mut self, owner: ViewId) {
        self.parent = Some(owner);
    }

    /// The owning view, if attached.
    pub fn parent(&self) -> Option<ViewId> {
        self.parent
    }

    /// Adornments are not subviews; there is never a superview.
    pub fn superview(&self) -> Option<ViewId> {
        None
    }

    /// Always fails: an adornment cannot join a subview hierarchy.
    pub fn set_superview(&mut self, _superview: ViewId) -> Result<(), ViewError> {
        Err(ViewError::AdornmentSuperView)
    }

    /// The inner area in adornment-relative coordinates: the local
    /// rect reduced by the thickness, anchored at (0,0). Content
    /// coordinates never inherit the owner's origin.
    pub fn bounds(&self) -> Rect {
        let inner = self
            .thickness
            .inner_rect(Rect::from_parts(Point::new(0, 0), self.frame.size()));
        Rect::new(0, 0, inner.width, inner.height)
    }

    /// The adornment's rectangle in screen coordinates, resolved
    /// through the owner's ancestor chain. A detached adornment falls
    /// back to its own local rectangle.
    pub fn screen_rect(&self, tree: &ViewTree) -> Rect {
        match self.parent {
            Some(owner) => Rect::from_parts(
                tree.view_to_screen(owner, self.frame.origin()),
                self.frame.size(),
            ),
            None => self.frame,
        }
    }

    /// Paint the adornment: thickness fill, border lines, title.
    ///
    /// The clip is set exclusively to the adornment's screen rect for
    /// the duration and restored afterwards.
    pub fn render(&self, tree: &ViewTree, surface: &mut dyn Surface) {
        let scheme = match self.parent {
            Some(owner) => tree.color_scheme(owner),
            None => Default::default(),
        };
        let screen = self.screen_rect(tree);
        if screen.size().is_empty() {
            return;
        }
        trace!(target: "weft_tui::render", ?screen, "adornment render");

        let prev_clip = surface.set_clip(screen);
        surface.set_color(scheme.normal);

        fill_thickness(surface, screen, self.thickness, self.fill);

        if self.border_style != BorderStyle::None {
            let mut lc = LineCanvas::new();
            lc.add_line(
                screen.origin(),
                screen.width - 1,
                Orientation::Horizontal,
                self.border_style,
            );
            lc.add_line(
                screen.origin(),
                screen.height - 1,
                Orientation::Vertical,
                self.border_style,
            );
            lc.add_line(
                Point::new(screen.x, screen.bottom() - 1),
                screen.width - 1,
                Orientation::Horizontal,
                self.border_style,
            );
            lc.add_line(
                Point::new(screen.right() - 1, screen.y),
                screen.height - 1,
                Orientation::Vertical,
                self.border_style,
            );
            for (pos, glyph) in lc.generate(screen) {
                surface.paint(pos, glyph);
            }

            let title = self.effective_title(tree);
            if !title.is_empty() && screen.width > 4 {
                let focused = self.parent.map(|o| tree.has_focus(o)).unwrap_or(false);
                surface.set_color(if focused {
                    scheme.hot_normal
                } else {
                    scheme.normal
                });
                draw_title(surface, screen, &title);
            }
        }

        surface.set_clip(prev_clip);
    }

    fn effective_title(&self, tree: &ViewTree) -> String {
        if let Some(title) = &self.title {
            return title.clone();
        }
        self.parent
            .map(|o| tree.title(o).to_string())
            .unwrap_or_default()
    }
}

/// Fill the band between `rect` and its thickness-reduced inner rect.
fn fill_thickness(surface: &mut dyn Surface, rect: Rect, thickness: Thickness, fill: char) {
    let inner = thickness.inner_rect(rect);
    for y in rect.y..rect.bottom() {
        for x in rect.x..rect.right() {
            let p = Point::new(x, y);
            if !inner.contains(p) {
                surface.paint(p, fill);
            }
        }
    }
}

/// Paint the title into the top border row, truncated to fit.
fn draw_title(surface: &mut dyn Surface, rect: Rect, title: &str) {
    let available = rect.width - 4;
    let mut text = String::new();
    let mut used = 0;
    for c in title.chars() {
        let w = crate::text::char_width(c);
        if used + w > available {
            break;
        }
        text.push(c);
        used += w;
    }
    if text.is_empty() {
        return;
    }
    let padded = format!(" {} ", text);
    let x = rect.x + (rect.width - string_width(&padded)) / 2;
    surface.paint_str(Point::new(x, rect.y), &padded);
}

// =============================================================================
// Tests
// =============================================================================
