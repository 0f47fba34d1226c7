//! View / text-formatter integration.
//!
//! Text lives in the view's [`TextFormatter`]; the methods here keep
//! the two in step: every mutation that can change measured size
//! invalidates the established content size and re-formats lazily,
//! and `resolve_content_size` runs the two-phase auto-size
//! negotiation for axes governed by the size-to-text policy.

use crate::surface::Surface;
use crate::text::{string_width, Alignment, TextDirection};
use crate::types::{Point, Rect, Size, SizeToText};
use crate::view::{ViewEvent, ViewId, ViewTree};

impl ViewTree {
    // =========================================================================
    // Text attributes
    // =========================================================================

    pub fn text(&self, id: ViewId) -> &str {
        self.node(id).formatter.text()
    }

    /// Replace the view's text. Always re-triggers measurement and a
    /// resize request, and queues a text-changed notification.
    pub fn set_text(&mut self, id: ViewId, text: impl Into<String>) {
        self.node_mut(id).formatter.set_text(text);
        self.resize_needed(id);
        self.push_event(ViewEvent::TextChanged { view: id });
    }

    pub fn text_alignment(&self, id: ViewId) -> Alignment {
        self.node(id).formatter.alignment()
    }

    pub fn set_text_alignment(&mut self, id: ViewId, alignment: Alignment) {
        self.node_mut(id).formatter.set_alignment(alignment);
        self.resize_needed(id);
    }

    pub fn vertical_text_alignment(&self, id: ViewId) -> Alignment {
        self.node(id).formatter.vertical_alignment()
    }

    pub fn set_vertical_text_alignment(&mut self, id: ViewId, alignment: Alignment) {
        self.node_mut(id).formatter.set_vertical_alignment(alignment);
        self.resize_needed(id);
    }

    pub fn text_direction(&self, id: ViewId) -> TextDirection {
        self.node(id).formatter.direction()
    }

    /// Change the reading direction. A change that flips the major
    /// axis forces a resize in addition to the re-measure, since wrap
    /// and alignment semantics depend on axis orientation.
    pub fn set_text_direction(&mut self, id: ViewId, direction: TextDirection) {
        let flipped = {
            let formatter = &self.node(id).formatter;
            formatter.direction().is_horizontal() != direction.is_horizontal()
        };
        self.node_mut(id).formatter.set_direction(direction);
        if flipped {
            self.resize_needed(id);
        } else {
            self.node_mut(id).needs_display = true;
        }
    }

    pub fn word_wrap(&self, id: ViewId) -> bool {
        self.node(id).formatter.word_wrap()
    }

    pub fn set_word_wrap(&mut self, id: ViewId, on: bool) {
        self.node_mut(id).formatter.set_word_wrap(on);
        self.resize_needed(id);
    }

    pub fn preserve_trailing_spaces(&self, id: ViewId) -> bool {
        self.node(id).formatter.preserve_trailing_spaces()
    }

    pub fn set_preserve_trailing_spaces(&mut self, id: ViewId, on: bool) {
        self.node_mut(id).formatter.set_preserve_trailing_spaces(on);
        self.node_mut(id).needs_display = true;
    }

    pub fn size_to_text(&self, id: ViewId) -> SizeToText {
        self.node(id).size_to_text
    }

    pub fn set_size_to_text(&mut self, id: ViewId, policy: SizeToText) {
        self.node_mut(id).size_to_text = policy;
        self.resize_needed(id);
    }

    /// Invalidate the established content size and schedule a
    /// re-measure.
    fn resize_needed(&mut self, id: ViewId) {
        let node = self.node_mut(id);
        node.content_size = None;
        node.formatter.set_needs_format();
        node.needs_display = true;
    }

    // =========================================================================
    // Content size negotiation
    // =========================================================================

    /// The view's content size: the last resolved size-to-text result,
    /// or the bounds size.
    pub fn content_size(&self, id: ViewId) -> Size {
        self.node(id)
            .content_size
            .unwrap_or_else(|| self.bounds(id).size())
    }

    /// Resolve the content size under the size-to-text policy.
    ///
    /// Axes not governed by the policy keep their established size.
    /// When both axes are unresolved the mutual recursion is broken
    /// deterministically: height resolves first against a screen-width
    /// bound, then width against the resolved height. Two phases, no
    /// fixpoint iteration.
    pub fn resolve_content_size(&mut self, id: ViewId) -> Size {
        let policy = self.node(id).size_to_text;
        if policy.is_empty() {
            return self.content_size(id);
        }

        let established = self.bounds(id).size();
        let screen = self.screen_size();
        let width_auto = policy.contains(SizeToText::WIDTH);
        let height_auto = policy.contains(SizeToText::HEIGHT);

        let mut width = if width_auto { 0 } else { established.width };
        let mut height = if height_auto { 0 } else { established.height };

        if height_auto {
            let width_bound = if width_auto { screen.width } else { width };
            height = self
                .node(id)
                .formatter
                .format_and_get_size(Size::new(width_bound, screen.height))
                .height;
        }
        if width_auto {
            width = self
                .node(id)
                .formatter
                .format_and_get_size(Size::new(screen.width, height))
                .width;
        }

        let size = Size::new(width, height);
        let node = self.node_mut(id);
        node.formatter.set_size(size);
        node.content_size = Some(size);
        size
    }

    // =========================================================================
    // Drawing
    // =========================================================================

    /// Paint the formatted text into the view's content area.
    ///
    /// Alignment offsets are computed against the content size; the
    /// clip is the content area, so overflow never escapes the view.
    pub fn draw_text(&mut self, id: ViewId, surface: &mut dyn Surface) {
        let size = self.content_size(id);
        let bounds = self.bounds(id);
        let origin = self.content_to_screen(id, Point::new(0, 0));
        let scheme = self.color_scheme(id);
        let focused = self.has_focus(id);

        let (direction, lines) = {
            let node = self.node_mut(id);
            node.formatter.set_size(size);
            (node.formatter.direction(), node.formatter.format_lines().to_vec())
        };
        if lines.is_empty() {
            return;
        }

        let clip = Rect::from_parts(origin, bounds.size());
        let prev_clip = surface.set_clip(clip);
        surface.set_color(if focused { scheme.focus } else { scheme.normal });

        let mut runs = lines;
        if direction.stacks_reversed() {
            runs.reverse();
        }

        if direction.is_horizontal() {
            let y0 = align_offset(self.vertical_text_alignment(id), size.height, runs.len() as i32);
            for (row, run) in runs.iter().enumerate() {
                let glyphs: String = if direction.is_reversed() {
                    run.chars().rev().collect()
                } else {
                    run.clone()
                };
                let x0 = align_offset(self.text_alignment(id), size.width, string_width(&glyphs));
                surface.paint_str(origin.offset(x0, y0 + row as i32), &glyphs);
            }
        } else {
            let x0 = align_offset(self.text_alignment(id), size.width, runs.len() as i32);
            for (col, run) in runs.iter().enumerate() {
                let glyphs: Vec<char> = if direction.is_reversed() {
                    run.chars().rev().collect()
                } else {
                    run.chars().collect()
                };
                let y0 = align_offset(
                    self.vertical_text_alignment(id),
                    size.height,
                    glyphs.len() as i32,
                );
                for (row, c) in glyphs.iter().enumerate() {
                    surface.paint(origin.offset(x0 + col as i32, y0 + row as i32), *c);
                }
            }
        }

        surface.set_clip(prev_clip);
    }
}

fn align_offset(alignment: Alignment, available: i32, used: i32) -> i32 {
    match alignment {
        Alignment::Start => 0,
        Alignment::Center => (available - used) / 2,
        Alignment::End => available - used,
    }
}

// =============================================================================
// Tests
// =============================================================================
