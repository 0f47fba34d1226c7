//! Terminal-backed surface.
//!
//! Queues paints into an in-memory byte buffer as ANSI command
//! sequences and flushes them to stdout in one write. Batching keeps
//! a full redraw to a single syscall.

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{
    Attribute, Color, Print, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use crossterm::terminal;

use super::Surface;
use crate::types::{Attr, ColorAttr, Point, Rect, Rgba, Size};

/// A [`Surface`] that renders to the terminal via crossterm.
///
/// Paints accumulate in a buffer; nothing reaches the terminal until
/// [`flush`](TerminalSurface::flush) runs.
pub struct TerminalSurface {
    buf: Vec<u8>,
    size: Size,
    clip: Rect,
}

impl TerminalSurface {
    /// A surface of the given size.
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            buf: Vec::with_capacity(16 * 1024),
            size: Size::new(width, height),
            clip: Rect::new(0, 0, width, height),
        }
    }

    /// A surface sized to the current terminal.
    pub fn from_terminal() -> io::Result<Self> {
        let (w, h) = terminal::size()?;
        Ok(Self::new(w as i32, h as i32))
    }

    /// Write all queued output to stdout and flush it.
    pub fn flush(&mut self) -> io::Result<()> {
        let mut out = io::stdout();
        out.write_all(&self.buf)?;
        out.flush()?;
        self.buf.clear();
        Ok(())
    }

    /// Bytes queued but not yet flushed.
    pub fn pending(&self) -> usize {
        self.buf.len()
    }
}

fn to_crossterm(color: Rgba) -> Color {
    if color.is_terminal_default() {
        Color::Reset
    } else if color.is_ansi() {
        Color::AnsiValue(color.ansi_index())
    } else {
        Color::Rgb {
            r: color.r as u8,
            g: color.g as u8,
            b: color.b as u8,
        }
    }
}

impl Surface for TerminalSurface {
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
        // Queuing into a Vec cannot fail.
        let _ = queue!(
            self.buf,
            SetAttribute(Attribute::Reset),
            SetForegroundColor(to_crossterm(color.fg)),
            SetBackgroundColor(to_crossterm(color.bg)),
        );
        let flags = [
            (Attr::BOLD, Attribute::Bold),
            (Attr::DIM, Attribute::Dim),
            (Attr::ITALIC, Attribute::Italic),
            (Attr::UNDERLINE, Attribute::Underlined),
            (Attr::INVERSE, Attribute::Reverse),
        ];
        for (flag, attribute) in flags {
            if color.attrs.contains(flag) {
                let _ = queue!(self.buf, SetAttribute(attribute));
            }
        }
    }

    fn paint(&mut self, pos: Point, glyph: char) {
        let screen = Rect::new(0, 0, self.size.width, self.size.height);
        if !self.clip.contains(pos) || !screen.contains(pos) {
            return;
        }
        let _ = queue!(self.buf, MoveTo(pos.x as u16, pos.y as u16), Print(glyph));
    }
}
