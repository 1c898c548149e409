//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! Frames are compared row by row. A row that changed is repainted from its
//! first to its last differing cell in one run; untouched rows cost nothing.
//! Falling pieces only ever change a handful of rows, so most frames are tiny.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Color::Rgb {
            r: rgb.r,
            g: rgb.g,
            b: rgb.b,
        }
    }
}

pub struct TerminalRenderer {
    stdout: io::Stdout,
    /// What the terminal currently shows; `None` forces a full repaint.
    front: Option<FrameBuffer>,
    bytes: Vec<u8>,
    active: bool,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            front: None,
            bytes: Vec::with_capacity(16 * 1024),
            active: false,
        }
    }

    /// Raw mode, alternate screen and mouse capture (for the touch pad).
    ///
    /// Raw mode also keeps arrow keys and space from scrolling the terminal.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.active = true;
        self.bytes.clear();
        self.bytes.queue(terminal::EnterAlternateScreen)?;
        self.bytes.queue(EnableMouseCapture)?;
        self.bytes.queue(cursor::Hide)?;
        self.bytes.queue(terminal::DisableLineWrap)?;
        self.flush()
    }

    /// Restore the terminal. Safe to call more than once.
    pub fn exit(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        self.bytes.clear();
        self.bytes.queue(ResetColor)?;
        self.bytes.queue(SetAttribute(Attribute::Reset))?;
        self.bytes.queue(terminal::EnableLineWrap)?;
        self.bytes.queue(cursor::Show)?;
        self.bytes.queue(DisableMouseCapture)?;
        self.bytes.queue(terminal::LeaveAlternateScreen)?;
        self.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Repaint everything on the next draw (after a resize).
    pub fn invalidate(&mut self) {
        self.front = None;
    }

    /// Show `fb`, then hand back the previous frame in its place.
    ///
    /// The loop keeps one framebuffer and renders into it every frame; the
    /// two buffers trade places so nothing is cloned.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.bytes.clear();
        encode_frame(self.front.as_ref(), fb, &mut self.bytes)?;
        self.flush()?;

        let mut shown = self
            .front
            .take()
            .unwrap_or_else(|| FrameBuffer::new(fb.width(), fb.height()));
        shown.resize(fb.width(), fb.height());
        std::mem::swap(&mut shown, fb);
        self.front = Some(shown);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.stdout.write_all(&self.bytes)?;
        self.stdout.flush()?;
        Ok(())
    }
}

/// Encode the commands that turn `prev` into `next` on screen.
///
/// With no previous frame, or one of another size, the screen is cleared and
/// every row is painted. Returns the number of rows written.
pub fn encode_frame(prev: Option<&FrameBuffer>, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<u16> {
    let prev = prev.filter(|p| p.width() == next.width() && p.height() == next.height());
    if prev.is_none() {
        out.queue(terminal::Clear(terminal::ClearType::All))?;
    }

    let mut pen = Pen::default();
    let mut rows = 0;
    for y in 0..next.height() {
        let row = next.row(y);
        let span = match prev {
            Some(prev) => dirty_span(prev.row(y), row),
            None => Some((0, row.len())),
        };
        let Some((start, end)) = span else {
            continue;
        };
        if start == end {
            continue;
        }

        out.queue(cursor::MoveTo(start as u16, y))?;
        for cell in &row[start..end] {
            pen.apply(out, cell.style)?;
            out.queue(Print(cell.ch))?;
        }
        rows += 1;
    }

    pen.finish(out)?;
    Ok(rows)
}

/// Half-open column range covering every differing cell of a row.
fn dirty_span(old: &[Cell], new: &[Cell]) -> Option<(usize, usize)> {
    let differs = |(a, b): (&Cell, &Cell)| a != b;
    let first = old.iter().zip(new).position(differs)?;
    let last = old.iter().zip(new).rposition(differs)?;
    Some((first, last + 1))
}

/// Tracks the terminal's current style so only real changes are sent.
#[derive(Default)]
struct Pen {
    style: Option<CellStyle>,
}

impl Pen {
    fn apply(&mut self, out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
        let prev = self.style.replace(style);
        let attrs_changed = prev.map_or(true, |p| p.bold != style.bold || p.dim != style.dim);

        if attrs_changed {
            // SGR reset also drops colors; both are re-sent below.
            out.queue(SetAttribute(Attribute::Reset))?;
            if style.bold {
                out.queue(SetAttribute(Attribute::Bold))?;
            }
            if style.dim {
                out.queue(SetAttribute(Attribute::Dim))?;
            }
        }
        if attrs_changed || prev.map(|p| p.fg) != Some(style.fg) {
            out.queue(SetForegroundColor(style.fg.into()))?;
        }
        if attrs_changed || prev.map(|p| p.bg) != Some(style.bg) {
            out.queue(SetBackgroundColor(style.bg.into()))?;
        }
        Ok(())
    }

    fn finish(self, out: &mut Vec<u8>) -> Result<()> {
        if self.style.is_some() {
            out.queue(ResetColor)?;
            out.queue(SetAttribute(Attribute::Reset))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(haystack: &[u8], needle: &[u8]) -> usize {
        haystack.windows(needle.len()).filter(|w| *w == needle).count()
    }

    fn bytes_of(cmd: impl crossterm::Command) -> Vec<u8> {
        let mut v = Vec::new();
        v.queue(cmd).unwrap();
        v
    }

    #[test]
    fn first_frame_clears_and_paints_every_row() {
        let mut fb = FrameBuffer::new(2, 2);
        let style = CellStyle::default();
        for (i, ch) in ['A', '§', 'C', '¥'].into_iter().enumerate() {
            fb.put_char(i as u16 % 2, i as u16 / 2, ch, style);
        }

        let mut out = Vec::new();
        let rows = encode_frame(None, &fb, &mut out).unwrap();
        assert_eq!(rows, 2);
        assert!(out.starts_with(&bytes_of(terminal::Clear(terminal::ClearType::All))));
        let text = String::from_utf8_lossy(&out);
        for ch in ['A', '§', 'C', '¥'] {
            assert!(text.contains(ch));
        }
    }

    #[test]
    fn unchanged_frame_emits_nothing() {
        let fb = FrameBuffer::new(4, 3);
        let mut out = Vec::new();
        let rows = encode_frame(Some(&fb.clone()), &fb, &mut out).unwrap();
        assert_eq!(rows, 0);
        assert!(out.is_empty());
    }

    #[test]
    fn changed_row_is_repainted_between_first_and_last_difference() {
        let style = CellStyle::default();
        let prev = FrameBuffer::new(6, 2);
        let mut next = prev.clone();
        next.put_char(1, 1, 'X', style);
        next.put_char(3, 1, 'Y', style);

        assert_eq!(dirty_span(prev.row(0), next.row(0)), None);
        assert_eq!(dirty_span(prev.row(1), next.row(1)), Some((1, 4)));

        let mut out = Vec::new();
        assert_eq!(encode_frame(Some(&prev), &next, &mut out).unwrap(), 1);
        assert!(out.starts_with(&bytes_of(cursor::MoveTo(1, 1))));
    }

    #[test]
    fn resized_frame_is_repainted_in_full() {
        let prev = FrameBuffer::new(2, 2);
        let next = FrameBuffer::new(3, 2);
        let mut out = Vec::new();
        assert_eq!(encode_frame(Some(&prev), &next, &mut out).unwrap(), 2);
    }

    #[test]
    fn style_is_sent_once_per_run() {
        let red = CellStyle::new(Rgb::new(255, 0, 0), Rgb::new(0, 0, 0));
        let mut fb = FrameBuffer::new(8, 1);
        fb.put_str(0, 0, "abcdefgh", red);

        let mut out = Vec::new();
        encode_frame(None, &fb, &mut out).unwrap();
        let fg = bytes_of(SetForegroundColor(Rgb::new(255, 0, 0).into()));
        assert_eq!(count(&out, &fg), 1);
    }

    #[test]
    fn pen_resends_colors_after_attribute_reset() {
        let plain = CellStyle::default();
        let mut pen = Pen::default();
        let mut out = Vec::new();
        pen.apply(&mut out, plain).unwrap();

        out.clear();
        pen.apply(&mut out, plain).unwrap();
        assert!(out.is_empty());

        pen.apply(&mut out, plain.bold()).unwrap();
        let fg = bytes_of(SetForegroundColor(plain.fg.into()));
        assert_eq!(count(&out, &fg), 1);
    }
}
