//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! The first frame (and any frame after a size change) is a full redraw;
//! after that only runs of changed glyphs are rewritten.

use std::io::{self, Stdout, Write};

use anyhow::Result;
use crossterm::{
    cursor,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal, QueueableCommand,
};

use crate::fb::{FrameBuffer, Rgb, Style};

pub struct TerminalRenderer {
    out: Stdout,
    prev: Option<FrameBuffer>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            out: io::stdout(),
            prev: None,
        }
    }

    /// Raw mode, alternate screen, hidden cursor.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.out.queue(terminal::EnterAlternateScreen)?;
        self.out.queue(cursor::Hide)?;
        self.out.queue(terminal::DisableLineWrap)?;
        self.out.flush()?;
        Ok(())
    }

    /// Undo [`TerminalRenderer::enter`].
    pub fn exit(&mut self) -> Result<()> {
        self.out.queue(ResetColor)?;
        self.out.queue(SetAttribute(Attribute::Reset))?;
        self.out.queue(terminal::EnableLineWrap)?;
        self.out.queue(cursor::Show)?;
        self.out.queue(terminal::LeaveAlternateScreen)?;
        self.out.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Draw `fb`, diffing against the previous frame.
    pub fn draw(&mut self, fb: &FrameBuffer) -> Result<()> {
        let diff = match self.prev.as_ref() {
            Some(prev) if prev.width() == fb.width() && prev.height() == fb.height() => {
                Some(changed_runs(prev, fb))
            }
            _ => None,
        };

        let runs = match diff {
            Some(runs) => runs,
            None => {
                self.out.queue(terminal::Clear(terminal::ClearType::All))?;
                (0..fb.height())
                    .map(|y| Run {
                        x: 0,
                        y,
                        len: fb.width(),
                    })
                    .collect()
            }
        };
        self.write_runs(fb, &runs)?;

        match self.prev.as_mut() {
            Some(prev) => prev.clone_from(fb),
            None => self.prev = Some(fb.clone()),
        }
        Ok(())
    }

    fn write_runs(&mut self, fb: &FrameBuffer, runs: &[Run]) -> Result<()> {
        let mut style: Option<Style> = None;
        for run in runs {
            self.out.queue(cursor::MoveTo(run.x, run.y))?;
            for dx in 0..run.len {
                let glyph = fb.get(run.x + dx, run.y).unwrap_or_default();
                if style != Some(glyph.style) {
                    self.out.queue(SetForegroundColor(to_color(glyph.style.fg)))?;
                    self.out.queue(SetBackgroundColor(to_color(glyph.style.bg)))?;
                    style = Some(glyph.style);
                }
                self.out.queue(Print(glyph.ch))?;
            }
        }
        self.out.queue(ResetColor)?;
        self.out.flush()?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Horizontal stretch of glyphs that differ between two frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Run {
    x: u16,
    y: u16,
    len: u16,
}

/// Runs of changed glyphs, row by row. Both frames must be the same size.
fn changed_runs(prev: &FrameBuffer, next: &FrameBuffer) -> Vec<Run> {
    let mut runs = Vec::new();
    for y in 0..next.height() {
        let mut start: Option<u16> = None;
        for x in 0..next.width() {
            let dirty = prev.get(x, y) != next.get(x, y);
            match (dirty, start) {
                (true, None) => start = Some(x),
                (false, Some(s)) => {
                    runs.push(Run { x: s, y, len: x - s });
                    start = None;
                }
                _ => {}
            }
        }
        if let Some(s) = start {
            runs.push(Run {
                x: s,
                y,
                len: next.width() - s,
            });
        }
    }
    runs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn changed_runs_coalesce_adjacent_cells() {
        let a = FrameBuffer::new(5, 2);
        let mut b = FrameBuffer::new(5, 2);
        for x in 1..=3 {
            b.put(x, 0, 'X', Style::default());
        }
        b.put(4, 1, 'Y', Style::default());

        assert_eq!(
            changed_runs(&a, &b),
            vec![Run { x: 1, y: 0, len: 3 }, Run { x: 4, y: 1, len: 1 }]
        );
    }

    #[test]
    fn identical_frames_have_no_runs() {
        let a = FrameBuffer::new(4, 4);
        assert!(changed_runs(&a, &a.clone()).is_empty());
    }

    #[test]
    fn to_color_keeps_channels() {
        assert_eq!(
            to_color(Rgb::new(1, 2, 3)),
            Color::Rgb { r: 1, g: 2, b: 3 }
        );
    }
}
