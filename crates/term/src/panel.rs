//! LED matrix emulation.
//!
//! [`MatrixPanel`] is the pixel store a real driver would own: physical
//! (row, col) addressing, one intensity byte per LED. [`PanelView`] draws it
//! into a framebuffer (pure, testable) and [`TerminalPanel`] ties both to a
//! [`TerminalRenderer`] so the whole thing is a [`PixelSink`].

use anyhow::Result;

use crate::engine::{PanelMapping, PixelError, PixelSink};
use crate::fb::{FrameBuffer, Rgb, Style};
use crate::renderer::TerminalRenderer;
use crate::types::{Cell, EMPTY, GRID_HEIGHT, GRID_WIDTH};

/// Physical LED matrix: `rows` along the long axis, `cols` along the short one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixPanel {
    rows: u16,
    cols: u16,
    leds: Vec<Cell>,
}

impl MatrixPanel {
    pub fn new(rows: u16, cols: u16) -> Self {
        Self {
            rows,
            cols,
            leds: vec![EMPTY; rows as usize * cols as usize],
        }
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    fn idx(&self, row: i32, col: i32) -> Option<usize> {
        if row < 0 || col < 0 || row >= self.rows as i32 || col >= self.cols as i32 {
            return None;
        }
        Some(row as usize * self.cols as usize + col as usize)
    }

    /// Intensity at (row, col); None when out of range.
    pub fn get(&self, row: i32, col: i32) -> Option<Cell> {
        self.idx(row, col).map(|i| self.leds[i])
    }

    pub fn lit_count(&self) -> usize {
        self.leds.iter().filter(|&&v| v != EMPTY).count()
    }
}

impl Default for MatrixPanel {
    /// Same footprint as the play field.
    fn default() -> Self {
        Self::new(GRID_HEIGHT as u16, GRID_WIDTH as u16)
    }
}

impl PixelSink for MatrixPanel {
    fn set_pixel(&mut self, row: i32, col: i32, intensity: Cell) -> Result<(), PixelError> {
        let i = self
            .idx(row, col)
            .ok_or(PixelError::OutOfRange { row, col })?;
        self.leds[i] = intensity;
        Ok(())
    }
}

/// Draws a [`MatrixPanel`] upright, centered in the viewport, two terminal
/// columns per LED.
#[derive(Debug, Clone, Copy)]
pub struct PanelView {
    /// Must match the orientation the renderer writes with.
    mapping: PanelMapping,
    lit: Rgb,
    off: Rgb,
}

impl PanelView {
    pub fn new(mapping: PanelMapping) -> Self {
        Self {
            mapping,
            lit: Rgb::new(255, 176, 64),
            off: Rgb::new(28, 24, 20),
        }
    }

    /// Color of an LED at `intensity` (0 = off, 255 = full).
    pub fn led_color(&self, intensity: Cell) -> Rgb {
        if intensity == EMPTY {
            return self.off;
        }
        // Keep dim codes visible on a terminal.
        let t = 0.25 + 0.75 * (intensity as f32 / 255.0);
        self.off.mix(self.lit, t)
    }

    pub fn render_into(&self, panel: &MatrixPanel, fb: &mut FrameBuffer, width: u16, height: u16) {
        fb.reset(width, height);

        // Logical layout: panel cols across, panel rows down (after mapping).
        let across = panel.cols();
        let down = panel.rows();
        let frame_w = across * 2 + 2;
        let frame_h = down + 2;
        let x0 = width.saturating_sub(frame_w) / 2;
        let y0 = height.saturating_sub(frame_h) / 2;

        let border = Style {
            fg: Rgb::new(120, 120, 120),
            bg: Rgb::new(0, 0, 0),
        };
        draw_border(fb, x0, y0, frame_w, frame_h, border);
        let hint = "q quit";
        let hx = x0 + frame_w.saturating_sub(hint.len() as u16) / 2;
        fb.put_str(hx, y0 + frame_h, hint, border);

        for y in 0..down {
            for x in 0..across {
                let (row, col) = self.mapping.to_panel(x as usize, y as usize);
                let intensity = panel.get(row, col).unwrap_or(EMPTY);
                let (ch, fg) = if intensity == EMPTY {
                    ('·', self.off.mix(Rgb::new(90, 90, 90), 0.5))
                } else {
                    ('█', self.led_color(intensity))
                };
                let style = Style {
                    fg,
                    bg: Rgb::new(0, 0, 0),
                };
                let px = x0 + 1 + x * 2;
                let py = y0 + 1 + y;
                fb.put(px, py, ch, style);
                fb.put(px + 1, py, if intensity == EMPTY { ' ' } else { ch }, style);
            }
        }
    }
}

impl Default for PanelView {
    fn default() -> Self {
        Self::new(PanelMapping::default())
    }
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: Style) {
    if w < 2 || h < 2 {
        return;
    }
    fb.put(x, y, '┌', style);
    fb.put(x + w - 1, y, '┐', style);
    fb.put(x, y + h - 1, '└', style);
    fb.put(x + w - 1, y + h - 1, '┘', style);
    for dx in 1..w - 1 {
        fb.put(x + dx, y, '─', style);
        fb.put(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put(x, y + dy, '│', style);
        fb.put(x + w - 1, y + dy, '│', style);
    }
}

/// The emulated panel on a real terminal.
pub struct TerminalPanel {
    panel: MatrixPanel,
    view: PanelView,
    fb: FrameBuffer,
    term: TerminalRenderer,
}

impl TerminalPanel {
    pub fn new(mapping: PanelMapping) -> Self {
        Self {
            panel: MatrixPanel::default(),
            view: PanelView::new(mapping),
            fb: FrameBuffer::new(0, 0),
            term: TerminalRenderer::new(),
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        self.term.enter()
    }

    pub fn exit(&mut self) -> Result<()> {
        self.term.exit()
    }
}

impl PixelSink for TerminalPanel {
    fn set_pixel(&mut self, row: i32, col: i32, intensity: Cell) -> Result<(), PixelError> {
        self.panel.set_pixel(row, col, intensity)
    }

    fn flush(&mut self) -> Result<()> {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        self.view.render_into(&self.panel, &mut self.fb, w, h);
        self.term.draw(&self.fb)
    }
}
