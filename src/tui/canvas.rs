//! Terminal drawing surface for the rain layer.
//!
//! One backing "pixel" is one terminal cell. Each cell remembers the last
//! glyph drawn into it and an intensity that the per-step overlay decays.

use ratatui::{buffer::Buffer, layout::Rect, style::Style, widgets::Widget};
use tracing::debug;

use crate::rain::{Glyph, Surface, Viewport};
use crate::theme::Palette;

/// Below this intensity a cell is treated as fully faded.
const MIN_INTENSITY: f32 = 0.01;

/// Cell edge of the rain grid in a terminal host.
pub const TERMINAL_CELL_SIZE: u32 = 1;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CanvasCell {
    pub glyph: Option<Glyph>,
    pub intensity: f32,
}

/// Grid of faded glyph cells implementing [`Surface`].
#[derive(Debug, Clone)]
pub struct TerminalCanvas {
    width: u32,
    height: u32,
    pixel_ratio: f32,
    cells: Vec<CanvasCell>,
}

impl TerminalCanvas {
    /// Acquire a canvas for `viewport`. A zero-area viewport gives an empty
    /// grid that grows on the next resize.
    pub fn acquire(viewport: Viewport) -> Self {
        if viewport.is_empty() {
            debug!(
                width = viewport.width,
                height = viewport.height,
                "Rain canvas starts empty"
            );
        }
        let (width, height) = viewport.backing_size();
        let mut canvas = Self {
            width: 0,
            height: 0,
            pixel_ratio: viewport.pixel_ratio,
            cells: Vec::new(),
        };
        canvas.resize(width, height, viewport.pixel_ratio);
        canvas
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn cell(&self, x: u32, y: u32) -> Option<&CanvasCell> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells.get((y * self.width + x) as usize)
    }

    /// Number of cells still showing a glyph.
    pub fn lit_cells(&self) -> usize {
        self.cells.iter().filter(|c| c.glyph.is_some()).count()
    }
}

impl Surface for TerminalCanvas {
    fn resize(&mut self, backing_width: u32, backing_height: u32, pixel_ratio: f32) {
        self.width = backing_width;
        self.height = backing_height;
        self.pixel_ratio = pixel_ratio;
        self.cells.clear();
        self.cells
            .resize((backing_width as usize) * (backing_height as usize), CanvasCell::default());
    }

    fn backing_height(&self) -> u32 {
        self.height
    }

    fn fade(&mut self, alpha: f32) {
        let keep = (1.0 - alpha).clamp(0.0, 1.0);
        for cell in &mut self.cells {
            if cell.glyph.is_none() {
                continue;
            }
            cell.intensity *= keep;
            if cell.intensity < MIN_INTENSITY {
                *cell = CanvasCell::default();
            }
        }
    }

    fn draw_glyph(&mut self, glyph: &Glyph, x: u32, y: u32) {
        let dx = (x as f32 * self.pixel_ratio) as u32;
        let dy = (y as f32 * self.pixel_ratio) as u32;
        if dx >= self.width || dy >= self.height {
            return;
        }
        let idx = (dy * self.width + dx) as usize;
        if let Some(cell) = self.cells.get_mut(idx) {
            *cell = CanvasCell {
                glyph: Some(*glyph),
                intensity: 1.0,
            };
        }
    }
}

/// Paints the page background and composites the rain canvas over it.
pub struct RainBackground<'a> {
    pub canvas: Option<&'a TerminalCanvas>,
    pub palette: Palette,
}

impl Widget for RainBackground<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let background = self.palette.background;
        buf.set_style(area, Style::default().bg(background.into()));

        let Some(canvas) = self.canvas else {
            return;
        };

        for y in 0..area.height {
            for x in 0..area.width {
                let Some(cell) = canvas.cell(u32::from(x), u32::from(y)) else {
                    continue;
                };
                let Some(glyph) = cell.glyph else {
                    continue;
                };
                let weight = cell.intensity * self.palette.layer_opacity;
                let fg = background.mix(glyph.color, weight);
                buf[(area.x + x, area.y + y)]
                    .set_symbol(glyph.symbol)
                    .set_fg(fg.into());
            }
        }
    }
}
