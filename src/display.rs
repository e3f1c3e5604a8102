//! Terminal rendering: all terminal I/O lives here.
//!
//! `TerminalSurface` rasterises the game's abstract draw primitives into a
//! grid of character cells scaled to fit the terminal, then `flush` writes
//! the grid out with crossterm.  No game logic is performed here.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    QueueableCommand,
};

use alien_invasion::collision::Rect;
use alien_invasion::config::Viewport;
use alien_invasion::entities::{Rgb, BLACK, WHITE};
use alien_invasion::render::{Anchor, DrawCmd, Surface};

#[derive(Clone, Copy, Debug, PartialEq)]
struct Cell {
    ch: char,
    fg: Rgb,
    bg: Rgb,
}

const BLANK: Cell = Cell {
    ch: ' ',
    fg: WHITE,
    bg: BLACK,
};

fn to_color(c: Rgb) -> Color {
    Color::Rgb {
        r: c.0,
        g: c.1,
        b: c.2,
    }
}

fn blend(base: Rgb, over: Rgb, alpha: u8) -> Rgb {
    let mix = |a: u8, b: u8| -> u8 {
        let a = a as u32 * (255 - alpha as u32);
        let b = b as u32 * alpha as u32;
        ((a + b) / 255) as u8
    };
    Rgb(mix(base.0, over.0), mix(base.1, over.1), mix(base.2, over.2))
}

pub struct TerminalSurface {
    cols: u16,
    rows: u16,
    viewport: Viewport,
    cells: Vec<Cell>,
}

impl TerminalSurface {
    pub fn new(cols: u16, rows: u16, viewport: Viewport) -> Self {
        TerminalSurface {
            cols,
            rows,
            viewport,
            cells: vec![BLANK; cols as usize * rows as usize],
        }
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        *self = TerminalSurface::new(cols, rows, self.viewport);
    }

    // ── Coordinate mapping ───────────────────────────────────────────────────

    fn scale(&self) -> (f32, f32) {
        (
            self.cols as f32 / self.viewport.width,
            self.rows as f32 / self.viewport.height,
        )
    }

    /// Game-unit point → cell index (may be off-grid).
    fn cell_at(&self, x: f32, y: f32) -> (i32, i32) {
        let (sx, sy) = self.scale();
        ((x * sx).floor() as i32, (y * sy).floor() as i32)
    }

    /// Centre of a cell, in game units.
    fn cell_center(&self, col: i32, row: i32) -> (f32, f32) {
        let (sx, sy) = self.scale();
        ((col as f32 + 0.5) / sx, (row as f32 + 0.5) / sy)
    }

    /// Inclusive cell span covered by a rectangle; never empty.
    fn span(&self, rect: &Rect) -> (i32, i32, i32, i32) {
        let (c0, r0) = self.cell_at(rect.x, rect.y);
        let (sx, sy) = self.scale();
        let c1 = (((rect.x + rect.w) * sx).ceil() as i32 - 1).max(c0);
        let r1 = (((rect.y + rect.h) * sy).ceil() as i32 - 1).max(r0);
        (c0, r0, c1, r1)
    }

    fn index(&self, col: i32, row: i32) -> Option<usize> {
        if col < 0 || row < 0 || col >= self.cols as i32 || row >= self.rows as i32 {
            return None;
        }
        Some(row as usize * self.cols as usize + col as usize)
    }

    fn put(&mut self, col: i32, row: i32, ch: char, fg: Rgb) {
        if let Some(i) = self.index(col, row) {
            self.cells[i].ch = ch;
            self.cells[i].fg = fg;
        }
    }

    #[cfg(test)]
    fn char_at(&self, col: i32, row: i32) -> Option<char> {
        self.index(col, row).map(|i| self.cells[i].ch)
    }

    // ── Primitives ───────────────────────────────────────────────────────────

    fn fill_rect(&mut self, rect: &Rect, color: Rgb) {
        let (c0, r0, c1, r1) = self.span(rect);
        for row in r0..=r1 {
            for col in c0..=c1 {
                self.put(col, row, '█', color);
            }
        }
    }

    /// Box-drawing outline; skipped when the box is too small to have an inside.
    fn stroke_rect(&mut self, rect: &Rect, color: Rgb) {
        let (c0, r0, c1, r1) = self.span(rect);
        if c1 - c0 < 2 || r1 - r0 < 2 {
            return;
        }
        for col in c0 + 1..c1 {
            self.put(col, r0, '─', color);
            self.put(col, r1, '─', color);
        }
        for row in r0 + 1..r1 {
            self.put(c0, row, '│', color);
            self.put(c1, row, '│', color);
        }
        self.put(c0, r0, '┌', color);
        self.put(c1, r0, '┐', color);
        self.put(c0, r1, '└', color);
        self.put(c1, r1, '┘', color);
    }

    fn fill_polygon(&mut self, points: &[(f32, f32)], color: Rgb) {
        if points.is_empty() {
            return;
        }
        let (min_x, max_x) = points
            .iter()
            .fold((f32::MAX, f32::MIN), |(lo, hi), p| (lo.min(p.0), hi.max(p.0)));
        let (min_y, max_y) = points
            .iter()
            .fold((f32::MAX, f32::MIN), |(lo, hi), p| (lo.min(p.1), hi.max(p.1)));
        let (c0, r0, c1, r1) = self.span(&Rect::new(min_x, min_y, max_x - min_x, max_y - min_y));

        let mut plotted = false;
        for row in r0..=r1 {
            for col in c0..=c1 {
                if point_in_polygon(self.cell_center(col, row), points) {
                    self.put(col, row, '█', color);
                    plotted = true;
                }
            }
        }
        if !plotted {
            let n = points.len() as f32;
            let cx = points.iter().map(|p| p.0).sum::<f32>() / n;
            let cy = points.iter().map(|p| p.1).sum::<f32>() / n;
            let (col, row) = self.cell_at(cx, cy);
            self.put(col, row, '▲', color);
        }
    }

    fn circle(&mut self, center: (f32, f32), radius: f32, color: Rgb, ring: Option<f32>) {
        let (sx, sy) = self.scale();
        let cell_size = (1.0 / sx).max(1.0 / sy);
        let reach = radius + cell_size;
        let (c0, r0, c1, r1) = self.span(&Rect::new(
            center.0 - reach,
            center.1 - reach,
            reach * 2.0,
            reach * 2.0,
        ));

        let mut plotted = false;
        for row in r0..=r1 {
            for col in c0..=c1 {
                let (x, y) = self.cell_center(col, row);
                let d = ((x - center.0).powi(2) + (y - center.1).powi(2)).sqrt();
                let hit = match ring {
                    Some(width) => (d - radius).abs() <= width.max(cell_size / 2.0),
                    None => d <= radius,
                };
                if hit {
                    let ch = if ring.is_some() { '·' } else { '●' };
                    self.put(col, row, ch, color);
                    plotted = true;
                }
            }
        }
        if !plotted && ring.is_none() {
            let (col, row) = self.cell_at(center.0, center.1);
            let ch = if radius <= 1.0 { '.' } else { '•' };
            self.put(col, row, ch, color);
        }
    }

    fn line(&mut self, from: (f32, f32), to: (f32, f32), color: Rgb) {
        let (c0, r0) = self.cell_at(from.0, from.1);
        let (c1, r1) = self.cell_at(to.0, to.1);
        let (dc, dr) = (c1 - c0, r1 - r0);
        let ch = match (dc.signum(), dr.signum()) {
            (0, _) => '│',
            (_, 0) => '─',
            (a, b) if a == b => '\\',
            _ => '/',
        };
        let steps = dc.abs().max(dr.abs());
        for i in 0..=steps {
            let t = if steps == 0 { 0.0 } else { i as f32 / steps as f32 };
            let col = c0 + (dc as f32 * t).round() as i32;
            let row = r0 + (dr as f32 * t).round() as i32;
            self.put(col, row, ch, color);
        }
    }

    fn text(&mut self, pos: (f32, f32), text: &str, color: Rgb, anchor: Anchor) {
        let (mut col, row) = self.cell_at(pos.0, pos.1);
        if anchor == Anchor::Center {
            col -= text.chars().count() as i32 / 2;
        }
        for (i, ch) in text.chars().enumerate() {
            self.put(col + i as i32, row, ch, color);
        }
    }

    fn overlay(&mut self, color: Rgb, alpha: u8) {
        for cell in &mut self.cells {
            cell.fg = blend(cell.fg, color, alpha);
            cell.bg = blend(cell.bg, color, alpha);
        }
    }

    // ── Output ───────────────────────────────────────────────────────────────

    /// Write the whole grid, only switching colours when they change.
    pub fn flush<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        let mut current: Option<(Rgb, Rgb)> = None;
        for row in 0..self.rows {
            out.queue(cursor::MoveTo(0, row))?;
            let start = row as usize * self.cols as usize;
            for cell in &self.cells[start..start + self.cols as usize] {
                if current != Some((cell.fg, cell.bg)) {
                    out.queue(style::SetForegroundColor(to_color(cell.fg)))?;
                    out.queue(style::SetBackgroundColor(to_color(cell.bg)))?;
                    current = Some((cell.fg, cell.bg));
                }
                out.queue(Print(cell.ch))?;
            }
        }
        out.queue(style::ResetColor)?;
        out.flush()?;
        Ok(())
    }
}

impl Surface for TerminalSurface {
    fn draw(&mut self, cmd: DrawCmd) {
        match cmd {
            DrawCmd::Clear(bg) => {
                self.cells.fill(Cell { bg, ..BLANK });
            }
            DrawCmd::FillRect { rect, color } => self.fill_rect(&rect, color),
            DrawCmd::StrokeRect { rect, color, .. } => self.stroke_rect(&rect, color),
            DrawCmd::FillPolygon { points, color } => self.fill_polygon(&points, color),
            DrawCmd::FillCircle {
                center,
                radius,
                color,
            } => self.circle(center, radius, color, None),
            DrawCmd::StrokeCircle {
                center,
                radius,
                color,
                thickness,
            } => self.circle(center, radius, color, Some(thickness)),
            DrawCmd::Line { from, to, color, .. } => self.line(from, to, color),
            DrawCmd::Text {
                pos,
                text,
                color,
                anchor,
                ..
            } => self.text(pos, &text, color, anchor),
            DrawCmd::Overlay { color, alpha } => self.overlay(color, alpha),
        }
    }
}

/// Even-odd crossing test.
fn point_in_polygon(p: (f32, f32), poly: &[(f32, f32)]) -> bool {
    let mut inside = false;
    let mut j = poly.len() - 1;
    for i in 0..poly.len() {
        let (xi, yi) = poly[i];
        let (xj, yj) = poly[j];
        if (yi > p.1) != (yj > p.1) && p.0 < (xj - xi) * (p.1 - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}
