/// ASCII wireframe rasterizer for terminal rendering
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use std::io::Write;
use wf3d_core::Frame;

/// Draws the visible edges of a frame into a character buffer
pub struct WireframeRenderer {
    width: usize,
    height: usize,
    units_per_column: f64,
    units_per_row: f64,
    char_buffer: Vec<char>,
}

impl WireframeRenderer {
    pub fn new(width: usize, height: usize, units_per_column: f64, units_per_row: f64) -> Self {
        Self {
            width,
            height,
            units_per_column,
            units_per_row,
            char_buffer: vec![' '; width * height],
        }
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.char_buffer = vec![' '; width * height];
    }

    pub fn clear(&mut self) {
        self.char_buffer.fill(' ');
    }

    /// Canvas size in model units
    pub fn canvas_units(&self) -> (f64, f64) {
        (
            self.width as f64 * self.units_per_column,
            self.height as f64 * self.units_per_row,
        )
    }

    /// Character at column `x`, row `y`
    pub fn cell(&self, x: usize, y: usize) -> Option<char> {
        if x < self.width && y < self.height {
            Some(self.char_buffer[y * self.width + x])
        } else {
            None
        }
    }

    pub fn render_frame(&mut self, frame: &Frame) {
        let (width, height) = self.canvas_units();
        for (a, b) in frame.visible_edges() {
            let (Some(from), Some(to)) = (
                frame.to_screen(a, width, height),
                frame.to_screen(b, width, height),
            ) else {
                continue;
            };
            self.draw_line(self.to_cell(from), self.to_cell(to));
        }
    }

    fn to_cell(&self, (x, y): (f64, f64)) -> (f64, f64) {
        (x / self.units_per_column, y / self.units_per_row)
    }

    /// DDA line between two cell positions, clipped to the buffer
    fn draw_line(&mut self, from: (f64, f64), to: (f64, f64)) {
        let ch = stroke(to.0 - from.0, to.1 - from.1);
        let Some((from, to)) = self.clip(from, to) else {
            return;
        };

        let dx = to.0 - from.0;
        let dy = to.1 - from.1;
        let steps = (dx.abs().max(dy.abs()).ceil() as usize).max(1);

        for step in 0..=steps {
            let t = step as f64 / steps as f64;
            self.plot((from.0 + dx * t).round(), (from.1 + dy * t).round(), ch);
        }
    }

    /// Liang-Barsky clip against the cell rectangle
    fn clip(&self, from: (f64, f64), to: (f64, f64)) -> Option<((f64, f64), (f64, f64))> {
        if ![from.0, from.1, to.0, to.1].iter().all(|v| v.is_finite()) {
            return None;
        }

        let (min_x, max_x) = (-0.5, self.width as f64 - 0.5);
        let (min_y, max_y) = (-0.5, self.height as f64 - 0.5);
        let dx = to.0 - from.0;
        let dy = to.1 - from.1;

        let mut t0: f64 = 0.0;
        let mut t1: f64 = 1.0;
        for (p, q) in [
            (-dx, from.0 - min_x),
            (dx, max_x - from.0),
            (-dy, from.1 - min_y),
            (dy, max_y - from.1),
        ] {
            if p == 0.0 {
                if q < 0.0 {
                    return None;
                }
                continue;
            }
            let r = q / p;
            if p < 0.0 {
                t0 = t0.max(r);
            } else {
                t1 = t1.min(r);
            }
            if t0 > t1 {
                return None;
            }
        }

        Some((
            (from.0 + dx * t0, from.1 + dy * t0),
            (from.0 + dx * t1, from.1 + dy * t1),
        ))
    }

    fn plot(&mut self, x: f64, y: f64, ch: char) {
        if x < 0.0 || y < 0.0 || x >= self.width as f64 || y >= self.height as f64 {
            return;
        }
        self.char_buffer[y as usize * self.width + x as usize] = ch;
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for y in 0..self.height {
            for x in 0..self.width {
                let c = self.char_buffer[y * self.width + x];

                let color = match c {
                    '-' | '|' => Color::Cyan,
                    '/' | '\\' => Color::White,
                    _ => Color::DarkGrey,
                };

                writer.queue(SetForegroundColor(color))?;
                writer.queue(Print(c))?;
            }
            if y + 1 < self.height {
                writer.queue(Print("\r\n"))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Character that best follows a line with direction `(dx, dy)`; rows grow downward
fn stroke(dx: f64, dy: f64) -> char {
    if dx.abs() > 2.0 * dy.abs() {
        '-'
    } else if dy.abs() > 2.0 * dx.abs() {
        '|'
    } else if (dx > 0.0) == (dy > 0.0) {
        '\\'
    } else {
        '/'
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wf3d_core::{Matrix, Triangle, Vector};

    fn frame(nodes: &[[f64; 4]], visible: bool) -> Frame {
        Frame {
            nodes: Matrix::from_rows(nodes),
            triangles: vec![Triangle::new(0, 1, 2)],
            scalars: Vector::new(vec![1.0]),
            visible: vec![visible],
        }
    }

    #[test]
    fn test_stroke_characters() {
        assert_eq!(stroke(10.0, 0.0), '-');
        assert_eq!(stroke(0.0, -5.0), '|');
        assert_eq!(stroke(3.0, 3.0), '\\');
        assert_eq!(stroke(-3.0, 3.0), '/');
    }

    #[test]
    fn test_triangle_outline() {
        // 20x10 cells of 1 unit: the origin lands on cell (10, 5)
        let mut renderer = WireframeRenderer::new(20, 10, 1.0, 1.0);
        renderer.render_frame(&frame(
            &[[0.0, 0.0, 0.0, 1.0], [6.0, 0.0, 0.0, 1.0], [0.0, 3.0, 0.0, 1.0]],
            true,
        ));

        assert_eq!(renderer.cell(13, 5), Some('-'));
        assert_eq!(renderer.cell(10, 7), Some('|'));
        assert_eq!(renderer.cell(12, 5), Some('-'));
        assert_eq!(renderer.cell(0, 0), Some(' '));
    }

    #[test]
    fn test_hidden_triangle_draws_nothing() {
        let mut renderer = WireframeRenderer::new(20, 10, 1.0, 1.0);
        renderer.render_frame(&frame(
            &[[0.0, 0.0, 0.0, 1.0], [6.0, 0.0, 0.0, 1.0], [0.0, 3.0, 0.0, 1.0]],
            false,
        ));
        assert!(renderer.char_buffer.iter().all(|c| *c == ' '));
    }

    #[test]
    fn test_offscreen_and_non_finite_lines_are_clipped() {
        let mut renderer = WireframeRenderer::new(8, 4, 1.0, 1.0);
        renderer.render_frame(&frame(
            &[
                [-1e12, 0.0, 0.0, 1.0],
                [1e12, 0.0, 0.0, 1.0],
                [f64::NAN, 0.0, 0.0, 1.0],
            ],
            true,
        ));
        // the long horizontal line still crosses the middle row
        assert_eq!(renderer.cell(4, 2), Some('-'));
        assert_eq!(renderer.cell(4, 0), Some(' '));
    }

    #[test]
    fn test_units_scale_to_cells() {
        let mut renderer = WireframeRenderer::new(40, 20, 4.0, 8.0);
        assert_eq!(renderer.canvas_units(), (160.0, 160.0));
        renderer.render_frame(&frame(
            &[[0.0, 0.0, 0.0, 1.0], [0.0, 80.0, 0.0, 1.0], [0.0, 80.0, 0.0, 1.0]],
            true,
        ));
        // 80 units down is 10 rows below the centre row
        assert_eq!(renderer.cell(20, 10), Some('|'));
        assert_eq!(renderer.cell(20, 19), Some('|'));
    }

    #[test]
    fn test_resize_clears_buffer() {
        let mut renderer = WireframeRenderer::new(4, 4, 1.0, 1.0);
        renderer.plot(1.0, 1.0, '-');
        renderer.resize(6, 3);
        assert_eq!(renderer.cell(1, 1), Some(' '));
        assert_eq!(renderer.cell(5, 2), Some(' '));
        assert_eq!(renderer.cell(6, 0), None);
    }
}
