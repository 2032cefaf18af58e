//! Character-cell frame that widgets paint into before it is flushed to the terminal.

use crate::graphics::{Canvas, Rgb};

/// Upper half block: foreground paints the top pixel, background the bottom one
pub const HALF_BLOCK: char = '\u{2580}';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Rgb,
    pub bg: Rgb,
    pub bold: bool,
}

#[derive(Debug, Clone)]
pub struct Surface {
    cols: u16,
    rows: u16,
    cells: Vec<Cell>,
}

impl Surface {
    pub fn new(cols: u16, rows: u16, fg: Rgb, bg: Rgb) -> Self {
        let blank = Cell {
            ch: ' ',
            fg,
            bg,
            bold: false,
        };
        Surface {
            cols,
            rows,
            cells: vec![blank; cols as usize * rows as usize],
        }
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn cell(&self, col: u16, row: u16) -> Option<&Cell> {
        if col < self.cols && row < self.rows {
            self.cells.get(row as usize * self.cols as usize + col as usize)
        } else {
            None
        }
    }

    fn cell_mut(&mut self, col: i32, row: i32) -> Option<&mut Cell> {
        if col < 0 || row < 0 || col >= self.cols as i32 || row >= self.rows as i32 {
            return None;
        }
        self.cells
            .get_mut(row as usize * self.cols as usize + col as usize)
    }

    pub fn rows_iter(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.cols.max(1) as usize)
    }

    /// Fills one row with blanks of the given colours
    pub fn fill_row(&mut self, row: u16, fg: Rgb, bg: Rgb) {
        for col in 0..self.cols {
            if let Some(cell) = self.cell_mut(col as i32, row as i32) {
                *cell = Cell {
                    ch: ' ',
                    fg,
                    bg,
                    bold: false,
                };
            }
        }
    }

    /// Writes text starting at (col, row), keeping each cell's background.
    /// Characters that fall outside the surface are dropped.
    pub fn put_str(&mut self, col: i32, row: i32, text: &str, fg: Rgb, bold: bool) {
        for (i, ch) in text.chars().enumerate() {
            if let Some(cell) = self.cell_mut(col + i as i32, row) {
                cell.ch = ch;
                cell.fg = fg;
                cell.bold = bold;
            }
        }
    }

    /// Writes text centred on `center_col`
    pub fn put_centered(&mut self, center_col: i32, row: i32, text: &str, fg: Rgb, bold: bool) {
        let half = text.chars().count() as i32 / 2;
        self.put_str(center_col - half, row, text, fg, bold);
    }

    /// Copies a canvas into the cells starting at `top_row`, two pixel rows per cell
    pub fn blit(&mut self, canvas: &Canvas, top_row: u16) {
        let cell_rows = canvas.height().div_ceil(2);
        for cell_row in 0..cell_rows {
            for col in 0..canvas.width() {
                let upper = canvas.pixel(col, cell_row * 2);
                let lower = canvas.pixel(col, cell_row * 2 + 1).or(upper);
                if let (Some(upper), Some(lower), Some(cell)) = (
                    upper,
                    lower,
                    self.cell_mut(col as i32, top_row as i32 + cell_row as i32),
                ) {
                    *cell = Cell {
                        ch: HALF_BLOCK,
                        fg: upper,
                        bg: lower,
                        bold: false,
                    };
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: Rgb = Rgb::new(1, 2, 3);
    const B: Rgb = Rgb::new(200, 100, 50);

    #[test]
    fn blit_pairs_pixel_rows() {
        let mut canvas = Canvas::new(2, 4, A).unwrap();
        canvas.blend_pixel(1, 3, B, 1.0);
        let mut surface = Surface::new(2, 3, A, A);
        surface.blit(&canvas, 1);

        let cell = surface.cell(1, 2).unwrap();
        assert_eq!(cell.ch, HALF_BLOCK);
        assert_eq!(cell.fg, A);
        assert_eq!(cell.bg, B);
        assert_eq!(surface.cell(0, 0).unwrap().ch, ' ');
    }

    #[test]
    fn text_keeps_background_and_clips() {
        let mut surface = Surface::new(4, 1, A, B);
        surface.put_str(2, 0, "abc", A, true);
        assert_eq!(surface.cell(2, 0).unwrap().ch, 'a');
        assert_eq!(surface.cell(3, 0).unwrap().bg, B);
        surface.put_str(-1, 0, "xy", A, false);
        assert_eq!(surface.cell(0, 0).unwrap().ch, 'y');
    }

    #[test]
    fn centred_text() {
        let mut surface = Surface::new(9, 1, A, B);
        surface.put_centered(4, 0, "abc", A, false);
        assert_eq!(surface.cell(3, 0).unwrap().ch, 'a');
        assert_eq!(surface.cell(5, 0).unwrap().ch, 'c');
    }
}
