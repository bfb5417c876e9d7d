//! Terminal geometry.

use alacritty_terminal::grid::Dimensions;

/// Terminal dimensions in rows and columns.
///
/// Implements `Dimensions` so it can size an alacritty `Term` directly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TermSize {
    pub cols: u16,
    pub rows: u16,
}

impl TermSize {
    pub const MIN: TermSize = TermSize { cols: 2, rows: 1 };

    /// Grid that fits `width` x `height` pixels with cells of `cell_width` x
    /// `cell_height`, never smaller than [`TermSize::MIN`].
    pub fn from_pixels(width: f32, height: f32, cell_width: f32, cell_height: f32) -> Self {
        if cell_width <= 0.0 || cell_height <= 0.0 {
            return Self::MIN;
        }
        let cols = (width / cell_width).floor().clamp(0.0, u16::MAX as f32) as u16;
        let rows = (height / cell_height).floor().clamp(0.0, u16::MAX as f32) as u16;
        Self {
            cols: cols.max(Self::MIN.cols),
            rows: rows.max(Self::MIN.rows),
        }
    }
}

impl Default for TermSize {
    fn default() -> Self {
        Self { cols: 80, rows: 24 }
    }
}

impl Dimensions for TermSize {
    fn total_lines(&self) -> usize {
        self.rows as usize
    }

    fn screen_lines(&self) -> usize {
        self.rows as usize
    }

    fn columns(&self) -> usize {
        self.cols as usize
    }
}
