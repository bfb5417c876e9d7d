//! Per-frame snapshot of the terminal grid.
//!
//! Built under the term lock in prepaint, then painted without it.

use crate::colors::{apply_dim, bright_variant, color_to_hsla, Palette};
use alacritty_terminal::event::EventListener;
use alacritty_terminal::grid::Dimensions;
use alacritty_terminal::term::cell::Flags as CellFlags;
use alacritty_terminal::term::Term;
use alacritty_terminal::vte::ansi::CursorShape;
use gpui::{Hsla, SharedString};
use settings::constants::terminal::DEFAULT_FONT_SIZE;
use terminal::TermSize;

/// Display state shared between the view and its canvas callbacks.
#[derive(Clone, Debug)]
pub struct DisplayState {
    pub size: TermSize,
    /// Cell (width, height) from font metrics.
    pub cell_dims: (f32, f32),
    pub font_size: f32,
    /// Font size bits and family the cached `cell_dims` were measured with.
    pub cached_font_key: Option<(u32, SharedString)>,
}

impl Default for DisplayState {
    fn default() -> Self {
        Self {
            size: TermSize::default(),
            cell_dims: (8.4, 17.0),
            font_size: DEFAULT_FONT_SIZE,
            cached_font_key: None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct RenderCell {
    pub row: usize,
    pub col: usize,
    pub c: char,
    pub fg: Hsla,
    pub flags: CellFlags,
}

/// A run of non-default background on one row, `col_start..col_end`.
#[derive(Clone, Debug, PartialEq)]
pub struct BgRegion {
    pub row: usize,
    pub col_start: usize,
    pub col_end: usize,
    pub color: Hsla,
}

#[derive(Clone, Copy, Debug)]
pub struct CursorInfo {
    pub row: usize,
    pub col: usize,
    pub shape: CursorShape,
    pub color: Hsla,
}

pub struct RenderData {
    /// Non-blank cells only.
    pub cells: Vec<RenderCell>,
    pub bg_regions: Vec<BgRegion>,
    pub cursor: Option<CursorInfo>,
}

pub fn build_render_data<L: EventListener>(term: &Term<L>, palette: &Palette) -> RenderData {
    let content = term.renderable_content();
    let term_colors = content.colors;
    let default_bg = palette.background;

    let term_cols = term.columns();
    let term_rows = term.screen_lines();

    let mut cells: Vec<RenderCell> = Vec::with_capacity((term_rows * term_cols) / 3);
    let mut bg_regions: Vec<BgRegion> = Vec::with_capacity(term_rows * 2);
    let mut current_bg: Option<BgRegion> = None;

    let display_offset = content.display_offset as i32;
    let cursor_row = content.cursor.point.line.0 + display_offset;
    let cursor_col = content.cursor.point.column.0;
    let cursor = (cursor_row >= 0
        && (cursor_row as usize) < term_rows
        && cursor_col < term_cols
        && content.cursor.shape != CursorShape::Hidden)
        .then(|| CursorInfo {
            row: cursor_row as usize,
            col: cursor_col,
            shape: content.cursor.shape,
            color: palette.cursor,
        });

    for cell in content.display_iter {
        let row = (cell.point.line.0 + display_offset) as usize;
        let col = cell.point.column.0;
        if row >= term_rows || col >= term_cols {
            continue;
        }

        let flags = cell.flags;
        if flags.contains(CellFlags::WIDE_CHAR_SPACER) {
            continue;
        }

        let mut fg = if flags.contains(CellFlags::BOLD) {
            bright_variant(cell.fg, term_colors, palette)
        } else {
            color_to_hsla(cell.fg, term_colors, palette)
        };
        let mut bg = color_to_hsla(cell.bg, term_colors, palette);

        if flags.contains(CellFlags::DIM) {
            fg = apply_dim(fg);
        }
        if flags.contains(CellFlags::INVERSE) {
            std::mem::swap(&mut fg, &mut bg);
        }
        if flags.contains(CellFlags::HIDDEN) {
            fg = bg;
        }

        // Merge adjacent same-colored backgrounds as we go
        if bg != default_bg {
            let extends = matches!(
                &current_bg,
                Some(region) if region.row == row && region.col_end == col && region.color == bg
            );
            if extends {
                if let Some(region) = current_bg.as_mut() {
                    region.col_end = col + 1;
                }
            } else if let Some(done) = current_bg.replace(BgRegion {
                row,
                col_start: col,
                col_end: col + 1,
                color: bg,
            }) {
                bg_regions.push(done);
            }
        } else if let Some(done) = current_bg.take() {
            bg_regions.push(done);
        }

        if cell.c != ' ' && cell.c != '\0' {
            cells.push(RenderCell {
                row,
                col,
                c: cell.c,
                fg,
                flags,
            });
        }
    }

    if let Some(done) = current_bg {
        bg_regions.push(done);
    }

    RenderData {
        cells,
        bg_regions,
        cursor,
    }
}
