// render.rs — block renderer: time string → multi-row text grid
//
// Each character's bitmap is scaled horizontally (cell repeated `scale` times
// per row) and vertically (row repeated `scale` times), characters are joined
// with exactly one blank column, and `padding` blank columns are added to both
// ends of every row. Filled cells render as FILLED — a multi-byte char with
// display width 1, which is why every consumer of the grid must count columns
// with chars(), never byte offsets.

use crate::font::{self, GLYPH_ROWS, GLYPH_WIDTH};

/// The character written for a filled glyph cell.
pub const FILLED: char = '█';

/// Rendered output: equal-display-width text rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grid {
    pub rows: Vec<String>,
    /// Display width of every row, in terminal cells.
    pub width: usize,
}

impl Grid {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }
}

/// Display width of one scaled character band.
pub fn band_width(scale: u32) -> usize {
    GLYPH_WIDTH * scale as usize
}

/// Total display width of `char_count` bands plus separators plus padding.
pub fn grid_width(char_count: usize, scale: u32, padding: u32) -> usize {
    if char_count == 0 {
        return 0;
    }
    char_count * band_width(scale) + (char_count - 1) + 2 * padding as usize
}

/// Render `text` at integer `scale` with symmetric `padding`.
///
/// `scale` below 1 is clamped to 1 — this is a cosmetic widget, bad
/// configuration degrades instead of failing. An empty `text` yields an
/// empty grid with zero rows.
pub fn render(text: &str, scale: u32, padding: u32) -> Grid {
    let scale = scale.max(1);
    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() {
        return Grid::default();
    }

    let width = grid_width(chars.len(), scale, padding);
    let mut rows = Vec::with_capacity(GLYPH_ROWS * scale as usize);

    for glyph_row in 0..GLYPH_ROWS {
        let mut line = String::with_capacity(width * FILLED.len_utf8());
        for _ in 0..padding {
            line.push(' ');
        }
        for (i, &ch) in chars.iter().enumerate() {
            if i > 0 {
                line.push(' ');
            }
            let glyph = font::lookup(ch);
            for col in 0..GLYPH_WIDTH {
                let cell = if glyph.filled(glyph_row, col) { FILLED } else { ' ' };
                for _ in 0..scale {
                    line.push(cell);
                }
            }
        }
        for _ in 0..padding {
            line.push(' ');
        }
        // Vertical scaling: repeat the finished row.
        for _ in 0..scale {
            rows.push(line.clone());
        }
    }

    Grid { rows, width }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
