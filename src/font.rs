// font.rs — block-digit glyph bitmaps
//
// Every glyph is 7 cells wide and 5 rows tall, stored as one u8 bitmask per
// row with bit 6 = leftmost column. Uniform width is load-bearing: the cell
// colour mapper derives slot bands as GLYPH_WIDTH * scale, so a variable
// width font would break the column math downstream.

/// Rows per glyph. Identical for every character in the alphabet.
pub const GLYPH_ROWS: usize = 5;
/// Display columns per glyph.
pub const GLYPH_WIDTH: usize = 7;

/// One character's bitmap: a row bitmask per text row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub rows: [u8; GLYPH_ROWS],
}

impl Glyph {
    /// Whether the cell at (row, col) is filled. Out-of-range is empty.
    pub fn filled(&self, row: usize, col: usize) -> bool {
        if row >= GLYPH_ROWS || col >= GLYPH_WIDTH {
            return false;
        }
        self.rows[row] & (1 << (GLYPH_WIDTH - 1 - col)) != 0
    }
}

// ── glyph table ───────────────────────────────────────────────────────────────

const BLANK: Glyph = Glyph { rows: [0; GLYPH_ROWS] };

const DIGITS: [Glyph; 10] = [
    // 0
    Glyph { rows: [0b0111110, 0b1000001, 0b1000001, 0b1000001, 0b0111110] },
    // 1
    Glyph { rows: [0b0001000, 0b0011000, 0b0001000, 0b0001000, 0b0111110] },
    // 2
    Glyph { rows: [0b0111110, 0b0000001, 0b0111110, 0b1000000, 0b0111110] },
    // 3
    Glyph { rows: [0b0111110, 0b0000001, 0b0011110, 0b0000001, 0b0111110] },
    // 4
    Glyph { rows: [0b1000001, 0b1000001, 0b0111111, 0b0000001, 0b0000001] },
    // 5
    Glyph { rows: [0b0111111, 0b1000000, 0b0111110, 0b0000001, 0b0111110] },
    // 6
    Glyph { rows: [0b0111110, 0b1000000, 0b1111110, 0b1000001, 0b0111110] },
    // 7
    Glyph { rows: [0b0111111, 0b0000001, 0b0000010, 0b0000100, 0b0001000] },
    // 8
    Glyph { rows: [0b0111110, 0b1000001, 0b0111110, 0b1000001, 0b0111110] },
    // 9
    Glyph { rows: [0b0111110, 0b1000001, 0b0111111, 0b0000001, 0b0111110] },
];

const COLON: Glyph = Glyph { rows: [0b0000000, 0b0001100, 0b0000000, 0b0001100, 0b0000000] };

/// Bitmap lookup. Total over all of char: anything outside the supported
/// alphabet (digits, `:`, space) maps to the blank glyph of the same size.
pub fn lookup(ch: char) -> &'static Glyph {
    match ch {
        '0'..='9' => &DIGITS[ch as usize - '0' as usize],
        ':' => &COLON,
        _ => &BLANK,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_supported_char_has_fixed_rows() {
        for ch in "0123456789: ".chars() {
            let g = lookup(ch);
            assert_eq!(g.rows.len(), GLYPH_ROWS);
            for row in g.rows {
                // No bit outside the 7-column window.
                assert_eq!(row & !0b1111111, 0, "glyph '{ch}' overflows its width");
            }
        }
    }

    #[test]
    fn unsupported_chars_fall_back_to_blank() {
        for ch in ['x', '€', '-', '\n'] {
            assert_eq!(lookup(ch), &BLANK);
        }
    }

    #[test]
    fn digits_are_nonempty_and_distinct() {
        for d in 0..10u8 {
            let g = lookup((b'0' + d) as char);
            assert!(g.rows.iter().any(|&r| r != 0), "digit {d} renders empty");
        }
        for a in 0..10u8 {
            for b in (a + 1)..10 {
                assert_ne!(
                    lookup((b'0' + a) as char),
                    lookup((b'0' + b) as char),
                    "digits {a} and {b} share a bitmap"
                );
            }
        }
    }

    #[test]
    fn filled_respects_bounds() {
        let g = lookup('8');
        assert!(!g.filled(GLYPH_ROWS, 0));
        assert!(!g.filled(0, GLYPH_WIDTH));
        // '8' top bar spans columns 1..=5.
        assert!(!g.filled(0, 0));
        assert!(g.filled(0, 1));
        assert!(g.filled(0, 5));
        assert!(!g.filled(0, 6));
    }
}
