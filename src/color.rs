// color.rs — gradient ramp builder and the cell → slot colour mapper
//
// The mapper is the heart of the widget: every filled cell in the rendered
// grid is assigned the colour of the logical character slot it was rendered
// from. Slot identity is computed from the *source string index* and the
// known band geometry (band = GLYPH_WIDTH * scale, one separator column,
// symmetric padding) — never by re-scanning the rendered text, which is
// ambiguous once padding, separators and multi-byte cells are in play.

use crate::render::{band_width, Grid, FILLED};

// ── Rgb ───────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self(r, g, b)
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(c: [u8; 3]) -> Self {
        Self(c[0], c[1], c[2])
    }
}

// ── gradient ──────────────────────────────────────────────────────────────────

/// Evenly interpolated ramp of `n` colours from `from` to `to`.
///
/// `n == 0` → empty, `n == 1` → `[from]`; otherwise index 0 is exactly
/// `from` and index n−1 exactly `to`. Channels interpolate independently
/// and are rounded once.
pub fn gradient(from: Rgb, to: Rgb, n: usize) -> Vec<Rgb> {
    if n == 0 {
        return Vec::new();
    }
    if n == 1 {
        return vec![from];
    }
    let lerp = |a: u8, b: u8, t: f32| -> u8 {
        (f32::from(a) + (f32::from(b) - f32::from(a)) * t)
            .clamp(0.0, 255.0)
            .round() as u8
    };
    (0..n)
        .map(|i| {
            let t = i as f32 / (n - 1) as f32;
            Rgb(lerp(from.0, to.0, t), lerp(from.1, to.1, t), lerp(from.2, to.2, t))
        })
        .collect()
}

// ── per-digit palette ─────────────────────────────────────────────────────────

/// Typed palette key — one variant per colourable glyph, replacing the
/// stringly "group name per digit" approach.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigitColorKey {
    Digit(u8),
    Colon,
}

impl DigitColorKey {
    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            '0'..='9' => Some(Self::Digit(ch as u8 - b'0')),
            ':' => Some(Self::Colon),
            _ => None,
        }
    }
}

/// Fixed colour per glyph identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pub digits: [Rgb; 10],
    pub colon: Rgb,
}

impl Palette {
    pub fn color(&self, key: DigitColorKey) -> Rgb {
        match key {
            DigitColorKey::Digit(d) => self.digits[usize::from(d) % 10],
            DigitColorKey::Colon => self.colon,
        }
    }
}

impl Default for Palette {
    // Catppuccin-mocha accents, one hue per digit, dimmed colon.
    fn default() -> Self {
        Self {
            digits: [
                Rgb(0xF3, 0x8B, 0xA8), // 0 red
                Rgb(0xFA, 0xB3, 0x87), // 1 peach
                Rgb(0xF9, 0xE2, 0xAF), // 2 yellow
                Rgb(0xA6, 0xE3, 0xA1), // 3 green
                Rgb(0x94, 0xE2, 0xD5), // 4 teal
                Rgb(0x89, 0xDC, 0xEB), // 5 sky
                Rgb(0x89, 0xB4, 0xFA), // 6 blue
                Rgb(0xB4, 0xBE, 0xFE), // 7 lavender
                Rgb(0xCB, 0xA6, 0xF7), // 8 mauve
                Rgb(0xF5, 0xC2, 0xE7), // 9 pink
            ],
            colon: Rgb(0x6C, 0x70, 0x86),
        }
    }
}

// ── colour scheme ─────────────────────────────────────────────────────────────

/// Colouring strategy for one rendered frame. Which one applies is plain
/// configuration; the mapper only ever sees a `color_for_slot` closure.
#[derive(Debug, Clone, PartialEq)]
pub enum ColorScheme {
    Solid(Rgb),
    Gradient { from: Rgb, to: Rgb },
    Palette(Palette),
}

impl ColorScheme {
    /// Resolve the per-slot colour function for a string of `slot_count`
    /// characters. The gradient is sampled once per slot across the full
    /// slot count; the palette keys off the slot's character (unknown
    /// characters reuse the colon colour, they render blank anyway).
    pub fn slot_colors(&self, slot_count: usize) -> impl Fn(usize, char) -> Rgb + '_ {
        let ramp = match self {
            ColorScheme::Gradient { from, to } => gradient(*from, *to, slot_count),
            _ => Vec::new(),
        };
        move |slot, ch| match self {
            ColorScheme::Solid(c) => *c,
            ColorScheme::Gradient { .. } => ramp.get(slot).copied().unwrap_or_default(),
            ColorScheme::Palette(p) => {
                let key = DigitColorKey::from_char(ch).unwrap_or(DigitColorKey::Colon);
                p.color(key)
            }
        }
    }
}

// ── cell → slot mapper ────────────────────────────────────────────────────────

/// One colour directive for the overlay surface, in grid coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellPaint {
    pub row: u16,
    pub col: u16,
    pub color: Rgb,
}

/// Assign a colour to every filled cell of `grid`, driven by the logical
/// `source` string the grid was rendered from.
///
/// Geometry must match the render call: same `scale`, same `padding`.
/// Cells in padding or separator columns, and cells whose band falls past
/// the end of `source`, are skipped. Deterministic: identical inputs yield
/// the identical directive list.
pub fn assign_colors(
    grid: &Grid,
    source: &str,
    scale: u32,
    padding: u32,
    color_for_slot: impl Fn(usize, char) -> Rgb,
) -> Vec<CellPaint> {
    let scale = scale.max(1);
    let chars: Vec<char> = source.chars().collect();
    let band = band_width(scale);
    let stride = band + 1; // band plus its trailing separator column
    let padding = padding as usize;

    let mut out = Vec::new();
    for (row, line) in grid.rows.iter().enumerate() {
        for (col, cell) in line.chars().enumerate() {
            if cell != FILLED {
                continue;
            }
            let Some(relative) = col.checked_sub(padding) else {
                continue;
            };
            let slot = relative / stride;
            let within_band = relative % stride;
            if slot >= chars.len() || within_band >= band {
                continue;
            }
            out.push(CellPaint {
                row: row as u16,
                col: col as u16,
                color: color_for_slot(slot, chars[slot]),
            });
        }
    }
    out
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::render;

    const A: Rgb = Rgb(10, 20, 30);
    const B: Rgb = Rgb(250, 120, 0);

    #[test]
    fn gradient_degenerate_counts() {
        assert!(gradient(A, B, 0).is_empty());
        assert_eq!(gradient(A, B, 1), vec![A]);
        assert_eq!(gradient(A, A, 5), vec![A; 5]);
    }

    #[test]
    fn gradient_endpoints_exact() {
        for n in [2usize, 3, 8, 41] {
            let ramp = gradient(A, B, n);
            assert_eq!(ramp.len(), n);
            assert_eq!(ramp[0], A);
            assert_eq!(ramp[n - 1], B);
        }
    }

    #[test]
    fn gradient_channels_independent() {
        let ramp = gradient(Rgb(0, 100, 255), Rgb(255, 100, 0), 3);
        assert_eq!(ramp[1], Rgb(128, 100, 128));
    }

    // Colour encoding the slot index, so assignments are self-describing.
    fn slot_tag(slot: usize, _ch: char) -> Rgb {
        Rgb(slot as u8, 0, 0)
    }

    #[test]
    fn every_filled_cell_maps_to_its_own_band() {
        let source = "12:30";
        let grid = render(source, 1, 1);
        let paints = assign_colors(&grid, source, 1, 1, slot_tag);
        assert!(!paints.is_empty());
        for p in &paints {
            let relative = usize::from(p.col) - 1;
            let expected_slot = relative / 8;
            assert_eq!(p.color, Rgb(expected_slot as u8, 0, 0));
            // Never a separator column.
            assert!(relative % 8 < 7);
        }
        // All five slots produced at least one painted cell except the
        // blank-free ones; here every char has ink.
        for slot in 0..5u8 {
            assert!(paints.iter().any(|p| p.color == Rgb(slot, 0, 0)), "slot {slot} unpainted");
        }
    }

    #[test]
    fn paint_count_equals_filled_cell_count() {
        let source = "09:05:07";
        for (scale, padding) in [(1, 0), (1, 1), (2, 3)] {
            let grid = render(source, scale, padding);
            let filled: usize =
                grid.rows.iter().map(|r| r.chars().filter(|&c| c == FILLED).count()).sum();
            let paints = assign_colors(&grid, source, scale, padding, slot_tag);
            assert_eq!(paints.len(), filled);
        }
    }

    #[test]
    fn scaled_bands_stay_aligned() {
        let source = "4:2";
        let grid = render(source, 3, 2);
        let paints = assign_colors(&grid, source, 3, 2, slot_tag);
        for p in &paints {
            let relative = usize::from(p.col) - 2;
            assert_eq!(p.color, Rgb((relative / 22) as u8, 0, 0));
        }
    }

    #[test]
    fn determinism() {
        let source = "23:59:59";
        let grid = render(source, 2, 1);
        let a = assign_colors(&grid, source, 2, 1, slot_tag);
        let b = assign_colors(&grid, source, 2, 1, slot_tag);
        assert_eq!(a, b);
    }

    #[test]
    fn palette_keys_off_character_identity() {
        let palette = Palette::default();
        let scheme = ColorScheme::Palette(palette.clone());
        let source = "1:1";
        let grid = render(source, 1, 0);
        let colors = scheme.slot_colors(3);
        let paints = assign_colors(&grid, source, 1, 0, colors);
        for p in &paints {
            let slot = usize::from(p.col) / 8;
            let expected = if slot == 1 {
                palette.color(DigitColorKey::Colon)
            } else {
                palette.color(DigitColorKey::Digit(1))
            };
            assert_eq!(p.color, expected);
        }
    }

    #[test]
    fn gradient_scheme_samples_once_per_slot() {
        let scheme = ColorScheme::Gradient { from: A, to: B };
        let ramp = gradient(A, B, 5);
        let colors = scheme.slot_colors(5);
        for (i, &expected) in ramp.iter().enumerate() {
            assert_eq!(colors(i, '0'), expected);
        }
    }
}
