// surface.rs — overlay surface abstraction and its terminal implementation
//
// The clock core only ever talks to the `Surface` trait: it asks for the
// current viewport, pushes one OverlayFrame per tick, and tears the panel
// down when suppressed or deactivated. `TermSurface` realizes the panel on
// a ratatui terminal; tests substitute a recording mock.

use std::io;

use ratatui::{
    backend::CrosstermBackend,
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, BorderType, Borders, Widget},
    Terminal,
};

use crate::color::{CellPaint, Rgb};
use crate::layout::Placement;
use crate::render::FILLED;

// ── frame ─────────────────────────────────────────────────────────────────────

/// Cosmetic hints passed through from configuration.
#[derive(Debug, Clone, Copy)]
pub struct FrameStyle {
    /// Panel background; `None` renders a transparent panel (glyph cells only).
    pub bg: Option<Rgb>,
    /// Rounded border drawn one cell outside the panel when it fits.
    pub border: Option<Rgb>,
    /// Colour of the offset shadow layer.
    pub shadow_color: Rgb,
}

/// Everything the surface needs to paint one refresh tick.
#[derive(Debug)]
pub struct OverlayFrame<'a> {
    pub placement: Placement,
    /// Second layout pass for the drop shadow, already offset and clamped.
    pub shadow: Option<Placement>,
    /// Rendered grid rows; display width may exceed the placement, in which
    /// case the surface crops.
    pub rows: &'a [String],
    /// Per-cell colour directives in grid coordinates.
    pub cells: &'a [CellPaint],
    pub style: FrameStyle,
}

// ── trait ─────────────────────────────────────────────────────────────────────

pub trait Surface {
    /// Current viewport extent as (columns, rows).
    fn viewport(&self) -> io::Result<(u16, u16)>;
    /// Replace the overlay contents with `frame`.
    fn show(&mut self, frame: &OverlayFrame) -> io::Result<()>;
    /// Remove the overlay from the viewport entirely.
    fn hide(&mut self) -> io::Result<()>;
}

// ── terminal surface ──────────────────────────────────────────────────────────

pub struct TermSurface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TermSurface {
    /// Wrap the current stdout. Raw mode / alternate screen handling stays
    /// with the caller, matching how the event loop owns terminal state.
    pub fn new() -> io::Result<Self> {
        let backend = CrosstermBackend::new(io::stdout());
        Ok(Self { terminal: Terminal::new(backend)? })
    }
}

impl Surface for TermSurface {
    fn viewport(&self) -> io::Result<(u16, u16)> {
        let size = self.terminal.size()?;
        Ok((size.width, size.height))
    }

    fn show(&mut self, frame: &OverlayFrame) -> io::Result<()> {
        self.terminal.draw(|f| {
            f.render_widget(ClockPanel { frame }, f.size());
        })?;
        Ok(())
    }

    fn hide(&mut self) -> io::Result<()> {
        // An empty draw diffs against the previous frame and clears it.
        self.terminal.draw(|_| {})?;
        Ok(())
    }
}

// ── panel widget ──────────────────────────────────────────────────────────────

fn tui_color(c: Rgb) -> Color {
    Color::Rgb(c.0, c.1, c.2)
}

struct ClockPanel<'a> {
    frame: &'a OverlayFrame<'a>,
}

impl ClockPanel<'_> {
    /// Write the grid's filled cells at `at`, cropped to the placement,
    /// with a uniform foreground.
    fn blit(&self, at: Placement, fg: Color, area: Rect, buf: &mut Buffer) {
        for (row, line) in self.frame.rows.iter().enumerate().take(at.height as usize) {
            for (col, ch) in line.chars().enumerate().take(at.width as usize) {
                if ch != FILLED {
                    continue;
                }
                let x = at.x + col as u16;
                let y = at.y + row as u16;
                if x < area.right() && y < area.bottom() {
                    buf.get_mut(x, y).set_char(FILLED).set_fg(fg);
                }
            }
        }
    }
}

impl Widget for ClockPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let frame = self.frame;
        let at = frame.placement;
        if at.width == 0 || at.height == 0 {
            return;
        }

        // Shadow first, so the main layer paints over it.
        if let Some(shadow) = frame.shadow {
            self.blit(shadow, tui_color(frame.style.shadow_color), area, buf);
        }

        // Opaque panel background, when configured.
        if let Some(bg) = frame.style.bg {
            let bg = tui_color(bg);
            for y in at.y..at.y.saturating_add(at.height).min(area.bottom()) {
                for x in at.x..at.x.saturating_add(at.width).min(area.right()) {
                    buf.get_mut(x, y).set_char(' ').set_bg(bg);
                }
            }
        }

        // Glyph cells, then the per-slot colour directives on top.
        self.blit(at, Color::Reset, area, buf);
        for paint in frame.cells {
            if paint.col >= at.width || paint.row >= at.height {
                continue;
            }
            let x = at.x + paint.col;
            let y = at.y + paint.row;
            if x < area.right() && y < area.bottom() {
                buf.get_mut(x, y).set_fg(tui_color(paint.color));
            }
        }

        // Border sits one cell outside the panel; skipped when it would
        // leave the viewport.
        if let Some(border) = frame.style.border {
            if at.x >= 1
                && at.y >= 1
                && at.x + at.width + 1 <= area.right()
                && at.y + at.height + 1 <= area.bottom()
            {
                let rect = Rect::new(at.x - 1, at.y - 1, at.width + 2, at.height + 2);
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(tui_color(border)))
                    .render(rect, buf);
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::assign_colors;
    use crate::layout::place;
    use crate::render::render;

    fn style() -> FrameStyle {
        FrameStyle { bg: None, border: None, shadow_color: Rgb(40, 40, 40) }
    }

    #[test]
    fn panel_writes_colored_glyph_cells() {
        let source = "12";
        let grid = render(source, 1, 0);
        let placement = place(grid.width, grid.height(), 40, 12, 0, 0);
        let cells = assign_colors(&grid, source, 1, 0, |_, _| Rgb(1, 2, 3));
        let frame = OverlayFrame {
            placement,
            shadow: None,
            rows: &grid.rows,
            cells: &cells,
            style: style(),
        };

        let area = Rect::new(0, 0, 40, 12);
        let mut buf = Buffer::empty(area);
        ClockPanel { frame: &frame }.render(area, &mut buf);

        for paint in &cells {
            let cell = buf.get(placement.x + paint.col, placement.y + paint.row);
            assert_eq!(cell.symbol(), FILLED.to_string());
            assert_eq!(cell.fg, Color::Rgb(1, 2, 3));
        }
    }

    #[test]
    fn shadow_renders_underneath() {
        let source = "8";
        let grid = render(source, 1, 0);
        let placement = place(grid.width, grid.height(), 40, 12, 0, 0);
        let shadow = place(grid.width, grid.height(), 40, 12, 1, 1);
        let cells = assign_colors(&grid, source, 1, 0, |_, _| Rgb(200, 0, 0));
        let frame = OverlayFrame {
            placement,
            shadow: Some(shadow),
            rows: &grid.rows,
            cells: &cells,
            style: style(),
        };

        let area = Rect::new(0, 0, 40, 12);
        let mut buf = Buffer::empty(area);
        ClockPanel { frame: &frame }.render(area, &mut buf);

        // Bottom-right corner of the shadow pokes out past the main layer:
        // '8' has ink in its last row/column region offset by (1, 1).
        let shadow_fg = Color::Rgb(40, 40, 40);
        let mut saw_shadow = false;
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                if buf.get(x, y).fg == shadow_fg {
                    saw_shadow = true;
                }
            }
        }
        assert!(saw_shadow, "no shadow cells survived the main pass");
    }

    #[test]
    fn zero_sized_placement_renders_nothing() {
        let grid = render("12:30", 1, 0);
        let frame = OverlayFrame {
            placement: Placement::default(),
            shadow: None,
            rows: &grid.rows,
            cells: &[],
            style: style(),
        };
        let area = Rect::new(0, 0, 10, 4);
        let mut buf = Buffer::empty(area);
        ClockPanel { frame: &frame }.render(area, &mut buf);
        assert_eq!(buf, Buffer::empty(area));
    }
}
