// clock.rs — the refresh loop: render → layout → colour → paint, every tick
//
// Two states: Inactive (no overlay) and Active (overlay owned, tick driven
// from the scheduler). Activation performs one synchronous pass before the
// first tick fires. All per-tick failures are absorbed: a failed paint
// abandons that tick and the next one retries — the worst outcome this
// widget allows itself is "clock temporarily not shown".

use crate::color::assign_colors;
use crate::config::Config;
use crate::layout::place;
use crate::render::render;
use crate::surface::{FrameStyle, OverlayFrame, Surface};
use crate::timesrc::TimeSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Inactive,
    Active {
        /// False while the viewport is below the configured minimum and the
        /// overlay has been torn down; it comes back on a later tick.
        overlay_up: bool,
    },
}

pub struct BlockClock<S: Surface> {
    surface: S,
    time: Box<dyn TimeSource>,
    config: Config,
    state: State,
}

impl<S: Surface> BlockClock<S> {
    pub fn new(surface: S, time: Box<dyn TimeSource>, config: Config) -> Self {
        Self { surface, time, config, state: State::Inactive }
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, State::Active { .. })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Swap configuration in place (hot reload). Re-renders immediately
    /// when active so the change is visible before the next tick.
    pub fn set_config(&mut self, config: Config) {
        self.config = config;
        if self.is_active() {
            self.refresh();
        }
    }

    /// Replace the time source (e.g. after a 12/24-hour config change).
    pub fn set_time_source(&mut self, time: Box<dyn TimeSource>) {
        self.time = time;
        if self.is_active() {
            self.refresh();
        }
    }

    /// Inactive → Active, with one immediate synchronous pass. Returns
    /// false (and does nothing) when already active.
    pub fn activate(&mut self) -> bool {
        if self.is_active() {
            return false;
        }
        self.state = State::Active { overlay_up: false };
        self.refresh();
        true
    }

    /// Active → Inactive: tear down the overlay and release it. Idempotent.
    pub fn deactivate(&mut self) {
        let State::Active { overlay_up } = self.state else {
            return;
        };
        if overlay_up {
            if let Err(e) = self.surface.hide() {
                tracing::warn!("Overlay teardown failed: {e}");
            }
        }
        self.state = State::Inactive;
    }

    /// Regular scheduler tick.
    pub fn tick(&mut self) {
        if self.is_active() {
            self.refresh();
        }
    }

    /// Out-of-band re-layout on a viewport size change, independent of the
    /// tick schedule.
    pub fn handle_resize(&mut self) {
        if self.is_active() {
            self.refresh();
        }
    }

    // ── one render/layout/colour/paint pass ───────────────────────────────────

    fn refresh(&mut self) {
        let State::Active { overlay_up } = self.state else {
            return;
        };

        let (cols, rows) = match self.surface.viewport() {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!("Viewport query failed: {e} — skipping tick");
                return;
            }
        };

        // Too small to render: tear the overlay down (not merely hide) and
        // let a later tick recreate it once the viewport has grown.
        if cols < self.config.min_cols || rows < self.config.min_rows {
            if overlay_up {
                tracing::debug!("Viewport {cols}x{rows} below minimum — overlay suppressed");
                if let Err(e) = self.surface.hide() {
                    tracing::warn!("Overlay teardown failed: {e}");
                }
                self.state = State::Active { overlay_up: false };
            }
            return;
        }

        let text = self.time.now_string();
        let grid = render(&text, self.config.scale, self.config.padding);
        if grid.is_empty() {
            return;
        }

        let placement = place(grid.width, grid.height(), cols, rows, 0, 0);
        let shadow = self
            .config
            .shadow
            .then(|| place(grid.width, grid.height(), cols, rows, 1, 1));

        let slot_colors = self.config.scheme.slot_colors(text.chars().count());
        let cells =
            assign_colors(&grid, &text, self.config.scale, self.config.padding, slot_colors);

        let frame = OverlayFrame {
            placement,
            shadow,
            rows: &grid.rows,
            cells: &cells,
            style: FrameStyle {
                bg: self.config.background,
                border: self.config.border,
                shadow_color: self.config.shadow_color,
            },
        };

        match self.surface.show(&frame) {
            Ok(()) => self.state = State::Active { overlay_up: true },
            // Abandon this tick's paint; stay active and retry next tick.
            Err(e) => tracing::warn!("Paint failed: {e} — retrying next tick"),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
