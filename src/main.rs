// main.rs — tock: a block-digit clock overlay for the terminal
//
// Wiring only: terminal setup, the calloop event loop that drives the tick
// timer, key handling (q/Esc quits, space toggles the clock) and resize
// propagation. Everything the clock actually does lives in the library.

use std::{io, time::Duration};

use calloop::EventLoop;
use crossterm::{
    cursor::{Hide, Show},
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};

use tock::{
    clock::BlockClock,
    config::ConfigFile,
    scheduler::TickTimer,
    surface::TermSurface,
    timesrc::WallClock,
};

struct App {
    clock: BlockClock<TermSurface>,
    timer: TickTimer<App>,
    config_file: ConfigFile,
    running: bool,
}

impl App {
    fn interval(&self) -> Duration {
        Duration::from_millis(self.config_file.config.interval_ms)
    }

    fn toggle_clock(&mut self) {
        if self.clock.is_active() {
            self.clock.deactivate();
            self.timer.stop();
        } else if self.clock.activate() {
            self.timer.start(self.interval());
        }
    }

    /// Pick up config edits between ticks; mtime polling, no watcher.
    fn maybe_reload_config(&mut self) {
        if !self.config_file.is_stale() {
            return;
        }
        let old = self.config_file.config.clone();
        if !self.config_file.reload() {
            return;
        }
        let new = self.config_file.config.clone();
        if new.twelve_hour != old.twelve_hour {
            self.clock
                .set_time_source(Box::new(WallClock { twelve_hour: new.twelve_hour }));
        }
        let interval_changed = new.interval_ms != old.interval_ms;
        self.clock.set_config(new);
        if interval_changed && self.timer.running() {
            self.timer.stop();
            self.timer.start(self.interval());
        }
    }

    /// Drain pending terminal events without blocking the loop.
    fn drain_input(&mut self) {
        loop {
            match event::poll(Duration::ZERO) {
                Ok(true) => {}
                Ok(false) => return,
                Err(e) => {
                    tracing::warn!("Input poll failed: {e}");
                    return;
                }
            }
            let ev = match event::read() {
                Ok(ev) => ev,
                Err(e) => {
                    tracing::warn!("Input read failed: {e}");
                    return;
                }
            };
            match ev {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => self.running = false,
                    KeyCode::Char(' ') => self.toggle_clock(),
                    _ => {}
                },
                Event::Resize(..) => self.clock.handle_resize(),
                _ => {}
            }
        }
    }
}

fn on_tick(app: &mut App) {
    app.maybe_reload_config();
    app.clock.tick();
}

fn main() -> io::Result<()> {
    // stdout is the UI; logs go to stderr.
    tracing_subscriber::fmt()
        .compact()
        .with_writer(io::stderr)
        .init();

    let config_file = ConfigFile::load();
    let config = config_file.config.clone();

    enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen, Hide)?;

    let mut event_loop: EventLoop<'static, App> =
        EventLoop::try_new().expect("Failed to create event loop");

    let surface = TermSurface::new()?;
    let time = WallClock { twelve_hour: config.twelve_hour };
    let clock = BlockClock::new(surface, Box::new(time), config.clone());
    let timer = TickTimer::new(event_loop.handle(), on_tick);

    let mut app = App { clock, timer, config_file, running: true };
    if app.clock.activate() {
        app.timer.start(app.interval());
    }

    while app.running {
        let _ = event_loop.dispatch(Some(Duration::from_millis(50)), &mut app);
        app.drain_input();
    }

    app.timer.stop();
    app.clock.deactivate();

    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, Show)?;
    Ok(())
}
