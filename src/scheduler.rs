// scheduler.rs — repeating tick source over calloop
//
// One abstraction for the two historical timer strategies: a native
// repeating timer (re-armed via TimeoutAction::ToDuration) and a
// self-rescheduling chain of one-shot timers used as a fallback when the
// repeating source cannot be registered. The shared `armed` flag is what
// makes stop() safe mid-tick in chain mode, where the registration token
// changes on every re-arm.

use std::{cell::Cell, rc::Rc, time::Duration};

use calloop::{
    timer::{TimeoutAction, Timer},
    LoopHandle, RegistrationToken,
};

pub struct TickTimer<D: 'static> {
    handle: LoopHandle<'static, D>,
    on_tick: fn(&mut D),
    token: Option<RegistrationToken>,
    armed: Rc<Cell<bool>>,
}

impl<D: 'static> TickTimer<D> {
    pub fn new(handle: LoopHandle<'static, D>, on_tick: fn(&mut D)) -> Self {
        Self { handle, on_tick, token: None, armed: Rc::new(Cell::new(false)) }
    }

    pub fn running(&self) -> bool {
        self.armed.get()
    }

    /// Arm the tick source. Starting an already-armed timer is a no-op.
    ///
    /// Each start gets a fresh `armed` cell: a one-shot chain left pending
    /// by an earlier stop() still holds the old cell and stays dead, so a
    /// restart can never end up with two concurrent chains.
    pub fn start(&mut self, interval: Duration) {
        if self.armed.get() {
            return;
        }
        self.armed = Rc::new(Cell::new(true));

        let armed = self.armed.clone();
        let on_tick = self.on_tick;
        let registered = self.handle.insert_source(
            Timer::from_duration(interval),
            move |_, _, data| {
                if !armed.get() {
                    return TimeoutAction::Drop;
                }
                on_tick(data);
                TimeoutAction::ToDuration(interval)
            },
        );

        match registered {
            Ok(token) => self.token = Some(token),
            Err(e) => {
                tracing::warn!(
                    "Repeating timer registration failed: {e} — \
                     falling back to a one-shot chain"
                );
                arm_oneshot(&self.handle, interval, self.armed.clone(), on_tick);
            }
        }
    }

    /// Disarm. Stopping an already-stopped timer is a no-op; safe to call
    /// from inside a tick.
    pub fn stop(&mut self) {
        if !self.armed.get() {
            return;
        }
        self.armed.set(false);
        if let Some(token) = self.token.take() {
            self.handle.remove(token);
        }
    }
}

/// Self-rescheduling one-shot chain: each firing inserts the next timer.
fn arm_oneshot<D: 'static>(
    handle: &LoopHandle<'static, D>,
    interval: Duration,
    armed: Rc<Cell<bool>>,
    on_tick: fn(&mut D),
) {
    let chain = handle.clone();
    let registered = handle.insert_source(Timer::from_duration(interval), move |_, _, data| {
        if armed.get() {
            on_tick(data);
            arm_oneshot(&chain, interval, armed.clone(), on_tick);
        }
        TimeoutAction::Drop
    });
    if let Err(e) = registered {
        tracing::warn!("One-shot re-arm failed: {e} — ticks stop until restarted");
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
