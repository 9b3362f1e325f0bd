// timesrc.rs — wall-clock time string provider

/// Produces the zero-padded time string rendered on each tick.
pub trait TimeSource {
    fn now_string(&self) -> String;
}

/// Local wall clock via chrono.
#[derive(Debug, Clone, Copy)]
pub struct WallClock {
    pub twelve_hour: bool,
}

impl TimeSource for WallClock {
    fn now_string(&self) -> String {
        let now = chrono::Local::now();
        let fmt = if self.twelve_hour { "%I:%M:%S" } else { "%H:%M:%S" };
        now.format(fmt).to_string()
    }
}

/// Fixed string, for tests and the preview bin's `--time` flag.
#[derive(Debug, Clone)]
pub struct FixedTime(pub String);

impl TimeSource for FixedTime {
    fn now_string(&self) -> String {
        self.0.clone()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wall_clock_is_zero_padded_hhmmss() {
        for twelve_hour in [false, true] {
            let s = WallClock { twelve_hour }.now_string();
            let bytes = s.as_bytes();
            assert_eq!(bytes.len(), 8, "unexpected shape: {s}");
            assert_eq!(bytes[2], b':');
            assert_eq!(bytes[5], b':');
            assert!(s.chars().filter(|c| c.is_ascii_digit()).count() == 6);
        }
    }
}
