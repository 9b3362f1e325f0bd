// util.rs — path and hex colour helpers shared by config.rs and the bins

// ── Path helpers ──────────────────────────────────────────────────────────────

pub fn expand_tilde(s: &str) -> String {
    if s.starts_with('~') {
        let home = std::env::var("HOME").unwrap_or_default();
        format!("{home}{}", &s[1..])
    } else {
        s.to_owned()
    }
}

// ── Hex colour helpers ────────────────────────────────────────────────────────

/// Parse `#RRGGBB` → `[u8; 3]`.
/// Falls back to magenta on malformed input (with a tracing warning).
pub fn hex3(s: &str) -> [u8; 3] {
    let s = s.trim().trim_start_matches('#');
    let p = |i: usize| u8::from_str_radix(&s[i..i + 2], 16).unwrap_or(0xFF);
    if s.len() >= 6 && s.is_ascii() {
        [p(0), p(2), p(4)]
    } else {
        tracing::warn!("Bad hex colour '#{s}' — using magenta");
        [0xFF, 0x00, 0xFF]
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
