// config.rs — clock configuration
//
// Loaded from ~/.config/tock/config.json (or $TOCK_CONFIG). Every key is
// optional; a missing file, a parse error, or an out-of-range value degrades
// to defaults with a warning — nothing in a cosmetic widget is allowed to be
// fatal.
//
// Example shape:
// {
//   "scale": 2,
//   "padding": 1,
//   "interval_ms": 1000,
//   "min_cols": 20,
//   "min_rows": 8,
//   "twelve_hour": false,
//   "shadow": true,
//   "shadow_color": "#313244",
//   "border": "#45475A",
//   "background": "#1E1E2E",
//   "color": {
//     "mode": "gradient",
//     "from": "#89B4FA",
//     "to": "#F38BA8",
//     "solid": "#CDD6F4",
//     "palette": { "digits": ["#F38BA8", "..."], "colon": "#6C7086" }
//   }
// }

use serde::Deserialize;
use std::{
    path::{Path, PathBuf},
    time::SystemTime,
};

use crate::color::{ColorScheme, Palette, Rgb};
use crate::util::{expand_tilde, hex3};

// ── raw deserialization ───────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawConfig {
    scale: Option<i64>,
    padding: Option<i64>,
    interval_ms: Option<u64>,
    min_cols: Option<u16>,
    min_rows: Option<u16>,
    twelve_hour: Option<bool>,
    shadow: Option<bool>,
    shadow_color: Option<String>,
    border: Option<String>,
    background: Option<String>,
    color: Option<RawColor>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawColor {
    mode: Option<String>,
    solid: Option<String>,
    from: Option<String>,
    to: Option<String>,
    palette: Option<RawPalette>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawPalette {
    digits: Vec<String>,
    colon: Option<String>,
}

// ── resolved config ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Integer glyph magnification, at least 1.
    pub scale: u32,
    /// Blank columns on both ends of every rendered row.
    pub padding: u32,
    /// Refresh tick interval.
    pub interval_ms: u64,
    /// Viewport extents below which the overlay is torn down.
    pub min_cols: u16,
    pub min_rows: u16,
    pub twelve_hour: bool,
    pub scheme: ColorScheme,
    pub shadow: bool,
    pub shadow_color: Rgb,
    pub border: Option<Rgb>,
    pub background: Option<Rgb>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scale: 1,
            padding: 1,
            interval_ms: 1000,
            min_cols: 20,
            min_rows: 8,
            twelve_hour: false,
            scheme: ColorScheme::Gradient {
                from: Rgb(0x89, 0xB4, 0xFA),
                to: Rgb(0xF3, 0x8B, 0xA8),
            },
            shadow: true,
            shadow_color: Rgb(0x31, 0x32, 0x44),
            border: None,
            background: None,
        }
    }
}

impl Config {
    /// Parse a JSON document, clamping out-of-range values with a warning.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        let raw: RawConfig = serde_json::from_str(text)?;
        Ok(Self::resolve(raw))
    }

    fn resolve(raw: RawConfig) -> Self {
        let defaults = Self::default();

        let scale = match raw.scale {
            Some(s) if s >= 1 => s.min(16) as u32,
            Some(s) => {
                tracing::warn!("scale = {s} is out of range — clamping to 1");
                1
            }
            None => defaults.scale,
        };
        let padding = match raw.padding {
            Some(p) if p >= 0 => p.min(64) as u32,
            Some(p) => {
                tracing::warn!("padding = {p} is negative — clamping to 0");
                0
            }
            None => defaults.padding,
        };
        let interval_ms = match raw.interval_ms {
            Some(ms) if ms >= 50 => ms,
            Some(ms) => {
                tracing::warn!("interval_ms = {ms} is too small — clamping to 50");
                50
            }
            None => defaults.interval_ms,
        };

        let scheme = raw.color.map_or_else(|| defaults.scheme.clone(), resolve_scheme);

        Self {
            scale,
            padding,
            interval_ms,
            min_cols: raw.min_cols.unwrap_or(defaults.min_cols),
            min_rows: raw.min_rows.unwrap_or(defaults.min_rows),
            twelve_hour: raw.twelve_hour.unwrap_or(defaults.twelve_hour),
            scheme,
            shadow: raw.shadow.unwrap_or(defaults.shadow),
            shadow_color: raw
                .shadow_color
                .map_or(defaults.shadow_color, |s| Rgb::from(hex3(&s))),
            border: raw.border.map(|s| Rgb::from(hex3(&s))),
            background: raw.background.map(|s| Rgb::from(hex3(&s))),
        }
    }
}

fn resolve_scheme(raw: RawColor) -> ColorScheme {
    let defaults = Config::default();
    match raw.mode.as_deref() {
        Some("solid") => {
            let c = raw.solid.map_or(Rgb(0xCD, 0xD6, 0xF4), |s| Rgb::from(hex3(&s)));
            ColorScheme::Solid(c)
        }
        Some("palette") => ColorScheme::Palette(resolve_palette(raw.palette)),
        Some("gradient") | None => {
            let ColorScheme::Gradient { from, to } = defaults.scheme else {
                unreachable!("default scheme is a gradient");
            };
            ColorScheme::Gradient {
                from: raw.from.map_or(from, |s| Rgb::from(hex3(&s))),
                to: raw.to.map_or(to, |s| Rgb::from(hex3(&s))),
            }
        }
        Some(other) => {
            tracing::warn!("Unknown color mode '{other}' — using gradient defaults");
            defaults.scheme
        }
    }
}

fn resolve_palette(raw: Option<RawPalette>) -> Palette {
    let mut palette = Palette::default();
    let Some(raw) = raw else { return palette };
    for (i, hex) in raw.digits.iter().take(10).enumerate() {
        palette.digits[i] = Rgb::from(hex3(hex));
    }
    if raw.digits.len() > 10 {
        tracing::warn!("palette.digits has {} entries — extra ones ignored", raw.digits.len());
    }
    if let Some(colon) = raw.colon {
        palette.colon = Rgb::from(hex3(&colon));
    }
    palette
}

// ── file loading + hot reload ─────────────────────────────────────────────────

/// A config bound to its on-disk source, with mtime-based staleness checks
/// so edits are picked up on the next tick without an inotify watcher.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub path: PathBuf,
    pub config: Config,
    last_modified: Option<SystemTime>,
}

impl ConfigFile {
    pub fn default_path() -> PathBuf {
        match std::env::var("TOCK_CONFIG") {
            Ok(p) if !p.is_empty() => PathBuf::from(expand_tilde(&p)),
            _ => PathBuf::from(expand_tilde("~/.config/tock/config.json")),
        }
    }

    pub fn load() -> Self {
        Self::load_from(Self::default_path())
    }

    pub fn load_from(path: PathBuf) -> Self {
        let (config, last_modified) = read_config(&path);
        Self { path, config, last_modified }
    }

    /// True if the file on disk is newer than our cached mtime.
    pub fn is_stale(&self) -> bool {
        let Ok(meta) = std::fs::metadata(&self.path) else {
            return false;
        };
        let Ok(mtime) = meta.modified() else {
            return false;
        };
        self.last_modified.map_or(true, |lm| mtime > lm)
    }

    /// Re-read the file in place. Returns true if the config changed.
    pub fn reload(&mut self) -> bool {
        let (config, last_modified) = read_config(&self.path);
        self.last_modified = last_modified;
        if config != self.config {
            tracing::info!("Config reloaded from {}", self.path.display());
            self.config = config;
            true
        } else {
            false
        }
    }
}

fn read_config(path: &Path) -> (Config, Option<SystemTime>) {
    if !path.exists() {
        tracing::info!("No config at {} — using defaults", path.display());
        return (Config::default(), None);
    }

    let mtime = std::fs::metadata(path).and_then(|m| m.modified()).ok();
    let text = match std::fs::read_to_string(path) {
        Ok(t) => t,
        Err(e) => {
            tracing::warn!("Could not read {}: {e} — using defaults", path.display());
            return (Config::default(), mtime);
        }
    };

    match Config::from_json(&text) {
        Ok(c) => (c, mtime),
        Err(e) => {
            tracing::warn!("JSON parse error in {}: {e} — using defaults", path.display());
            (Config::default(), mtime)
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
