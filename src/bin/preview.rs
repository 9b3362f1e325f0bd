// src/bin/preview.rs — one-shot block-clock render to stdout
//
// Prints the current time (or a fixed one) once with ANSI colours and exits.
// Handy for tweaking palettes and scale without launching the overlay:
//
//   tock-preview
//   tock-preview --time 12:30:00 --scale 2

use std::collections::HashMap;
use std::io::{self, Write};

use crossterm::{
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
};

use tock::{
    color::{assign_colors, Rgb},
    config::ConfigFile,
    render::{render, FILLED},
    timesrc::{FixedTime, TimeSource, WallClock},
};

fn main() -> io::Result<()> {
    tracing_subscriber::fmt().compact().with_writer(io::stderr).init();

    let mut fixed_time: Option<String> = None;
    let mut scale_override: Option<u32> = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--time" => fixed_time = args.next(),
            "--scale" => scale_override = args.next().and_then(|s| s.parse().ok()),
            "--help" | "-h" => {
                println!("usage: tock-preview [--time HH:MM:SS] [--scale N]");
                return Ok(());
            }
            other => {
                eprintln!("unknown argument '{other}'");
                std::process::exit(2);
            }
        }
    }

    let config = ConfigFile::load().config;
    let scale = scale_override.unwrap_or(config.scale);

    let text = match fixed_time {
        Some(t) => FixedTime(t).now_string(),
        None => WallClock { twelve_hour: config.twelve_hour }.now_string(),
    };

    let grid = render(&text, scale, config.padding);
    let slot_colors = config.scheme.slot_colors(text.chars().count());
    let cells = assign_colors(&grid, &text, scale, config.padding, slot_colors);
    let by_cell: HashMap<(u16, u16), Rgb> =
        cells.iter().map(|c| ((c.row, c.col), c.color)).collect();

    let mut out = io::stdout();
    for (row, line) in grid.rows.iter().enumerate() {
        for (col, ch) in line.chars().enumerate() {
            if ch == FILLED {
                let c = by_cell
                    .get(&(row as u16, col as u16))
                    .copied()
                    .unwrap_or(Rgb(0xCD, 0xD6, 0xF4));
                queue!(out, SetForegroundColor(Color::Rgb { r: c.0, g: c.1, b: c.2 }), Print(ch))?;
            } else {
                queue!(out, Print(' '))?;
            }
        }
        queue!(out, ResetColor, Print('\n'))?;
    }
    out.flush()
}
