use crate::theme::Theme;
use clap::{Parser, ValueEnum};
use ninepiece_core::DEFAULT_SHUFFLE_MOVES;
use std::path::PathBuf;

/// Command-line options
#[derive(Debug, Clone, Parser)]
#[command(name = "ninepiece", version, about = "Nine-piece sliding picture puzzle")]
pub struct Args {
    /// Picture to slice into tiles; a generated picture is used if omitted
    #[arg(short, long)]
    pub image: Option<PathBuf>,

    /// Side of one tile in pixels (even, 4-64). One terminal cell shows 1x2 pixels
    #[arg(long, default_value_t = 16, value_parser = parse_tile_edge)]
    pub tile_edge: u32,

    /// Random slides applied on each new game
    #[arg(long, default_value_t = DEFAULT_SHUFFLE_MOVES)]
    pub shuffle_moves: usize,

    /// Seed for reproducible shuffles
    #[arg(long)]
    pub seed: Option<u64>,

    /// Color theme
    #[arg(long, value_enum, default_value_t = ThemeChoice::Dark)]
    pub theme: ThemeChoice,

    /// Print each tile's number in its corner
    #[arg(long)]
    pub labels: bool,

    /// Write logs to this file (nothing is logged otherwise)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `ninepiece_core=trace`
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

/// Selectable color themes
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeChoice {
    Dark,
    Light,
    HighContrast,
}

impl ThemeChoice {
    pub fn theme(&self) -> Theme {
        match self {
            ThemeChoice::Dark => Theme::dark(),
            ThemeChoice::Light => Theme::light(),
            ThemeChoice::HighContrast => Theme::high_contrast(),
        }
    }

    /// Next theme in the cycle
    pub fn next(&self) -> Self {
        match self {
            ThemeChoice::Dark => ThemeChoice::Light,
            ThemeChoice::Light => ThemeChoice::HighContrast,
            ThemeChoice::HighContrast => ThemeChoice::Dark,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ThemeChoice::Dark => "Dark",
            ThemeChoice::Light => "Light",
            ThemeChoice::HighContrast => "High Contrast",
        }
    }
}

fn parse_tile_edge(s: &str) -> Result<u32, String> {
    let edge: u32 = s
        .parse()
        .map_err(|_| format!("`{}` is not a whole number", s))?;
    if !(4..=64).contains(&edge) {
        return Err(format!("tile edge must be between 4 and 64, got {}", edge));
    }
    if edge % 2 != 0 {
        return Err(format!("tile edge must be even, got {}", edge));
    }
    Ok(edge)
}
