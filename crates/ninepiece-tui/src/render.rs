use crate::app::{App, Dialog, MenuItem};
use crate::theme::hue_color;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute, queue,
    style::{Color, Print, SetBackgroundColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use image::RgbImage;
use ninepiece_core::{Cell, GameState, TileStore};
use std::io::{self, Write};

/// Where the board sits on screen. One character cell shows two vertically
/// stacked pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardLayout {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl BoardLayout {
    /// `board_edge` is the side of the whole board in pixels
    pub fn new(term_width: u16, term_height: u16, board_edge: u32) -> Self {
        let width = board_edge as u16;
        let height = board_edge.div_ceil(2) as u16;
        let x = term_width.saturating_sub(width) / 2;
        // Menu line, spacer, then the frame
        let y = if term_height > height + 8 { 3 } else { 2 };
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Board pixel under a terminal cell; negative left of or above the board
    pub fn pixel_at(&self, column: u16, row: u16) -> (i32, i32) {
        (
            column as i32 - self.x as i32,
            (row as i32 - self.y as i32) * 2,
        )
    }
}

pub fn render(stdout: &mut io::Stdout, app: &App) -> io::Result<()> {
    let (term_width, term_height) = app.term_size();
    let layout = app.layout();

    execute!(
        stdout,
        Hide,
        SetBackgroundColor(app.theme.bg),
        Clear(ClearType::All)
    )?;

    render_menu_bar(stdout, app, term_width)?;
    render_frame(stdout, app, &layout)?;
    render_board(stdout, app, &layout)?;
    render_status(stdout, app, &layout)?;
    render_controls(stdout, app, &layout, term_width)?;

    if app.celebration.is_active() {
        render_confetti(stdout, app)?;
    }

    if let Some(ref dialog) = app.dialog {
        render_dialog(stdout, app, dialog, term_width, term_height)?;
    }

    execute!(stdout, Show, MoveTo(0, 0))?;
    Ok(())
}

fn render_menu_bar(stdout: &mut io::Stdout, app: &App, term_width: u16) -> io::Result<()> {
    let theme = &app.theme;

    execute!(
        stdout,
        MoveTo(0, 0),
        SetBackgroundColor(theme.menu_bg),
        Print(" ".repeat(term_width as usize))
    )?;

    for item in MenuItem::ALL {
        let label = item.label();
        // First letter after the padding is the hotkey
        let (pad, rest) = label.split_at(1);
        let (hot, tail) = rest.split_at(1);
        execute!(
            stdout,
            MoveTo(item.column(), 0),
            SetForegroundColor(theme.fg),
            Print(pad),
            SetForegroundColor(theme.key),
            Print(hot),
            SetForegroundColor(theme.fg),
            Print(tail)
        )?;
    }

    let title = "Nine-Piece Puzzle ";
    execute!(
        stdout,
        MoveTo(term_width.saturating_sub(title.len() as u16), 0),
        SetForegroundColor(theme.info),
        Print(title),
        SetBackgroundColor(theme.bg)
    )?;
    Ok(())
}

fn render_frame(stdout: &mut io::Stdout, app: &App, layout: &BoardLayout) -> io::Result<()> {
    let color = match app.session.state() {
        GameState::Solved => app.theme.success,
        GameState::InProgress => app.theme.frame,
    };
    let left = layout.x.saturating_sub(1);
    let right = layout.x + layout.width;
    let horizontal = "─".repeat(layout.width as usize);

    execute!(
        stdout,
        SetBackgroundColor(app.theme.bg),
        SetForegroundColor(color),
        MoveTo(left, layout.y - 1),
        Print(format!("┌{}┐", horizontal)),
        MoveTo(left, layout.y + layout.height),
        Print(format!("└{}┘", horizontal))
    )?;
    for row in 0..layout.height {
        execute!(
            stdout,
            MoveTo(left, layout.y + row),
            Print("│"),
            MoveTo(right, layout.y + row),
            Print("│")
        )?;
    }
    Ok(())
}

fn render_board(stdout: &mut io::Stdout, app: &App, layout: &BoardLayout) -> io::Result<()> {
    let store = app.session.store();
    let edge = app.session.tile_edge();
    let empty = to_color(app.theme.empty);

    for row in 0..layout.height {
        queue!(stdout, MoveTo(layout.x, layout.y + row))?;
        for col in 0..layout.width {
            let x = col as u32;
            let top = pixel(store, edge, x, row as u32 * 2).unwrap_or(empty);
            let bottom = pixel(store, edge, x, row as u32 * 2 + 1).unwrap_or(empty);
            queue!(
                stdout,
                SetForegroundColor(from_rgb(top)),
                SetBackgroundColor(from_rgb(bottom)),
                Print('▀')
            )?;
        }
    }

    if app.show_labels {
        for tile in store.tiles() {
            let cell = tile.current();
            queue!(
                stdout,
                MoveTo(
                    layout.x + (cell.col as u32 * edge) as u16,
                    layout.y + (cell.row as u32 * edge / 2) as u16
                ),
                SetForegroundColor(app.theme.key),
                SetBackgroundColor(app.theme.bg),
                Print(tile.label())
            )?;
        }
    }

    stdout.flush()?;
    Ok(())
}

/// Picture pixel at board coordinate `(x, y)`, `None` over the gap
fn pixel(store: &TileStore<RgbImage>, edge: u32, x: u32, y: u32) -> Option<[u8; 3]> {
    let cell = Cell::checked((y / edge) as isize, (x / edge) as isize)?;
    let image = store.tile_at(cell)?.image();
    image.get_pixel_checked(x % edge, y % edge).map(|p| p.0)
}

fn from_rgb([r, g, b]: [u8; 3]) -> Color {
    Color::Rgb { r, g, b }
}

fn to_color(color: Color) -> [u8; 3] {
    match color {
        Color::Rgb { r, g, b } => [r, g, b],
        _ => [192, 192, 192],
    }
}

fn render_status(stdout: &mut io::Stdout, app: &App, layout: &BoardLayout) -> io::Result<()> {
    let theme = &app.theme;
    let y = layout.y + layout.height + 1;

    let (text, color) = if !app.session.is_playable() {
        ("No picture loaded".to_string(), theme.error)
    } else if let Some(ref msg) = app.message {
        (msg.clone(), theme.fg)
    } else {
        match app.session.state() {
            GameState::Solved => ("Solved!".to_string(), theme.success),
            GameState::InProgress => ("Click a tile next to the gap".to_string(), theme.info),
        }
    };

    let x = layout.x + layout.width.saturating_sub(text.chars().count() as u16) / 2;
    execute!(
        stdout,
        MoveTo(x, y),
        SetBackgroundColor(theme.bg),
        SetForegroundColor(color),
        Print(text)
    )?;
    Ok(())
}

fn render_controls(
    stdout: &mut io::Stdout,
    app: &App,
    layout: &BoardLayout,
    term_width: u16,
) -> io::Result<()> {
    let theme = &app.theme;

    let controls = [
        ("Click", "Slide"),
        ("Arrows", "Slide"),
        ("n", "New game"),
        ("a", "About"),
        ("#", "Labels"),
        ("t", "Theme"),
        ("q", "Quit"),
    ];

    let width: u16 = controls
        .iter()
        .map(|(k, d)| (k.len() + d.len() + 3) as u16)
        .sum();
    let x = term_width.saturating_sub(width) / 2;
    let y = layout.y + layout.height + 3;

    execute!(stdout, MoveTo(x, y), SetBackgroundColor(theme.bg))?;
    for (key, desc) in controls {
        execute!(
            stdout,
            SetForegroundColor(theme.key),
            Print(key),
            SetForegroundColor(theme.info),
            Print(format!(" {}  ", desc))
        )?;
    }
    Ok(())
}

fn render_confetti(stdout: &mut io::Stdout, app: &App) -> io::Result<()> {
    for particle in app.celebration.particles() {
        queue!(
            stdout,
            MoveTo(particle.x as u16, particle.y as u16),
            SetForegroundColor(particle.color),
            SetBackgroundColor(app.theme.bg),
            Print(particle.char)
        )?;
    }
    stdout.flush()
}

fn render_dialog(
    stdout: &mut io::Stdout,
    app: &App,
    dialog: &Dialog,
    term_width: u16,
    term_height: u16,
) -> io::Result<()> {
    let theme = &app.theme;
    let version = format!("Version {}", env!("CARGO_PKG_VERSION"));

    let (title, lines, border): (&str, Vec<String>, Color) = match dialog {
        Dialog::About => (
            "About",
            vec![
                "Nine-Piece Puzzle".to_string(),
                version,
                String::new(),
                "A 3x3 sliding picture puzzle.".to_string(),
                "Click a tile next to the gap".to_string(),
                "to slide it into place.".to_string(),
            ],
            theme.frame,
        ),
        Dialog::Error(msg) => (
            "Error",
            wrap_text(msg, 40),
            theme.error,
        ),
        Dialog::Victory => (
            "Victory",
            vec![
                "Congratulations!".to_string(),
                "You completed the puzzle.".to_string(),
                String::new(),
                "Press n for a new game".to_string(),
            ],
            hue_color(app.celebration.rainbow_offset()),
        ),
    };

    let inner = lines
        .iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(0)
        .max(title.len() + 4) as u16;
    let box_width = inner + 4;
    let box_height = lines.len() as u16 + 4;
    let x = term_width.saturating_sub(box_width) / 2;
    let y = term_height.saturating_sub(box_height) / 2;

    // Background
    for row in 0..box_height {
        execute!(
            stdout,
            MoveTo(x, y + row),
            SetBackgroundColor(theme.dialog_bg),
            Print(" ".repeat(box_width as usize))
        )?;
    }

    // Border
    execute!(stdout, SetForegroundColor(border))?;
    execute!(
        stdout,
        MoveTo(x, y),
        Print("┌"),
        Print("─".repeat(box_width as usize - 2)),
        Print("┐")
    )?;
    for row in 1..box_height - 1 {
        execute!(stdout, MoveTo(x, y + row), Print("│"))?;
        execute!(stdout, MoveTo(x + box_width - 1, y + row), Print("│"))?;
    }
    execute!(
        stdout,
        MoveTo(x, y + box_height - 1),
        Print("└"),
        Print("─".repeat(box_width as usize - 2)),
        Print("┘")
    )?;

    // Title
    let title = format!(" {} ", title);
    execute!(
        stdout,
        MoveTo(x + (box_width.saturating_sub(title.len() as u16)) / 2, y),
        SetForegroundColor(border),
        Print(title)
    )?;

    for (i, line) in lines.iter().enumerate() {
        execute!(
            stdout,
            MoveTo(x + 2, y + 2 + i as u16),
            SetForegroundColor(theme.fg),
            Print(format!("{:^width$}", line, width = inner as usize))
        )?;
    }

    Ok(())
}

fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if !current.is_empty() && current.chars().count() + word.chars().count() + 1 > max_width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_source::slice;
    use image::Rgb;
    use ninepiece_core::SlideBoard;

    #[test]
    fn test_layout_centers_board() {
        let layout = BoardLayout::new(80, 40, 48);
        assert_eq!(layout.width, 48);
        assert_eq!(layout.height, 24);
        assert_eq!(layout.x, 16);
        assert_eq!(layout.y, 3);
    }

    #[test]
    fn test_pixel_at_doubles_rows() {
        let layout = BoardLayout::new(80, 40, 48);
        assert_eq!(layout.pixel_at(16, 3), (0, 0));
        assert_eq!(layout.pixel_at(17, 4), (1, 2));
        assert_eq!(layout.pixel_at(15, 2), (-1, -2));
    }

    #[test]
    fn test_pixel_follows_tile_positions() {
        let picture = RgbImage::from_fn(6, 6, |x, y| Rgb([(x / 2) as u8, (y / 2) as u8, 1]));
        let mut store = slice(&picture, 2);

        assert_eq!(pixel(&store, 2, 0, 0), Some([0, 0, 1]));
        assert_eq!(pixel(&store, 2, 5, 5), None);

        store.try_swap(Cell::new(2, 1));
        // Tile from (2, 1) now shows in the corner, the gap at (2, 1)
        assert_eq!(pixel(&store, 2, 5, 5), Some([1, 2, 1]));
        assert_eq!(pixel(&store, 2, 3, 4), None);
        assert_eq!(pixel(&store, 2, 6, 0), None);
    }

    #[test]
    fn test_wrap_text() {
        let lines = wrap_text("cannot load picture descarga.jpeg: No such file", 20);
        assert!(lines.iter().all(|l| l.chars().count() <= 20));
        assert_eq!(lines.join(" "), "cannot load picture descarga.jpeg: No such file");
    }
}
