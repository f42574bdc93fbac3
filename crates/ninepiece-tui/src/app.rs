use crate::celebration::Celebration;
use crate::config::ThemeChoice;
use crate::render::BoardLayout;
use crate::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use image::RgbImage;
use ninepiece_core::{ClickOutcome, Direction, GameSession, GameView};
use std::time::Duration;
use tracing::{debug, info};

/// Result of handling an input event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    Continue,
    Quit,
}

/// Entries of the menu bar on the top line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    NewGame,
    Exit,
    About,
}

impl MenuItem {
    pub const ALL: [MenuItem; 3] = [MenuItem::NewGame, MenuItem::Exit, MenuItem::About];

    pub fn label(&self) -> &'static str {
        match self {
            MenuItem::NewGame => " New Game ",
            MenuItem::Exit => " Exit ",
            MenuItem::About => " About ",
        }
    }

    /// Column where the label starts on the menu line
    pub fn column(&self) -> u16 {
        let mut x = 1;
        for item in Self::ALL {
            if item == *self {
                break;
            }
            x += item.label().len() as u16 + 1;
        }
        x
    }

    /// Menu entry under a column of the top line
    pub fn at(column: u16) -> Option<MenuItem> {
        Self::ALL.into_iter().find(|item| {
            let start = item.column();
            (start..start + item.label().len() as u16).contains(&column)
        })
    }
}

/// Modal box shown over the board
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dialog {
    About,
    Error(String),
    Victory,
}

/// Signals collected from the core during one input event
#[derive(Debug, Default)]
struct FrameSignals {
    redraw: bool,
    solved: bool,
}

impl GameView for FrameSignals {
    fn redraw(&mut self) {
        self.redraw = true;
    }

    fn solved(&mut self) {
        self.solved = true;
    }
}

/// The main application state
pub struct App {
    /// Current game
    pub session: GameSession<RgbImage>,
    /// Color theme
    pub theme: Theme,
    theme_choice: ThemeChoice,
    /// Open dialog, if any
    pub dialog: Option<Dialog>,
    /// Whether tile numbers are drawn on the picture
    pub show_labels: bool,
    /// Message to display
    pub message: Option<String>,
    /// Message timer
    message_timer: u32,
    pub celebration: Celebration,
    signals: FrameSignals,
    term_size: (u16, u16),
    needs_redraw: bool,
}

impl App {
    pub fn new(session: GameSession<RgbImage>, theme: ThemeChoice, show_labels: bool) -> Self {
        Self {
            session,
            theme: theme.theme(),
            theme_choice: theme,
            dialog: None,
            show_labels,
            message: None,
            message_timer: 0,
            celebration: Celebration::new(),
            signals: FrameSignals::default(),
            term_size: (80, 24),
            needs_redraw: true,
        }
    }

    /// Get the tick rate based on whether anything is animating
    pub fn get_tick_rate(&self) -> Duration {
        if self.celebration.is_active() {
            Duration::from_millis(33)
        } else {
            Duration::from_millis(100)
        }
    }

    /// Update animations and timers (called every tick)
    pub fn tick(&mut self) {
        if self.message_timer > 0 {
            self.message_timer -= 1;
            if self.message_timer == 0 {
                self.message = None;
                self.needs_redraw = true;
            }
        }

        if self.celebration.is_active() {
            self.celebration.update();
            self.needs_redraw = true;
        }
    }

    /// True if the screen should be drawn; clears the request
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.term_size = (width, height);
        self.needs_redraw = true;
    }

    pub fn term_size(&self) -> (u16, u16) {
        self.term_size
    }

    pub fn layout(&self) -> BoardLayout {
        BoardLayout::new(
            self.term_size.0,
            self.term_size.1,
            self.session.mapper().board_edge(),
        )
    }

    /// Show a temporary message
    pub fn show_message(&mut self, msg: &str) {
        self.message = Some(msg.to_string());
        self.message_timer = 30; // ~3 seconds at 100ms poll
        self.needs_redraw = true;
    }

    /// Report a problem in a blocking dialog
    pub fn show_error(&mut self, msg: impl Into<String>) {
        self.dialog = Some(Dialog::Error(msg.into()));
        self.needs_redraw = true;
    }

    /// Re-shuffle the current board
    pub fn new_game(&mut self) {
        self.session.new_game();
        self.celebration.stop();
        self.dialog = None;
        if self.session.is_playable() {
            self.show_message("New game");
        }
        self.needs_redraw = true;
    }

    /// Handle a key press
    pub fn handle_key(&mut self, key: KeyEvent) -> AppAction {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('q') if ctrl => return AppAction::Quit,
            KeyCode::Char('n') if ctrl => {
                self.new_game();
                return AppAction::Continue;
            }
            _ => {}
        }

        if self.dialog.is_some() {
            return self.handle_dialog_key(key);
        }

        match key.code {
            KeyCode::Char('q') => return AppAction::Quit,
            KeyCode::Char('n') => self.new_game(),
            KeyCode::Char('a') | KeyCode::F(1) => self.open_dialog(Dialog::About),

            // Slide the tile on the far side of the gap towards it
            KeyCode::Up | KeyCode::Char('k') => self.slide(Direction::Up),
            KeyCode::Down | KeyCode::Char('j') => self.slide(Direction::Down),
            KeyCode::Left | KeyCode::Char('h') => self.slide(Direction::Left),
            KeyCode::Right | KeyCode::Char('l') => self.slide(Direction::Right),

            KeyCode::Char('#') => {
                self.show_labels = !self.show_labels;
                self.needs_redraw = true;
            }
            KeyCode::Char('t') => {
                self.theme_choice = self.theme_choice.next();
                self.theme = self.theme_choice.theme();
                let msg = format!("Theme: {}", self.theme_choice.name());
                self.show_message(&msg);
            }
            _ => {}
        }
        AppAction::Continue
    }

    fn handle_dialog_key(&mut self, key: KeyEvent) -> AppAction {
        let victory = self.dialog == Some(Dialog::Victory);
        match key.code {
            KeyCode::Char('q') => return AppAction::Quit,
            KeyCode::Char('n') if victory => self.new_game(),
            _ => self.close_dialog(),
        }
        AppAction::Continue
    }

    /// Handle a mouse event
    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> AppAction {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return AppAction::Continue;
        }

        if self.dialog.is_some() {
            self.close_dialog();
            return AppAction::Continue;
        }

        if mouse.row == 0 {
            return match MenuItem::at(mouse.column) {
                Some(item) => self.activate(item),
                None => AppAction::Continue,
            };
        }

        let (px, py) = self.layout().pixel_at(mouse.column, mouse.row);
        let outcome = self.session.on_click(px, py, &mut self.signals);
        debug!(column = mouse.column, row = mouse.row, px, py, ?outcome, "click");
        self.report_finished(outcome);
        self.absorb_signals();
        AppAction::Continue
    }

    /// Run a menu bar entry
    pub fn activate(&mut self, item: MenuItem) -> AppAction {
        match item {
            MenuItem::NewGame => self.new_game(),
            MenuItem::Exit => return AppAction::Quit,
            MenuItem::About => self.open_dialog(Dialog::About),
        }
        AppAction::Continue
    }

    fn slide(&mut self, direction: Direction) {
        let outcome = self.session.slide(direction, &mut self.signals);
        self.report_finished(outcome);
        self.absorb_signals();
    }

    /// Remind the player that a solved board waits for a new game
    fn report_finished(&mut self, outcome: ClickOutcome) {
        if outcome == ClickOutcome::Finished {
            self.show_message("Solved! Press n for a new game");
        }
    }

    fn absorb_signals(&mut self) {
        let signals = std::mem::take(&mut self.signals);
        if signals.redraw {
            self.needs_redraw = true;
        }
        if signals.solved {
            info!("showing victory");
            self.open_dialog(Dialog::Victory);
            let (w, h) = self.term_size;
            self.celebration.start(w, h);
        }
    }

    fn open_dialog(&mut self, dialog: Dialog) {
        self.dialog = Some(dialog);
        self.needs_redraw = true;
    }

    fn close_dialog(&mut self) {
        self.dialog = None;
        self.needs_redraw = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_source::generated_tiles;
    use crossterm::event::KeyEventState;
    use ninepiece_core::{Cell, GameState, InputMapper, Shuffler, TileStore};

    const EDGE: u32 = 8;

    /// App on an unshuffled board in an 80x24 terminal
    fn solved_app() -> App {
        let session = GameSession::new(
            generated_tiles(EDGE),
            Shuffler::with_seed(0, 0),
            InputMapper::new(EDGE),
        );
        let mut app = App::new(session, ThemeChoice::Dark, false);
        app.resize(80, 24);
        app
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: crossterm::event::KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    /// Terminal position in the middle of a board cell
    fn screen_pos(app: &App, cell: Cell) -> (u16, u16) {
        let layout = app.layout();
        let chars_per_tile_row = (EDGE / 2) as u16;
        (
            layout.x + cell.col as u16 * EDGE as u16 + EDGE as u16 / 2,
            layout.y + cell.row as u16 * chars_per_tile_row + 1,
        )
    }

    #[test]
    fn test_click_next_to_gap_moves_tile() {
        let mut app = solved_app();
        app.take_redraw();
        let (x, y) = screen_pos(&app, Cell::new(2, 1));

        app.handle_mouse(click(x, y));

        assert_eq!(app.session.empty_cell(), Cell::new(2, 1));
        assert!(app.take_redraw());
    }

    #[test]
    fn test_click_far_from_gap_does_not_redraw() {
        let mut app = solved_app();
        app.take_redraw();
        let (x, y) = screen_pos(&app, Cell::new(0, 0));

        app.handle_mouse(click(x, y));

        assert_eq!(app.session.empty_cell(), Cell::TARGET_EMPTY);
        assert!(!app.take_redraw());
    }

    #[test]
    fn test_click_left_of_board_is_ignored() {
        let mut app = solved_app();
        let layout = app.layout();
        let (_, y) = screen_pos(&app, Cell::new(2, 1));

        app.handle_mouse(click(layout.x - 1, y));

        assert_eq!(app.session.empty_cell(), Cell::TARGET_EMPTY);
    }

    #[test]
    fn test_solving_opens_victory() {
        let mut app = solved_app();
        app.handle_key(key(KeyCode::Down));
        assert_eq!(app.session.empty_cell(), Cell::new(1, 2));
        assert!(app.dialog.is_none());

        app.handle_key(key(KeyCode::Up));
        assert_eq!(app.session.state(), GameState::Solved);
        assert_eq!(app.dialog, Some(Dialog::Victory));
        assert!(app.celebration.is_active());

        // 'n' from the victory box starts over
        app.handle_key(key(KeyCode::Char('n')));
        assert!(app.dialog.is_none());
        assert_eq!(app.session.state(), GameState::InProgress);
        assert!(!app.celebration.is_active());
    }

    #[test]
    fn test_click_on_solved_board_reminds_of_new_game() {
        let mut app = solved_app();
        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Up));
        assert_eq!(app.dialog, Some(Dialog::Victory));
        app.handle_key(key(KeyCode::Esc));
        assert!(app.message.is_none());

        let (x, y) = screen_pos(&app, Cell::new(2, 1));
        assert_eq!(app.handle_mouse(click(x, y)), AppAction::Continue);

        assert_eq!(app.session.empty_cell(), Cell::TARGET_EMPTY);
        assert_eq!(
            app.message.as_deref(),
            Some("Solved! Press n for a new game")
        );
    }

    #[test]
    fn test_menu_bar_clicks() {
        let mut app = solved_app();
        let about = MenuItem::About.column();
        assert_eq!(app.handle_mouse(click(about + 1, 0)), AppAction::Continue);
        assert_eq!(app.dialog, Some(Dialog::About));

        // Any click closes the dialog without touching the board
        app.handle_mouse(click(about + 1, 0));
        assert!(app.dialog.is_none());

        let exit = MenuItem::Exit.column();
        assert_eq!(app.handle_mouse(click(exit, 0)), AppAction::Quit);
    }

    #[test]
    fn test_menu_items_do_not_overlap() {
        assert_eq!(MenuItem::at(0), None);
        for item in MenuItem::ALL {
            assert_eq!(MenuItem::at(item.column()), Some(item));
            let end = item.column() + item.label().len() as u16 - 1;
            assert_eq!(MenuItem::at(end), Some(item));
        }
    }

    #[test]
    fn test_keys() {
        let mut app = solved_app();
        assert_eq!(app.handle_key(key(KeyCode::F(1))), AppAction::Continue);
        assert_eq!(app.dialog, Some(Dialog::About));
        app.handle_key(key(KeyCode::Esc));
        assert!(app.dialog.is_none());

        app.handle_key(key(KeyCode::Char('t')));
        assert_eq!(app.message.as_deref(), Some("Theme: Light"));

        let labels = app.show_labels;
        app.handle_key(key(KeyCode::Char('#')));
        assert_ne!(app.show_labels, labels);

        assert_eq!(app.handle_key(key(KeyCode::Char('q'))), AppAction::Quit);
        let ctrl_q = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert_eq!(app.handle_key(ctrl_q), AppAction::Quit);
    }

    #[test]
    fn test_error_dialog_on_unplayable_board() {
        let session = GameSession::new(
            TileStore::unavailable(),
            Shuffler::with_seed(0, 10),
            InputMapper::new(EDGE),
        );
        let mut app = App::new(session, ThemeChoice::Dark, false);
        app.show_error("cannot load picture descarga.jpeg");
        assert!(matches!(app.dialog, Some(Dialog::Error(_))));

        app.handle_key(key(KeyCode::Enter));
        assert!(app.dialog.is_none());

        let (x, y) = screen_pos(&app, Cell::new(2, 1));
        app.handle_mouse(click(x, y));
        assert!(!app.session.is_playable());
        assert!(app.dialog.is_none());
    }

    #[test]
    fn test_message_expires() {
        let mut app = solved_app();
        app.show_message("hello");
        for _ in 0..30 {
            app.tick();
        }
        assert!(app.message.is_none());
    }
}
