use crate::cell::Cell;
use crate::engine::Direction;
use crate::input::{ClickOutcome, GameView, InputMapper};
use crate::shuffle::Shuffler;
use crate::tile::TileStore;
use tracing::{debug, info};

/// Observable state of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    InProgress,
    Solved,
}

/// One running puzzle: owns the board and everything that mutates it
#[derive(Debug, Clone)]
pub struct GameSession<I> {
    store: TileStore<I>,
    shuffler: Shuffler,
    mapper: InputMapper,
    state: GameState,
}

impl<I> GameSession<I> {
    /// Start a game on `store`, shuffling it once
    pub fn new(store: TileStore<I>, shuffler: Shuffler, mapper: InputMapper) -> Self {
        let mut session = Self {
            store,
            shuffler,
            mapper,
            state: GameState::InProgress,
        };
        session.new_game();
        session
    }

    /// Shuffle again from the current arrangement, not from the solution.
    ///
    /// The state is `InProgress` afterwards even if the shuffle happened to
    /// land on the solution.
    pub fn new_game(&mut self) {
        let slides = self.shuffler.shuffle(&mut self.store);
        self.state = GameState::InProgress;
        info!(
            slides = slides.len(),
            playable = self.is_playable(),
            "new game"
        );
        debug!("board after shuffle:\n{}", self.store);
    }

    /// Handle a click at board pixel `(px, py)`
    pub fn on_click<V: GameView>(&mut self, px: i32, py: i32, view: &mut V) -> ClickOutcome {
        if self.state == GameState::Solved {
            return ClickOutcome::Finished;
        }
        let outcome = self.mapper.on_click(&mut self.store, px, py, view);
        self.record(outcome)
    }

    /// Keyboard move: slide the neighbouring tile in `direction` into the gap
    pub fn slide<V: GameView>(&mut self, direction: Direction, view: &mut V) -> ClickOutcome {
        if self.state == GameState::Solved {
            return ClickOutcome::Finished;
        }
        let (dr, dc) = direction.as_offset();
        let Some(cell) = self.store.empty_cell().offset(dr, dc) else {
            return ClickOutcome::OutOfBounds;
        };
        let outcome = self.mapper.on_cell(&mut self.store, cell, view);
        self.record(outcome)
    }

    fn record(&mut self, outcome: ClickOutcome) -> ClickOutcome {
        if let ClickOutcome::Solved(_) = outcome {
            self.state = GameState::Solved;
            info!("puzzle solved");
        }
        outcome
    }

    pub fn store(&self) -> &TileStore<I> {
        &self.store
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_solved(&self) -> bool {
        self.store.is_solved()
    }

    pub fn empty_cell(&self) -> Cell {
        self.store.empty_cell()
    }

    /// False when the picture never loaded and the board has no tiles
    pub fn is_playable(&self) -> bool {
        !self.store.is_empty()
    }

    pub fn tile_edge(&self) -> u32 {
        self.mapper.tile_edge()
    }

    /// Pixel geometry of the board
    pub fn mapper(&self) -> &InputMapper {
        &self.mapper
    }
}
