use crate::cell::{Cell, GRID_SIZE};
use crate::engine::{Slide, SlideBoard};
use tracing::trace;

/// Receives fire-and-forget signals from the core after a move
pub trait GameView {
    /// The board changed and should be drawn again
    fn redraw(&mut self);

    /// The last move solved the puzzle
    fn solved(&mut self);
}

/// What a click did to the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The pointer was outside the board
    OutOfBounds,
    /// The clicked cell is not next to the gap (or is the gap)
    NotAdjacent(Cell),
    /// A tile slid into the gap
    Moved(Slide),
    /// A tile slid and the picture is complete
    Solved(Slide),
    /// The game is already won; clicks are ignored until a new game
    Finished,
}

impl ClickOutcome {
    pub fn moved(&self) -> bool {
        matches!(self, ClickOutcome::Moved(_) | ClickOutcome::Solved(_))
    }
}

/// Turns pointer coordinates into moves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputMapper {
    tile_edge: u32,
}

impl InputMapper {
    /// `tile_edge` is the side of one tile in pixels, kept within
    /// `1..=i32::MAX` so it divides pixel coordinates
    pub fn new(tile_edge: u32) -> Self {
        Self {
            tile_edge: tile_edge.clamp(1, i32::MAX as u32),
        }
    }

    pub fn tile_edge(&self) -> u32 {
        self.tile_edge
    }

    /// Side of the whole board in pixels
    pub fn board_edge(&self) -> u32 {
        self.tile_edge.saturating_mul(GRID_SIZE as u32)
    }

    /// Cell under a pixel, `None` when off the board
    pub fn cell_at(&self, px: i32, py: i32) -> Option<Cell> {
        let edge = self.tile_edge as i32;
        let col = px.div_euclid(edge);
        let row = py.div_euclid(edge);
        Cell::checked(row as isize, col as isize)
    }

    /// Handle a click at pixel `(px, py)`
    pub fn on_click<B, V>(&self, board: &mut B, px: i32, py: i32, view: &mut V) -> ClickOutcome
    where
        B: SlideBoard,
        V: GameView,
    {
        match self.cell_at(px, py) {
            Some(cell) => self.on_cell(board, cell, view),
            None => {
                trace!(px, py, "click outside board");
                ClickOutcome::OutOfBounds
            }
        }
    }

    /// Slide the tile at `cell` if it is next to the gap
    pub fn on_cell<B, V>(&self, board: &mut B, cell: Cell, view: &mut V) -> ClickOutcome
    where
        B: SlideBoard,
        V: GameView,
    {
        if !cell.is_adjacent(board.empty_cell()) {
            trace!(%cell, empty = %board.empty_cell(), "cell not next to gap");
            return ClickOutcome::NotAdjacent(cell);
        }

        let Some(slide) = board.slide(cell) else {
            return ClickOutcome::NotAdjacent(cell);
        };

        view.redraw();
        if board.is_solved() {
            view.solved();
            ClickOutcome::Solved(slide)
        } else {
            ClickOutcome::Moved(slide)
        }
    }
}
