use crate::cell::Cell;
use crate::tile::TileStore;
use tracing::{debug, trace};

/// Direction a tile slides when driven from the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Offset from the empty cell to the tile that slides in this direction.
    /// Sliding up pulls the tile below the gap.
    pub fn as_offset(&self) -> (isize, isize) {
        match self {
            Direction::Up => (1, 0),
            Direction::Down => (-1, 0),
            Direction::Left => (0, 1),
            Direction::Right => (0, -1),
        }
    }
}

/// One completed swap: the tile at `from` moved into the gap at `to`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slide {
    pub from: Cell,
    pub to: Cell,
}

impl Slide {
    /// The swap target that undoes this slide
    pub fn reversed(&self) -> Cell {
        self.to
    }
}

/// In-bounds up/down/left/right neighbours of the empty cell
pub fn legal_adjacent_cells(empty: Cell) -> Vec<Cell> {
    [(-1, 0), (1, 0), (0, -1), (0, 1)]
        .into_iter()
        .filter_map(|(dr, dc)| empty.offset(dr, dc))
        .collect()
}

/// The swap primitive shared by the shuffler and the click handler.
///
/// `try_swap` does not look at adjacency; callers only hand it cells from
/// [`legal_adjacent_cells`].
pub trait SlideBoard {
    fn empty_cell(&self) -> Cell;

    /// Move the tile at `target` into the empty cell. Returns false and
    /// leaves the board untouched if `target` holds no tile.
    fn try_swap(&mut self, target: Cell) -> bool;

    fn is_solved(&self) -> bool;

    /// Swap and describe what happened, `None` if nothing moved
    fn slide(&mut self, target: Cell) -> Option<Slide> {
        let to = self.empty_cell();
        self.try_swap(target).then_some(Slide { from: target, to })
    }
}

impl<I> SlideBoard for TileStore<I> {
    fn empty_cell(&self) -> Cell {
        self.empty
    }

    fn try_swap(&mut self, target: Cell) -> bool {
        let from_empty = self.empty;
        if self.swap_with_empty(target) {
            debug!(%target, %from_empty, "swapped tile into gap");
            true
        } else {
            trace!(%target, "no tile to swap");
            false
        }
    }

    fn is_solved(&self) -> bool {
        TileStore::is_solved(self)
    }
}
