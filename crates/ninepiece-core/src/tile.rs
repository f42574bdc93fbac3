use crate::cell::{Cell, GRID_SIZE};
use std::fmt;

const CELL_COUNT: usize = GRID_SIZE * GRID_SIZE;

/// One movable square of the picture
#[derive(Debug, Clone)]
pub struct Tile<I> {
    image: I,
    original: Cell,
    pub(crate) current: Cell,
}

impl<I> Tile<I> {
    /// The slice of the source picture this tile shows
    pub fn image(&self) -> &I {
        &self.image
    }

    /// Cell the tile must occupy for the puzzle to be solved
    pub fn original(&self) -> Cell {
        self.original
    }

    /// Cell the tile occupies right now
    pub fn current(&self) -> Cell {
        self.current
    }

    pub fn is_home(&self) -> bool {
        self.current == self.original
    }

    /// 1-based label by original position, as printed on numbered boards
    pub fn label(&self) -> usize {
        self.original.index() + 1
    }
}

/// The set of tiles plus the single empty cell
#[derive(Debug, Clone)]
pub struct TileStore<I> {
    tiles: Vec<Tile<I>>,
    /// Tile index occupying each cell, by row-major cell index
    slots: [Option<usize>; CELL_COUNT],
    pub(crate) empty: Cell,
}

impl<I> TileStore<I> {
    /// Create the solved board: one tile per cell except the bottom-right
    pub fn from_fn(mut image_for: impl FnMut(Cell) -> I) -> Self {
        let mut store = Self::unavailable();
        for cell in Cell::all().filter(|&cell| cell != Cell::TARGET_EMPTY) {
            store.slots[cell.index()] = Some(store.tiles.len());
            store.tiles.push(Tile {
                image: image_for(cell),
                original: cell,
                current: cell,
            });
        }
        store
    }

    /// A board with no tiles, used when the picture could not be loaded
    pub fn unavailable() -> Self {
        Self {
            tiles: Vec::with_capacity(CELL_COUNT - 1),
            slots: [None; CELL_COUNT],
            empty: Cell::TARGET_EMPTY,
        }
    }

    pub fn tiles(&self) -> &[Tile<I>] {
        &self.tiles
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn empty_cell(&self) -> Cell {
        self.empty
    }

    /// The tile currently sitting at `cell`, `None` for the empty cell
    pub fn tile_at(&self, cell: Cell) -> Option<&Tile<I>> {
        self.slots[cell.index()].map(|idx| &self.tiles[idx])
    }

    /// Every tile is home and the gap is back in the bottom-right corner.
    ///
    /// The empty-cell check is kept even though the tile check implies it on
    /// a consistent board.
    pub fn is_solved(&self) -> bool {
        self.tiles.iter().all(Tile::is_home) && self.empty == Cell::TARGET_EMPTY
    }

    /// Tile cells plus the empty cell cover the grid exactly once
    pub fn is_bijective(&self) -> bool {
        if self.tiles.len() != CELL_COUNT - 1 {
            return false;
        }
        let mut seen = [false; CELL_COUNT];
        for cell in self.tiles.iter().map(Tile::current).chain([self.empty]) {
            if std::mem::replace(&mut seen[cell.index()], true) {
                return false;
            }
        }
        seen.iter().all(|&s| s)
    }

    /// Move the tile at `target` into the empty cell. Returns false if no
    /// tile is there.
    pub(crate) fn swap_with_empty(&mut self, target: Cell) -> bool {
        let Some(idx) = self.slots[target.index()] else {
            return false;
        };

        let old_empty = self.empty;
        self.tiles[idx].current = old_empty;
        self.slots[old_empty.index()] = Some(idx);
        self.slots[target.index()] = None;
        self.empty = target;

        debug_assert!(self.is_bijective());
        true
    }
}

impl<I> fmt::Display for TileStore<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..GRID_SIZE {
            for col in 0..GRID_SIZE {
                match self.tile_at(Cell::new(row, col)) {
                    Some(tile) => write!(f, "{:2} ", tile.label())?,
                    None => write!(f, " . ")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
