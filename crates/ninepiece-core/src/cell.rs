use std::fmt;

/// Number of rows and columns on the board
pub const GRID_SIZE: usize = 3;

/// A position on the 3x3 board
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    /// The cell that must be empty for the puzzle to count as solved
    pub const TARGET_EMPTY: Cell = Cell::new(GRID_SIZE - 1, GRID_SIZE - 1);

    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Build a cell from signed coordinates, `None` if it falls off the board
    pub fn checked(row: isize, col: isize) -> Option<Self> {
        let in_range = |v: isize| v >= 0 && (v as usize) < GRID_SIZE;
        if in_range(row) && in_range(col) {
            Some(Self::new(row as usize, col as usize))
        } else {
            None
        }
    }

    /// All cells in row-major order
    pub fn all() -> impl Iterator<Item = Cell> {
        (0..GRID_SIZE).flat_map(|row| (0..GRID_SIZE).map(move |col| Cell::new(row, col)))
    }

    /// Row-major index in `0..9`
    pub fn index(&self) -> usize {
        self.row * GRID_SIZE + self.col
    }

    /// True if `other` is exactly one step away along a single axis
    pub fn is_adjacent(&self, other: Cell) -> bool {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col) == 1
    }

    /// Neighbour at a signed offset, if it stays on the board
    pub fn offset(&self, d_row: isize, d_col: isize) -> Option<Cell> {
        Cell::checked(self.row as isize + d_row, self.col as isize + d_col)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
