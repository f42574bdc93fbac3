//! Tile state machine for a 3x3 sliding picture puzzle.
//!
//! The board is a [`TileStore`] of eight tiles and one gap. Moves go through
//! the [`SlideBoard`] swap primitive, which both the [`Shuffler`] and the
//! click-driven [`InputMapper`] use. A [`GameSession`] ties them together
//! for a presentation layer.

pub mod cell;
pub mod engine;
pub mod input;
pub mod session;
pub mod shuffle;
pub mod tile;

pub use cell::{Cell, GRID_SIZE};
pub use engine::{legal_adjacent_cells, Direction, Slide, SlideBoard};
pub use input::{ClickOutcome, GameView, InputMapper};
pub use session::{GameSession, GameState};
pub use shuffle::{Shuffler, DEFAULT_SHUFFLE_MOVES};
pub use tile::{Tile, TileStore};
