//! Shuffle a numbered board and walk it back to the solution

use ninepiece_core::{Shuffler, SlideBoard, TileStore};

fn main() {
    let mut board = TileStore::from_fn(|cell| cell.index() + 1);
    println!("Solved board:\n{}", board);

    let mut shuffler = Shuffler::with_seed(2024, 30);
    let history = shuffler.shuffle(&mut board);
    println!("After {} slides:\n{}", history.len(), board);
    println!("Solved? {}\n", board.is_solved());

    for slide in history.iter().rev() {
        board.try_swap(slide.reversed());
    }
    println!("Unwound:\n{}", board);
    println!("Solved? {}", board.is_solved());
}
