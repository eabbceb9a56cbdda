//! 3×3 sliding picture puzzle with a move counter and a clock.

pub mod game;
pub mod photo;

pub use game::{format_time, MoveOutcome, SlidingPuzzle, BLANK, TILE_COUNT};
pub use photo::Photo;
