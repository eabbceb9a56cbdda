//! Three terminal mini-games: Snake, a 3×3 sliding puzzle and Tic-Tac-Toe
//! against a minimax bot.
//!
//! Each game core is a plain value driven by its frontend: input arrives
//! through one method per event kind and time through `advance(now)`, where
//! `now` is the logical clock shared with [`schedule::Timers`].

pub mod audio;
pub mod color;
pub mod error;
pub mod puzzle;
pub mod schedule;
pub mod snake;
pub mod store;
pub mod tictactoe;

pub use error::{Error, Result};
