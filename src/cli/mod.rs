pub mod arena;
pub mod human;
pub mod logging;
pub mod puzzle;
pub mod snake;
pub mod tictactoe;
