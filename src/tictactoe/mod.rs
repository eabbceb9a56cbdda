//! Tic-Tac-Toe with a player-vs-player mode and a minimax bot.

pub mod board;
pub mod bot;
pub mod game;
pub mod player;

pub use board::{BitBoard, GameResult, InvalidMoveError, PlayerMarker, PossibleMoves};
pub use bot::{best_move, minimax, random_move, Decision, Difficulty};
pub use game::{Mode, Phase, Scoreboard, TicTacToe, BOT_DELAY};
pub use player::{Arena, BotPlayer, MinimaxPlayer, Player, RandomPlayer, Tally};
