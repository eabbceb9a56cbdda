use std::{fmt, str::FromStr};

use rand::{seq::SliceRandom, Rng};

use super::board::{BitBoard, PlayerMarker};
use crate::error::Error;

/// Leaf score of a board won by O; a board won by X scores the negation.
pub const WIN_SCORE: i32 = 10;

/// Chance that a medium bot plays the minimax move instead of a random one.
pub const MEDIUM_OPTIMAL_CHANCE: f64 = 0.5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Decision {
    /// `None` on terminal boards.
    pub index: Option<usize>,
    pub score: i32,
}

/// Exhaustive minimax, scored from O's point of view.
///
/// O maximizes, X minimizes. Candidates are scanned in ascending index and a
/// later candidate only replaces the current best when strictly better, so
/// ties go to the lowest index. No depth discount: a win in one and a win in
/// five score the same.
pub fn minimax(board: &BitBoard, player: PlayerMarker) -> Decision {
    let possible_moves = board.get_possible_moves();

    match board.get_winner() {
        Some(PlayerMarker::O) => return Decision { index: None, score: WIN_SCORE },
        Some(PlayerMarker::X) => return Decision { index: None, score: -WIN_SCORE },
        _ => {}
    }
    if possible_moves.is_empty() || player == PlayerMarker::Empty {
        return Decision { index: None, score: 0 };
    }

    let mut best: Option<Decision> = None;
    for &move_ in &possible_moves {
        let score = minimax(&board.with(move_, player), player.to_other()).score;
        let better = match best {
            None => true,
            Some(current) if player == PlayerMarker::O => score > current.score,
            Some(current) => score < current.score,
        };
        if better {
            best = Some(Decision { index: Some(move_), score });
        }
    }

    best.unwrap_or(Decision { index: None, score: 0 })
}

/// The bot's optimal move; the bot always plays O.
pub fn best_move(board: &BitBoard) -> Option<usize> {
    minimax(board, PlayerMarker::O).index
}

pub fn random_move<R: Rng + ?Sized>(board: &BitBoard, rng: &mut R) -> Option<usize> {
    board.get_possible_moves().as_slice().choose(rng).copied()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Picks a move for `player`. In a match the bot is always O.
    pub fn choose_move<R: Rng + ?Sized>(&self, board: &BitBoard, player: PlayerMarker, rng: &mut R) -> Option<usize> {
        match self {
            Difficulty::Easy => random_move(board, rng),
            Difficulty::Medium => {
                if rng.gen_bool(MEDIUM_OPTIMAL_CHANCE) {
                    minimax(board, player).index
                } else {
                    random_move(board, rng)
                }
            }
            Difficulty::Hard => minimax(board, player).index,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Difficulty {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::Unknown {
                kind: "difficulty",
                name: s.to_string(),
            })
    }
}
