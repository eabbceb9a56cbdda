use std::fmt;

use colored::Colorize;
use rand::{rngs::ThreadRng, Rng};

use super::{
    board::{BitBoard, GameResult, PlayerMarker},
    bot::{minimax, random_move, Difficulty},
};

// ##############################
// # Player
// ##############################

pub trait Player {
    /// Chooses a cell for `marker`. `None` only when no cell is left.
    fn get_move(&mut self, board: &BitBoard, marker: PlayerMarker) -> Option<usize>;

    fn name(&self) -> String;
}

#[derive(Clone, Debug)]
pub struct RandomPlayer<R = ThreadRng> {
    rng: R,
}

impl RandomPlayer {
    pub fn new() -> Self {
        RandomPlayer { rng: rand::thread_rng() }
    }
}

impl<R: Rng> RandomPlayer<R> {
    pub fn with_rng(rng: R) -> Self {
        RandomPlayer { rng }
    }
}

impl<R: Rng> Player for RandomPlayer<R> {
    fn get_move(&mut self, board: &BitBoard, _marker: PlayerMarker) -> Option<usize> {
        random_move(board, &mut self.rng)
    }

    fn name(&self) -> String {
        String::from("random")
    }
}

/// Always plays the minimax move for its own marker.
#[derive(Clone, Copy, Debug, Default)]
pub struct MinimaxPlayer;

impl Player for MinimaxPlayer {
    fn get_move(&mut self, board: &BitBoard, marker: PlayerMarker) -> Option<usize> {
        minimax(board, marker).index
    }

    fn name(&self) -> String {
        String::from("minimax")
    }
}

/// The in-game bot: a difficulty level plus its own random source.
#[derive(Clone, Debug)]
pub struct BotPlayer<R = ThreadRng> {
    difficulty: Difficulty,
    rng: R,
}

impl BotPlayer {
    pub fn new(difficulty: Difficulty) -> Self {
        BotPlayer {
            difficulty,
            rng: rand::thread_rng(),
        }
    }
}

impl<R: Rng> BotPlayer<R> {
    pub fn with_rng(difficulty: Difficulty, rng: R) -> Self {
        BotPlayer { difficulty, rng }
    }
}

impl<R: Rng> Player for BotPlayer<R> {
    fn get_move(&mut self, board: &BitBoard, marker: PlayerMarker) -> Option<usize> {
        self.difficulty.choose_move(board, marker, &mut self.rng)
    }

    fn name(&self) -> String {
        format!("{} bot", self.difficulty)
    }
}

// ##############################
// # Arena
// ##############################

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Tally {
    pub x_wins: u32,
    pub o_wins: u32,
    pub draws: u32,
}

impl Tally {
    pub fn record(&mut self, result: GameResult) {
        match result {
            GameResult::XWins => self.x_wins += 1,
            GameResult::OWins => self.o_wins += 1,
            GameResult::Draw => self.draws += 1,
            GameResult::InProgress => {}
        }
    }

    pub fn games(&self) -> u32 {
        self.x_wins + self.o_wins + self.draws
    }
}

impl fmt::Display for Tally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Player X: {} | Player O: {} | Draws: {}",
            self.x_wins.to_string().as_str().red(),
            self.o_wins.to_string().as_str().green(),
            self.draws.to_string().as_str().yellow()
        )
    }
}

/// Plays whole matches between two players, X always opening.
pub struct Arena {
    player1: Box<dyn Player>,
    player2: Box<dyn Player>,
    board: BitBoard,
    current_player: PlayerMarker,
}

impl Arena {
    pub fn new(player1: Box<dyn Player>, player2: Box<dyn Player>) -> Self {
        Arena {
            player1,
            player2,
            board: BitBoard::new(),
            current_player: PlayerMarker::X,
        }
    }

    pub fn board(&self) -> &BitBoard {
        &self.board
    }

    pub fn play(&mut self) -> GameResult {
        self.board = BitBoard::new();
        self.current_player = PlayerMarker::X;

        loop {
            let result = self.board.result();
            if result.is_over() {
                log::debug!("match over: {:?}\n{}", result, self.board);
                return result;
            }

            let player = if self.current_player == PlayerMarker::X {
                &mut self.player1
            } else {
                &mut self.player2
            };

            let Some(chosen_move) = player.get_move(&self.board, self.current_player) else {
                log::error!("{} had no move on an open board", player.name());
                return result;
            };
            log::debug!("player {} ({}) chose {}", self.current_player, player.name(), chosen_move);

            if let Err(e) = self.board.set(chosen_move, self.current_player) {
                log::warn!("{} tried an invalid move: {}", player.name(), e);
                continue;
            }

            self.current_player = self.current_player.to_other();
        }
    }

    pub fn run(&mut self, games: u32) -> Tally {
        let mut tally = Tally::default();
        for _ in 0..games {
            tally.record(self.play());
        }
        log::info!(
            "{} vs {}: {} games, X {} O {} draws {}",
            self.player1.name(),
            self.player2.name(),
            tally.games(),
            tally.x_wins,
            tally.o_wins,
            tally.draws
        );
        tally
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn minimax_draws_itself() {
        let mut arena = Arena::new(Box::new(MinimaxPlayer), Box::new(MinimaxPlayer));
        assert_eq!(arena.play(), GameResult::Draw);
    }

    #[test]
    fn tally_counts_every_game() {
        let x = RandomPlayer::with_rng(ChaCha8Rng::seed_from_u64(1));
        let o = RandomPlayer::with_rng(ChaCha8Rng::seed_from_u64(2));
        let mut arena = Arena::new(Box::new(x), Box::new(o));
        let tally = arena.run(25);
        assert_eq!(tally.games(), 25);
    }

    #[test]
    fn bot_names() {
        assert_eq!(BotPlayer::new(Difficulty::Medium).name(), "medium bot");
        assert_eq!(MinimaxPlayer.name(), "minimax");
    }
}
