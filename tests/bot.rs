use std::collections::HashSet;

use minigames::tictactoe::{
    minimax, Arena, BitBoard, BotPlayer, Difficulty, GameResult, PlayerMarker, RandomPlayer,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[test]
fn hard_bot_never_loses_as_o() {
    for seed in 0..200 {
        let mut arena = Arena::new(
            Box::new(RandomPlayer::with_rng(ChaCha8Rng::seed_from_u64(seed))),
            Box::new(BotPlayer::with_rng(Difficulty::Hard, ChaCha8Rng::seed_from_u64(seed))),
        );
        let result = arena.play();
        assert_ne!(result, GameResult::XWins, "seed {}:\n{}", seed, arena.board());
        assert!(result.is_over());
    }
}

#[test]
fn hard_bot_never_loses_as_x() {
    let mut arena = Arena::new(
        Box::new(BotPlayer::with_rng(Difficulty::Hard, ChaCha8Rng::seed_from_u64(1))),
        Box::new(RandomPlayer::with_rng(ChaCha8Rng::seed_from_u64(2))),
    );
    let tally = arena.run(10);
    assert_eq!(tally.o_wins, 0);
    assert_eq!(tally.games(), 10);
}

fn reachable(board: BitBoard, to_move: PlayerMarker, seen: &mut HashSet<BitBoard>) {
    if !seen.insert(board) || board.result().is_over() {
        return;
    }
    for index in board.get_possible_moves().iter() {
        reachable(board.with(*index, to_move), to_move.to_other(), seen);
    }
}

fn all_positions() -> HashSet<BitBoard> {
    let mut seen = HashSet::new();
    reachable(BitBoard::new(), PlayerMarker::X, &mut seen);
    seen
}

#[test]
fn every_reachable_position_has_one_consistent_outcome() {
    let positions = all_positions();
    assert_eq!(positions.len(), 5478);

    for board in positions {
        let x = board.count(PlayerMarker::X);
        let o = board.count(PlayerMarker::O);
        assert!(x == o || x == o + 1, "{}", board);

        match board.get_winner() {
            Some(winner) => {
                let line = board.winning_line().unwrap();
                assert!(line.iter().all(|&cell| board.get(cell) == winner), "{}", board);
                // the loser moved last and cannot own a line as well
                let mut loser_only = BitBoard::new();
                for cell in 0..9 {
                    if board.get(cell) == winner.to_other() {
                        loser_only.set(cell, winner.to_other()).unwrap();
                    }
                }
                assert_eq!(loser_only.get_winner(), None, "{}", board);
            }
            None => {
                assert!(board.winning_line().is_none());
                assert_eq!(board.result() == GameResult::Draw, board.is_full());
            }
        }
    }
}

#[test]
fn minimax_is_deterministic_and_legal() {
    for board in all_positions() {
        if board.result().is_over() || board.count(PlayerMarker::Empty) > 6 {
            continue;
        }
        let to_move = if board.count(PlayerMarker::X) == board.count(PlayerMarker::O) {
            PlayerMarker::X
        } else {
            PlayerMarker::O
        };
        let first = minimax(&board, to_move);
        assert_eq!(first, minimax(&board, to_move));
        let index = first.index.unwrap();
        assert_eq!(board.get(index), PlayerMarker::Empty);
        assert!((-10..=10).contains(&first.score));
    }
}
