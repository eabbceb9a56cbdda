use rand::{rngs::StdRng, SeedableRng};

use minigames::{
    tictactoe::{Arena, BotPlayer, Difficulty, MinimaxPlayer, Player, RandomPlayer},
    Result,
};

use super::human::HumanPlayer;
use crate::Contender;

fn rng(seed: Option<u64>, offset: u64) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(offset)),
        None => StdRng::from_entropy(),
    }
}

fn contender(kind: Contender, rng: StdRng) -> Box<dyn Player> {
    match kind {
        Contender::Human => Box::new(HumanPlayer),
        Contender::Random => Box::new(RandomPlayer::with_rng(rng)),
        Contender::Easy => Box::new(BotPlayer::with_rng(Difficulty::Easy, rng)),
        Contender::Medium => Box::new(BotPlayer::with_rng(Difficulty::Medium, rng)),
        Contender::Hard => Box::new(BotPlayer::with_rng(Difficulty::Hard, rng)),
        Contender::Minimax => Box::new(MinimaxPlayer),
    }
}

pub fn run(x: Contender, o: Contender, games: u32, seed: Option<u64>) -> Result<()> {
    let mut arena = Arena::new(contender(x, rng(seed, 0)), contender(o, rng(seed, 1)));
    let tally = arena.run(games);
    println!("{:?} (X) vs {:?} (O) over {} games", x, o, tally.games());
    println!("{}", tally);
    Ok(())
}
