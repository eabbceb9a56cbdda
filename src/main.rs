mod cli;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use minigames::{
    puzzle::Photo,
    snake::{Skin, Theme},
    store::FileStore,
    tictactoe::{Difficulty, Mode},
    Result,
};

/// Snake, a sliding puzzle and Tic-Tac-Toe in the terminal.
#[derive(Parser)]
#[command(name = "minigames")]
#[command(about = "Snake, a sliding puzzle and Tic-Tac-Toe in the terminal")]
struct Cli {
    /// Score and preference file (defaults to ~/.minigames.json).
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play Snake. Arrows or WASD steer, space pauses, q quits.
    Snake {
        /// nokia, neon, nature, ocean, desert or space.
        #[arg(long)]
        theme: Option<Theme>,

        /// classic, gradient, striped or rainbow.
        #[arg(long)]
        skin: Option<Skin>,
    },

    /// Play the sliding puzzle.
    Puzzle {
        /// Photo number (1-6) or name.
        #[arg(short, long)]
        photo: Option<Photo>,
    },

    /// Play Tic-Tac-Toe against a friend or the bot.
    Tictactoe {
        /// Skip the mode menu.
        #[arg(short, long, value_enum)]
        mode: Option<ModeArg>,

        /// Skip the difficulty menu when playing the bot.
        #[arg(short, long)]
        difficulty: Option<Difficulty>,
    },

    /// Pit two Tic-Tac-Toe players against each other and tally the results.
    Arena {
        /// Player for X, who always moves first.
        #[arg(short, long, value_enum, default_value = "random")]
        x: Contender,

        /// Player for O.
        #[arg(short, long, value_enum, default_value = "hard")]
        o: Contender,

        /// Number of games.
        #[arg(short, long, default_value = "100")]
        games: u32,

        /// Random seed for reproducible bots.
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Pvp,
    Bot,
}

impl From<ModeArg> for Mode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Pvp => Mode::PlayerVsPlayer,
            ModeArg::Bot => Mode::PlayerVsBot,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Contender {
    Human,
    Random,
    Easy,
    Medium,
    Hard,
    Minimax,
}

fn main() {
    let args = Cli::parse();
    if let Err(e) = cli::logging::init() {
        eprintln!("logging disabled: {}", e);
    }
    if let Err(e) = run(args) {
        log::error!("{}", e);
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: Cli) -> Result<()> {
    let path = args.store.unwrap_or_else(FileStore::default_path);
    let store = FileStore::open(&path)?;
    log::info!("store: {}", path.display());

    match args.command {
        Commands::Snake { theme, skin } => cli::snake::run(store, theme, skin),
        Commands::Puzzle { photo } => cli::puzzle::run(photo),
        Commands::Tictactoe { mode, difficulty } => cli::tictactoe::run(store, mode.map(Mode::from), difficulty),
        Commands::Arena { x, o, games, seed } => cli::arena::run(x, o, games, seed),
    }
}
