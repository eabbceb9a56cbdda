use std::{thread, time::Instant};

use colored::Colorize;
use dialoguer::Select;

use minigames::{
    store::Store,
    tictactoe::{BitBoard, Difficulty, Mode, Phase, PlayerMarker, TicTacToe},
    Result,
};

/// The board with free cells numbered and the winning line highlighted.
pub fn board_view(board: &BitBoard, line: Option<[usize; 3]>) -> String {
    let mut out = String::new();
    for row in 0..3 {
        let cells: Vec<String> = (0..3)
            .map(|col| {
                let index = row * 3 + col;
                let cell = match board.get(index) {
                    PlayerMarker::X => " X ".red().bold(),
                    PlayerMarker::O => " O ".green().bold(),
                    PlayerMarker::Empty => format!(" {} ", index).as_str().dimmed(),
                };
                if line.map_or(false, |line| line.contains(&index)) {
                    cell.on_yellow().to_string()
                } else {
                    cell.to_string()
                }
            })
            .collect();
        out.push_str(&cells.join("|"));
        out.push('\n');
        if row < 2 {
            out.push_str("---+---+---\n");
        }
    }
    out
}

pub fn run<S: Store>(store: S, mode: Option<Mode>, difficulty: Option<Difficulty>) -> Result<()> {
    let start = Instant::now();
    let mut game = TicTacToe::new(store);
    if let Some(mode) = mode {
        game.select_mode(mode);
    }
    if let Some(difficulty) = difficulty {
        game.select_difficulty(difficulty);
    }

    loop {
        match game.phase() {
            Phase::ModeSelect => {
                let choice = Select::new()
                    .with_prompt("Tic-Tac-Toe")
                    .items(&["Player vs Player", "Player vs Bot", "Quit"])
                    .default(0)
                    .interact()?;
                match choice {
                    0 => game.select_mode(Mode::PlayerVsPlayer),
                    1 => game.select_mode(Mode::PlayerVsBot),
                    _ => return Ok(()),
                }
            }
            Phase::DifficultySelect => {
                let mut items: Vec<&str> = Difficulty::ALL.iter().map(|d| d.name()).collect();
                items.push("Back");
                let choice = Select::new()
                    .with_prompt("Bot difficulty")
                    .items(&items)
                    .default(Difficulty::ALL.len() - 1)
                    .interact()?;
                match Difficulty::ALL.get(choice) {
                    Some(&difficulty) => game.select_difficulty(difficulty),
                    None => game.back_to_mode(),
                }
            }
            Phase::Playing if game.bot_pending() => {
                println!("{}", board_view(game.board(), None));
                println!("{}", game.turn_indicator().as_str().cyan());
                if let Some(deadline) = game.next_deadline() {
                    thread::sleep(deadline.saturating_sub(start.elapsed()));
                }
                game.advance(start.elapsed());
            }
            Phase::Playing => {
                println!("{}", board_view(game.board(), None));
                let open = game.board().get_possible_moves();
                let mut items: Vec<String> = open.iter().map(|index| format!("Cell {}", index)).collect();
                items.push(String::from("Restart"));
                items.push(String::from("Change mode"));
                let choice = Select::new()
                    .with_prompt(game.turn_indicator())
                    .items(&items)
                    .default(0)
                    .interact()?;
                if choice < open.len() {
                    game.click_cell(open[choice], start.elapsed());
                } else if choice == open.len() {
                    game.reset();
                } else {
                    game.back_to_mode();
                }
            }
            Phase::Over(_) => {
                println!("{}", board_view(game.board(), game.winning_line()));
                if let Some(text) = game.result_text() {
                    println!("{}", text.as_str().bold());
                }
                let scores = game.scores();
                println!(
                    "X: {} | O: {} | Draws: {}",
                    scores.x_wins.to_string().as_str().red(),
                    scores.o_wins.to_string().as_str().green(),
                    scores.draws.to_string().as_str().yellow()
                );
                let choice = Select::new()
                    .items(&["Play again", "Change mode", "Quit"])
                    .default(0)
                    .interact()?;
                match choice {
                    0 => game.reset(),
                    1 => game.back_to_mode(),
                    _ => return Ok(()),
                }
            }
        }
    }
}
