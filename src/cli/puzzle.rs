use std::time::Instant;

use colored::Colorize;
use dialoguer::{Input, Select};

use minigames::{
    puzzle::{format_time, MoveOutcome, Photo, SlidingPuzzle},
    Result,
};

enum Command {
    Move(usize),
    Shuffle,
    Preview,
    NewPhoto,
    Quit,
}

fn parse(line: &str) -> Option<Command> {
    match line.trim() {
        "s" => Some(Command::Shuffle),
        "p" => Some(Command::Preview),
        "n" => Some(Command::NewPhoto),
        "q" => Some(Command::Quit),
        other => other.parse().ok().map(Command::Move),
    }
}

fn choose_photo() -> Result<Photo> {
    let choice = Select::new()
        .with_prompt("Choose a photo")
        .items(&Photo::ALL)
        .default(0)
        .interact()?;
    Ok(Photo::ALL[choice])
}

pub fn run(photo: Option<Photo>) -> Result<()> {
    let mut rng = rand::thread_rng();
    let photo = match photo {
        Some(photo) => photo,
        None => choose_photo()?,
    };
    let mut puzzle = SlidingPuzzle::new(photo);
    puzzle.select_photo(photo, &mut rng);
    let start = Instant::now();

    loop {
        puzzle.advance(start.elapsed());
        println!("{}\n", puzzle);
        let line: String = Input::new()
            .with_prompt("Tile index, s shuffle, p preview, n new photo, q quit")
            .interact_text()?;
        puzzle.advance(start.elapsed());

        match parse(&line) {
            Some(Command::Move(index)) => {
                if puzzle.move_tile(index, start.elapsed()) == MoveOutcome::Solved {
                    println!("{}\n", puzzle);
                    println!(
                        "{} Moves: {}  Time: {}",
                        "Solved!".green().bold(),
                        puzzle.moves(),
                        format_time(puzzle.elapsed())
                    );
                    let choice = Select::new()
                        .items(&["Play again", "Change photo", "Quit"])
                        .default(0)
                        .interact()?;
                    match choice {
                        0 => puzzle.shuffle(&mut rng),
                        1 => puzzle.select_photo(choose_photo()?, &mut rng),
                        _ => return Ok(()),
                    }
                }
            }
            Some(Command::Shuffle) => puzzle.shuffle(&mut rng),
            Some(Command::Preview) => println!("{}\n", puzzle.photo().preview()),
            Some(Command::NewPhoto) => puzzle.select_photo(choose_photo()?, &mut rng),
            Some(Command::Quit) => return Ok(()),
            None => println!("{}", "Unknown command".yellow()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_parse() {
        assert!(matches!(parse(" 4 "), Some(Command::Move(4))));
        assert!(matches!(parse("s"), Some(Command::Shuffle)));
        assert!(parse("jump").is_none());
    }
}
