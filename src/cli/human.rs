use dialoguer::Select;

use minigames::tictactoe::{BitBoard, Player, PlayerMarker};

use super::tictactoe::board_view;

/// A person at the keyboard, picking from the open cells.
#[derive(Debug, Default)]
pub struct HumanPlayer;

impl Player for HumanPlayer {
    fn get_move(&mut self, board: &BitBoard, marker: PlayerMarker) -> Option<usize> {
        let open = board.get_possible_moves();
        let labels: Vec<String> = open.iter().map(|index| format!("Cell {}", index)).collect();
        println!("{}", board_view(board, None));
        match Select::new()
            .with_prompt(format!("Your move ({})", marker))
            .report(false)
            .items(&labels)
            .default(0)
            .interact()
        {
            Ok(choice) => open.as_slice().get(choice).copied(),
            Err(e) => {
                log::error!("could not read a move: {}", e);
                None
            }
        }
    }

    fn name(&self) -> String {
        String::from("human")
    }
}
