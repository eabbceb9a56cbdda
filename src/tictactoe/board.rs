use std::{fmt, ops::Index, str::FromStr};

use thiserror::Error;

// #############################
// #                           #
// #      Fixed Constants      #
// #                           #
// #############################
pub const BOARD_SIZE: usize = 3;
pub const BOARD_SIZE_SQUARED: usize = BOARD_SIZE * BOARD_SIZE;
const FULL_BOARD: u16 = 0b111_111_111;
const WINNING_POSITIONS: [u16; 8] = [
    0b000_000_111, 0b000_111_000, 0b111_000_000, // Zeilen
    0b001_001_001, 0b010_010_010, 0b100_100_100, // Spalten
    0b100_010_001, 0b001_010_100, // Diagonalen
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlayerMarker {
    X,
    O,
    Empty,
}

impl PlayerMarker {
    pub fn to_char(&self) -> char {
        match self {
            PlayerMarker::X => 'X',
            PlayerMarker::O => 'O',
            PlayerMarker::Empty => '_',
        }
    }

    pub fn to_other(&self) -> Self {
        match self {
            PlayerMarker::X => PlayerMarker::O,
            PlayerMarker::O => PlayerMarker::X,
            PlayerMarker::Empty => PlayerMarker::Empty,
        }
    }
}

impl fmt::Display for PlayerMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameResult {
    InProgress,
    XWins,
    OWins,
    Draw,
}

impl GameResult {
    pub fn is_over(&self) -> bool {
        *self != GameResult::InProgress
    }
}

#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum InvalidMoveError {
    #[error("cell {0} is outside the board")]
    OutOfRange(usize),

    #[error("cell {0} was already played")]
    Occupied(usize),

    #[error("no player to place")]
    NoPlayer,
}

// #############################
// #                           #
// #       PossibleMoves       #
// #                           #
// #############################

/// Empty cell indices in ascending order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PossibleMoves {
    moves: [usize; BOARD_SIZE_SQUARED],
    index: usize,
}

impl PossibleMoves {
    pub fn new() -> PossibleMoves {
        PossibleMoves {
            moves: [0; BOARD_SIZE_SQUARED],
            index: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.index
    }

    pub fn push(&mut self, move_: usize) {
        self.moves[self.index] = move_;
        self.index += 1;
    }

    pub fn is_empty(&self) -> bool {
        self.index == 0
    }

    pub fn contains(&self, move_: usize) -> bool {
        self.as_slice().contains(&move_)
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.moves[..self.index]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, usize> {
        self.as_slice().iter()
    }
}

impl Default for PossibleMoves {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> IntoIterator for &'a PossibleMoves {
    type Item = &'a usize;
    type IntoIter = std::slice::Iter<'a, usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Index<usize> for PossibleMoves {
    type Output = usize;

    fn index(&self, index: usize) -> &Self::Output {
        &self.as_slice()[index]
    }
}

// #############################
// #                           #
// #         BitBoard          #
// #                           #
// #############################

/// A 3x3 board, one 9-bit mask per player, cell `i` at bit `i` (row-major).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct BitBoard {
    x: u16,
    o: u16,
}

impl BitBoard {
    pub fn new() -> Self {
        BitBoard { x: 0, o: 0 }
    }

    pub fn from_cells(cells: [PlayerMarker; BOARD_SIZE_SQUARED]) -> Self {
        let mut board = BitBoard::new();
        for (i, cell) in cells.into_iter().enumerate() {
            match cell {
                PlayerMarker::X => board.x |= 1 << i,
                PlayerMarker::O => board.o |= 1 << i,
                PlayerMarker::Empty => {}
            }
        }
        board
    }

    pub fn cells(&self) -> [PlayerMarker; BOARD_SIZE_SQUARED] {
        std::array::from_fn(|i| self.get(i))
    }

    pub fn get(&self, index: usize) -> PlayerMarker {
        let mask = 1 << index;
        if self.x & mask != 0 {
            PlayerMarker::X
        } else if self.o & mask != 0 {
            PlayerMarker::O
        } else {
            PlayerMarker::Empty
        }
    }

    /// Places `player` on an empty cell and reports the winner afterwards.
    pub fn set(&mut self, index: usize, player: PlayerMarker) -> Result<Option<PlayerMarker>, InvalidMoveError> {
        if index >= BOARD_SIZE_SQUARED {
            return Err(InvalidMoveError::OutOfRange(index));
        }
        let mask = 1 << index;

        if (self.x | self.o) & mask > 0 {
            return Err(InvalidMoveError::Occupied(index));
        }

        match player {
            PlayerMarker::X => self.x |= mask,
            PlayerMarker::O => self.o |= mask,
            PlayerMarker::Empty => return Err(InvalidMoveError::NoPlayer),
        };

        Ok(self.get_winner())
    }

    /// Copy of the board with `player` on `index`; the receiver is untouched.
    pub fn with(&self, index: usize, player: PlayerMarker) -> BitBoard {
        let mut next = *self;
        let mask = 1 << index;
        match player {
            PlayerMarker::X => next.x |= mask,
            PlayerMarker::O => next.o |= mask,
            PlayerMarker::Empty => {}
        }
        next
    }

    pub fn count(&self, player: PlayerMarker) -> u32 {
        match player {
            PlayerMarker::X => self.x.count_ones(),
            PlayerMarker::O => self.o.count_ones(),
            PlayerMarker::Empty => BOARD_SIZE_SQUARED as u32 - (self.x | self.o).count_ones(),
        }
    }

    /// Every empty cell, ascending. Winning does not stop enumeration.
    pub fn get_possible_moves(&self) -> PossibleMoves {
        let mut possible_moves = PossibleMoves::new();
        for i in 0..BOARD_SIZE_SQUARED {
            let mask = 1 << i;
            if (self.x | self.o) & mask == 0 {
                possible_moves.push(i);
            }
        }
        possible_moves
    }

    pub fn get_winner(&self) -> Option<PlayerMarker> {
        for &pos in WINNING_POSITIONS.iter() {
            if self.x & pos == pos {
                return Some(PlayerMarker::X);
            } else if self.o & pos == pos {
                return Some(PlayerMarker::O);
            }
        }
        None
    }

    /// The first completed triple, in rows, columns, diagonals order.
    pub fn winning_line(&self) -> Option<[usize; BOARD_SIZE]> {
        WINNING_POSITIONS
            .iter()
            .find(|&&pos| self.x & pos == pos || self.o & pos == pos)
            .map(|&pos| {
                let mut line = [0; BOARD_SIZE];
                let mut cells = (0..BOARD_SIZE_SQUARED).filter(|i| pos & (1 << i) != 0);
                for slot in line.iter_mut() {
                    *slot = cells.next().unwrap_or_default();
                }
                line
            })
    }

    pub fn is_full(&self) -> bool {
        (self.x | self.o) == FULL_BOARD
    }

    pub fn is_empty(&self) -> bool {
        (self.x | self.o) == 0
    }

    pub fn result(&self) -> GameResult {
        match self.get_winner() {
            Some(PlayerMarker::X) => GameResult::XWins,
            Some(_) => GameResult::OWins,
            None if self.is_full() => GameResult::Draw,
            None => GameResult::InProgress,
        }
    }
}

// #############################
// #                           #
// #           Display         #
// #                           #
// #############################

impl fmt::Display for BitBoard {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for i in 0..BOARD_SIZE {
            for j in 0..BOARD_SIZE {
                let symbol = match self.get(i * BOARD_SIZE + j) {
                    PlayerMarker::Empty => '-',
                    marker => marker.to_char(),
                };
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Nine cells, row-major: `X`, `O`, and `_`, `-`, `.` or space for empty.
/// Whitespace between rows is ignored when the rest already has nine cells.
impl FromStr for BitBoard {
    type Err = InvalidMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let symbols: Vec<char> = if s.chars().count() == BOARD_SIZE_SQUARED {
            s.chars().collect()
        } else {
            s.chars().filter(|c| !c.is_whitespace() && *c != '|').collect()
        };
        if symbols.len() != BOARD_SIZE_SQUARED {
            return Err(InvalidMoveError::OutOfRange(symbols.len()));
        }
        let mut cells = [PlayerMarker::Empty; BOARD_SIZE_SQUARED];
        for (i, symbol) in symbols.into_iter().enumerate() {
            cells[i] = match symbol {
                'X' | 'x' => PlayerMarker::X,
                'O' | 'o' => PlayerMarker::O,
                _ => PlayerMarker::Empty,
            };
        }
        Ok(BitBoard::from_cells(cells))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(s: &str) -> BitBoard {
        s.parse().unwrap()
    }

    #[test]
    fn empty_board_has_all_moves() {
        let moves = BitBoard::new().get_possible_moves();
        assert_eq!(moves.as_slice(), &[0, 1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn full_board_has_no_moves() {
        let moves = board("XOXXOOOXX").get_possible_moves();
        assert!(moves.is_empty());
    }

    #[test]
    fn moves_are_ascending_empties() {
        let moves = board("XX_OO____").get_possible_moves();
        assert_eq!(moves.as_slice(), &[2, 5, 6, 7, 8]);
    }

    #[test]
    fn every_triple_wins() {
        let lines = [
            [0, 1, 2], [3, 4, 5], [6, 7, 8],
            [0, 3, 6], [1, 4, 7], [2, 5, 8],
            [0, 4, 8], [2, 4, 6],
        ];
        for line in lines {
            let mut b = BitBoard::new();
            for &i in &line {
                b.set(i, PlayerMarker::O).unwrap();
            }
            assert_eq!(b.get_winner(), Some(PlayerMarker::O));
            assert_eq!(b.winning_line(), Some(line));
        }
    }

    #[test]
    fn full_board_without_triple_is_draw() {
        let b = board("XOXXOOOXX");
        assert_eq!(b.get_winner(), None);
        assert!(b.is_full());
        assert_eq!(b.result(), GameResult::Draw);
    }

    #[test]
    fn winner_on_full_board_is_not_draw() {
        let b = board("XXXOOXOXO");
        assert!(b.is_full());
        assert_eq!(b.result(), GameResult::XWins);
    }

    #[test]
    fn occupied_cell_is_rejected() {
        let mut b = BitBoard::new();
        assert_eq!(b.set(4, PlayerMarker::X), Ok(None));
        assert_eq!(b.set(4, PlayerMarker::O), Err(InvalidMoveError::Occupied(4)));
        assert_eq!(b.set(9, PlayerMarker::O), Err(InvalidMoveError::OutOfRange(9)));
        assert_eq!(b.get(4), PlayerMarker::X);
    }

    #[test]
    fn with_leaves_original_alone() {
        let b = board("X________");
        let next = b.with(4, PlayerMarker::O);
        assert_eq!(b.get(4), PlayerMarker::Empty);
        assert_eq!(next.get(4), PlayerMarker::O);
    }

    #[test]
    fn parses_rows() {
        let b = board("XX_\nOO_\n___");
        assert_eq!(b.count(PlayerMarker::X), 2);
        assert_eq!(b.count(PlayerMarker::O), 2);
        assert_eq!(b.count(PlayerMarker::Empty), 5);
        assert_eq!(b.to_string(), "XX-\nOO-\n---\n");
    }
}
