use std::{fmt, time::Duration};

use colored::Colorize;
use rand::{seq::SliceRandom, Rng};

use super::photo::Photo;
use crate::{color::Rgb, schedule::Timers};

pub const SIDE: usize = 3;
pub const TILE_COUNT: usize = SIDE * SIDE;
/// The tile value standing for the empty slot.
pub const BLANK: u8 = (TILE_COUNT - 1) as u8;
pub const SHUFFLE_MOVES: usize = 100;
pub const CLOCK_PERIOD: Duration = Duration::from_secs(1);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    Ignored,
    Moved,
    Solved,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Timer {
    Clock,
}

/// A 3×3 sliding puzzle. `tiles[index]` is the piece sitting at `index`;
/// the puzzle is solved when every piece is at its own index.
pub struct SlidingPuzzle {
    photo: Photo,
    tiles: [u8; TILE_COUNT],
    empty_index: usize,
    moves: u32,
    elapsed: u32,
    active: bool,
    timers: Timers<Timer>,
}

impl SlidingPuzzle {
    /// A solved board. Call [`SlidingPuzzle::shuffle`] before playing.
    pub fn new(photo: Photo) -> Self {
        let mut puzzle = SlidingPuzzle {
            photo,
            tiles: [0; TILE_COUNT],
            empty_index: TILE_COUNT - 1,
            moves: 0,
            elapsed: 0,
            active: false,
            timers: Timers::new(),
        };
        puzzle.initialize();
        puzzle
    }

    pub fn photo(&self) -> Photo {
        self.photo
    }

    pub fn tiles(&self) -> &[u8; TILE_COUNT] {
        &self.tiles
    }

    pub fn empty_index(&self) -> usize {
        self.empty_index
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// Whole seconds on the clock.
    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    pub fn select_photo<R: Rng + ?Sized>(&mut self, photo: Photo, rng: &mut R) {
        self.photo = photo;
        log::info!("puzzle photo: {}", photo.name());
        self.shuffle(rng);
    }

    pub fn initialize(&mut self) {
        for (index, tile) in self.tiles.iter_mut().enumerate() {
            *tile = index as u8;
        }
        self.empty_index = TILE_COUNT - 1;
        self.moves = 0;
        self.elapsed = 0;
        self.active = false;
        self.timers.clear();
    }

    /// Orthogonally adjacent to the empty slot.
    pub fn is_moveable(&self, index: usize) -> bool {
        if index >= TILE_COUNT {
            return false;
        }
        let (row, col) = (index / SIDE, index % SIDE);
        let (empty_row, empty_col) = (self.empty_index / SIDE, self.empty_index % SIDE);
        row.abs_diff(empty_row) + col.abs_diff(empty_col) == 1
    }

    pub fn move_tile(&mut self, index: usize, now: Duration) -> MoveOutcome {
        if !self.is_moveable(index) {
            return MoveOutcome::Ignored;
        }
        if !self.active {
            self.active = true;
            self.timers.every(Timer::Clock, CLOCK_PERIOD, now);
        }

        self.slide(index);
        self.moves += 1;
        log::debug!("tile {} slid, {} moves", index, self.moves);

        if self.is_solved() {
            self.active = false;
            self.timers.cancel(Timer::Clock);
            log::info!(
                "puzzle solved in {} moves, {}",
                self.moves,
                format_time(self.elapsed)
            );
            return MoveOutcome::Solved;
        }
        MoveOutcome::Moved
    }

    /// Scrambles with random legal slides, so the result is always solvable.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.initialize();
        for _ in 0..SHUFFLE_MOVES {
            let moveable: Vec<usize> = (0..TILE_COUNT).filter(|&index| self.is_moveable(index)).collect();
            if let Some(&index) = moveable.choose(rng) {
                self.slide(index);
            }
        }
        self.moves = 0;
        self.elapsed = 0;
        self.active = false;
        self.timers.clear();
    }

    pub fn is_solved(&self) -> bool {
        self.tiles.iter().enumerate().all(|(index, &tile)| tile as usize == index)
    }

    /// Ticks the clock for every second that passed by `now`.
    pub fn advance(&mut self, now: Duration) {
        while let Some(Timer::Clock) = self.timers.pop_due(now) {
            if self.active {
                self.elapsed += 1;
            }
        }
    }

    pub fn status(&self) -> String {
        format!("Moves: {}  Time: {}", self.moves, format_time(self.elapsed))
    }

    fn slide(&mut self, index: usize) {
        self.tiles.swap(index, self.empty_index);
        self.empty_index = index;
    }
}

/// `m:ss`, minutes unpadded.
pub fn format_time(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

impl fmt::Display for SlidingPuzzle {
    /// Each piece in its picture colour, numbered from 1, moveable pieces in
    /// bold. Indices are listed on the right for input.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..SIDE {
            for col in 0..SIDE {
                let index = row * SIDE + col;
                let tile = self.tiles[index];
                if tile == BLANK {
                    write!(f, "      ")?;
                    continue;
                }
                let piece = tile as usize;
                let background = self.photo.piece(piece / SIDE, piece % SIDE);
                let label = format!("  {}   ", tile + 1);
                let cell = Rgb::WHITE.paint(&label, background);
                if self.is_moveable(index) {
                    write!(f, "{}", cell.bold())?;
                } else {
                    write!(f, "{}", cell)?;
                }
            }
            let indices: Vec<String> = (0..SIDE).map(|col| (row * SIDE + col).to_string()).collect();
            writeln!(f, "   {}", indices.join(" "))?;
        }
        write!(f, "{}", self.status())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn secs(value: u64) -> Duration {
        Duration::from_secs(value)
    }

    #[test]
    fn starts_solved_with_blank_in_the_corner() {
        let puzzle = SlidingPuzzle::new(Photo::Sky);
        assert!(puzzle.is_solved());
        assert_eq!(puzzle.empty_index(), 8);
        assert_eq!(puzzle.tiles()[8], BLANK);
        assert_eq!(puzzle.next_deadline(), None);
    }

    #[test]
    fn only_neighbours_of_the_blank_move() {
        let puzzle = SlidingPuzzle::new(Photo::Sky);
        let moveable: Vec<usize> = (0..12).filter(|&index| puzzle.is_moveable(index)).collect();
        assert_eq!(moveable, vec![5, 7]);
    }

    #[test]
    fn distant_tile_is_left_alone() {
        let mut puzzle = SlidingPuzzle::new(Photo::Mint);
        let before = *puzzle.tiles();
        assert_eq!(puzzle.move_tile(0, secs(0)), MoveOutcome::Ignored);
        assert_eq!(puzzle.move_tile(8, secs(0)), MoveOutcome::Ignored);
        assert_eq!(puzzle.move_tile(4, secs(0)), MoveOutcome::Ignored);
        assert_eq!(*puzzle.tiles(), before);
        assert_eq!(puzzle.empty_index(), 8);
        assert_eq!(puzzle.moves(), 0);
        assert!(!puzzle.is_active());
    }

    #[test]
    fn first_move_starts_the_clock_and_solving_stops_it() {
        let mut puzzle = SlidingPuzzle::new(Photo::Violet);
        assert_eq!(puzzle.move_tile(5, secs(0)), MoveOutcome::Moved);
        assert!(puzzle.is_active());
        assert_eq!(puzzle.empty_index(), 5);
        assert_eq!(puzzle.tiles()[8], 5);

        puzzle.advance(secs(1));
        puzzle.advance(secs(3));
        assert_eq!(puzzle.elapsed(), 3);

        assert_eq!(puzzle.move_tile(8, secs(3)), MoveOutcome::Solved);
        assert_eq!(puzzle.moves(), 2);
        assert!(!puzzle.is_active());
        assert_eq!(puzzle.next_deadline(), None);

        puzzle.advance(secs(10));
        assert_eq!(puzzle.elapsed(), 3);
    }

    #[test]
    fn shuffle_keeps_a_permutation_and_resets_counters() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut puzzle = SlidingPuzzle::new(Photo::Sunset);
        puzzle.move_tile(7, secs(0));
        puzzle.shuffle(&mut rng);

        let mut sorted = *puzzle.tiles();
        sorted.sort_unstable();
        assert_eq!(sorted, [0, 1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(puzzle.tiles()[puzzle.empty_index()], BLANK);
        assert_eq!(puzzle.moves(), 0);
        assert_eq!(puzzle.elapsed(), 0);
        assert!(!puzzle.is_active());
        assert_eq!(puzzle.next_deadline(), None);
    }

    #[test]
    fn selecting_a_photo_reshuffles() {
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let mut puzzle = SlidingPuzzle::new(Photo::Violet);
        puzzle.select_photo(Photo::Abyss, &mut rng);
        assert_eq!(puzzle.photo(), Photo::Abyss);
        assert_eq!(puzzle.moves(), 0);
    }

    #[test]
    fn time_is_minutes_and_padded_seconds() {
        assert_eq!(format_time(0), "0:00");
        assert_eq!(format_time(65), "1:05");
        assert_eq!(format_time(600), "10:00");
    }
}
