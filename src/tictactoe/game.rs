use std::time::Duration;

use rand::{rngs::ThreadRng, Rng};

use super::{
    board::{BitBoard, GameResult, PlayerMarker},
    bot::Difficulty,
};
use crate::{schedule::Timers, store::Store};

/// Cosmetic pause before the bot answers.
pub const BOT_DELAY: Duration = Duration::from_millis(500);

pub const X_WINS_KEY: &str = "tttXWins";
pub const O_WINS_KEY: &str = "tttOWins";
pub const DRAWS_KEY: &str = "tttDraws";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    PlayerVsPlayer,
    PlayerVsBot,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    ModeSelect,
    DifficultySelect,
    Playing,
    Over(GameResult),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Timer {
    BotMove,
}

/// Win and draw counters, persisted across sessions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Scoreboard {
    pub x_wins: u32,
    pub o_wins: u32,
    pub draws: u32,
}

impl Scoreboard {
    pub fn load(store: &impl Store) -> Self {
        Scoreboard {
            x_wins: store.load_count(X_WINS_KEY),
            o_wins: store.load_count(O_WINS_KEY),
            draws: store.load_count(DRAWS_KEY),
        }
    }

    fn record(&mut self, result: GameResult, store: &mut impl Store) {
        let (count, key) = match result {
            GameResult::XWins => (&mut self.x_wins, X_WINS_KEY),
            GameResult::OWins => (&mut self.o_wins, O_WINS_KEY),
            GameResult::Draw => (&mut self.draws, DRAWS_KEY),
            GameResult::InProgress => return,
        };
        *count += 1;
        store.save(key, &count.to_string());
    }
}

/// One Tic-Tac-Toe session: mode and difficulty menus, then matches.
///
/// Every entry point is permissive. Clicks on taken cells, clicks outside a
/// running match and clicks while the bot is thinking are ignored.
pub struct TicTacToe<S, R = ThreadRng> {
    board: BitBoard,
    current_player: PlayerMarker,
    mode: Option<Mode>,
    difficulty: Option<Difficulty>,
    phase: Phase,
    scores: Scoreboard,
    timers: Timers<Timer>,
    store: S,
    rng: R,
}

impl<S: Store> TicTacToe<S> {
    pub fn new(store: S) -> Self {
        TicTacToe::with_rng(store, rand::thread_rng())
    }
}

impl<S: Store, R: Rng> TicTacToe<S, R> {
    pub fn with_rng(store: S, rng: R) -> Self {
        TicTacToe {
            board: BitBoard::new(),
            current_player: PlayerMarker::X,
            mode: None,
            difficulty: None,
            phase: Phase::ModeSelect,
            scores: Scoreboard::load(&store),
            timers: Timers::new(),
            store,
            rng,
        }
    }

    pub fn board(&self) -> &BitBoard {
        &self.board
    }

    pub fn current_player(&self) -> PlayerMarker {
        self.current_player
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn mode(&self) -> Option<Mode> {
        self.mode
    }

    pub fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }

    pub fn scores(&self) -> Scoreboard {
        self.scores
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn bot_pending(&self) -> bool {
        self.timers.is_armed(Timer::BotMove)
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    pub fn select_mode(&mut self, mode: Mode) {
        if self.phase != Phase::ModeSelect {
            return;
        }
        self.mode = Some(mode);
        match mode {
            Mode::PlayerVsPlayer => {
                self.difficulty = None;
                self.new_match();
            }
            Mode::PlayerVsBot => {
                self.difficulty = None;
                self.phase = Phase::DifficultySelect;
            }
        }
        log::info!("mode selected: {:?}", mode);
    }

    pub fn select_difficulty(&mut self, difficulty: Difficulty) {
        if self.phase != Phase::DifficultySelect {
            return;
        }
        self.difficulty = Some(difficulty);
        log::info!("difficulty selected: {}", difficulty);
        self.new_match();
    }

    /// Back to the mode menu. The next bot match asks for a difficulty again.
    pub fn back_to_mode(&mut self) {
        self.timers.clear();
        self.difficulty = None;
        self.board = BitBoard::new();
        self.current_player = PlayerMarker::X;
        self.phase = Phase::ModeSelect;
    }

    /// Empty board, X to move. Ignored while a menu is open: only the menu
    /// choices start a match from there.
    pub fn reset(&mut self) {
        if matches!(self.phase, Phase::ModeSelect | Phase::DifficultySelect) {
            return;
        }
        self.new_match();
    }

    fn new_match(&mut self) {
        self.timers.clear();
        self.board = BitBoard::new();
        self.current_player = PlayerMarker::X;
        self.phase = Phase::Playing;
        log::debug!("board reset");
    }

    /// A human click on cell `index`. Returns whether the move was played.
    pub fn click_cell(&mut self, index: usize, now: Duration) -> bool {
        if self.is_bot_turn() {
            return false;
        }
        self.make_move(index, now)
    }

    /// Applies whatever timers are due at `now`, i.e. the bot's answer.
    pub fn advance(&mut self, now: Duration) {
        while let Some(timer) = self.timers.pop_due(now) {
            match timer {
                Timer::BotMove => self.bot_move(now),
            }
        }
    }

    fn is_bot_turn(&self) -> bool {
        self.mode == Some(Mode::PlayerVsBot) && self.current_player == PlayerMarker::O
    }

    fn bot_move(&mut self, now: Duration) {
        if self.phase != Phase::Playing || !self.is_bot_turn() {
            return;
        }
        let difficulty = self.difficulty.unwrap_or(Difficulty::Hard);
        if let Some(index) = difficulty.choose_move(&self.board, PlayerMarker::O, &mut self.rng) {
            log::debug!("{} bot plays {}", difficulty, index);
            self.make_move(index, now);
        }
    }

    fn make_move(&mut self, index: usize, now: Duration) -> bool {
        if self.phase != Phase::Playing {
            return false;
        }
        if let Err(e) = self.board.set(index, self.current_player) {
            log::debug!("ignored move: {}", e);
            return false;
        }
        log::debug!("player {} takes {}", self.current_player, index);

        let result = self.board.result();
        if result.is_over() {
            self.end_game(result);
            return true;
        }

        self.current_player = self.current_player.to_other();
        if self.is_bot_turn() {
            self.timers.once(Timer::BotMove, BOT_DELAY, now);
        }
        true
    }

    fn end_game(&mut self, result: GameResult) {
        self.timers.clear();
        self.phase = Phase::Over(result);
        self.scores.record(result, &mut self.store);
        log::info!("game over: {:?}", result);
    }

    pub fn turn_indicator(&self) -> String {
        if self.is_bot_turn() {
            String::from("Bot's Turn (O)")
        } else {
            format!("Player {}'s Turn", self.current_player)
        }
    }

    pub fn result_text(&self) -> Option<String> {
        match self.phase {
            Phase::Over(GameResult::Draw) => Some(String::from("It's a Draw!")),
            Phase::Over(GameResult::XWins) => Some(String::from("Player X Wins!")),
            Phase::Over(GameResult::OWins) if self.mode == Some(Mode::PlayerVsBot) => Some(String::from("Bot Wins!")),
            Phase::Over(GameResult::OWins) => Some(String::from("Player O Wins!")),
            _ => None,
        }
    }

    /// Cells to highlight once a player has won.
    pub fn winning_line(&self) -> Option<[usize; 3]> {
        match self.phase {
            Phase::Over(GameResult::XWins | GameResult::OWins) => self.board.winning_line(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn game() -> TicTacToe<MemoryStore, ChaCha8Rng> {
        TicTacToe::with_rng(MemoryStore::new(), ChaCha8Rng::seed_from_u64(3))
    }

    fn pvp() -> TicTacToe<MemoryStore, ChaCha8Rng> {
        let mut game = game();
        game.select_mode(Mode::PlayerVsPlayer);
        game
    }

    fn vs_bot(difficulty: Difficulty) -> TicTacToe<MemoryStore, ChaCha8Rng> {
        let mut game = game();
        game.select_mode(Mode::PlayerVsBot);
        game.select_difficulty(difficulty);
        game
    }

    #[test]
    fn menus_lead_to_playing() {
        let mut game = game();
        assert_eq!(game.phase(), Phase::ModeSelect);
        game.select_difficulty(Difficulty::Hard);
        assert_eq!(game.phase(), Phase::ModeSelect);
        game.select_mode(Mode::PlayerVsBot);
        assert_eq!(game.phase(), Phase::DifficultySelect);
        game.select_difficulty(Difficulty::Hard);
        assert_eq!(game.phase(), Phase::Playing);
        assert_eq!(game.current_player(), PlayerMarker::X);
    }

    #[test]
    fn clicks_before_playing_are_ignored() {
        let mut game = game();
        assert!(!game.click_cell(4, ms(0)));
        assert!(game.board().is_empty());
    }

    #[test]
    fn players_alternate() {
        let mut game = pvp();
        assert!(game.click_cell(0, ms(0)));
        assert_eq!(game.current_player(), PlayerMarker::O);
        assert!(game.click_cell(4, ms(0)));
        assert_eq!(game.board().get(4), PlayerMarker::O);
        assert_eq!(game.current_player(), PlayerMarker::X);
    }

    #[test]
    fn occupied_cell_is_a_no_op() {
        let mut game = pvp();
        game.click_cell(0, ms(0));
        assert!(!game.click_cell(0, ms(0)));
        assert_eq!(game.current_player(), PlayerMarker::O);
        assert_eq!(game.board().get(0), PlayerMarker::X);
        assert!(!game.click_cell(42, ms(0)));
    }

    #[test]
    fn win_is_absorbing_until_reset() {
        let mut game = pvp();
        for index in [0, 3, 1, 4, 2] {
            game.click_cell(index, ms(0));
        }
        assert_eq!(game.phase(), Phase::Over(GameResult::XWins));
        assert_eq!(game.winning_line(), Some([0, 1, 2]));
        assert_eq!(game.result_text().as_deref(), Some("Player X Wins!"));
        assert!(!game.click_cell(8, ms(0)));

        game.reset();
        assert_eq!(game.phase(), Phase::Playing);
        assert!(game.board().is_empty());
        assert_eq!(game.current_player(), PlayerMarker::X);
    }

    #[test]
    fn draw_is_recorded_and_persisted() {
        let mut game = pvp();
        for index in [0, 1, 2, 4, 3, 5, 7, 6, 8] {
            game.click_cell(index, ms(0));
        }
        assert_eq!(game.phase(), Phase::Over(GameResult::Draw));
        assert_eq!(game.scores().draws, 1);
        assert_eq!(game.store().load_count(DRAWS_KEY), 1);
        assert_eq!(game.result_text().as_deref(), Some("It's a Draw!"));
    }

    #[test]
    fn scores_are_loaded_at_start() {
        let mut store = MemoryStore::new();
        store.save(X_WINS_KEY, "4");
        store.save(O_WINS_KEY, "not a number");
        let game = TicTacToe::with_rng(store, ChaCha8Rng::seed_from_u64(0));
        assert_eq!(game.scores(), Scoreboard { x_wins: 4, o_wins: 0, draws: 0 });
    }

    #[test]
    fn bot_answers_after_delay() {
        let mut game = vs_bot(Difficulty::Hard);
        assert!(game.click_cell(0, ms(1000)));
        assert!(game.bot_pending());
        assert_eq!(game.turn_indicator(), "Bot's Turn (O)");
        assert_eq!(game.next_deadline(), Some(ms(1500)));

        game.advance(ms(1499));
        assert_eq!(game.board().count(PlayerMarker::O), 0);

        game.advance(ms(1500));
        assert_eq!(game.board().count(PlayerMarker::O), 1);
        assert_eq!(game.current_player(), PlayerMarker::X);
        assert!(!game.bot_pending());
    }

    #[test]
    fn human_cannot_play_for_the_bot() {
        let mut game = vs_bot(Difficulty::Easy);
        game.click_cell(0, ms(0));
        assert!(!game.click_cell(4, ms(100)));
        assert_eq!(game.board().get(4), PlayerMarker::Empty);
    }

    #[test]
    fn reset_cancels_pending_bot_move() {
        let mut game = vs_bot(Difficulty::Hard);
        game.click_cell(0, ms(0));
        game.reset();
        assert!(!game.bot_pending());
        game.advance(ms(10_000));
        assert!(game.board().is_empty());
    }

    fn play_out(game: &mut TicTacToe<MemoryStore, ChaCha8Rng>, clicks: &[usize]) {
        let mut now = ms(0);
        for &index in clicks {
            game.click_cell(index, now);
            now += BOT_DELAY;
            game.advance(now);
        }
    }

    #[test]
    fn hard_bot_answers_corner_with_center() {
        let mut game = vs_bot(Difficulty::Hard);
        play_out(&mut game, &[0]);
        assert_eq!(game.board().get(4), PlayerMarker::O);
    }

    #[test]
    fn hard_bot_prefers_lowest_index_over_faster_win() {
        let mut game = vs_bot(Difficulty::Hard);
        play_out(&mut game, &[0, 8, 2]);
        // 7 wins at once, 5 wins one move later; 5 is scanned first.
        assert_eq!(game.board().get(1), PlayerMarker::O);
        assert_eq!(game.board().get(5), PlayerMarker::O);
        assert_eq!(game.board().get(7), PlayerMarker::Empty);

        play_out(&mut game, &[3]);
        assert_eq!(game.board().get(7), PlayerMarker::O);
        assert_eq!(game.phase(), Phase::Over(GameResult::OWins));
        assert_eq!(game.result_text().as_deref(), Some("Bot Wins!"));
        assert_eq!(game.winning_line(), Some([1, 4, 7]));
        assert_eq!(game.scores().o_wins, 1);
        assert_eq!(game.store().load_count(O_WINS_KEY), 1);
    }

    #[test]
    fn back_to_mode_clears_everything() {
        let mut game = vs_bot(Difficulty::Medium);
        game.click_cell(4, ms(0));
        game.back_to_mode();
        assert_eq!(game.phase(), Phase::ModeSelect);
        assert!(!game.bot_pending());
        assert!(game.board().is_empty());
        game.reset();
        assert_eq!(game.phase(), Phase::ModeSelect);
        assert_eq!(game.difficulty(), None);
    }

    #[test]
    fn stale_difficulty_does_not_skip_the_menu() {
        let mut game = vs_bot(Difficulty::Hard);
        game.back_to_mode();
        game.select_mode(Mode::PlayerVsBot);
        game.reset();
        assert_eq!(game.phase(), Phase::DifficultySelect);
        assert_eq!(game.difficulty(), None);
        assert!(!game.click_cell(0, ms(0)));

        game.select_difficulty(Difficulty::Easy);
        assert_eq!(game.phase(), Phase::Playing);
        assert_eq!(game.difficulty(), Some(Difficulty::Easy));
    }
}
