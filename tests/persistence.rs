use std::{fs, path::PathBuf, time::Duration};

use minigames::{
    audio::Silent,
    snake::{Direction, FruitKind, Point, SnakeGame, Skin, Theme},
    store::{FileStore, Store},
    tictactoe::{Mode, Phase, GameResult, Scoreboard, TicTacToe},
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn scratch(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("minigames-it-{}-{}.json", name, std::process::id()));
    let _ = fs::remove_file(&path);
    path
}

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

#[test]
fn snake_high_score_and_preferences_survive_a_restart() {
    let path = scratch("snake");
    {
        let store = FileStore::open(&path).unwrap();
        let mut game = SnakeGame::with_rng(store, Silent, ChaCha8Rng::seed_from_u64(3));
        game.select_theme(Theme::Ocean);
        game.select_skin(Skin::Rainbow);
        game.start(ms(0));
        game.set_body([Point::new(28, 15), Point::new(27, 15), Point::new(26, 15)], Direction::Right);
        game.place_food(Point::new(29, 15), FruitKind::Regular);

        game.advance(ms(150));
        assert_eq!(game.score(), 10);
        assert_eq!(game.base_interval(), ms(145));

        game.advance(ms(295));
        assert!(!game.is_running());
        assert!(game.new_high_score());
    }

    let store = FileStore::open(&path).unwrap();
    assert_eq!(store.load_count("snakeHighScore"), 10);
    let game = SnakeGame::with_rng(store, Silent, ChaCha8Rng::seed_from_u64(4));
    assert_eq!(game.high_score(), 10);
    assert_eq!(game.theme(), Theme::Ocean);
    assert_eq!(game.skin(), Skin::Rainbow);
    let _ = fs::remove_file(&path);
}

#[test]
fn tictactoe_scores_survive_a_restart() {
    let path = scratch("tictactoe");
    {
        let store = FileStore::open(&path).unwrap();
        let mut game = TicTacToe::with_rng(store, ChaCha8Rng::seed_from_u64(1));
        game.select_mode(Mode::PlayerVsPlayer);
        for index in [0, 3, 1, 4, 2] {
            assert!(game.click_cell(index, ms(0)));
        }
        assert_eq!(game.phase(), Phase::Over(GameResult::XWins));
        assert_eq!(game.result_text().as_deref(), Some("Player X Wins!"));
    }

    let store = FileStore::open(&path).unwrap();
    let scores = Scoreboard::load(&store);
    assert_eq!(scores.x_wins, 1);
    assert_eq!(scores.o_wins, 0);
    assert_eq!(scores.draws, 0);
    let _ = fs::remove_file(&path);
}

#[test]
fn corrupt_counts_read_as_zero() {
    let path = scratch("corrupt");
    fs::write(&path, r#"{"snakeHighScore": "lots"}"#).unwrap();
    let store = FileStore::open(&path).unwrap();
    assert_eq!(store.load_count("snakeHighScore"), 0);
    let _ = fs::remove_file(&path);
}
