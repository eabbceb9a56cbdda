use std::{
    io::{self, Stdout, Write},
    time::{Duration, Instant},
};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};

use minigames::{
    audio::Bell,
    snake::{Direction, Skin, SnakeGame, SnakeView, Theme},
    store::Store,
    Result,
};

/// How long to wait for a key when no timer is armed.
const IDLE_POLL: Duration = Duration::from_millis(250);

const HELP: &str = "arrows/WASD steer  space pause  t theme  k skin  enter start  q quit";

enum Key {
    Turn(Direction),
    Pause,
    Start,
    NextTheme,
    NextSkin,
    Quit,
}

fn map_key(key: KeyEvent) -> Option<Key> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Key::Quit);
    }
    match key.code {
        KeyCode::Up | KeyCode::Char('w') => Some(Key::Turn(Direction::Up)),
        KeyCode::Down | KeyCode::Char('s') => Some(Key::Turn(Direction::Down)),
        KeyCode::Left | KeyCode::Char('a') => Some(Key::Turn(Direction::Left)),
        KeyCode::Right | KeyCode::Char('d') => Some(Key::Turn(Direction::Right)),
        KeyCode::Char(' ') | KeyCode::Esc => Some(Key::Pause),
        KeyCode::Enter => Some(Key::Start),
        KeyCode::Char('t') => Some(Key::NextTheme),
        KeyCode::Char('k') => Some(Key::NextSkin),
        KeyCode::Char('q') => Some(Key::Quit),
        _ => None,
    }
}

/// While paused every key except quit only resumes the game.
fn while_paused(key: Key, paused: bool) -> Key {
    match key {
        Key::Quit => Key::Quit,
        _ if paused => Key::Pause,
        key => key,
    }
}

fn next<T: Copy + PartialEq>(all: &[T], current: T) -> T {
    let position = all.iter().position(|&item| item == current).unwrap_or(0);
    all[(position + 1) % all.len()]
}

pub fn run<S: Store>(store: S, theme: Option<Theme>, skin: Option<Skin>) -> Result<()> {
    let mut game = SnakeGame::new(store, Bell);
    if let Some(theme) = theme {
        game.select_theme(theme);
    }
    if let Some(skin) = skin {
        game.select_skin(skin);
    }

    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    let outcome = match execute!(stdout, EnterAlternateScreen, cursor::Hide) {
        Ok(()) => play(&mut game, &mut stdout),
        Err(e) => Err(e.into()),
    };
    restore(&mut stdout, terminal::disable_raw_mode);
    outcome
}

/// Leaves the alternate screen and raw mode. Each step runs even if the
/// other fails; failures are logged.
fn restore<W: Write>(out: &mut W, disable_raw_mode: impl FnOnce() -> io::Result<()>) {
    if let Err(e) = execute!(out, cursor::Show, LeaveAlternateScreen) {
        log::warn!("could not leave the alternate screen: {}", e);
    }
    if let Err(e) = disable_raw_mode() {
        log::warn!("could not leave raw mode: {}", e);
    }
}

fn play<S: Store>(game: &mut SnakeGame<S, Bell>, stdout: &mut Stdout) -> Result<()> {
    let mut rng = rand::thread_rng();
    let mut view = SnakeView::new(game.theme(), game.skin(), &mut rng);
    let start = Instant::now();
    game.start(start.elapsed());

    loop {
        draw(game, &view, stdout)?;

        let timeout = game
            .next_deadline()
            .map(|deadline| deadline.saturating_sub(start.elapsed()))
            .unwrap_or(IDLE_POLL);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match map_key(key).map(|key| while_paused(key, game.is_paused())) {
                        Some(Key::Turn(direction)) => game.turn(direction),
                        Some(Key::Pause) => game.toggle_pause(),
                        Some(Key::Start) if !game.is_running() => game.start(start.elapsed()),
                        Some(Key::NextTheme) => {
                            game.select_theme(next(&Theme::ALL, game.theme()));
                            view = SnakeView::new(game.theme(), game.skin(), &mut rng);
                        }
                        Some(Key::NextSkin) => {
                            game.select_skin(next(&Skin::ALL, game.skin()));
                            view = SnakeView::new(game.theme(), game.skin(), &mut rng);
                        }
                        Some(Key::Quit) => return Ok(()),
                        Some(Key::Start) | None => {}
                    }
                }
            }
        }

        game.advance(start.elapsed());
    }
}

fn draw<S: Store>(game: &SnakeGame<S, Bell>, view: &SnakeView, stdout: &mut Stdout) -> Result<()> {
    queue!(stdout, cursor::MoveTo(0, 0), Clear(ClearType::All))?;
    for line in view.render(game) {
        write!(stdout, "{}\r\n", line)?;
    }
    let footer = if game.is_running() {
        format!("{} | {}", game.theme(), game.skin())
    } else {
        String::from("GAME OVER. Press enter to play again.")
    };
    write!(stdout, "{}\r\n{}\r\n", footer, HELP)?;
    stdout.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wasd_and_arrows_steer() {
        let key = |code| KeyEvent::new(code, KeyModifiers::NONE);
        assert!(matches!(map_key(key(KeyCode::Char('w'))), Some(Key::Turn(Direction::Up))));
        assert!(matches!(map_key(key(KeyCode::Left)), Some(Key::Turn(Direction::Left))));
        assert!(matches!(map_key(key(KeyCode::Esc)), Some(Key::Pause)));
        assert!(matches!(
            map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Key::Quit)
        ));
    }

    #[test]
    fn any_key_but_quit_resumes_a_paused_game() {
        assert!(matches!(while_paused(Key::NextTheme, true), Key::Pause));
        assert!(matches!(while_paused(Key::NextSkin, true), Key::Pause));
        assert!(matches!(while_paused(Key::Turn(Direction::Up), true), Key::Pause));
        assert!(matches!(while_paused(Key::Quit, true), Key::Quit));
        assert!(matches!(while_paused(Key::NextTheme, false), Key::NextTheme));
    }

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
    }

    #[test]
    fn raw_mode_is_left_even_when_the_screen_is_not() {
        let mut left_raw_mode = false;
        restore(&mut Broken, || {
            left_raw_mode = true;
            Ok(())
        });
        assert!(left_raw_mode);
    }

    #[test]
    fn restore_writes_the_leave_sequences() {
        let mut out = Vec::new();
        restore(&mut out, || Ok(()));
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\x1b[?25h"));
        assert!(text.contains("\x1b[?1049l"));
    }

    #[test]
    fn cycling_wraps_around() {
        assert_eq!(next(&Theme::ALL, Theme::Space), Theme::Nokia);
        assert_eq!(next(&Skin::ALL, Skin::Classic), Skin::Gradient);
    }
}
