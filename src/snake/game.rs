use std::{collections::VecDeque, time::Duration};

use rand::{rngs::ThreadRng, seq::SliceRandom, Rng};

use super::{
    config::*,
    fruit::{Effect, FruitKind},
};
use crate::{audio::Tone, schedule::Timers, store::Store};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }

    pub fn step(&self, direction: Direction) -> Point {
        let (dx, dy) = direction.delta();
        Point::new(self.x + dx, self.y + dy)
    }

    pub fn in_grid(&self) -> bool {
        (0..GRID_SIZE).contains(&self.x) && (0..GRID_SIZE).contains(&self.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn is_horizontal(&self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Food {
    pub position: Point,
    pub kind: FruitKind,
}

/// Timed interval changes. Double length is instant and never active.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActiveEffect {
    Speed,
    Slow,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Timer {
    Tick,
    Effect,
    Message,
}

const START_BODY: [Point; 3] = [Point::new(15, 15), Point::new(14, 15), Point::new(13, 15)];

/// The Snake game loop.
///
/// Movement runs on a repeating tick whose period is the current interval.
/// Whenever the interval changes the tick is cancelled and re-armed, and
/// game over drops every timer.
pub struct SnakeGame<S, A, R = ThreadRng> {
    snake: VecDeque<Point>,
    direction: Direction,
    next_direction: Direction,
    food: Food,
    score: u32,
    high_score: u32,
    new_high_score: bool,
    base_interval: Duration,
    interval: Duration,
    active_effect: Option<ActiveEffect>,
    running: bool,
    paused: bool,
    message: Option<String>,
    theme: Theme,
    skin: Skin,
    timers: Timers<Timer>,
    store: S,
    audio: A,
    rng: R,
}

impl<S: Store, A: Tone> SnakeGame<S, A> {
    pub fn new(store: S, audio: A) -> Self {
        SnakeGame::with_rng(store, audio, rand::thread_rng())
    }
}

impl<S: Store, A: Tone, R: Rng> SnakeGame<S, A, R> {
    pub fn with_rng(store: S, audio: A, rng: R) -> Self {
        let theme = store
            .get(THEME_KEY)
            .and_then(|id| id.parse().ok())
            .unwrap_or_default();
        let skin = store
            .get(SKIN_KEY)
            .and_then(|id| id.parse().ok())
            .unwrap_or_default();
        let mut game = SnakeGame {
            snake: VecDeque::from(START_BODY.to_vec()),
            direction: Direction::Right,
            next_direction: Direction::Right,
            food: Food {
                position: Point::new(0, 0),
                kind: FruitKind::Regular,
            },
            score: 0,
            high_score: store.load_count(HIGH_SCORE_KEY),
            new_high_score: false,
            base_interval: INITIAL_INTERVAL,
            interval: INITIAL_INTERVAL,
            active_effect: None,
            running: false,
            paused: false,
            message: None,
            theme,
            skin,
            timers: Timers::new(),
            store,
            audio,
            rng,
        };
        game.generate_food();
        game
    }

    // ##############################
    // # Accessors
    // ##############################

    pub fn snake(&self) -> &VecDeque<Point> {
        &self.snake
    }

    pub fn head(&self) -> Point {
        self.snake.front().copied().unwrap_or(START_BODY[0])
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn food(&self) -> Food {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// Whether the last game over set a new high score.
    pub fn new_high_score(&self) -> bool {
        self.new_high_score
    }

    pub fn base_interval(&self) -> Duration {
        self.base_interval
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn active_effect(&self) -> Option<ActiveEffect> {
        self.active_effect
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn skin(&self) -> Skin {
        self.skin
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    pub fn has_pending_timers(&self) -> bool {
        !self.timers.is_empty()
    }

    // ##############################
    // # Configuration
    // ##############################

    pub fn select_theme(&mut self, theme: Theme) {
        self.theme = theme;
        self.store.save(THEME_KEY, theme.id());
        log::info!("theme: {}", theme.id());
    }

    pub fn select_skin(&mut self, skin: Skin) {
        self.skin = skin;
        self.store.save(SKIN_KEY, skin.id());
        log::info!("snake skin: {}", skin.id());
    }

    /// Replaces the snake, head first. Intended for setting up scenarios.
    pub fn set_body(&mut self, body: impl IntoIterator<Item = Point>, direction: Direction) {
        self.snake = body.into_iter().collect();
        self.direction = direction;
        self.next_direction = direction;
    }

    pub fn place_food(&mut self, position: Point, kind: FruitKind) {
        self.food = Food { position, kind };
    }

    // ##############################
    // # Input
    // ##############################

    pub fn start(&mut self, now: Duration) {
        self.reset();
        self.running = true;
        self.new_high_score = false;
        self.timers.every(Timer::Tick, self.interval, now);
        log::info!("snake started, high score {}", self.high_score);
    }

    /// Back to the opening position, stopped. `start` sets it running.
    pub fn reset(&mut self) {
        self.timers.clear();
        self.running = false;
        self.paused = false;
        self.snake = VecDeque::from(START_BODY.to_vec());
        self.direction = Direction::Right;
        self.next_direction = Direction::Right;
        self.score = 0;
        self.base_interval = INITIAL_INTERVAL;
        self.interval = INITIAL_INTERVAL;
        self.active_effect = None;
        self.message = None;
        self.generate_food();
    }

    /// A direction key. Unpauses a paused game instead of steering, and only
    /// turns perpendicular to the direction of the last committed move.
    pub fn turn(&mut self, direction: Direction) {
        if !self.running {
            return;
        }
        if self.paused {
            self.toggle_pause();
            return;
        }
        if direction.is_horizontal() != self.direction.is_horizontal() {
            self.next_direction = direction;
        }
    }

    pub fn toggle_pause(&mut self) {
        if !self.running {
            return;
        }
        self.paused = !self.paused;
        log::debug!("paused: {}", self.paused);
    }

    /// Runs every timer due at `now`.
    pub fn advance(&mut self, now: Duration) {
        while let Some(timer) = self.timers.pop_due(now) {
            match timer {
                Timer::Tick => self.tick(now),
                Timer::Effect => self.clear_active_effect(now),
                Timer::Message => self.message = None,
            }
        }
    }

    // ##############################
    // # Game Loop
    // ##############################

    fn tick(&mut self, now: Duration) {
        if !self.running || self.paused {
            return;
        }

        self.direction = self.next_direction;
        let head = self.head().step(self.direction);

        if self.collides(head) {
            self.game_over();
            return;
        }

        self.snake.push_front(head);

        if head == self.food.position {
            self.score += POINTS_PER_FRUIT;
            let kind = self.food.kind;
            self.apply_fruit_effect(kind, now);
            self.generate_food();

            if self.base_interval > MIN_INTERVAL {
                self.base_interval = self.base_interval.saturating_sub(SPEED_INCREASE).max(MIN_INTERVAL);
                if self.active_effect.is_none() {
                    self.set_interval(self.base_interval, now);
                }
            }
        } else {
            self.snake.pop_back();
        }
    }

    /// Walls and every current segment, tail included.
    fn collides(&self, head: Point) -> bool {
        !head.in_grid() || self.snake.contains(&head)
    }

    fn set_interval(&mut self, interval: Duration, now: Duration) {
        self.interval = interval;
        if self.running {
            self.timers.every(Timer::Tick, interval, now);
        }
    }

    fn generate_food(&mut self) {
        let free: Vec<Point> = (0..GRID_SIZE)
            .flat_map(|y| (0..GRID_SIZE).map(move |x| Point::new(x, y)))
            .filter(|cell| !self.snake.contains(cell))
            .collect();
        let Some(&position) = free.choose(&mut self.rng) else {
            log::warn!("no free cell left for food");
            return;
        };
        let kind = FruitKind::random(&mut self.rng);
        self.food = Food { position, kind };
    }

    // ##############################
    // # Effects
    // ##############################

    fn apply_fruit_effect(&mut self, kind: FruitKind, now: Duration) {
        self.audio.play(kind.sound_frequency());
        log::debug!("ate {} fruit, score {}", kind.name(), self.score);

        match kind.effect() {
            Effect::None => {}
            Effect::Random => {
                let chosen = *Effect::MYSTERY_POOL.choose(&mut self.rng).unwrap_or(&Effect::Double);
                self.apply_effect(chosen, now);
                self.show_message(format!("MYSTERY: {}", chosen.label()), now);
                return;
            }
            effect => self.apply_effect(effect, now),
        }

        if let Some(message) = kind.message() {
            self.show_message(message.to_string(), now);
        }
    }

    fn apply_effect(&mut self, effect: Effect, now: Duration) {
        match effect {
            Effect::Speed => {
                let interval = self.base_interval.mul_f64(SPEED_BOOST_FACTOR).max(MIN_INTERVAL);
                self.start_timed_effect(ActiveEffect::Speed, interval, now);
            }
            Effect::Slow => {
                let interval = self.base_interval.mul_f64(SLOW_FACTOR);
                self.start_timed_effect(ActiveEffect::Slow, interval, now);
            }
            Effect::Double => {
                if let Some(&tail) = self.snake.back() {
                    let length = self.snake.len();
                    self.snake.extend(std::iter::repeat(tail).take(length));
                }
            }
            Effect::None | Effect::Random => {}
        }
    }

    fn start_timed_effect(&mut self, effect: ActiveEffect, interval: Duration, now: Duration) {
        self.clear_active_effect(now);
        self.active_effect = Some(effect);
        self.set_interval(interval, now);
        self.timers.once(Timer::Effect, EFFECT_DURATION, now);
    }

    fn clear_active_effect(&mut self, now: Duration) {
        self.timers.cancel(Timer::Effect);
        if self.active_effect.take().is_some() {
            self.set_interval(self.base_interval, now);
        }
    }

    fn show_message(&mut self, message: String, now: Duration) {
        self.message = Some(message);
        self.timers.once(Timer::Message, MESSAGE_DURATION, now);
    }

    fn game_over(&mut self) {
        self.running = false;
        self.timers.clear();
        self.active_effect = None;
        self.interval = self.base_interval;
        self.message = None;

        self.new_high_score = self.score > self.high_score;
        if self.new_high_score {
            self.high_score = self.score;
            self.store.save(HIGH_SCORE_KEY, &self.high_score.to_string());
        }
        log::info!(
            "game over: score {}, high score {}{}",
            self.score,
            self.high_score,
            if self.new_high_score { " (new)" } else { "" }
        );
    }
}
