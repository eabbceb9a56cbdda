use colored::Colorize;
use rand::Rng;

use super::{
    config::{Palette, Skin, Theme, ThemeFlag, GRID_SIZE, STAR_COUNT},
    game::{Point, SnakeGame},
};
use crate::{audio::Tone, color::Rgb, store::Store};

const RAINBOW: [Rgb; 7] = [
    Rgb::hex(0xff0000),
    Rgb::hex(0xff7f00),
    Rgb::hex(0xffff00),
    Rgb::hex(0x00ff00),
    Rgb::hex(0x0000ff),
    Rgb::hex(0x4b0082),
    Rgb::hex(0x9400d3),
];

/// Colour and glow of one snake segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Paint {
    pub color: Rgb,
    pub glow: bool,
}

/// A skin resolved against a palette. Built once per theme/skin change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Painter {
    Solid { color: Rgb, glow: bool },
    Gradient { color: Rgb, shade: Rgb, background: Rgb },
    Striped { even: Rgb, odd: Rgb },
    Rainbow { glow: bool },
}

impl Painter {
    pub fn new(skin: Skin, palette: &Palette) -> Painter {
        let glow = palette.has(ThemeFlag::SnakeGlow);
        match skin {
            Skin::Classic => Painter::Solid {
                color: palette.snake,
                glow,
            },
            Skin::Gradient => Painter::Gradient {
                color: palette.snake,
                shade: palette.snake.adjust_brightness(-30),
                background: palette.background,
            },
            Skin::Striped => Painter::Striped {
                even: palette.snake,
                odd: palette.snake.adjust_brightness(30),
            },
            Skin::Rainbow => Painter::Rainbow { glow },
        }
    }

    /// Segment `index` of a snake `length` long, head at 0.
    pub fn paint(&self, index: usize, length: usize) -> Paint {
        match *self {
            Painter::Solid { color, glow } => Paint { color, glow },
            Painter::Gradient {
                color,
                shade,
                background,
            } => {
                // fades to half opacity at the tail
                let fade = index as f32 / length.max(1) as f32 * 0.5;
                Paint {
                    color: color.mix(shade, 0.5).mix(background, fade),
                    glow: false,
                }
            }
            Painter::Striped { even, odd } => Paint {
                color: if index % 2 == 0 { even } else { odd },
                glow: false,
            },
            Painter::Rainbow { glow } => Paint {
                color: RAINBOW[index % RAINBOW.len()],
                glow,
            },
        }
    }
}

impl Skin {
    pub fn painter(&self, theme: Theme) -> Painter {
        Painter::new(*self, &theme.palette())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Star {
    position: Point,
    opacity: f32,
}

/// Terminal view of a snake game: two columns per cell.
pub struct SnakeView {
    palette: Palette,
    painter: Painter,
    stars: Vec<Star>,
}

impl SnakeView {
    pub fn new<R: Rng>(theme: Theme, skin: Skin, rng: &mut R) -> Self {
        let palette = theme.palette();
        let stars = if palette.has(ThemeFlag::Stars) {
            (0..STAR_COUNT)
                .map(|_| Star {
                    position: Point::new(rng.gen_range(0..GRID_SIZE), rng.gen_range(0..GRID_SIZE)),
                    opacity: rng.gen(),
                })
                .collect()
        } else {
            Vec::new()
        };
        SnakeView {
            palette,
            painter: Painter::new(skin, &palette),
            stars,
        }
    }

    pub fn star_count(&self) -> usize {
        self.stars.len()
    }

    /// One string per grid row followed by the status line.
    pub fn render<S: Store, A: Tone, R: Rng>(&self, game: &SnakeGame<S, A, R>) -> Vec<String> {
        let background = self.palette.background;
        let mut cells = vec![vec![self.empty_cell(); GRID_SIZE as usize]; GRID_SIZE as usize];

        for star in &self.stars {
            let color = Rgb::WHITE.mix(background, 1.0 - star.opacity);
            cells[star.position.y as usize][star.position.x as usize] = color.paint("· ", background).to_string();
        }

        let food = game.food();
        if food.position.in_grid() {
            let color = food.kind.color().unwrap_or(self.palette.food);
            let glyph = if food.kind.is_special() { "◉ " } else { "● " };
            let mut cell = color.paint(glyph, background);
            if self.palette.has(ThemeFlag::FoodGlow) || food.kind.is_special() {
                cell = cell.bold();
            }
            cells[food.position.y as usize][food.position.x as usize] = cell.to_string();
        }

        let length = game.snake().len();
        for (index, segment) in game.snake().iter().enumerate() {
            if !segment.in_grid() {
                continue;
            }
            let paint = self.painter.paint(index, length);
            let mut cell = paint.color.paint("██", background);
            if paint.glow {
                cell = cell.bold();
            }
            cells[segment.y as usize][segment.x as usize] = cell.to_string();
        }

        let mut lines: Vec<String> = cells.into_iter().map(|row| row.concat()).collect();
        lines.push(self.palette.text.paint(&status_line(game), background).to_string());
        lines
    }

    fn empty_cell(&self) -> String {
        if self.palette.has(ThemeFlag::GridLines) {
            self.palette.grid.paint("· ", self.palette.background).to_string()
        } else {
            self.palette.grid.paint("  ", self.palette.background).to_string()
        }
    }
}

pub fn status_line<S: Store, A: Tone, R: Rng>(game: &SnakeGame<S, A, R>) -> String {
    let mut line = format!("Score: {}  High: {}", game.score(), game.high_score());
    if let Some(message) = game.message() {
        line.push_str(&format!("  {}", message));
    }
    if game.is_paused() {
        line.push_str("  PAUSED");
    } else if !game.is_running() && game.new_high_score() {
        line.push_str("  NEW HIGH SCORE!");
    }
    line
}
