//! Snake on a 30×30 grid with special fruits, themes and skins.

pub mod config;
pub mod fruit;
pub mod game;
pub mod render;

pub use config::{Palette, Skin, Theme, ThemeFlag, GRID_SIZE};
pub use fruit::{Effect, FruitKind};
pub use game::{ActiveEffect, Direction, Food, Point, SnakeGame};
pub use render::{status_line, Paint, Painter, SnakeView};
