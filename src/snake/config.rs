use std::{fmt, str::FromStr, time::Duration};

use flagset::{flags, FlagSet};

use crate::{color::Rgb, error::Error};

pub const GRID_SIZE: i32 = 30;
pub const INITIAL_INTERVAL: Duration = Duration::from_millis(150);
pub const SPEED_INCREASE: Duration = Duration::from_millis(5);
pub const MIN_INTERVAL: Duration = Duration::from_millis(50);
pub const SPECIAL_FRUIT_CHANCE: f64 = 0.25;
pub const EFFECT_DURATION: Duration = Duration::from_secs(10);
pub const MESSAGE_DURATION: Duration = Duration::from_millis(2500);
pub const SPEED_BOOST_FACTOR: f64 = 0.6;
pub const SLOW_FACTOR: f64 = 1.5;
pub const POINTS_PER_FRUIT: u32 = 10;
pub const STAR_COUNT: usize = 100;

pub const HIGH_SCORE_KEY: &str = "snakeHighScore";
pub const THEME_KEY: &str = "selectedTheme";
pub const SKIN_KEY: &str = "selectedSnake";

flags! {
    pub enum ThemeFlag: u8 {
        GridLines = 0b0001,
        SnakeGlow = 0b0010,
        FoodGlow = 0b0100,
        Stars = 0b1000,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub background: Rgb,
    pub grid: Rgb,
    pub snake: Rgb,
    pub food: Rgb,
    pub text: Rgb,
    pub flags: FlagSet<ThemeFlag>,
}

impl Palette {
    pub fn has(&self, flag: ThemeFlag) -> bool {
        self.flags.contains(flag)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Theme {
    Nokia,
    Neon,
    Nature,
    Ocean,
    Desert,
    Space,
}

impl Theme {
    pub const ALL: [Theme; 6] = [Theme::Nokia, Theme::Neon, Theme::Nature, Theme::Ocean, Theme::Desert, Theme::Space];

    pub fn id(&self) -> &'static str {
        match self {
            Theme::Nokia => "nokia",
            Theme::Neon => "neon",
            Theme::Nature => "nature",
            Theme::Ocean => "ocean",
            Theme::Desert => "desert",
            Theme::Space => "space",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Theme::Nokia => "Nokia Classic",
            Theme::Neon => "Neon Cyberpunk",
            Theme::Nature => "Nature Forest",
            Theme::Ocean => "Ocean Blue",
            Theme::Desert => "Desert Sand",
            Theme::Space => "Space Galaxy",
        }
    }

    pub fn palette(&self) -> Palette {
        match self {
            Theme::Nokia => Palette {
                background: Rgb::hex(0x9bc700),
                grid: Rgb::hex(0x86a800),
                snake: Rgb::hex(0x000000),
                food: Rgb::hex(0x000000),
                text: Rgb::hex(0x000000),
                flags: ThemeFlag::GridLines.into(),
            },
            Theme::Neon => Palette {
                background: Rgb::hex(0x0a0a1a),
                grid: Rgb::hex(0x1a1a2e),
                snake: Rgb::hex(0x00f5ff),
                food: Rgb::hex(0xff00ff),
                text: Rgb::hex(0x00f5ff),
                flags: ThemeFlag::GridLines | ThemeFlag::SnakeGlow | ThemeFlag::FoodGlow,
            },
            Theme::Nature => Palette {
                background: Rgb::hex(0xa8e063),
                grid: Rgb::hex(0x8bc34a),
                snake: Rgb::hex(0x2e7d32),
                food: Rgb::hex(0xd32f2f),
                text: Rgb::hex(0x1b5e20),
                flags: FlagSet::default(),
            },
            Theme::Ocean => Palette {
                background: Rgb::hex(0x1bffff),
                grid: Rgb::hex(0x00bcd4),
                snake: Rgb::hex(0x0d47a1),
                food: Rgb::hex(0xff6f00),
                text: Rgb::hex(0x01579b),
                flags: FlagSet::default(),
            },
            Theme::Desert => Palette {
                background: Rgb::hex(0xf7b733),
                grid: Rgb::hex(0xf39c12),
                snake: Rgb::hex(0x8b4513),
                food: Rgb::hex(0x27ae60),
                text: Rgb::hex(0x6d4c41),
                flags: FlagSet::default(),
            },
            Theme::Space => Palette {
                background: Rgb::hex(0x000428),
                grid: Rgb::hex(0x001845),
                snake: Rgb::hex(0x7b2cbf),
                food: Rgb::hex(0xffea00),
                text: Rgb::hex(0xffffff),
                flags: ThemeFlag::SnakeGlow | ThemeFlag::FoodGlow | ThemeFlag::Stars,
            },
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::Nokia
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Theme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Theme::ALL
            .into_iter()
            .find(|theme| theme.id() == s.trim())
            .ok_or_else(|| Error::Unknown {
                kind: "theme",
                name: s.to_string(),
            })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Skin {
    Classic,
    Gradient,
    Striped,
    Rainbow,
}

impl Skin {
    pub const ALL: [Skin; 4] = [Skin::Classic, Skin::Gradient, Skin::Striped, Skin::Rainbow];

    pub fn id(&self) -> &'static str {
        match self {
            Skin::Classic => "classic",
            Skin::Gradient => "gradient",
            Skin::Striped => "striped",
            Skin::Rainbow => "rainbow",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Skin::Classic => "Classic",
            Skin::Gradient => "Gradient",
            Skin::Striped => "Striped",
            Skin::Rainbow => "Rainbow",
        }
    }
}

impl Default for Skin {
    fn default() -> Self {
        Skin::Classic
    }
}

impl fmt::Display for Skin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Skin {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Skin::ALL
            .into_iter()
            .find(|skin| skin.id() == s.trim())
            .ok_or_else(|| Error::Unknown {
                kind: "snake skin",
                name: s.to_string(),
            })
    }
}
