use rand::{seq::SliceRandom, Rng};

use super::config::SPECIAL_FRUIT_CHANCE;
use crate::color::Rgb;

/// What eating a fruit does to the snake.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    None,
    Speed,
    Slow,
    Double,
    /// One of speed, slow or double, drawn when eaten.
    Random,
}

impl Effect {
    pub const MYSTERY_POOL: [Effect; 3] = [Effect::Speed, Effect::Slow, Effect::Double];

    pub fn label(&self) -> &'static str {
        match self {
            Effect::None => "",
            Effect::Speed => "SPEED BOOST!",
            Effect::Slow => "SLOWED DOWN!",
            Effect::Double => "DOUBLE LENGTH!",
            Effect::Random => "MYSTERY FRUIT!",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FruitKind {
    Regular,
    SpeedBoost,
    Slow,
    DoubleLength,
    Mystery,
}

impl FruitKind {
    pub const SPECIAL: [FruitKind; 4] = [
        FruitKind::SpeedBoost,
        FruitKind::Slow,
        FruitKind::DoubleLength,
        FruitKind::Mystery,
    ];

    /// Regular three times out of four, otherwise a uniformly drawn special.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> FruitKind {
        if rng.gen_bool(SPECIAL_FRUIT_CHANCE) {
            *FruitKind::SPECIAL.choose(rng).unwrap_or(&FruitKind::Regular)
        } else {
            FruitKind::Regular
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FruitKind::Regular => "Regular",
            FruitKind::SpeedBoost => "Speed Boost",
            FruitKind::Slow => "Slow",
            FruitKind::DoubleLength => "Double Length",
            FruitKind::Mystery => "Mystery",
        }
    }

    pub fn effect(&self) -> Effect {
        match self {
            FruitKind::Regular => Effect::None,
            FruitKind::SpeedBoost => Effect::Speed,
            FruitKind::Slow => Effect::Slow,
            FruitKind::DoubleLength => Effect::Double,
            FruitKind::Mystery => Effect::Random,
        }
    }

    /// Own colour; regular fruit takes the theme's food colour.
    pub fn color(&self) -> Option<Rgb> {
        match self {
            FruitKind::Regular => None,
            FruitKind::SpeedBoost => Some(Rgb::hex(0xff6b35)),
            FruitKind::Slow => Some(Rgb::hex(0x74c0fc)),
            FruitKind::DoubleLength => Some(Rgb::hex(0xffd700)),
            FruitKind::Mystery => Some(Rgb::hex(0xb197fc)),
        }
    }

    pub fn message(&self) -> Option<&'static str> {
        match self {
            FruitKind::Regular => None,
            FruitKind::SpeedBoost => Some("SPEED BOOST! +10s"),
            FruitKind::Slow => Some("SLOWED DOWN! 10s"),
            FruitKind::DoubleLength => Some("DOUBLE LENGTH!"),
            FruitKind::Mystery => Some("MYSTERY FRUIT!"),
        }
    }

    pub fn sound_frequency(&self) -> u32 {
        match self {
            FruitKind::Regular => 440,
            FruitKind::SpeedBoost => 880,
            FruitKind::Slow => 220,
            FruitKind::DoubleLength => 660,
            FruitKind::Mystery => 550,
        }
    }

    pub fn is_special(&self) -> bool {
        *self != FruitKind::Regular
    }
}
