use std::{fmt, str::FromStr};

use crate::{color::Rgb, error::Error};

/// The pictures a puzzle can be cut from. Each is a diagonal two-colour
/// gradient running from the top-left corner to the bottom-right one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Photo {
    Violet,
    Blossom,
    Sky,
    Mint,
    Sunset,
    Abyss,
}

impl Photo {
    pub const ALL: [Photo; 6] = [
        Photo::Violet,
        Photo::Blossom,
        Photo::Sky,
        Photo::Mint,
        Photo::Sunset,
        Photo::Abyss,
    ];

    /// 1-based number shown on the selection screen.
    pub fn id(&self) -> u8 {
        match self {
            Photo::Violet => 1,
            Photo::Blossom => 2,
            Photo::Sky => 3,
            Photo::Mint => 4,
            Photo::Sunset => 5,
            Photo::Abyss => 6,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Photo::Violet => "Violet",
            Photo::Blossom => "Blossom",
            Photo::Sky => "Sky",
            Photo::Mint => "Mint",
            Photo::Sunset => "Sunset",
            Photo::Abyss => "Abyss",
        }
    }

    pub fn gradient(&self) -> (Rgb, Rgb) {
        match self {
            Photo::Violet => (Rgb::hex(0x667eea), Rgb::hex(0x764ba2)),
            Photo::Blossom => (Rgb::hex(0xf093fb), Rgb::hex(0xf5576c)),
            Photo::Sky => (Rgb::hex(0x4facfe), Rgb::hex(0x00f2fe)),
            Photo::Mint => (Rgb::hex(0x43e97b), Rgb::hex(0x38f9d7)),
            Photo::Sunset => (Rgb::hex(0xfa709a), Rgb::hex(0xfee140)),
            Photo::Abyss => (Rgb::hex(0x30cfd0), Rgb::hex(0x330867)),
        }
    }

    /// Colour of the picture piece at `row`, `col` of the solved 3×3 grid.
    pub fn piece(&self, row: usize, col: usize) -> Rgb {
        let (from, to) = self.gradient();
        from.mix(to, (row + col) as f32 / 4.0)
    }

    /// The whole picture, one coloured block per piece.
    pub fn preview(&self) -> String {
        (0..3)
            .map(|row| {
                (0..3)
                    .map(|col| {
                        let color = self.piece(row, col);
                        color.paint("      ", color).to_string()
                    })
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for Photo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.id(), self.name())
    }
}

impl FromStr for Photo {
    type Err = Error;

    /// Accepts the number or the name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Photo::ALL
            .into_iter()
            .find(|photo| photo.id().to_string() == s || photo.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::Unknown {
                kind: "photo",
                name: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_number_or_name() {
        assert_eq!("3".parse::<Photo>().unwrap(), Photo::Sky);
        assert_eq!("sunset".parse::<Photo>().unwrap(), Photo::Sunset);
        assert!("7".parse::<Photo>().is_err());
    }

    #[test]
    fn corners_are_the_gradient_ends() {
        let (from, to) = Photo::Abyss.gradient();
        assert_eq!(Photo::Abyss.piece(0, 0), from);
        assert_eq!(Photo::Abyss.piece(2, 2), to);
    }
}
