use colored::{ColoredString, Colorize};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(0xff, 0xff, 0xff);

    pub const fn hex(value: u32) -> Self {
        Rgb((value >> 16) as u8, (value >> 8) as u8, value as u8)
    }

    /// Shifts every channel by `amount`, clamped to the valid range.
    pub fn adjust_brightness(&self, amount: i16) -> Rgb {
        let shift = |channel: u8| (channel as i16 + amount).clamp(0, 255) as u8;
        Rgb(shift(self.0), shift(self.1), shift(self.2))
    }

    /// Linear blend, `t = 0` keeps `self`, `t = 1` gives `other`.
    pub fn mix(&self, other: Rgb, t: f32) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let lerp = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Rgb(lerp(self.0, other.0), lerp(self.1, other.1), lerp(self.2, other.2))
    }

    pub fn paint(&self, text: &str, background: Rgb) -> ColoredString {
        text.truecolor(self.0, self.1, self.2)
            .on_truecolor(background.0, background.1, background.2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_splits_channels() {
        assert_eq!(Rgb::hex(0x9bc700), Rgb(0x9b, 0xc7, 0x00));
    }

    #[test]
    fn brightness_clamps() {
        assert_eq!(Rgb(250, 10, 128).adjust_brightness(30), Rgb(255, 40, 158));
        assert_eq!(Rgb(20, 10, 128).adjust_brightness(-30), Rgb(0, 0, 98));
    }

    #[test]
    fn mix_endpoints() {
        let a = Rgb(0, 0, 0);
        let b = Rgb(200, 100, 50);
        assert_eq!(a.mix(b, 0.0), a);
        assert_eq!(a.mix(b, 1.0), b);
        assert_eq!(a.mix(b, 0.5), Rgb(100, 50, 25));
    }
}
