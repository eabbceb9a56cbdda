//! Best-effort sound. Playback never blocks or fails a game.

use std::io::{self, Write};

pub trait Tone {
    /// Plays a short tone. Implementations swallow their own failures.
    fn play(&mut self, frequency: u32);
}

/// Rings the terminal bell, ignoring the pitch it cannot reproduce.
#[derive(Debug, Default)]
pub struct Bell;

impl Bell {
    fn ring(&self) -> io::Result<()> {
        let mut out = io::stdout();
        out.write_all(b"\x07")?;
        out.flush()
    }
}

impl Tone for Bell {
    fn play(&mut self, frequency: u32) {
        log::debug!("tone {} Hz", frequency);
        if let Err(e) = self.ring() {
            log::warn!("audio playback error: {}", e);
        }
    }
}

#[derive(Debug, Default)]
pub struct Silent;

impl Tone for Silent {
    fn play(&mut self, _frequency: u32) {}
}

/// Records every requested frequency.
#[derive(Debug, Default)]
pub struct Recorder {
    pub played: Vec<u32>,
}

impl Tone for Recorder {
    fn play(&mut self, frequency: u32) {
        self.played.push(frequency);
    }
}
