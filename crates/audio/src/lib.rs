//! Simple sound-effect playback stubs.

use common::GameResult;

/// Supported sound effect kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sound {
    /// UI click, also played when task progress ticks up.
    Click,
    /// Opening the mailbox overlay.
    MailOpen,
    /// A citizen answers a greeting.
    Greet,
    /// Task turned in for its reward.
    TaskComplete,
}

/// Basic audio manager storing volume level.
#[derive(Debug)]
pub struct AudioManager {
    volume: u8,
}

impl AudioManager {
    /// Creates a new manager with the given volume (0-10).
    pub fn new(volume: u8) -> Self {
        Self {
            volume: volume.min(10),
        }
    }

    /// Sets the playback volume (0-10).
    pub fn set_volume(&mut self, volume: u8) {
        self.volume = volume.min(10);
    }

    /// Returns current volume.
    pub fn volume(&self) -> u8 {
        self.volume
    }

    /// Plays the requested sound effect.
    pub fn play(&self, sound: Sound) -> GameResult<()> {
        log::debug!("play sound {:?} at volume {}", sound, self.volume);
        Ok(())
    }
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(5)
    }
}
