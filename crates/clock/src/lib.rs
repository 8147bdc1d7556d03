//! In-game clock: converts elapsed real time into game minutes.

use common::{GameError, GameResult};

/// Minutes in one in-game day.
pub const MINUTES_PER_DAY: u32 = 24 * 60;
/// Minute of day every session and every new day starts at (08:00).
pub const DAY_START_MINUTES: u32 = 8 * 60;
/// Real-time multiplier in [`TimeMode::Normal`].
pub const DEFAULT_TIME_SPEED: f64 = 1.0;
/// Real-time multiplier in [`TimeMode::Fast`].
pub const FAST_TIME_SPEED: f64 = 4.0;

const WORK_START_HOUR: u32 = 9;
// Inclusive: working hours run 09:00 up to but not including 17:00.
const WORK_END_HOUR: u32 = 16;

/// Host-selectable simulation speed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeMode {
    Normal,
    Fast,
    Paused,
}

impl TimeMode {
    /// Real-to-game speed multiplier for this mode.
    pub fn multiplier(self) -> f64 {
        match self {
            TimeMode::Normal => DEFAULT_TIME_SPEED,
            TimeMode::Fast => FAST_TIME_SPEED,
            TimeMode::Paused => 0.0,
        }
    }

    /// Label shown in the HUD.
    pub fn label(self) -> &'static str {
        match self {
            TimeMode::Normal => "Normal",
            TimeMode::Fast => "Fast",
            TimeMode::Paused => "Paused",
        }
    }
}

/// Fixed-ratio converter from elapsed real milliseconds to game minutes.
///
/// The fractional real-time residue is carried between updates so minute
/// increments stay exact over time: after every [`Clock::advance`] the
/// accumulator is in `[0, ms_per_game_minute)`.
#[derive(Clone, Debug)]
pub struct Clock {
    minutes_of_day: u32,
    day: u32,
    mode: TimeMode,
    ms_per_game_minute: f64,
    accumulated_ms: f64,
}

impl Clock {
    /// Creates a clock at day 1 and the given minute of day.
    ///
    /// `ms_per_game_minute` comes from the manifest and is the only thing
    /// that can be misconfigured here; it must be finite and positive.
    pub fn new(ms_per_game_minute: f64, start_minutes: u32) -> GameResult<Self> {
        if !ms_per_game_minute.is_finite() || ms_per_game_minute <= 0.0 {
            return Err(GameError::Config(format!(
                "real_ms_per_ingame_minute must be positive, got {}",
                ms_per_game_minute
            )));
        }
        if start_minutes >= MINUTES_PER_DAY {
            return Err(GameError::Config(format!(
                "start minute {} outside a day",
                start_minutes
            )));
        }
        Ok(Self {
            minutes_of_day: start_minutes,
            day: 1,
            mode: TimeMode::Paused,
            ms_per_game_minute,
            accumulated_ms: 0.0,
        })
    }

    /// Advances the clock by `elapsed_ms` real milliseconds at `speed`.
    ///
    /// A speed of zero freezes time. Large deltas or high multipliers may
    /// roll over several minutes, so the rollover is a loop rather than a
    /// single subtraction.
    pub fn advance(&mut self, elapsed_ms: f64, speed: f64) {
        if speed <= 0.0 {
            return;
        }
        self.accumulated_ms += elapsed_ms * speed;
        while self.accumulated_ms >= self.ms_per_game_minute {
            self.accumulated_ms -= self.ms_per_game_minute;
            self.minutes_of_day += 1;
            if self.minutes_of_day >= MINUTES_PER_DAY {
                self.minutes_of_day = 0;
                self.day += 1;
            }
        }
    }

    /// Advances using the current [`TimeMode`] multiplier.
    pub fn tick(&mut self, elapsed_ms: f64) {
        self.advance(elapsed_ms, self.mode.multiplier());
    }

    /// Current minute of day in `[0, 1440)`.
    pub fn minutes_of_day(&self) -> u32 {
        self.minutes_of_day
    }

    /// Current day, starting at 1.
    pub fn day(&self) -> u32 {
        self.day
    }

    /// Current speed mode.
    pub fn mode(&self) -> TimeMode {
        self.mode
    }

    /// Switches the speed mode. Pausing is also the host's cue to stop
    /// advancing the systems that follow the clock.
    pub fn set_mode(&mut self, mode: TimeMode) {
        self.mode = mode;
    }

    pub fn is_paused(&self) -> bool {
        self.mode == TimeMode::Paused
    }

    /// True during working hours, when task-progress actions count.
    pub fn is_work_hour(&self) -> bool {
        let hour = self.minutes_of_day / 60;
        (WORK_START_HOUR..=WORK_END_HOUR).contains(&hour)
    }

    /// Zero-padded `HH:MM` rendering of the current time of day.
    pub fn format_time_of_day(&self) -> String {
        format_minutes(self.minutes_of_day)
    }

    /// Resets to the start-of-day minute and bumps the day counter.
    /// Invoked by the host when the player begins the next day.
    pub fn start_new_day(&mut self) {
        self.day += 1;
        self.minutes_of_day = DAY_START_MINUTES;
        self.accumulated_ms = 0.0;
    }
}

/// Renders a minute-of-day value as zero-padded `HH:MM`.
pub fn format_minutes(minutes: u32) -> String {
    format!("{:02}:{:02}", (minutes / 60) % 24, minutes % 60)
}

/// Parses an `HH:MM` string into a minute of day.
pub fn parse_clock_to_minutes(text: &str) -> GameResult<u32> {
    let (h, m) = text
        .split_once(':')
        .ok_or_else(|| GameError::Parse(format!("expected HH:MM, got {:?}", text)))?;
    let hours: u32 = h
        .trim()
        .parse()
        .map_err(|_| GameError::Parse(format!("invalid hour in {:?}", text)))?;
    let minutes: u32 = m
        .trim()
        .parse()
        .map_err(|_| GameError::Parse(format!("invalid minute in {:?}", text)))?;
    if hours >= 24 || minutes >= 60 {
        return Err(GameError::Parse(format!("clock value {:?} out of range", text)));
    }
    Ok(hours * 60 + minutes)
}
