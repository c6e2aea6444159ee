use std::time::{Duration, Instant};

use crate::foundation::error::{TernError, TernResult};

/// Years advanced per second at speed 1.
pub const BASE_TICKS_PER_SEC: f64 = 10.0;

/// Slowest accepted multiplier: one year every 100 seconds.
pub const MIN_SPEED: f64 = 0.001;

/// Start/stop timer driving year playback.
///
/// `poll` reports at most one due tick per call; ticks missed while the caller was busy are
/// dropped rather than replayed.
#[derive(Clone, Debug)]
pub struct Playback {
    speed: f64,
    playing: bool,
    last_tick: Option<Instant>,
}

impl Default for Playback {
    fn default() -> Self {
        Self {
            speed: 1.0,
            playing: false,
            last_tick: None,
        }
    }
}

impl Playback {
    pub fn new(speed: f64) -> TernResult<Self> {
        validate_speed(speed)?;
        Ok(Self {
            speed,
            ..Self::default()
        })
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Time between two ticks at the current speed.
    pub fn interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / (BASE_TICKS_PER_SEC * self.speed))
    }

    pub fn start(&mut self, now: Instant) {
        self.playing = true;
        self.last_tick = Some(now);
    }

    pub fn stop(&mut self) {
        self.playing = false;
        self.last_tick = None;
    }

    pub fn toggle(&mut self, now: Instant) {
        if self.playing {
            self.stop();
        } else {
            self.start(now);
        }
    }

    /// Change the speed multiplier. A running timer restarts at the new rate.
    pub fn set_speed(&mut self, speed: f64, now: Instant) -> TernResult<()> {
        validate_speed(speed)?;
        self.speed = speed;
        if self.playing {
            self.stop();
            self.start(now);
        }
        Ok(())
    }

    /// Returns `true` when a tick is due at `now`.
    pub fn poll(&mut self, now: Instant) -> bool {
        if !self.playing {
            return false;
        }
        let Some(last) = self.last_tick else {
            self.last_tick = Some(now);
            return false;
        };
        if now.saturating_duration_since(last) >= self.interval() {
            self.last_tick = Some(now);
            return true;
        }
        false
    }
}

fn validate_speed(speed: f64) -> TernResult<()> {
    if !speed.is_finite() || speed < MIN_SPEED {
        return Err(TernError::validation(format!(
            "playback speed must be finite and >= {MIN_SPEED}"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/view/playback.rs"]
mod tests;
