//! Game clock, day/night cycle and the spawn-window schedule

use serde::{Deserialize, Serialize};

use crate::Settings;

/// One whole-second boundary crossed by the clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pulse {
    pub second: u64,
    /// Day flag from this second on
    pub is_day: bool,
    /// Day/night flipped on this second
    pub flipped: bool,
}

/// Elapsed match time plus the once-per-second pulse that gates spawns
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProgressionClock {
    elapsed: f64,
    is_day: bool,
    pulse: bool,
    day_length: u32,
}

impl ProgressionClock {
    pub fn new(day_length: u32) -> Self {
        Self {
            elapsed: 0.0,
            is_day: true,
            pulse: false,
            day_length: day_length.max(1),
        }
    }

    /// Accumulate `dt` seconds and report every whole second crossed.
    ///
    /// A long frame can cross several seconds; each one gets its own pulse,
    /// in order, carrying the day flag in effect at that second. The cycle
    /// flips on each multiple of the day length.
    pub fn advance(&mut self, dt: f64) -> Vec<Pulse> {
        let before = self.whole_seconds();
        self.elapsed += dt.max(0.0);
        let after = self.whole_seconds();
        self.pulse = after > before;

        let mut pulses = Vec::new();
        for second in before + 1..=after {
            let flipped = second % u64::from(self.day_length) == 0;
            if flipped {
                self.is_day = !self.is_day;
            }
            pulses.push(Pulse {
                second,
                is_day: self.is_day,
                flipped,
            });
        }
        pulses
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn whole_seconds(&self) -> u64 {
        self.elapsed.floor() as u64
    }

    pub fn is_day(&self) -> bool {
        self.is_day
    }

    /// True only on a tick that crossed at least one whole second
    pub fn pulse(&self) -> bool {
        self.pulse
    }

    /// `MM:SS` label for the elapsed time
    pub fn label(&self) -> String {
        clock_label(self.whole_seconds())
    }
}

/// Format whole seconds as `MM:SS` (minutes wrap at 100)
pub fn clock_label(seconds: u64) -> String {
    let minutes = (seconds / 60) % 100;
    format!("{:02}:{:02}", minutes, seconds % 60)
}

/// What the hawk spawns on a given pulse
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpawnPlan {
    pub fireball: bool,
    pub golden_apple: bool,
    pub poison_apple: bool,
}

impl SpawnPlan {
    /// Evaluate the spawn windows at whole second `t`
    pub fn at(t: u64, is_day: bool, settings: &Settings) -> Self {
        let in_window = |start: u32, period: u32, width: u32| {
            t >= u64::from(start) && t % u64::from(period.max(1)) < u64::from(width)
        };

        let fireball_width = if is_day {
            settings.day_fireball_window
        } else {
            settings.night_fireball_window
        };

        Self {
            fireball: in_window(
                settings.fireball_window_start,
                settings.fireball_window_period,
                fireball_width,
            ),
            golden_apple: is_day && in_window(settings.golden_start, settings.golden_period, 1),
            poison_apple: in_window(
                settings.poison_window_start,
                settings.poison_window_period,
                settings.poison_window,
            ),
        }
    }
}
