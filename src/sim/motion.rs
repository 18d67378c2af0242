//! Per-entity step timing and grid stepping

use serde::{Deserialize, Serialize};

use super::grid::{Direction, Position};

/// Accumulates frame time and authorizes one grid step once `1/speed`
/// seconds have been exceeded.
///
/// This is not a fixed-step scheduler: the counter resets to zero on each
/// step, so the effective interval is `>= 1/speed` with up to one frame of
/// jitter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MovementClock {
    elapsed: f32,
}

impl MovementClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `dt` and report whether a step is due this frame
    pub fn advance(&mut self, dt: f32, speed: f32) -> bool {
        if speed <= 0.0 {
            return false;
        }
        self.elapsed += dt;
        if self.elapsed > 1.0 / speed {
            self.elapsed = 0.0;
            true
        } else {
            false
        }
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }
}

/// A positioned, directional actor that steps one cell at a time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mover {
    pub pos: Position,
    pub direction: Direction,
    /// Cells per second
    pub speed: f32,
    pub clock: MovementClock,
}

impl Mover {
    pub fn new(pos: Position, direction: Direction, speed: f32) -> Self {
        Self {
            pos,
            direction,
            speed,
            clock: MovementClock::new(),
        }
    }

    /// Advance the step timer; true when a step is authorized
    pub fn ready(&mut self, dt: f32) -> bool {
        self.clock.advance(dt, self.speed)
    }

    /// Adopt `requested` unless it reverses the current direction, then
    /// move one cell along the current direction
    pub fn update_pos(&mut self, requested: Option<Direction>) {
        if let Some(dir) = requested {
            if !self.direction.is_opposite(dir) {
                self.direction = dir;
            }
        }
        self.pos += self.direction.step();
    }
}
