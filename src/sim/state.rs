//! Match state and the events it emits
//!
//! Everything the host needs to draw a frame is reachable from [`GameState`].

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::grid::{Direction, GridWorld, Position};
use super::hawk::{AppleKind, Hawk};
use super::progression::ProgressionClock;
use super::snake::{Snake, SpeedCurve};
use crate::{Settings, SettingsError};

/// Match-level phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// The snake left the grid this tick and was rebuilt at the center
    Respawning,
    /// Snake ran out of lives
    GameOver,
    /// Hawk health reached zero
    Victory,
}

impl GamePhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, GamePhase::GameOver | GamePhase::Victory)
    }
}

/// Discrete happenings of a tick, for audio/UI
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ApplePicked(AppleKind),
    AppleExpired(AppleKind),
    LifeLost,
    Respawned,
    /// A fireball struck segment `segment`, taking `removed` segments with it
    FireballHit { segment: usize, removed: usize },
    DayNightChanged { is_day: bool },
    /// Hawk defeated after `elapsed` seconds
    Victory(f64),
    GameOver,
}

/// Complete simulation state for one match
#[derive(Debug, Clone)]
pub struct GameState {
    pub settings: Settings,
    pub grid: GridWorld,
    pub snake: Snake,
    pub hawk: Hawk,
    pub clock: ProgressionClock,
    pub phase: GamePhase,
    /// First turn requested since the snake's last step
    pub buffered_direction: Option<Direction>,
    /// Source for every spawn decision
    pub rng: Pcg32,
    /// Run seed, when the RNG was seeded by us
    pub seed: Option<u64>,
}

impl GameState {
    /// New match with a seeded RNG
    pub fn new(settings: Settings, seed: u64) -> Result<Self, SettingsError> {
        let mut state = Self::with_rng(settings, Pcg32::seed_from_u64(seed))?;
        state.seed = Some(seed);
        log::info!("Match started with seed {}", seed);
        Ok(state)
    }

    /// New match drawing randomness from `rng`
    pub fn with_rng(settings: Settings, rng: Pcg32) -> Result<Self, SettingsError> {
        settings.validate()?;

        let grid = GridWorld::new(settings.grid_width, settings.grid_height);
        let snake = Self::fresh_snake(&settings, grid, settings.starting_lives);
        let hawk = Hawk::new(grid, &settings);
        let clock = ProgressionClock::new(settings.day_length);

        let mut state = Self {
            settings,
            grid,
            snake,
            hawk,
            clock,
            phase: GamePhase::Playing,
            buffered_direction: None,
            rng,
            seed: None,
        };

        let banned = state.snake.segment_positions();
        state
            .hawk
            .spawn_apple(AppleKind::Normal, &banned, 0.0, &mut state.rng);

        Ok(state)
    }

    pub(crate) fn fresh_snake(settings: &Settings, grid: GridWorld, lives: u8) -> Snake {
        Snake::new(
            grid.center(),
            lives,
            settings.max_lives,
            SpeedCurve::from(settings),
        )
    }

    /// Latch a turn request; only the first change since the last step counts
    pub fn request_direction(&mut self, direction: Direction) {
        if self.buffered_direction.is_none() && direction != self.snake.direction() {
            self.buffered_direction = Some(direction);
        }
    }

    pub fn elapsed(&self) -> f64 {
        self.clock.elapsed()
    }

    pub fn is_day(&self) -> bool {
        self.clock.is_day()
    }

    pub fn lives(&self) -> u8 {
        self.snake.lives()
    }

    pub fn hawk_health(&self) -> u32 {
        self.hawk.health()
    }

    pub fn fireball_positions(&self) -> Vec<Position> {
        self.hawk.fireballs().iter().map(|f| f.pos()).collect()
    }

    /// Apples with their whole seconds left (`None` = never expires)
    pub fn apple_views(&self) -> Vec<(Position, AppleKind, Option<u32>)> {
        let now = self.elapsed();
        self.hawk
            .apples()
            .iter()
            .map(|a| (a.pos, a.kind, a.remaining(now)))
            .collect()
    }
}
