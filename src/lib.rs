//! SnakeSoul - A grid snake duel against a spell-casting hawk
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (movement, collisions, spawn economy, day/night)
//! - `settings`: Externally supplied rule parameters

pub mod settings;
pub mod sim;

pub use settings::{Settings, SettingsError};

/// Default rule values
pub mod consts {
    /// Grid dimensions (cells)
    pub const GRID_WIDTH: i32 = 18;
    pub const GRID_HEIGHT: i32 = 18;

    /// Snake lives at match start, and the cap for golden apple gains
    pub const STARTING_LIVES: u8 = 3;
    pub const MAX_LIVES: u8 = 3;

    /// Snake speed curve (cells/second): base + step per tier of segments, capped
    pub const SNAKE_BASE_SPEED: f32 = 2.0;
    pub const SNAKE_MAX_SPEED: f32 = 10.0;
    pub const SNAKE_SPEED_STEP: f32 = 2.0;
    pub const SEGMENTS_PER_SPEED_STEP: usize = 5;

    /// Hawk health pool
    pub const HAWK_MAX_HEALTH: u32 = 3000;

    /// Fireball speed (cells/second)
    pub const FIREBALL_SPEED: f32 = 5.0;

    /// Pickup economy
    pub const NORMAL_APPLE_DAMAGE: u32 = 100;
    pub const GOLDEN_APPLE_DAMAGE: u32 = 500;
    pub const POISON_APPLE_HEAL: u32 = 20;
    pub const FIREBALL_HEAL_PER_SEGMENT: u32 = 50;
    /// Golden/poison apples vanish after this many whole seconds
    pub const TIMED_APPLE_LIFETIME: u32 = 5;

    /// Day/night cycle length (seconds per half)
    pub const DAY_LENGTH: u32 = 60;

    /// Fireball windows: active from `FIREBALL_WINDOW_START`, repeating every
    /// `FIREBALL_WINDOW_PERIOD`, open for the first N seconds of each period
    pub const FIREBALL_WINDOW_START: u32 = 15;
    pub const FIREBALL_WINDOW_PERIOD: u32 = 15;
    pub const DAY_FIREBALL_WINDOW: u32 = 5;
    pub const NIGHT_FIREBALL_WINDOW: u32 = 10;

    /// Poison apple windows (day and night)
    pub const POISON_WINDOW_START: u32 = 20;
    pub const POISON_WINDOW_PERIOD: u32 = 20;
    pub const POISON_WINDOW: u32 = 10;

    /// Golden apples (day only), one per period boundary
    pub const GOLDEN_START: u32 = 30;
    pub const GOLDEN_PERIOD: u32 = 30;

    /// Random placement draws before falling back to a free-cell scan
    pub const MAX_SPAWN_ATTEMPTS: u32 = 64;
}
