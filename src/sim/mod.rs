//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only enters through `dt`
//! - Seeded RNG only
//! - Stable iteration order (insertion order, ids are never reused)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod grid;
pub mod hawk;
pub mod motion;
pub mod progression;
pub mod snake;
pub mod state;
pub mod tick;

pub use autopilot::steer;
pub use grid::{Direction, Edge, GridWorld, Position};
pub use hawk::{Apple, AppleKind, Expiry, Fireball, Hawk};
pub use motion::{MovementClock, Mover};
pub use progression::{ProgressionClock, Pulse, SpawnPlan, clock_label};
pub use snake::{Segment, SegmentKind, Snake, SpeedCurve};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{TickInput, tick};
