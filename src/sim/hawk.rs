//! The hawk boss: health pool, apples on the field and incoming fireballs

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::grid::{Edge, GridWorld, Position};
use super::motion::Mover;
use crate::Settings;

/// Apple variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AppleKind {
    /// Grows the snake and hurts the hawk; always replaced when eaten
    Normal,
    /// Restores a life and hurts the hawk badly (day only)
    Golden,
    /// Shortens the snake and heals the hawk
    Poison,
}

impl AppleKind {
    /// Golden and poison apples vanish after a while
    pub fn is_timed(&self) -> bool {
        !matches!(self, AppleKind::Normal)
    }
}

/// Lifetime stamp for timed apples, counted in whole game seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Expiry {
    pub spawned_at: f64,
    pub duration: u32,
}

impl Expiry {
    fn age(&self, now: f64) -> i64 {
        now.floor() as i64 - self.spawned_at.floor() as i64
    }

    pub fn is_elapsed(&self, now: f64) -> bool {
        self.age(now) >= i64::from(self.duration)
    }

    /// Whole seconds left before the apple disappears
    pub fn remaining(&self, now: f64) -> u32 {
        (i64::from(self.duration) - self.age(now)).max(0) as u32
    }
}

/// A pickup on the grid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Apple {
    pub id: u32,
    pub pos: Position,
    pub kind: AppleKind,
    pub expiry: Option<Expiry>,
}

impl Apple {
    /// Seconds left for timed apples, `None` for normal ones
    pub fn remaining(&self, now: f64) -> Option<u32> {
        self.expiry.map(|e| e.remaining(now))
    }
}

/// A hazard flying straight across the grid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fireball {
    pub id: u32,
    pub mover: Mover,
}

impl Fireball {
    pub fn pos(&self) -> Position {
        self.mover.pos
    }
}

/// The boss. Owns every apple and fireball on the field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hawk {
    health: u32,
    max_health: u32,
    grid: GridWorld,
    apples: Vec<Apple>,
    fireballs: Vec<Fireball>,
    fireball_speed: f32,
    apple_lifetime: u32,
    max_spawn_attempts: u32,
    next_id: u32,
}

impl Hawk {
    pub fn new(grid: GridWorld, settings: &Settings) -> Self {
        Self {
            health: settings.hawk_max_health,
            max_health: settings.hawk_max_health,
            grid,
            apples: Vec::new(),
            fireballs: Vec::new(),
            fireball_speed: settings.fireball_speed,
            apple_lifetime: settings.timed_apple_lifetime,
            max_spawn_attempts: settings.max_spawn_attempts,
            next_id: 1,
        }
    }

    fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn max_health(&self) -> u32 {
        self.max_health
    }

    pub fn is_dead(&self) -> bool {
        self.health == 0
    }

    pub fn heal(&mut self, value: u32) {
        self.health = self.health.saturating_add(value).min(self.max_health);
    }

    pub fn damage(&mut self, value: u32) {
        self.health = self.health.saturating_sub(value);
    }

    pub fn apples(&self) -> &[Apple] {
        &self.apples
    }

    pub fn fireballs(&self) -> &[Fireball] {
        &self.fireballs
    }

    /// Index of the apple lying on `pos`
    pub fn apple_at(&self, pos: Position) -> Option<usize> {
        self.apples.iter().position(|a| a.pos == pos)
    }

    /// Remove and return the apple at `index`
    pub fn take_apple(&mut self, index: usize) -> Apple {
        self.apples.remove(index)
    }

    /// Remove and return the fireball at `index`
    pub fn take_fireball(&mut self, index: usize) -> Fireball {
        self.fireballs.remove(index)
    }

    pub fn clear_fireballs(&mut self) {
        self.fireballs.clear();
    }

    #[cfg(test)]
    pub(crate) fn insert_apple(&mut self, kind: AppleKind, pos: Position, expiry: Option<Expiry>) {
        let id = self.next_entity_id();
        self.apples.push(Apple {
            id,
            pos,
            kind,
            expiry,
        });
    }

    #[cfg(test)]
    pub(crate) fn insert_fireball(&mut self, pos: Position, direction: super::grid::Direction) {
        let id = self.next_entity_id();
        self.fireballs.push(Fireball {
            id,
            mover: Mover::new(pos, direction, self.fireball_speed),
        });
    }

    /// Launch a fireball from a random edge, heading inward
    pub fn spawn_fireball<R: Rng>(&mut self, rng: &mut R) -> u32 {
        let edge = Edge::ALL[rng.random_range(0..Edge::ALL.len())];
        let offset = rng.random_range(0..self.grid.edge_len(edge).max(1));
        let pos = self.grid.edge_cell(edge, offset);

        let id = self.next_entity_id();
        self.fireballs.push(Fireball {
            id,
            mover: Mover::new(pos, edge.inward(), self.fireball_speed),
        });
        log::debug!("Fireball {} enters from {:?} at ({}, {})", id, edge, pos.x, pos.y);
        id
    }

    /// Place an apple on a random cell that is neither banned nor holding
    /// another apple.
    ///
    /// Draws at most `max_spawn_attempts` random cells, then picks uniformly
    /// among the remaining free cells. Returns `None` when the grid is full.
    pub fn spawn_apple<R: Rng>(
        &mut self,
        kind: AppleKind,
        banned: &[Position],
        now: f64,
        rng: &mut R,
    ) -> Option<Position> {
        let pos = match self.pick_free_cell(banned, rng) {
            Some(pos) => pos,
            None => {
                log::warn!("No free cell for {:?} apple, skipping spawn", kind);
                return None;
            }
        };

        let expiry = kind.is_timed().then_some(Expiry {
            spawned_at: now,
            duration: self.apple_lifetime,
        });
        let id = self.next_entity_id();
        self.apples.push(Apple {
            id,
            pos,
            kind,
            expiry,
        });
        log::debug!("{:?} apple {} spawned at ({}, {})", kind, id, pos.x, pos.y);
        Some(pos)
    }

    fn pick_free_cell<R: Rng>(
        &self,
        banned: &[Position],
        rng: &mut R,
    ) -> Option<Position> {
        let is_free = |pos: &Position| !banned.contains(pos) && self.apple_at(*pos).is_none();

        for _ in 0..self.max_spawn_attempts {
            let candidate = Position::new(
                rng.random_range(0..self.grid.width),
                rng.random_range(0..self.grid.height),
            );
            if is_free(&candidate) {
                return Some(candidate);
            }
        }

        let free: Vec<Position> = self.grid.cells().filter(is_free).collect();
        if free.is_empty() {
            None
        } else {
            Some(free[rng.random_range(0..free.len())])
        }
    }

    /// Give every fireball its movement tick
    pub fn advance_fireballs(&mut self, dt: f32) {
        for fireball in &mut self.fireballs {
            if fireball.mover.ready(dt) {
                fireball.mover.update_pos(None);
            }
        }
    }

    /// Drop timed apples whose lifetime has run out; returns their kinds
    pub fn expire_apples(&mut self, now: f64) -> Vec<AppleKind> {
        let mut expired = Vec::new();
        self.apples.retain(|apple| match apple.expiry {
            Some(expiry) if expiry.is_elapsed(now) => {
                expired.push(apple.kind);
                false
            }
            _ => true,
        });
        expired
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::IVec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn hawk() -> Hawk {
        Hawk::new(GridWorld::new(18, 18), &Settings::default())
    }

    #[test]
    fn test_health_is_clamped() {
        let mut hawk = hawk();
        hawk.heal(500);
        assert_eq!(hawk.health(), 3000);
        hawk.damage(100);
        assert_eq!(hawk.health(), 2900);
        hawk.heal(20);
        assert_eq!(hawk.health(), 2920);
        hawk.damage(10_000);
        assert_eq!(hawk.health(), 0);
        assert!(hawk.is_dead());
    }

    #[test]
    fn test_fireballs_enter_from_edges_heading_inward() {
        let mut hawk = hawk();
        let mut rng = Pcg32::seed_from_u64(7);
        let grid = GridWorld::new(18, 18);
        for _ in 0..200 {
            hawk.spawn_fireball(&mut rng);
        }
        for fireball in hawk.fireballs() {
            let pos = fireball.pos();
            assert!(grid.contains(pos));
            let on_edge = pos.x == 0 || pos.y == 0 || pos.x == 17 || pos.y == 17;
            assert!(on_edge, "{:?}", pos);
            assert!(grid.contains(pos + fireball.mover.direction.step()));
            assert_eq!(fireball.mover.speed, 5.0);
        }
    }

    #[test]
    fn test_fireball_flies_at_five_cells_per_second() {
        let mut hawk = hawk();
        let mut rng = Pcg32::seed_from_u64(3);
        hawk.spawn_fireball(&mut rng);
        let start = hawk.fireballs()[0].pos();
        let step = hawk.fireballs()[0].mover.direction.step();

        // 0.21s per frame exceeds the 0.2s threshold every frame
        for _ in 0..3 {
            hawk.advance_fireballs(0.21);
        }
        assert_eq!(hawk.fireballs()[0].pos(), start + step * 3);
    }

    #[test]
    fn test_apple_avoids_banned_and_existing_apples() {
        let mut hawk = hawk();
        let mut rng = Pcg32::seed_from_u64(11);
        let banned: Vec<Position> = (0..18).map(|x| IVec2::new(x, 9)).collect();
        for i in 0..50 {
            let pos = hawk
                .spawn_apple(AppleKind::Normal, &banned, i as f64, &mut rng)
                .unwrap();
            assert!(!banned.contains(&pos));
        }
        let mut seen: Vec<Position> = hawk.apples().iter().map(|a| a.pos).collect();
        seen.sort_by_key(|p| (p.x, p.y));
        seen.dedup();
        assert_eq!(seen.len(), 50);
    }

    #[test]
    fn test_apple_lands_on_last_free_cell() {
        let mut hawk = hawk();
        let free = IVec2::new(13, 4);
        let banned: Vec<Position> = GridWorld::new(18, 18)
            .cells()
            .filter(|c| *c != free)
            .collect();
        let mut rng = Pcg32::seed_from_u64(42);
        let pos = hawk.spawn_apple(AppleKind::Poison, &banned, 21.0, &mut rng);
        assert_eq!(pos, Some(free));
    }

    #[test]
    fn test_full_grid_skips_spawn() {
        let mut hawk = hawk();
        let banned: Vec<Position> = GridWorld::new(18, 18).cells().collect();
        let mut rng = Pcg32::seed_from_u64(42);
        assert_eq!(hawk.spawn_apple(AppleKind::Normal, &banned, 0.0, &mut rng), None);
        assert!(hawk.apples().is_empty());
    }

    #[test]
    fn test_timed_apples_expire_on_whole_seconds() {
        let mut hawk = hawk();
        let mut rng = Pcg32::seed_from_u64(5);
        hawk.spawn_apple(AppleKind::Normal, &[], 30.2, &mut rng);
        hawk.spawn_apple(AppleKind::Golden, &[], 30.2, &mut rng);
        hawk.spawn_apple(AppleKind::Poison, &[], 31.7, &mut rng);

        let golden = hawk.apples()[1];
        assert_eq!(golden.expiry.unwrap().duration, 5);
        assert_eq!(golden.remaining(32.9), Some(3));
        assert_eq!(hawk.apples()[0].remaining(32.9), None);

        assert!(hawk.expire_apples(34.99).is_empty());
        assert_eq!(hawk.expire_apples(35.0), vec![AppleKind::Golden]);
        assert_eq!(hawk.expire_apples(36.0), vec![AppleKind::Poison]);
        assert_eq!(hawk.apples().len(), 1);
        assert_eq!(hawk.apples()[0].kind, AppleKind::Normal);
        assert!(hawk.expire_apples(1_000.0).is_empty());
    }

    #[test]
    fn test_entity_ids_are_unique() {
        let mut hawk = hawk();
        let mut rng = Pcg32::seed_from_u64(9);
        let a = hawk.spawn_fireball(&mut rng);
        let b = hawk.spawn_fireball(&mut rng);
        hawk.spawn_apple(AppleKind::Normal, &[], 0.0, &mut rng);
        assert_ne!(a, b);
        assert_ne!(hawk.apples()[0].id, a);
        assert_ne!(hawk.apples()[0].id, b);
    }
}
