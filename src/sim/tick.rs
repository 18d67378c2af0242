//! Per-frame simulation tick
//!
//! One call per rendered frame. Order within a tick:
//! snake step → fireball flight → fireball sweep → apple expiry →
//! win/loss → clock → spawn windows.

use super::grid::Direction;
use super::hawk::{Apple, AppleKind};
use super::progression::{Pulse, SpawnPlan, clock_label};
use super::state::{GameEvent, GamePhase, GameState};

/// Input for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Movement request from the player (latched until the next snake step)
    pub direction: Option<Direction>,
}

impl TickInput {
    pub fn turn(direction: Direction) -> Self {
        Self {
            direction: Some(direction),
        }
    }
}

/// Advance the match by `dt` seconds and report what happened
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();

    match state.phase {
        GamePhase::GameOver | GamePhase::Victory => return events,
        GamePhase::Respawning => state.phase = GamePhase::Playing,
        GamePhase::Playing => {}
    }

    let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

    if let Some(direction) = input.direction {
        state.request_direction(direction);
    }

    step_snake(state, dt, &mut events);

    state.hawk.advance_fireballs(dt);
    resolve_fireballs(state, &mut events);

    for kind in state.hawk.expire_apples(state.clock.elapsed()) {
        events.push(GameEvent::AppleExpired(kind));
    }

    if state.snake.is_dead() {
        state.phase = GamePhase::GameOver;
        log::info!("Game over at {}", state.clock.label());
        events.push(GameEvent::GameOver);
        return events;
    }
    if state.hawk.is_dead() {
        state.phase = GamePhase::Victory;
        log::info!("Hawk defeated at {}", state.clock.label());
        events.push(GameEvent::Victory(state.clock.elapsed()));
        return events;
    }

    for pulse in state.clock.advance(f64::from(dt)) {
        if pulse.flipped {
            let is_day = pulse.is_day;
            log::info!(
                "{} falls at {}",
                if is_day { "Day" } else { "Night" },
                clock_label(pulse.second)
            );
            events.push(GameEvent::DayNightChanged { is_day });
        }
        run_spawn_windows(state, pulse);
    }

    events
}

/// Move the snake if its timer allows, then resolve what the head hit
fn step_snake(state: &mut GameState, dt: f32, events: &mut Vec<GameEvent>) {
    if !state.snake.ready(dt) {
        return;
    }

    let requested = state.buffered_direction.take();
    state.snake.update_pos(requested);
    let head = state.snake.head();

    if let Some(index) = state.hawk.apple_at(head) {
        let apple = state.hawk.take_apple(index);
        eat_apple(state, apple, events);
    } else if !state.grid.contains(head) {
        respawn_snake(state, events);
    } else if state.snake.self_collide() {
        state.snake.lose_life();
        state.snake.move_body();
        log::debug!("Self collision, {} lives left", state.snake.lives());
        events.push(GameEvent::LifeLost);
    } else {
        state.snake.move_body();
    }
}

fn eat_apple(state: &mut GameState, apple: Apple, events: &mut Vec<GameEvent>) {
    let lives = state.snake.lives();
    let settings = &state.settings;
    match apple.kind {
        AppleKind::Normal => {
            state.snake.grow();
            state.hawk.damage(settings.normal_apple_damage);
            let banned = state.snake.segment_positions();
            let now = state.clock.elapsed();
            state
                .hawk
                .spawn_apple(AppleKind::Normal, &banned, now, &mut state.rng);
        }
        AppleKind::Golden => {
            state.snake.gain_life();
            state.hawk.damage(settings.golden_apple_damage);
            state.snake.move_body();
        }
        AppleKind::Poison => {
            state.hawk.heal(settings.poison_apple_heal);
            state.snake.decay_tail();
            state.snake.move_body();
        }
    }
    log::debug!(
        "Ate {:?} apple: length {}, hawk {}",
        apple.kind,
        state.snake.len(),
        state.hawk.health()
    );
    events.push(GameEvent::ApplePicked(apple.kind));
    if state.snake.lives() < lives {
        events.push(GameEvent::LifeLost);
    }
}

/// Head left the grid: rebuild at the center with one life fewer
fn respawn_snake(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let lives = state.snake.lives().saturating_sub(1);
    state.snake = GameState::fresh_snake(&state.settings, state.grid, lives);
    state.hawk.clear_fireballs();
    state.buffered_direction = None;
    state.phase = GamePhase::Respawning;
    log::info!("Snake left the grid, respawning with {} lives", lives);
    events.push(GameEvent::LifeLost);
    events.push(GameEvent::Respawned);
}

/// Despawn fireballs that left the grid; resolve those touching the snake
fn resolve_fireballs(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let mut i = 0;
    while i < state.hawk.fireballs().len() {
        let pos = state.hawk.fireballs()[i].pos();

        if !state.grid.contains(pos) {
            state.hawk.take_fireball(i);
            continue;
        }

        if let Some(segment) = state.snake.segment_at(pos) {
            let lives = state.snake.lives();
            let removed = state.snake.decay(segment);
            let heal = state
                .settings
                .fireball_heal_per_segment
                .saturating_mul(removed as u32);
            state.hawk.heal(heal);
            let fireball = state.hawk.take_fireball(i);
            log::debug!(
                "Fireball {} hit segment {}, {} segments lost, hawk healed {}",
                fireball.id,
                segment,
                removed,
                heal
            );
            events.push(GameEvent::FireballHit { segment, removed });
            if state.snake.lives() < lives {
                events.push(GameEvent::LifeLost);
            }
            continue;
        }

        i += 1;
    }
}

/// Spawn whatever the windows open at this pulse's second
fn run_spawn_windows(state: &mut GameState, pulse: Pulse) {
    let now = state.clock.elapsed();
    let plan = SpawnPlan::at(pulse.second, pulse.is_day, &state.settings);

    if plan.fireball {
        state.hawk.spawn_fireball(&mut state.rng);
    }
    if plan.golden_apple || plan.poison_apple {
        let banned = state.snake.segment_positions();
        if plan.golden_apple {
            state
                .hawk
                .spawn_apple(AppleKind::Golden, &banned, now, &mut state.rng);
        }
        if plan.poison_apple {
            state
                .hawk
                .spawn_apple(AppleKind::Poison, &banned, now, &mut state.rng);
        }
    }
}
