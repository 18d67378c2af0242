//! Greedy steering for headless runs and demos
//!
//! Picks the turn that brings the head closest to the nearest normal or
//! golden apple without leaving the grid, reversing, or biting the body.

use super::grid::{Direction, Position};
use super::hawk::AppleKind;
use super::state::GameState;

/// Manhattan distance between two cells
fn distance(a: Position, b: Position) -> i32 {
    (a - b).abs().element_sum()
}

/// Apple worth chasing (poison is avoided)
fn target(state: &GameState) -> Option<Position> {
    let head = state.snake.head();
    state
        .hawk
        .apples()
        .iter()
        .filter(|a| a.kind != AppleKind::Poison)
        .map(|a| a.pos)
        .min_by_key(|pos| (distance(head, *pos), pos.x, pos.y))
}

/// Suggest a turn for the next step, `None` to keep going straight
pub fn steer(state: &GameState) -> Option<Direction> {
    let head = state.snake.head();
    let current = state.snake.direction();
    let goal = target(state);

    let safe = |dir: Direction| {
        let next = head + dir.step();
        state.grid.contains(next)
            && state.hawk.apples().iter().all(|a| a.pos != next || a.kind != AppleKind::Poison)
            && !state
                .snake
                .segments()
                .iter()
                .skip(1)
                .take(state.snake.len().saturating_sub(2))
                .any(|s| s.pos == next)
            && !state.hawk.fireballs().iter().any(|f| f.pos() == next)
    };

    let score = |dir: Direction| match goal {
        Some(goal) => distance(head + dir.step(), goal),
        None => 0,
    };

    let best = Direction::ALL
        .into_iter()
        .filter(|dir| !current.is_opposite(*dir))
        .filter(|dir| safe(*dir))
        .min_by_key(|dir| (score(*dir), *dir != current));

    match best {
        Some(dir) if dir != current => Some(dir),
        _ => None,
    }
}
