//! The player's snake: segments, lives and length-driven speed

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::grid::{Direction, Position};
use super::motion::Mover;
use crate::Settings;

/// Visual role of a segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SegmentKind {
    Head,
    Body,
}

/// One occupied cell of the snake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub pos: Position,
    pub kind: SegmentKind,
}

impl Segment {
    fn head(pos: Position) -> Self {
        Self {
            pos,
            kind: SegmentKind::Head,
        }
    }
}

/// Length to speed mapping: `min(base + step * (len / per_tier), max)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedCurve {
    pub base: f32,
    pub step: f32,
    pub per_tier: usize,
    pub max: f32,
}

impl SpeedCurve {
    pub fn speed_for(&self, len: usize) -> f32 {
        let tiers = (len / self.per_tier.max(1)) as f32;
        (self.base + self.step * tiers).min(self.max)
    }
}

impl From<&Settings> for SpeedCurve {
    fn from(settings: &Settings) -> Self {
        Self {
            base: settings.snake_base_speed,
            step: settings.snake_speed_step,
            per_tier: settings.segments_per_speed_step,
            max: settings.snake_max_speed,
        }
    }
}

/// Player-controlled snake.
///
/// The mover tracks where the head is heading; `segments` only changes
/// through [`Snake::move_body`], [`Snake::grow`] and [`Snake::decay`].
/// Index 0 is the head and the body is never empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snake {
    mover: Mover,
    segments: VecDeque<Segment>,
    lives: u8,
    max_lives: u8,
    curve: SpeedCurve,
}

impl Snake {
    /// A single-segment snake heading right
    pub fn new(pos: Position, lives: u8, max_lives: u8, curve: SpeedCurve) -> Self {
        let mut segments = VecDeque::with_capacity(16);
        segments.push_back(Segment::head(pos));
        Self {
            mover: Mover::new(pos, Direction::Right, curve.speed_for(1)),
            segments,
            lives: lives.min(max_lives),
            max_lives,
            curve,
        }
    }

    /// Tracked head cell (may be ahead of `segments[0]` between
    /// `update_pos` and the body update)
    pub fn head(&self) -> Position {
        self.mover.pos
    }

    pub fn direction(&self) -> Direction {
        self.mover.direction
    }

    /// Current speed in cells/second
    pub fn speed(&self) -> f32 {
        self.mover.speed
    }

    pub fn segments(&self) -> &VecDeque<Segment> {
        &self.segments
    }

    pub fn segment_positions(&self) -> Vec<Position> {
        self.segments.iter().map(|s| s.pos).collect()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always false; the body keeps at least its head
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn lives(&self) -> u8 {
        self.lives
    }

    pub fn is_dead(&self) -> bool {
        self.lives == 0
    }

    /// Index of the segment occupying `pos`
    pub fn segment_at(&self, pos: Position) -> Option<usize> {
        self.segments.iter().position(|s| s.pos == pos)
    }

    /// Step timer; true when the snake may move this frame
    pub fn ready(&mut self, dt: f32) -> bool {
        self.mover.ready(dt)
    }

    /// Apply a requested turn (reversals are ignored) and advance the
    /// tracked head one cell
    pub fn update_pos(&mut self, requested: Option<Direction>) {
        self.mover.update_pos(requested);
    }

    /// Shift the body forward: the tail is dropped and a new head
    /// materializes at the tracked position
    pub fn move_body(&mut self) {
        self.demote_head();
        self.segments.pop_back();
        self.segments.push_front(Segment::head(self.mover.pos));
    }

    /// Add a head segment without dropping the tail
    pub fn grow(&mut self) {
        self.demote_head();
        self.segments.push_front(Segment::head(self.mover.pos));
        self.refresh_speed();
    }

    /// Cut the body from `index` to the tail and return how many segments
    /// were hit.
    ///
    /// `index == 0` is a full-body hit: one life is lost, the body collapses
    /// to the head and the whole length is reported. Out-of-range indices
    /// clamp to the tail.
    pub fn decay(&mut self, index: usize) -> usize {
        let len = self.segments.len();
        let index = index.min(len - 1);

        let removed = len - index;
        if index == 0 {
            self.lose_life();
            self.segments.truncate(1);
            if let Some(head) = self.segments.front_mut() {
                head.kind = SegmentKind::Head;
            }
        } else {
            self.segments.truncate(index);
        }
        self.refresh_speed();
        removed
    }

    /// Drop the last segment (a length-1 snake takes a full-body hit)
    pub fn decay_tail(&mut self) -> usize {
        self.decay(self.segments.len() - 1)
    }

    /// If the tracked head overlaps a body segment, cut the body at that
    /// segment and report the collision. Life loss is left to the caller.
    pub fn self_collide(&mut self) -> bool {
        let head = self.mover.pos;
        let hit = self
            .segments
            .iter()
            .skip(1)
            .position(|s| s.pos == head)
            .map(|i| i + 1);

        match hit {
            Some(index) => {
                self.decay(index);
                true
            }
            None => false,
        }
    }

    pub fn gain_life(&mut self) {
        self.lives = self.lives.saturating_add(1).min(self.max_lives);
    }

    pub fn lose_life(&mut self) {
        self.lives = self.lives.saturating_sub(1);
    }

    fn demote_head(&mut self) {
        if let Some(head) = self.segments.front_mut() {
            head.kind = SegmentKind::Body;
        }
    }

    fn refresh_speed(&mut self) {
        self.mover.speed = self.curve.speed_for(self.segments.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::IVec2;
    use proptest::prelude::*;

    fn curve() -> SpeedCurve {
        SpeedCurve::from(&Settings::default())
    }

    /// Snake at (2, 5) grown rightwards to `len` segments, head at (1 + len, 5)
    fn snake_of_len(len: usize, lives: u8) -> Snake {
        let mut snake = Snake::new(IVec2::new(2, 5), lives, 3, curve());
        for _ in 1..len {
            snake.update_pos(None);
            snake.grow();
        }
        snake
    }

    fn expected_speed(len: usize) -> f32 {
        (2 * (len / 5) + 2).min(10) as f32
    }

    #[test]
    fn test_new_snake() {
        let snake = Snake::new(IVec2::new(9, 9), 3, 3, curve());
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.head(), IVec2::new(9, 9));
        assert_eq!(snake.direction(), Direction::Right);
        assert_eq!(snake.speed(), 2.0);
        assert_eq!(snake.segments()[0].kind, SegmentKind::Head);
    }

    #[test]
    fn test_speed_curve_matches_length_formula() {
        let curve = curve();
        for len in 1..60usize {
            assert_eq!(curve.speed_for(len), expected_speed(len), "len {}", len);
        }
    }

    #[test]
    fn test_move_keeps_length() {
        let mut snake = snake_of_len(3, 3);
        let before = snake.segment_positions();
        snake.update_pos(Some(Direction::Down));
        snake.move_body();

        assert_eq!(snake.len(), 3);
        assert_eq!(snake.segments()[0].pos, snake.head());
        assert_eq!(snake.segments()[0].kind, SegmentKind::Head);
        assert_eq!(snake.segments()[1].pos, before[0]);
        assert_eq!(snake.segments()[1].kind, SegmentKind::Body);
        assert!(!snake.segment_positions().contains(&before[2]));
    }

    #[test]
    fn test_grow_adds_segment_and_speeds_up() {
        let mut snake = snake_of_len(4, 3);
        assert_eq!(snake.speed(), 2.0);
        snake.update_pos(None);
        snake.grow();
        assert_eq!(snake.len(), 5);
        assert_eq!(snake.speed(), 4.0);
        let heads = snake
            .segments()
            .iter()
            .filter(|s| s.kind == SegmentKind::Head)
            .count();
        assert_eq!(heads, 1);
    }

    #[test]
    fn test_decay_from_middle() {
        let mut snake = snake_of_len(5, 3);
        assert_eq!(snake.decay(2), 3);
        assert_eq!(snake.len(), 2);
        assert_eq!(snake.lives(), 3);
        assert_eq!(snake.speed(), 2.0);
    }

    #[test]
    fn test_decay_zero_is_full_body_hit() {
        let mut snake = snake_of_len(6, 2);
        let head = snake.segments()[0].pos;
        assert_eq!(snake.decay(0), 6);
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.lives(), 1);
        assert_eq!(snake.segments()[0].pos, head);
        assert_eq!(snake.segments()[0].kind, SegmentKind::Head);
        assert_eq!(snake.speed(), 2.0);
    }

    #[test]
    fn test_decay_tail_drops_last_segment() {
        let mut snake = snake_of_len(4, 3);
        let tail = snake.segment_positions()[3];
        assert_eq!(snake.decay_tail(), 1);
        assert_eq!(snake.len(), 3);
        assert!(!snake.segment_positions().contains(&tail));
        assert_eq!(snake.lives(), 3);
    }

    #[test]
    fn test_decay_tail_on_single_segment_costs_life() {
        let mut snake = snake_of_len(1, 3);
        assert_eq!(snake.decay_tail(), 1);
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.lives(), 2);
    }

    #[test]
    fn test_decay_out_of_range_clamps() {
        let mut snake = snake_of_len(3, 3);
        assert_eq!(snake.decay(99), 1);
        assert_eq!(snake.len(), 2);
    }

    #[test]
    fn test_self_collide_cuts_at_overlap() {
        // Head at (6,5) heading right, body trailing left along y=5
        let mut snake = snake_of_len(5, 3);
        snake.update_pos(Some(Direction::Down));
        snake.move_body(); // head (6,6)
        snake.update_pos(Some(Direction::Left));
        snake.move_body(); // head (5,6)
        snake.update_pos(Some(Direction::Up)); // tracked head (5,5), a body cell
        let overlap = snake.segment_at(snake.head()).unwrap();
        assert!(overlap >= 1);

        assert!(snake.self_collide());
        assert_eq!(snake.len(), overlap);
        assert_eq!(snake.lives(), 3);
        assert!(snake.segment_at(snake.head()).is_none());
    }

    #[test]
    fn test_self_collide_misses() {
        let mut snake = snake_of_len(4, 3);
        snake.update_pos(Some(Direction::Up));
        assert!(!snake.self_collide());
        assert_eq!(snake.len(), 4);
    }

    #[test]
    fn test_lives_clamped() {
        let mut snake = Snake::new(IVec2::ZERO, 3, 3, curve());
        snake.gain_life();
        assert_eq!(snake.lives(), 3);
        for _ in 0..5 {
            snake.lose_life();
        }
        assert_eq!(snake.lives(), 0);
        assert!(snake.is_dead());
    }

    #[derive(Debug, Clone, Copy)]
    enum Op {
        Move(Option<Direction>),
        Grow,
        Decay(usize),
        DecayTail,
        GainLife,
    }

    fn arb_dir() -> impl Strategy<Value = Option<Direction>> {
        prop_oneof![
            Just(None),
            Just(Some(Direction::Up)),
            Just(Some(Direction::Down)),
            Just(Some(Direction::Left)),
            Just(Some(Direction::Right)),
        ]
    }

    fn arb_op() -> impl Strategy<Value = Op> {
        prop_oneof![
            4 => arb_dir().prop_map(Op::Move),
            3 => Just(Op::Grow),
            1 => (0usize..30).prop_map(Op::Decay),
            1 => Just(Op::DecayTail),
            1 => Just(Op::GainLife),
        ]
    }

    proptest! {
        #[test]
        fn prop_length_lives_and_speed_stay_consistent(ops in prop::collection::vec(arb_op(), 1..200)) {
            let mut snake = Snake::new(IVec2::new(9, 9), 3, 3, curve());
            for op in ops {
                match op {
                    Op::Move(dir) => {
                        snake.update_pos(dir);
                        snake.move_body();
                    }
                    Op::Grow => {
                        snake.update_pos(None);
                        snake.grow();
                        prop_assert_eq!(snake.speed(), expected_speed(snake.len()));
                    }
                    Op::Decay(index) => {
                        snake.decay(index);
                        prop_assert_eq!(snake.speed(), expected_speed(snake.len()));
                    }
                    Op::DecayTail => {
                        snake.decay_tail();
                        prop_assert_eq!(snake.speed(), expected_speed(snake.len()));
                    }
                    Op::GainLife => snake.gain_life(),
                }
                prop_assert!(snake.len() >= 1);
                prop_assert!(snake.lives() <= 3);
                prop_assert_eq!(snake.segments()[0].kind, SegmentKind::Head);
            }
        }
    }
}
