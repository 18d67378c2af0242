//! Discrete grid coordinates, directions and bounds

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// A grid cell `(x, y)`; valid cells lie in `[0, width) × [0, height)`
pub type Position = IVec2;

/// Movement direction (screen coordinates, +y is down)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// True when `other` would reverse this direction
    pub fn is_opposite(self, other: Direction) -> bool {
        self.opposite() == other
    }

    /// Unit step vector
    pub fn step(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::NEG_Y,
            Direction::Down => IVec2::Y,
            Direction::Left => IVec2::NEG_X,
            Direction::Right => IVec2::X,
        }
    }
}

/// One of the four grid borders, used to place incoming fireballs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Left, Edge::Right, Edge::Top, Edge::Bottom];

    /// Direction pointing from this edge into the grid
    pub fn inward(self) -> Direction {
        match self {
            Edge::Left => Direction::Right,
            Edge::Right => Direction::Left,
            Edge::Top => Direction::Down,
            Edge::Bottom => Direction::Up,
        }
    }
}

/// Fixed-size play field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridWorld {
    pub width: i32,
    pub height: i32,
}

impl GridWorld {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Boundary test
    #[inline]
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    /// Respawn cell
    pub fn center(&self) -> Position {
        IVec2::new(self.width / 2, self.height / 2)
    }

    pub fn cell_count(&self) -> usize {
        (self.width.max(0) as usize) * (self.height.max(0) as usize)
    }

    /// Every cell in row-major order
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| IVec2::new(x, y)))
    }

    /// Number of cells along an edge
    pub fn edge_len(&self, edge: Edge) -> i32 {
        match edge {
            Edge::Left | Edge::Right => self.height,
            Edge::Top | Edge::Bottom => self.width,
        }
    }

    /// Cell on `edge` at `offset` cells along it
    pub fn edge_cell(&self, edge: Edge, offset: i32) -> Position {
        match edge {
            Edge::Left => IVec2::new(0, offset),
            Edge::Right => IVec2::new(self.width - 1, offset),
            Edge::Top => IVec2::new(offset, 0),
            Edge::Bottom => IVec2::new(offset, self.height - 1),
        }
    }
}
