use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// Continuous 2D coordinate in cell units. Cell centers sit on integer values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub const fn new(x: f32, y: f32) -> Self {
        Position { x, y }
    }

    /// Position of the center of cell (x, y)
    pub fn cell(x: i32, y: i32) -> Self {
        Position::new(x as f32, y as f32)
    }

    /// Squared length, cheaper than `length` when only comparing
    pub fn sqr_magnitude(self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    pub fn sqr_distance(self, other: Position) -> f32 {
        (self - other).sqr_magnitude()
    }

    /// Step from `self` toward `target` by at most `max_delta`, never past it
    pub fn move_towards(self, target: Position, max_delta: f32) -> Position {
        let delta = target - self;
        let sqr_dist = delta.sqr_magnitude();
        if sqr_dist == 0.0 || (max_delta >= 0.0 && sqr_dist <= max_delta * max_delta) {
            return target;
        }
        let dist = sqr_dist.sqrt();
        Position::new(
            self.x + delta.x / dist * max_delta,
            self.y + delta.y / dist * max_delta,
        )
    }

    /// Nearest cell coordinates
    pub fn to_cell(self) -> (i32, i32) {
        (self.x.round() as i32, self.y.round() as i32)
    }
}

impl Add for Position {
    type Output = Position;

    fn add(self, rhs: Position) -> Position {
        Position::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Position {
    type Output = Position;

    fn sub(self, rhs: Position) -> Position {
        Position::new(self.x - rhs.x, self.y - rhs.y)
    }
}
