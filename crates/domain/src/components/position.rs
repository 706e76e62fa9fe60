//! Position attribute - grid coordinates for a game object

use serde::{Deserialize, Serialize};

use wagerhall_domain::{Attribute, AttributeBit};

/// A location on the game grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub x: i64,
    pub y: i64,
}

impl Attribute for Position {
    const BIT: AttributeBit = AttributeBit::new(1);
    const KEY: &'static str = "position";
}

impl Position {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    pub fn translate(&mut self, dx: i64, dy: i64) {
        self.x = self.x.saturating_add(dx);
        self.y = self.y.saturating_add(dy);
    }

    pub fn manhattan_distance(&self, other: &Position) -> u64 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}
