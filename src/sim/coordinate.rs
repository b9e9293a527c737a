//! Grid positions

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::consts::{FIELD_LENGTH, FIELD_WIDTH};

/// A tile position on the field. `(-1, -1)` means "not on the field".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
}

impl Coordinate {
    pub const OFF_FIELD: Coordinate = Coordinate { x: -1, y: -1 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn is_on_field(&self) -> bool {
        *self != Self::OFF_FIELD
    }

    /// Whether the tile lies inside the field grid
    pub fn in_bounds(&self) -> bool {
        (0..FIELD_LENGTH).contains(&self.x) && (0..FIELD_WIDTH).contains(&self.y)
    }

    /// Taxicab distance (no diagonal moves on the grid)
    pub fn manhattan(&self, other: Coordinate) -> i32 {
        let d = (self.as_ivec2() - other.as_ivec2()).abs();
        d.x + d.y
    }

    #[inline]
    pub fn as_ivec2(&self) -> IVec2 {
        IVec2::new(self.x, self.y)
    }
}

impl From<IVec2> for Coordinate {
    fn from(v: IVec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{},{}]", self.x, self.y)
    }
}
