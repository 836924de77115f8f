//! World-space positions.
//!
//! The behavior core only needs squared distances and straight-line steps;
//! pathfinding proper is an external concern.

/// A point in world space.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0.0, y: 0.0, z: 0.0 };

    #[inline]
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Squared Euclidean distance.  All range checks in the core compare
    /// squared values so no square root is taken on hot paths.
    #[inline]
    pub fn distance_squared(self, other: Position) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        dx * dx + dy * dy + dz * dz
    }

    /// Move at most `max_step` units toward `target`.  Lands exactly on
    /// `target` when it is within reach.
    pub fn step_toward(self, target: Position, max_step: f32) -> Position {
        let d2 = self.distance_squared(target);
        if d2 <= max_step * max_step {
            return target;
        }
        let scale = max_step / d2.sqrt();
        Position {
            x: self.x + (target.x - self.x) * scale,
            y: self.y + (target.y - self.y) * scale,
            z: self.z + (target.z - self.z) * scale,
        }
    }

    #[inline]
    pub fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<[f32; 3]> for Position {
    fn from(p: [f32; 3]) -> Self {
        Position::new(p[0], p[1], p[2])
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.2}, {:.2}, {:.2})", self.x, self.y, self.z)
    }
}

/// A storage container placed in the world.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StorageSite {
    pub container: crate::ContainerId,
    pub position:  Position,
}

impl StorageSite {
    pub fn new(container: crate::ContainerId, position: Position) -> Self {
        Self { container, position }
    }
}
