use serde::{Deserialize, Serialize};

/// One integer grid cell. Cell `(x, y)` covers `[x, x + 1) × [y, y + 1)` in world space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GridPos {
    pub x: i64,
    pub y: i64,
}

impl GridPos {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Neighbour arithmetic wraps so the extremes of `i64` never overflow.
    pub const fn offset(self, dx: i64, dy: i64) -> Self {
        Self { x: self.x.wrapping_add(dx), y: self.y.wrapping_add(dy) }
    }

    pub fn containing(point: Point) -> Self {
        Self { x: point.x.floor() as i64, y: point.y.floor() as i64 }
    }

    pub fn center(self) -> Point {
        Point { x: self.x as f64 + 0.5, y: self.y as f64 + 0.5 }
    }

    pub const fn parity(self) -> Parity {
        match (self.x & 1 == 0, self.y & 1 == 0) {
            (true, true) => Parity::Pillar,
            (false, false) => Parity::Room,
            (true, false) => Parity::Door(DoorAxis::X),
            (false, true) => Parity::Door(DoorAxis::Y),
        }
    }
}

/// Continuous world position.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Which axis separates the two rooms a door position connects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DoorAxis {
    /// Even `x`: rooms sit at `x - 1` and `x + 1`.
    X,
    /// Even `y`: rooms sit at `y - 1` and `y + 1`.
    Y,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Parity {
    Pillar,
    Room,
    Door(DoorAxis),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WallKind {
    Plain,
    Inscription,
    Anomaly,
    Portal,
}

/// Classification of a single cell. Closed door positions are wall faces and
/// therefore classify as `Wall`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellKind {
    Pillar,
    Room { portal: bool },
    OpenDoor,
    Wall(WallKind),
}

impl CellKind {
    pub const fn is_walkable(self) -> bool {
        matches!(self, Self::Room { .. } | Self::OpenDoor)
    }

    pub const fn is_solid(self) -> bool {
        !self.is_walkable()
    }
}

/// Grid axis a ray stepped across when it reached its hit cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    #[default]
    X,
    Y,
}
