use enum_map::Enum;
use serde::Deserialize;

/// One of the four directions in which the snake can travel.  North is
/// toward row 0.
#[derive(Clone, Copy, Debug, Deserialize, Enum, Eq, Hash, PartialEq)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Direction {
    #[serde(alias = "up")]
    North,
    #[serde(alias = "right")]
    East,
    #[serde(alias = "down")]
    South,
    #[serde(alias = "left")]
    West,
}

impl Direction {
    /// The unit vector `(dx, dy)` for one step in this direction
    pub(crate) fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }

    /// Inverse of [`Direction::offset()`].  Returns `None` for anything that
    /// isn't a unit step along one axis.
    pub(crate) fn from_offset(dx: i32, dy: i32) -> Option<Direction> {
        match (dx, dy) {
            (0, -1) => Some(Direction::North),
            (1, 0) => Some(Direction::East),
            (0, 1) => Some(Direction::South),
            (-1, 0) => Some(Direction::West),
            _ => None,
        }
    }

    pub(crate) fn reverse(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    pub(crate) fn axis(self) -> Axis {
        match self {
            Direction::North | Direction::South => Axis::Vertical,
            Direction::East | Direction::West => Axis::Horizontal,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum Axis {
    Horizontal,
    Vertical,
}
