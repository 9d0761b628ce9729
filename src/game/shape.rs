use super::direction::{Axis, Direction};
use super::grid::Tile;
use std::collections::VecDeque;

/// Which piece of snake artwork a segment should be drawn with.  This is
/// derived purely from a segment's neighbors and never feeds back into game
/// logic.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum SegmentShape {
    /// The head, facing the given direction
    Head(Direction),
    /// A straight piece of body lying along the given axis
    Body(Axis),
    /// A bend connecting two perpendicular sides of the cell
    Corner(Corner),
    /// The tail; the direction points toward the rest of the body
    Tail(Direction),
}

/// The two sides of a cell joined by a bend in the body
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum Corner {
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Corner {
    /// Return the corner connecting the sides facing `a` and `b`, in either
    /// order.  Returns `None` if the directions are not perpendicular.
    pub(crate) fn joining(a: Direction, b: Direction) -> Option<Corner> {
        match (a, b) {
            (Direction::North, Direction::East) | (Direction::East, Direction::North) => {
                Some(Corner::NorthEast)
            }
            (Direction::North, Direction::West) | (Direction::West, Direction::North) => {
                Some(Corner::NorthWest)
            }
            (Direction::South, Direction::East) | (Direction::East, Direction::South) => {
                Some(Corner::SouthEast)
            }
            (Direction::South, Direction::West) | (Direction::West, Direction::South) => {
                Some(Corner::SouthWest)
            }
            _ => None,
        }
    }
}

/// Determine the shape of `segments[index]`.
///
/// `heading` is the snake's committed direction; it orients the head (and
/// the tail) when there is no usable neighbor to orient them by, as happens
/// for a one-segment snake or a segment sitting on top of its neighbor after
/// a collision.
pub(crate) fn shape_of(segments: &VecDeque<Tile>, index: usize, heading: Direction) -> SegmentShape {
    let Some(&here) = segments.get(index) else {
        return SegmentShape::Body(heading.axis());
    };
    let toward_head = index
        .checked_sub(1)
        .and_then(|i| segments.get(i))
        .and_then(|&p| here.direction_to(p));
    let toward_tail = segments
        .get(index.saturating_add(1))
        .and_then(|&p| here.direction_to(p));
    if index == 0 {
        return SegmentShape::Head(toward_tail.map_or(heading, Direction::reverse));
    }
    if index + 1 == segments.len() {
        return SegmentShape::Tail(toward_head.unwrap_or(heading));
    }
    match (toward_head, toward_tail) {
        (Some(a), Some(b)) => {
            Corner::joining(a, b).map_or(SegmentShape::Body(a.axis()), SegmentShape::Corner)
        }
        (Some(d), None) | (None, Some(d)) => SegmentShape::Body(d.axis()),
        (None, None) => SegmentShape::Body(heading.axis()),
    }
}
