use super::direction::Direction;
use super::grid::Tile;
use super::shape::{shape_of, SegmentShape};
use serde::Deserialize;
use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// How eating more than one fruit between two moves is handled
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum GrowthMode {
    /// Growth is a one-shot flag: any number of fruits eaten before the next
    /// move add a single segment.
    #[default]
    Single,
    /// Every fruit eaten adds one segment, applied one per move.
    Queued,
}

impl fmt::Display for GrowthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            GrowthMode::Single => "single",
            GrowthMode::Queued => "queued",
        })
    }
}

impl FromStr for GrowthMode {
    type Err = ParseGrowthModeError;

    fn from_str(s: &str) -> Result<GrowthMode, ParseGrowthModeError> {
        match s {
            "single" => Ok(GrowthMode::Single),
            "queued" => Ok(GrowthMode::Queued),
            _ => Err(ParseGrowthModeError),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
#[error(r#"invalid growth mode; expected "single" or "queued""#)]
pub(crate) struct ParseGrowthModeError;

/// Snake state.  Snate.
///
/// `segments[0]` is the head and the last element is the tail.  All
/// positions are grid coordinates; the head may lie outside the grid right
/// after a fatal move.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Snake {
    pub(super) segments: VecDeque<Tile>,

    /// The direction of the most recent move
    pub(super) direction: Direction,

    /// The direction that will be committed at the next move
    pub(super) pending_direction: Direction,

    pub(super) growth_mode: GrowthMode,

    /// Number of moves that will keep the tail in place
    pub(super) pending_growth: u32,

    /// Whether the last move put the head on a cell the body occupied
    pub(super) colliding: bool,

    /// Sub-tile progress toward the next move, used only for drawing
    pub(super) motion_offset: f32,
}

impl Snake {
    /// Create a snake occupying `segments` (head first) and facing
    /// `direction`
    pub(crate) fn new(segments: &[Tile], direction: Direction, growth_mode: GrowthMode) -> Snake {
        debug_assert!(!segments.is_empty(), "snake must have at least one segment");
        Snake {
            segments: segments.iter().copied().collect(),
            direction,
            pending_direction: direction,
            growth_mode,
            pending_growth: 0,
            colliding: false,
            motion_offset: 0.0,
        }
    }

    pub(crate) fn head(&self) -> Tile {
        self.segments
            .front()
            .copied()
            .expect("snake should never be empty")
    }

    pub(crate) fn segments(&self) -> &VecDeque<Tile> {
        &self.segments
    }

    pub(crate) fn len(&self) -> usize {
        self.segments.len()
    }

    pub(crate) fn direction(&self) -> Direction {
        self.direction
    }

    pub(crate) fn pending_direction(&self) -> Direction {
        self.pending_direction
    }

    pub(crate) fn colliding(&self) -> bool {
        self.colliding
    }

    pub(crate) fn growth_pending(&self) -> bool {
        self.pending_growth > 0
    }

    pub(crate) fn motion_offset(&self) -> f32 {
        self.motion_offset
    }

    pub(crate) fn set_motion_offset(&mut self, offset: f32) {
        self.motion_offset = offset;
    }

    /// Request that the next move go in `direction`.  A request to turn
    /// straight back into the neck is ignored.  Returns whether the request
    /// was accepted.
    pub(crate) fn set_pending_direction(&mut self, direction: Direction) -> bool {
        if direction == self.direction.reverse() {
            false
        } else {
            self.pending_direction = direction;
            true
        }
    }

    /// Queue growth for the next move
    pub(crate) fn mark_growth(&mut self) {
        match self.growth_mode {
            GrowthMode::Single => self.pending_growth = 1,
            GrowthMode::Queued => self.pending_growth = self.pending_growth.saturating_add(1),
        }
    }

    /// Move the snake one cell in the pending direction.
    ///
    /// Collision is judged against the body as it was before the move, so
    /// moving into the cell the tail is about to vacate counts.
    pub(crate) fn advance(&mut self) {
        self.direction = self.pending_direction;
        let new_head = self.head().step(self.direction);
        self.colliding = self.segments.contains(&new_head);
        if self.pending_growth > 0 {
            self.pending_growth -= 1;
        } else {
            let _ = self.segments.pop_back();
        }
        self.segments.push_front(new_head);
    }

    /// The drawing shape of the segment at `index`, counting from the head
    pub(crate) fn shape(&self, index: usize) -> SegmentShape {
        shape_of(&self.segments, index, self.direction)
    }
}
