use super::direction::Direction;

/// A grid cell.  Coordinates are signed so that a head which has just left
/// the board can still be represented (and detected).
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub(crate) struct Tile {
    pub(crate) x: i32,
    pub(crate) y: i32,
}

impl Tile {
    pub(crate) const fn new(x: i32, y: i32) -> Tile {
        Tile { x, y }
    }

    /// Return the tile one step away in direction `d`
    pub(crate) fn step(self, d: Direction) -> Tile {
        let (dx, dy) = d.offset();
        Tile {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }

    /// Return the direction of the single step leading from `self` to
    /// `other`, if they are orthogonal neighbors
    pub(crate) fn direction_to(self, other: Tile) -> Option<Direction> {
        Direction::from_offset(
            other.x.saturating_sub(self.x),
            other.y.saturating_sub(self.y),
        )
    }
}

/// The square playing field, `tile_count` cells on a side
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct Grid {
    tile_count: u16,
}

impl Grid {
    pub(crate) fn new(tile_count: u16) -> Grid {
        Grid { tile_count }
    }

    pub(crate) fn tile_count(self) -> u16 {
        self.tile_count
    }

    pub(crate) fn cell_count(self) -> usize {
        usize::from(self.tile_count) * usize::from(self.tile_count)
    }

    pub(crate) fn in_bounds(self, tile: Tile) -> bool {
        let range = 0..i32::from(self.tile_count);
        range.contains(&tile.x) && range.contains(&tile.y)
    }

    /// Iterate over every cell of the grid in row-major order
    pub(crate) fn positions(self) -> impl Iterator<Item = Tile> {
        let n = i32::from(self.tile_count);
        (0..n).flat_map(move |y| (0..n).map(move |x| Tile::new(x, y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Tile::new(0, 0), true)]
    #[case(Tile::new(4, 4), true)]
    #[case(Tile::new(2, 3), true)]
    #[case(Tile::new(5, 2), false)]
    #[case(Tile::new(2, 5), false)]
    #[case(Tile::new(-1, 0), false)]
    #[case(Tile::new(0, -1), false)]
    fn in_bounds(#[case] tile: Tile, #[case] expected: bool) {
        assert_eq!(Grid::new(5).in_bounds(tile), expected);
    }

    #[test]
    fn positions_are_row_major_and_complete() {
        let grid = Grid::new(3);
        let all = grid.positions().collect::<Vec<_>>();
        assert_eq!(all.len(), grid.cell_count());
        assert_eq!(all[0], Tile::new(0, 0));
        assert_eq!(all[1], Tile::new(1, 0));
        assert_eq!(all[3], Tile::new(0, 1));
        assert_eq!(all[8], Tile::new(2, 2));
        assert!(all.iter().all(|&t| grid.in_bounds(t)));
    }

    #[rstest]
    #[case(Tile::new(2, 2), Tile::new(2, 1), Some(Direction::North))]
    #[case(Tile::new(2, 2), Tile::new(3, 2), Some(Direction::East))]
    #[case(Tile::new(2, 2), Tile::new(2, 3), Some(Direction::South))]
    #[case(Tile::new(2, 2), Tile::new(1, 2), Some(Direction::West))]
    #[case(Tile::new(2, 2), Tile::new(2, 2), None)]
    #[case(Tile::new(2, 2), Tile::new(3, 3), None)]
    fn direction_to(#[case] from: Tile, #[case] to: Tile, #[case] d: Option<Direction>) {
        assert_eq!(from.direction_to(to), d);
    }

    #[test]
    fn step_leaves_the_board() {
        assert_eq!(Tile::new(0, 3).step(Direction::West), Tile::new(-1, 3));
        assert!(!Grid::new(5).in_bounds(Tile::new(4, 0).step(Direction::East)));
    }
}
