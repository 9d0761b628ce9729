use super::fruit::Fruit;
use super::grid::{Grid, Tile};
use super::snake::Snake;
use rand::Rng;
use std::collections::HashSet;
use tracing::info;

/// Return every cell occupied by neither the snake nor any fruit other than
/// `fruits[except]`, in row-major order
pub(crate) fn open_tiles(
    grid: Grid,
    snake: &Snake,
    fruits: &[Fruit],
    except: Option<usize>,
) -> Vec<Tile> {
    let occupied = snake
        .segments()
        .iter()
        .copied()
        .chain(
            fruits
                .iter()
                .enumerate()
                .filter(|&(i, _)| Some(i) != except)
                .map(|(_, f)| f.tile),
        )
        .collect::<HashSet<_>>();
    let mut open = Vec::with_capacity(grid.cell_count().saturating_sub(occupied.len()));
    open.extend(grid.positions().filter(|t| !occupied.contains(t)));
    open
}

/// Pick an open cell uniformly at random, ignoring `fruits[except]`.
/// Returns `None` if the board is full.
pub(crate) fn allocate<R: Rng>(
    grid: Grid,
    snake: &Snake,
    fruits: &[Fruit],
    except: Option<usize>,
    rng: &mut R,
) -> Option<Tile> {
    let open = open_tiles(grid, snake, fruits, except);
    if open.is_empty() {
        None
    } else {
        open.get(rng.random_range(0..open.len())).copied()
    }
}

/// What happened to a fruit passed to [`spawn()`]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Placement {
    /// The fruit was moved to the given cell
    Placed(Tile),
    /// There was nowhere to put the fruit, so it was taken off the board
    Removed,
}

/// Relocate `fruits[index]` to a random open cell, or remove it from
/// `fruits` if there is no open cell
pub(crate) fn spawn<R: Rng>(
    grid: Grid,
    snake: &Snake,
    fruits: &mut Vec<Fruit>,
    index: usize,
    rng: &mut R,
) -> Placement {
    if let Some(tile) = allocate(grid, snake, fruits, Some(index), rng) {
        if let Some(fruit) = fruits.get_mut(index) {
            fruit.tile = tile;
        }
        Placement::Placed(tile)
    } else {
        if index < fruits.len() {
            let _ = fruits.remove(index);
        }
        info!(remaining = fruits.len(), "No open tiles left; removing fruit");
        Placement::Removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::direction::Direction;
    use crate::game::fruit::Pulse;
    use crate::game::snake::GrowthMode;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    fn snake() -> Snake {
        Snake::new(
            &[Tile::new(3, 2), Tile::new(2, 2), Tile::new(1, 2)],
            Direction::East,
            GrowthMode::Single,
        )
    }

    fn fruit(x: i32, y: i32) -> Fruit {
        Fruit::new(Tile::new(x, y), Pulse::default())
    }

    #[test]
    fn candidate_count() {
        let grid = Grid::new(5);
        let fruits = [fruit(0, 0), fruit(4, 4), fruit(0, 4), fruit(4, 0)];
        let open = open_tiles(grid, &snake(), &fruits, Some(0));
        assert_eq!(open.len(), 25 - 3 - (fruits.len() - 1));
        assert!(open.contains(&Tile::new(0, 0)));
        assert!(!open.contains(&Tile::new(4, 4)));
        assert!(!open.contains(&Tile::new(2, 2)));
    }

    #[test]
    fn overlapping_occupants_counted_once() {
        let grid = Grid::new(5);
        let fruits = [fruit(3, 2), fruit(3, 2)];
        let open = open_tiles(grid, &snake(), &fruits, None);
        assert_eq!(open.len(), 22);
    }

    #[test]
    fn spawn_avoids_snake_and_other_fruits() {
        let grid = Grid::new(4);
        let snake = snake();
        let mut rng = ChaCha12Rng::seed_from_u64(RNG_SEED);
        let mut fruits = vec![fruit(0, 0), fruit(1, 1), fruit(2, 1)];
        for _ in 0..200 {
            let Placement::Placed(tile) = spawn(grid, &snake, &mut fruits, 0, &mut rng) else {
                panic!("fruit should have been placed");
            };
            assert!(grid.in_bounds(tile));
            assert!(!snake.segments().contains(&tile));
            assert_ne!(tile, Tile::new(1, 1));
            assert_ne!(tile, Tile::new(2, 1));
            assert_eq!(fruits[0].tile, tile);
        }
    }

    #[test]
    fn spawn_reaches_every_open_tile() {
        let grid = Grid::new(4);
        let snake = snake();
        let mut rng = ChaCha12Rng::seed_from_u64(RNG_SEED);
        let mut fruits = vec![fruit(0, 0)];
        let mut seen = HashSet::new();
        for _ in 0..2000 {
            if let Placement::Placed(tile) = spawn(grid, &snake, &mut fruits, 0, &mut rng) {
                seen.insert(tile);
            }
        }
        assert_eq!(seen.len(), 16 - 3);
    }

    #[test]
    fn spawn_removes_fruit_when_full() {
        // 2x2 board: two cells of snake, two fruits, nothing left over
        let grid = Grid::new(2);
        let snake = Snake::new(
            &[Tile::new(1, 0), Tile::new(0, 0)],
            Direction::East,
            GrowthMode::Single,
        );
        let mut rng = ChaCha12Rng::seed_from_u64(RNG_SEED);
        let mut fruits = vec![fruit(0, 1), fruit(1, 1)];
        assert_eq!(
            spawn(grid, &snake, &mut fruits, 0, &mut rng),
            Placement::Placed(Tile::new(0, 1))
        );
        let snake = Snake::new(
            &[Tile::new(1, 0), Tile::new(0, 0), Tile::new(0, 1)],
            Direction::East,
            GrowthMode::Single,
        );
        let mut fruits = vec![fruit(1, 0), fruit(1, 1)];
        assert_eq!(
            spawn(grid, &snake, &mut fruits, 0, &mut rng),
            Placement::Removed
        );
        assert_eq!(fruits, [fruit(1, 1)]);
    }

    #[test]
    fn allocate_on_full_board() {
        let grid = Grid::new(2);
        let snake = Snake::new(
            &[Tile::new(1, 0), Tile::new(0, 0)],
            Direction::East,
            GrowthMode::Single,
        );
        let fruits = [fruit(0, 1), fruit(1, 1)];
        let mut rng = ChaCha12Rng::seed_from_u64(RNG_SEED);
        assert_eq!(allocate(grid, &snake, &fruits, None, &mut rng), None);
    }
}
