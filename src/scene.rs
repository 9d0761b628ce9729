//! Turning a round into draw calls.
//!
//! The scene is drawn onto a [`Surface`], which knows only how to fill a
//! rectangle with a color and how to blit a named [`Asset`] into a
//! rectangle.  Rectangles are measured in tiles, with tile (0, 0) at the
//! top-left of the board; they are fractional so that a moving snake can be
//! drawn between cells.
use crate::consts;
use crate::game::{Direction, Fruit, Grid, LossCause, Round, RoundState, SegmentShape, Snake, Tile};

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct Rgb(pub(crate) u8, pub(crate) u8, pub(crate) u8);

/// A rectangle in tile units
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct Area {
    pub(crate) x: f32,
    pub(crate) y: f32,
    pub(crate) width: f32,
    pub(crate) height: f32,
}

impl Area {
    pub(crate) fn new(x: f32, y: f32, width: f32, height: f32) -> Area {
        Area {
            x,
            y,
            width,
            height,
        }
    }

    /// The area covered by a single tile
    // Board coordinates are far too small to lose precision in an f32.
    #[allow(clippy::cast_precision_loss)]
    pub(crate) fn tile(tile: Tile) -> Area {
        Area::new(tile.x as f32, tile.y as f32, 1.0, 1.0)
    }

    /// Shift the area `amount` tiles in direction `d`
    pub(crate) fn nudged(self, d: Direction, amount: f32) -> Area {
        let (dx, dy) = match d {
            Direction::North => (0.0, -1.0),
            Direction::East => (1.0, 0.0),
            Direction::South => (0.0, 1.0),
            Direction::West => (-1.0, 0.0),
        };
        Area {
            x: f32::mul_add(dx, amount, self.x),
            y: f32::mul_add(dy, amount, self.y),
            ..self
        }
    }

    /// Scale the area by `ratio` about its center
    pub(crate) fn scaled(self, ratio: f32) -> Area {
        let width = self.width * ratio;
        let height = self.height * ratio;
        Area {
            x: self.x + (self.width - width) / 2.0,
            y: self.y + (self.height - height) / 2.0,
            width,
            height,
        }
    }
}

/// Something a surface knows how to draw
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum Asset {
    Snake(SegmentShape),
    Fruit,
    /// The score bar, showing the given score
    Score(u32),
    /// A message box laid over the board
    Banner(Banner),
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum Banner {
    Paused,
    Lost(LossCause),
    Won { score: u32, eaten: u32, losses: u32 },
}

/// A render target
pub(crate) trait Surface {
    fn fill(&mut self, area: Area, color: Rgb);
    fn blit(&mut self, asset: Asset, area: Area);
}

/// One layer of the scene
pub(crate) trait Drawable {
    fn draw(&self, surface: &mut dyn Surface);
}

/// The checkered playing field
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Board {
    grid: Grid,
}

impl Drawable for Board {
    fn draw(&self, surface: &mut dyn Surface) {
        for tile in self.grid.positions() {
            let color = if (tile.x + tile.y).rem_euclid(2) == 0 {
                consts::BOARD_DARK
            } else {
                consts::BOARD_LIGHT
            };
            surface.fill(Area::tile(tile), color);
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct FruitLayer<'a> {
    fruits: &'a [Fruit],
}

impl Drawable for FruitLayer<'_> {
    fn draw(&self, surface: &mut dyn Surface) {
        for fruit in self.fruits {
            surface.blit(
                Asset::Fruit,
                Area::tile(fruit.tile).scaled(fruit.pulse.ratio()),
            );
        }
    }
}

/// The snake, drawn tail first so that the head ends up on top.
///
/// The head is drawn part of the way toward the cell it is about to enter,
/// and the tail part of the way toward the cell it is about to vacate into,
/// so that the snake appears to slither rather than hop.  A tail that is
/// about to stay put for growth is left where it is.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct SnakeLayer<'a> {
    snake: &'a Snake,
}

impl Drawable for SnakeLayer<'_> {
    fn draw(&self, surface: &mut dyn Surface) {
        let offset = self.snake.motion_offset();
        let last = self.snake.len().saturating_sub(1);
        for (i, &tile) in self.snake.segments().iter().enumerate().rev() {
            let shape = self.snake.shape(i);
            let mut area = Area::tile(tile);
            if i == 0 {
                area = area.nudged(self.snake.pending_direction(), offset);
            } else if i == last && !self.snake.growth_pending() {
                if let SegmentShape::Tail(toward) = shape {
                    area = area.nudged(toward, offset);
                }
            }
            surface.blit(Asset::Snake(shape), area);
        }
    }
}

/// The strip above the board holding the score
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct ScoreBar {
    score: u32,
    grid: Grid,
}

impl Drawable for ScoreBar {
    fn draw(&self, surface: &mut dyn Surface) {
        let width = f32::from(self.grid.tile_count());
        surface.blit(Asset::Score(self.score), Area::new(0.0, -1.0, width, 1.0));
    }
}

/// A message box over the whole board when play is stopped
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Overlay {
    banner: Option<Banner>,
    grid: Grid,
}

impl Drawable for Overlay {
    fn draw(&self, surface: &mut dyn Surface) {
        if let Some(banner) = self.banner {
            let side = f32::from(self.grid.tile_count());
            surface.blit(Asset::Banner(banner), Area::new(0.0, 0.0, side, side));
        }
    }
}

/// Draw the whole of `round` onto `surface`: board, fruits, snake, score,
/// and any state overlay, in that order
pub(crate) fn compose<R>(round: &Round<R>, surface: &mut dyn Surface) {
    let grid = round.grid();
    let banner = match round.state() {
        RoundState::Running => None,
        RoundState::Paused => Some(round.last_loss().map_or(Banner::Paused, Banner::Lost)),
        RoundState::Won => Some(Banner::Won {
            score: round.score(),
            eaten: round.fruits_eaten(),
            losses: round.losses(),
        }),
    };
    let board = Board { grid };
    let fruits = FruitLayer {
        fruits: round.fruits(),
    };
    let snake = SnakeLayer {
        snake: round.snake(),
    };
    let score = ScoreBar {
        score: round.score(),
        grid,
    };
    let overlay = Overlay { banner, grid };
    let layers: [&dyn Drawable; 5] = [&board, &fruits, &snake, &score, &overlay];
    for layer in layers {
        layer.draw(surface);
    }
}
