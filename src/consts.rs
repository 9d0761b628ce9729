//! Assorted constants & default configuration
use crate::scene::Rgb;
use ratatui::style::{Color, Modifier, Style};
use std::time::Duration;

/// Default number of tiles along each side of the board
pub(crate) const DEFAULT_TILE_COUNT: u16 = 17;

/// Largest number of tiles allowed along each side of the board
pub(crate) const MAX_TILE_COUNT: u16 = 200;

/// Default number of fruits placed at the start of a round
pub(crate) const DEFAULT_FRUIT_COUNT: usize = 10;

/// Default time between discrete moves of the snake
pub(crate) const DEFAULT_MOVE_PERIOD: Duration = Duration::from_millis(150);

/// Default time between frames (about 120 Hz)
pub(crate) const DEFAULT_RENDER_PERIOD: Duration = Duration::from_millis(8);

/// Default motion offset right after a move
pub(crate) const DEFAULT_LEAD_IN: f32 = 0.0;

/// Length of the snake at the start of a round
pub(crate) const INITIAL_SNAKE_LENGTH: u16 = 3;

/// Column of the snake's head at the start of a round.  The row is the
/// middle of the board.
pub(crate) const START_HEAD_COLUMN: i32 = 3;

/// Motion offset at which a discrete move happens under slither pacing
pub(crate) const MOTION_THRESHOLD: f32 = 1.0;

/// Smallest size of a fruit, as a fraction of a tile
pub(crate) const PULSE_MIN: f32 = 0.6;

/// Largest size of a fruit, as a fraction of a tile
pub(crate) const PULSE_MAX: f32 = 1.0;

/// Phase advance of a fruit's pulse per frame.  A full swell-and-shrink is a
/// phase change of 2.
pub(crate) const PULSE_STEP: f32 = 0.02;

/// Phase difference between consecutive fruits' pulses
pub(crate) const PULSE_STAGGER: f32 = 0.37;

/// Terminal columns used to draw one tile, so that tiles look square
pub(crate) const COLUMNS_PER_TILE: u16 = 2;

/// Tile colors, alternating in a checkerboard
pub(crate) const BOARD_DARK: Rgb = Rgb(0, 100, 0);
pub(crate) const BOARD_LIGHT: Rgb = Rgb(0, 200, 0);

/// Glyphs for the snake's head, indexed by the direction it faces
pub(crate) const SNAKE_HEAD_NORTH: [char; 2] = ['v', ' '];
pub(crate) const SNAKE_HEAD_SOUTH: [char; 2] = ['^', ' '];
pub(crate) const SNAKE_HEAD_EAST: [char; 2] = ['═', '<'];
pub(crate) const SNAKE_HEAD_WEST: [char; 2] = ['>', '═'];

/// Glyphs for straight pieces of body
pub(crate) const SNAKE_BODY_HORIZONTAL: [char; 2] = ['═', '═'];
pub(crate) const SNAKE_BODY_VERTICAL: [char; 2] = ['║', ' '];

/// Glyphs for bends, named for the sides they join
pub(crate) const SNAKE_CORNER_NORTH_EAST: [char; 2] = ['╚', '═'];
pub(crate) const SNAKE_CORNER_NORTH_WEST: [char; 2] = ['╝', ' '];
pub(crate) const SNAKE_CORNER_SOUTH_EAST: [char; 2] = ['╔', '═'];
pub(crate) const SNAKE_CORNER_SOUTH_WEST: [char; 2] = ['╗', ' '];

/// Glyphs for the tail, named for the direction of the rest of the body
pub(crate) const SNAKE_TAIL_NORTH: [char; 2] = ['╵', ' '];
pub(crate) const SNAKE_TAIL_SOUTH: [char; 2] = ['╷', ' '];
pub(crate) const SNAKE_TAIL_EAST: [char; 2] = ['╶', '═'];
pub(crate) const SNAKE_TAIL_WEST: [char; 2] = ['═', '╴'];

/// Glyphs for a fully-swollen fruit
pub(crate) const FRUIT_LARGE: [char; 2] = ['◖', '◗'];

/// Pulse ratio at and above which a fruit is drawn with [`FRUIT_LARGE`]
pub(crate) const FRUIT_LARGE_RATIO: f32 = 0.8;

/// Glyph for a shrunken fruit
pub(crate) const FRUIT_SMALL: char = '•';

/// Style for the snake
pub(crate) const SNAKE_STYLE: Style = Style::new().fg(Color::Blue).add_modifier(Modifier::BOLD);

/// Style for the fruit
pub(crate) const FRUIT_STYLE: Style = Style::new().fg(Color::LightRed);

/// Style for key names shown in the interface
pub(crate) const KEY_STYLE: Style = Style::new().fg(Color::Yellow);

/// Style for the score bar above the board
pub(crate) const SCORE_BAR_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);
