use crate::clock::PacingMode;
use crate::consts;
use crate::game::{Direction, Grid, GrowthMode, Tile};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Program configuration read from a configuration file and/or the command
/// line.  Every setting is optional; unset settings take their defaults when
/// the configuration is [validated][Config::validate].
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub(crate) struct Config {
    pub(crate) tile_count: Option<u16>,
    pub(crate) fruit_count: Option<usize>,
    pub(crate) move_period_ms: Option<u64>,
    pub(crate) render_period_ms: Option<u64>,
    pub(crate) pacing: Option<PacingMode>,
    pub(crate) lead_in: Option<f32>,
    pub(crate) growth: Option<GrowthMode>,
    pub(crate) start_length: Option<u16>,
    pub(crate) start_direction: Option<Direction>,
    pub(crate) start_head: Option<[i32; 2]>,
    pub(crate) log_file: Option<PathBuf>,
}

impl Config {
    /// Return the default configuration file path
    pub(crate) fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_local_dir()
            .map(|p| p.join("tilesnake").join("config.toml"))
            .ok_or(ConfigError::NoPath)
    }

    /// Read configuration from a file on disk.  If the file does not exist and
    /// `allow_missing` is true, a default `Config` value is returned.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file could not be read or if the file's contents
    /// could not be deserialized.
    pub(crate) fn load(path: &Path, allow_missing: bool) -> Result<Config, ConfigError> {
        let content = match fs_err::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
                return Ok(Config::default())
            }
            Err(e) => return Err(ConfigError::Read(e)),
        };
        toml::from_str(&content).map_err(Into::into)
    }

    /// Overlay the settings that are set in `other` on top of `self`
    pub(crate) fn merge(self, other: Config) -> Config {
        Config {
            tile_count: other.tile_count.or(self.tile_count),
            fruit_count: other.fruit_count.or(self.fruit_count),
            move_period_ms: other.move_period_ms.or(self.move_period_ms),
            render_period_ms: other.render_period_ms.or(self.render_period_ms),
            pacing: other.pacing.or(self.pacing),
            lead_in: other.lead_in.or(self.lead_in),
            growth: other.growth.or(self.growth),
            start_length: other.start_length.or(self.start_length),
            start_direction: other.start_direction.or(self.start_direction),
            start_head: other.start_head.or(self.start_head),
            log_file: other.log_file.or(self.log_file),
        }
    }

    /// Fill in defaults and check that the settings describe a playable
    /// round
    pub(crate) fn validate(&self) -> Result<GameConfig, ConfigError> {
        let tile_count = self.tile_count.unwrap_or(consts::DEFAULT_TILE_COUNT);
        if tile_count == 0 {
            return Err(ConfigError::NoTiles);
        }
        if tile_count > consts::MAX_TILE_COUNT {
            return Err(ConfigError::TooManyTiles(tile_count));
        }
        let move_period = self
            .move_period_ms
            .map_or(consts::DEFAULT_MOVE_PERIOD, Duration::from_millis);
        if move_period.is_zero() {
            return Err(ConfigError::ZeroPeriod("move-period-ms"));
        }
        let render_period = self
            .render_period_ms
            .map_or(consts::DEFAULT_RENDER_PERIOD, Duration::from_millis);
        if render_period.is_zero() {
            return Err(ConfigError::ZeroPeriod("render-period-ms"));
        }
        let lead_in = self.lead_in.unwrap_or(consts::DEFAULT_LEAD_IN);
        if !(-1.0..=0.0).contains(&lead_in) {
            return Err(ConfigError::LeadIn(lead_in));
        }
        let start_length = self.start_length.unwrap_or(consts::INITIAL_SNAKE_LENGTH);
        if start_length == 0 {
            return Err(ConfigError::EmptySnake);
        }
        let head = self.start_head.map_or_else(
            || Tile::new(consts::START_HEAD_COLUMN, i32::from(tile_count / 2)),
            |[x, y]| Tile::new(x, y),
        );
        let start = StartLayout {
            head,
            length: start_length,
            direction: self.start_direction.unwrap_or(Direction::East),
        };
        let grid = Grid::new(tile_count);
        if let Some(&tile) = start.segments().iter().find(|&&t| !grid.in_bounds(t)) {
            return Err(ConfigError::StartOutOfBounds {
                x: tile.x,
                y: tile.y,
                tile_count,
            });
        }
        Ok(GameConfig {
            tile_count,
            fruit_count: self.fruit_count.unwrap_or(consts::DEFAULT_FRUIT_COUNT),
            move_period,
            render_period,
            pacing: self.pacing.unwrap_or_default(),
            lead_in,
            growth: self.growth.unwrap_or_default(),
            start,
        })
    }
}

/// Validated settings for a round, fixed for the lifetime of the round
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct GameConfig {
    pub(crate) tile_count: u16,
    pub(crate) fruit_count: usize,
    pub(crate) move_period: Duration,
    pub(crate) render_period: Duration,
    pub(crate) pacing: PacingMode,
    pub(crate) lead_in: f32,
    pub(crate) growth: GrowthMode,
    pub(crate) start: StartLayout,
}

impl Default for GameConfig {
    fn default() -> GameConfig {
        let tile_count = consts::DEFAULT_TILE_COUNT;
        GameConfig {
            tile_count,
            fruit_count: consts::DEFAULT_FRUIT_COUNT,
            move_period: consts::DEFAULT_MOVE_PERIOD,
            render_period: consts::DEFAULT_RENDER_PERIOD,
            pacing: PacingMode::default(),
            lead_in: consts::DEFAULT_LEAD_IN,
            growth: GrowthMode::default(),
            start: StartLayout {
                head: Tile::new(consts::START_HEAD_COLUMN, i32::from(tile_count / 2)),
                length: consts::INITIAL_SNAKE_LENGTH,
                direction: Direction::East,
            },
        }
    }
}

/// Where the snake starts each round: a straight line of `length` cells
/// trailing behind `head`, facing `direction`
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct StartLayout {
    pub(crate) head: Tile,
    pub(crate) length: u16,
    pub(crate) direction: Direction,
}

impl StartLayout {
    pub(crate) fn segments(&self) -> Vec<Tile> {
        let back = self.direction.reverse();
        std::iter::successors(Some(self.head), |&t| Some(t.step(back)))
            .take(usize::from(self.length))
            .collect()
    }
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to determine path to local configuration directory")]
    NoPath,
    #[error("failed to read configuration file")]
    Read(#[from] std::io::Error),
    #[error("failed to parse configuration file")]
    Parse(#[from] toml::de::Error),
    #[error("tile-count must be at least 1")]
    NoTiles,
    #[error("tile-count must be at most {max}; got {0}", max = consts::MAX_TILE_COUNT)]
    TooManyTiles(u16),
    #[error("{0} must be greater than zero")]
    ZeroPeriod(&'static str),
    #[error("lead-in must be between -1 and 0; got {0}")]
    LeadIn(f32),
    #[error("start-length must be at least 1")]
    EmptySnake,
    #[error("starting snake cell ({x}, {y}) is outside the {tile_count}x{tile_count} board")]
    StartOutOfBounds { x: i32, y: i32, tile_count: u16 },
}
