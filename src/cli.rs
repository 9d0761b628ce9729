use crate::config::Config;
use lexopt::{Arg, Parser, ValueExt};
use std::path::PathBuf;

pub(crate) const USAGE: &str = "\
Usage: tilesnake [OPTIONS]

Tile-based Snake in your terminal

Options:
  -c, --config PATH     Read configuration from PATH
      --tiles N         Board width and height in tiles
      --fruits N        Number of fruits on the board
      --move-ms N       Milliseconds between snake moves
      --render-ms N     Milliseconds between frames
      --pacing MODE     How moves are timed: \"timer\" or \"slither\"
      --growth MODE     How eaten fruits grow the snake: \"single\" or \"queued\"
      --log-file PATH   Write logs to PATH
  -h, --help            Show this help and exit
  -V, --version         Show the program version and exit
";

/// What the command line asked for
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Cli {
    Run(Arguments),
    Help,
    Version,
}

/// Arguments for playing a game
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct Arguments {
    /// An explicitly-given configuration file; must exist
    pub(crate) config_path: Option<PathBuf>,

    /// Settings given on the command line, which take precedence over the
    /// configuration file
    pub(crate) overrides: Config,
}

impl Cli {
    pub(crate) fn from_env() -> Result<Cli, lexopt::Error> {
        Cli::from_parser(Parser::from_env())
    }

    fn from_parser(mut parser: Parser) -> Result<Cli, lexopt::Error> {
        let mut args = Arguments::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Cli::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Cli::Version),
                Arg::Short('c') | Arg::Long("config") => {
                    args.config_path = Some(parser.value()?.into());
                }
                Arg::Long("tiles") => args.overrides.tile_count = Some(parser.value()?.parse()?),
                Arg::Long("fruits") => args.overrides.fruit_count = Some(parser.value()?.parse()?),
                Arg::Long("move-ms") => {
                    args.overrides.move_period_ms = Some(parser.value()?.parse()?);
                }
                Arg::Long("render-ms") => {
                    args.overrides.render_period_ms = Some(parser.value()?.parse()?);
                }
                Arg::Long("pacing") => args.overrides.pacing = Some(parser.value()?.parse()?),
                Arg::Long("growth") => args.overrides.growth = Some(parser.value()?.parse()?),
                Arg::Long("log-file") => args.overrides.log_file = Some(parser.value()?.into()),
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Cli::Run(args))
    }
}
