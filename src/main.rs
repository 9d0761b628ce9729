mod app;
mod cli;
mod clock;
mod command;
mod config;
mod consts;
mod game;
mod input;
mod scene;
mod terminal;
mod util;
use crate::app::App;
use crate::cli::{Arguments, Cli};
use crate::config::{Config, GameConfig};
use crate::game::Round;
use crate::input::TerminalInput;
use anyhow::Context;
use crossterm::event::{
    DisableFocusChange, EnableFocusChange, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use ratatui::DefaultTerminal;
use std::io::{self, ErrorKind};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Mutex;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = match Cli::from_env() {
        Ok(Cli::Run(args)) => args,
        Ok(Cli::Help) => {
            print!("{}", cli::USAGE);
            return ExitCode::SUCCESS;
        }
        Ok(Cli::Version) => {
            println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("tilesnake: {e}\n\n{}", cli::USAGE);
            return ExitCode::from(2);
        }
    };
    let config = match setup(args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("tilesnake: {e:#}");
            return ExitCode::from(2);
        }
    };
    let terminal = ratatui::init();
    let r = play(terminal, config);
    ratatui::restore();
    io_exit(r)
}

/// Load the configuration file, apply command-line overrides, start logging,
/// and validate the result
fn setup(args: Arguments) -> anyhow::Result<GameConfig> {
    let file_config = if let Some(path) = args.config_path {
        Config::load(&path, false)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?
    } else if let Ok(path) = Config::default_path() {
        Config::load(&path, true)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?
    } else {
        Config::default()
    };
    let config = file_config.merge(args.overrides);
    if let Some(path) = config.log_file.as_deref() {
        init_tracing(path)?;
    }
    let game_config = config.validate().context("invalid configuration")?;
    tracing::debug!(?game_config, "Configuration loaded");
    Ok(game_config)
}

fn init_tracing(path: &Path) -> anyhow::Result<()> {
    let file = fs_err::File::create(path).context("failed to open log file")?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
        .context("failed to install log subscriber")
}

/// Run the game on the terminal, asking for focus events and key releases
/// where the terminal supports them
fn play(mut terminal: DefaultTerminal, config: GameConfig) -> io::Result<()> {
    let mut stdout = io::stdout();
    execute!(stdout, EnableFocusChange)?;
    let enhanced = matches!(crossterm::terminal::supports_keyboard_enhancement(), Ok(true));
    if enhanced {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )?;
    }
    let r = App::new(Round::new(config), TerminalInput::new(), config.render_period)
        .run(&mut terminal);
    if enhanced {
        let _ = execute!(stdout, PopKeyboardEnhancementFlags);
    }
    let _ = execute!(stdout, DisableFocusChange);
    r
}

fn io_exit(r: io::Result<()>) -> ExitCode {
    match r {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.kind() == ErrorKind::BrokenPipe => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("tilesnake: {e}");
            ExitCode::from(2)
        }
    }
}
