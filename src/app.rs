use crate::clock::Cadence;
use crate::game::{Flow, Round};
use crate::input::InputSource;
use rand::Rng;
use ratatui::{backend::Backend, Terminal};
use std::io;
use std::time::{Duration, Instant};
use tracing::debug;

/// The game loop: owns the round and the input source and runs one frame
/// per render period until the player quits
#[derive(Clone, Debug)]
pub(crate) struct App<I, R = rand::rngs::ThreadRng> {
    round: Round<R>,
    input: I,
    frames: Cadence,
    running: bool,
}

impl<I: InputSource, R: Rng> App<I, R> {
    pub(crate) fn new(round: Round<R>, input: I, render_period: Duration) -> App<I, R> {
        App {
            round,
            input,
            frames: Cadence::new(render_period),
            running: true,
        }
    }

    pub(crate) fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        while self.running {
            self.frame(terminal)?;
        }
        Ok(())
    }

    /// Sample input, apply it, let any due move happen, draw, check for a
    /// win, and then sleep off the rest of the frame
    fn frame<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        let now = Instant::now();
        let input = self.input.sample()?;
        if self.round.apply_input(&input, now) == Flow::Quit {
            self.running = false;
            return Ok(());
        }
        if let Some(outcome) = self.round.update(now) {
            debug!(?outcome, "Movement tick");
        }
        terminal.draw(|frame| frame.render_widget(&self.round, frame.area()))?;
        let _ = self.round.check_win();
        let wait = self.frames.wait(Instant::now());
        if !wait.is_zero() {
            std::thread::sleep(wait);
        }
        Ok(())
    }
}
