//! Per-frame input snapshots and the terminal source that produces them
use crate::command::Command;
use crate::game::Direction;
use crossterm::event::{poll, read, Event, KeyEventKind};
use enum_map::EnumMap;
use std::collections::VecDeque;
use std::io;
use std::time::Duration;

/// A discrete, edge-triggered request from the player
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum InputEvent {
    TogglePause,
    /// Pause if running; sent when the terminal loses focus
    Pause,
    Restart,
    Quit,
}

/// Everything the player did since the previous frame
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct InputFrame {
    /// Which direction keys are down
    pub(crate) held: EnumMap<Direction, bool>,

    /// Discrete events, oldest first
    pub(crate) events: VecDeque<InputEvent>,
}

impl InputFrame {
    /// Fold a terminal event into the frame
    pub(crate) fn record(&mut self, event: &Event) {
        match event {
            Event::FocusLost => self.events.push_back(InputEvent::Pause),
            Event::Key(key) => {
                let Some(cmd) = Command::from_key_event(*key) else {
                    return;
                };
                if let Some(d) = cmd.direction() {
                    self.held[d] = key.kind != KeyEventKind::Release;
                } else if key.kind == KeyEventKind::Press {
                    self.events.push_back(match cmd {
                        Command::Esc => InputEvent::TogglePause,
                        Command::R => InputEvent::Restart,
                        _ => InputEvent::Quit,
                    });
                }
            }
            _ => (),
        }
    }
}

/// Something that can be asked, once per frame, what the player is doing
pub(crate) trait InputSource {
    /// Collect the input that has arrived since the last call.  Must not
    /// block.
    fn sample(&mut self) -> io::Result<InputFrame>;
}

/// Input read from the terminal via crossterm.
///
/// Most terminals only report key presses, in which case a direction key
/// counts as held for the frame in which its press (or auto-repeat) arrives.
/// Once the terminal has been seen to report key releases, direction keys
/// stay held from press until release.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct TerminalInput {
    held: EnumMap<Direction, bool>,
    reports_releases: bool,
}

impl TerminalInput {
    pub(crate) fn new() -> TerminalInput {
        TerminalInput::default()
    }

    fn absorb<I: IntoIterator<Item = Event>>(&mut self, events: I) -> InputFrame {
        let mut frame = InputFrame {
            held: if self.reports_releases {
                self.held
            } else {
                EnumMap::default()
            },
            events: VecDeque::new(),
        };
        for event in events {
            if matches!(event, Event::Key(key) if key.kind == KeyEventKind::Release) {
                self.reports_releases = true;
            }
            frame.record(&event);
        }
        self.held = frame.held;
        frame
    }
}

impl InputSource for TerminalInput {
    fn sample(&mut self) -> io::Result<InputFrame> {
        let mut events = Vec::new();
        while poll(Duration::ZERO)? {
            events.push(read()?);
        }
        Ok(self.absorb(events))
    }
}
