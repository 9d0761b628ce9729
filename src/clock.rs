//! Timing for the game loop: fixed-period cadences and the pacing of the
//! snake's discrete moves
use crate::consts;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};
use thiserror::Error;

/// A periodic trigger, polled rather than waited on.  The first period
/// starts the first time the cadence is polled.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Cadence {
    period: Duration,
    next: Option<Instant>,
}

impl Cadence {
    pub(crate) fn new(period: Duration) -> Cadence {
        Cadence { period, next: None }
    }

    /// Returns `true` if a period has elapsed as of `now`, in which case the
    /// next period is scheduled.  If more than one period has been missed,
    /// the missed firings are dropped rather than delivered in a burst.
    pub(crate) fn fire(&mut self, now: Instant) -> bool {
        let next = *self.next.get_or_insert(now + self.period);
        if now < next {
            return false;
        }
        let after = next + self.period;
        self.next = Some(if now < after { after } else { now + self.period });
        true
    }

    /// Start a fresh period at `now`
    pub(crate) fn restart(&mut self, now: Instant) {
        self.next = Some(now + self.period);
    }

    /// Fraction of the current period that has elapsed, from 0 to 1
    pub(crate) fn progress(&self, now: Instant) -> f32 {
        let Some(next) = self.next else {
            return 0.0;
        };
        if self.period.is_zero() {
            return 1.0;
        }
        let remaining = next.saturating_duration_since(now);
        (1.0 - remaining.as_secs_f32() / self.period.as_secs_f32()).clamp(0.0, 1.0)
    }

    /// How long to wait from `now` until the end of the current period.
    /// The following period is scheduled as a side effect, so calling this
    /// once per loop iteration paces the loop to one iteration per period.
    pub(crate) fn wait(&mut self, now: Instant) -> Duration {
        let deadline = *self.next.get_or_insert(now);
        let wait = deadline.saturating_duration_since(now);
        self.next = Some(deadline.max(now) + self.period);
        wait
    }
}

/// How the snake's discrete moves are timed
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum PacingMode {
    /// Moves happen on a wall-clock timer; the motion offset is the elapsed
    /// fraction of the move period.
    #[default]
    Timer,
    /// The motion offset grows by a fixed step every frame, and a move
    /// happens when it crosses the threshold.
    Slither,
}

impl fmt::Display for PacingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            PacingMode::Timer => "timer",
            PacingMode::Slither => "slither",
        })
    }
}

impl FromStr for PacingMode {
    type Err = ParsePacingModeError;

    fn from_str(s: &str) -> Result<PacingMode, ParsePacingModeError> {
        match s {
            "timer" => Ok(PacingMode::Timer),
            "slither" => Ok(PacingMode::Slither),
            _ => Err(ParsePacingModeError),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
#[error(r#"invalid pacing mode; expected "timer" or "slither""#)]
pub(crate) struct ParsePacingModeError;

/// Decides when the snake makes its next discrete move and how far along
/// it is toward that move
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Pacer {
    Timer {
        cadence: Cadence,
        lead_in: f32,
    },
    Slither {
        offset: f32,
        step: f32,
        lead_in: f32,
    },
}

impl Pacer {
    /// `lead_in` is the motion offset right after a move; it should be zero
    /// or slightly negative.  Under slither pacing the per-frame step is
    /// chosen so that moves nominally come every `move_period`.
    pub(crate) fn new(
        mode: PacingMode,
        move_period: Duration,
        render_period: Duration,
        lead_in: f32,
    ) -> Pacer {
        match mode {
            PacingMode::Timer => Pacer::Timer {
                cadence: Cadence::new(move_period),
                lead_in,
            },
            PacingMode::Slither => {
                let frames = move_period.as_secs_f32() / render_period.as_secs_f32();
                let step = if frames.is_finite() && frames > 0.0 {
                    (consts::MOTION_THRESHOLD - lead_in) / frames
                } else {
                    consts::MOTION_THRESHOLD - lead_in
                };
                Pacer::Slither {
                    offset: lead_in,
                    step,
                    lead_in,
                }
            }
        }
    }

    /// Called once per frame.  Returns `true` if a discrete move is due.
    pub(crate) fn tick(&mut self, now: Instant) -> bool {
        match self {
            Pacer::Timer { cadence, .. } => cadence.fire(now),
            Pacer::Slither {
                offset,
                step,
                lead_in,
            } => {
                *offset += *step;
                if *offset >= consts::MOTION_THRESHOLD {
                    *offset = *lead_in;
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Sub-tile progress toward the next move
    pub(crate) fn offset(&self, now: Instant) -> f32 {
        match *self {
            Pacer::Timer { cadence, lead_in } => {
                (consts::MOTION_THRESHOLD - lead_in).mul_add(cadence.progress(now), lead_in)
            }
            Pacer::Slither { offset, .. } => offset,
        }
    }

    /// Start over from the beginning of a move, as when resuming play
    pub(crate) fn reset(&mut self, now: Instant) {
        match self {
            Pacer::Timer { cadence, .. } => cadence.restart(now),
            Pacer::Slither {
                offset, lead_in, ..
            } => *offset = *lead_in,
        }
    }
}
