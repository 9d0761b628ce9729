use super::grid::Tile;
use crate::consts;

/// A piece of food waiting to be eaten
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Fruit {
    pub(crate) tile: Tile,
    pub(crate) pulse: Pulse,
}

impl Fruit {
    pub(crate) fn new(tile: Tile, pulse: Pulse) -> Fruit {
        Fruit { tile, pulse }
    }
}

/// Cosmetic throbbing of a fruit's size.  Has no bearing on where the fruit
/// is or whether it can be eaten.
///
/// The phase runs from 0 to 2 and wraps: 0 to 1 is the swell, 1 to 2 the
/// shrink.  Size follows a quadratic ease so that it lingers near both
/// extremes.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct Pulse {
    phase: f32,
}

impl Pulse {
    pub(crate) fn new(phase: f32) -> Pulse {
        Pulse {
            phase: phase.rem_euclid(2.0),
        }
    }

    /// The `n`th fruit's starting pulse, staggered so that fruits don't all
    /// throb in unison
    pub(crate) fn staggered(n: usize) -> Pulse {
        let n = u16::try_from(n % 64).unwrap_or_default();
        Pulse::new(f32::from(n) * consts::PULSE_STAGGER)
    }

    /// Advance the animation by one render tick
    pub(crate) fn step(&mut self) {
        self.phase = (self.phase + consts::PULSE_STEP).rem_euclid(2.0);
    }

    /// Current size as a fraction of a tile, between
    /// [`PULSE_MIN`][consts::PULSE_MIN] and [`PULSE_MAX`][consts::PULSE_MAX]
    pub(crate) fn ratio(self) -> f32 {
        let t = if self.phase < 1.0 {
            self.phase
        } else {
            2.0 - self.phase
        };
        let eased = if t < 0.5 {
            2.0 * t * t
        } else {
            (-2.0 * (1.0 - t)).mul_add(1.0 - t, 1.0)
        };
        (consts::PULSE_MAX - consts::PULSE_MIN).mul_add(eased, consts::PULSE_MIN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn extremes() {
        assert!(close(Pulse::new(0.0).ratio(), consts::PULSE_MIN));
        assert!(close(Pulse::new(1.0).ratio(), consts::PULSE_MAX));
        assert!(close(Pulse::new(2.0).ratio(), consts::PULSE_MIN));
        let mid = 0.5 * (consts::PULSE_MIN + consts::PULSE_MAX);
        assert!(close(Pulse::new(0.5).ratio(), mid));
        assert!(close(Pulse::new(1.5).ratio(), mid));
    }

    #[test]
    fn stays_in_bounds_while_animating() {
        let mut pulse = Pulse::staggered(3);
        for _ in 0..1000 {
            pulse.step();
            let r = pulse.ratio();
            assert!(
                (consts::PULSE_MIN - 1e-5..=consts::PULSE_MAX + 1e-5).contains(&r),
                "ratio {r} out of bounds"
            );
        }
    }

    #[test]
    fn eases_slowly_near_extremes() {
        let near_min = Pulse::new(0.1).ratio() - Pulse::new(0.0).ratio();
        let mid = Pulse::new(0.5).ratio() - Pulse::new(0.4).ratio();
        assert!(near_min < mid, "{near_min} should be smaller than {mid}");
    }
}
