mod direction;
mod fruit;
mod grid;
mod shape;
mod snake;
mod spawn;
pub(crate) use self::direction::{Axis, Direction};
pub(crate) use self::fruit::Fruit;
pub(crate) use self::grid::{Grid, Tile};
pub(crate) use self::shape::{Corner, SegmentShape};
pub(crate) use self::snake::{GrowthMode, Snake};
use self::fruit::Pulse;
use self::spawn::{allocate, spawn, Placement};
use crate::clock::Pacer;
use crate::config::GameConfig;
use crate::input::{InputEvent, InputFrame};
use rand::Rng;
use std::fmt;
use std::time::Instant;
use tracing::{debug, info};

/// Order in which held direction keys are considered when more than one is
/// down
const STEERING_PRIORITY: [Direction; 4] = [
    Direction::North,
    Direction::West,
    Direction::South,
    Direction::East,
];

/// A round of play: the snake, the fruits, the score, and the state machine
/// that moves between running, paused, and won
#[derive(Clone, Debug)]
pub(crate) struct Round<R = rand::rngs::ThreadRng> {
    rng: R,
    config: GameConfig,
    grid: Grid,
    snake: Snake,
    fruits: Vec<Fruit>,
    score: u32,
    state: RoundState,
    pacer: Pacer,

    /// Number of times the snake has died since the round began
    losses: u32,

    /// Number of fruits eaten since the round began, across deaths
    fruits_eaten: u32,

    /// Why the snake last died, if the round has been paused by a death and
    /// not yet resumed
    last_loss: Option<LossCause>,
}

impl Round<rand::rngs::ThreadRng> {
    pub(crate) fn new(config: GameConfig) -> Self {
        Round::new_with_rng(config, rand::rng())
    }
}

impl<R: Rng> Round<R> {
    pub(crate) fn new_with_rng(config: GameConfig, rng: R) -> Round<R> {
        let mut round = Round {
            rng,
            config,
            grid: Grid::new(config.tile_count),
            snake: starting_snake(&config),
            fruits: Vec::with_capacity(config.fruit_count),
            score: 0,
            state: RoundState::Running,
            pacer: Pacer::new(
                config.pacing,
                config.move_period,
                config.render_period,
                config.lead_in,
            ),
            losses: 0,
            fruits_eaten: 0,
            last_loss: None,
        };
        round.place_fruits();
        info!(
            tile_count = config.tile_count,
            fruits = round.fruits.len(),
            pacing = %config.pacing,
            growth = %config.growth,
            "Starting new round"
        );
        round
    }

    /// Apply one frame's worth of input.  Discrete events are handled in the
    /// order they arrived, and then the held direction keys steer the snake.
    /// Steering only takes effect at the next move.
    pub(crate) fn apply_input(&mut self, frame: &InputFrame, now: Instant) -> Flow {
        for &event in &frame.events {
            match event {
                InputEvent::TogglePause => self.toggle_pause(now),
                InputEvent::Pause => self.pause(),
                InputEvent::Restart => self.restart(),
                InputEvent::Quit => {
                    info!(score = self.score, losses = self.losses, "Quitting");
                    return Flow::Quit;
                }
            }
        }
        if self.state == RoundState::Running {
            let axis = self.snake.direction().axis();
            if let Some(&d) = STEERING_PRIORITY
                .iter()
                .find(|&&d| frame.held[d] && d.axis() != axis)
            {
                let _ = self.snake.set_pending_direction(d);
            }
        }
        Flow::Continue
    }

    /// Advance everything that moves with the frame rate: fruit pulses, the
    /// snake's motion offset, and, when the pacer says one is due, a discrete
    /// move
    pub(crate) fn update(&mut self, now: Instant) -> Option<TickOutcome> {
        for fruit in &mut self.fruits {
            fruit.pulse.step();
        }
        if self.state != RoundState::Running {
            return None;
        }
        let outcome = self.pacer.tick(now).then(|| self.movement_tick());
        if self.state == RoundState::Running {
            self.snake.set_motion_offset(self.pacer.offset(now));
        } else {
            self.snake.set_motion_offset(0.0);
        }
        outcome
    }

    /// Move the snake one cell, then let it eat, then decide whether it
    /// died.  Eating is applied first because growth changes which cells are
    /// occupied.
    pub(crate) fn movement_tick(&mut self) -> TickOutcome {
        if self.state != RoundState::Running {
            return TickOutcome::Skipped;
        }
        self.snake.advance();
        let head = self.snake.head();
        let mut ate = false;
        if let Some(i) = self.fruits.iter().position(|f| f.tile == head) {
            self.score += 1;
            self.fruits_eaten += 1;
            let placement = spawn(self.grid, &self.snake, &mut self.fruits, i, &mut self.rng);
            self.snake.mark_growth();
            if let Placement::Placed(tile) = placement {
                debug!(x = tile.x, y = tile.y, "Fruit respawned");
            }
            info!(score = self.score, length = self.snake.len(), "Fruit eaten");
            ate = true;
        }
        let cause = if !self.grid.in_bounds(head) {
            Some(LossCause::OutOfBounds)
        } else if self.snake.colliding() {
            Some(LossCause::SelfCollision)
        } else {
            None
        };
        if let Some(cause) = cause {
            self.lose(cause);
            TickOutcome::Lost(cause)
        } else if ate {
            TickOutcome::Ate
        } else {
            TickOutcome::Moved
        }
    }

    /// Returns `true` the first time the round is seen to have no fruits
    /// left, at which point the round is won
    pub(crate) fn check_win(&mut self) -> bool {
        if self.state != RoundState::Won && self.fruits.is_empty() {
            self.state = RoundState::Won;
            info!(
                score = self.score,
                length = self.snake.len(),
                "All fruits eaten; round won"
            );
            true
        } else {
            false
        }
    }

    /// Throw away the current round and start a fresh one with the same
    /// configuration
    pub(crate) fn restart(&mut self) {
        info!(score = self.score, losses = self.losses, "Restarting round");
        self.snake = starting_snake(&self.config);
        self.fruits.clear();
        self.place_fruits();
        self.score = 0;
        self.state = RoundState::Running;
        self.pacer = Pacer::new(
            self.config.pacing,
            self.config.move_period,
            self.config.render_period,
            self.config.lead_in,
        );
        self.losses = 0;
        self.fruits_eaten = 0;
        self.last_loss = None;
    }

    fn lose(&mut self, cause: LossCause) {
        self.losses += 1;
        info!(
            %cause,
            score = self.score,
            length = self.snake.len(),
            losses = self.losses,
            "Snake died; resetting"
        );
        self.snake = starting_snake(&self.config);
        // Fruits under the fresh snake are moved off it.
        for i in (0..self.fruits.len()).rev() {
            if self.snake.segments().contains(&self.fruits[i].tile) {
                let _ = spawn(self.grid, &self.snake, &mut self.fruits, i, &mut self.rng);
            }
        }
        self.score = 0;
        self.state = RoundState::Paused;
        self.last_loss = Some(cause);
    }

    /// Put `config.fruit_count` fruits on the board, stopping early if the
    /// board fills up
    fn place_fruits(&mut self) {
        for i in 0..self.config.fruit_count {
            let Some(tile) = allocate(self.grid, &self.snake, &self.fruits, None, &mut self.rng)
            else {
                info!(
                    placed = i,
                    requested = self.config.fruit_count,
                    "No room for more fruits"
                );
                break;
            };
            self.fruits.push(Fruit::new(tile, Pulse::staggered(i)));
        }
    }
}

impl<R> Round<R> {
    pub(crate) fn grid(&self) -> Grid {
        self.grid
    }

    pub(crate) fn snake(&self) -> &Snake {
        &self.snake
    }

    pub(crate) fn fruits(&self) -> &[Fruit] {
        &self.fruits
    }

    pub(crate) fn score(&self) -> u32 {
        self.score
    }

    pub(crate) fn state(&self) -> RoundState {
        self.state
    }

    pub(crate) fn losses(&self) -> u32 {
        self.losses
    }

    pub(crate) fn fruits_eaten(&self) -> u32 {
        self.fruits_eaten
    }

    pub(crate) fn last_loss(&self) -> Option<LossCause> {
        self.last_loss
    }

    /// Switch between running and paused.  Has no effect once the round is
    /// won.
    pub(crate) fn toggle_pause(&mut self, now: Instant) {
        match self.state {
            RoundState::Running => self.pause(),
            RoundState::Paused => {
                info!("Resuming");
                self.state = RoundState::Running;
                self.last_loss = None;
                self.pacer.reset(now);
                self.snake.set_motion_offset(self.pacer.offset(now));
            }
            RoundState::Won => (),
        }
    }

    pub(crate) fn pause(&mut self) {
        if self.state == RoundState::Running {
            info!("Pausing");
            self.state = RoundState::Paused;
        }
    }

}

#[cfg(test)]
impl<R> Round<R> {
    /// Replace the fruits with fresh ones at `tiles`
    pub(crate) fn with_fruits_at(mut self, tiles: &[Tile]) -> Self {
        self.fruits = tiles
            .iter()
            .enumerate()
            .map(|(i, &t)| Fruit::new(t, Pulse::staggered(i)))
            .collect();
        self
    }
}

fn starting_snake(config: &GameConfig) -> Snake {
    Snake::new(
        &config.start.segments(),
        config.start.direction,
        config.growth,
    )
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum RoundState {
    Running,
    Paused,
    /// Every fruit has been eaten or removed for lack of room
    Won,
}

/// Whether the game loop should keep going
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Flow {
    Continue,
    Quit,
}

/// The result of a movement tick
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum TickOutcome {
    /// The round wasn't running, so nothing moved
    Skipped,
    Moved,
    Ate,
    Lost(LossCause),
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum LossCause {
    OutOfBounds,
    SelfCollision,
}

impl fmt::Display for LossCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            LossCause::OutOfBounds => "hit the wall",
            LossCause::SelfCollision => "ran into itself",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::PacingMode;
    use crate::config::StartLayout;
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use std::time::Duration;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    fn config(tile_count: u16, fruit_count: usize) -> GameConfig {
        GameConfig {
            tile_count,
            fruit_count,
            start: StartLayout {
                head: Tile::new(3, i32::from(tile_count / 2)),
                length: 3,
                direction: Direction::East,
            },
            ..GameConfig::default()
        }
    }

    fn round(config: GameConfig) -> Round<ChaCha12Rng> {
        Round::new_with_rng(config, ChaCha12Rng::seed_from_u64(RNG_SEED))
    }

    fn cells(snake: &Snake) -> Vec<(i32, i32)> {
        snake.segments().iter().map(|t| (t.x, t.y)).collect()
    }

    fn held(dirs: &[Direction]) -> InputFrame {
        let mut frame = InputFrame::default();
        for &d in dirs {
            frame.held[d] = true;
        }
        frame
    }

    fn event(ev: InputEvent) -> InputFrame {
        let mut frame = InputFrame::default();
        frame.events.push_back(ev);
        frame
    }

    #[test]
    fn new_round() {
        let r = round(config(17, 10));
        assert_eq!(r.state(), RoundState::Running);
        assert_eq!(r.score(), 0);
        assert_eq!(cells(r.snake()), [(3, 8), (2, 8), (1, 8)]);
        assert_eq!(r.fruits().len(), 10);
        for (i, f) in r.fruits().iter().enumerate() {
            assert!(r.grid().in_bounds(f.tile));
            assert!(!r.snake().segments().contains(&f.tile));
            assert!(r.fruits()[..i].iter().all(|g| g.tile != f.tile));
        }
    }

    #[test]
    fn more_fruits_than_room() {
        let r = round(config(4, 100));
        assert_eq!(r.fruits().len(), 16 - 3);
    }

    #[test]
    fn second_advance_leaves_small_board() {
        let mut r = round(config(5, 0));
        assert_eq!(r.movement_tick(), TickOutcome::Moved);
        assert_eq!(r.snake().head(), Tile::new(4, 2));
        assert_eq!(
            r.movement_tick(),
            TickOutcome::Lost(LossCause::OutOfBounds)
        );
        assert_eq!(cells(r.snake()), [(3, 2), (2, 2), (1, 2)]);
        assert_eq!(r.snake().direction(), Direction::East);
        assert_eq!(r.state(), RoundState::Paused);
        assert_eq!(r.losses(), 1);
        assert_eq!(r.last_loss(), Some(LossCause::OutOfBounds));
    }

    #[test]
    fn eat_single_fruit() {
        let cfg = GameConfig {
            start: StartLayout {
                head: Tile::new(1, 2),
                length: 2,
                direction: Direction::East,
            },
            ..config(5, 1)
        };
        let mut r = round(cfg).with_fruits_at(&[Tile::new(2, 2)]);
        assert_eq!(r.movement_tick(), TickOutcome::Ate);
        assert_eq!(r.score(), 1);
        assert_eq!(r.fruits_eaten(), 1);
        assert_eq!(r.fruits().len(), 1);
        let tile = r.fruits()[0].tile;
        assert_ne!(tile, Tile::new(2, 2));
        assert!(!r.snake().segments().contains(&tile));
        assert_eq!(r.snake().len(), 2);
        assert!(r.snake().growth_pending());
        let outcome = r.movement_tick();
        assert!(matches!(outcome, TickOutcome::Moved | TickOutcome::Ate));
        assert_eq!(r.snake().len(), 3);
    }

    #[test]
    fn loss_resets_snake_and_score() {
        let mut r = round(config(5, 0));
        r.score = 4;
        r.snake = Snake::new(
            &[
                Tile::new(2, 1),
                Tile::new(2, 2),
                Tile::new(3, 2),
                Tile::new(3, 1),
                Tile::new(3, 0),
            ],
            Direction::North,
            GrowthMode::Single,
        );
        assert!(r.snake.set_pending_direction(Direction::East));
        assert_eq!(
            r.movement_tick(),
            TickOutcome::Lost(LossCause::SelfCollision)
        );
        assert_eq!(r.score(), 0);
        assert_eq!(cells(r.snake()), [(3, 2), (2, 2), (1, 2)]);
        assert_eq!(r.state(), RoundState::Paused);
    }

    #[test]
    fn fruits_survive_a_loss() {
        let mut r = round(config(5, 0)).with_fruits_at(&[Tile::new(0, 0)]);
        let _ = r.movement_tick();
        let _ = r.movement_tick();
        assert_eq!(r.losses(), 1);
        assert_eq!(r.fruits().len(), 1);
        assert_eq!(r.fruits()[0].tile, Tile::new(0, 0));
    }

    #[test]
    fn loss_moves_fruits_off_fresh_snake() {
        let mut r = round(config(5, 0)).with_fruits_at(&[Tile::new(0, 0), Tile::new(2, 2)]);
        r.snake = Snake::new(
            &[Tile::new(4, 4), Tile::new(3, 4), Tile::new(2, 4)],
            Direction::East,
            GrowthMode::Single,
        );
        assert_eq!(
            r.movement_tick(),
            TickOutcome::Lost(LossCause::OutOfBounds)
        );
        assert_eq!(cells(r.snake()), [(3, 2), (2, 2), (1, 2)]);
        assert_eq!(r.fruits().len(), 2);
        assert_eq!(r.fruits()[0].tile, Tile::new(0, 0));
        let moved = r.fruits()[1].tile;
        assert!(!r.snake().segments().contains(&moved));
        assert_ne!(moved, Tile::new(0, 0));
        assert!(r.grid().in_bounds(moved));
    }

    #[test]
    fn win_reported_once() {
        let mut r = round(config(5, 0));
        assert!(r.check_win());
        assert_eq!(r.state(), RoundState::Won);
        assert!(!r.check_win());
        assert_eq!(r.movement_tick(), TickOutcome::Skipped);
        r.toggle_pause(Instant::now());
        assert_eq!(r.state(), RoundState::Won);
        assert!(!r.check_win());
    }

    #[test]
    fn filling_the_board_removes_last_fruit() {
        let mut r = round(config(2, 0)).with_fruits_at(&[Tile::new(1, 1)]);
        r.snake = Snake::new(
            &[Tile::new(0, 1), Tile::new(0, 0), Tile::new(1, 0)],
            Direction::South,
            GrowthMode::Single,
        );
        r.snake.mark_growth();
        assert!(r.snake.set_pending_direction(Direction::East));
        assert!(!r.check_win());
        assert_eq!(r.movement_tick(), TickOutcome::Ate);
        assert_eq!(r.snake().len(), 4);
        assert!(r.fruits().is_empty());
        assert!(r.check_win());
    }

    #[test]
    fn paused_round_does_not_move() {
        let t0 = Instant::now();
        let mut r = round(config(9, 3));
        r.toggle_pause(t0);
        assert_eq!(r.state(), RoundState::Paused);
        let before = r.snake().clone();
        assert_eq!(r.movement_tick(), TickOutcome::Skipped);
        assert_eq!(r.update(t0 + Duration::from_secs(10)), None);
        assert_eq!(r.snake(), &before);
        r.toggle_pause(t0);
        assert_eq!(r.state(), RoundState::Running);
    }

    #[test]
    fn resume_clears_loss() {
        let t0 = Instant::now();
        let mut r = round(config(5, 0));
        let _ = r.movement_tick();
        let _ = r.movement_tick();
        assert!(r.last_loss().is_some());
        r.toggle_pause(t0);
        assert_eq!(r.state(), RoundState::Running);
        assert_eq!(r.last_loss(), None);
    }

    #[test]
    fn timer_pacing_moves_once_per_period() {
        let t0 = Instant::now();
        let cfg = GameConfig {
            move_period: Duration::from_millis(100),
            pacing: PacingMode::Timer,
            ..config(17, 0)
        };
        let mut r = round(cfg);
        assert_eq!(r.update(t0), None);
        assert_eq!(r.update(t0 + Duration::from_millis(50)), None);
        assert!(r.snake().motion_offset() > 0.4);
        assert_eq!(
            r.update(t0 + Duration::from_millis(100)),
            Some(TickOutcome::Moved)
        );
        assert_eq!(r.snake().head(), Tile::new(4, 8));
    }

    #[test]
    fn slither_pacing_moves_on_threshold() {
        let t0 = Instant::now();
        let cfg = GameConfig {
            move_period: Duration::from_millis(1000),
            render_period: Duration::from_millis(250),
            pacing: PacingMode::Slither,
            ..config(17, 0)
        };
        let mut r = round(cfg);
        let outcomes = (0..8).filter_map(|_| r.update(t0)).collect::<Vec<_>>();
        assert_eq!(outcomes, [TickOutcome::Moved, TickOutcome::Moved]);
        assert_eq!(r.snake().head(), Tile::new(5, 8));
    }

    #[test]
    fn steer_perpendicular_only() {
        let t0 = Instant::now();
        let mut r = round(config(9, 0));
        assert_eq!(r.apply_input(&held(&[Direction::West]), t0), Flow::Continue);
        assert_eq!(r.snake().pending_direction(), Direction::East);
        let _ = r.apply_input(&held(&[Direction::East, Direction::South]), t0);
        assert_eq!(r.snake().pending_direction(), Direction::South);
        let _ = r.apply_input(&held(&[Direction::South, Direction::North]), t0);
        assert_eq!(r.snake().pending_direction(), Direction::North);
    }

    #[test]
    fn steering_waits_for_next_move() {
        let t0 = Instant::now();
        let mut r = round(config(9, 0));
        let _ = r.apply_input(&held(&[Direction::North]), t0);
        assert_eq!(r.snake().direction(), Direction::East);
        assert_eq!(r.movement_tick(), TickOutcome::Moved);
        assert_eq!(r.snake().direction(), Direction::North);
        assert_eq!(r.snake().head(), Tile::new(3, 3));
    }

    #[test]
    fn no_steering_while_paused() {
        let t0 = Instant::now();
        let mut r = round(config(9, 0));
        r.pause();
        let _ = r.apply_input(&held(&[Direction::North]), t0);
        assert_eq!(r.snake().pending_direction(), Direction::East);
    }

    #[test]
    fn events() {
        let t0 = Instant::now();
        let mut r = round(config(9, 2));
        assert_eq!(r.apply_input(&event(InputEvent::TogglePause), t0), Flow::Continue);
        assert_eq!(r.state(), RoundState::Paused);
        assert_eq!(r.apply_input(&event(InputEvent::TogglePause), t0), Flow::Continue);
        assert_eq!(r.state(), RoundState::Running);
        let _ = r.apply_input(&event(InputEvent::Pause), t0);
        let _ = r.apply_input(&event(InputEvent::Pause), t0);
        assert_eq!(r.state(), RoundState::Paused);
        assert_eq!(r.apply_input(&event(InputEvent::Quit), t0), Flow::Quit);
    }

    #[test]
    fn restart_builds_fresh_round() {
        let t0 = Instant::now();
        let mut r = round(config(5, 3));
        let _ = r.movement_tick();
        let _ = r.movement_tick();
        r.score = 7;
        r.fruits.clear();
        assert!(r.check_win());
        let _ = r.apply_input(&event(InputEvent::Restart), t0);
        assert_eq!(r.state(), RoundState::Running);
        assert_eq!(r.score(), 0);
        assert_eq!(r.losses(), 0);
        assert_eq!(r.fruits().len(), 3);
        assert_eq!(cells(r.snake()), [(3, 2), (2, 2), (1, 2)]);
    }
}
