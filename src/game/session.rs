use super::actor::Actor;
use super::direction::{Direction, InvalidDirection};
use super::grid::{Cell, Grid};
use super::placement::{place_target, PlacementError};
use super::sequence::{Requirement, SequenceTracker};
use crate::consts;
use rand::Rng;
use std::num::NonZeroU32;

/// The fixed parameters of a game
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Rules {
    /// The letters to collect, in order
    pub(crate) sequence: Vec<char>,

    /// Ticks per second for a zero-length snake
    pub(crate) base_speed: NonZeroU32,

    /// The speed goes up by one for every this many segments
    pub(crate) length_divisor: NonZeroU32,

    /// The direction in which a new snake starts moving
    pub(crate) start_direction: Direction,
}

impl Default for Rules {
    fn default() -> Rules {
        Rules {
            sequence: consts::DEFAULT_SEQUENCE.chars().collect(),
            base_speed: consts::BASE_SPEED,
            length_divisor: consts::LENGTH_DIVISOR,
            start_direction: Direction::Right,
        }
    }
}

/// Ticks per second for a snake of the given length: the base speed plus one
/// for every `length_divisor` segments
pub(crate) fn speed_for_length(len: usize, rules: &Rules) -> NonZeroU32 {
    let len = u32::try_from(len).unwrap_or(u32::MAX);
    rules
        .base_speed
        .saturating_add(len / rules.length_divisor.get())
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum SessionState {
    Running,
    Ended(Outcome),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Outcome {
    /// The bonus star was eaten after every letter
    Won,

    /// The snake ran into itself
    Lost,
}

/// What happened during a call to [`Session::tick()`]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum TickEvent {
    /// The game had already ended; nothing changed
    Idle,
    Moved,
    Collected(char),
    Won,
    Lost,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum TargetKind {
    Symbol(char),
    Bonus,
}

/// The item currently waiting to be eaten
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Target {
    pub(crate) cell: Cell,
    pub(crate) kind: TargetKind,
}

/// All mutable state for one game, plus the tick logic that advances it.
///
/// Nothing here knows about time; the caller decides when to call
/// [`Session::tick()`], normally once every `1 / speed()` seconds.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Session<R> {
    rng: R,
    grid: Grid,
    rules: Rules,
    pub(super) actor: Actor,
    pub(super) tracker: SequenceTracker,
    pub(super) target: Cell,
    pub(super) direction: Direction,
    pending: Option<Direction>,
    state: SessionState,
    speed: NonZeroU32,
}

impl<R: Rng> Session<R> {
    pub(crate) fn new(grid: Grid, rules: Rules, mut rng: R) -> Result<Session<R>, PlacementError> {
        let actor = Actor::new(grid.center());
        let target = place_target(&mut rng, grid, &actor)?;
        log::info!(
            "New {}×{} game; collect {:?}",
            grid.cols,
            grid.rows,
            rules.sequence.iter().collect::<String>()
        );
        Ok(Session {
            rng,
            grid,
            tracker: SequenceTracker::new(rules.sequence.iter().copied()),
            direction: rules.start_direction,
            speed: rules.base_speed,
            rules,
            actor,
            target,
            pending: None,
            state: SessionState::Running,
        })
    }

    /// Put everything back the way it was at the start of the game
    pub(crate) fn reset(&mut self) -> Result<(), PlacementError> {
        let actor = Actor::new(self.grid.center());
        self.target = place_target(&mut self.rng, self.grid, &actor)?;
        self.actor = actor;
        self.tracker.reset();
        self.direction = self.rules.start_direction;
        self.pending = None;
        self.speed = self.rules.base_speed;
        self.state = SessionState::Running;
        log::info!("Game reset");
        Ok(())
    }

    /// Advance the game by one step.
    ///
    /// Does nothing once the game has ended.  Fails only if the snake has
    /// filled the board so that no new target can be placed.
    pub(crate) fn tick(&mut self) -> Result<TickEvent, PlacementError> {
        if self.state != SessionState::Running {
            return Ok(TickEvent::Idle);
        }
        // A reversal is dropped rather than kept for a later tick.
        if let Some(d) = self.pending.take() {
            if d != self.direction.opposite() {
                self.direction = d;
            }
        }
        let head = self.actor.propose_head(self.direction, self.grid);
        if self.actor.collides(head) {
            log::info!("Snake ran into itself at ({}, {})", head.x, head.y);
            self.state = SessionState::Ended(Outcome::Lost);
            return Ok(TickEvent::Lost);
        }
        let event = if head != self.target {
            self.actor.advance_head(head);
            TickEvent::Moved
        } else if let Requirement::Symbol(c) = self.tracker.current() {
            self.actor.grow_head(head, Some(c));
            self.tracker.advance();
            log::debug!(
                "Collected {c:?} ({}/{})",
                self.tracker.cursor(),
                self.tracker.len()
            );
            if self.tracker.is_complete() {
                log::info!("Every letter collected; bonus star is out");
            }
            self.target = place_target(&mut self.rng, self.grid, &self.actor)?;
            TickEvent::Collected(c)
        } else {
            log::info!("Bonus collected; game won");
            self.state = SessionState::Ended(Outcome::Won);
            return Ok(TickEvent::Won);
        };
        let speed = speed_for_length(self.actor.len(), &self.rules);
        if speed != self.speed {
            log::debug!("Speed is now {speed} ticks per second");
            self.speed = speed;
        }
        Ok(event)
    }

    /// Ask the snake to turn at the start of the next tick.  Only the latest
    /// request before a tick counts.
    pub(crate) fn request_direction(&mut self, direction: Direction) {
        self.pending = Some(direction);
    }

    /// Like [`Session::request_direction()`], but for a raw step vector.
    /// Anything other than a unit step along one axis is rejected and leaves
    /// any earlier request in place.
    #[allow(unused)]
    pub(crate) fn request_vector(&mut self, dx: i32, dy: i32) -> Result<(), InvalidDirection> {
        self.request_direction(Direction::from_vector(dx, dy)?);
        Ok(())
    }
}

impl<R> Session<R> {
    pub(crate) fn grid(&self) -> Grid {
        self.grid
    }

    pub(crate) fn actor(&self) -> &Actor {
        &self.actor
    }

    pub(crate) fn tracker(&self) -> &SequenceTracker {
        &self.tracker
    }

    pub(crate) fn requirement(&self) -> Requirement {
        self.tracker.current()
    }

    pub(crate) fn target(&self) -> Target {
        let kind = match self.tracker.current() {
            Requirement::Symbol(c) => TargetKind::Symbol(c),
            Requirement::Bonus => TargetKind::Bonus,
        };
        Target {
            cell: self.target,
            kind,
        }
    }

    pub(crate) fn direction(&self) -> Direction {
        self.direction
    }

    /// `None` while the game is still running
    pub(crate) fn outcome(&self) -> Option<Outcome> {
        match self.state {
            SessionState::Running => None,
            SessionState::Ended(outcome) => Some(outcome),
        }
    }

    pub(crate) fn running(&self) -> bool {
        self.state == SessionState::Running
    }

    /// Current ticks per second
    pub(crate) fn speed(&self) -> NonZeroU32 {
        self.speed
    }
}

#[cfg(test)]
impl<R> Session<R> {
    pub(crate) fn pending_direction(&self) -> Option<Direction> {
        self.pending
    }

    pub(crate) fn state(&self) -> SessionState {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::actor::Segment;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use std::collections::HashSet;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    fn rules(sequence: &str) -> Rules {
        Rules {
            sequence: sequence.chars().collect(),
            ..Rules::default()
        }
    }

    fn session(sequence: &str) -> Session<ChaCha12Rng> {
        Session::new(
            Grid::new(20, 20),
            rules(sequence),
            ChaCha12Rng::seed_from_u64(RNG_SEED),
        )
        .unwrap()
    }

    fn line(cells: &[(i32, i32)]) -> Actor {
        Actor::from_segments(cells.iter().map(|&(x, y)| Segment::plain(Cell::new(x, y)))).unwrap()
    }

    fn far_target(s: &mut Session<ChaCha12Rng>) {
        s.target = Cell::new(0, 19);
    }

    #[test]
    fn new_session() {
        let s = session("AB");
        assert_eq!(s.actor().len(), 1);
        assert_eq!(s.actor().head().cell, Cell::new(10, 10));
        assert_eq!(s.direction(), Direction::Right);
        assert_eq!(s.requirement(), Requirement::Symbol('A'));
        assert_eq!(s.target().kind, TargetKind::Symbol('A'));
        assert!(!s.actor().collides(s.target().cell));
        assert!(s.grid().contains(s.target().cell));
        assert_eq!(s.state(), SessionState::Running);
        assert_eq!(s.outcome(), None);
        assert_eq!(s.speed().get(), 8);
    }

    #[test]
    fn collect_first_letter() {
        let mut s = session("A");
        s.target = Cell::new(11, 10);
        assert_eq!(s.tick(), Ok(TickEvent::Collected('A')));
        assert_eq!(
            s.actor().segments().copied().collect::<Vec<_>>(),
            [
                Segment::plain(Cell::new(10, 10)),
                Segment {
                    cell: Cell::new(11, 10),
                    symbol: Some('A')
                },
            ]
        );
        assert_eq!(s.tracker().cursor(), 1);
        assert!(s.tracker().is_complete());
        assert_eq!(s.target().kind, TargetKind::Bonus);
        assert!(!s.actor().collides(s.target().cell));
        assert_eq!(s.state(), SessionState::Running);
    }

    #[test]
    fn reversal_is_ignored() {
        let mut s = session("A");
        far_target(&mut s);
        s.actor = line(&[(5, 5), (6, 5), (7, 5)]);
        s.request_direction(Direction::Left);
        assert_eq!(s.tick(), Ok(TickEvent::Moved));
        assert_eq!(s.direction(), Direction::Right);
        assert_eq!(s.pending_direction(), None);
        assert_eq!(
            s.actor().cells().collect::<Vec<_>>(),
            [Cell::new(6, 5), Cell::new(7, 5), Cell::new(8, 5)]
        );
    }

    #[test]
    fn reversal_is_not_kept_for_later() {
        let mut s = session("A");
        far_target(&mut s);
        s.request_direction(Direction::Left);
        s.tick().unwrap();
        s.tick().unwrap();
        assert_eq!(s.direction(), Direction::Right);
        assert_eq!(s.actor().head().cell, Cell::new(12, 10));
    }

    #[test]
    fn last_request_wins() {
        let mut s = session("A");
        far_target(&mut s);
        s.request_direction(Direction::Up);
        s.request_direction(Direction::Down);
        s.tick().unwrap();
        assert_eq!(s.direction(), Direction::Down);
        assert_eq!(s.actor().head().cell, Cell::new(10, 11));
    }

    #[test]
    fn turn() {
        let mut s = session("A");
        far_target(&mut s);
        s.request_direction(Direction::Up);
        assert_eq!(s.pending_direction(), Some(Direction::Up));
        s.tick().unwrap();
        assert_eq!(s.direction(), Direction::Up);
        assert_eq!(s.actor().head().cell, Cell::new(10, 9));
    }

    #[test]
    fn invalid_vector_is_rejected() {
        let mut s = session("A");
        s.request_direction(Direction::Down);
        assert!(s.request_vector(1, 1).is_err());
        assert!(s.request_vector(0, 0).is_err());
        assert_eq!(s.pending_direction(), Some(Direction::Down));
        assert_eq!(s.request_vector(0, -1), Ok(()));
        assert_eq!(s.pending_direction(), Some(Direction::Up));
    }

    #[test]
    fn wraps_around_edge() {
        let mut s = session("A");
        s.target = Cell::new(5, 5);
        s.actor = Actor::new(Cell::new(19, 3));
        s.tick().unwrap();
        assert_eq!(s.actor().head().cell, Cell::new(0, 3));
    }

    #[test]
    fn self_collision_loses() {
        let mut s = session("A");
        far_target(&mut s);
        // Head at (5, 6), moving up onto the tail at (5, 5)
        s.actor = line(&[(5, 5), (6, 5), (6, 6), (5, 6)]);
        s.direction = Direction::Up;
        let before = s.actor().clone();
        assert_eq!(s.tick(), Ok(TickEvent::Lost));
        assert_eq!(s.state(), SessionState::Ended(Outcome::Lost));
        assert_eq!(s.outcome(), Some(Outcome::Lost));
        assert_eq!(s.actor(), &before);
    }

    #[test]
    fn ended_session_does_not_tick() {
        let mut s = session("A");
        far_target(&mut s);
        s.actor = line(&[(5, 5), (6, 5), (6, 6), (5, 6)]);
        s.direction = Direction::Up;
        s.tick().unwrap();
        let before = s.clone();
        s.request_direction(Direction::Left);
        assert_eq!(s.tick(), Ok(TickEvent::Idle));
        assert_eq!(s.actor(), before.actor());
        assert_eq!(s.state(), SessionState::Ended(Outcome::Lost));
    }

    #[test]
    fn bonus_wins() {
        let mut s = session("A");
        s.tracker.advance();
        s.target = Cell::new(11, 10);
        assert_eq!(s.target().kind, TargetKind::Bonus);
        let before = s.actor().clone();
        assert_eq!(s.tick(), Ok(TickEvent::Won));
        assert_eq!(s.outcome(), Some(Outcome::Won));
        assert_eq!(s.actor(), &before);
    }

    #[test]
    fn play_whole_sequence() {
        let mut s = session("ABC");
        for (i, c) in "ABC".chars().enumerate() {
            let x = 11 + i32::try_from(i).unwrap();
            s.target = Cell::new(x, 10);
            assert_eq!(s.tick(), Ok(TickEvent::Collected(c)));
        }
        assert_eq!(s.actor().len(), 4);
        assert_eq!(
            s.actor().segments().filter_map(|seg| seg.symbol).collect::<String>(),
            "ABC"
        );
        assert_eq!(s.target().kind, TargetKind::Bonus);
        s.target = Cell::new(14, 10);
        assert_eq!(s.tick(), Ok(TickEvent::Won));
    }

    #[test]
    fn empty_sequence_goes_straight_to_bonus() {
        let mut s = session("");
        assert_eq!(s.target().kind, TargetKind::Bonus);
        s.target = Cell::new(11, 10);
        assert_eq!(s.tick(), Ok(TickEvent::Won));
    }

    #[test]
    fn speed_increases_with_growth() {
        let mut s = session("ABCDEF");
        let mut speeds = vec![s.speed().get()];
        for i in 0..6 {
            s.target = Cell::new(11 + i, 10);
            s.tick().unwrap();
            speeds.push(s.speed().get());
        }
        // Lengths 1 through 7
        assert_eq!(speeds, [8, 8, 9, 9, 9, 10, 10]);
    }

    #[test]
    fn reset_restores_start() {
        let mut s = session("AB");
        s.target = Cell::new(11, 10);
        s.tick().unwrap();
        s.actor = line(&[(5, 5), (6, 5), (6, 6), (5, 6)]);
        s.direction = Direction::Up;
        s.tick().unwrap();
        assert_eq!(s.outcome(), Some(Outcome::Lost));
        s.request_direction(Direction::Down);
        s.reset().unwrap();
        assert_eq!(s.state(), SessionState::Running);
        assert_eq!(s.actor().cells().collect::<Vec<_>>(), [Cell::new(10, 10)]);
        assert_eq!(s.tracker().cursor(), 0);
        assert_eq!(s.direction(), Direction::Right);
        assert_eq!(s.pending_direction(), None);
        assert_eq!(s.speed().get(), 8);
        assert_eq!(s.target().kind, TargetKind::Symbol('A'));
        assert!(!s.actor().collides(s.target().cell));
    }

    #[test]
    fn full_board_is_fatal() {
        let mut s = Session::new(
            Grid::new(2, 1),
            rules("A"),
            ChaCha12Rng::seed_from_u64(RNG_SEED),
        )
        .unwrap();
        assert_eq!(s.actor().head().cell, Cell::new(1, 0));
        assert_eq!(s.target().cell, Cell::new(0, 0));
        assert_eq!(
            s.tick(),
            Err(PlacementError::GridFull { cols: 2, rows: 1 })
        );
    }

    #[test]
    fn default_speed_curve() {
        let rules = Rules::default();
        for (len, speed) in [(0, 8), (1, 8), (2, 8), (3, 9), (5, 9), (6, 10), (30, 18)] {
            assert_eq!(speed_for_length(len, &rules).get(), speed, "length {len}");
        }
    }

    proptest! {
        #[test]
        fn speed_is_monotonic(len in 0usize..10_000) {
            let rules = Rules::default();
            let here = speed_for_length(len, &rules).get();
            prop_assert!(speed_for_length(len + 1, &rules).get() >= here);
            prop_assert_eq!(here, 8 + u32::try_from(len / 3).unwrap());
        }

        #[test]
        fn reversal_rule(current in 0usize..4, requested in 0usize..4) {
            const DIRS: [Direction; 4] =
                [Direction::Up, Direction::Down, Direction::Left, Direction::Right];
            let (current, requested) = (DIRS[current], DIRS[requested]);
            let mut s = session("A");
            far_target(&mut s);
            s.direction = current;
            s.request_direction(requested);
            s.tick().unwrap();
            prop_assert_eq!(s.pending_direction(), None);
            if requested == current.opposite() {
                prop_assert_eq!(s.direction(), current);
            } else {
                prop_assert_eq!(s.direction(), requested);
            }
        }

        #[test]
        fn segments_stay_distinct(
            seed in any::<u64>(),
            moves in proptest::collection::vec(0usize..4, 1..200),
        ) {
            const DIRS: [Direction; 4] =
                [Direction::Up, Direction::Down, Direction::Left, Direction::Right];
            let mut s = Session::new(
                Grid::new(12, 9),
                rules("ABCDEFGHIJKLMNOP"),
                ChaCha12Rng::seed_from_u64(seed),
            )
            .unwrap();
            for m in moves {
                s.request_direction(DIRS[m]);
                let event = s.tick().unwrap();
                if matches!(event, TickEvent::Won | TickEvent::Lost) {
                    break;
                }
                let cells = s.actor().cells().collect::<HashSet<_>>();
                prop_assert_eq!(cells.len(), s.actor().len());
                prop_assert!(!s.actor().collides(s.target().cell));
            }
        }
    }
}
