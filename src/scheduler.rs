use std::collections::VecDeque;
use std::time::{Duration, Instant};

use rand::Rng;
use rand::rngs::StdRng;

use crate::game::{GameSession, TickOutcome};
use crate::input::{Direction, GameInput};
use crate::presenter::Presenter;

/// Work item processed by the [`Scheduler`], one at a time, in order.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Command {
    Start,
    Turn(Direction),
    /// Timer expiry, stamped with the timer generation that produced it.
    Tick { generation: u64 },
    Quit,
}

impl From<GameInput> for Command {
    fn from(input: GameInput) -> Self {
        match input {
            GameInput::Direction(direction) => Self::Turn(direction),
            GameInput::Start => Self::Start,
            GameInput::Quit => Self::Quit,
        }
    }
}

/// Fixed-period tick source with at most one armed deadline.
///
/// Every cancel bumps the generation, so ticks produced before a cancel can
/// be told apart from ticks of the current run.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct TickTimer {
    period: Duration,
    next_due: Option<Instant>,
    generation: u64,
}

impl TickTimer {
    #[must_use]
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            next_due: None,
            generation: 0,
        }
    }

    /// Cancels any armed deadline, then arms a fresh one a period from `now`.
    pub fn restart(&mut self, now: Instant) {
        self.cancel();
        self.next_due = Some(now + self.period);
    }

    pub fn cancel(&mut self) {
        self.next_due = None;
        self.generation += 1;
    }

    /// Returns the current generation when the deadline has passed and
    /// re-arms for the following period.
    pub fn poll(&mut self, now: Instant) -> Option<u64> {
        let due = self.next_due?;
        if now < due {
            return None;
        }
        self.next_due = Some(now + self.period);
        Some(self.generation)
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.next_due.is_some()
    }

    #[must_use]
    pub fn next_due(&self) -> Option<Instant> {
        self.next_due
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn period(&self) -> Duration {
        self.period
    }
}

/// Single-threaded owner of the game session, its timer, and the command
/// queue feeding both.
#[derive(Debug)]
pub struct Scheduler<R = StdRng> {
    session: GameSession<R>,
    timer: TickTimer,
    queue: VecDeque<Command>,
    quit: bool,
}

impl<R: Rng> Scheduler<R> {
    #[must_use]
    pub fn new(session: GameSession<R>) -> Self {
        let timer = TickTimer::new(session.config().tick_period());
        Self {
            session,
            timer,
            queue: VecDeque::new(),
            quit: false,
        }
    }

    pub fn push(&mut self, command: impl Into<Command>) {
        self.queue.push_back(command.into());
    }

    /// Enqueues a tick if the timer is due at `now`.
    pub fn poll_timer(&mut self, now: Instant) {
        if let Some(generation) = self.timer.poll(now) {
            self.queue.push_back(Command::Tick { generation });
        }
    }

    /// Runs every queued command to completion in FIFO order. Returns how
    /// many commands were processed.
    pub fn drain<P: Presenter + ?Sized>(&mut self, presenter: &mut P, now: Instant) -> usize {
        let mut processed = 0;
        while let Some(command) = self.queue.pop_front() {
            self.dispatch(command, presenter, now);
            processed += 1;
            if self.quit {
                self.queue.clear();
            }
        }
        processed
    }

    fn dispatch<P: Presenter + ?Sized>(&mut self, command: Command, presenter: &mut P, now: Instant) {
        match command {
            Command::Start => {
                if !self.session.start(presenter) {
                    log::debug!("start ignored, game already running");
                    return;
                }
                if self.session.is_running() {
                    self.timer.restart(now);
                } else {
                    self.timer.cancel();
                }
            }
            Command::Turn(direction) => self.session.turn(direction),
            Command::Tick { generation } => {
                if generation != self.timer.generation() {
                    log::debug!(
                        "dropping stale tick from generation {generation} (current {})",
                        self.timer.generation()
                    );
                    return;
                }
                if let Some(TickOutcome::Ended(_)) = self.session.tick(presenter) {
                    self.timer.cancel();
                }
            }
            Command::Quit => {
                self.quit = true;
                self.timer.cancel();
            }
        }
    }
}

impl<R> Scheduler<R> {
    #[must_use]
    pub fn session(&self) -> &GameSession<R> {
        &self.session
    }

    #[must_use]
    pub fn timer(&self) -> &TickTimer {
        &self.timer
    }

    /// Deadline of the next tick, if a game is running.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timer.next_due()
    }

    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn quit_requested(&self) -> bool {
        self.quit
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::{Command, Scheduler, TickTimer};
    use crate::board::Cell;
    use crate::config::GameConfig;
    use crate::game::{GameSession, GameStatus};
    use crate::input::{Direction, GameInput};
    use crate::presenter::TerminalScreen;

    const PERIOD: Duration = Duration::from_millis(100);

    fn fixture(seed: u64) -> (Scheduler, TerminalScreen) {
        let config = GameConfig::default();
        let screen = TerminalScreen::new(config.board_size);
        (Scheduler::new(GameSession::new_with_seed(config, seed)), screen)
    }

    #[test]
    fn timer_fires_once_per_period() {
        let t0 = Instant::now();
        let mut timer = TickTimer::new(PERIOD);
        assert_eq!(timer.poll(t0 + PERIOD), None);

        timer.restart(t0);
        assert_eq!(timer.poll(t0 + PERIOD / 2), None);
        assert_eq!(timer.poll(t0 + PERIOD), Some(timer.generation()));
        assert_eq!(timer.poll(t0 + PERIOD), None);
        assert_eq!(timer.poll(t0 + PERIOD * 2), Some(timer.generation()));
    }

    #[test]
    fn restart_replaces_deadline_and_generation() {
        let t0 = Instant::now();
        let mut timer = TickTimer::new(PERIOD);

        timer.restart(t0);
        let first = timer.generation();
        timer.restart(t0 + PERIOD / 2);

        assert_ne!(timer.generation(), first);
        assert_eq!(timer.next_due(), Some(t0 + PERIOD / 2 + PERIOD));
        assert_eq!(timer.poll(t0 + PERIOD), None);
    }

    #[test]
    fn start_arms_the_timer_and_ticks_move_the_snake() {
        let t0 = Instant::now();
        let (mut scheduler, mut screen) = fixture(1);
        assert!(!scheduler.timer().is_armed());

        scheduler.push(GameInput::Start);
        scheduler.drain(&mut screen, t0);
        assert_eq!(scheduler.session().status(), GameStatus::Running);
        assert_eq!(scheduler.next_deadline(), Some(t0 + PERIOD));

        scheduler.poll_timer(t0 + PERIOD);
        assert_eq!(scheduler.pending(), 1);
        scheduler.drain(&mut screen, t0 + PERIOD);

        assert_eq!(scheduler.session().snake().head(), Cell::new(0, 4));
    }

    #[test]
    fn start_while_running_keeps_the_existing_timer() {
        let t0 = Instant::now();
        let (mut scheduler, mut screen) = fixture(2);
        scheduler.push(Command::Start);
        scheduler.drain(&mut screen, t0);
        let timer = *scheduler.timer();

        scheduler.push(Command::Start);
        scheduler.drain(&mut screen, t0 + PERIOD / 2);

        assert_eq!(*scheduler.timer(), timer);
    }

    #[test]
    fn game_over_cancels_the_timer() {
        let t0 = Instant::now();
        let (mut scheduler, mut screen) = fixture(3);
        scheduler.push(Command::Start);
        scheduler.drain(&mut screen, t0);

        // Heading right from column 3 on a 10-wide board: six moves, then the wall.
        let mut now = t0;
        for _ in 0..7 {
            now += PERIOD;
            scheduler.poll_timer(now);
            scheduler.drain(&mut screen, now);
        }

        assert_eq!(scheduler.session().status(), GameStatus::Over);
        assert!(!scheduler.timer().is_armed());
        scheduler.poll_timer(now + PERIOD * 10);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn stale_ticks_never_reach_a_restarted_game() {
        let t0 = Instant::now();
        let (mut scheduler, mut screen) = fixture(4);
        scheduler.push(Command::Start);
        scheduler.drain(&mut screen, t0);
        let old_generation = scheduler.timer().generation();

        let mut now = t0;
        while scheduler.session().is_running() {
            now += PERIOD;
            scheduler.poll_timer(now);
            scheduler.drain(&mut screen, now);
        }

        scheduler.push(Command::Tick {
            generation: old_generation,
        });
        scheduler.push(Command::Start);
        scheduler.push(Command::Tick {
            generation: old_generation,
        });
        scheduler.drain(&mut screen, now);

        assert_eq!(scheduler.session().status(), GameStatus::Running);
        assert_eq!(scheduler.session().snake().head(), Cell::new(0, 3));
        assert_eq!(scheduler.next_deadline(), Some(now + PERIOD));
    }

    #[test]
    fn turns_are_applied_in_queue_order() {
        let t0 = Instant::now();
        let (mut scheduler, mut screen) = fixture(5);
        scheduler.push(Command::Start);
        scheduler.push(Command::Turn(Direction::Down));
        scheduler.push(Command::Turn(Direction::Left));
        scheduler.drain(&mut screen, t0);

        // Left reverses the applied Right and is dropped; Down stands.
        assert_eq!(scheduler.session().pending_direction(), Direction::Down);
    }

    #[test]
    fn quit_discards_remaining_commands() {
        let t0 = Instant::now();
        let (mut scheduler, mut screen) = fixture(6);
        scheduler.push(Command::Quit);
        scheduler.push(Command::Start);

        assert_eq!(scheduler.drain(&mut screen, t0), 1);
        assert!(scheduler.quit_requested());
        assert_eq!(scheduler.session().status(), GameStatus::Idle);
    }
}
