use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Canonical movement directions for snake input.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Row and column delta for one step.
    #[must_use]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (-1, 0),
            Self::Down => (1, 0),
            Self::Left => (0, -1),
            Self::Right => (0, 1),
        }
    }

    #[must_use]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }
}

/// Returns whether a direction change is legal (no immediate 180° turns).
#[must_use]
pub fn direction_change_is_valid(current: Direction, next: Direction) -> bool {
    next != current.opposite()
}

/// Holds the direction the next tick will apply.
///
/// Requests are checked against the direction applied on the last tick, so
/// several key presses between two ticks can never fold the snake back onto
/// its own neck.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct InputController {
    active: Direction,
    pending: Direction,
}

impl InputController {
    #[must_use]
    pub fn new(initial: Direction) -> Self {
        Self {
            active: initial,
            pending: initial,
        }
    }

    /// Records `direction` unless it reverses the active direction. Reversals
    /// are dropped silently.
    pub fn request(&mut self, direction: Direction) {
        if direction_change_is_valid(self.active, direction) {
            self.pending = direction;
        }
    }

    /// Promotes the pending direction to active and returns it. Called once
    /// at the start of every tick.
    pub fn apply(&mut self) -> Direction {
        self.active = self.pending;
        self.active
    }

    #[must_use]
    pub fn active(&self) -> Direction {
        self.active
    }

    #[must_use]
    pub fn pending(&self) -> Direction {
        self.pending
    }
}

/// High-level input events consumed by the game loop.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Direction(Direction),
    Start,
    Quit,
}

/// Maps a terminal event to a game input. Unrecognized keys, key releases,
/// and non-key events yield `None`.
#[must_use]
pub fn map_event(event: &Event) -> Option<GameInput> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => map_key(*key),
        _ => None,
    }
}

/// Waits up to `timeout` for one terminal event and maps it.
pub fn poll_input(timeout: Duration) -> io::Result<Option<GameInput>> {
    if !event::poll(timeout)? {
        return Ok(None);
    }
    Ok(map_event(&event::read()?))
}

fn map_key(key: KeyEvent) -> Option<GameInput> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return matches!(key.code, KeyCode::Char('c')).then_some(GameInput::Quit);
    }

    match key.code {
        KeyCode::Up => Some(GameInput::Direction(Direction::Up)),
        KeyCode::Down => Some(GameInput::Direction(Direction::Down)),
        KeyCode::Left => Some(GameInput::Direction(Direction::Left)),
        KeyCode::Right => Some(GameInput::Direction(Direction::Right)),
        KeyCode::Char(' ') | KeyCode::Enter => Some(GameInput::Start),
        KeyCode::Char('q' | 'Q') | KeyCode::Esc => Some(GameInput::Quit),
        _ => None,
    }
}
