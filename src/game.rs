use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use crate::board::{Board, Cell, CellState, NoEmptyCells};
use crate::config::{GameConfig, INITIAL_DIRECTION};
use crate::input::{Direction, InputController};
use crate::presenter::Presenter;
use crate::snake::Snake;

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    /// No game has been started yet.
    Idle,
    Running,
    /// The snake made an invalid move.
    Over,
    /// The snake filled the board; there is nowhere left to put food.
    Victory,
}

/// Why a candidate head position was rejected.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum InvalidMove {
    #[error("ran off the end of the row")]
    WrapAround,
    #[error("hit the wall")]
    OutOfBounds,
    #[error("ran into itself")]
    SelfCollision,
}

/// How a finished game ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameEnding {
    Collision(InvalidMove),
    BoardFull,
}

/// Result of one processed tick.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TickOutcome {
    /// Head advanced and tail retracted.
    Moved,
    /// Head advanced onto food; the tail stayed.
    Grew,
    Ended(GameEnding),
}

/// Complete mutable game state for one player.
#[derive(Debug, Clone)]
pub struct GameSession<R = StdRng> {
    config: GameConfig,
    board: Board,
    snake: Snake,
    score: u32,
    input: InputController,
    food: Option<Cell>,
    status: GameStatus,
    ending: Option<GameEnding>,
    rng: R,
}

impl GameSession<StdRng> {
    /// Creates an idle session seeded from the OS.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Creates a deterministic session for tests and reproducible runs.
    #[must_use]
    pub fn new_with_seed(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> GameSession<R> {
    /// Creates an idle session. Nothing is placed on the board until
    /// [`GameSession::start`].
    #[must_use]
    pub fn with_rng(config: GameConfig, rng: R) -> Self {
        Self {
            board: Board::new(config.board_size),
            snake: Snake::new(config.initial_snake()),
            score: 0,
            input: InputController::new(INITIAL_DIRECTION),
            food: None,
            status: GameStatus::Idle,
            ending: None,
            config,
            rng,
        }
    }

    /// Starts a fresh game. Returns `false` and changes nothing when a game
    /// is already running.
    pub fn start<P: Presenter + ?Sized>(&mut self, presenter: &mut P) -> bool {
        if self.status == GameStatus::Running {
            return false;
        }

        self.board.initialize(self.config.board_size);
        self.snake.initialize(self.config.initial_snake());
        self.score = u32::from(self.config.initial_length);
        self.input = InputController::new(INITIAL_DIRECTION);
        self.food = None;
        self.ending = None;
        self.status = GameStatus::Running;

        presenter.hide_game_over();
        presenter.set_start_enabled(false);
        for (cell, state) in self.board.cells() {
            presenter.render_cell(cell, state);
        }
        for &segment in self.snake.segments() {
            self.board.set_cell_state(segment, CellState::Occupied);
            presenter.render_cell(segment, CellState::Occupied);
        }
        presenter.render_score(self.score);

        log::info!(
            "game started on a {size}x{size} board",
            size = self.config.board_size
        );

        if self.place_food(presenter).is_err() {
            self.finish(GameEnding::BoardFull, presenter);
        }
        true
    }

    /// Requests a turn for the next tick. Ignored unless a game is running.
    pub fn turn(&mut self, direction: Direction) {
        if self.status == GameStatus::Running {
            self.input.request(direction);
        }
    }

    /// Advances the game by one step. Returns `None` when no game is running.
    pub fn tick<P: Presenter + ?Sized>(&mut self, presenter: &mut P) -> Option<TickOutcome> {
        if self.status != GameStatus::Running {
            return None;
        }

        let direction = self.input.apply();
        let candidate = match self.validate_move(direction) {
            Ok(candidate) => candidate,
            Err(reason) => {
                let ending = GameEnding::Collision(reason);
                self.finish(ending, presenter);
                return Some(TickOutcome::Ended(ending));
            }
        };

        let ate = self.board.state(candidate) == CellState::Food;
        self.board.set_cell_state(candidate, CellState::Occupied);
        self.snake.advance_head(candidate);
        presenter.render_cell(candidate, CellState::Occupied);

        if !ate {
            if let Some(tail) = self.snake.retract_tail() {
                self.board.set_cell_state(tail, CellState::Empty);
                presenter.render_cell(tail, CellState::Empty);
            }
            return Some(TickOutcome::Moved);
        }

        self.score += 1;
        self.food = None;
        presenter.render_score(self.score);

        if self.place_food(presenter).is_err() {
            self.finish(GameEnding::BoardFull, presenter);
            return Some(TickOutcome::Ended(GameEnding::BoardFull));
        }
        Some(TickOutcome::Grew)
    }

    fn validate_move(&self, direction: Direction) -> Result<Cell, InvalidMove> {
        let Some(candidate) = self.snake.head().step(direction, self.board.size()) else {
            return Err(if direction.is_horizontal() {
                InvalidMove::WrapAround
            } else {
                InvalidMove::OutOfBounds
            });
        };

        // Food and empty cells are both fine to land on.
        if self.board.state(candidate) == CellState::Occupied {
            return Err(InvalidMove::SelfCollision);
        }
        Ok(candidate)
    }

    fn place_food<P: Presenter + ?Sized>(&mut self, presenter: &mut P) -> Result<(), NoEmptyCells> {
        let cell = self.board.pick_random_empty_cell(&mut self.rng)?;
        self.board.set_cell_state(cell, CellState::Food);
        self.food = Some(cell);
        presenter.render_cell(cell, CellState::Food);
        Ok(())
    }

    fn finish<P: Presenter + ?Sized>(&mut self, ending: GameEnding, presenter: &mut P) {
        self.status = match ending {
            GameEnding::Collision(_) => GameStatus::Over,
            GameEnding::BoardFull => GameStatus::Victory,
        };
        self.ending = Some(ending);

        presenter.show_game_over(ending);
        presenter.set_start_enabled(true);

        match ending {
            GameEnding::Collision(reason) => {
                log::info!("game over with score {}: {reason}", self.score);
            }
            GameEnding::BoardFull => log::info!("board filled with score {}", self.score),
        }
    }
}

impl<R> GameSession<R> {
    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.status == GameStatus::Running
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn food(&self) -> Option<Cell> {
        self.food
    }

    /// Direction applied on the most recent tick.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.input.active()
    }

    /// Direction the next tick will apply.
    #[must_use]
    pub fn pending_direction(&self) -> Direction {
        self.input.pending()
    }

    #[must_use]
    pub fn ending(&self) -> Option<GameEnding> {
        self.ending
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}
