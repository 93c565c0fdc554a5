//! Grid snake: a board of cells, a snake that moves one cell per tick, and a
//! terminal front end.
//!
//! [`game::GameSession`] holds all game state and applies one tick at a time;
//! [`scheduler::Scheduler`] feeds it start, turn, and tick commands in order.
//! Display is reached only through the [`presenter::Presenter`] trait.

pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod input;
pub mod logging;
pub mod presenter;
pub mod renderer;
pub mod scheduler;
pub mod snake;
pub mod terminal_runtime;
pub mod ui;
