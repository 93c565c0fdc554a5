use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use grid_snake::config::{GameConfig, IDLE_POLL_INTERVAL};
use grid_snake::error::AppError;
use grid_snake::game::GameSession;
use grid_snake::input::poll_input;
use grid_snake::logging;
use grid_snake::presenter::TerminalScreen;
use grid_snake::scheduler::Scheduler;
use grid_snake::terminal_runtime::{TerminalSession, install_panic_hook};

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Board edge length in cells.
    #[arg(long)]
    size: Option<u16>,

    /// Milliseconds between snake moves.
    #[arg(long = "tick-ms")]
    tick_ms: Option<u64>,

    /// Read settings from this JSON file instead of the default location.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write diagnostic logs to this file.
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("grid-snake: {error}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), AppError> {
    logging::init(cli.log_file.as_deref())?;
    let config = load_config(cli)?;
    log::info!("starting with {config:?}");

    install_panic_hook();
    let mut terminal = TerminalSession::enter()?;
    let mut screen = TerminalScreen::new(config.board_size);
    let mut scheduler = Scheduler::new(GameSession::new(config));

    while !scheduler.quit_requested() {
        terminal.draw(&screen)?;

        let timeout = scheduler.next_deadline().map_or(IDLE_POLL_INTERVAL, |due| {
            due.saturating_duration_since(Instant::now())
        });
        if let Some(input) = poll_input(timeout)? {
            scheduler.push(input);
        }

        let now = Instant::now();
        scheduler.poll_timer(now);
        scheduler.drain(&mut screen, now);
    }

    Ok(())
}

fn load_config(cli: &Cli) -> Result<GameConfig, AppError> {
    let mut config = GameConfig::load(cli.config.as_deref())?;
    if let Some(size) = cli.size {
        config.board_size = size;
    }
    if let Some(tick_ms) = cli.tick_ms {
        config.tick_period_ms = tick_ms;
    }
    Ok(config.validate()?)
}
