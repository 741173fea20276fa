use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use log::{LevelFilter, info};
use toroid_snake::config::{ConfigOverrides, GameConfig, default_log_path};
use toroid_snake::error::AppError;
use toroid_snake::game::{GameState, TickOutcome};
use toroid_snake::input::{Direction, GameInput, InputHandler};
use toroid_snake::logging;
use toroid_snake::renderer;
use toroid_snake::terminal_runtime::{TerminalSession, install_panic_hook};
use toroid_snake::ui::hud::HudInfo;

const FRAME_SLEEP: Duration = Duration::from_millis(8);

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// JSON config file (defaults to the platform config directory).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width in cells.
    #[arg(long)]
    width: Option<u32>,

    /// Grid height in cells.
    #[arg(long)]
    height: Option<u32>,

    /// Ticks per second.
    #[arg(long)]
    tick_rate: Option<u32>,

    /// Fixed RNG seed for reproducible games.
    #[arg(long)]
    seed: Option<u64>,

    /// Log file (defaults to the platform data directory).
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[arg(long, default_value = "info")]
    log_level: LevelFilter,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("toroid-snake: {error}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    let log_path = match cli.log_file {
        Some(path) => path,
        None => default_log_path()?,
    };
    logging::init(&log_path, cli.log_level)?;

    let config = GameConfig::load(
        cli.config.as_deref(),
        ConfigOverrides {
            width: cli.width,
            height: cli.height,
            tick_rate: cli.tick_rate,
            seed: cli.seed,
        },
    )?;
    info!("starting with {config:?}");

    let grid = config.grid()?;
    let mut state = match config.seed {
        Some(seed) => GameState::new_with_seed(grid, seed)?,
        None => GameState::new(grid)?,
    };

    install_panic_hook();
    let mut session = TerminalSession::enter()?;
    let mut input = InputHandler::new();
    let hud_info = HudInfo {
        tick_rate: config.tick_rate,
    };
    let tick_interval = config.tick_interval();
    let mut pending: Vec<Direction> = Vec::new();
    let mut last_tick = Instant::now();

    'game: loop {
        session
            .terminal_mut()
            .draw(|frame| renderer::render(frame, &state, hud_info))?;

        for game_input in input.drain()? {
            match game_input {
                GameInput::Quit => break 'game,
                GameInput::Direction(direction) => pending.push(direction),
                GameInput::Pause => state.apply_input(GameInput::Pause),
            }
        }

        if last_tick.elapsed() >= tick_interval {
            let outcome = state.tick(pending.drain(..));
            if outcome == TickOutcome::BoardFull {
                info!("board filled after {} ticks", state.tick_count);
            }
            last_tick = Instant::now();
        }

        thread::sleep(FRAME_SLEEP);
    }

    info!(
        "quit after {} ticks, {} resets, best score {}",
        state.tick_count, state.resets, state.best_score
    );
    Ok(())
}
