use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::ConfigError;
use crate::food::Food;
use crate::grid::{Grid, Position};
use crate::input::{Direction, GameInput};
use crate::snake::Snake;

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    Playing,
    Paused,
}

/// What happened during one call to [`GameState::tick`].
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TickOutcome {
    /// The snake moved without eating or colliding.
    Moved,
    /// The snake ate the food and the food was placed elsewhere.
    Ate,
    /// The head ran into the body; the snake was reset.
    SelfCollision,
    /// The snake ate the food but no free cell was left; the snake was reset.
    BoardFull,
    /// The game is paused and nothing moved.
    Paused,
}

impl TickOutcome {
    /// Returns true when the tick ended with a fresh snake.
    #[must_use]
    pub fn is_reset(self) -> bool {
        matches!(self, Self::SelfCollision | Self::BoardFull)
    }
}

/// Opaque per-cell classification handed to the renderer.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum CellKind {
    Head,
    Body,
    Food,
    Empty,
}

/// Complete mutable game state for one session.
#[derive(Debug, Clone)]
pub struct GameState {
    pub snake: Snake,
    pub food: Food,
    pub score: u32,
    pub best_score: u32,
    pub resets: u32,
    pub tick_count: u64,
    pub status: GameStatus,
    grid: Grid,
    rng: StdRng,
}

impl GameState {
    /// Creates a state seeded from OS entropy.
    pub fn new(grid: Grid) -> Result<Self, ConfigError> {
        Self::with_rng(grid, StdRng::from_entropy())
    }

    /// Creates a deterministic state for tests and reproducible simulations.
    pub fn new_with_seed(grid: Grid, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(grid, StdRng::seed_from_u64(seed))
    }

    fn with_rng(grid: Grid, mut rng: StdRng) -> Result<Self, ConfigError> {
        let snake = Snake::new(grid, Direction::Right);
        let food = Food::spawn(&mut rng, grid, &snake.occupied()).map_err(|_| {
            ConfigError::TooFewCells {
                width: u32::from(grid.width()),
                height: u32::from(grid.height()),
            }
        })?;

        Ok(Self {
            snake,
            food,
            score: 0,
            best_score: 0,
            resets: 0,
            tick_count: 0,
            status: GameStatus::Playing,
            grid,
            rng,
        })
    }

    /// Advances the simulation by one tick.
    ///
    /// Every direction in `inputs` is offered to the snake in order before
    /// it moves, so the last accepted one decides the heading.
    pub fn tick<I>(&mut self, inputs: I) -> TickOutcome
    where
        I: IntoIterator<Item = Direction>,
    {
        if self.status != GameStatus::Playing {
            return TickOutcome::Paused;
        }

        for direction in inputs {
            self.snake.request_direction(direction);
        }

        self.tick_count += 1;
        self.snake.apply_pending_direction();
        self.snake.advance();

        let mut outcome = TickOutcome::Moved;

        if self.snake.head() == self.food.position {
            self.snake.grow();
            self.score += 1;
            self.best_score = self.best_score.max(self.score);

            let occupied = self.snake.occupied();
            match self.food.relocate(&mut self.rng, self.grid, &occupied) {
                Ok(()) => {
                    debug!(
                        "ate food at {:?}, next food at {:?}",
                        self.snake.head(),
                        self.food.position
                    );
                    outcome = TickOutcome::Ate;
                }
                Err(error) => {
                    info!("{error}; starting over");
                    self.reset();
                    outcome = TickOutcome::BoardFull;
                }
            }
        }

        if self.snake.check_self_collision() {
            info!(
                "self collision at {:?} with length {}",
                self.snake.head(),
                self.snake.len()
            );
            self.reset();
            outcome = TickOutcome::SelfCollision;
        }

        outcome
    }

    /// Applies one external input event.
    pub fn apply_input(&mut self, input: GameInput) {
        match input {
            GameInput::Direction(direction) => {
                if self.status == GameStatus::Playing {
                    self.snake.request_direction(direction);
                }
            }
            GameInput::Pause => {
                self.status = match self.status {
                    GameStatus::Playing => GameStatus::Paused,
                    GameStatus::Paused => GameStatus::Playing,
                };
            }
            GameInput::Quit => {}
        }
    }

    /// Classifies `position` for drawing.
    #[must_use]
    pub fn cell_kind(&self, position: Position) -> CellKind {
        if self.snake.head() == position {
            CellKind::Head
        } else if self.snake.occupies(position) {
            CellKind::Body
        } else if self.food.position == position {
            CellKind::Food
        } else {
            CellKind::Empty
        }
    }

    #[must_use]
    pub fn grid(&self) -> Grid {
        self.grid
    }

    fn reset(&mut self) {
        self.snake.reset(&mut self.rng);
        self.score = 0;
        self.resets += 1;

        // Grids have at least two cells, so a one-cell snake leaves room.
        if self.snake.occupies(self.food.position) {
            let occupied = self.snake.occupied();
            if let Err(error) = self.food.relocate(&mut self.rng, self.grid, &occupied) {
                debug!("food left in place after reset: {error}");
            }
        }
    }
}
