use std::collections::HashSet;

use rand::Rng;

use crate::error::BoardFullError;
use crate::grid::{Grid, Position};

/// The single food cell on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Food {
    pub position: Position,
}

impl Food {
    /// Creates food at a fixed `position`.
    #[must_use]
    pub fn at(position: Position) -> Self {
        Self { position }
    }

    /// Spawns food on a random cell outside `occupied`.
    pub fn spawn<R: Rng + ?Sized>(
        rng: &mut R,
        grid: Grid,
        occupied: &HashSet<Position>,
    ) -> Result<Self, BoardFullError> {
        random_free_cell(rng, grid, occupied).map(Self::at)
    }

    /// Moves the food to a random cell outside `occupied`.
    ///
    /// Leaves the position untouched when the board is full.
    pub fn relocate<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        grid: Grid,
        occupied: &HashSet<Position>,
    ) -> Result<(), BoardFullError> {
        self.position = random_free_cell(rng, grid, occupied)?;
        Ok(())
    }
}

/// Draws uniform cells with replacement until one falls outside `occupied`.
pub fn random_free_cell<R: Rng + ?Sized>(
    rng: &mut R,
    grid: Grid,
    occupied: &HashSet<Position>,
) -> Result<Position, BoardFullError> {
    if occupied.len() >= grid.total_cells() {
        return Err(BoardFullError {
            width: grid.width(),
            height: grid.height(),
        });
    }

    loop {
        let candidate = Position {
            x: rng.gen_range(0..i32::from(grid.width())),
            y: rng.gen_range(0..i32::from(grid.height())),
        };
        if !occupied.contains(&candidate) {
            return Ok(candidate);
        }
    }
}
