use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Raised when food cannot be placed because every cell is occupied.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
#[error("no free cell left on a {width}x{height} board")]
pub struct BoardFullError {
    pub width: u16,
    pub height: u16,
}

/// Invalid or unreadable game configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("grid dimensions must be non-zero (got {width}x{height})")]
    ZeroDimension { width: u32, height: u32 },

    #[error("grid dimension {value} exceeds the maximum of {max}")]
    DimensionTooLarge { value: u32, max: u32 },

    #[error("grid needs at least two cells to place food (got {width}x{height})")]
    TooFewCells { width: u32, height: u32 },

    #[error("tick rate must be between 1 and {max} ticks per second (got {value})")]
    TickRate { value: u32, max: u32 },

    #[error("failed to read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Top-level error for the binary.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to initialize logger: {0}")]
    Logger(#[from] log::SetLoggerError),
}
