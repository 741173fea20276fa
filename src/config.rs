use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ratatui::style::Color;
use serde::Deserialize;

use crate::error::ConfigError;
use crate::grid::Grid;

const APP_DIR_NAME: &str = "toroid-snake";
const CONFIG_FILE_NAME: &str = "config.json";

/// Default grid width: a 640 px board at 20 px per cell.
pub const DEFAULT_GRID_WIDTH: u32 = 32;

/// Default grid height: a 480 px board at 20 px per cell.
pub const DEFAULT_GRID_HEIGHT: u32 = 24;

/// Default pacing in ticks per second.
pub const DEFAULT_TICK_RATE: u32 = 20;

/// Upper bound for the tick rate.
pub const MAX_TICK_RATE: u32 = 1000;

/// Rendering glyphs, one terminal column per cell.
pub const GLYPH_SNAKE_HEAD: &str = "█";
pub const GLYPH_SNAKE_BODY: &str = "▓";
pub const GLYPH_FOOD: &str = "●";

pub const COLOR_SNAKE_HEAD: Color = Color::LightGreen;
pub const COLOR_SNAKE_BODY: Color = Color::Green;
pub const COLOR_FOOD: Color = Color::Red;
pub const COLOR_BORDER: Color = Color::Cyan;
pub const COLOR_HUD: Color = Color::DarkGray;

/// Runtime settings for one session.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub width: u32,
    pub height: u32,
    /// Ticks per second.
    pub tick_rate: u32,
    /// Fixed RNG seed; `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_WIDTH,
            height: DEFAULT_GRID_HEIGHT,
            tick_rate: DEFAULT_TICK_RATE,
            seed: None,
        }
    }
}

/// Command-line values that take precedence over the config file.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct ConfigOverrides {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub tick_rate: Option<u32>,
    pub seed: Option<u64>,
}

impl GameConfig {
    /// Loads the config file and applies overrides on top.
    ///
    /// An explicit `path` must exist. Without one, the default location is
    /// used when present and defaults otherwise.
    pub fn load(path: Option<&Path>, overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        let base = match path {
            Some(path) => Self::from_path(path)?,
            None => match default_config_path() {
                Some(path) if path.exists() => Self::from_path(&path)?,
                _ => Self::default(),
            },
        };

        let config = base.with_overrides(overrides);
        config.validate()?;
        Ok(config)
    }

    /// Parses a JSON config file; missing fields keep their defaults.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    #[must_use]
    pub fn with_overrides(self, overrides: ConfigOverrides) -> Self {
        Self {
            width: overrides.width.unwrap_or(self.width),
            height: overrides.height.unwrap_or(self.height),
            tick_rate: overrides.tick_rate.unwrap_or(self.tick_rate),
            seed: overrides.seed.or(self.seed),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_TICK_RATE).contains(&self.tick_rate) {
            return Err(ConfigError::TickRate {
                value: self.tick_rate,
                max: MAX_TICK_RATE,
            });
        }

        let grid = self.grid()?;
        if grid.total_cells() < 2 {
            return Err(ConfigError::TooFewCells {
                width: self.width,
                height: self.height,
            });
        }

        Ok(())
    }

    /// Builds the grid described by this config.
    pub fn grid(&self) -> Result<Grid, ConfigError> {
        Grid::new(dimension(self.width)?, dimension(self.height)?)
    }

    /// Time between two ticks.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(1000 / u64::from(self.tick_rate.max(1)))
    }
}

fn dimension(value: u32) -> Result<u16, ConfigError> {
    u16::try_from(value).map_err(|_| ConfigError::DimensionTooLarge {
        value,
        max: u32::from(u16::MAX),
    })
}

/// Returns the platform-correct config file path.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|base| base.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Returns the platform-correct log file path, creating its directory.
pub fn default_log_path() -> io::Result<PathBuf> {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    fs::create_dir_all(&base)?;
    base.push(format!("{APP_DIR_NAME}.log"));
    Ok(base)
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    use crate::error::ConfigError;

    use super::{ConfigOverrides, GameConfig};

    #[test]
    fn defaults_match_classic_board() {
        let config = GameConfig::default();

        assert_eq!((config.width, config.height), (32, 24));
        assert_eq!(config.tick_rate, 20);
        assert_eq!(config.tick_interval(), Duration::from_millis(50));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_file_keeps_defaults_for_missing_fields() {
        let path = unique_test_path("partial");
        write_test_file(&path, r#"{ "width": 12, "seed": 99 }"#);

        let config = GameConfig::from_path(&path).expect("config should parse");

        assert_eq!(config.width, 12);
        assert_eq!(config.height, 24);
        assert_eq!(config.seed, Some(99));
        cleanup_test_path(&path);
    }

    #[test]
    fn overrides_take_precedence_over_file() {
        let path = unique_test_path("override");
        write_test_file(&path, r#"{ "width": 12, "height": 10, "tick_rate": 5 }"#);

        let config = GameConfig::load(
            Some(&path),
            ConfigOverrides {
                height: Some(4),
                seed: Some(1),
                ..ConfigOverrides::default()
            },
        )
        .expect("config should load");

        assert_eq!((config.width, config.height), (12, 4));
        assert_eq!(config.tick_rate, 5);
        assert_eq!(config.seed, Some(1));
        cleanup_test_path(&path);
    }

    #[test]
    fn malformed_file_returns_parse_error() {
        let path = unique_test_path("malformed");
        write_test_file(&path, "not-json");

        assert!(matches!(
            GameConfig::from_path(&path),
            Err(ConfigError::Parse { .. })
        ));
        cleanup_test_path(&path);
    }

    #[test]
    fn unknown_field_is_rejected() {
        let path = unique_test_path("unknown");
        write_test_file(&path, r#"{ "speed": 3 }"#);

        assert!(GameConfig::from_path(&path).is_err());
        cleanup_test_path(&path);
    }

    #[test]
    fn missing_explicit_file_returns_read_error() {
        let path = unique_test_path("missing");

        assert!(matches!(
            GameConfig::load(Some(&path), ConfigOverrides::default()),
            Err(ConfigError::Read { .. })
        ));
    }

    #[test]
    fn invalid_values_fail_validation() {
        let zero = GameConfig {
            width: 0,
            ..GameConfig::default()
        };
        let single = GameConfig {
            width: 1,
            height: 1,
            ..GameConfig::default()
        };
        let huge = GameConfig {
            height: 70_000,
            ..GameConfig::default()
        };
        let stalled = GameConfig {
            tick_rate: 0,
            ..GameConfig::default()
        };

        assert!(matches!(
            zero.validate(),
            Err(ConfigError::ZeroDimension { .. })
        ));
        assert!(matches!(
            single.validate(),
            Err(ConfigError::TooFewCells { .. })
        ));
        assert!(matches!(
            huge.validate(),
            Err(ConfigError::DimensionTooLarge { .. })
        ));
        assert!(matches!(
            stalled.validate(),
            Err(ConfigError::TickRate { .. })
        ));
    }

    fn unique_test_path(label: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be after epoch")
            .as_nanos();

        std::env::temp_dir()
            .join("toroid-snake-config-tests")
            .join(format!("{label}-{nanos}.json"))
    }

    fn write_test_file(path: &PathBuf, contents: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("test parent directory should be creatable");
        }
        fs::write(path, contents).expect("test file write should succeed");
    }

    fn cleanup_test_path(path: &PathBuf) {
        let _ = fs::remove_file(path);
    }
}
